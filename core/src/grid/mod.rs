pub mod angle;
pub mod locate;
pub mod mapping;
pub mod range;

pub use angle::{build_angle_grid, build_angle_grid_named, AngleUnit};
pub use locate::{nearest_index, range_angle_to_indices};
pub use mapping::{build_grid, GridKind, RaGrids};
pub use range::build_range_grid;
