pub mod units;

pub use units::{to_degrees, to_radians, SPEED_OF_LIGHT};
