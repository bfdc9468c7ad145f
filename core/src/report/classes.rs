use crate::prelude::{MapError, MapResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name reported for the explicit background label.
pub const BACKGROUND_CLASS: &str = "__background";
/// Class id the detector uses for an explicit background label.
pub const BACKGROUND_CLASS_ID: i64 = -1000;

/// Ordered object class names, indexed by class id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTable {
    pub classes: Vec<String>,
}

impl ClassTable {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Loads the object config JSON (`{"classes": [...]}`).
    pub fn load<P: AsRef<Path>>(path: P) -> MapResult<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|err| MapError::io(path_ref, err))?;
        Self::parse(path_ref, &contents)
    }

    fn parse(path: &Path, contents: &str) -> MapResult<Self> {
        serde_json::from_str(contents).map_err(|source| MapError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn resolve(&self, class_id: i64) -> MapResult<&str> {
        resolve_class_name(class_id, &self.classes)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Maps a detector class id to its report name.
pub fn resolve_class_name(class_id: i64, classes: &[String]) -> MapResult<&str> {
    if class_id == BACKGROUND_CLASS_ID {
        return Ok(BACKGROUND_CLASS);
    }
    usize::try_from(class_id)
        .ok()
        .and_then(|idx| classes.get(idx))
        .map(String::as_str)
        .ok_or(MapError::InvalidClass(class_id))
}

/// Class table read from disk and re-parsed whenever the file changes.
///
/// The file is read on every [`ClassConfigCache::table`] call and parsed
/// again only when its bytes differ from the cached copy. A file that
/// disappeared between calls is reported, not served from the cache.
pub struct ClassConfigCache {
    path: PathBuf,
    cached: Option<(String, ClassTable)>,
}

impl ClassConfigCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: None,
        }
    }

    pub fn table(&mut self) -> MapResult<&ClassTable> {
        let contents =
            fs::read_to_string(&self.path).map_err(|err| MapError::io(&self.path, err))?;

        let entry = match self.cached.take() {
            Some((seen, table)) if seen == contents => (seen, table),
            _ => {
                let table = ClassTable::parse(&self.path, &contents)?;
                log::debug!(
                    "loaded {} classes from {}",
                    table.len(),
                    self.path.display()
                );
                (contents, table)
            }
        };
        Ok(&self.cached.insert(entry).1)
    }
}
