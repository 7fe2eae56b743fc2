//! On-disk copy of the point list.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::rasp::StationsList;

use super::error::PointsError;

/// Stores the stations list as JSON at a fixed path.
///
/// The list is fetched by `scan points` and only written back on `save`, so
/// a missing file simply means nothing has been scanned yet.
#[derive(Debug, Clone)]
pub struct PointStore {
    path: PathBuf,
}

impl PointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the stored list.
    ///
    /// Returns `Ok(None)` if the file doesn't exist.
    pub fn load(&self) -> Result<Option<StationsList>, PointsError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored point list");
                return Ok(None);
            }
            Err(source) => {
                return Err(PointsError::Io {
                    action: "failed to read",
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let list = serde_json::from_str(&contents).map_err(|source| PointsError::Json {
            path: self.path.clone(),
            source,
        })?;

        Ok(Some(list))
    }

    /// Save the list, creating parent directories if they don't exist.
    pub fn save(&self, list: &StationsList) -> Result<(), PointsError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|source| PointsError::Io {
                action: "failed to create directory for",
                path: self.path.clone(),
                source,
            })?;
        }

        let json = serde_json::to_string(list).map_err(|source| PointsError::Json {
            path: self.path.clone(),
            source,
        })?;

        std::fs::write(&self.path, json).map_err(|source| PointsError::Io {
            action: "failed to write",
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), countries = list.countries.len(), "saved point list");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasp::{Codes, Country};
    use tempfile::tempdir;

    fn sample() -> StationsList {
        StationsList {
            countries: vec![Country {
                title: Some("Россия".to_string()),
                codes: Codes {
                    yandex_code: Some("l225".to_string()),
                    esr_code: None,
                },
                regions: Vec::new(),
            }],
        }
    }

    #[test]
    fn save_and_load() {
        let dir = tempdir().unwrap();
        let store = PointStore::new(dir.path().join("points.json"));

        store.save(&sample()).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempdir().unwrap();
        let store = PointStore::new(dir.path().join("absent.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn malformed_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("points.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = PointStore::new(&path).load().unwrap_err();
        assert!(matches!(err, PointsError::Json { .. }));
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("points.json");
        let store = PointStore::new(&path);

        store.save(&sample()).unwrap();
        assert!(path.exists());
        assert_eq!(store.path(), path);
    }
}
