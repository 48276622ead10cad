use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use dashboard_engine::Resource;
use dashboard_logging::{dashboard_error, dashboard_info, dashboard_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

use super::tables::is_resource_location;

const VIEWS_FILENAME: &str = ".bakery_admin_views.ron";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("views directory missing or not writable: {0}")]
    Dir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("could not serialize saved views: {0}")]
    Serialize(String),
}

/// Last location browsed per resource, keyed by resource name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct SavedViews {
    views: BTreeMap<String, String>,
}

pub(crate) fn load_saved_view(dir: &Path, resource: Resource) -> Option<String> {
    let path = dir.join(VIEWS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
        Err(err) => {
            dashboard_warn!("Failed to read saved views from {:?}: {}", path, err);
            return None;
        }
    };
    let saved: SavedViews = match ron::from_str(&content) {
        Ok(saved) => saved,
        Err(err) => {
            dashboard_warn!("Failed to parse saved views from {:?}: {}", path, err);
            return None;
        }
    };

    let location = saved.views.get(resource.as_str()).cloned()?;
    // A view saved for one page never reopens another.
    if !is_resource_location(resource, &location) {
        dashboard_warn!("Ignoring saved view {:?} for {}", location, resource);
        return None;
    }
    dashboard_info!("Restored {} view {}", resource, location);
    Some(location)
}

pub(crate) fn save_view(dir: &Path, resource: Resource, location: &str) {
    if let Err(err) = try_save_view(dir, resource, location) {
        dashboard_error!("Failed to save {} view to {:?}: {}", resource, dir, err);
    }
}

fn try_save_view(dir: &Path, resource: Resource, location: &str) -> Result<PathBuf, PersistError> {
    let path = dir.join(VIEWS_FILENAME);
    let mut saved: SavedViews = fs::read_to_string(&path)
        .ok()
        .and_then(|text| ron::from_str(&text).ok())
        .unwrap_or_default();
    saved
        .views
        .insert(resource.as_str().to_string(), location.to_string());

    let content = ron::ser::to_string_pretty(&saved, ron::ser::PrettyConfig::new())
        .map_err(|err| PersistError::Serialize(err.to_string()))?;
    write_atomically(dir, VIEWS_FILENAME, &content)
}

/// Writes `{dir}/{filename}` through a temp file and a rename.
fn write_atomically(dir: &Path, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(PersistError::Dir(format!("{dir:?} is not a directory")));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::Dir(e.to_string()))?;
    }

    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_views_survive_a_restart() {
        let dir = tempfile::tempdir().unwrap();
        save_view(dir.path(), Resource::Orders, "/dashboard/orders?pageIndex=3");
        save_view(dir.path(), Resource::Cakes, "/dashboard/cakes?search=opera");

        assert_eq!(
            load_saved_view(dir.path(), Resource::Orders).as_deref(),
            Some("/dashboard/orders?pageIndex=3")
        );
        assert_eq!(
            load_saved_view(dir.path(), Resource::Cakes).as_deref(),
            Some("/dashboard/cakes?search=opera")
        );
        assert_eq!(load_saved_view(dir.path(), Resource::Bakeries), None);
    }

    #[test]
    fn saving_again_replaces_the_previous_view() {
        let dir = tempfile::tempdir().unwrap();
        save_view(dir.path(), Resource::Orders, "/dashboard/orders?pageIndex=3");
        save_view(dir.path(), Resource::Orders, "/dashboard/orders");
        assert_eq!(
            load_saved_view(dir.path(), Resource::Orders).as_deref(),
            Some("/dashboard/orders")
        );
    }

    #[test]
    fn corrupt_or_foreign_views_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(VIEWS_FILENAME), "not ron").unwrap();
        assert_eq!(load_saved_view(dir.path(), Resource::Orders), None);

        save_view(dir.path(), Resource::Orders, "/dashboard/cakes");
        assert_eq!(load_saved_view(dir.path(), Resource::Orders), None);

        save_view(dir.path(), Resource::Orders, "/dashboard/orders-archive?pageIndex=2");
        assert_eq!(load_saved_view(dir.path(), Resource::Orders), None);
    }

    #[test]
    fn missing_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("state");
        save_view(&nested, Resource::Orders, "/dashboard/orders");
        assert!(nested.join(VIEWS_FILENAME).exists());
    }
}
