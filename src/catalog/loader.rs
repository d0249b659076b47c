use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result, bail};
use rust_embed::Embed;

use crate::catalog::node::Catalog;
use crate::event::AppEvent;

#[derive(Embed)]
#[folder = "assets/catalog/"]
struct CatalogAssets;

const BUNDLED_CATALOG: &str = "default.json";

/// Load and parse a catalog file from disk.
pub fn load_from_path(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file {}", path.display()))?;
    let catalog: Catalog = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse catalog file {}", path.display()))?;
    Ok(catalog)
}

/// Load the catalog bundled into the binary.
pub fn load_bundled() -> Result<Catalog> {
    let Some(file) = CatalogAssets::get(BUNDLED_CATALOG) else {
        bail!("bundled catalog {BUNDLED_CATALOG} is missing");
    };
    let content = std::str::from_utf8(file.data.as_ref())
        .context("bundled catalog is not valid UTF-8")?;
    let catalog: Catalog =
        serde_json::from_str(content).context("failed to parse bundled catalog")?;
    Ok(catalog)
}

pub fn load(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => load_from_path(path),
        None => load_bundled(),
    }
}

/// Fetch the catalog on a background thread and report through the app event
/// channel. This is the only asynchronous load in the session; navigation
/// stays disabled until the `CatalogLoaded` event arrives.
pub(crate) fn spawn_load(path: Option<PathBuf>, tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let result = load(path.as_deref()).map_err(|e| format!("{e:#}"));
        let _ = tx.send(AppEvent::CatalogLoaded(result));
    });
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_bundled_catalog_parses() {
        let catalog = load_bundled().unwrap();
        assert!(!catalog.items.is_empty());
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"items": [{{"id": "only", "leafTitle": "Only", "description": "One."}}]}}"#
        )
        .unwrap();
        let catalog = load_from_path(file.path()).unwrap();
        assert_eq!(catalog.items.len(), 1);
        assert_eq!(catalog.items[0].id, "only");
    }

    #[test]
    fn test_load_from_missing_path_errors() {
        let err = load_from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn test_load_from_invalid_json_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }
}
