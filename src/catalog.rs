//! The fixed list of vaccination centers to watch.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::WatchError;

/// A centre de sante on Doctolib, addressed by city and slug name.
#[derive(Debug, Clone, Deserialize)]
pub struct Center {
    pub ville: String,
    pub name: String,
}

impl Center {
    /// Public booking page for this center, linked from alert messages.
    pub fn detail_url(&self) -> String {
        format!(
            "https://www.doctolib.fr/centre-de-sante/{}/{}",
            self.ville, self.name
        )
    }
}

/// Load the slug file: a JSON array of `{ville, name}` objects.
pub fn load_catalog(path: &Path) -> Result<Vec<Center>, WatchError> {
    let raw = fs::read_to_string(path).map_err(|e| WatchError::catalog(path, e))?;
    serde_json::from_str(&raw).map_err(|e| WatchError::catalog(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_detail_url_format() {
        let center = Center {
            ville: "paris".to_string(),
            name: "center-a".to_string(),
        };
        assert_eq!(
            center.detail_url(),
            "https://www.doctolib.fr/centre-de-sante/paris/center-a"
        );
    }

    #[test]
    fn test_load_catalog() {
        let mut file = tempfile::NamedTempFile::new().expect("should create temp file");
        write!(
            file,
            r#"[{{"ville": "paris", "name": "center-a"}}, {{"ville": "lyon", "name": "center-b"}}]"#
        )
        .expect("should write catalog");

        let centers = load_catalog(file.path()).expect("should load catalog");
        assert_eq!(centers.len(), 2);
        assert_eq!(centers[0].ville, "paris");
        assert_eq!(centers[1].name, "center-b");
    }

    #[test]
    fn test_malformed_catalog_is_error() {
        let mut file = tempfile::NamedTempFile::new().expect("should create temp file");
        write!(file, "not json").expect("should write");

        let result = load_catalog(file.path());
        assert!(matches!(result, Err(WatchError::Catalog { .. })));
    }

    #[test]
    fn test_missing_catalog_is_error() {
        let result = load_catalog(Path::new("/nonexistent/slugs.json"));
        assert!(matches!(result, Err(WatchError::Catalog { .. })));
    }
}
