use std::path::Path;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DagridError;

pub const DEFAULT_DESCRIPTION: &str = "No Description Provided";

/// Settings applied to every record of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Where the source document can be viewed.
    pub information_url: String,
    /// Where the public can comment on an application.
    pub comment_url: String,
    pub scrape_date: NaiveDate,
    /// Description used when a row has none.
    pub default_description: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions {
            information_url: String::new(),
            comment_url: String::new(),
            scrape_date: Local::now().date_naive(),
            default_description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

impl ExtractOptions {
    /// Load options from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, DagridError> {
        let content = std::fs::read_to_string(path).map_err(|e| DagridError::OptionsLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let options: ExtractOptions =
            serde_json::from_str(&content).map_err(|e| DagridError::OptionsLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), DagridError> {
        if self.default_description.trim().is_empty() {
            return Err(DagridError::OptionsInvalid(
                "default_description must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let options = ExtractOptions::default();
        assert_eq!(options.default_description, DEFAULT_DESCRIPTION);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"comment_url": "mailto:council@example.org", "scrape_date": "2021-05-01"}}"#
        )
        .unwrap();
        let options = ExtractOptions::load(file.path()).unwrap();
        assert_eq!(options.comment_url, "mailto:council@example.org");
        assert_eq!(options.scrape_date, NaiveDate::from_ymd_opt(2021, 5, 1).unwrap());
        assert_eq!(options.default_description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_empty_description_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_description": "  "}}"#).unwrap();
        assert!(matches!(
            ExtractOptions::load(file.path()),
            Err(DagridError::OptionsInvalid(_))
        ));
    }

    #[test]
    fn test_bad_json_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            ExtractOptions::load(file.path()),
            Err(DagridError::OptionsLoad { .. })
        ));
    }
}
