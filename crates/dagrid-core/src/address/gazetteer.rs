//! Street, suffix and suburb reference data.
//!
//! Loaded once before any page is processed and only read afterwards, so a
//! `&Gazetteer` can be shared freely between pages.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::DagridError;

pub const STREET_NAMES_FILE: &str = "street_names.csv";
pub const STREET_SUFFIXES_FILE: &str = "street_suffixes.csv";
pub const SUBURB_NAMES_FILE: &str = "suburb_names.csv";

#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    /// Street name -> suburbs the street runs through.
    streets: BTreeMap<String, BTreeSet<String>>,
    /// Suffix abbreviation -> canonical suffix.
    suffixes: HashMap<String, String>,
    /// Suburb name (with MOUNT/MT variants) -> canonical "name, state, postcode".
    suburbs: BTreeMap<String, String>,
}

impl Gazetteer {
    pub fn new() -> Self {
        Gazetteer::default()
    }

    /// Build from the text of the three datasets.
    pub fn from_csv(streets: &str, suffixes: &str, suburbs: &str) -> Result<Self, DagridError> {
        let mut gazetteer = Gazetteer::new();
        for (street, suburb) in parse_records(streets)? {
            gazetteer.add_street(&street, &suburb);
        }
        for (abbreviation, suffix) in parse_records(suffixes)? {
            gazetteer.add_suffix(&abbreviation, &suffix);
        }
        for (suburb, canonical) in parse_records(suburbs)? {
            gazetteer.add_suburb(&suburb, &canonical);
        }
        info!(
            streets = gazetteer.streets.len(),
            suffixes = gazetteer.suffixes.len(),
            suburbs = gazetteer.suburbs.len(),
            "gazetteer loaded"
        );
        Ok(gazetteer)
    }

    /// Load the three datasets from explicit paths.
    pub fn load(streets: &Path, suffixes: &Path, suburbs: &Path) -> Result<Self, DagridError> {
        let streets_text = read_dataset(streets)?;
        let suffixes_text = read_dataset(suffixes)?;
        let suburbs_text = read_dataset(suburbs)?;
        Gazetteer::from_csv(&streets_text, &suffixes_text, &suburbs_text)
    }

    /// Load the datasets from their conventional file names in `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, DagridError> {
        Gazetteer::load(
            &dir.join(STREET_NAMES_FILE),
            &dir.join(STREET_SUFFIXES_FILE),
            &dir.join(SUBURB_NAMES_FILE),
        )
    }

    pub fn add_street(&mut self, street: &str, suburb: &str) {
        let suburbs = self.streets.entry(normalize_key(street)).or_default();
        let suburb = normalize_key(suburb);
        if !suburb.is_empty() {
            suburbs.insert(suburb);
        }
    }

    pub fn add_suffix(&mut self, abbreviation: &str, suffix: &str) {
        self.suffixes
            .insert(normalize_key(abbreviation), normalize_key(suffix));
    }

    /// Register a suburb under its own name and its MOUNT/MT variant.
    pub fn add_suburb(&mut self, suburb: &str, canonical: &str) {
        let key = normalize_key(suburb);
        let canonical = canonical.trim().to_string();
        if let Some(rest) = key.strip_prefix("MOUNT ") {
            self.suburbs.insert(format!("MT {rest}"), canonical.clone());
        } else if let Some(rest) = key.strip_prefix("MT ") {
            self.suburbs.insert(format!("MOUNT {rest}"), canonical.clone());
        }
        self.suburbs.insert(key, canonical);
    }

    pub fn is_street(&self, name: &str) -> bool {
        self.streets.contains_key(name)
    }

    /// Street names in lexical order.
    pub fn street_names(&self) -> impl Iterator<Item = &str> {
        self.streets.keys().map(String::as_str)
    }

    /// Whether `street` is known to run through `suburb`.
    pub fn street_in_suburb(&self, street: &str, suburb: &str) -> bool {
        self.streets
            .get(street)
            .is_some_and(|suburbs| suburbs.contains(suburb))
    }

    pub fn expand_suffix(&self, abbreviation: &str) -> Option<&str> {
        self.suffixes.get(abbreviation).map(String::as_str)
    }

    /// Exact suburb lookup, returning the stored name and its canonical form.
    pub fn suburb(&self, name: &str) -> Option<(&str, &str)> {
        self.suburbs
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Suburb names (including MOUNT/MT variants) with their canonical form.
    pub fn suburbs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.suburbs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.streets.is_empty() && self.suburbs.is_empty()
    }
}

/// Upper-case with whitespace collapsed; the form every lookup key uses.
pub fn normalize_key(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

fn read_dataset(path: &Path) -> Result<String, DagridError> {
    std::fs::read_to_string(path).map_err(|e| DagridError::GazetteerLoad {
        path: PathBuf::from(path),
        reason: e.to_string(),
    })
}

/// Split newline-delimited records on their first comma. Blank lines are
/// skipped.
pub fn parse_records(text: &str) -> Result<Vec<(String, String)>, DagridError> {
    let text = text.trim_start_matches('\u{feff}');
    let mut records = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(',') else {
            return Err(DagridError::GazetteerRecord {
                line: i + 1,
                record: line.to_string(),
            });
        };
        records.push((key.trim().to_string(), value.trim().to_string()));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_records_splits_on_first_comma() {
        let records = parse_records("\u{feff}TOWNSVILLE,TOWNSVILLE, QLD, 4810\n\nRD,ROAD\n").unwrap();
        assert_eq!(
            records,
            vec![
                ("TOWNSVILLE".to_string(), "TOWNSVILLE, QLD, 4810".to_string()),
                ("RD".to_string(), "ROAD".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_records_rejects_missing_comma() {
        let err = parse_records("RD,ROAD\nSTREET").unwrap_err();
        assert!(matches!(err, DagridError::GazetteerRecord { line: 2, .. }));
    }

    #[test]
    fn test_street_spans_multiple_suburbs() {
        let g = Gazetteer::from_csv(
            "Smyth Road,Townsville\nSMYTH ROAD,KIRWAN",
            "RD,ROAD",
            "TOWNSVILLE,TOWNSVILLE, QLD, 4810",
        )
        .unwrap();
        assert!(g.is_street("SMYTH ROAD"));
        assert!(g.street_in_suburb("SMYTH ROAD", "TOWNSVILLE"));
        assert!(g.street_in_suburb("SMYTH ROAD", "KIRWAN"));
        assert_eq!(g.expand_suffix("RD"), Some("ROAD"));
    }

    #[test]
    fn test_mount_variants() {
        let mut g = Gazetteer::new();
        g.add_suburb("Mount Louisa", "MOUNT LOUISA, QLD, 4814");
        g.add_suburb("MT STUART", "MOUNT STUART, QLD, 4811");
        assert_eq!(g.suburb("MT LOUISA").map(|(_, c)| c), Some("MOUNT LOUISA, QLD, 4814"));
        assert_eq!(g.suburb("MOUNT LOUISA").map(|(_, c)| c), Some("MOUNT LOUISA, QLD, 4814"));
        assert_eq!(g.suburb("MOUNT STUART").map(|(_, c)| c), Some("MOUNT STUART, QLD, 4811"));
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, body: &str| {
            let mut f = std::fs::File::create(dir.path().join(name)).unwrap();
            f.write_all(body.as_bytes()).unwrap();
        };
        write(STREET_NAMES_FILE, "MAIN STREET,TOWNSVILLE\n");
        write(STREET_SUFFIXES_FILE, "ST,STREET\n");
        write(SUBURB_NAMES_FILE, "TOWNSVILLE,TOWNSVILLE, QLD, 4810\n");

        let g = Gazetteer::load_dir(dir.path()).unwrap();
        assert!(g.is_street("MAIN STREET"));
        assert!(!g.is_empty());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Gazetteer::load_dir(dir.path()).unwrap_err();
        match err {
            DagridError::GazetteerLoad { path, .. } => {
                assert!(path.ends_with(STREET_NAMES_FILE))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
