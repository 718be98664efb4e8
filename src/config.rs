use regex::Regex;
use tracing::debug;

use crate::Error;

/// Regex of column names that are never offered as regression variables.
pub const EXCLUDED_COLUMNS_VAR: &str = "SALESFIT_EXCLUDED_COLUMNS";
/// Comma separated cell values treated as missing.
pub const MISSING_MARKERS_VAR: &str = "SALESFIT_MISSING_MARKERS";

pub const DEFAULT_EXCLUDED_COLUMNS: &str = r"(?i)^\s*(year|month|年|月)\s*$";
pub const DEFAULT_MISSING_MARKERS: &[&str] = &["", "NA", "NaN", "nan", "null"];

/// How tables are read and which of their columns may be used.
#[derive(Debug, Clone)]
pub struct Config {
    excluded_columns: Regex,
    missing_markers: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            excluded_columns: Regex::new(DEFAULT_EXCLUDED_COLUMNS)
                .expect("default exclusion pattern is valid"),
            missing_markers: DEFAULT_MISSING_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl Config {
    pub fn new(
        excluded_columns: &str,
        missing_markers: impl IntoIterator<Item = impl ToString>,
    ) -> Result<Self, Error> {
        Ok(Self {
            excluded_columns: Regex::new(excluded_columns)?,
            missing_markers: missing_markers.into_iter().map(|m| m.to_string()).collect(),
        })
    }

    /// Read `SALESFIT_EXCLUDED_COLUMNS` and `SALESFIT_MISSING_MARKERS`, falling back to the
    /// defaults for whichever is unset.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let mut config = Self::default();
        if let Some(pattern) = lookup(EXCLUDED_COLUMNS_VAR) {
            debug!("Using exclusion pattern {}", pattern);
            config.excluded_columns = Regex::new(&pattern)?;
        }
        if let Some(markers) = lookup(MISSING_MARKERS_VAR) {
            config.missing_markers = markers.split(',').map(|m| m.trim().to_string()).collect();
        }
        Ok(config)
    }

    #[inline]
    pub fn is_excluded(&self, column: &str) -> bool {
        self.excluded_columns.is_match(column)
    }

    #[inline]
    pub fn is_missing(&self, field: &str) -> bool {
        let field = field.trim();
        self.missing_markers.iter().any(|m| m == field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_exclusions() {
        let config = Config::default();
        assert!(config.is_excluded("year"));
        assert!(config.is_excluded("Month"));
        assert!(config.is_excluded(" YEAR "));
        assert!(config.is_excluded("年"));
        assert!(config.is_excluded("月"));
        assert!(!config.is_excluded("temperature"));
        assert!(!config.is_excluded("yearly_sales"));
        assert!(!config.is_excluded("気温"));
    }

    #[test]
    fn test_default_missing_markers() {
        let config = Config::default();
        assert!(config.is_missing(""));
        assert!(config.is_missing(" NA "));
        assert!(config.is_missing("NaN"));
        assert!(!config.is_missing("0"));
        assert!(!config.is_missing("n/a"));
    }

    #[test]
    fn test_from_lookup() {
        let config = Config::from_lookup(|key| match key {
            EXCLUDED_COLUMNS_VAR => Some("^id$".to_string()),
            MISSING_MARKERS_VAR => Some("-, n/a".to_string()),
            _ => None,
        })
        .unwrap();
        assert!(config.is_excluded("id"));
        assert!(!config.is_excluded("year"));
        assert!(config.is_missing("-"));
        assert!(config.is_missing("n/a"));
        assert!(!config.is_missing("NA"));
    }

    #[test]
    fn test_from_lookup_unset() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert!(config.is_excluded("year"));
        assert!(config.is_missing("NA"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            Config::from_lookup(|key| (key == EXCLUDED_COLUMNS_VAR).then(|| "(".to_string())),
            Err(Error::Regex(_))
        ));
        assert!(matches!(Config::new("[", [""]), Err(Error::Regex(_))));
    }
}
