//! Filter override files for the summary command

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reviewpulse_filters::FilterSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional filter overrides loaded from a YAML or TOML file
///
/// Unset fields keep the dataset-derived defaults. Dates are `YYYY-MM-DD`
/// strings (quote them in TOML).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_max: Option<i64>,
}

impl FilterOverrides {
    /// Load overrides from a file (YAML or TOML, by extension)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read filter config: {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        match extension {
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML filter config: {}", path.display())),
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML filter config: {}", path.display())),
            _ => Err(anyhow::anyhow!(
                "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
                extension
            )),
        }
    }

    /// Overlay these overrides onto a base spec
    pub fn apply(&self, mut spec: FilterSpec) -> FilterSpec {
        if let Some(start) = self.start_date {
            spec.start_date = start;
        }
        if let Some(end) = self.end_date {
            spec.end_date = end;
        }
        if let Some(ref platforms) = self.platforms {
            spec.platforms = platforms.iter().cloned().collect();
        }
        if let Some(ref types) = self.types {
            spec.types = types.iter().cloned().collect();
        }
        if let Some(min) = self.rating_min {
            spec.rating_min = min;
        }
        if let Some(max) = self.rating_max {
            spec.rating_max = max;
        }
        spec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn base_spec() -> FilterSpec {
        FilterSpec {
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            platforms: ["Web", "App"].iter().map(|s| s.to_string()).collect(),
            types: ["review"].iter().map(|s| s.to_string()).collect(),
            rating_min: 1,
            rating_max: 5,
        }
    }

    #[test]
    fn test_load_yaml_overrides() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().with_extension("yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "start_date: 2023-06-01").unwrap();
        writeln!(file, "rating_min: 4").unwrap();
        writeln!(file, "platforms:").unwrap();
        writeln!(file, "  - Web").unwrap();
        file.flush().unwrap();

        let overrides = FilterOverrides::load(&path).unwrap();
        let spec = overrides.apply(base_spec());

        assert_eq!(spec.start_date, NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
        assert_eq!(spec.rating_min, 4);
        assert_eq!(spec.platforms.len(), 1);
        // Untouched fields keep their defaults
        assert_eq!(spec.rating_max, 5);
        assert_eq!(spec.types.len(), 1);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_toml_overrides() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().with_extension("toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "end_date = \"2023-12-31\"").unwrap();
        writeln!(file, "rating_max = 3").unwrap();
        file.flush().unwrap();

        let overrides = FilterOverrides::load(&path).unwrap();
        let spec = overrides.apply(base_spec());

        assert_eq!(spec.end_date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
        assert_eq!(spec.rating_max, 3);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_unsupported_format() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().with_extension("json");
        std::fs::write(&path, "{}").unwrap();

        assert!(FilterOverrides::load(&path).is_err());

        std::fs::remove_file(path).unwrap();
    }
}
