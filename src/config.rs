use serde::{Deserialize, Serialize};

/// Per-enhancer options, deserialized from the host's plugin configuration
/// blob. Unknown fields are ignored so older hosts can ship newer configs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Adjust and inject completion lists.
    pub completions: bool,
    /// Decorate completion detail and hover results.
    pub documentation: bool,
    /// Widen reference and rename results for watched properties.
    pub references: bool,
    /// Capacity of the quick-info cache before least-recently-used entries
    /// are evicted.
    pub quick_info_cache_capacity: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            completions: true,
            documentation: true,
            references: true,
            quick_info_cache_capacity: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = Options::default();
        assert!(options.completions);
        assert!(options.documentation);
        assert!(options.references);
        assert_eq!(options.quick_info_cache_capacity, 256);
    }

    #[test]
    fn parses_partial_config() {
        let options: Options =
            serde_json::from_str(r#"{"completions": false, "unknown": 1}"#).unwrap();
        assert!(!options.completions);
        assert!(options.documentation);
        assert_eq!(options.quick_info_cache_capacity, 256);
    }
}
