//! Deep merge for layered YAML configuration.
//!
//! # Merge Rules
//!
//! - Mappings are merged recursively
//! - Sequences are replaced entirely (not merged)
//! - Null values in overlay delete the corresponding key from base
//! - Scalars in overlay replace scalars in base

use serde_yaml::Value;

/// Deep merge two YAML values, `overlay` taking precedence.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();

            for (key, overlay_value) in overlay_map {
                if overlay_value.is_null() {
                    result.remove(key);
                } else if let Some(base_value) = base_map.get(key) {
                    result.insert(key.clone(), deep_merge(base_value, overlay_value));
                } else {
                    result.insert(key.clone(), overlay_value.clone());
                }
            }

            Value::Mapping(result)
        }

        (_, overlay) => overlay.clone(),
    }
}

/// Merge multiple configs in order (later overrides earlier).
pub fn merge_configs(configs: &[Value]) -> Value {
    configs
        .iter()
        .fold(Value::Mapping(Default::default()), |acc, config| {
            deep_merge(&acc, config)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn nested_keys_survive_partial_override() {
        let base = yaml(
            r#"
installer:
  program: pip
  packages: [pandas]
"#,
        );
        let overlay = yaml(
            r#"
installer:
  program: uv
"#,
        );

        let result = deep_merge(&base, &overlay);

        assert_eq!(result["installer"]["program"], "uv");
        assert_eq!(result["installer"]["packages"][0], "pandas");
    }

    #[test]
    fn sequences_are_replaced_not_merged() {
        let base = yaml("packages: [streamlit, pandas]");
        let overlay = yaml("packages: [numpy]");

        let result = deep_merge(&base, &overlay);

        let packages = result["packages"].as_sequence().unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0], "numpy");
    }

    #[test]
    fn null_deletes_key() {
        let base = yaml("verify:\n  script: check.py\n  interpreter: python\n");
        let overlay = yaml("verify:\n  interpreter: null\n");

        let result = deep_merge(&base, &overlay);

        assert_eq!(result["verify"]["script"], "check.py");
        assert!(result["verify"].get("interpreter").is_none());
    }

    #[test]
    fn merge_configs_applies_in_order() {
        let configs = vec![
            yaml("settings:\n  on_failure: halt\n"),
            yaml("settings:\n  on_failure: continue\n"),
        ];

        let result = merge_configs(&configs);

        assert_eq!(result["settings"]["on_failure"], "continue");
    }

    #[test]
    fn merge_of_nothing_is_empty_mapping() {
        let result = merge_configs(&[]);
        assert!(result.as_mapping().unwrap().is_empty());
    }
}
