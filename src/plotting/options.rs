use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ChartError, Result};
use crate::utils::Color;

/// The live, nested option tree of a chart instance.
///
/// Paths are dot separated object keys, e.g. `plugins.tooltip.bodyColor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionTree(Value);

impl Default for OptionTree {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl From<Value> for OptionTree {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl OptionTree {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(&self.0, |node, key| node.get(key))
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(Value::as_f64)
    }

    /// Parse the color stored at `path`, if any.
    pub fn get_color(&self, path: &str) -> Option<Color> {
        self.get_str(path).and_then(|s| s.parse().ok())
    }

    /// Overwrite an existing field, returning the previous value.
    ///
    /// Fails with [`ChartError::MalformedPaletteReference`] when the path does
    /// not resolve to a field of the tree.
    pub fn replace(&mut self, path: &str, value: Value) -> Result<Value> {
        let malformed = || ChartError::MalformedPaletteReference {
            path: path.to_string(),
        };
        if path.is_empty() {
            return Err(malformed());
        }
        let pointer = format!("/{}", path.replace('.', "/"));
        let slot = self.0.pointer_mut(&pointer).ok_or_else(malformed)?;
        Ok(std::mem::replace(slot, value))
    }

    /// Deep-merge `patch` into the tree. Objects merge key by key; any other
    /// value replaces what was there.
    pub fn merge(&mut self, patch: Value) {
        merge_value(&mut self.0, patch);
    }

    /// Set a field, creating intermediate objects as needed.
    ///
    /// Fails when an intermediate segment already holds a non-object value.
    pub fn insert(&mut self, path: &str, value: Value) -> Result<Option<Value>> {
        let malformed = || ChartError::MalformedPaletteReference {
            path: path.to_string(),
        };
        let mut keys: Vec<&str> = path.split('.').collect();
        let leaf = match keys.pop() {
            Some(leaf) if !leaf.is_empty() => leaf,
            _ => return Err(malformed()),
        };
        let mut node = &mut self.0;
        for key in keys {
            node = match node {
                Value::Object(map) => map
                    .entry(key.to_string())
                    .or_insert_with(|| Value::Object(Map::new())),
                _ => return Err(malformed()),
            };
        }
        match node {
            Value::Object(map) => Ok(map.insert(leaf.to_string(), value)),
            _ => Err(malformed()),
        }
    }
}

fn merge_value(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(&key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_get_nested() {
        let tree = OptionTree::new(json!({ "scales": { "y": { "ticks": { "color": "#9CA3AF" } } } }));
        assert_eq!(tree.get_str("scales.y.ticks.color"), Some("#9CA3AF"));
        assert_eq!(tree.get("scales.x.ticks.color"), None);
        assert_eq!(tree.get_color("scales.y.ticks.color"), Some(Color::rgb(0x9C, 0xA3, 0xAF)));
    }

    #[test]
    fn test_replace_requires_existing_field() {
        let mut tree = OptionTree::new(json!({ "plugins": { "tooltip": { "bodyColor": "#6B7280" } } }));
        let previous = tree.replace("plugins.tooltip.bodyColor", json!("#9CA3AF")).unwrap();
        assert_eq!(previous, json!("#6B7280"));
        assert_eq!(tree.get_str("plugins.tooltip.bodyColor"), Some("#9CA3AF"));

        let err = tree.replace("plugins.tooltip.titleColor", json!("#000")).unwrap_err();
        assert!(matches!(err, ChartError::MalformedPaletteReference { .. }));
    }

    #[test]
    fn test_insert_creates_parents() {
        let mut tree = OptionTree::default();
        assert_eq!(tree.insert("scales.x.grid.color", json!("#F3F4F6")).unwrap(), None);
        assert_eq!(tree.as_value(), &json!({ "scales": { "x": { "grid": { "color": "#F3F4F6" } } } }));
    }

    #[test]
    fn test_merge_keeps_sibling_fields() {
        let mut tree = OptionTree::new(json!({ "scales": { "y": { "beginAtZero": true, "grid": {} } }, "cutout": "80%" }));
        tree.merge(json!({ "indexAxis": "y", "scales": { "y": { "stacked": true, "grid": { "display": false } } }, "cutout": 0.5 }));
        assert_eq!(
            tree.as_value(),
            &json!({
                "indexAxis": "y",
                "scales": { "y": { "beginAtZero": true, "stacked": true, "grid": { "display": false } } },
                "cutout": 0.5,
            })
        );
    }

    #[test]
    fn test_insert_through_scalar_fails() {
        let mut tree = OptionTree::new(json!({ "cutout": "80%" }));
        assert!(tree.insert("cutout.color", json!("#fff")).is_err());
        assert!(tree.insert("", json!("#fff")).is_err());
    }
}
