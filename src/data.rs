use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single loosely-typed input record: field name -> scalar value.
/// No fixed schema; fields are referenced by name at pivot time.
pub type TabularRecord = serde_json::Map<String, Value>;

/// Parse a JSON array of objects into tabular records.
pub fn records_from_json(value: &Value) -> Result<Vec<TabularRecord>> {
    let array = value
        .as_array()
        .ok_or_else(|| anyhow!("Input data must be a JSON array of objects"))?;

    if array.is_empty() {
        return Err(anyhow!("Input data array is empty"));
    }

    let mut records = Vec::with_capacity(array.len());
    for item in array {
        let obj = item
            .as_object()
            .ok_or_else(|| anyhow!("Items in array must be objects"))?;
        records.push(obj.clone());
    }

    Ok(records)
}

/// Render a scalar field value as an axis/legend label.
/// Strings pass through; numbers and booleans use their canonical JSON form.
pub fn scalar_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => value.to_string(),
    }
}

/// A node in a hierarchical data set (treemap, sunburst).
///
/// Genuinely recursive with no depth ceiling. A parent's `value` is passed
/// through untouched; it is never validated against the sum of its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Weight used for layout: the node's own value, or the sum of its
    /// children's weights when no value is given. Valueless leaves weigh 0.
    pub fn weight(&self) -> f64 {
        match self.value {
            Some(v) => v,
            None => self.children.iter().map(TreeNode::weight).sum(),
        }
    }
}
