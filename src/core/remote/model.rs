//! Wire types of the model introspection service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the content type catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TypeSummary {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "GUID")]
    pub guid: String,
}

impl TypeSummary {
    /// Display name, falling back to the internal name.
    pub fn label(&self) -> &str {
        label(&self.display_name, &self.name)
    }
}

/// A content type with its declared properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDetail {
    #[serde(flatten)]
    pub summary: TypeSummary,
    #[serde(rename = "Properties", default)]
    pub properties: Vec<PropertyInfo>,
}

/// A declared property of a content type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PropertyInfo {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "Type")]
    pub type_name: String,
}

impl PropertyInfo {
    pub fn new(name: &str, display_name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            display_name: Some(display_name.to_string()),
            description: None,
            type_name: type_name.to_string(),
        }
    }

    /// Display name, falling back to the internal name.
    pub fn label(&self) -> &str {
        label(&self.display_name, &self.name)
    }
}

fn label<'a>(display_name: &'a Option<String>, name: &'a str) -> &'a str {
    display_name
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(name)
}

/// Whether a payload is the client's network error shape: an object with a
/// truthy `error` flag and a `contentType` field.
pub fn is_network_error(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    truthy(obj.get("error")) && truthy(obj.get("contentType"))
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}
