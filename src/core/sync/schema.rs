//! The consolidated JSON schema of the catalog.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;

use super::typescript::field_name;
use crate::core::remote::{PropertyInfo, TypeDetail, TypeSummary};

/// A string keyed map that serialises in insertion order. Re-inserting a key
/// replaces the value in place.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V>(Vec<(String, V)>);

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, key: String, value: V) {
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// One property of a schema entry.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaProperty {
    pub name: String,
    pub source_name: String,
    pub display_name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl From<&PropertyInfo> for SchemaProperty {
    fn from(prop: &PropertyInfo) -> Self {
        Self {
            name: field_name(&prop.name),
            source_name: prop.name.clone(),
            display_name: prop.label().to_string(),
            description: prop.description.clone().unwrap_or_default(),
            type_name: format!("Property{}", prop.type_name),
        }
    }
}

/// One content type in the schema.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaEntry {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub properties: OrderedMap<SchemaProperty>,
}

/// Properties every content item carries.
fn builtin_properties() -> [PropertyInfo; 3] {
    [
        PropertyInfo::new("Name", "Name", "LongString"),
        PropertyInfo::new("ContentLink", "Content Link", "ContentReference"),
        PropertyInfo::new("ParentLink", "Parent reference", "ContentReference"),
    ]
}

impl SchemaEntry {
    /// Build an entry from the catalog summary and, when it could be
    /// fetched, the type's detail.
    pub fn new(summary: &TypeSummary, detail: Option<&TypeDetail>) -> Self {
        let mut properties = OrderedMap::new();
        let declared = detail.map(|d| d.properties.as_slice()).unwrap_or_default();
        for prop in builtin_properties().iter().chain(declared) {
            properties.insert(field_name(&prop.name), SchemaProperty::from(prop));
        }

        Self {
            id: summary.guid.clone(),
            name: summary.name.clone(),
            display_name: summary.label().to_string(),
            description: summary.description.clone().unwrap_or_default(),
            properties,
        }
    }
}

/// The whole schema document, keyed by content type name.
pub type Schema = OrderedMap<SchemaEntry>;

/// Build the schema for a catalog, pairing each summary with its detail.
pub fn build<'a, I>(entries: I) -> Schema
where
    I: IntoIterator<Item = (&'a TypeSummary, Option<&'a TypeDetail>)>,
{
    let mut schema = Schema::new();
    for (summary, detail) in entries {
        schema.insert(summary.name.clone(), SchemaEntry::new(summary, detail));
    }
    schema
}

/// Serialise the schema as JSON indented with four spaces.
pub fn to_json(schema: &Schema) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    schema.serialize(&mut ser)?;
    // serde_json only ever emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
