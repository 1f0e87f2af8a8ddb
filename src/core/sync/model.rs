//! Generated model files.
//!
//! One file per content type: the data interface, the component props
//! convenience interface, and the instance class mapping each field to its
//! source type.

use std::collections::{BTreeSet, HashSet};

use super::typescript::{
    field_name, line_comment_text, safe_model_name, string_literal, CodeWriter,
};
use crate::core::remote::{PropertyInfo, TypeDetail};

/// Fields already declared by `Taxonomy.IContent`.
const ICONTENT_FIELDS: &[&str] = &["contentLink"];

const SPA_CORE_IMPORT: &str =
    "import { ContentDelivery, Taxonomy, ComponentTypes } from '@episerver/spa-core'";

/// The wrapper type a CMS property maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    Boolean,
    Number,
    String,
    ContentReference,
    ContentReferenceList,
    ContentArea,
    LinkList,
    /// A block property, referencing another generated model.
    Block(String),
    /// No mapping; kept as a generic property.
    Other(String),
}

impl PropertyKind {
    /// Classify a CMS type name. Names not in the fixed table that are
    /// themselves catalog entries are block references.
    pub fn classify(type_name: &str, catalog: &HashSet<String>) -> Self {
        match type_name {
            "Boolean" => Self::Boolean,
            "Decimal" | "Number" | "FloatNumber" => Self::Number,
            "String" | "string" | "LongString" | "XhtmlString" | "Url" => Self::String,
            "ContentReference" | "PageReference" => Self::ContentReference,
            "ContentReferenceList" => Self::ContentReferenceList,
            "ContentArea" => Self::ContentArea,
            "LinkCollection" => Self::LinkList,
            other if catalog.contains(other) => Self::Block(other.to_string()),
            other => Self::Other(other.to_string()),
        }
    }

    /// The TypeScript type annotation.
    pub fn annotation(&self) -> String {
        match self {
            Self::Boolean => "ContentDelivery.BooleanProperty".to_string(),
            Self::Number => "ContentDelivery.NumberProperty".to_string(),
            Self::String => "ContentDelivery.StringProperty".to_string(),
            Self::ContentReference => "ContentDelivery.ContentReferenceProperty".to_string(),
            Self::ContentReferenceList => {
                "ContentDelivery.ContentReferenceListProperty".to_string()
            }
            Self::ContentArea => "ContentDelivery.ContentAreaProperty".to_string(),
            Self::LinkList => "ContentDelivery.LinkListProperty".to_string(),
            Self::Block(name) => interface_name(name),
            Self::Other(name) => format!(
                "ContentDelivery.Property<any> // Original type: {}",
                line_comment_text(name)
            ),
        }
    }
}

/// `<Safe>Data`, the data interface and file name of a model.
pub fn interface_name(model: &str) -> String {
    format!("{}Data", safe_model_name(model))
}

/// `<Safe>Type`, the instance class of a model.
pub fn instance_name(model: &str) -> String {
    format!("{}Type", safe_model_name(model))
}

/// `<Safe>Props`, the component props interface of a model.
pub fn props_name(model: &str) -> String {
    format!("{}Props", safe_model_name(model))
}

struct Field<'a> {
    name: String,
    source: &'a PropertyInfo,
    kind: PropertyKind,
}

impl Field<'_> {
    fn is_inherited(&self) -> bool {
        ICONTENT_FIELDS.contains(&self.name.as_str())
    }

    fn doc(&self) -> [&str; 2] {
        [
            self.source.label(),
            self.source
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or("No description available"),
        ]
    }
}

/// A content type ready to be rendered.
pub struct ModelFile<'a> {
    detail: &'a TypeDetail,
    fields: Vec<Field<'a>>,
}

impl<'a> ModelFile<'a> {
    pub fn new(detail: &'a TypeDetail, catalog: &HashSet<String>) -> Self {
        let fields = detail
            .properties
            .iter()
            .map(|prop| Field {
                name: field_name(&prop.name),
                source: prop,
                kind: PropertyKind::classify(&prop.type_name, catalog),
            })
            .collect();
        Self { detail, fields }
    }

    /// File name of the generated model.
    pub fn file_name(&self) -> String {
        format!("{}.ts", interface_name(&self.detail.summary.name))
    }

    pub fn render(&self) -> String {
        let model = &self.detail.summary;
        let iface = interface_name(&model.name);
        let props = props_name(&model.name);
        let instance = instance_name(&model.name);

        let mut w = CodeWriter::new();

        let blocks: BTreeSet<String> = self
            .fields
            .iter()
            .filter(|f| !f.is_inherited())
            .filter_map(|f| match &f.kind {
                PropertyKind::Block(name) => Some(interface_name(name)),
                _ => None,
            })
            .filter(|name| *name != iface)
            .collect();
        for block in &blocks {
            w.line(format!(
                "import {} from {}",
                block,
                string_literal(&format!("./{}", block), '\'')
            ));
        }
        w.line(SPA_CORE_IMPORT);

        let guid = format!("@GUID {}", model.guid);
        w.doc([
            model.label(),
            model
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or("No Description available."),
            guid.as_str(),
        ]);
        w.block(
            format!("export default interface {} extends Taxonomy.IContent {{", iface),
            "}",
            |w| {
                for field in self.fields.iter().filter(|f| !f.is_inherited()) {
                    w.doc(field.doc());
                    w.line(format!("{}: {}", field.name, field.kind.annotation()));
                    w.blank();
                }
            },
        );
        w.blank();

        w.doc(["Convenience interface for componentDidUpdate & componentDidMount methods."]);
        w.line(format!(
            "export interface {} extends ComponentTypes.AbstractComponentProps<{}> {{}}",
            props, iface
        ));
        w.blank();

        w.block(
            format!(
                "export class {} extends Taxonomy.AbstractIContent<{}> implements {} {{",
                instance, iface, iface
            ),
            "}",
            |w| {
                w.line(format!(
                    "protected _typeName : string = {};",
                    string_literal(&model.name, '"')
                ));
                w.doc(["Map of all property types within this content type."]);
                w.block(
                    "protected _propertyMap : { [propName: string]: string } = {",
                    "}",
                    |w| {
                        for field in &self.fields {
                            w.line(format!(
                                "{}: {},",
                                string_literal(&field.name, '\''),
                                string_literal(&field.source.type_name, '\'')
                            ));
                        }
                    },
                );
                w.blank();
                for field in self.fields.iter().filter(|f| !f.is_inherited()) {
                    w.doc(field.doc());
                    w.line(format!(
                        "public get {name}() : {iface}[\"{name}\"] {{ return this.getProperty(\"{name}\"); }}",
                        name = field.name,
                        iface = iface
                    ));
                    w.blank();
                }
            },
        );

        w.finish()
    }
}
