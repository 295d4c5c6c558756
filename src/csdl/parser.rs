//! CSDL document parsing
//!
//! Walks the element tree produced by [`crate::documents`] and materializes
//! [`Schema`] instances. Elements are matched on local name, so both EDMX
//! wrapped documents and bare `<Schema>` documents are accepted regardless of
//! the OData namespace version.

use tracing::{debug, info, warn};

use super::model::{ComplexType, EntityType, NavigationProperty, Property, Schema};
use crate::documents::{Document, Element};
use crate::error::{ParseError, Result};
use crate::limits::Limits;
use crate::names;

/// CSDL element local names
mod csdl_elements {
    pub const SCHEMA: &str = "Schema";
    pub const COMPLEX_TYPE: &str = "ComplexType";
    pub const ENTITY_TYPE: &str = "EntityType";
    pub const PROPERTY: &str = "Property";
    pub const NAVIGATION_PROPERTY: &str = "NavigationProperty";
    pub const KEY: &str = "Key";
    pub const PROPERTY_REF: &str = "PropertyRef";
}

/// CSDL attribute names
mod csdl_attrs {
    pub const NAMESPACE: &str = "Namespace";
    pub const NAME: &str = "Name";
    pub const TYPE: &str = "Type";
    pub const NULLABLE: &str = "Nullable";
    pub const BASE_TYPE: &str = "BaseType";
    pub const ABSTRACT: &str = "Abstract";
    pub const OPEN_TYPE: &str = "OpenType";
}

use csdl_attrs as attrs;
use csdl_elements as elements;

/// Parse CSDL metadata text into schemas with default limits
pub fn parse_schemas(xml: &str) -> Result<Vec<Schema>> {
    CsdlParser::new().parse(xml)
}

/// CSDL metadata parser
#[derive(Debug, Clone, Default)]
pub struct CsdlParser {
    limits: Limits,
}

impl CsdlParser {
    /// Create a new parser with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Parse CSDL metadata text.
    ///
    /// Returns every `Schema` element in document order. A document without
    /// any `Schema` element yields an empty vector.
    pub fn parse(&self, xml: &str) -> Result<Vec<Schema>> {
        let document = Document::parse(xml.as_bytes(), &self.limits)?;
        self.parse_document(&document)
    }

    /// Extract schemas from an already parsed document
    pub fn parse_document(&self, document: &Document) -> Result<Vec<Schema>> {
        let mut schemas = Vec::new();
        let mut component_count = 0;

        for element in document.root().find_descendants(elements::SCHEMA) {
            let schema = parse_schema(element)?;
            component_count += schema.type_count();
            self.limits.check_schema_components(component_count)?;
            schemas.push(schema);
        }

        info!(
            schemas = schemas.len(),
            types = component_count,
            "parsed CSDL metadata"
        );
        Ok(schemas)
    }
}

fn parse_schema(element: &Element) -> Result<Schema> {
    let namespace = element.get_attribute(attrs::NAMESPACE).ok_or_else(|| {
        ParseError::new("Schema element is missing the Namespace attribute")
            .with_location(elements::SCHEMA)
    })?;
    if !names::is_namespace(namespace) {
        warn!(namespace, "schema namespace is not a valid CSDL namespace");
    }

    let mut schema = Schema::new(namespace);
    let location = format!("{}[{}]", elements::SCHEMA, namespace);

    for type_element in element.find_descendants(elements::COMPLEX_TYPE) {
        schema
            .complex_types
            .push(parse_structure(type_element, &location)?);
    }

    for type_element in element.find_descendants(elements::ENTITY_TYPE) {
        schema
            .entity_types
            .push(parse_entity_type(type_element, &location)?);
    }

    debug!(
        namespace,
        complex_types = schema.complex_types.len(),
        entity_types = schema.entity_types.len(),
        "parsed schema"
    );
    Ok(schema)
}

fn parse_structure(element: &Element, parent: &str) -> Result<ComplexType> {
    let name = required_attribute(element, attrs::NAME, parent)?;
    if !names::is_simple_identifier(name) {
        warn!(type_name = name, "type name is not a valid CSDL identifier");
    }

    let location = format!("{}/{}[{}]", parent, element.local_name(), name);
    let mut structure = ComplexType::new(name);
    structure.base_type = element.get_attribute(attrs::BASE_TYPE).map(str::to_string);
    structure.is_abstract = flag(element, attrs::ABSTRACT, false);
    structure.open_type = flag(element, attrs::OPEN_TYPE, false);

    for property_element in element.find_children(elements::PROPERTY) {
        structure.add_property(parse_property(property_element, &location)?);
    }

    Ok(structure)
}

fn parse_entity_type(element: &Element, parent: &str) -> Result<EntityType> {
    let mut entity = EntityType::from_structure(parse_structure(element, parent)?);
    let location = format!("{}/{}[{}]", parent, element.local_name(), entity.name());

    for key in element.find_children(elements::KEY) {
        for property_ref in key.find_children(elements::PROPERTY_REF) {
            let name = required_attribute(property_ref, attrs::NAME, &location)?;
            entity.key.push(name.to_string());
        }
    }

    for nav in element.find_children(elements::NAVIGATION_PROPERTY) {
        entity.navigation_properties.push(NavigationProperty {
            name: required_attribute(nav, attrs::NAME, &location)?.to_string(),
            type_name: required_attribute(nav, attrs::TYPE, &location)?.to_string(),
        });
    }

    Ok(entity)
}

fn parse_property(element: &Element, parent: &str) -> Result<Property> {
    let name = required_attribute(element, attrs::NAME, parent)?;
    let location = format!("{}/{}[{}]", parent, element.local_name(), name);
    let type_name = required_attribute(element, attrs::TYPE, &location)?;

    Ok(Property::new(name, type_name).with_nullable(flag(element, attrs::NULLABLE, true)))
}

fn required_attribute<'a>(element: &'a Element, name: &str, parent: &str) -> Result<&'a str> {
    element.get_attribute(name).ok_or_else(|| {
        ParseError::new(format!(
            "{} element is missing the {} attribute",
            element.local_name(),
            name
        ))
        .with_location(parent)
        .into()
    })
}

fn flag(element: &Element, name: &str, default: bool) -> bool {
    match element.get_attribute(name) {
        Some("true") => true,
        Some("false") => false,
        _ => default,
    }
}
