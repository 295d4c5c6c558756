//! CSDL schema model
//!
//! Plain data produced by the parser. Nothing here is mutated after a
//! document has been parsed.

use indexmap::IndexMap;
use serde::Serialize;

use crate::names;

/// A structural property of a complex or entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Property name
    pub name: String,
    /// Type identifier, verbatim from the `Type` attribute
    pub type_name: String,
    /// Whether the property accepts null
    pub nullable: bool,
}

impl Property {
    /// Create a new nullable property
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            nullable: true,
        }
    }

    /// Set whether the property is nullable
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Whether the type identifier is a `Collection(...)`
    pub fn is_collection(&self) -> bool {
        names::collection_element(&self.type_name).is_some()
    }
}

/// A navigation property of an entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationProperty {
    /// Navigation property name
    pub name: String,
    /// Target type identifier
    pub type_name: String,
}

/// A named structural type.
///
/// Properties are keyed by name; declaration order is kept so generated
/// examples are stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexType {
    /// Simple (unqualified) type name
    pub name: String,
    /// Declared properties by name
    pub properties: IndexMap<String, Property>,
    /// Base type identifier, if the type derives from another
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    /// Whether the type is abstract
    pub is_abstract: bool,
    /// Whether the type allows dynamic properties
    pub open_type: bool,
}

impl ComplexType {
    /// Create a new complex type with no properties
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: IndexMap::new(),
            base_type: None,
            is_abstract: false,
            open_type: false,
        }
    }

    /// Add a property, returning the updated type
    pub fn with_property(mut self, property: Property) -> Self {
        self.add_property(property);
        self
    }

    /// Add a property. A later declaration with the same name replaces an
    /// earlier one.
    pub fn add_property(&mut self, property: Property) {
        self.properties.insert(property.name.clone(), property);
    }

    /// Look up a property by name
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Iterate over properties in declaration order
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }
}

/// An entity type: a complex type with a key and navigation properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityType {
    /// The structural part shared with complex types
    #[serde(flatten)]
    pub structure: ComplexType,
    /// Names of the key properties
    pub key: Vec<String>,
    /// Declared navigation properties
    pub navigation_properties: Vec<NavigationProperty>,
}

impl EntityType {
    /// Create a new entity type with no properties
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_structure(ComplexType::new(name))
    }

    /// Wrap a structural type as an entity type
    pub fn from_structure(structure: ComplexType) -> Self {
        Self {
            structure,
            key: Vec::new(),
            navigation_properties: Vec::new(),
        }
    }

    /// Simple (unqualified) type name
    pub fn name(&self) -> &str {
        &self.structure.name
    }

    /// Add a property, returning the updated type
    pub fn with_property(mut self, property: Property) -> Self {
        self.structure.add_property(property);
        self
    }

    /// Add a key property name, returning the updated type
    pub fn with_key(mut self, name: impl Into<String>) -> Self {
        self.key.push(name.into());
        self
    }
}

impl AsRef<ComplexType> for EntityType {
    fn as_ref(&self) -> &ComplexType {
        &self.structure
    }
}

/// The contents of one CSDL `<Schema>` element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Schema namespace
    pub namespace: String,
    /// Complex types in declaration order
    pub complex_types: Vec<ComplexType>,
    /// Entity types in declaration order
    pub entity_types: Vec<EntityType>,
}

impl Schema {
    /// Create a new empty schema
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            complex_types: Vec::new(),
            entity_types: Vec::new(),
        }
    }

    /// Add a complex type, returning the updated schema
    pub fn with_complex_type(mut self, complex_type: ComplexType) -> Self {
        self.complex_types.push(complex_type);
        self
    }

    /// Add an entity type, returning the updated schema
    pub fn with_entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_types.push(entity_type);
        self
    }

    /// Iterate over all structural types: complex types first, then the
    /// structural part of each entity type.
    pub fn structured_types(&self) -> impl Iterator<Item = &ComplexType> {
        self.complex_types
            .iter()
            .chain(self.entity_types.iter().map(|e| &e.structure))
    }

    /// Fully-qualified name of a type declared in this schema
    pub fn qualified_name(&self, type_name: &str) -> String {
        names::qualify(&self.namespace, type_name)
    }

    /// Number of declared complex and entity types
    pub fn type_count(&self) -> usize {
        self.complex_types.len() + self.entity_types.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> Schema {
        Schema::new("Test")
            .with_complex_type(
                ComplexType::new("Address").with_property(Property::new("city", "Edm.String")),
            )
            .with_entity_type(
                EntityType::new("Person")
                    .with_key("id")
                    .with_property(Property::new("id", "Edm.Int64").with_nullable(false))
                    .with_property(Property::new("home", "Test.Address")),
            )
    }

    #[test]
    fn test_structured_types_order() {
        let schema = sample_schema();
        let names: Vec<_> = schema.structured_types().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Address", "Person"]);
        assert_eq!(schema.type_count(), 2);
    }

    #[test]
    fn test_property_lookup_by_name() {
        let schema = sample_schema();
        let person = &schema.entity_types[0];
        assert_eq!(person.name(), "Person");
        assert_eq!(person.key, vec!["id"]);

        let id = person.as_ref().property("id").unwrap();
        assert_eq!(id.type_name, "Edm.Int64");
        assert!(!id.nullable);
        assert!(person.as_ref().property("missing").is_none());
    }

    #[test]
    fn test_redeclared_property_replaces() {
        let ty = ComplexType::new("T")
            .with_property(Property::new("a", "Edm.String"))
            .with_property(Property::new("b", "Edm.String"))
            .with_property(Property::new("a", "Edm.Int32"));
        let props: Vec<_> = ty.properties().map(|p| (p.name.as_str(), p.type_name.as_str())).collect();
        assert_eq!(props, vec![("a", "Edm.Int32"), ("b", "Edm.String")]);
    }

    #[test]
    fn test_is_collection() {
        assert!(Property::new("pets", "Collection(Test.Pet)").is_collection());
        assert!(!Property::new("pet", "Test.Pet").is_collection());
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(sample_schema().qualified_name("Person"), "Test.Person");
    }
}
