//! Resource definitions
//!
//! Pairs every complex and entity type with the JSON text of its generated
//! example, classified as a `resource` block for the documentation
//! validator.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use crate::csdl::Schema;
use crate::error::Result;
use crate::generator::ExampleGenerator;
use crate::limits::Limits;

/// Classification of a documentation code block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    /// A resource example
    Resource,
}

/// A generated example for one declared type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    /// Fully-qualified type name
    pub type_name: String,
    /// Example instance as JSON text
    pub example_json: String,
    /// Always [`BlockType::Resource`]
    pub classification: BlockType,
}

impl ResourceDefinition {
    /// Create a resource definition
    pub fn new(type_name: impl Into<String>, example_json: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            example_json: example_json.into(),
            classification: BlockType::Resource,
        }
    }

    /// Parse the example JSON text
    pub fn example(&self) -> Result<JsonValue> {
        Ok(serde_json::from_str(&self.example_json)?)
    }
}

/// Builds resource definitions for a schema set
#[derive(Debug, Clone)]
pub struct ResourceAssembler<'a> {
    schemas: &'a [Schema],
    generator: ExampleGenerator<'a>,
    pretty: bool,
}

impl<'a> ResourceAssembler<'a> {
    /// Create an assembler with default limits and compact JSON
    pub fn new(schemas: &'a [Schema]) -> Self {
        Self {
            schemas,
            generator: ExampleGenerator::new(schemas),
            pretty: false,
        }
    }

    /// Set the limits used during generation
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.generator = self.generator.with_limits(limits);
        self
    }

    /// Set whether example JSON is indented
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Build one definition per type.
    ///
    /// Order: schema order, complex types before entity types, then
    /// declaration order. Unresolvable references inside an example are
    /// logged and never stop the sweep.
    pub fn assemble(&self) -> Result<Vec<ResourceDefinition>> {
        let mut resources = Vec::new();
        let mut substituted = 0;

        for schema in self.schemas {
            for ty in schema.structured_types() {
                let type_name = schema.qualified_name(&ty.name);
                let generated = self.generator.generate_traced(&type_name);
                for issue in &generated.issues {
                    warn!(resource = %type_name, %issue, "example contains a datatype fallback");
                }
                substituted += generated.issues.len();

                let example_json = if self.pretty {
                    generated.value.to_json_string_pretty()?
                } else {
                    generated.value.to_json_string()?
                };
                resources.push(ResourceDefinition::new(type_name, example_json));
            }
        }

        info!(
            resources = resources.len(),
            fallbacks = substituted,
            "generated resource examples"
        );
        Ok(resources)
    }
}

/// Generate resource definitions for every type in a schema set
pub fn generate_resources(schemas: &[Schema]) -> Result<Vec<ResourceDefinition>> {
    ResourceAssembler::new(schemas).assemble()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csdl::{ComplexType, EntityType, Property};
    use serde_json::json;

    fn schemas() -> Vec<Schema> {
        vec![
            Schema::new("Test")
                .with_entity_type(EntityType::new("User").with_property(Property::new("id", "Edm.String")))
                .with_complex_type(
                    ComplexType::new("Person")
                        .with_property(Property::new("name", "Edm.String"))
                        .with_property(Property::new("home", "Geo.Address")),
                ),
            Schema::new("Geo").with_complex_type(
                ComplexType::new("Address").with_property(Property::new("city", "Edm.String")),
            ),
        ]
    }

    #[test]
    fn test_order_and_classification() {
        let resources = generate_resources(&schemas()).unwrap();
        let names: Vec<_> = resources.iter().map(|r| r.type_name.as_str()).collect();
        // Complex types come before entity types within a schema
        assert_eq!(names, vec!["Test.Person", "Test.User", "Geo.Address"]);
        assert!(resources.iter().all(|r| r.classification == BlockType::Resource));
    }

    #[test]
    fn test_cross_schema_example() {
        let resources = generate_resources(&schemas()).unwrap();
        assert_eq!(
            resources[0].example_json,
            r#"{"name":"string","home":{"city":"string"}}"#
        );
        assert_eq!(
            resources[0].example().unwrap(),
            json!({"name": "string", "home": {"city": "string"}})
        );
    }

    #[test]
    fn test_pretty_output() {
        let schemas = schemas();
        let resources = ResourceAssembler::new(&schemas).with_pretty(true).assemble().unwrap();
        assert!(resources[2].example_json.contains("\n  \"city\": \"string\"\n"));
    }

    #[test]
    fn test_serialized_record() {
        let resource = ResourceDefinition::new("Test.T", "{}");
        assert_eq!(
            serde_json::to_value(&resource).unwrap(),
            json!({"typeName": "Test.T", "exampleJson": "{}", "classification": "resource"})
        );
    }

    #[test]
    fn test_empty_schema_set() {
        assert!(generate_resources(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_repeatable_output() {
        let schemas = schemas();
        assert_eq!(
            generate_resources(&schemas).unwrap(),
            generate_resources(&schemas).unwrap()
        );
    }
}
