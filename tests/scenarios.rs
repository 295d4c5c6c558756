//! End-to-end tests: CSDL text in, resource definitions out

use std::path::PathBuf;

use csdl_examples::{
    generate, generate_resources, parse_schemas, BlockType, Error, ExampleGenerator,
    GenerationIssue, Limits, Loader, Location, ResourceAssembler,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn fixture(name: &str) -> Location {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    Location::Path(path)
}

fn load(names: &[&str]) -> Vec<csdl_examples::Schema> {
    let locations: Vec<_> = names.iter().map(|n| fixture(n)).collect();
    Loader::new()
        .load_schemas(&locations)
        .expect("fixtures should parse")
}

fn person_with(extra: &str) -> String {
    format!(
        r#"<Schema Namespace="Test">
  <ComplexType Name="Person">
    <Property Name="name" Type="Edm.String"/>
    <Property Name="age" Type="Edm.Int32"/>
    {}
  </ComplexType>
  <ComplexType Name="Pet">
    <Property Name="petName" Type="Edm.String"/>
  </ComplexType>
</Schema>"#,
        extra
    )
}

// ============================================================================
// Documented scenarios
// ============================================================================

#[test]
fn test_scenario_simple_person() {
    let schemas = parse_schemas(&person_with("")).unwrap();
    let resources = generate_resources(&schemas).unwrap();

    assert_eq!(resources[0].type_name, "Test.Person");
    assert_eq!(resources[0].example_json, r#"{"name":"string","age":1234}"#);
    assert_eq!(resources[0].classification, BlockType::Resource);
}

#[test]
fn test_scenario_collection_of_pets() {
    let schemas =
        parse_schemas(&person_with(r#"<Property Name="pets" Type="Collection(Test.Pet)"/>"#)).unwrap();
    let resources = generate_resources(&schemas).unwrap();

    assert_eq!(
        resources[0].example_json,
        r#"{"name":"string","age":1234,"pets":[{"petName":"string"},{"petName":"string"}]}"#
    );
}

#[test]
fn test_scenario_unknown_type() {
    let schemas =
        parse_schemas(&person_with(r#"<Property Name="sponsor" Type="Unknown.Type"/>"#)).unwrap();
    let resources = generate_resources(&schemas).unwrap();

    assert_eq!(
        resources[0].example_json,
        r#"{"name":"string","age":1234,"sponsor":{"datatype":"Unknown.Type"}}"#
    );
    // The failure stays local to the one type
    assert_eq!(resources[1].example_json, r#"{"petName":"string"}"#);
}

#[test]
fn test_malformed_metadata() {
    let result = parse_schemas(r#"<Schema Namespace="Test"><ComplexType Name="Person">"#);
    assert!(matches!(result, Err(Error::Parse(_))));
}

// ============================================================================
// Fixture documents
// ============================================================================

#[test]
fn test_cross_document_resolution() {
    let schemas = load(&["people.xml", "places.xml"]);
    let example: Value = generate("Test.Person", &schemas).into();

    assert_eq!(
        example,
        json!({
            "name": "string",
            "age": 1234,
            "pets": [{"petName": "string"}, {"petName": "string"}],
            "address": {
                "street": "string",
                "verified": false,
                "location": {"latitude": 12.345, "longitude": 12.345}
            }
        })
    );
    // Stream properties never appear
    assert!(example.get("avatar").is_none());
}

#[test]
fn test_missing_document_leaves_fallback() {
    let schemas = load(&["people.xml"]);
    let example: Value = generate("Test.Person", &schemas).into();
    assert_eq!(example["address"], json!({"datatype": "Places.Address"}));
    assert_eq!(example["name"], json!("string"));
}

#[test]
fn test_resource_order_across_documents() {
    let schemas = load(&["people.xml", "places.xml"]);
    let resources = generate_resources(&schemas).unwrap();

    let names: Vec<_> = resources.iter().map(|r| r.type_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Test.Person",
            "Test.Pet",
            "Test.Team",
            "Places.Address",
            "Places.GeoPoint"
        ]
    );
    for resource in &resources {
        assert!(resource.example().is_ok(), "{} is not valid JSON", resource.type_name);
    }
}

#[test]
fn test_entity_type_example() {
    let schemas = load(&["people.xml", "places.xml"]);
    let generated = ExampleGenerator::new(&schemas).generate_traced("Test.Team");
    let example: Value = generated.value.into();

    assert_eq!(example["id"], json!("00000000-0000-0000-0000-000000000000"));
    assert_eq!(example["members"].as_array().unwrap().len(), 2);
    assert_eq!(example["members"][0], example["members"][1]);
    assert_eq!(example["sponsor"], json!({"datatype": "Unknown.Type"}));
    // Navigation properties are not expanded
    assert!(example.get("parent").is_none());

    assert_eq!(
        generated.issues,
        vec![GenerationIssue::Unresolved {
            type_name: "Unknown.Type".to_string()
        }]
    );
}

#[test]
fn test_cyclic_fixture_terminates() {
    let schemas = load(&["cyclic.xml"]);

    let user: Value = generate("Graph.User", &schemas).into();
    assert_eq!(
        user,
        json!({
            "id": "string",
            "manager": {"datatype": "Graph.User"},
            "groups": [
                {"displayName": "string", "owner": {"datatype": "Graph.User"}},
                {"displayName": "string", "owner": {"datatype": "Graph.User"}}
            ]
        })
    );

    let group: Value = generate("Graph.Group", &schemas).into();
    assert_eq!(
        group,
        json!({
            "displayName": "string",
            "owner": {
                "id": "string",
                "manager": {"datatype": "Graph.User"},
                "groups": [{"datatype": "Graph.Group"}, {"datatype": "Graph.Group"}]
            }
        })
    );
}

#[test]
fn test_identical_input_identical_output() {
    let first = generate_resources(&load(&["people.xml", "places.xml"])).unwrap();
    let second = generate_resources(&load(&["people.xml", "places.xml"])).unwrap();
    assert_eq!(first, second);
}

/// `count` entity types that each reference every other one
fn dense_metadata(count: usize) -> String {
    let mut xml = String::from(r#"<Schema Namespace="G">"#);
    for i in 0..count {
        xml.push_str(&format!(r#"<EntityType Name="T{}"><Property Name="id" Type="Edm.Guid"/>"#, i));
        for j in (0..count).filter(|&j| j != i) {
            xml.push_str(&format!(r#"<Property Name="t{}" Type="G.T{}"/>"#, j, j));
        }
        xml.push_str("</EntityType>");
    }
    xml.push_str("</Schema>");
    xml
}

#[test]
fn test_dense_metadata_stays_bounded() {
    let schemas = parse_schemas(&dense_metadata(12)).unwrap();
    let max_size = 64 * 1024;

    let resources = ResourceAssembler::new(&schemas)
        .with_limits(Limits::default().with_max_example_size(max_size))
        .assemble()
        .unwrap();

    assert_eq!(resources.len(), 12);
    for resource in &resources {
        assert!(
            resource.example_json.len() < 2 * max_size,
            "{} grew to {} bytes",
            resource.type_name,
            resource.example_json.len()
        );
        let example: Value = serde_json::from_str(&resource.example_json).unwrap();
        assert!(example["id"].is_string());
    }
}

#[test]
fn test_nested_collection_metadata_terminates() {
    let depth = 50_000;
    let xml = format!(
        r#"<Schema Namespace="N"><ComplexType Name="T"><Property Name="items" Type="{}Edm.String{}"/></ComplexType></Schema>"#,
        "Collection(".repeat(depth),
        ")".repeat(depth)
    );
    let schemas = parse_schemas(&xml).unwrap();

    let generated = ExampleGenerator::new(&schemas).generate_traced("N.T");
    assert!(generated.value.as_object().unwrap().contains_key("items"));
    assert!(generated
        .issues
        .iter()
        .any(|issue| matches!(issue, GenerationIssue::DepthExceeded { .. })));
}
