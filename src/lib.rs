//! # csdl-examples
//!
//! Parse OData CSDL metadata and generate a representative JSON example for
//! every declared complex and entity type.
//!
//! The examples feed documentation validation: each one is wrapped in a
//! [`ResourceDefinition`] that pairs the fully-qualified type name with the
//! example JSON text.
//!
//! ## Example
//!
//! ```rust
//! use csdl_examples::{generate_resources, parse_schemas};
//!
//! let xml = r#"<Schema Namespace="Test">
//!   <ComplexType Name="Person">
//!     <Property Name="name" Type="Edm.String"/>
//!     <Property Name="age" Type="Edm.Int32"/>
//!   </ComplexType>
//! </Schema>"#;
//!
//! let schemas = parse_schemas(xml)?;
//! let resources = generate_resources(&schemas)?;
//! assert_eq!(resources[0].type_name, "Test.Person");
//! assert_eq!(resources[0].example_json, r#"{"name":"string","age":1234}"#);
//! # Ok::<(), csdl_examples::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;
pub mod names;

// Metadata input
pub mod documents;
pub mod locations;
pub mod loaders;

// Schema model and parsing
pub mod csdl;

// Resolution and generation
pub mod registry;
pub mod generator;
pub mod resources;

// Re-exports for convenience
pub use csdl::{parse_schemas, ComplexType, CsdlParser, EntityType, Property, Schema};
pub use error::{Error, ParseError, Result};
pub use generator::{generate, ExampleGenerator, ExampleValue, GenerationIssue, Generated};
pub use limits::Limits;
pub use loaders::Loader;
pub use locations::Location;
pub use registry::{ResolveError, TypeRegistry};
pub use resources::{generate_resources, BlockType, ResourceAssembler, ResourceDefinition};

/// Version of the csdl-examples library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
