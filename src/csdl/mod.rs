//! OData CSDL schema model and parser

mod model;
mod parser;

pub use model::{ComplexType, EntityType, NavigationProperty, Property, Schema};
pub use parser::{parse_schemas, CsdlParser};
