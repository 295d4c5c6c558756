//! EDM primitive example literals
//!
//! This table is the single source of truth for what a scalar example looks
//! like. Changing a literal changes every generated example that uses it.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use super::value::ExampleValue;
use crate::names;

// =============================================================================
// EDM Primitive Type Names
// =============================================================================

/// Edm.String type name
pub const EDM_STRING: &str = "Edm.String";
/// Edm.Boolean type name
pub const EDM_BOOLEAN: &str = "Edm.Boolean";
/// Edm.Byte type name
pub const EDM_BYTE: &str = "Edm.Byte";
/// Edm.SByte type name
pub const EDM_SBYTE: &str = "Edm.SByte";
/// Edm.Int16 type name
pub const EDM_INT16: &str = "Edm.Int16";
/// Edm.Int32 type name
pub const EDM_INT32: &str = "Edm.Int32";
/// Edm.Int64 type name
pub const EDM_INT64: &str = "Edm.Int64";
/// Edm.Single type name
pub const EDM_SINGLE: &str = "Edm.Single";
/// Edm.Double type name
pub const EDM_DOUBLE: &str = "Edm.Double";
/// Edm.Decimal type name
pub const EDM_DECIMAL: &str = "Edm.Decimal";
/// Edm.DateTimeOffset type name
pub const EDM_DATE_TIME_OFFSET: &str = "Edm.DateTimeOffset";
/// Edm.DateTime type name (OData v3)
pub const EDM_DATE_TIME: &str = "Edm.DateTime";
/// Edm.Date type name
pub const EDM_DATE: &str = "Edm.Date";
/// Edm.TimeOfDay type name
pub const EDM_TIME_OF_DAY: &str = "Edm.TimeOfDay";
/// Edm.Duration type name
pub const EDM_DURATION: &str = "Edm.Duration";
/// Edm.Guid type name
pub const EDM_GUID: &str = "Edm.Guid";
/// Edm.Stream type name
pub const EDM_STREAM: &str = "Edm.Stream";
/// Edm.Binary type name
pub const EDM_BINARY: &str = "Edm.Binary";

static PRIMITIVE_EXAMPLES: Lazy<HashMap<&'static str, ExampleValue>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(EDM_STRING, ExampleValue::from("string"));
    m.insert(EDM_BOOLEAN, ExampleValue::from(false));
    m.insert(EDM_BYTE, ExampleValue::from(12_i64));
    m.insert(EDM_SBYTE, ExampleValue::from(12_i64));
    m.insert(EDM_INT16, ExampleValue::from(1234_i64));
    m.insert(EDM_INT32, ExampleValue::from(1234_i64));
    m.insert(EDM_INT64, ExampleValue::from(1234_i64));
    m.insert(EDM_SINGLE, ExampleValue::from(12.345));
    m.insert(EDM_DOUBLE, ExampleValue::from(12.345));
    m.insert(EDM_DECIMAL, ExampleValue::from(12.345));
    m.insert(EDM_DATE_TIME_OFFSET, ExampleValue::from("2014-01-01T00:00:00Z"));
    m.insert(EDM_DATE_TIME, ExampleValue::from("2014-01-01T00:00:00"));
    m.insert(EDM_DATE, ExampleValue::from("2014-01-01"));
    m.insert(EDM_TIME_OF_DAY, ExampleValue::from("00:00:00"));
    m.insert(EDM_DURATION, ExampleValue::from("PT0S"));
    m.insert(EDM_GUID, ExampleValue::from("00000000-0000-0000-0000-000000000000"));
    m
});

// Types with no meaningful literal; properties of these types are left out
static STREAM_TYPES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| [EDM_STREAM, EDM_BINARY].into_iter().collect());

/// The example literal for a primitive type, if the type is in the table
pub fn primitive_example(type_name: &str) -> Option<ExampleValue> {
    PRIMITIVE_EXAMPLES.get(type_name).cloned()
}

/// Whether the identifier names a primitive in the table
pub fn is_primitive(type_name: &str) -> bool {
    PRIMITIVE_EXAMPLES.contains_key(type_name)
}

/// Whether a property of this type is omitted from examples.
///
/// Collections of streams are omitted as well.
pub fn is_stream(type_name: &str) -> bool {
    STREAM_TYPES.contains(names::strip_collection(type_name))
}

/// All primitive type names in the table, sorted
pub fn primitive_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = PRIMITIVE_EXAMPLES.keys().copied().collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_literals() {
        assert_eq!(primitive_example(EDM_STRING), Some(ExampleValue::from("string")));
        assert_eq!(primitive_example(EDM_BOOLEAN), Some(ExampleValue::from(false)));
        assert_eq!(primitive_example(EDM_INT32), Some(ExampleValue::from(1234_i64)));
        assert_eq!(primitive_example(EDM_INT64), Some(ExampleValue::from(1234_i64)));
        assert_eq!(primitive_example(EDM_DOUBLE), Some(ExampleValue::from(12.345)));
        assert_eq!(
            primitive_example(EDM_DATE_TIME_OFFSET),
            Some(ExampleValue::from("2014-01-01T00:00:00Z"))
        );
    }

    #[test]
    fn test_unknown_and_stream_types() {
        assert!(primitive_example("Edm.Geography").is_none());
        assert!(primitive_example(EDM_STREAM).is_none());
        assert!(!is_primitive("Test.Person"));
        assert!(is_primitive(EDM_GUID));
    }

    #[test]
    fn test_is_stream() {
        assert!(is_stream(EDM_STREAM));
        assert!(is_stream(EDM_BINARY));
        assert!(is_stream("Collection(Edm.Stream)"));
        assert!(!is_stream(EDM_STRING));
        assert!(!is_stream("Test.Stream"));
    }

    #[test]
    fn test_primitive_names() {
        let names = primitive_names();
        assert_eq!(names.len(), 16);
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }
}
