//! CSDL type identifier utilities
//!
//! Type identifiers appear in `Type` attributes in three shapes: primitive
//! names (`Edm.String`), collection wrappers (`Collection(Test.Pet)`) and
//! namespace-qualified structured type references (`Test.Person`).

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix of a collection type identifier
pub const COLLECTION_PREFIX: &str = "Collection(";

/// Suffix of a collection type identifier
pub const COLLECTION_SUFFIX: &str = ")";

// CSDL SimpleIdentifier: a letter or underscore followed by letters, digits or underscores
static SIMPLE_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{Nl}_][\p{L}\p{Nl}\p{Nd}\p{Mn}\p{Mc}\p{Pc}\p{Cf}]{0,127}$").unwrap());

/// Return the element type of a `Collection(...)` identifier.
///
/// Only one level of wrapping is removed; `None` when `type_name` is not a
/// collection.
pub fn collection_element(type_name: &str) -> Option<&str> {
    type_name
        .strip_prefix(COLLECTION_PREFIX)
        .and_then(|rest| rest.strip_suffix(COLLECTION_SUFFIX))
}

/// Strip one `Collection(...)` wrapper if present
pub fn strip_collection(type_name: &str) -> &str {
    collection_element(type_name).unwrap_or(type_name)
}

/// Wrap a type identifier in `Collection(...)`
pub fn collection_of(type_name: &str) -> String {
    format!("{}{}{}", COLLECTION_PREFIX, type_name, COLLECTION_SUFFIX)
}

/// Join a namespace and a simple type name into a fully-qualified name
pub fn qualify(namespace: &str, name: &str) -> String {
    format!("{}.{}", namespace, name)
}

/// Check if a string is a valid CSDL simple identifier
pub fn is_simple_identifier(name: &str) -> bool {
    SIMPLE_IDENTIFIER.is_match(name)
}

/// Check if a string is a valid CSDL namespace (dot-separated simple identifiers)
pub fn is_namespace(namespace: &str) -> bool {
    !namespace.is_empty() && namespace.split('.').all(is_simple_identifier)
}
