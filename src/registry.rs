//! Type registry
//!
//! Maps fully-qualified type names to their declarations across every schema
//! in a set, so references into other schemas resolve the same way as local
//! ones. The map is built once; lookups never rescan the schemas.

use std::collections::HashMap;

use thiserror::Error;

use crate::csdl::{ComplexType, Schema};
use crate::names;

/// Why a type identifier could not be resolved.
///
/// Resolution failures are never fatal: the example generator substitutes a
/// diagnostic value and carries on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No schema declares the type
    #[error("type '{0}' is not declared in any schema")]
    Unresolved(String),

    /// Several declarations share the fully-qualified name
    #[error("type '{name}' is declared {count} times")]
    Ambiguous {
        /// Fully-qualified type name
        name: String,
        /// Number of matching declarations
        count: usize,
    },
}

/// Lookup table from fully-qualified name to complex and entity types
#[derive(Debug, Clone)]
pub struct TypeRegistry<'a> {
    types: HashMap<String, Vec<&'a ComplexType>>,
}

impl<'a> TypeRegistry<'a> {
    /// Build the registry over a schema set
    pub fn new(schemas: &'a [Schema]) -> Self {
        let mut types: HashMap<String, Vec<&'a ComplexType>> = HashMap::new();
        for schema in schemas {
            for ty in schema.structured_types() {
                types
                    .entry(schema.qualified_name(&ty.name))
                    .or_default()
                    .push(ty);
            }
        }
        Self { types }
    }

    /// Resolve a type identifier.
    ///
    /// One `Collection(...)` wrapper is stripped before matching; the match
    /// itself is exact on the fully-qualified name.
    pub fn resolve(&self, type_name: &str) -> Result<&'a ComplexType, ResolveError> {
        let bare = names::strip_collection(type_name);
        match self.types.get(bare).map(Vec::as_slice) {
            Some([ty]) => Ok(*ty),
            Some(found) if !found.is_empty() => Err(ResolveError::Ambiguous {
                name: bare.to_string(),
                count: found.len(),
            }),
            _ => Err(ResolveError::Unresolved(bare.to_string())),
        }
    }
}
