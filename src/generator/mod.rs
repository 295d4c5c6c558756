//! Example generation
//!
//! Produces one representative JSON value for a type identifier:
//!
//! - primitives map to the fixed literals in [`primitives`];
//! - `Collection(T)` becomes a two-element array holding the example of `T`
//!   twice, which marks the field as repeating while keeping examples small;
//! - complex and entity types become objects with one entry per non-stream
//!   property, resolved across every schema in the set;
//! - anything that cannot be expanded becomes `{"datatype": "<identifier>"}`.
//!
//! Expansion tracks the types currently open on the recursion path. A type
//! that reappears on that path is not expanded again, so reference cycles
//! always terminate. Nesting depth and the size of the produced JSON are
//! bounded by [`Limits`], which keeps wide acyclic graphs in check too.

pub mod primitives;
mod value;

pub use value::{ExampleValue, DATATYPE_KEY};

use indexmap::IndexMap;
use tracing::debug;

use crate::csdl::Schema;
use crate::limits::Limits;
use crate::names;
use crate::registry::{ResolveError, TypeRegistry};

/// Why part of an example was replaced by the `datatype` fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationIssue {
    /// The type is not declared in any schema
    Unresolved {
        /// The unresolved type identifier
        type_name: String,
    },
    /// Several schemas declare the type
    Ambiguous {
        /// The ambiguous type identifier
        type_name: String,
        /// Number of matching declarations
        count: usize,
    },
    /// The type is already being expanded further up the path
    Cycle {
        /// The type identifier that closed the cycle
        type_name: String,
        /// Types open on the path when the cycle was found, outermost first
        path: Vec<String>,
    },
    /// Expansion reached `Limits::max_type_depth`
    DepthExceeded {
        /// The type identifier that was not expanded
        type_name: String,
        /// Depth at which expansion stopped
        depth: usize,
    },
    /// The example reached `Limits::max_example_size`
    BudgetExhausted {
        /// The type identifier that was not expanded
        type_name: String,
        /// Approximate example size in bytes when expansion stopped
        size: usize,
    },
}

impl GenerationIssue {
    /// The type identifier the issue refers to
    pub fn type_name(&self) -> &str {
        match self {
            GenerationIssue::Unresolved { type_name }
            | GenerationIssue::Ambiguous { type_name, .. }
            | GenerationIssue::Cycle { type_name, .. }
            | GenerationIssue::DepthExceeded { type_name, .. }
            | GenerationIssue::BudgetExhausted { type_name, .. } => type_name,
        }
    }
}

impl std::fmt::Display for GenerationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationIssue::Unresolved { type_name } => {
                write!(f, "type '{}' is not declared in any schema", type_name)
            }
            GenerationIssue::Ambiguous { type_name, count } => {
                write!(f, "type '{}' is declared {} times", type_name, count)
            }
            GenerationIssue::Cycle { type_name, path } => write!(
                f,
                "type '{}' references itself through {}",
                type_name,
                path.join(" -> ")
            ),
            GenerationIssue::DepthExceeded { type_name, depth } => write!(
                f,
                "type '{}' not expanded at depth {}",
                type_name, depth
            ),
            GenerationIssue::BudgetExhausted { type_name, size } => write!(
                f,
                "type '{}' not expanded, example already holds {} bytes",
                type_name, size
            ),
        }
    }
}

impl From<ResolveError> for GenerationIssue {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Unresolved(type_name) => GenerationIssue::Unresolved { type_name },
            ResolveError::Ambiguous { name, count } => GenerationIssue::Ambiguous {
                type_name: name,
                count,
            },
        }
    }
}

/// A generated example together with every substitution made while building it
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    /// The example value
    pub value: ExampleValue,
    /// Fallback substitutions, in the order they happened
    pub issues: Vec<GenerationIssue>,
}

/// Generate an example for a type identifier with default limits
pub fn generate(type_name: &str, schemas: &[Schema]) -> ExampleValue {
    ExampleGenerator::new(schemas).generate(type_name)
}

/// Example generator over one schema set
#[derive(Debug, Clone)]
pub struct ExampleGenerator<'a> {
    registry: TypeRegistry<'a>,
    limits: Limits,
}

/// Per-call expansion state
#[derive(Default)]
struct Expansion {
    /// Structured types open on the current path, outermost first
    path: Vec<String>,
    /// Open structured types and collections
    depth: usize,
    /// Approximate JSON bytes produced so far, counting both copies of a
    /// collection item
    size: usize,
    issues: Vec<GenerationIssue>,
}

impl<'a> ExampleGenerator<'a> {
    /// Create a generator over a schema set
    pub fn new(schemas: &'a [Schema]) -> Self {
        Self::from_registry(TypeRegistry::new(schemas))
    }

    /// Create a generator over an existing registry
    pub fn from_registry(registry: TypeRegistry<'a>) -> Self {
        Self {
            registry,
            limits: Limits::default(),
        }
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Generate an example for a type identifier.
    ///
    /// Never fails: unresolvable references become fallback objects.
    pub fn generate(&self, type_name: &str) -> ExampleValue {
        self.generate_traced(type_name).value
    }

    /// Generate an example and report every fallback substitution
    pub fn generate_traced(&self, type_name: &str) -> Generated {
        let mut expansion = Expansion::default();
        let value = self.expand(type_name, &mut expansion);
        Generated {
            value,
            issues: expansion.issues,
        }
    }

    fn expand(&self, type_name: &str, expansion: &mut Expansion) -> ExampleValue {
        if !self.limits.allows_example_size(expansion.size) {
            let issue = GenerationIssue::BudgetExhausted {
                type_name: type_name.to_string(),
                size: expansion.size,
            };
            return self.substitute(issue, expansion);
        }

        if let Some(literal) = primitives::primitive_example(type_name) {
            expansion.size += literal.approximate_size();
            return literal;
        }

        if let Some(element) = names::collection_element(type_name) {
            if !self.limits.allows_type_depth(expansion.depth) {
                let issue = GenerationIssue::DepthExceeded {
                    type_name: type_name.to_string(),
                    depth: expansion.depth,
                };
                return self.substitute(issue, expansion);
            }

            let before = expansion.size;
            expansion.depth += 1;
            let item = self.expand(element, expansion);
            expansion.depth -= 1;

            // The second copy costs as much as the first
            let produced = expansion.size - before;
            if !self.limits.allows_example_size(expansion.size + produced) {
                let issue = GenerationIssue::BudgetExhausted {
                    type_name: type_name.to_string(),
                    size: expansion.size,
                };
                return self.substitute(issue, expansion);
            }
            expansion.size += produced + 3;
            return ExampleValue::Array(vec![item.clone(), item]);
        }

        if expansion.path.iter().any(|open| open == type_name) {
            let issue = GenerationIssue::Cycle {
                type_name: type_name.to_string(),
                path: expansion.path.clone(),
            };
            return self.substitute(issue, expansion);
        }

        if !self.limits.allows_type_depth(expansion.depth) {
            let issue = GenerationIssue::DepthExceeded {
                type_name: type_name.to_string(),
                depth: expansion.depth,
            };
            return self.substitute(issue, expansion);
        }

        let structure = match self.registry.resolve(type_name) {
            Ok(structure) => structure,
            Err(err) => return self.substitute(err.into(), expansion),
        };

        expansion.size += 2;
        expansion.depth += 1;
        expansion.path.push(type_name.to_string());
        let mut object = IndexMap::with_capacity(structure.properties.len());
        for property in structure.properties() {
            if primitives::is_stream(&property.type_name) {
                continue;
            }
            expansion.size += property.name.len() + 4;
            let value = self.expand(&property.type_name, expansion);
            object.insert(property.name.clone(), value);
        }
        expansion.path.pop();
        expansion.depth -= 1;

        ExampleValue::Object(object)
    }

    fn substitute(&self, issue: GenerationIssue, expansion: &mut Expansion) -> ExampleValue {
        debug!(%issue, "substituting datatype fallback");
        let value = ExampleValue::fallback(issue.type_name());
        expansion.size += value.approximate_size();
        expansion.issues.push(issue);
        value
    }
}
