//! Metadata loading
//!
//! Supplies complete CSDL text to the parser. Only local files and inline
//! text are read; fetching metadata over the network is left to the caller.

use crate::csdl::{CsdlParser, Schema};
use crate::error::{Error, Result};
use crate::limits::Limits;
use crate::locations::Location;
use std::fs;
use tracing::debug;

/// Metadata loader
#[derive(Debug, Clone, Default)]
pub struct Loader {
    /// Resource limits
    limits: Limits,
}

impl Loader {
    /// Create a new loader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Load metadata text from a location
    pub fn load(&self, location: &Location) -> Result<String> {
        match location {
            Location::Path(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    Error::Resource(format!("Failed to read file '{}': {}", path.display(), e))
                })?;
                self.limits.check_xml_size(content.len())?;
                debug!(path = %path.display(), bytes = content.len(), "loaded metadata");
                Ok(content)
            }
            Location::Url(url) => Err(Error::Resource(format!(
                "remote metadata is not fetched; download '{}' and pass the file instead",
                url
            ))),
            Location::String(s) => {
                self.limits.check_xml_size(s.len())?;
                Ok(s.clone())
            }
        }
    }

    /// Load and parse every location, concatenating the schemas in order
    pub fn load_schemas(&self, locations: &[Location]) -> Result<Vec<Schema>> {
        let parser = CsdlParser::new().with_limits(self.limits.clone());
        let mut schemas = Vec::new();
        for location in locations {
            let text = self.load(location)?;
            schemas.extend(parser.parse(&text)?);
        }
        Ok(schemas)
    }
}
