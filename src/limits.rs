//! Limits and constraints for CSDL processing
//!
//! This module defines limits that bound parsing and example generation,
//! protecting against oversized documents and runaway type expansion.

use crate::error::{Error, Result};

/// Global limits configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum element nesting depth of a metadata document
    pub max_xml_depth: usize,

    /// Maximum metadata document size in bytes
    pub max_xml_size: usize,

    /// Maximum number of complex and entity types in one document
    pub max_schema_components: usize,

    /// Maximum nesting of structured types and collections in one example
    pub max_type_depth: usize,

    /// Maximum approximate size in bytes of one example's JSON text
    pub max_example_size: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_xml_depth: 256,
            max_xml_size: 100 * 1024 * 1024, // 100 MB
            max_schema_components: 100_000,
            max_type_depth: 32,
            max_example_size: 8 * 1024 * 1024, // 8 MB
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_xml_depth: 64,
            max_xml_size: 10 * 1024 * 1024, // 10 MB
            max_schema_components: 10_000,
            max_type_depth: 8,
            max_example_size: 1024 * 1024, // 1 MB
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_xml_depth: 4096,
            max_xml_size: 1024 * 1024 * 1024, // 1 GB
            max_schema_components: 1_000_000,
            max_type_depth: 256,
            max_example_size: 256 * 1024 * 1024, // 256 MB
        }
    }

    /// Set the maximum XML nesting depth
    pub fn with_max_xml_depth(mut self, depth: usize) -> Self {
        self.max_xml_depth = depth;
        self
    }

    /// Set the maximum XML size in bytes
    pub fn with_max_xml_size(mut self, size: usize) -> Self {
        self.max_xml_size = size;
        self
    }

    /// Set the maximum number of declared types
    pub fn with_max_schema_components(mut self, count: usize) -> Self {
        self.max_schema_components = count;
        self
    }

    /// Set the maximum type expansion depth
    pub fn with_max_type_depth(mut self, depth: usize) -> Self {
        self.max_type_depth = depth;
        self
    }

    /// Set the maximum example size in bytes
    pub fn with_max_example_size(mut self, size: usize) -> Self {
        self.max_example_size = size;
        self
    }

    /// Check if XML depth is within limits
    pub fn check_xml_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_xml_depth {
            Err(Error::LimitExceeded(format!(
                "XML depth {} exceeds maximum {}",
                depth, self.max_xml_depth
            )))
        } else {
            Ok(())
        }
    }

    /// Check if XML size is within limits
    pub fn check_xml_size(&self, size: usize) -> Result<()> {
        if size > self.max_xml_size {
            Err(Error::LimitExceeded(format!(
                "XML size {} bytes exceeds maximum {} bytes",
                size, self.max_xml_size
            )))
        } else {
            Ok(())
        }
    }

    /// Check if number of schema components is within limits
    pub fn check_schema_components(&self, count: usize) -> Result<()> {
        if count > self.max_schema_components {
            Err(Error::LimitExceeded(format!(
                "Schema component count {} exceeds maximum {}",
                count, self.max_schema_components
            )))
        } else {
            Ok(())
        }
    }

    /// Whether a type expansion at `depth` may still descend
    pub fn allows_type_depth(&self, depth: usize) -> bool {
        depth < self.max_type_depth
    }

    /// Whether an example of `size` bytes may still grow
    pub fn allows_example_size(&self, size: usize) -> bool {
        size < self.max_example_size
    }
}
