//! Metadata location resolution
//!
//! A location names where CSDL metadata text comes from: a file, a URL or
//! text already held in memory.

use std::path::PathBuf;
use url::Url;

/// Metadata location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// File system path
    Path(PathBuf),
    /// URL (http, https, ...)
    Url(Url),
    /// Inline metadata text
    String(String),
}

impl Location {
    /// Create a location from a command-line style argument.
    ///
    /// Anything that parses as a non-`file` URL is a URL, `file://` URLs
    /// become paths, text starting with `<` is inline metadata, and
    /// everything else is a path.
    pub fn from_arg(s: &str) -> Self {
        if let Ok(url) = Url::parse(s) {
            if url.scheme() == "file" {
                if let Ok(path) = url.to_file_path() {
                    return Location::Path(path);
                }
            } else if url.has_host() {
                return Location::Url(url);
            }
        }

        if s.trim_start().starts_with('<') {
            return Location::String(s.to_string());
        }

        Location::Path(PathBuf::from(s))
    }

    /// Get the location as a string
    pub fn as_str(&self) -> String {
        match self {
            Location::Path(p) => p.to_string_lossy().to_string(),
            Location::Url(u) => u.to_string(),
            Location::String(_) => "<inline metadata>".to_string(),
        }
    }

    /// Check if this is a remote location (URL)
    pub fn is_remote(&self) -> bool {
        matches!(self, Location::Url(_))
    }

    /// Check if this is a local file
    pub fn is_file(&self) -> bool {
        matches!(self, Location::Path(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_url() {
        let loc = Location::from_arg("https://graph.microsoft.com/v1.0/$metadata");
        assert!(matches!(loc, Location::Url(_)));
        assert!(loc.is_remote());
    }

    #[test]
    fn test_location_from_path() {
        let loc = Location::from_arg("/tmp/metadata.xml");
        assert!(loc.is_file());
        assert_eq!(loc.as_str(), "/tmp/metadata.xml");

        let loc = Location::from_arg("metadata/v1.xml");
        assert_eq!(loc, Location::Path(PathBuf::from("metadata/v1.xml")));
    }

    #[test]
    fn test_location_from_file_url() {
        let loc = Location::from_arg("file:///tmp/metadata.xml");
        assert_eq!(loc, Location::Path(PathBuf::from("/tmp/metadata.xml")));
    }

    #[test]
    fn test_location_inline() {
        let loc = Location::from_arg(r#"<Schema Namespace="Test"/>"#);
        assert!(matches!(loc, Location::String(_)));
        assert_eq!(loc.as_str(), "<inline metadata>");
    }
}
