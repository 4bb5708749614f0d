//! Version parsing for the `Version` template variable

use anyhow::Result;
use semver::Version;

/// Version written into new projects unless one is given
pub const DEFAULT_PROJECT_VERSION: &str = "1.0.0";

/// Parse version string, handling various formats
pub fn parse_version(version_str: &str) -> Result<Version> {
    // Remove leading 'v' if present
    let cleaned = version_str.trim().strip_prefix('v').unwrap_or(version_str.trim());
    Version::parse(cleaned).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}
