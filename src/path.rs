use std::fmt;

/// Prefix under which the store exposes its raw internal key tree
pub const RAW_ROOT: &str = "sys/raw";

/// Location in the secret store derived from a request path
///
/// Always starts with [`RAW_ROOT`]. A trailing slash is kept exactly as it
/// arrived because it decides between listing and reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendPath(String);

impl BackendPath {
    /// Map the part of the URL after the mount point to a store path.
    ///
    /// No validation happens here; the store rejects paths it does not like.
    pub fn resolve(endpoint: &str) -> Self {
        if endpoint.is_empty() {
            Self(RAW_ROOT.to_string())
        } else {
            Self(format!("{}/{}", RAW_ROOT, endpoint))
        }
    }

    /// Whether this path names a prefix to list rather than a value to read
    pub fn is_listing(&self) -> bool {
        self.0.ends_with('/') || self.0 == RAW_ROOT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BackendPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
