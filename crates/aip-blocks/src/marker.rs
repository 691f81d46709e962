//! Sentinel lines delimiting a marker block.

/// Marker token used when none is configured.
pub const DEFAULT_MARKER: &str = "AIPHELPER_MARKER";

/// A marker token and the two sentinel lines derived from it.
///
/// `Marker::new("FOO")` recognizes the lines `### FOO_START ###` and
/// `### FOO_END ###`. Lines must match exactly, surrounding whitespace
/// included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Marker {
    token: String,
    start: String,
    end: String,
}

impl Marker {
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        let start = format!("### {}_START ###", token);
        let end = format!("### {}_END ###", token);
        Self { token, start, end }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// The line opening a block.
    pub fn start_line(&self) -> &str {
        &self.start
    }

    /// The line closing a block.
    pub fn end_line(&self) -> &str {
        &self.end
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_marker_lines() {
        let marker = Marker::default();
        assert_eq!(marker.start_line(), "### AIPHELPER_MARKER_START ###");
        assert_eq!(marker.end_line(), "### AIPHELPER_MARKER_END ###");
    }

    #[test]
    fn test_custom_token() {
        let marker = Marker::new("AWSSSOHELPER");
        assert_eq!(marker.token(), "AWSSSOHELPER");
        assert_eq!(marker.start_line(), "### AWSSSOHELPER_START ###");
        assert_eq!(marker.end_line(), "### AWSSSOHELPER_END ###");
    }
}
