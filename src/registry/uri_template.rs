//! Single-placeholder URI templates for keyed resources.
//!
//! A template such as `user://{user_id}/info` splits into a literal prefix,
//! one variable name and a literal suffix. Binding a concrete URI strips the
//! prefix and suffix and hands back the key in between.

use std::fmt;

use super::error::RegistryError;

/// A URI template with exactly one `{variable}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    raw: String,
    prefix: String,
    variable: String,
    suffix: String,
}

impl UriTemplate {
    /// Parse a template, rejecting anything other than one placeholder.
    pub fn parse(raw: &str) -> Result<Self, RegistryError> {
        let open = raw
            .find('{')
            .ok_or_else(|| RegistryError::invalid_template(raw, "no placeholder"))?;
        let close = raw[open..]
            .find('}')
            .map(|offset| open + offset)
            .ok_or_else(|| RegistryError::invalid_template(raw, "unclosed placeholder"))?;

        let variable = raw[open + 1..close].trim();
        if variable.is_empty() {
            return Err(RegistryError::invalid_template(raw, "empty placeholder"));
        }

        let suffix = &raw[close + 1..];
        if suffix.contains('{') || suffix.contains('}') || raw[..open].contains('}') {
            return Err(RegistryError::invalid_template(
                raw,
                "exactly one placeholder is supported",
            ));
        }

        Ok(Self {
            raw: raw.to_string(),
            prefix: raw[..open].to_string(),
            variable: variable.to_string(),
            suffix: suffix.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Name of the placeholder.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Extract the key from a concrete URI, if it matches.
    ///
    /// The key must be non-empty and a single path segment.
    pub fn bind<'a>(&self, uri: &'a str) -> Option<&'a str> {
        let key = uri
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())?;

        if key.is_empty() || key.contains('/') {
            None
        } else {
            Some(key)
        }
    }

    /// Substitute a key into the template.
    pub fn expand(&self, key: &str) -> String {
        format!("{}{}{}", self.prefix, key, self.suffix)
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_template() {
        let template = UriTemplate::parse("user://{user_id}/info").unwrap();
        assert_eq!(template.prefix(), "user://");
        assert_eq!(template.variable(), "user_id");
        assert_eq!(template.suffix(), "/info");
        assert_eq!(template.to_string(), "user://{user_id}/info");
    }

    #[test]
    fn test_bind_and_expand() {
        let template = UriTemplate::parse("user://{user_id}/info").unwrap();
        assert_eq!(template.bind("user://42/info"), Some("42"));
        assert_eq!(template.expand("42"), "user://42/info");

        assert_eq!(template.bind("user:///info"), None);
        assert_eq!(template.bind("user://a/b/info"), None);
        assert_eq!(template.bind("info://server"), None);
    }

    #[test]
    fn test_rejects_bad_templates() {
        assert!(UriTemplate::parse("info://server").is_err());
        assert!(UriTemplate::parse("user://{}/info").is_err());
        assert!(UriTemplate::parse("user://{id/info").is_err());
        assert!(UriTemplate::parse("config://{section}/{key}").is_err());
    }
}
