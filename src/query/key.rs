use std::fmt;

/// Identity of one async fetch: an operation name plus its parameters.
///
/// Parameters are stored as their `Display` text, so keys compare by that
/// text: `ResourceKey::new("user").param(1)` equals
/// `ResourceKey::new("user").param("1")`. Callers that need typed
/// parameters kept apart should fold the type into the operation name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey {
    operation: String,
    params: Vec<String>,
}

impl ResourceKey {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            params: Vec::new(),
        }
    }

    /// Append one parameter to the key, keeping only its `Display` text.
    pub fn param(mut self, value: impl fmt::Display) -> Self {
        self.params.push(value.to_string());
        self
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operation)?;
        for param in &self.params {
            write!(f, "/{}", param)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_with_different_parts_differ() {
        assert_ne!(ResourceKey::new("user").param(1), ResourceKey::new("user").param(2));
        assert_ne!(ResourceKey::new("user"), ResourceKey::new("post"));
    }

    #[test]
    fn params_compare_by_display_text() {
        let numeric = ResourceKey::new("user").param(1);
        let text = ResourceKey::new("user").param("1");
        assert_eq!(numeric, text);

        let mut seen = std::collections::HashSet::new();
        seen.insert(numeric);
        assert!(!seen.insert(text));

        assert_ne!(
            ResourceKey::new("user").param(1).param(2),
            ResourceKey::new("user").param(2).param(1)
        );
    }

    #[test]
    fn display_joins_parts() {
        let key = ResourceKey::new("user").param(1).param("profile");
        assert_eq!(key.to_string(), "user/1/profile");
        assert_eq!(key.params(), ["1".to_string(), "profile".to_string()]);
    }
}
