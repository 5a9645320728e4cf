//! Scripts run by the server around a request.

/// Delimiter used to join script parameters unless overridden.
pub const DEFAULT_PARAM_DELIMITER: &str = "|";

/// Scripts to run before sorting, before the find, and after the find, plus
/// the parameter handed to them.
///
/// The server accepts a single parameter string, so all parameters are joined
/// with [`Scripts::delimiter`] before being sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scripts {
    pub pre_sort: Vec<String>,
    pub pre_find: Vec<String>,
    pub post_find: Vec<String>,
    pub params: Vec<String>,
    pub delimiter: String,
}

impl Default for Scripts {
    fn default() -> Self {
        Self {
            pre_sort: Vec::new(),
            pre_find: Vec::new(),
            post_find: Vec::new(),
            params: Vec::new(),
            delimiter: DEFAULT_PARAM_DELIMITER.to_string(),
        }
    }
}

impl Scripts {
    /// Returns the parameters joined with the delimiter, or `None` if there
    /// are no parameters.
    pub fn joined_params(&self) -> Option<String> {
        if self.params.is_empty() {
            None
        } else {
            Some(self.params.join(&self.delimiter))
        }
    }

    /// Returns `true` if no scripts and no parameters are set.
    pub fn is_empty(&self) -> bool {
        self.pre_sort.is_empty()
            && self.pre_find.is_empty()
            && self.post_find.is_empty()
            && self.params.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_params() {
        let mut scripts = Scripts::default();
        assert_eq!(scripts.joined_params(), None);

        scripts.params = vec!["a".to_string(), "b".to_string()];
        assert_eq!(scripts.joined_params().as_deref(), Some("a|b"));

        scripts.delimiter = "\n".to_string();
        assert_eq!(scripts.joined_params().as_deref(), Some("a\nb"));
    }
}
