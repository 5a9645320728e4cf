//! Actions understood by the server.

use std::fmt;

/// The operation requested of the server.
///
/// Each action renders as a single protocol token, placed last in the
/// compiled query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Compound find: `-findquery`.
    Find,
    /// Return every record of the layout: `-findall`.
    FindAll,
    /// Return one random record: `-findany`.
    FindAny,
    /// Create a record: `-new`.
    New,
    /// Edit the record given by record ID: `-edit`.
    Edit,
    /// Delete the record given by record ID: `-delete`.
    Delete,
    /// Duplicate the record given by record ID: `-dup`.
    Duplicate,
    /// An action the compiler does not know how to render.
    ///
    /// Produced by [`Action::parse`] for unrecognised input.
    Unsupported(String),
}

impl Action {
    /// Returns the protocol token for this action.
    ///
    /// Unsupported actions return their raw text.
    pub fn token(&self) -> &str {
        match self {
            Action::Find => "-findquery",
            Action::FindAll => "-findall",
            Action::FindAny => "-findany",
            Action::New => "-new",
            Action::Edit => "-edit",
            Action::Delete => "-delete",
            Action::Duplicate => "-dup",
            Action::Unsupported(raw) => raw,
        }
    }

    /// Parses an action from its name (`find`, `find-all`, `dup`, ...) or its
    /// protocol token (`-findquery`, `-findall`, ...).
    ///
    /// Matching is case-insensitive. Anything else yields
    /// [`Action::Unsupported`] carrying the input.
    ///
    /// # Example
    ///
    /// ```
    /// use fmxml_lib::query::Action;
    ///
    /// assert_eq!(Action::parse("findall"), Action::FindAll);
    /// assert_eq!(Action::parse("-dup"), Action::Duplicate);
    /// assert_eq!(Action::parse("-view"), Action::Unsupported("-view".to_string()));
    /// ```
    pub fn parse(s: &str) -> Action {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.trim_start_matches('-') {
            "find" | "findquery" => Action::Find,
            "findall" | "find-all" | "find_all" => Action::FindAll,
            "findany" | "find-any" | "find_any" => Action::FindAny,
            "new" => Action::New,
            "edit" => Action::Edit,
            "delete" => Action::Delete,
            "dup" | "duplicate" => Action::Duplicate,
            _ => Action::Unsupported(s.to_string()),
        }
    }

    /// Returns `true` if the compiler can render this action.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Action::Unsupported(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
