//! Sort specification for find results.

use std::fmt;

/// Sort direction for one sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Ascending order: `ascend`.
    #[default]
    Ascending,
    /// Descending order: `descend`.
    Descending,
    /// The field's value-list order: `custom`.
    Custom,
}

impl SortOrder {
    /// Returns the protocol token for this order.
    pub fn token(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascend",
            SortOrder::Descending => "descend",
            SortOrder::Custom => "custom",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A field to sort by, with its direction.
///
/// Sort fields apply in the order they are added to the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortField {
    pub name: String,
    pub order: SortOrder,
}

impl SortField {
    /// Creates a sort field with an explicit order.
    pub fn new(name: impl Into<String>, order: SortOrder) -> Self {
        Self {
            name: name.into(),
            order,
        }
    }

    /// Creates an ascending sort on a field.
    pub fn asc(name: impl Into<String>) -> Self {
        Self::new(name, SortOrder::Ascending)
    }

    /// Creates a descending sort on a field.
    pub fn desc(name: impl Into<String>) -> Self {
        Self::new(name, SortOrder::Descending)
    }

    /// Creates a value-list (custom) sort on a field.
    pub fn custom(name: impl Into<String>) -> Self {
        Self::new(name, SortOrder::Custom)
    }
}
