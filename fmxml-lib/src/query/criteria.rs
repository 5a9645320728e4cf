//! Field criteria and the groups that combine them.

/// Comparison operator applied to a field criterion in a compound find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldOp {
    /// Exact match: `==value`
    #[default]
    Equal,
    /// Substring match: `==*value*`
    Contains,
    /// Prefix match: `==value*`
    BeginsWith,
    /// Suffix match: `==*value`
    EndsWith,
    /// `>value`
    GreaterThan,
    /// `>=value`
    GreaterThanEqual,
    /// `<value`
    LessThan,
    /// `<=value`
    LessThanEqual,
    /// No operator: the value is sent exactly as given.
    Raw,
}

impl FieldOp {
    /// Parses the short operator names used on the wire by older clients
    /// (`eq`, `cn`, `bw`, `ew`, `gt`, `gte`, `lt`, `lte`).
    ///
    /// Anything else is [`FieldOp::Raw`].
    pub fn parse(s: &str) -> FieldOp {
        match s.trim().to_ascii_lowercase().as_str() {
            "eq" => FieldOp::Equal,
            "cn" | "contains" => FieldOp::Contains,
            "bw" | "begins-with" | "begins_with" => FieldOp::BeginsWith,
            "ew" | "ends-with" | "ends_with" => FieldOp::EndsWith,
            "gt" => FieldOp::GreaterThan,
            "gte" => FieldOp::GreaterThanEqual,
            "lt" => FieldOp::LessThan,
            "lte" => FieldOp::LessThanEqual,
            _ => FieldOp::Raw,
        }
    }

    /// Encodes `value` with this operator's find syntax.
    pub fn apply(self, value: &str) -> String {
        match self {
            FieldOp::Equal => format!("=={}", value),
            FieldOp::Contains => format!("==*{}*", value),
            FieldOp::BeginsWith => format!("=={}*", value),
            FieldOp::EndsWith => format!("==*{}", value),
            FieldOp::GreaterThan => format!(">{}", value),
            FieldOp::GreaterThanEqual => format!(">={}", value),
            FieldOp::LessThan => format!("<{}", value),
            FieldOp::LessThanEqual => format!("<={}", value),
            FieldOp::Raw => value.to_string(),
        }
    }
}

/// One comparison (field name, operator, value) used to filter records.
///
/// For `New` and `Edit` actions the operator is ignored and the criterion is
/// sent as a plain `name=value` assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCriterion {
    pub name: String,
    pub value: String,
    pub op: FieldOp,
}

impl FieldCriterion {
    /// Creates a criterion with an explicit operator.
    pub fn new(name: impl Into<String>, value: impl Into<String>, op: FieldOp) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            op,
        }
    }

    /// Creates an exact-match criterion. Also the natural choice for field
    /// assignments in `New`/`Edit` queries.
    pub fn eq(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, FieldOp::Equal)
    }

    /// Creates a contains criterion.
    pub fn contains(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, FieldOp::Contains)
    }

    /// Creates a begins-with criterion.
    pub fn begins_with(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, FieldOp::BeginsWith)
    }

    /// Creates an ends-with criterion.
    pub fn ends_with(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, FieldOp::EndsWith)
    }

    /// Creates a greater-than criterion.
    pub fn gt(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, FieldOp::GreaterThan)
    }

    /// Creates a greater-than-or-equal criterion.
    pub fn gte(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, FieldOp::GreaterThanEqual)
    }

    /// Creates a less-than criterion.
    pub fn lt(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, FieldOp::LessThan)
    }

    /// Creates a less-than-or-equal criterion.
    pub fn lte(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, FieldOp::LessThanEqual)
    }

    /// Returns the value encoded with the criterion's operator.
    pub fn value_with_op(&self) -> String {
        self.op.apply(&self.value)
    }
}

/// Logical operator combining the criteria of one [`FieldGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogicalOp {
    /// All criteria must match: `(q1,q2)`.
    #[default]
    And,
    /// Any criterion may match: `(q1);(q2)`.
    Or,
    /// Omit records matching all criteria: `!(q1,q2)`.
    Not,
}

/// A set of criteria combined with one logical operator.
///
/// # Example
///
/// ```
/// use fmxml_lib::query::{FieldCriterion, FieldGroup};
///
/// let group = FieldGroup::or([
///     FieldCriterion::eq("city", "Oslo"),
///     FieldCriterion::eq("city", "Bergen"),
/// ]);
/// assert_eq!(group.fields.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldGroup {
    pub op: LogicalOp,
    pub fields: Vec<FieldCriterion>,
}

impl FieldGroup {
    /// Creates a group with an explicit operator.
    pub fn new(op: LogicalOp, fields: impl IntoIterator<Item = FieldCriterion>) -> Self {
        Self {
            op,
            fields: fields.into_iter().collect(),
        }
    }

    /// Creates an AND group.
    pub fn and(fields: impl IntoIterator<Item = FieldCriterion>) -> Self {
        Self::new(LogicalOp::And, fields)
    }

    /// Creates an OR group.
    pub fn or(fields: impl IntoIterator<Item = FieldCriterion>) -> Self {
        Self::new(LogicalOp::Or, fields)
    }

    /// Creates a NOT (omit) group.
    pub fn not(fields: impl IntoIterator<Item = FieldCriterion>) -> Self {
        Self::new(LogicalOp::Not, fields)
    }

    /// Returns `true` if the group has no criteria.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_with_op() {
        let cases = [
            (FieldOp::Equal, "==v"),
            (FieldOp::Contains, "==*v*"),
            (FieldOp::BeginsWith, "==v*"),
            (FieldOp::EndsWith, "==*v"),
            (FieldOp::GreaterThan, ">v"),
            (FieldOp::GreaterThanEqual, ">=v"),
            (FieldOp::LessThan, "<v"),
            (FieldOp::LessThanEqual, "<=v"),
            (FieldOp::Raw, "v"),
        ];
        for (op, expected) in cases {
            assert_eq!(FieldCriterion::new("f", "v", op).value_with_op(), expected);
        }
    }

    #[test]
    fn test_parse_op() {
        assert_eq!(FieldOp::parse("cn"), FieldOp::Contains);
        assert_eq!(FieldOp::parse("GTE"), FieldOp::GreaterThanEqual);
        assert_eq!(FieldOp::parse("neq"), FieldOp::Raw);
    }
}
