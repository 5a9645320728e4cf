//! Immutable query description and its builder.

use super::Action;
use super::FieldCriterion;
use super::FieldGroup;
use super::Scripts;
use super::SortField;
use super::compile::compile;

/// An immutable description of one request against a database layout.
///
/// Use [`Query::builder`] to construct one. Record ID and max records are
/// optional: `None` means "no record" and "all records" respectively.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub(crate) database: String,
    pub(crate) layout: String,
    pub(crate) action: Action,
    pub(crate) record_id: Option<u64>,
    pub(crate) field_groups: Vec<FieldGroup>,
    pub(crate) sort_fields: Vec<SortField>,
    pub(crate) scripts: Scripts,
    pub(crate) response_layout: Option<String>,
    pub(crate) response_fields: Vec<String>,
    pub(crate) max_records: Option<u32>,
    pub(crate) skip_records: u32,
}

impl Query {
    /// Starts building a query for `action` on `layout` in `database`.
    pub fn builder(
        database: impl Into<String>,
        layout: impl Into<String>,
        action: Action,
    ) -> QueryBuilder {
        QueryBuilder::new(database, layout, action)
    }

    /// Returns the database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Returns the layout name.
    pub fn layout(&self) -> &str {
        &self.layout
    }

    /// Returns the action.
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Returns the record ID, if set.
    pub fn record_id(&self) -> Option<u64> {
        self.record_id
    }

    /// Returns the field groups in insertion order.
    pub fn field_groups(&self) -> &[FieldGroup] {
        &self.field_groups
    }

    /// Returns the total number of criteria across all groups.
    pub fn fields_count(&self) -> usize {
        self.field_groups.iter().map(|g| g.fields.len()).sum()
    }

    /// Returns the sort fields in priority order.
    pub fn sort_fields(&self) -> &[SortField] {
        &self.sort_fields
    }

    /// Returns the scripts configuration.
    pub fn scripts(&self) -> &Scripts {
        &self.scripts
    }

    /// Returns the response layout override, if set.
    pub fn response_layout(&self) -> Option<&str> {
        self.response_layout.as_deref()
    }

    /// Returns the requested response fields.
    ///
    /// These are carried for callers that post-filter results; they are not
    /// part of the compiled query string.
    pub fn response_fields(&self) -> &[String] {
        &self.response_fields
    }

    /// Returns the maximum number of records, or `None` for all records.
    pub fn max_records(&self) -> Option<u32> {
        self.max_records
    }

    /// Returns the number of records to skip.
    pub fn skip_records(&self) -> u32 {
        self.skip_records
    }

    /// Compiles this query into the server's query-string grammar.
    ///
    /// Returns an empty string for unsupported actions; see
    /// [`try_compile`](super::try_compile) for the checked variant.
    pub fn query_string(&self) -> String {
        compile(self)
    }
}

/// Builder for constructing a [`Query`].
///
/// # Example
///
/// ```
/// use fmxml_lib::query::{Action, FieldCriterion, FieldGroup, Query, SortField};
///
/// let query = Query::builder("shop", "orders", Action::Find)
///     .field_group(FieldGroup::and([
///         FieldCriterion::eq("status", "open"),
///         FieldCriterion::gt("total", "100"),
///     ]))
///     .field_group(FieldGroup::not([FieldCriterion::eq("region", "EU")]))
///     .sort(SortField::desc("created"))
///     .skip(20)
///     .max(10)
///     .build();
///
/// assert_eq!(query.fields_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// Creates a new builder with no criteria, all records, and no skip.
    pub fn new(database: impl Into<String>, layout: impl Into<String>, action: Action) -> Self {
        Self {
            query: Query {
                database: database.into(),
                layout: layout.into(),
                action,
                record_id: None,
                field_groups: Vec::new(),
                sort_fields: Vec::new(),
                scripts: Scripts::default(),
                response_layout: None,
                response_fields: Vec::new(),
                max_records: None,
                skip_records: 0,
            },
        }
    }

    /// Sets the record ID. Required for edit, delete and duplicate.
    pub fn record_id(mut self, id: u64) -> Self {
        self.query.record_id = Some(id);
        self
    }

    /// Appends one field group.
    pub fn field_group(mut self, group: FieldGroup) -> Self {
        self.query.field_groups.push(group);
        self
    }

    /// Appends several field groups.
    pub fn field_groups(mut self, groups: impl IntoIterator<Item = FieldGroup>) -> Self {
        self.query.field_groups.extend(groups);
        self
    }

    /// Appends the given criteria as one AND group.
    pub fn fields(self, fields: impl IntoIterator<Item = FieldCriterion>) -> Self {
        self.field_group(FieldGroup::and(fields))
    }

    /// Appends one sort field.
    pub fn sort(mut self, field: SortField) -> Self {
        self.query.sort_fields.push(field);
        self
    }

    /// Appends several sort fields.
    pub fn sort_fields(mut self, fields: impl IntoIterator<Item = SortField>) -> Self {
        self.query.sort_fields.extend(fields);
        self
    }

    /// Appends a script to run before sorting.
    pub fn pre_sort_script(mut self, script: impl Into<String>) -> Self {
        self.query.scripts.pre_sort.push(script.into());
        self
    }

    /// Appends a script to run before the find.
    pub fn pre_find_script(mut self, script: impl Into<String>) -> Self {
        self.query.scripts.pre_find.push(script.into());
        self
    }

    /// Appends a script to run after the find.
    pub fn post_find_script(mut self, script: impl Into<String>) -> Self {
        self.query.scripts.post_find.push(script.into());
        self
    }

    /// Appends one script parameter.
    pub fn script_param(mut self, param: impl Into<String>) -> Self {
        self.query.scripts.params.push(param.into());
        self
    }

    /// Appends several script parameters.
    pub fn script_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query.scripts.params.extend(params.into_iter().map(Into::into));
        self
    }

    /// Sets the delimiter used to join script parameters.
    ///
    /// Defaults to [`DEFAULT_PARAM_DELIMITER`](super::DEFAULT_PARAM_DELIMITER).
    pub fn script_param_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.query.scripts.delimiter = delimiter.into();
        self
    }

    /// Sets the layout whose fields are returned in the response.
    pub fn response_layout(mut self, layout: impl Into<String>) -> Self {
        self.query.response_layout = Some(layout.into());
        self
    }

    /// Appends field names the caller wants from the response.
    pub fn response_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query.response_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Limits the number of records returned.
    pub fn max(mut self, n: u32) -> Self {
        self.query.max_records = Some(n);
        self
    }

    /// Returns all matching records (the default).
    pub fn max_all(mut self) -> Self {
        self.query.max_records = None;
        self
    }

    /// Skips the first `n` matching records.
    pub fn skip(mut self, n: u32) -> Self {
        self.query.skip_records = n;
        self
    }

    /// Builds the [`Query`].
    pub fn build(self) -> Query {
        self.query
    }
}
