//! Query-string generation.
//!
//! The server reads compound finds positionally, so segment order matters:
//! database and layout, response layout, scripts, script parameter, then the
//! action-specific segments and finally the action token.

use super::Action;
use super::FieldGroup;
use super::LogicalOp;
use super::Query;
use crate::error::QueryError;

/// Token for a single-record fetch by record ID.
const FIND_BY_ID: &str = "-find";

/// Compiles a query into the server's query-string grammar (the part after `?`).
///
/// Unsupported actions compile to an empty string. Use [`try_compile`] to get
/// an error instead.
pub fn compile(query: &Query) -> String {
    try_compile(query).unwrap_or_default()
}

/// Compiles a query, reporting unsupported actions as [`QueryError`].
pub fn try_compile(query: &Query) -> Result<String, QueryError> {
    let mut segments = vec![db_layout_to_string(query)];

    if let Some(layout) = &query.response_layout {
        segments.push(format!("-lay.response={}", escape(layout)));
    }
    push_nonempty(&mut segments, scripts_to_string(query));
    if let Some(params) = query.scripts.joined_params() {
        segments.push(format!("-script.param={}", escape(&params)));
    }

    match &query.action {
        Action::Delete | Action::Duplicate => {
            push_nonempty(&mut segments, record_id_to_string(query));
        }
        Action::Edit => {
            push_nonempty(&mut segments, record_id_to_string(query));
            push_nonempty(&mut segments, simple_fields_to_string(&query.field_groups));
        }
        Action::New => {
            push_nonempty(&mut segments, simple_fields_to_string(&query.field_groups));
        }
        Action::FindAny => {}
        Action::FindAll => {
            push_nonempty(&mut segments, sort_fields_to_string(query));
            segments.push(max_skip_to_string(query));
        }
        Action::Find => {
            if query.record_id.is_some() {
                push_nonempty(&mut segments, record_id_to_string(query));
                segments.push(FIND_BY_ID.to_string());
                return Ok(segments.join("&"));
            }

            push_nonempty(&mut segments, sort_fields_to_string(query));
            segments.push(max_skip_to_string(query));

            if query.fields_count() == 0 {
                segments.push(FIND_BY_ID.to_string());
                return Ok(segments.join("&"));
            }

            segments.push(compound_query_to_string(&query.field_groups));
            segments.push(compound_fields_to_string(&query.field_groups));
        }
        Action::Unsupported(raw) => return Err(QueryError::UnsupportedAction(raw.clone())),
    }

    segments.push(query.action.token().to_string());
    Ok(segments.join("&"))
}

/// Percent-escapes one token (name, value, script, layout).
pub fn escape(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

fn push_nonempty(segments: &mut Vec<String>, segment: String) {
    if !segment.is_empty() {
        segments.push(segment);
    }
}

fn db_layout_to_string(query: &Query) -> String {
    format!("-db={}&-lay={}", escape(&query.database), escape(&query.layout))
}

/// Renders pre-sort, pre-find and post-find scripts, in that order.
fn scripts_to_string(query: &Query) -> String {
    let scripts = &query.scripts;
    [
        ("-script.presort", &scripts.pre_sort),
        ("-script.prefind", &scripts.pre_find),
        ("-script", &scripts.post_find),
    ]
    .iter()
    .flat_map(|(key, names)| names.iter().map(move |name| format!("{}={}", key, escape(name))))
    .collect::<Vec<_>>()
    .join("&")
}

/// Renders `-recid=<id>`. Never emitted for find-any.
fn record_id_to_string(query: &Query) -> String {
    match query.record_id {
        Some(id) if query.action != Action::FindAny => format!("-recid={}", id),
        _ => String::new(),
    }
}

/// Renders criteria as plain `name=value` assignments, groups flattened.
fn simple_fields_to_string(groups: &[FieldGroup]) -> String {
    groups
        .iter()
        .flat_map(|g| g.fields.iter())
        .map(|f| format!("{}={}", escape(&f.name), escape(&f.value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn sort_fields_to_string(query: &Query) -> String {
    query
        .sort_fields
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let n = i + 1;
            format!(
                "-sortfield.{}={}&-sortorder.{}={}",
                n,
                escape(&f.name),
                n,
                f.order.token()
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn max_skip_to_string(query: &Query) -> String {
    let max = match query.max_records {
        Some(n) => n.to_string(),
        None => "all".to_string(),
    };
    format!("-skip={}&-max={}", query.skip_records, max)
}

/// Renders the `-query=` expression. Criteria are numbered `q1..qN` across
/// all groups in order.
fn compound_query_to_string(groups: &[FieldGroup]) -> String {
    let mut index = 0;
    let mut expressions = Vec::new();

    for group in groups.iter().filter(|g| !g.is_empty()) {
        let ids: Vec<String> = group
            .fields
            .iter()
            .map(|_| {
                index += 1;
                format!("q{}", index)
            })
            .collect();

        let expression = match group.op {
            LogicalOp::And => format!("({})", ids.join(",")),
            LogicalOp::Or => ids
                .iter()
                .map(|id| format!("({})", id))
                .collect::<Vec<_>>()
                .join(";"),
            LogicalOp::Not => format!("!({})", ids.join(",")),
        };
        expressions.push(expression);
    }

    format!("-query={}", expressions.join(";"))
}

/// Renders `-qN=<name>&-qN.value=<value>` for every criterion, numbered the
/// same way as [`compound_query_to_string`].
fn compound_fields_to_string(groups: &[FieldGroup]) -> String {
    groups
        .iter()
        .flat_map(|g| g.fields.iter())
        .enumerate()
        .map(|(i, f)| {
            let n = i + 1;
            format!(
                "-q{}={}&-q{}.value={}",
                n,
                escape(&f.name),
                n,
                escape(&f.value_with_op())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
