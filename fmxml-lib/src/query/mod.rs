//! Query description and query-string compiler.
//!
//! A [`Query`] is an immutable description of one request against a layout:
//! the action, field criteria, sort order, scripts and paging. It is built with
//! [`Query::builder`] and rendered into the server's flat `-key=value` grammar
//! by [`compile`] (or [`try_compile`], which reports unsupported actions as an
//! error instead of an empty string).
//!
//! # Shared Types
//!
//! - [`Action`] - The operation requested of the server
//! - [`FieldCriterion`] / [`FieldGroup`] - Filter criteria combined per group
//! - [`SortField`] - Ordering specification for query results
//! - [`Scripts`] - Scripts to run around the find, and their parameter
//!
//! # Example
//!
//! ```
//! use fmxml_lib::query::{Action, FieldCriterion, Query, SortField};
//!
//! let query = Query::builder("contacts", "web", Action::Find)
//!     .fields([FieldCriterion::eq("last_name", "Smith")])
//!     .sort(SortField::asc("first_name"))
//!     .max(50)
//!     .build();
//!
//! assert!(query.query_string().ends_with("-findquery"));
//! ```

mod action;
mod builder;
mod compile;
mod criteria;
mod order;
mod script;

pub use action::Action;
pub use builder::Query;
pub use builder::QueryBuilder;
pub use compile::compile;
pub use compile::try_compile;
pub use criteria::FieldCriterion;
pub use criteria::FieldGroup;
pub use criteria::FieldOp;
pub use criteria::LogicalOp;
pub use order::SortField;
pub use order::SortOrder;
pub use script::DEFAULT_PARAM_DELIMITER;
pub use script::Scripts;
