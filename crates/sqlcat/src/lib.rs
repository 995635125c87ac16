//! # sqlcat
//!
//! Assemble a PostgreSQL `SELECT` (and its `COUNT` twin) from fragments
//! supplied by independent pieces of code.
//!
//! ## Features
//!
//! - **Fragments, not an AST**: table, columns, joins, filters, grouping and
//!   ordering are raw SQL text; nothing is parsed or validated
//! - **Global placeholder numbering**: write `$n` in a filter and bind a value;
//!   it becomes `$1`, `$2`, ... in the order values were added
//! - **Count variant**: the same filters wrapped in `SELECT count(*)`, with
//!   ordering and paging dropped
//! - **REST order tokens**: `name:desc` becomes `name DESC`
//!
//! ```ignore
//! use sqlcat::{Builder, parse_orders};
//!
//! let mut q = Builder::new("pets AS p");
//! q.set_columns(["p.*"])
//!     .set_relations(["JOIN owners AS o ON o.id = p.owner_id"]);
//! q.bind_condition("p.name ILIKE $n", "%Korone%");
//! q.with_orders(parse_orders(["p.name:asc"])).with_limit(30);
//!
//! let page = q.build();
//! let rows = client.query(page.sql(), &page.params()).await?;
//! ```
//!
//! Executing statements is left to the caller; the argument lists are
//! `tokio-postgres` parameter slices.

pub mod builder;
pub mod error;
pub mod order;
pub mod param;
pub mod template;

pub use builder::{Builder, BuiltQuery, PLACEHOLDER_MARKER, SqlBuilder};
pub use error::{SqlcatError, SqlcatResult};
pub use order::{ORDER_SEPARATOR, parse_order, parse_orders};
pub use param::{Param, ParamList};
pub use template::{ConditionTemplate, QueryTemplate};
