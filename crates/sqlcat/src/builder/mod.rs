//! Fragment-accumulating SELECT builder.
//!
//! A [`Builder`] collects the pieces of one query (table, projection, joins,
//! filters, grouping, ordering, paging) from independent call sites and
//! renders them in a fixed clause order. Filters may carry bound values: each
//! value replaces the next `$n` marker of its fragment with a global `$1, $2,
//! ...` placeholder, so fragments written in isolation compose without index
//! bookkeeping.
//!
//! ```ignore
//! use sqlcat::{Builder, parse_orders};
//!
//! let mut q = Builder::new("pets");
//! q.set_columns(["*"]);
//! q.bind_condition("name ILIKE $n", "%Korone%");
//! q.add_raw_condition("(type = 'dog')");
//! q.with_orders(parse_orders(["name:asc"])).with_limit(30);
//!
//! let rows = client.query(&q.to_sql(), &q.params_ref()).await?;
//! let total: i64 = client.query_one(&q.to_count_sql(), &q.params_ref()).await?.get(0);
//! ```

mod render;
pub mod traits;

pub use traits::SqlBuilder;

use crate::param::{Param, ParamList};
use tokio_postgres::types::ToSql;

/// Marker a condition fragment uses to request the next positional placeholder.
pub const PLACEHOLDER_MARKER: &str = "$n";

/// Accumulates query fragments and renders SELECT / COUNT statements.
///
/// Every field starts empty and an empty field never renders its clause.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    /// FROM target, may carry an alias (`pets AS p`)
    table: Option<String>,
    /// Projection list
    columns: Vec<String>,
    /// Raw JOIN clauses
    relations: Vec<String>,
    /// WHERE predicates, joined with AND
    conditions: Vec<String>,
    /// Bound values for the `$i` placeholders in `conditions`
    params: ParamList,
    /// GROUP BY items
    groups: Vec<String>,
    /// HAVING predicates, joined with AND
    having: Vec<String>,
    /// ORDER BY items
    orders: Vec<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl Builder {
    /// Create a builder selecting from `table`.
    pub fn new(table: impl Into<String>) -> Self {
        let mut builder = Self::default();
        builder.set_table(table);
        builder
    }

    // ==================== Fragments ====================

    /// Set the FROM target. An empty string removes the FROM clause.
    pub fn set_table(&mut self, table: impl Into<String>) -> &mut Self {
        let table = table.into();
        self.table = if table.is_empty() { None } else { Some(table) };
        self
    }

    /// Set the projection list.
    pub fn set_columns<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the JOIN clauses. Each one is emitted verbatim, so it must carry
    /// its own `JOIN ... ON ...` keywords.
    pub fn set_relations<I, S>(&mut self, relations: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relations = relations.into_iter().map(Into::into).collect();
        self
    }

    /// Set the GROUP BY items.
    pub fn set_groups<I, S>(&mut self, groups: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Set the HAVING predicates.
    pub fn set_having<I, S>(&mut self, having: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.having = having.into_iter().map(Into::into).collect();
        self
    }

    // ==================== Conditions ====================

    /// Append a WHERE predicate and bind `values` to its `$n` markers.
    ///
    /// Each value is appended to the argument list and replaces the first
    /// remaining `$n` in `fragment` with `$<position>`, where position is the
    /// new length of the argument list. Hand-numbered placeholders (`$1`) and
    /// other conventions (`?`) are left untouched.
    pub fn add_condition<I>(&mut self, fragment: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = Param>,
    {
        let mut condition = fragment.to_string();
        for value in values {
            let index = self.params.push_param(value);
            if !substitute_marker(&mut condition, index) {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    target: "sqlcat.sql",
                    condition = fragment,
                    index,
                    "bound value has no `$n` marker left to replace"
                );
            }
        }
        self.conditions.push(condition);
        self
    }

    /// Append a WHERE predicate with a single bound value.
    pub fn bind_condition<T>(&mut self, fragment: &str, value: T) -> &mut Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        self.add_condition(fragment, [Param::new(value)])
    }

    /// Append a WHERE predicate without bound values.
    pub fn add_raw_condition(&mut self, fragment: &str) -> &mut Self {
        self.add_condition(fragment, std::iter::empty())
    }

    // ==================== Ordering & pagination ====================

    /// Replace the ORDER BY items. An empty list keeps the current ones.
    pub fn with_orders<I, S>(&mut self, orders: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let orders: Vec<String> = orders.into_iter().map(Into::into).collect();
        if !orders.is_empty() {
            self.orders = orders;
        }
        self
    }

    /// Set LIMIT. Non-positive values are ignored.
    pub fn with_limit(&mut self, limit: i64) -> &mut Self {
        if limit > 0 {
            self.limit = Some(limit);
        }
        self
    }

    /// Set OFFSET. Non-positive values are ignored.
    pub fn with_offset(&mut self, offset: i64) -> &mut Self {
        if offset > 0 {
            self.offset = Some(offset);
        }
        self
    }

    // ==================== Accessors ====================

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn relations(&self) -> &[String] {
        &self.relations
    }

    /// WHERE predicates after placeholder numbering.
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    /// Bound values in placeholder order.
    pub fn params(&self) -> &ParamList {
        &self.params
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.as_refs()
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn having(&self) -> &[String] {
        &self.having
    }

    pub fn orders(&self) -> &[String] {
        &self.orders
    }

    pub fn limit(&self) -> Option<i64> {
        self.limit
    }

    pub fn offset(&self) -> Option<i64> {
        self.offset
    }

    // ==================== SQL build ====================

    /// Render the SELECT statement.
    pub fn to_sql(&self) -> String {
        let sql = self.render_select();
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sqlcat.sql", sql = %sql, params = self.params.len(), "rendered select");
        sql
    }

    /// Render the COUNT statement: the select body without ORDER BY, LIMIT
    /// and OFFSET, wrapped in `SELECT count(*) FROM (...) AS countq`.
    pub fn to_count_sql(&self) -> String {
        let sql = self.render_count();
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sqlcat.sql", sql = %sql, params = self.params.len(), "rendered count");
        sql
    }

    /// Build the SELECT query object.
    pub fn build(&self) -> BuiltQuery<'_> {
        BuiltQuery {
            sql: self.to_sql(),
            params: &self.params,
        }
    }

    /// Build the COUNT query object. It binds the same arguments as [`build`](Self::build).
    pub fn build_count(&self) -> BuiltQuery<'_> {
        BuiltQuery {
            sql: self.to_count_sql(),
            params: &self.params,
        }
    }
}

/// Replace the first `$n` in `condition` with `$<index>`.
///
/// Returns `false` when no marker is left.
fn substitute_marker(condition: &mut String, index: usize) -> bool {
    match condition.find(PLACEHOLDER_MARKER) {
        Some(pos) => {
            let placeholder = format!("${index}");
            condition.replace_range(pos..pos + PLACEHOLDER_MARKER.len(), &placeholder);
            true
        }
        None => false,
    }
}

impl SqlBuilder for Builder {
    fn build_sql(&self) -> String {
        self.to_sql()
    }

    fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.as_refs()
    }
}

/// Rendered statement holding SQL and argument references.
#[derive(Debug)]
pub struct BuiltQuery<'a> {
    sql: String,
    params: &'a ParamList,
}

impl<'a> BuiltQuery<'a> {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.as_refs()
    }

    pub fn param_list(&self) -> &'a ParamList {
        self.params
    }

    /// Split into SQL text and the argument list.
    pub fn into_parts(self) -> (String, Vec<&'a (dyn ToSql + Sync)>) {
        (self.sql, self.params.as_refs())
    }
}

impl SqlBuilder for BuiltQuery<'_> {
    fn build_sql(&self) -> String {
        self.sql.clone()
    }

    fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.as_refs()
    }
}
