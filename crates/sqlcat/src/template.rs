//! Declarative query templates.
//!
//! A [`QueryTemplate`] describes one query in TOML (or any serde format) and
//! turns into a [`Builder`] through the builder's own mutators, so the
//! guarded ORDER BY / LIMIT / OFFSET rules apply unchanged.
//!
//! ```toml
//! table = "pets AS p"
//! columns = ["p.id", "p.name"]
//! relations = ["JOIN owners AS o ON o.id = p.owner_id"]
//! orders = ["p.name:asc"]
//! limit = 30
//!
//! [[conditions]]
//! sql = "p.name ILIKE $n"
//! args = ["%Korone%"]
//! ```

use crate::builder::Builder;
use crate::error::{SqlcatError, SqlcatResult};
use crate::order::parse_orders;
use crate::param::Param;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryTemplate {
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub relations: Vec<String>,
    #[serde(default)]
    pub conditions: Vec<ConditionTemplate>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub having: Vec<String>,
    /// Order tokens (`column` or `column:direction`).
    #[serde(default)]
    pub orders: Vec<String>,
    #[serde(default)]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

/// One WHERE predicate with the values for its `$n` markers.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionTemplate {
    pub sql: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

impl QueryTemplate {
    pub fn from_toml_str(raw: &str) -> SqlcatResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SqlcatResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| SqlcatError::Template(format!("{}: {e}", path.display())))
    }

    /// Build a [`Builder`] from this template.
    pub fn into_builder(&self) -> SqlcatResult<Builder> {
        let mut builder = Builder::default();
        if let Some(table) = &self.table {
            builder.set_table(table.as_str());
        }
        builder
            .set_columns(self.columns.iter().cloned())
            .set_relations(self.relations.iter().cloned())
            .set_groups(self.groups.iter().cloned())
            .set_having(self.having.iter().cloned());

        for cond in &self.conditions {
            let params = cond
                .args
                .iter()
                .map(|v| json_to_param(&cond.sql, v))
                .collect::<SqlcatResult<Vec<_>>>()?;
            builder.add_condition(&cond.sql, params);
        }

        builder
            .with_orders(parse_orders(&self.orders))
            .with_limit(self.limit)
            .with_offset(self.offset);
        Ok(builder)
    }

    /// All argument values in placeholder order.
    pub fn args(&self) -> Vec<&Value> {
        self.conditions.iter().flat_map(|c| c.args.iter()).collect()
    }
}

/// Map a JSON-shaped value onto a Postgres parameter.
fn json_to_param(condition: &str, value: &Value) -> SqlcatResult<Param> {
    let param = match value {
        Value::Null => Param::new(Option::<String>::None),
        Value::Bool(b) => Param::new(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Param::new(i)
            } else if n.is_u64() {
                return Err(SqlcatError::value(
                    condition,
                    format!("integer {n} does not fit in a BIGINT"),
                ));
            } else if let Some(f) = n.as_f64() {
                Param::new(f)
            } else {
                return Err(SqlcatError::value(condition, format!("unsupported number {n}")));
            }
        }
        Value::String(s) => Param::new(s.clone()),
        Value::Array(_) | Value::Object(_) => Param::new(value.clone()),
    };
    Ok(param)
}
