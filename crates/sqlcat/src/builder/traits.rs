use tokio_postgres::types::ToSql;

/// Anything that yields a statement plus its positional arguments.
///
/// This is the hand-off point to a database driver: the SQL goes to
/// `prepare`/`query` and `params_ref()` is passed as the parameter slice.
pub trait SqlBuilder {
    /// Build the SQL string.
    fn build_sql(&self) -> String;

    /// Get parameters as references compatible with tokio-postgres.
    fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)>;

    /// Number of `$i` placeholders the statement expects to be bound.
    fn param_count(&self) -> usize {
        self.params_ref().len()
    }
}
