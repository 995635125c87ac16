use super::Builder;

const SEP_WS: &str = " ";
const SEP_COMMA: &str = ", ";
const SEP_AND: &str = " AND ";

impl Builder {
    pub(super) fn render_select(&self) -> String {
        let mut sql = String::with_capacity(self.estimated_len());
        self.write_body(&mut sql);
        self.write_paging(&mut sql);
        sql
    }

    pub(super) fn render_count(&self) -> String {
        let mut sql = String::with_capacity(self.estimated_len() + 40);
        sql.push_str("SELECT count(*) FROM (");
        self.write_body(&mut sql);
        sql.push_str(") AS countq");
        sql
    }

    /// SELECT through HAVING.
    fn write_body(&self, sql: &mut String) {
        sql.push_str("SELECT");
        push_list(sql, "", &self.columns, SEP_COMMA);

        if let Some(table) = &self.table {
            sql.push_str(" FROM ");
            sql.push_str(table);
        }

        push_list(sql, "", &self.relations, SEP_WS);
        push_list(sql, "WHERE ", &self.conditions, SEP_AND);
        push_list(sql, "GROUP BY ", &self.groups, SEP_COMMA);
        push_list(sql, "HAVING ", &self.having, SEP_AND);
    }

    /// ORDER BY, LIMIT and OFFSET. Never part of a count.
    fn write_paging(&self, sql: &mut String) {
        push_list(sql, "ORDER BY ", &self.orders, SEP_COMMA);

        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ");
            sql.push_str(&limit.to_string());
        }

        if let Some(offset) = self.offset {
            sql.push_str(" OFFSET ");
            sql.push_str(&offset.to_string());
        }
    }

    fn estimated_len(&self) -> usize {
        let fragments = [
            &self.columns,
            &self.relations,
            &self.conditions,
            &self.groups,
            &self.having,
            &self.orders,
        ];
        let text: usize = fragments
            .iter()
            .flat_map(|list| list.iter())
            .map(|s| s.len() + SEP_AND.len())
            .sum();
        64 + text + self.table.as_ref().map_or(0, String::len)
    }
}

/// Append ` <keyword><items joined by sep>`; nothing when `items` is empty.
fn push_list(sql: &mut String, keyword: &str, items: &[String], sep: &str) {
    if items.is_empty() {
        return;
    }
    sql.push(' ');
    sql.push_str(keyword);
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            sql.push_str(sep);
        }
        sql.push_str(item);
    }
}
