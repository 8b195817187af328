//! Reusable SELECT statement that renders to parameterized SQL

use super::filters::{BoundValue, Filter};
use super::orderby::OrderByClause;

#[derive(Debug, Clone, PartialEq)]
pub struct SelectColumn {
    pub expr: String,
    pub alias: String,
}

/// LEFT JOIN against a table alias with an ON condition
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub table: String,
    pub alias: String,
    pub on: Filter,
}

#[derive(Debug, Clone)]
pub struct SelectQuery {
    pub table: String,
    pub alias: String,
    pub columns: Vec<SelectColumn>,
    pub joins: Vec<Join>,
    /// Conditions joined with AND
    pub filters: Vec<Filter>,
    pub orderby: OrderByClause,
}

/// SQL text plus the values for its `?` placeholders, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Vec<BoundValue>,
}

impl SelectQuery {
    pub fn new(table: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: alias.into(),
            columns: Vec::new(),
            joins: Vec::new(),
            filters: Vec::new(),
            orderby: OrderByClause::new(),
        }
    }

    pub fn to_sql(&self) -> CompiledQuery {
        let mut params = Vec::new();

        let columns = if self.columns.is_empty() {
            format!("{}.*", self.alias)
        } else {
            self.columns
                .iter()
                .map(|c| format!("{} AS {}", c.expr, c.alias))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let mut sql = format!("SELECT {} FROM {} AS {}", columns, self.table, self.alias);

        // Join parameters precede WHERE parameters in the statement text
        for join in &self.joins {
            sql.push_str(&format!(
                " LEFT JOIN {} AS {} ON {}",
                join.table,
                join.alias,
                join.on.to_sql(&mut params)
            ));
        }

        if !self.filters.is_empty() {
            let conditions: Vec<String> =
                self.filters.iter().map(|f| f.to_sql(&mut params)).collect();
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        if let Some(orderby) = self.orderby.to_sql_string() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&orderby);
        }

        CompiledQuery { sql, params }
    }
}
