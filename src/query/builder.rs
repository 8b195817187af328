//! QueryBuilder for fluent query construction
//!
//! Provides a fluent API that builds SelectQuery objects for execution

use super::filters::Filter;
use super::orderby::OrderBy;
use super::select::{Join, SelectColumn, SelectQuery};

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    query: SelectQuery,
}

impl QueryBuilder {
    pub fn new(table: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            query: SelectQuery::new(table, alias),
        }
    }

    /// Select a column under an alias
    pub fn select_as(mut self, expr: impl Into<String>, alias: impl Into<String>) -> Self {
        self.query.columns.push(SelectColumn {
            expr: expr.into(),
            alias: alias.into(),
        });
        self
    }

    /// Add a filter condition; multiple calls are combined with AND
    pub fn filter(mut self, filter: Filter) -> Self {
        self.query.filters.push(filter);
        self
    }

    /// LEFT JOIN another table under an alias
    pub fn left_join(
        mut self,
        table: impl Into<String>,
        alias: impl Into<String>,
        on: Filter,
    ) -> Self {
        self.query.joins.push(Join {
            table: table.into(),
            alias: alias.into(),
            on,
        });
        self
    }

    /// Add ordering
    pub fn orderby(mut self, order: OrderBy) -> Self {
        self.query.orderby = self.query.orderby.add(order);
        self
    }

    /// Build the final SelectQuery object (reusable)
    pub fn build(self) -> SelectQuery {
        self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::BoundValue;

    #[test]
    fn test_basic_query_builder() {
        let query = QueryBuilder::new("categories", "a")
            .select_as("a.id", "value")
            .select_as("a.title", "text")
            .filter(Filter::gt("a.level", 0))
            .orderby(OrderBy::asc("a.lft"))
            .build();

        assert_eq!(query.table, "categories");
        assert_eq!(query.columns.len(), 2);
        assert_eq!(query.filters.len(), 1);

        let compiled = query.to_sql();
        assert_eq!(
            compiled.sql,
            "SELECT a.id AS value, a.title AS text FROM categories AS a WHERE a.level > ? ORDER BY a.lft ASC"
        );
        assert_eq!(compiled.params, vec![BoundValue::Integer(0)]);
    }

    #[test]
    fn test_left_join_query() {
        let query = QueryBuilder::new("categories", "a")
            .select_as("a.id", "value")
            .left_join("categories", "p", Filter::eq("p.id", 4))
            .filter(Filter::is_not_null("p.id"))
            .build();

        assert_eq!(
            query.to_sql().sql,
            "SELECT a.id AS value FROM categories AS a LEFT JOIN categories AS p ON p.id = ? \
             WHERE p.id IS NOT NULL"
        );
    }
}
