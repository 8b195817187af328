//! SQL ORDER BY building

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderBy {
    Asc(String),
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self::Asc(field.into())
    }

    /// Convert to a single ORDER BY term
    pub fn to_sql_string(&self) -> String {
        match self {
            OrderBy::Asc(field) => format!("{} ASC", field),
        }
    }
}

/// Helper to combine multiple OrderBy clauses
#[derive(Debug, Clone, Default)]
pub struct OrderByClause {
    clauses: Vec<OrderBy>,
}

impl OrderByClause {
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    pub fn add(mut self, order: OrderBy) -> Self {
        self.clauses.push(order);
        self
    }

    pub fn to_sql_string(&self) -> Option<String> {
        if self.clauses.is_empty() {
            None
        } else {
            let order_strings: Vec<String> =
                self.clauses.iter().map(|o| o.to_sql_string()).collect();
            Some(order_strings.join(", "))
        }
    }
}
