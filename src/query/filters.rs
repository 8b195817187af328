//! SQL filter building
//!
//! Provides type-safe WHERE / ON condition construction. Literal values are
//! never inlined: they become `?` placeholders and are collected, in textual
//! order, into the bound parameter list.

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    // Comparison operators
    Eq(String, FilterValue),
    Gt(String, FilterValue),
    Ge(String, FilterValue),
    Le(String, FilterValue),

    // Set membership
    In(String, Vec<FilterValue>),
    IsNotNull(String),

    // Logical operators
    And(Vec<Filter>),
    Not(Box<Filter>),
}

/// Right-hand side of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Integer(i64),
    String(String),
    /// Another column, rendered as an identifier instead of a parameter
    Column(String),
}

/// A parameter bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    Integer(i64),
    Text(String),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::Eq(field.into(), value.into())
    }

    pub fn gt(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::Gt(field.into(), value.into())
    }

    pub fn ge(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::Ge(field.into(), value.into())
    }

    pub fn le(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::Le(field.into(), value.into())
    }

    pub fn is_in<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        Self::In(field.into(), values.into_iter().map(Into::into).collect())
    }

    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::IsNotNull(field.into())
    }

    pub fn and(filters: Vec<Filter>) -> Self {
        Self::And(filters)
    }

    pub fn not(filter: Filter) -> Self {
        Self::Not(Box::new(filter))
    }

    /// Render to SQL, appending bound values to `params` in placeholder order
    pub fn to_sql(&self, params: &mut Vec<BoundValue>) -> String {
        match self {
            Filter::Eq(field, value) => format!("{} = {}", field, value.to_sql(params)),
            Filter::Gt(field, value) => format!("{} > {}", field, value.to_sql(params)),
            Filter::Ge(field, value) => format!("{} >= {}", field, value.to_sql(params)),
            Filter::Le(field, value) => format!("{} <= {}", field, value.to_sql(params)),

            // IN () is not valid SQL; an empty set matches nothing
            Filter::In(_, values) if values.is_empty() => "1 = 0".to_string(),
            Filter::In(field, values) => {
                let placeholders: Vec<String> =
                    values.iter().map(|v| v.to_sql(params)).collect();
                format!("{} IN ({})", field, placeholders.join(", "))
            }
            Filter::IsNotNull(field) => format!("{} IS NOT NULL", field),

            Filter::And(filters) if filters.is_empty() => "1 = 1".to_string(),
            Filter::And(filters) => {
                let filter_strings: Vec<String> =
                    filters.iter().map(|f| f.to_sql(params)).collect();
                format!("({})", filter_strings.join(" AND "))
            }
            Filter::Not(filter) => format!("NOT ({})", filter.to_sql(params)),
        }
    }
}

impl FilterValue {
    pub fn column(name: impl Into<String>) -> Self {
        FilterValue::Column(name.into())
    }

    fn to_sql(&self, params: &mut Vec<BoundValue>) -> String {
        match self {
            FilterValue::Integer(i) => {
                params.push(BoundValue::Integer(*i));
                "?".to_string()
            }
            FilterValue::String(s) => {
                params.push(BoundValue::Text(s.clone()));
                "?".to_string()
            }
            FilterValue::Column(column) => column.clone(),
        }
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::String(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::String(value.to_string())
    }
}

impl From<&String> for FilterValue {
    fn from(value: &String) -> Self {
        FilterValue::String(value.clone())
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Integer(value)
    }
}

impl From<&i64> for FilterValue {
    fn from(value: &i64) -> Self {
        FilterValue::Integer(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_binds_parameter() {
        let mut params = Vec::new();
        let sql = Filter::gt("a.level", 0).to_sql(&mut params);

        assert_eq!(sql, "a.level > ?");
        assert_eq!(params, vec![BoundValue::Integer(0)]);
    }

    #[test]
    fn test_in_list() {
        let mut params = Vec::new();
        let sql = Filter::is_in("a.language", ["de-DE", "*"]).to_sql(&mut params);

        assert_eq!(sql, "a.language IN (?, ?)");
        assert_eq!(
            params,
            vec![
                BoundValue::Text("de-DE".to_string()),
                BoundValue::Text("*".to_string())
            ]
        );
    }

    #[test]
    fn test_empty_in_list_matches_nothing() {
        let mut params = Vec::new();
        let sql = Filter::is_in("a.access", Vec::<i64>::new()).to_sql(&mut params);

        assert_eq!(sql, "1 = 0");
        assert!(params.is_empty());
    }

    #[test]
    fn test_column_comparison_is_not_bound() {
        let mut params = Vec::new();
        let filter = Filter::not(Filter::and(vec![
            Filter::ge("a.lft", FilterValue::column("p.lft")),
            Filter::le("a.rgt", FilterValue::column("p.rgt")),
        ]));

        assert_eq!(
            filter.to_sql(&mut params),
            "NOT ((a.lft >= p.lft AND a.rgt <= p.rgt))"
        );
        assert!(params.is_empty());
    }
}
