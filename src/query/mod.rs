//! SQL Query Builder Module
//!
//! Provides a fluent API for building parameterized SELECT statements against
//! the category table. Follows the same split as the rest of the crate:
//! SelectQuery (reusable, renders to SQL) and QueryBuilder (fluent).

pub mod builder;
pub mod filters;
pub mod orderby;
pub mod select;

pub use builder::QueryBuilder;
pub use filters::{BoundValue, Filter, FilterValue};
pub use orderby::{OrderBy, OrderByClause};
pub use select::{CompiledQuery, Join, SelectColumn, SelectQuery};
