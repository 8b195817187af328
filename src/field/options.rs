//! Option types handed to the renderer

use serde::Serialize;

use crate::model::PublishedState;

/// An option declared in the field XML, or synthesised for the root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticOption {
    pub value: String,
    pub text: String,
    pub disabled: bool,
    pub class: Option<String>,
}

impl StaticOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            disabled: false,
            class: None,
        }
    }
}

/// A selectable category, display text already formatted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryOption {
    pub value: i64,
    pub text: String,
    pub level: i64,
    pub published: PublishedState,
    pub hidden: bool,
    pub in_hidden: bool,
    pub lft: i64,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldOption {
    Static(StaticOption),
    Category(CategoryOption),
}

impl FieldOption {
    pub fn value(&self) -> String {
        match self {
            FieldOption::Static(option) => option.value.clone(),
            FieldOption::Category(option) => option.value.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            FieldOption::Static(option) => &option.text,
            FieldOption::Category(option) => &option.text,
        }
    }

    pub fn disabled(&self) -> bool {
        matches!(self, FieldOption::Static(option) if option.disabled)
    }

    pub fn class(&self) -> Option<&str> {
        match self {
            FieldOption::Static(option) => option.class.as_deref(),
            FieldOption::Category(_) => None,
        }
    }
}
