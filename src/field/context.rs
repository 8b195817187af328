//! Request context of a single render of the field

use serde::Serialize;
use std::collections::HashMap;

use super::{FieldDeclaration, to_integer};

/// Read access to the current request's input variables
pub trait RequestInput {
    fn get(&self, key: &str) -> Option<String>;
}

impl RequestInput for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Current value of the field in the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    /// Filter forms submit several category ids
    Multiple(Vec<String>),
}

impl FieldValue {
    /// The value as a category id; the first one when multi-valued, 0 when empty
    pub fn first_id(&self) -> i64 {
        match self {
            FieldValue::Single(value) => to_integer(value),
            FieldValue::Multiple(values) => values.first().map_or(0, |v| to_integer(v)),
        }
    }

    pub fn contains(&self, candidate: &str) -> bool {
        match self {
            FieldValue::Single(value) => value == candidate,
            FieldValue::Multiple(values) => values.iter().any(|v| v == candidate),
        }
    }
}

/// Everything the options provider needs to know about this render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Category being edited (parent mode) or the item's category; 0 when new
    pub current_id: i64,
    /// Currently selected parent; only set in parent-selection mode
    pub current_parent: Option<i64>,
    pub extension: String,
    pub parent_mode: bool,
    pub show_root: Option<bool>,
    pub published: Vec<i64>,
    pub languages: Option<Vec<String>>,
}

impl RequestContext {
    /// Derive the context from the declaration, the field's form value and
    /// the request. `component` is the extension owning the category screen.
    pub fn derive(
        field: &FieldDeclaration,
        value: Option<&FieldValue>,
        input: &dyn RequestInput,
        component: &str,
    ) -> Self {
        let non_empty = |key: &str| input.get(key).filter(|v| !v.is_empty());

        let on_category_screen = non_empty("option").as_deref() == Some(component)
            && non_empty("view").as_deref() == Some("category");
        let parent_mode = field.parent || on_category_screen;
        let field_id = value.map_or(0, FieldValue::first_id);

        let (current_id, current_parent, extension_key) = if parent_mode {
            let editing = non_empty("id").map_or(0, |id| to_integer(&id));
            (editing, Some(field_id), "extension")
        } else {
            (field_id, None, "option")
        };

        let extension = field
            .extension
            .clone()
            .or_else(|| non_empty(extension_key))
            .unwrap_or_else(|| component.to_string());

        log::debug!(
            "Category field '{}': parent mode {}, current {}, parent {:?}, extension {}",
            field.name,
            parent_mode,
            current_id,
            current_parent,
            extension
        );

        Self {
            current_id,
            current_parent,
            extension,
            parent_mode,
            show_root: field.show_root,
            published: field.published.clone(),
            languages: field.languages.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPONENT: &str = "com_joomgallery";

    fn input(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn field(xml: &str) -> FieldDeclaration {
        FieldDeclaration::parse(xml).unwrap()
    }

    #[test]
    fn test_item_mode() {
        let field = field(r#"<field name="catid"/>"#);
        let value = FieldValue::Single("5".to_string());
        let request = input(&[("option", "com_joomgallery"), ("view", "image")]);

        let context = RequestContext::derive(&field, Some(&value), &request, COMPONENT);

        assert!(!context.parent_mode);
        assert_eq!(context.current_id, 5);
        assert_eq!(context.current_parent, None);
        assert_eq!(context.extension, "com_joomgallery");
        assert_eq!(context.published, vec![0, 1]);
    }

    #[test]
    fn test_item_mode_multi_value_takes_first() {
        let field = field(r#"<field name="catid"/>"#);
        let value = FieldValue::Multiple(vec!["8".to_string(), "3".to_string()]);

        let context = RequestContext::derive(&field, Some(&value), &input(&[]), COMPONENT);

        assert_eq!(context.current_id, 8);
        assert_eq!(context.extension, COMPONENT);
    }

    #[test]
    fn test_parent_mode_from_category_screen() {
        let field = field(r#"<field name="parent_id"/>"#);
        let value = FieldValue::Single("2".to_string());
        let request = input(&[
            ("option", "com_joomgallery"),
            ("view", "category"),
            ("id", "7"),
            ("extension", "com_joomgallery.images"),
        ]);

        let context = RequestContext::derive(&field, Some(&value), &request, COMPONENT);

        assert!(context.parent_mode);
        assert_eq!(context.current_id, 7);
        assert_eq!(context.current_parent, Some(2));
        assert_eq!(context.extension, "com_joomgallery.images");
    }

    #[test]
    fn test_parent_mode_from_attribute_defaults() {
        let field = field(r#"<field name="parent_id" parent="true" extension="com_custom"/>"#);

        let context = RequestContext::derive(&field, None, &input(&[]), COMPONENT);

        assert!(context.parent_mode);
        assert_eq!(context.current_id, 0);
        assert_eq!(context.current_parent, Some(0));
        assert_eq!(context.extension, "com_custom");
    }

    #[test]
    fn test_non_numeric_ids_become_zero() {
        let field = field(r#"<field name="catid"/>"#);
        let value = FieldValue::Single("abc".to_string());

        let context = RequestContext::derive(&field, Some(&value), &input(&[]), COMPONENT);
        assert_eq!(context.current_id, 0);
    }

    #[test]
    fn test_value_contains() {
        let value = FieldValue::Multiple(vec!["2".to_string(), "4".to_string()]);
        assert!(value.contains("4"));
        assert!(!value.contains("3"));
        assert_eq!(FieldValue::Multiple(Vec::new()).first_id(), 0);
    }
}
