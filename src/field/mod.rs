//! The `<field/>` declaration of a category dropdown

use anyhow::{Context, Result, anyhow};
use roxmltree::{Document, Node};

pub mod context;
pub mod options;

pub use context::{FieldValue, RequestContext, RequestInput};
pub use options::{CategoryOption, FieldOption, StaticOption};

/// Published states offered when the declaration does not say otherwise
pub const DEFAULT_PUBLISHED: [i64; 2] = [0, 1];

/// Parsed attributes of a category dropdown field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub name: String,
    pub id: String,
    pub class: String,
    pub required: bool,
    /// Field is used to pick the parent of a category
    pub parent: bool,
    pub extension: Option<String>,
    pub published: Vec<i64>,
    pub languages: Option<Vec<String>>,
    /// `None` when the attribute is absent
    pub show_root: Option<bool>,
    pub refresh_enabled: bool,
    pub refresh_cat_id: String,
    pub refresh_section: String,
    /// Statically declared `<option/>` children, in document order
    pub options: Vec<StaticOption>,
    allow_add: bool,
    custom_prefix: String,
}

impl FieldDeclaration {
    /// Parse a `<field/>` element, either as the document root or the first
    /// `field` element below it
    pub fn parse(xml: &str) -> Result<Self> {
        let doc = Document::parse(xml)
            .map_err(|e| anyhow!("Failed to parse field declaration XML: {}", e))?;

        let field = doc
            .descendants()
            .find(|node| node.has_tag_name("field"))
            .ok_or_else(|| anyhow!("No field element found in declaration"))?;

        Self::from_node(field)
    }

    fn from_node(field: Node<'_, '_>) -> Result<Self> {
        let name = field
            .attribute("name")
            .filter(|name| !name.is_empty())
            .context("Field element missing 'name' attribute")?
            .to_string();

        let attr = |key: &str| field.attribute(key).unwrap_or_default().to_string();
        let flag = |key: &str| field.attribute(key).is_some_and(|v| parse_flag(v, key));

        let published = match field.attribute("published").filter(|v| !v.is_empty()) {
            Some(list) => list.split(',').map(to_integer).collect(),
            None => DEFAULT_PUBLISHED.to_vec(),
        };

        let languages = field
            .attribute("language")
            .filter(|v| !v.is_empty())
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|code| !code.is_empty())
                    .map(str::to_string)
                    .collect()
            });

        let options = field
            .children()
            .filter(|n| n.has_tag_name("option"))
            .map(|option| StaticOption {
                value: option.attribute("value").unwrap_or_default().to_string(),
                text: option.text().unwrap_or_default().trim().to_string(),
                disabled: option
                    .attribute("disabled")
                    .is_some_and(|v| parse_flag(v, "disabled")),
                class: option.attribute("class").map(str::to_string),
            })
            .collect();

        let declaration = Self {
            id: field
                .attribute("id")
                .map(str::to_string)
                .unwrap_or_else(|| format!("jform_{}", name)),
            class: attr("class"),
            required: flag("required"),
            parent: flag("parent"),
            extension: field
                .attribute("extension")
                .filter(|v| !v.is_empty())
                .map(str::to_string),
            published,
            languages,
            show_root: field.attribute("show_root").map(|v| v != "false"),
            refresh_enabled: flag("refresh-enabled"),
            refresh_cat_id: attr("refresh-cat-id"),
            refresh_section: attr("refresh-section"),
            options,
            allow_add: flag("allowAdd"),
            custom_prefix: attr("customPrefix"),
            name,
        };

        log::debug!(
            "Parsed category field '{}' (parent: {}, published: {:?}, languages: {:?})",
            declaration.name,
            declaration.parent,
            declaration.published,
            declaration.languages
        );
        Ok(declaration)
    }

    /// Whether the dropdown lets the operator type a new category
    pub fn allow_add(&self) -> bool {
        self.allow_add
    }

    pub fn set_allow_add(&mut self, value: &str) {
        self.allow_add = parse_flag(value, "allowAdd");
    }

    /// Prefix marking typed-in values as new categories
    pub fn custom_prefix(&self) -> &str {
        &self.custom_prefix
    }

    pub fn set_custom_prefix(&mut self, value: impl Into<String>) {
        self.custom_prefix = value.into();
    }
}

/// Truthy attribute rule: `"true"`, the attribute's own name, or `"1"`
pub fn parse_flag(value: &str, name: &str) -> bool {
    value == "true" || value == name || value == "1"
}

/// Lenient integer conversion; anything unparsable counts as 0
pub(crate) fn to_integer(value: &str) -> i64 {
    value.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_declaration_defaults() {
        let field = FieldDeclaration::parse(r#"<field name="catid" type="jgcategorydropdown"/>"#)
            .unwrap();

        assert_eq!(field.name, "catid");
        assert_eq!(field.id, "jform_catid");
        assert_eq!(field.published, vec![0, 1]);
        assert_eq!(field.languages, None);
        assert_eq!(field.show_root, None);
        assert!(!field.parent);
        assert!(!field.allow_add());
        assert_eq!(field.custom_prefix(), "");
        assert!(field.options.is_empty());
    }

    #[test]
    fn test_full_declaration() {
        let xml = r##"
            <form>
              <fieldset name="details">
                <field name="parent_id" type="jgcategorydropdown" parent="true"
                       extension="com_joomgallery" published="1, 2,x" language="de-DE,*"
                       allowAdd="allowAdd" customPrefix="#new#" show_root="true"
                       refresh-enabled="1" refresh-cat-id="catid" refresh-section="images">
                  <option value="">JSELECT</option>
                  <option value="-1" disabled="true" class="muted">Nothing</option>
                </field>
              </fieldset>
            </form>
        "##;
        let field = FieldDeclaration::parse(xml).unwrap();

        assert!(field.parent);
        assert_eq!(field.extension.as_deref(), Some("com_joomgallery"));
        assert_eq!(field.published, vec![1, 2, 0]);
        assert_eq!(
            field.languages,
            Some(vec!["de-DE".to_string(), "*".to_string()])
        );
        assert!(field.allow_add());
        assert_eq!(field.custom_prefix(), "#new#");
        assert_eq!(field.show_root, Some(true));
        assert!(field.refresh_enabled);
        assert_eq!(field.refresh_cat_id, "catid");
        assert_eq!(field.refresh_section, "images");

        assert_eq!(field.options.len(), 2);
        assert_eq!(field.options[0].value, "");
        assert_eq!(field.options[0].text, "JSELECT");
        assert!(field.options[1].disabled);
        assert_eq!(field.options[1].class.as_deref(), Some("muted"));
    }

    #[test]
    fn test_show_root_false() {
        let field =
            FieldDeclaration::parse(r#"<field name="catid" show_root="false"/>"#).unwrap();
        assert_eq!(field.show_root, Some(false));
    }

    #[test]
    fn test_flag_parsing() {
        assert!(parse_flag("true", "allowAdd"));
        assert!(parse_flag("1", "allowAdd"));
        assert!(parse_flag("allowAdd", "allowAdd"));
        assert!(!parse_flag("false", "allowAdd"));
        assert!(!parse_flag("yes", "allowAdd"));
        assert!(!parse_flag("TRUE", "allowAdd"));
    }

    #[test]
    fn test_setters_coerce() {
        let mut field = FieldDeclaration::parse(r#"<field name="catid" allowAdd="0"/>"#).unwrap();
        assert!(!field.allow_add());

        field.set_allow_add("allowAdd");
        assert!(field.allow_add());
        field.set_allow_add("off");
        assert!(!field.allow_add());

        field.set_custom_prefix("new:");
        assert_eq!(field.custom_prefix(), "new:");
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let err = FieldDeclaration::parse(r#"<field type="jgcategorydropdown"/>"#).unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_malformed_xml_is_rejected() {
        assert!(FieldDeclaration::parse("<field name=").is_err());
    }
}
