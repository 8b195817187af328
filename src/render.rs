//! Layout data of the dropdown and the renderer seam

use anyhow::Result;
use serde::Serialize;

use crate::field::{FieldOption, FieldValue};

/// Layout the category dropdown is rendered with
pub const CATEGORY_EDIT_LAYOUT: &str = "joomla.form.field.categoryedit";

/// Which layout to render and from where the renderer resolves it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutTarget {
    pub layout: String,
    pub component: String,
    /// 0 = site, 1 = administrator
    pub client: u8,
}

impl LayoutTarget {
    /// The category edit layout of the categories component, backend client
    pub fn category_edit() -> Self {
        Self {
            layout: CATEGORY_EDIT_LAYOUT.to_string(),
            component: "com_categories".to_string(),
            client: 1,
        }
    }
}

/// Data record passed to the category edit layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEditLayout {
    pub name: String,
    pub id: String,
    pub class: String,
    pub required: bool,
    pub value: Option<FieldValue>,
    pub options: Vec<FieldOption>,
    pub allow_custom: bool,
    pub custom_prefix: String,
    pub refresh_page: bool,
    pub refresh_cat_id: String,
    pub refresh_section: String,
}

pub trait LayoutRenderer: Send + Sync {
    fn render(&self, target: &LayoutTarget, data: &CategoryEditLayout) -> Result<String>;
}

/// Renders the layout data as a plain `<select>` element
#[derive(Debug, Clone, Default)]
pub struct SelectRenderer;

impl LayoutRenderer for SelectRenderer {
    fn render(&self, target: &LayoutTarget, data: &CategoryEditLayout) -> Result<String> {
        log::debug!(
            "Rendering {} options with {} ({}, client {})",
            data.options.len(),
            target.layout,
            target.component,
            target.client
        );

        let mut generator = SelectGenerator::new();
        generator.generate(data);
        Ok(generator.buffer)
    }
}

/// Markup generation helper struct
#[derive(Debug)]
struct SelectGenerator {
    indent_level: usize,
    buffer: String,
}

impl SelectGenerator {
    fn new() -> Self {
        Self {
            indent_level: 0,
            buffer: String::new(),
        }
    }

    fn generate(&mut self, data: &CategoryEditLayout) {
        let select = self.select_tag(data);
        self.add_line(&select);
        self.indent();
        for option in &data.options {
            let selected = data
                .value
                .as_ref()
                .is_some_and(|value| value.contains(&option.value()));
            let line = self.option_tag(option, selected);
            self.add_line(&line);
        }
        self.unindent();
        self.add_line("</select>");
    }

    fn select_tag(&self, data: &CategoryEditLayout) -> String {
        let mut tag = format!(
            "<select id=\"{}\" name=\"{}\"",
            self.escape(&data.id),
            self.escape(&format!("jform[{}]", data.name))
        );

        let class = if data.class.is_empty() {
            "form-select".to_string()
        } else {
            format!("form-select {}", data.class)
        };
        tag.push_str(&format!(" class=\"{}\"", self.escape(&class)));

        if data.required {
            tag.push_str(" required");
        }
        if data.allow_custom {
            tag.push_str(" data-allow-custom=\"true\"");
            tag.push_str(&format!(
                " data-custom-prefix=\"{}\"",
                self.escape(&data.custom_prefix)
            ));
        }
        if data.refresh_page {
            tag.push_str(" data-refresh-page=\"true\"");
            tag.push_str(&format!(
                " data-refresh-cat-id=\"{}\" data-refresh-section=\"{}\"",
                self.escape(&data.refresh_cat_id),
                self.escape(&data.refresh_section)
            ));
        }

        tag.push('>');
        tag
    }

    fn option_tag(&self, option: &FieldOption, selected: bool) -> String {
        let mut tag = format!("<option value=\"{}\"", self.escape(&option.value()));
        if let Some(class) = option.class() {
            tag.push_str(&format!(" class=\"{}\"", self.escape(class)));
        }
        if option.disabled() {
            tag.push_str(" disabled");
        }
        if selected {
            tag.push_str(" selected");
        }
        tag.push_str(&format!(">{}</option>", self.escape(option.text())));
        tag
    }

    fn add_line(&mut self, line: &str) {
        self.buffer.push_str(&"  ".repeat(self.indent_level));
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn unindent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Escape HTML special characters
    fn escape(&self, text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#039;")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::StaticOption;

    fn layout(options: Vec<FieldOption>) -> CategoryEditLayout {
        CategoryEditLayout {
            name: "catid".to_string(),
            id: "jform_catid".to_string(),
            class: String::new(),
            required: false,
            value: Some(FieldValue::Single("2".to_string())),
            options,
            allow_custom: false,
            custom_prefix: String::new(),
            refresh_page: false,
            refresh_cat_id: String::new(),
            refresh_section: String::new(),
        }
    }

    #[test]
    fn test_renders_select_with_selected_option() {
        let data = layout(vec![
            FieldOption::Static(StaticOption::new("", "- Select -")),
            FieldOption::Static(StaticOption::new("2", "Cats & <Dogs>")),
        ]);

        let html = SelectRenderer
            .render(&LayoutTarget::category_edit(), &data)
            .unwrap();

        assert_eq!(
            html,
            "<select id=\"jform_catid\" name=\"jform[catid]\" class=\"form-select\">\n\
             \x20\x20<option value=\"\">- Select -</option>\n\
             \x20\x20<option value=\"2\" selected>Cats &amp; &lt;Dogs&gt;</option>\n\
             </select>\n"
        );
    }

    #[test]
    fn test_custom_and_refresh_attributes() {
        let mut data = layout(Vec::new());
        data.allow_custom = true;
        data.custom_prefix = "#new#".to_string();
        data.refresh_page = true;
        data.refresh_cat_id = "catid".to_string();
        data.refresh_section = "images".to_string();
        data.required = true;

        let html = SelectRenderer
            .render(&LayoutTarget::category_edit(), &data)
            .unwrap();

        assert!(html.contains(" required"));
        assert!(html.contains("data-allow-custom=\"true\" data-custom-prefix=\"#new#\""));
        assert!(html.contains("data-refresh-cat-id=\"catid\" data-refresh-section=\"images\""));
    }

    #[test]
    fn test_layout_serializes_camel_case() {
        let json = serde_json::to_value(layout(Vec::new())).unwrap();
        assert_eq!(json["allowCustom"], false);
        assert_eq!(json["refreshCatId"], "");
        assert_eq!(json["value"], "2");
    }

    #[test]
    fn test_category_edit_target() {
        let target = LayoutTarget::category_edit();
        assert_eq!(target.layout, "joomla.form.field.categoryedit");
        assert_eq!(target.component, "com_categories");
        assert_eq!(target.client, 1);
    }
}
