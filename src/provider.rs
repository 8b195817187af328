//! Builds the option list of the category dropdown
//!
//! The flow for one render is: query the visible part of the nested set,
//! format labels by depth, drop what the user may not pick, add root options
//! when editing a category whose root row is not offered, and finally put the
//! statically declared options in front.

use anyhow::Result;

use crate::access::{AccessControl, Capability, CheckOptions, category_asset};
use crate::field::{
    CategoryOption, FieldDeclaration, FieldOption, FieldValue, RequestContext, StaticOption,
};
use crate::i18n::{ROOT, ROOT_PARENT, Translator};
use crate::messages::{MessageLevel, MessageQueue};
use crate::model::{ALL_LANGUAGES, CategoryNode, ROOT_CATEGORY_ID};
use crate::query::{Filter, FilterValue, OrderBy, QueryBuilder, SelectQuery};
use crate::render::{CategoryEditLayout, LayoutRenderer, LayoutTarget};
use crate::store::{CategoryStore, DEFAULT_TABLE};

/// Per-request option builder wired to the host's collaborators
pub struct CategoryOptionsProvider<'a> {
    store: &'a dyn CategoryStore,
    access: &'a dyn AccessControl,
    translator: &'a dyn Translator,
    messages: &'a dyn MessageQueue,
    table: String,
}

impl<'a> CategoryOptionsProvider<'a> {
    pub fn new(
        store: &'a dyn CategoryStore,
        access: &'a dyn AccessControl,
        translator: &'a dyn Translator,
        messages: &'a dyn MessageQueue,
    ) -> Self {
        Self {
            store,
            access,
            translator,
            messages,
            table: DEFAULT_TABLE.to_string(),
        }
    }

    /// Query a different category table
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Options for the dropdown: declared options first, then the categories
    /// the current user may pick, in tree order.
    ///
    /// A failing query is reported to the operator and the log; the result
    /// then holds only the declared options.
    pub async fn build_options(
        &self,
        field: &FieldDeclaration,
        context: &RequestContext,
    ) -> Vec<FieldOption> {
        let mut options: Vec<FieldOption> = field
            .options
            .iter()
            .map(|option| {
                FieldOption::Static(StaticOption {
                    text: self.translator.translate(&option.text),
                    ..option.clone()
                })
            })
            .collect();

        let nodes = match self.store.fetch_nodes(&self.category_query(context)).await {
            Ok(nodes) => nodes,
            Err(err) => {
                self.report(&err);
                return options;
            }
        };

        let root_label = self.translator.translate(ROOT_PARENT);
        let formatted = format_options(nodes, context.parent_mode, &root_label);
        let permitted = filter_by_permission(formatted, context, self.access);

        if needs_root_options(context, &permitted) {
            match self.root_options(context).await {
                Ok(root) => options.extend(root),
                Err(err) => self.report(&err),
            }
        }

        options.extend(permitted.into_iter().map(FieldOption::Category));
        options
    }

    /// Render the dropdown through the category edit layout
    pub async fn build_input_markup(
        &self,
        field: &FieldDeclaration,
        value: Option<&FieldValue>,
        context: &RequestContext,
        renderer: &dyn LayoutRenderer,
    ) -> Result<String> {
        let data = CategoryEditLayout {
            name: field.name.clone(),
            id: field.id.clone(),
            class: field.class.clone(),
            required: field.required,
            value: value.cloned(),
            options: self.build_options(field, context).await,
            allow_custom: field.allow_add(),
            custom_prefix: field.custom_prefix().to_string(),
            refresh_page: field.refresh_enabled,
            refresh_cat_id: field.refresh_cat_id.clone(),
            refresh_section: field.refresh_section.clone(),
        };

        renderer.render(&LayoutTarget::category_edit(), &data)
    }

    /// The category query for `context`, ordered by `lft`
    pub fn category_query(&self, context: &RequestContext) -> SelectQuery {
        let mut builder = QueryBuilder::new(&self.table, "a")
            .select_as("a.id", "value")
            .select_as("a.title", "text")
            .select_as("a.level", "level")
            .select_as("a.published", "published")
            .select_as("a.hidden", "hidden")
            .select_as("a.in_hidden", "in_hidden")
            .select_as("a.lft", "lft")
            .select_as("a.language", "language");

        if let Some(languages) = &context.languages {
            builder = builder.filter(Filter::is_in("a.language", languages));
        }

        builder = builder.filter(Filter::is_in("a.published", &context.published));

        if !self
            .access
            .check(Capability::Admin, None, CheckOptions::default())
        {
            builder = builder.filter(Filter::is_in(
                "a.access",
                self.access.authorized_view_levels(),
            ));
        }

        builder = builder.orderby(OrderBy::asc("a.lft"));

        // A category cannot move below itself: drop its whole subtree
        if context.parent_mode && context.current_id != 0 {
            builder = builder
                .left_join(&self.table, "p", Filter::eq("p.id", context.current_id))
                .filter(Filter::not(Filter::and(vec![
                    Filter::is_not_null("p.id"),
                    Filter::ge("a.lft", FilterValue::column("p.lft")),
                    Filter::le("a.rgt", FilterValue::column("p.rgt")),
                ])));
        }

        if context.show_root == Some(false) {
            builder = builder.filter(Filter::gt("a.level", 0));
        }

        builder.build()
    }

    fn placement_query(&self, id: i64) -> SelectQuery {
        QueryBuilder::new(&self.table, "a")
            .select_as("a.parent_id", "parent_id")
            .filter(Filter::eq("a.id", id))
            .build()
    }

    /// `Root` (value 0), followed by the root-parent label when the edited
    /// category sits directly below the root
    async fn root_options(&self, context: &RequestContext) -> Result<Vec<FieldOption>> {
        let placement = self
            .store
            .fetch_placement(&self.placement_query(context.current_id))
            .await?;

        let mut root = vec![FieldOption::Static(StaticOption::new(
            "0",
            self.translator.translate(ROOT),
        ))];

        if placement.is_some_and(|p| p.parent_id == ROOT_CATEGORY_ID) {
            root.push(FieldOption::Static(StaticOption::new(
                ROOT_CATEGORY_ID.to_string(),
                self.translator.translate(ROOT_PARENT),
            )));
        }

        Ok(root)
    }

    fn report(&self, err: &anyhow::Error) {
        let message = format!("{:#}", err);
        self.messages.enqueue(&message, MessageLevel::Warning);
        log::error!(target: "jerror", "{}", message);
    }
}

/// `"- "` once per level below the first
fn indent(level: i64) -> String {
    "- ".repeat((level - 1).max(0) as usize)
}

/// Turn query rows into options with display text.
///
/// Hidden or unpublished categories are bracketed, the root never is. In
/// parent mode the root row is labelled with `root_label`.
pub fn format_options(
    nodes: Vec<CategoryNode>,
    parent_mode: bool,
    root_label: &str,
) -> Vec<CategoryOption> {
    nodes
        .into_iter()
        .map(|node| {
            let title = if parent_mode && node.level == 0 {
                root_label.to_string()
            } else {
                node.title.clone()
            };

            let mut text = if node.is_visible() || node.level == 0 {
                format!("{}{}", indent(node.level), title)
            } else {
                format!("{}[{}]", indent(node.level), title)
            };

            if node.language != ALL_LANGUAGES {
                text.push_str(&format!(" ({})", node.language));
            }

            CategoryOption {
                value: node.id,
                text,
                level: node.level,
                published: node.published,
                hidden: node.hidden,
                in_hidden: node.in_hidden,
                lft: node.lft,
                language: node.language,
            }
        })
        .collect()
}

/// Keep only the categories the user may put the item (or category) into.
///
/// Root rows always stay. For a new item the user needs `core.create` on the
/// category. For an existing one, leaving the current placement additionally
/// needs `core.edit.state` on the current category; the current placement
/// itself always stays.
pub fn filter_by_permission(
    options: Vec<CategoryOption>,
    context: &RequestContext,
    access: &dyn AccessControl,
) -> Vec<CategoryOption> {
    let can_create_in = |id: i64| {
        let asset = category_asset(&context.extension, id);
        access.check(
            Capability::Create,
            Some(asset.as_str()),
            CheckOptions {
                target_id: Some(id),
                strict: true,
            },
        )
    };

    if context.current_id == 0 {
        return options
            .into_iter()
            .filter(|option| option.level == 0 || can_create_in(option.value))
            .collect();
    }

    // Items stay in their category, categories under their parent
    let anchor = match context.current_parent {
        Some(parent) => parent,
        None => context.current_id,
    };

    let current_asset = category_asset(&context.extension, context.current_id);
    let can_change_state =
        access.check(Capability::EditState, Some(current_asset.as_str()), CheckOptions::default());

    options
        .into_iter()
        .filter(|option| {
            option.level == 0
                || option.value == anchor
                || (can_change_state && can_create_in(option.value))
        })
        .collect()
}

/// Root options are added only when editing an existing category, the root
/// was explicitly requested and no root row made it through the filters
fn needs_root_options(context: &RequestContext, options: &[CategoryOption]) -> bool {
    context.parent_mode
        && context.current_id != 0
        && context.show_root == Some(true)
        && !options.iter().any(|option| option.level == 0)
}
