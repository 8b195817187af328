use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::field::{FieldDeclaration, FieldValue, RequestContext};
use crate::i18n::Catalog;
use crate::messages::{MessageLevel, MessageLog};
use crate::provider::CategoryOptionsProvider;
use crate::render::SelectRenderer;
use crate::store::{self, SqliteCategoryStore};

#[derive(Args, Debug, Clone)]
pub struct FieldArgs {
    /// Path to the XML file holding the <field/> declaration
    #[arg(short, long)]
    pub field: PathBuf,
    /// Current field value; repeat for multi-valued fields
    #[arg(short, long)]
    pub value: Vec<String>,
    /// Request variable as key=value (e.g. option=com_joomgallery, view=category, id=7)
    #[arg(short, long, value_parser = parse_key_val)]
    pub request: Vec<(String, String)>,
    /// SQLite database with the category table (overrides the config file)
    #[arg(long)]
    pub db: Option<PathBuf>,
    /// Config file to use instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Markup,
    Json,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid request variable '{}', expected key=value", s))?;
    Ok((key.to_string(), value.to_string()))
}

fn field_value(values: &[String]) -> Option<FieldValue> {
    match values {
        [] => None,
        [single] => Some(FieldValue::Single(single.clone())),
        many => Some(FieldValue::Multiple(many.to_vec())),
    }
}

pub async fn field_command(args: FieldArgs, output: Output) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let xml = fs::read_to_string(&args.field)
        .with_context(|| format!("Failed to read field declaration: {:?}", args.field))?;
    let field = FieldDeclaration::parse(&xml)?;

    let db_path = args
        .db
        .clone()
        .or_else(|| config.database.clone())
        .context("No database given; pass --db or set `database` in the config file")?;
    let store = SqliteCategoryStore::new(store::connect(&db_path).await?);

    let translator = Catalog::with_overrides(&config.translations);
    let messages = MessageLog::new();
    let provider = CategoryOptionsProvider::new(&store, &config.access, &translator, &messages)
        .with_table(&config.table);

    let request: HashMap<String, String> = args.request.iter().cloned().collect();
    let value = field_value(&args.value);
    let context = RequestContext::derive(&field, value.as_ref(), &request, &config.component);

    match output {
        Output::Markup => {
            let markup = provider
                .build_input_markup(&field, value.as_ref(), &context, &SelectRenderer)
                .await?;
            print!("{}", markup);
        }
        Output::Json => {
            let options = provider.build_options(&field, &context).await;
            println!(
                "{}",
                serde_json::to_string_pretty(&options).context("Failed to serialize options")?
            );
        }
    }

    for message in messages.drain() {
        let label = format!("[{}]", message.level);
        let label = match message.level {
            MessageLevel::Error => label.as_str().red().bold(),
            MessageLevel::Warning => label.as_str().yellow().bold(),
            _ => label.as_str().cyan(),
        };
        eprintln!("{} {}", label, message.text);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("view=category").unwrap(),
            ("view".to_string(), "category".to_string())
        );
        assert_eq!(parse_key_val("id=").unwrap(), ("id".to_string(), String::new()));
        assert!(parse_key_val("view").is_err());
    }

    #[test]
    fn test_field_value() {
        assert_eq!(field_value(&[]), None);
        assert_eq!(
            field_value(&["3".to_string()]),
            Some(FieldValue::Single("3".to_string()))
        );
        assert_eq!(
            field_value(&["3".to_string(), "4".to_string()]),
            Some(FieldValue::Multiple(vec!["3".to_string(), "4".to_string()]))
        );
    }
}
