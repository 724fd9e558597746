//! Shared data types for collection and generation.

use clap::{ArgAction, Parser};
use serde_json::{Map, Value};

/// One YAML metadata file, parsed and decorated.
pub type Item = Map<String, Value>;

/// Variables injected into every item during collection.
pub const ITEM_VARIABLES: &[&str] = &["filename", "parentname", "fullpath"];

/// Options controlling a generation run.
///
/// This is also the argv surface a translated directive command is re-parsed
/// through, which is why the short flags match the directive flags.
#[derive(Debug, Clone, Parser)]
#[command(name = "yaml-readme")]
pub struct GenerateOptions {
    /// Glob pattern locating the YAML metadata files
    #[arg(long, short = 'p', default_value = "items/*.yaml")]
    pub pattern: String,

    /// Template file the document is rendered from
    #[arg(long, short = 't', default_value = "README.tpl")]
    pub template: String,

    /// Include a notice header on top of the generated document
    #[arg(
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub include_header: bool,

    /// Sort items by this field; prefix the field with '!' to reverse the order
    #[arg(long, default_value = "")]
    pub sort_by: String,

    /// Group items by this field
    #[arg(long, default_value = "")]
    pub group_by: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            pattern: "items/*.yaml".to_string(),
            template: "README.tpl".to_string(),
            include_header: true,
            sort_by: String::new(),
            group_by: String::new(),
        }
    }
}
