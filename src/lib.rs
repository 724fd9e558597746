//! yaml-readme: generate documents from YAML metadata files via templates.
//!
//! A template file's first line may carry a `#!yaml-readme` directive
//! describing the generator invocation and the output destination. The
//! directive module translates that line into a command string and an
//! output path; the runner module executes the translated command without
//! leaving the process.

pub mod collect;
pub mod directive;
pub mod functions;
pub mod model;
pub mod render;
pub mod runner;

use std::path::Path;

use anyhow::{Context as _, Result};
use tracing::debug;

pub use directive::{translate, DirectiveError, Translation, MARKER};
pub use model::GenerateOptions;
pub use runner::{CommandRunner, InProcessRunner};

/// Outcome of running a file's directive.
#[derive(Debug)]
pub struct RunOutcome {
    pub translation: Translation,
    /// The rendered document, present when the directive named no output
    /// path and the caller is expected to display it.
    pub document: Option<String>,
}

/// Generate a document from YAML metadata.
///
/// Collects the items matching the pattern, sorts them when a sort key is
/// set, and renders them through the template.
pub fn generate(opts: &GenerateOptions) -> Result<String> {
    let mut items = collect::collect_items(&opts.pattern)?;
    if !opts.sort_by.is_empty() {
        collect::sort_items(&mut items, &opts.sort_by);
    }
    render::render(opts, &items)
}

/// Run the directive carried on the first line of `path`.
///
/// The file itself becomes the `-t` template target; `base_dir` is prefixed
/// to the directive's relative paths. The rendered document is written to
/// the directive's output path, or handed back when the directive names
/// none.
pub async fn run_file(
    path: &Path,
    base_dir: &str,
    runner: &dyn CommandRunner,
) -> Result<RunOutcome> {
    let metadata = directive::read_directive(path)?.ok_or_else(|| {
        anyhow::anyhow!(
            "{} does not start with a `{}` directive",
            path.display(),
            MARKER.trim_end()
        )
    })?;

    let translation = translate(&metadata, base_dir, &path.display().to_string())?;
    debug!("running translated command: {}", translation.command);

    let document = runner.run(&translation).await?;

    if translation.output.is_empty() {
        return Ok(RunOutcome {
            translation,
            document: Some(document),
        });
    }

    std::fs::write(&translation.output, &document)
        .with_context(|| format!("failed to write {}", translation.output))?;
    Ok(RunOutcome {
        translation,
        document: None,
    })
}
