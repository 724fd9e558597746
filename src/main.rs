use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use yaml_readme::model::{GenerateOptions, ITEM_VARIABLES};
use yaml_readme::runner::InProcessRunner;

#[derive(Parser, Debug)]
#[command(
    name = "yaml-readme",
    version,
    about = "Generate README files from YAML metadata via templates",
    long_about = "Generate README files from YAML metadata via templates.\n\n\
        Metadata lives in YAML files located by a glob pattern; each file\n\
        becomes one item the template can iterate, sort, and group. A\n\
        template may also carry a `#!yaml-readme` directive on its first\n\
        line describing its own invocation.\n\n\
        Examples:\n  \
        yaml-readme generate -p \"items/*.yaml\" -t README.tpl\n  \
        yaml-readme run docs/jobs.tpl\n  \
        yaml-readme directive docs/jobs.tpl\n  \
        yaml-readme functions"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a document from YAML metadata to stdout
    Generate {
        #[command(flatten)]
        options: GenerateOptions,
    },

    /// Run the directive on a file's first line
    #[command(long_about = "Run the directive on a file's first line.\n\n\
        The file's own path becomes the template target, and the rendered\n\
        document is written to the directive's --output path (stdout when\n\
        the directive names none).\n\n\
        Examples:\n  \
        yaml-readme run docs/jobs.tpl\n  \
        yaml-readme run docs/jobs.tpl --base-dir docs")]
    Run {
        /// Template file carrying a `#!yaml-readme` directive
        file: PathBuf,

        #[arg(
            long,
            short,
            help = "Directory prefixed to directive paths (defaults to the file's parent)"
        )]
        base_dir: Option<String>,
    },

    /// Translate a file's directive without running it
    #[command(long_about = "Translate a file's directive without running it.\n\n\
        Prints the command an external runner would execute and the output\n\
        path the generated document belongs at, as JSON.")]
    Directive {
        /// Template file carrying a `#!yaml-readme` directive
        file: PathBuf,

        #[arg(
            long,
            short,
            help = "Directory prefixed to directive paths (defaults to the file's parent)"
        )]
        base_dir: Option<String>,
    },

    /// List the template helper functions
    Functions,

    /// List the variables injected into every item
    Variables,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Generate { options } => {
            print!("{}", yaml_readme::generate(&options)?);
            Ok(ExitCode::SUCCESS)
        }

        Command::Run { file, base_dir } => {
            let base_dir = base_dir.unwrap_or_else(|| parent_dir(&file));
            let outcome = yaml_readme::run_file(&file, &base_dir, &InProcessRunner).await?;
            match outcome.document {
                Some(document) => print!("{document}"),
                None => eprintln!("Wrote {}", outcome.translation.output),
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Directive { file, base_dir } => {
            let base_dir = base_dir.unwrap_or_else(|| parent_dir(&file));
            let metadata = yaml_readme::directive::read_directive(&file)?.ok_or_else(|| {
                anyhow::anyhow!("{} carries no directive on its first line", file.display())
            })?;
            let translation =
                yaml_readme::translate(&metadata, &base_dir, &file.display().to_string())?;
            println!("{}", serde_json::to_string_pretty(&translation)?);
            Ok(ExitCode::SUCCESS)
        }

        Command::Functions => {
            for name in yaml_readme::functions::FUNCTION_NAMES {
                println!("{name}");
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Variables => {
            for name in ITEM_VARIABLES {
                println!("{name}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Directory of `file`, as the default base for directive paths.
fn parent_dir(file: &Path) -> String {
    file.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ".".to_string())
}
