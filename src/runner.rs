//! Execution boundary for translated directives.
//!
//! A translated directive is a command line an external runner could hand to
//! a shell; the in-process implementation re-parses that command line and
//! drives the generator directly instead, so nothing is ever spawned.

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use clap::Parser;

use crate::directive::Translation;
use crate::model::GenerateOptions;

/// Request/response boundary for executing a translated directive.
#[async_trait]
pub trait CommandRunner {
    /// Execute the invocation and return the rendered document.
    async fn run(&self, invocation: &Translation) -> Result<String>;
}

/// Runs translated commands inside this process.
pub struct InProcessRunner;

#[async_trait]
impl CommandRunner for InProcessRunner {
    async fn run(&self, invocation: &Translation) -> Result<String> {
        let argv = invocation.command.split_whitespace();
        let opts = GenerateOptions::try_parse_from(argv)
            .with_context(|| format!("not a runnable command: {}", invocation.command))?;
        crate::generate(&opts)
    }
}
