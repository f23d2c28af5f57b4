//! The `gyandarshak ask` command.

use std::path::PathBuf;

use anyhow::Result;

use gyandarshak_core::CounsellingApi;

use super::{api_error, Context};

pub async fn execute(config_path: Option<PathBuf>, question: String) -> Result<()> {
    let question = question.trim();
    anyhow::ensure!(!question.is_empty(), "question must not be empty");

    let ctx = Context::load(config_path)?;
    let response = ctx.api.ask(question).await.map_err(api_error)?;
    println!("{}", response.answer);
    Ok(())
}
