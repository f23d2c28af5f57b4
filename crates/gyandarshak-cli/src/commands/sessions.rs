//! The `sessions` commands.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::{Cell, Table};

use gyandarshak_core::model::{SessionRequest, SessionRequestDraft};
use gyandarshak_core::CounsellingApi;

use super::{api_error, or_dash, Context};

pub async fn request(config_path: Option<PathBuf>, draft: SessionRequestDraft) -> Result<()> {
    check_preferred_date(draft.preferred_date, chrono::Local::now().date_naive())?;

    let ctx = Context::load(config_path)?;
    let credential = ctx.config.require_credential()?;
    let created = ctx
        .api
        .request_session(&credential, &draft)
        .await
        .map_err(api_error)?;

    println!("Your request has been sent. You will be contacted soon.");
    println!(
        "Request #{} for {} is {}.",
        created.id,
        created.preferred_date.format("%d %b %Y"),
        created.status
    );
    Ok(())
}

pub async fn list(config_path: Option<PathBuf>) -> Result<()> {
    let ctx = Context::load(config_path)?;
    let credential = ctx.config.require_credential()?;
    let requests = ctx.api.my_sessions(&credential).await.map_err(api_error)?;

    if requests.is_empty() {
        println!("No requests yet.");
    } else {
        println!("{}", session_table(&requests));
    }
    Ok(())
}

/// Today is accepted; earlier dates are not.
fn check_preferred_date(date: NaiveDate, today: NaiveDate) -> Result<()> {
    anyhow::ensure!(date >= today, "Date cannot be in the past");
    Ok(())
}

fn session_table(requests: &[SessionRequest]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Date", "Time", "Mode", "Status", "Note"]);

    for r in requests {
        table.add_row(vec![
            Cell::new(r.id),
            Cell::new(r.preferred_date.format("%d %b %Y")),
            Cell::new(or_dash(r.preferred_time.as_deref())),
            Cell::new(or_dash(r.mode.as_deref())),
            Cell::new(&r.status),
            Cell::new(or_dash(r.note.as_deref())),
        ]);
    }
    table
}
