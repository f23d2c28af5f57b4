//! The `register`, `login`, and `profile` commands.

use std::path::PathBuf;

use anyhow::Result;

use gyandarshak_client::config::TOKEN_ENV;
use gyandarshak_core::model::{looks_like_email, Profile, ProfileUpdate, Registration};
use gyandarshak_core::CounsellingApi;

use super::{api_error, or_dash, Context};

pub async fn register(
    config_path: Option<PathBuf>,
    full_name: String,
    email: String,
    phone: Option<String>,
    password: String,
) -> Result<()> {
    let registration = Registration {
        full_name: full_name.trim().to_string(),
        email: email.trim().to_string(),
        phone: phone.filter(|p| !p.trim().is_empty()),
        password,
    };
    let problems = registration.problems();
    anyhow::ensure!(problems.is_empty(), "{}", problems.join(" "));

    let ctx = Context::load(config_path)?;
    let user = ctx.api.register(&registration).await.map_err(api_error)?;

    println!("Registered {} <{}> as {}.", user.full_name, user.email, user.role);
    println!("Next: gyandarshak login --email {} --password ...", user.email);
    Ok(())
}

pub async fn login(config_path: Option<PathBuf>, email: String, password: String) -> Result<()> {
    anyhow::ensure!(
        looks_like_email(email.trim()),
        "Enter a valid email address."
    );
    anyhow::ensure!(!password.is_empty(), "Password is required.");

    let ctx = Context::load(config_path)?;
    let token = ctx
        .api
        .login(email.trim(), &password)
        .await
        .map_err(api_error)?;

    println!("{}", token.access_token);
    eprintln!("Logged in. Use the token with: export {TOKEN_ENV}=<token>");
    Ok(())
}

pub async fn show_profile(config_path: Option<PathBuf>) -> Result<()> {
    let ctx = Context::load(config_path)?;
    let credential = ctx.config.require_credential()?;
    let profile = ctx.api.profile(&credential).await.map_err(api_error)?;
    print!("{}", render_profile(&profile));
    Ok(())
}

pub async fn update_profile(config_path: Option<PathBuf>, update: ProfileUpdate) -> Result<()> {
    anyhow::ensure!(!update.is_empty(), "nothing to update: pass at least one field");

    let ctx = Context::load(config_path)?;
    let credential = ctx.config.require_credential()?;
    let profile = ctx
        .api
        .update_profile(&credential, &update)
        .await
        .map_err(api_error)?;

    println!("Profile updated.");
    print!("{}", render_profile(&profile));
    Ok(())
}

fn render_profile(profile: &Profile) -> String {
    let details = profile.profile.clone().unwrap_or_default();
    let rows = [
        ("Name", profile.full_name.as_str()),
        ("Email", profile.email.as_str()),
        ("Phone", or_dash(profile.phone.as_deref())),
        ("State", or_dash(details.state.as_deref())),
        ("District", or_dash(details.district.as_deref())),
        ("Class", or_dash(details.class_level.as_deref())),
        ("Stream interest", or_dash(details.stream_interest.as_deref())),
        ("Target field", or_dash(details.target_field.as_deref())),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        out.push_str(&format!("{label:<16} {value}\n"));
    }
    out
}
