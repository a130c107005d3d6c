//! Optional login screen in front of the form.

use formpilot_config::{LoginConfig, TimingConfig};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ScopeError;
use crate::scope::FormPage;
use crate::settle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoginOutcome {
    /// Credentials typed and the form submitted.
    Submitted,
    /// No login field on the page.
    NotRequired,
    /// Login field present but no credentials configured.
    MissingCredentials,
}

fn id_selector(id: &str) -> String {
    format!("[id=\"{}\"]", id.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Log in through the main document when its user field is present.
pub async fn login_if_present(
    page: &dyn FormPage,
    login: &LoginConfig,
    timing: &TimingConfig,
) -> Result<LoginOutcome, ScopeError> {
    let contexts = page.contexts().await?;
    let Some(main) = contexts.first() else {
        return Ok(LoginOutcome::NotRequired);
    };

    let Some(user_field) = main.find_by_selector(&id_selector(&login.user_field_id)).await? else {
        info!("No login form, assuming an authenticated session");
        return Ok(LoginOutcome::NotRequired);
    };
    let (Some(username), Some(password)) = (login.username.as_deref(), login.password.as_deref()) else {
        warn!("Login form present but no credentials configured");
        return Ok(LoginOutcome::MissingCredentials);
    };
    if !login.has_credentials() {
        warn!("Login form present but credentials are empty");
        return Ok(LoginOutcome::MissingCredentials);
    }

    main.type_text(user_field, username).await?;
    let password_field = main
        .find_by_selector(&id_selector(&login.password_field_id))
        .await?
        .ok_or_else(|| ScopeError::NotFound(format!("password field #{}", login.password_field_id)))?;
    main.type_text(password_field, password).await?;

    let submit = main
        .find_by_selector(&login.submit_selector)
        .await?
        .ok_or_else(|| ScopeError::NotFound(format!("submit control {}", login.submit_selector)))?;
    main.click(submit).await?;
    info!(user = username, "Login submitted");

    settle(timing.login_settle_ms).await;
    page.wait_for_load().await?;
    Ok(LoginOutcome::Submitted)
}
