use crate::{
    app::App,
    cli::actions::{print_json, Action},
    features::auth::{self, RegisterOutcome},
};
use anyhow::{bail, Result};
use serde_json::json;
use tracing::info;

/// Handle the session actions: login, register, logout, status and whoami
pub async fn handle(action: Action, app: &App) -> Result<()> {
    match action {
        Action::Login { username, password } => {
            let snapshot = auth::login(app.api(), app.session(), &username, &password).await?;
            print_json(&snapshot)?;
        }
        Action::Register { username, password } => {
            match auth::register(app.api(), app.session(), &username, &password).await? {
                RegisterOutcome::SignedIn(snapshot) => print_json(&snapshot)?,
                RegisterOutcome::Registered(profile) => print_json(&json!({
                    "registered": true,
                    "id": profile.id,
                    "username": profile.username,
                }))?,
            }
        }
        Action::Logout => {
            app.session().logout()?;
            info!("logged out");
            print_json(&app.session().snapshot())?;
        }
        Action::Status => {
            app.session().credential_changed()?;
            print_json(&app.session().snapshot())?;
        }
        Action::Whoami => {
            if !app.session().is_authenticated() {
                bail!("Not logged in.");
            }
            let snapshot = auth::refresh_profile(app.api(), app.session()).await?;
            print_json(&snapshot)?;
        }
        other => bail!("not a session action: {other:?}"),
    }

    Ok(())
}
