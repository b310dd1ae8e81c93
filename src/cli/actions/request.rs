use crate::{
    app::App,
    cli::actions::{print_json, Action},
};
use anyhow::{bail, Result};
use serde_json::Value;
use tracing::warn;

/// Handle the get action: an authenticated GET whose JSON body is printed.
/// A rejected credential ends the local session.
pub async fn handle(action: Action, app: &App) -> Result<()> {
    let path = match action {
        Action::Get { path } => path,
        other => bail!("not a get action: {other:?}"),
    };

    match app.api().get_json::<Value>(&path).await {
        Ok(body) => print_json(&body),
        Err(err) if err.is_auth_rejected() => {
            warn!("credential rejected by the backend, logging out");
            app.session().logout()?;
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}
