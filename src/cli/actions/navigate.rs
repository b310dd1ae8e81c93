use crate::{
    app::App,
    cli::actions::{print_json, Action},
    features::auth,
    routes::navigator::Navigation,
};
use anyhow::{bail, Result};
use tracing::warn;

/// Handle the navigate action
pub async fn handle(action: Action, app: &App) -> Result<()> {
    let path = match action {
        Action::Navigate { path } => path,
        other => bail!("not a navigate action: {other:?}"),
    };

    let navigation = navigate(app, &path).await?;
    print_json(&navigation)
}

/// Loads the profile behind the stored credential, then runs the guard.
///
/// Only the credential survives between runs, so the admin flag has to come
/// from `/auth/me`. A rejected credential logs out and the guard sees an
/// anonymous session; any other failure leaves the profile empty.
pub async fn navigate(app: &App, path: &str) -> Result<Navigation> {
    if app.session().is_authenticated() {
        if let Err(err) = auth::refresh_profile(app.api(), app.session()).await {
            if !err.is_auth_rejected() {
                warn!("could not load the profile: {err}");
            }
        }
    }

    let mut navigator = app.navigator()?;
    Ok(navigator.navigate(path)?)
}
