use anyhow::Result;
use gadgetguide::{
    app::App,
    cli::{actions, actions::Action, start},
};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let (action, config) = start()?;

    let app = App::new(config)?;

    // Handle the action
    match action {
        Action::Navigate { .. } => actions::navigate::handle(action, &app).await?,
        Action::Get { .. } => actions::request::handle(action, &app).await?,
        _ => actions::session::handle(action, &app).await?,
    }

    Ok(())
}
