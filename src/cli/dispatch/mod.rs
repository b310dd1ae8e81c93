use crate::{
    cli::actions::Action,
    config::{AppConfig, ConfigOverrides},
};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Turns parsed arguments into the action to run and the client configuration.
pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, AppConfig)> {
    let config = AppConfig::load(overrides(matches))?;

    let (name, sub_m) = matches.subcommand().context("missing subcommand")?;

    let action = match name {
        "login" => Action::Login {
            username: required(sub_m, "username")?,
            password: SecretString::from(required(sub_m, "password")?),
        },
        "register" => Action::Register {
            username: required(sub_m, "username")?,
            password: SecretString::from(required(sub_m, "password")?),
        },
        "logout" => Action::Logout,
        "status" => Action::Status,
        "whoami" => Action::Whoami,
        "navigate" => Action::Navigate {
            path: required(sub_m, "path")?,
        },
        "get" => Action::Get {
            path: required(sub_m, "path")?,
        },
        other => anyhow::bail!("unknown subcommand: {other}"),
    };

    Ok((action, config))
}

fn overrides(matches: &clap::ArgMatches) -> ConfigOverrides {
    ConfigOverrides {
        api_base_url: matches.get_one::<String>("api-url").cloned(),
        timeout_ms: matches.get_one::<u64>("timeout-ms").copied(),
        storage_path: matches.get_one::<String>("storage").cloned(),
    }
}

fn required(matches: &clap::ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("missing required argument: --{name}"))
}
