use crate::config::{DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_MS_STR};
use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

fn credential_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("username")
                .short('U')
                .long("username")
                .help("Account username")
                .env("GADGETGUIDE_USERNAME")
                .required(true),
        )
        .arg(
            Arg::new("password")
                .short('P')
                .long("password")
                .help("Account password")
                .env("GADGETGUIDE_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("gadgetguide")
        .about("GadgetGuide AI session client")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-url")
                .short('u')
                .long("api-url")
                .help("Backend API base URL")
                .default_value(DEFAULT_API_BASE_URL)
                .env("GADGETGUIDE_API_URL")
                .global(true),
        )
        .arg(
            Arg::new("timeout-ms")
                .long("timeout-ms")
                .help("Request timeout in milliseconds")
                .default_value(DEFAULT_TIMEOUT_MS_STR)
                .env("GADGETGUIDE_TIMEOUT_MS")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("storage")
                .short('s')
                .long("storage")
                .help("Credential storage file, default: ~/.gadgetguide/storage.json")
                .env("GADGETGUIDE_STORAGE")
                .global(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("GADGETGUIDE_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(credential_args(
            Command::new("login").about("Log in and store the access token"),
        ))
        .subcommand(credential_args(
            Command::new("register").about("Create an account"),
        ))
        .subcommand(Command::new("logout").about("Forget the stored access token"))
        .subcommand(Command::new("status").about("Show the current session"))
        .subcommand(Command::new("whoami").about("Fetch the profile for the stored token"))
        .subcommand(
            Command::new("navigate")
                .about("Run the route guard for a path and print where it lands")
                .arg(Arg::new("path").help("Route path, e.g. /chat").required(true)),
        )
        .subcommand(
            Command::new("get")
                .about("Send an authenticated GET request and print the JSON response")
                .arg(Arg::new("path").help("API path, e.g. /conversations/").required(true)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "gadgetguide");
        assert_eq!(
            command.get_about().unwrap().to_string(),
            "GadgetGuide AI session client"
        );
        assert_eq!(
            command.get_version().unwrap().to_string(),
            env!("CARGO_PKG_VERSION")
        );
    }

    #[test]
    fn test_login_args() {
        temp_env::with_vars(
            [
                ("GADGETGUIDE_USERNAME", None::<&str>),
                ("GADGETGUIDE_PASSWORD", None),
                ("GADGETGUIDE_API_URL", None),
                ("GADGETGUIDE_TIMEOUT_MS", None),
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "gadgetguide",
                    "login",
                    "--username",
                    "alice",
                    "--password",
                    "secret",
                    "--api-url",
                    "https://api.gadgetguide.test",
                ]);

                let (name, sub) = matches.subcommand().unwrap();
                assert_eq!(name, "login");
                assert_eq!(
                    sub.get_one::<String>("username").map(|s| s.to_string()),
                    Some("alice".to_string())
                );
                assert_eq!(
                    sub.get_one::<String>("password").map(|s| s.to_string()),
                    Some("secret".to_string())
                );
                assert_eq!(
                    sub.get_one::<String>("api-url").map(|s| s.to_string()),
                    Some("https://api.gadgetguide.test".to_string())
                );
                assert_eq!(sub.get_one::<u64>("timeout-ms").copied(), Some(5000));
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("GADGETGUIDE_API_URL", Some("http://backend:8000")),
                ("GADGETGUIDE_TIMEOUT_MS", Some("1500")),
                ("GADGETGUIDE_STORAGE", Some("/tmp/gg.json")),
                ("GADGETGUIDE_USERNAME", Some("bob")),
                ("GADGETGUIDE_PASSWORD", Some("pw")),
                ("GADGETGUIDE_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["gadgetguide", "register"]);
                assert_eq!(
                    matches.get_one::<String>("api-url").map(|s| s.to_string()),
                    Some("http://backend:8000".to_string())
                );
                assert_eq!(matches.get_one::<u64>("timeout-ms").copied(), Some(1500));
                assert_eq!(
                    matches.get_one::<String>("storage").map(|s| s.to_string()),
                    Some("/tmp/gg.json".to_string())
                );
                assert_eq!(matches.get_one::<u8>("verbosity").map(|s| *s), Some(2));

                let (name, sub) = matches.subcommand().unwrap();
                assert_eq!(name, "register");
                assert_eq!(
                    sub.get_one::<String>("username").map(|s| s.to_string()),
                    Some("bob".to_string())
                );
            },
        );
    }

    #[test]
    fn test_navigate_requires_path() {
        let result = new().try_get_matches_from(vec!["gadgetguide", "navigate"]);
        assert!(result.is_err());

        let matches = new()
            .try_get_matches_from(vec!["gadgetguide", "navigate", "/chat"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "navigate");
        assert_eq!(
            sub.get_one::<String>("path").map(|s| s.to_string()),
            Some("/chat".to_string())
        );
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let result = new().try_get_matches_from(vec!["gadgetguide", "status", "--timeout-ms", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_log_level_env() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("GADGETGUIDE_LOG_LEVEL", Some(level))], || {
                let command = new();
                let matches = command.get_matches_from(vec!["gadgetguide", "status"]);
                assert_eq!(
                    matches.get_one::<u8>("verbosity").map(|s| *s),
                    Some(index as u8)
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        // loop cover all possible value_parse
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("GADGETGUIDE_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["gadgetguide".to_string(), "status".to_string()];

                // Add the appropriate number of "-v" flags based on the index
                if index > 0 {
                    let v = format!("-{}", "v".repeat(index));
                    args.push(v);
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>("verbosity").map(|s| *s),
                    Some(index as u8)
                );
            });
        }
    }
}
