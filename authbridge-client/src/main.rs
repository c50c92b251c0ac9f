//! # AuthBridge Client Shell
//!
//! Command-line forms over the AuthBridge API: registration, login, logout,
//! and the authenticated profile view and update. The session token persists
//! in a file between invocations.
//!
//! ## Usage
//!
//! ```bash
//! authbridge-client register <username> <password>
//! authbridge-client login <username> <password>
//! authbridge-client logout
//! authbridge-client profile show
//! authbridge-client profile update [--age <n|null>] [--date-of-birth <date|null>] [--contact <text|null>]
//! ```

use authbridge_client::config::ClientConfig;
use authbridge_client::error::ClientError;
use authbridge_client::routes::{self, Route};
use authbridge_client::services::auth::AuthService;
use authbridge_client::services::profile::{ProfileService, ProfileUpdate, ProfileView};
use authbridge_client::token_store::TokenStore;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "\
Usage:
  authbridge-client register <username> <password>
  authbridge-client login <username> <password>
  authbridge-client logout
  authbridge-client profile show
  authbridge-client profile update [--age <n|null>] [--date-of-birth <date|null>] [--contact <text|null>]";

/// Parsed command line
#[derive(Debug, PartialEq)]
enum Command {
    Register { username: String, password: String },
    Login { username: String, password: String },
    Logout,
    ProfileShow,
    ProfileUpdate(ProfileUpdate),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "authbridge_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let Some(command) = parse_command(&args) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    run(&config, command).await?;
    Ok(())
}

async fn run(config: &ClientConfig, command: Command) -> Result<(), ClientError> {
    match command {
        Command::Register { username, password } => {
            let registered = AuthService::new(config)
                .register(&username, &password)
                .await?;
            println!("{} (user id {})", registered.message, registered.user_id);
        }
        Command::Login { username, password } => {
            AuthService::new(config).login(&username, &password).await?;
            println!("Logged in as {username}.");
        }
        Command::Logout => {
            AuthService::new(config).logout()?;
            println!("Logged out.");
        }
        Command::ProfileShow => {
            let profile = guarded(config)?.get().await?;
            print_profile(&profile);
        }
        Command::ProfileUpdate(update) => {
            let updated = guarded(config)?.update(&update).await?;
            println!("{}", updated.message);
            println!("Age:      {}", opt_i64(updated.profile.age));
            println!("Born:     {}", opt_str(&updated.profile.date_of_birth));
            println!("Contact:  {}", opt_str(&updated.profile.contact_information));
        }
    }

    Ok(())
}

/// Resolves the Profile route; without a stored token the guard sends the
/// user to Login instead of making a doomed request
fn guarded(config: &ClientConfig) -> Result<ProfileService, ClientError> {
    let has_token = TokenStore::new(&config.token_file).load()?.is_some();
    match routes::resolve(Some(Route::Profile), has_token) {
        Route::Profile => Ok(ProfileService::new(config)),
        _ => Err(ClientError::NotLoggedIn),
    }
}

fn print_profile(profile: &ProfileView) {
    println!("Username: {}", profile.username);
    println!("Age:      {}", opt_i64(profile.age));
    println!("Born:     {}", opt_str(&profile.date_of_birth));
    println!("Contact:  {}", opt_str(&profile.contact_information));
}

fn opt_i64(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |n| n.to_string())
}

fn opt_str(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

fn parse_command(args: &[String]) -> Option<Command> {
    let words: Vec<&str> = args.iter().map(String::as_str).collect();

    match words.as_slice() {
        ["register", username, password] => Some(Command::Register {
            username: username.to_string(),
            password: password.to_string(),
        }),
        ["login", username, password] => Some(Command::Login {
            username: username.to_string(),
            password: password.to_string(),
        }),
        ["logout"] => Some(Command::Logout),
        ["profile", "show"] => Some(Command::ProfileShow),
        ["profile", "update", rest @ ..] => parse_update(rest).map(Command::ProfileUpdate),
        _ => None,
    }
}

fn parse_update(args: &[&str]) -> Option<ProfileUpdate> {
    let mut update = ProfileUpdate::default();
    let mut words = args.iter();

    while let Some(flag) = words.next() {
        let raw = words.next()?;
        match *flag {
            "--age" => update.age = Some(age_value(raw)),
            "--date-of-birth" => update.date_of_birth = Some(text_value(raw)),
            "--contact" => update.contact_information = Some(text_value(raw)),
            _ => return None,
        }
    }

    Some(update)
}

/// `null` clears the field; a number goes through as a number; anything else
/// goes through as a string so the server's own message comes back
fn age_value(raw: &str) -> Value {
    if raw == "null" {
        Value::Null
    } else if let Ok(age) = raw.parse::<i64>() {
        Value::from(age)
    } else {
        Value::from(raw)
    }
}

/// `null` clears the field; anything else is sent as a string
fn text_value(raw: &str) -> Value {
    if raw == "null" {
        Value::Null
    } else {
        Value::from(raw)
    }
}
