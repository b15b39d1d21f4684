//! Command dispatch: bridges CLI args -> core client -> output formatting.

pub mod bases;
pub mod config_cmd;
pub mod control;
pub mod pets;
pub mod user;

use tracing::info;

use tryfi_core::Client;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Log in with the active profile and load every household entity.
pub fn connect(global: &GlobalOpts) -> Result<Client, CliError> {
    let cfg = tryfi_config::load_config()?;
    let name = active_profile_name(global, &cfg);

    let Some(profile) = cfg.profiles.get(&name) else {
        if cfg.profiles.is_empty() {
            return Err(CliError::NoConfig {
                path: tryfi_config::config_path().display().to_string(),
            });
        }
        let available: Vec<_> = cfg.profiles.keys().cloned().collect();
        return Err(CliError::ProfileNotFound {
            name,
            available: available.join(", "),
        });
    };

    let client_config = tryfi_config::profile_to_client_config(profile, &name, &cfg.defaults)?;
    let client = Client::connect(&client_config).map_err(|e| CliError::from_core(e, &name))?;
    info!(
        profile = %name,
        pets = client.pets().len(),
        bases = client.bases().len(),
        "connected"
    );
    Ok(client)
}

/// `--profile`, then the config's default, then `default`.
pub fn active_profile_name(global: &GlobalOpts, cfg: &tryfi_config::Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Dispatch a session-bound command to the appropriate handler.
pub fn dispatch(cmd: Command, client: &mut Client, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Pets(args) => pets::handle(client, args, global),
        Command::Bases(args) => bases::handle(client, args, global),
        Command::User => user::handle(client, global),
        Command::Led { pet, state } => control::led(client, &pet, state, global),
        Command::LedColor { pet, code } => control::led_color(client, &pet, code, global),
        Command::Lost { pet, state } => control::lost(client, &pet, state, global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
