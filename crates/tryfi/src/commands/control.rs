//! Collar control: LED toggle, LED color, lost-dog mode.

use tryfi_core::Client;

use crate::cli::{GlobalOpts, Toggle};
use crate::error::CliError;

/// Run a control call against a tracked pet.
///
/// The client answers `false` both for unknown pets and for absorbed
/// faults, so the pet is looked up first to tell them apart.
fn run(
    client: &mut Client,
    pet_id: &str,
    operation: &str,
    global: &GlobalOpts,
    call: impl FnOnce(&mut Client) -> bool,
) -> Result<(), CliError> {
    if client.find_pet_by_id(pet_id).is_none() {
        return Err(CliError::pet_not_found(pet_id));
    }
    if !call(client) {
        return Err(CliError::OperationFailed {
            operation: operation.into(),
            pet: pet_id.into(),
        });
    }
    if !global.quiet {
        eprintln!("✓ {operation} applied to {pet_id}");
    }
    Ok(())
}

pub fn led(client: &mut Client, pet: &str, state: Toggle, global: &GlobalOpts) -> Result<(), CliError> {
    let op = if state.enabled() { "LED on" } else { "LED off" };
    run(client, pet, op, global, |c| c.turn_pet_led(pet, state.enabled()))
}

pub fn led_color(
    client: &mut Client,
    pet: &str,
    code: i64,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let known = client
        .find_pet_by_id(pet)
        .map(|p| &p.device().available_colors)
        .filter(|colors| !colors.is_empty());
    if let Some(colors) = known {
        if !colors.iter().any(|c| c.code() == code) {
            let valid: Vec<String> = colors.iter().map(|c| c.code().to_string()).collect();
            return Err(CliError::Validation {
                field: "code".into(),
                reason: format!("collar supports color codes {}", valid.join(", ")),
            });
        }
    }
    run(client, pet, &format!("LED color {code}"), global, |c| {
        c.set_pet_led_color(pet, code)
    })
}

pub fn lost(client: &mut Client, pet: &str, state: Toggle, global: &GlobalOpts) -> Result<(), CliError> {
    let op = if state.enabled() { "Lost mode on" } else { "Lost mode off" };
    run(client, pet, op, global, |c| c.set_pet_lost_mode(pet, state.enabled()))
}
