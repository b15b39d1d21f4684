//! Pet command handlers.

use std::fmt::Write as _;

use owo_colors::OwoColorize;
use tabled::Tabled;
use tryfi_core::{Client, Pet, Window};

use crate::cli::{GlobalOpts, PetsArgs, PetsCommand};
use crate::error::CliError;
use crate::output::{self, local_time, opt};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Breed")]
    breed: String,
    #[tabled(rename = "Battery")]
    battery: String,
    #[tabled(rename = "LED")]
    led: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Activity")]
    activity: String,
    #[tabled(rename = "Area")]
    area: String,
}

impl From<&Pet> for PetRow {
    fn from(p: &Pet) -> Self {
        let device = p.device();
        Self {
            id: p.id().to_owned(),
            name: p.name.clone(),
            breed: opt(p.breed.as_deref()),
            battery: device
                .battery_percent
                .map_or_else(|| "-".into(), |b| format!("{b}%")),
            led: if device.led_on { "on" } else { "off" }.into(),
            mode: opt(device.mode.as_ref()),
            activity: opt(p.activity.as_ref().map(|a| a.kind.as_str())),
            area: opt(p.activity.as_ref().and_then(|a| a.area_name.as_deref())),
        }
    }
}

// ── Detail view ─────────────────────────────────────────────────────

fn detail(p: &Pet) -> String {
    let device = p.device();
    let mut out = String::new();

    let title = format!("{} ({})", p.name, p.id());
    if output::should_color() {
        let _ = writeln!(out, "{}", title.bold());
    } else {
        let _ = writeln!(out, "{title}");
    }
    let _ = writeln!(out, "  Breed:      {}", opt(p.breed.as_deref()));
    let _ = writeln!(out, "  Gender:     {}", opt(p.gender.as_deref()));
    let _ = writeln!(out, "  Weight:     {}", opt(p.weight));
    let _ = writeln!(out, "  Born:       {}", opt(p.birth_date()));
    let _ = writeln!(out, "  Home:       {}", opt(p.home_city_state.as_deref()));

    if let Some(ref a) = p.activity {
        let _ = writeln!(out, "  Activity:   {} since {}", a.kind, local_time(Some(a.start)));
        let place = a.place_name.as_deref().or(a.area_name.as_deref());
        let _ = writeln!(out, "  Where:      {}", opt(place));
        let _ = writeln!(out, "  Position:   {},{}", a.latitude, a.longitude);
    }

    let lost = if p.is_lost() && output::should_color() {
        "LOST".red().bold().to_string()
    } else {
        opt(device.mode.as_ref())
    };
    let _ = writeln!(out, "\n  Collar {}", device.id());
    let _ = writeln!(out, "    Mode:     {lost}");
    let _ = writeln!(
        out,
        "    Battery:  {}{}",
        device
            .battery_percent
            .map_or_else(|| "-".into(), |b| format!("{b}%")),
        if device.is_charging { " (charging)" } else { "" }
    );
    let _ = writeln!(
        out,
        "    LED:      {} {}",
        if device.led_on { "on" } else { "off" },
        opt(device.led_color_name.as_deref())
    );
    let _ = writeln!(out, "    Firmware: {}", opt(device.build_id.as_deref()));
    let _ = writeln!(
        out,
        "    Seen:     {} via {}",
        local_time(device.connection_state_date),
        opt(device.connection_state_type.as_deref())
    );
    if !device.available_colors.is_empty() {
        let _ = writeln!(out, "    Colors:");
        for color in &device.available_colors {
            let _ = writeln!(out, "      {color}");
        }
    }

    let _ = writeln!(out, "\n  Window     Steps / Goal        Distance   Sleep    Nap");
    for window in [Window::Daily, Window::Weekly, Window::Monthly] {
        let steps = p.activity_stats(window).map_or_else(
            || "-".into(),
            |s| format!("{} / {}", s.total_steps, s.step_goal),
        );
        let distance = p
            .activity_stats(window)
            .map_or_else(|| "-".into(), |s| format!("{:.0} m", s.total_distance));
        let (sleep, nap) = p.rest(window).map_or_else(
            || ("-".into(), "-".into()),
            |r| (hours(r.sleep_seconds), hours(r.nap_seconds)),
        );
        let _ = writeln!(out, "  {window:<10} {steps:<19} {distance:<10} {sleep:<8} {nap}");
    }

    out.trim_end().to_owned()
}

#[allow(clippy::cast_precision_loss)]
fn hours(seconds: i64) -> String {
    format!("{:.1}h", seconds as f64 / 3600.0)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(client: &Client, args: PetsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command.unwrap_or(PetsCommand::List) {
        PetsCommand::List => {
            let out = output::render_list(
                &global.output,
                client.pets(),
                |p| PetRow::from(p),
                |p| p.id().to_owned(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PetsCommand::Get { id } => {
            let pet = client
                .find_pet_by_id(&id)
                .ok_or_else(|| CliError::pet_not_found(&id))?;
            let out = output::render_single(&global.output, pet, detail, |p| p.id().to_owned())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
