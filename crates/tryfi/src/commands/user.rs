//! Account command handler.

use std::fmt::Write as _;

use tryfi_core::{Client, CoreError, User};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, local_time, opt};

fn detail(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "User ID:  {}", user.id());
    match user.profile() {
        Ok(p) => {
            let _ = writeln!(out, "Name:     {} {}", p.first_name, p.last_name);
            let _ = writeln!(out, "Email:    {}", p.email);
            let _ = writeln!(out, "Phone:    {}", opt(p.phone_number.as_deref()));
            let _ = write!(out, "Updated:  {}", local_time(user.last_updated().ok()));
        }
        Err(_) => {
            let _ = write!(out, "(profile not loaded)");
        }
    }
    out
}

pub fn handle(client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    let user = client.user().ok_or_else(|| {
        CliError::Api(CoreError::NotLoaded {
            field: "user".into(),
        })
    })?;
    let out = output::render_single(&global.output, user, detail, |u| {
        u.email().map_or_else(|_| u.id().to_owned(), str::to_owned)
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
