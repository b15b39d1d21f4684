//! Base command handlers.

use tabled::Tabled;
use tryfi_core::{Base, Client};

use crate::cli::{BasesArgs, BasesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, local_time, opt};

#[derive(Tabled)]
struct BaseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Online")]
    online: String,
    #[tabled(rename = "Quality")]
    quality: String,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl From<&Base> for BaseRow {
    fn from(b: &Base) -> Self {
        Self {
            id: b.id().to_owned(),
            name: opt(b.name.as_deref()),
            online: if b.online { "yes" } else { "no" }.into(),
            quality: opt(b.online_quality.as_ref()),
            network: opt(b.network_name.as_deref()),
            updated: local_time(b.last_updated),
        }
    }
}

pub fn handle(client: &Client, args: BasesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        BasesCommand::List => {
            let out = output::render_list(
                &global.output,
                client.bases(),
                |b| BaseRow::from(b),
                |b| b.id().to_owned(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
