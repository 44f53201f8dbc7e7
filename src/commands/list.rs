//! Read-only dump of what the tool lists

use anyhow::{Context as _, Result};
use colored::Colorize;
use ninekit::{Client, UserSnapshot, VirtualHostSnapshot};
use std::process::ExitCode;

use crate::Context;
use crate::cli::{ListKind, OutputFormat};
use crate::ui;

pub fn run(ctx: &Context, kind: ListKind) -> Result<ExitCode> {
    let client = Client::new(&ctx.config.backend_config()?)
        .context("Could not set up nine-manage-vhosts")?;

    match kind {
        ListKind::Vhosts => {
            let snapshot = client.virtual_hosts()?;
            match ctx.output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
                OutputFormat::Text => print_virtual_hosts(&snapshot),
            }
        }
        ListKind::Users => {
            let snapshot = client.users()?;
            match ctx.output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
                OutputFormat::Text => print_users(&snapshot),
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_virtual_hosts(snapshot: &VirtualHostSnapshot) {
    ui::header(&format!("Virtual hosts ({})", snapshot.len()));
    for entry in &snapshot.entries {
        if entry.aliases.is_empty() {
            println!("  {}", entry.domain);
        } else {
            let aliases: Vec<&str> = entry.aliases.iter().map(String::as_str).collect();
            println!("  {} {}", entry.domain, aliases.join(", ").dimmed());
        }
    }
}

fn print_users(snapshot: &UserSnapshot) {
    ui::header(&format!("Users ({})", snapshot.len()));
    for entry in &snapshot.entries {
        println!("  {}", entry.name);
    }
}
