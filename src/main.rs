mod cli;
mod commands;
mod config;
mod declaration;
mod resource;
mod sudo;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command, OutputFormat};
use config::Config;
use declaration::Declaration;
use std::io;
use std::process::ExitCode;

/// Global context for the application
pub struct Context {
    pub check: bool,
    pub output: OutputFormat,
    pub config: Config,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity; stdout stays free for the record
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    if let Command::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "ninectl", &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let ctx = Context {
        check: cli.check,
        output: cli.output,
        config: Config::load(cli.config.as_deref())?,
    };

    match cli.command {
        Command::Vhost(args) => {
            commands::reconcile::run(&ctx, Declaration::VirtualHost(args.into()))
        }
        Command::User(args) => commands::reconcile::run(&ctx, Declaration::User(args.into())),
        Command::Alias(args) => commands::reconcile::run(&ctx, Declaration::Alias(args.into())),
        Command::Apply { file } => {
            let declaration = Declaration::load(&file)?;
            commands::reconcile::run(&ctx, declaration)
        }
        Command::List { kind } => commands::list::run(&ctx, kind),
        Command::Completions { .. } => Ok(ExitCode::SUCCESS),
    }
}
