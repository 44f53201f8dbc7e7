//! Reconcile one declaration and print its result record

use anyhow::Result;
use declarative::{
    Action, FailureReport, ReconcileOptions, ReconcileOutcome, Reconciler, Report, Resource,
};
use ninekit::Client;
use std::process::ExitCode;
use std::sync::Arc;

use crate::Context;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::declaration::Declaration;
use crate::resource;
use crate::ui;

pub fn run(ctx: &Context, declaration: Declaration) -> Result<ExitCode> {
    let client = match connect(&ctx.config, &declaration)? {
        Ok(client) => client,
        Err(failure) => {
            print_failure(ctx.output, &failure)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let resource = resource::build(declaration, client);
    let reconciler = Reconciler::new(ReconcileOptions {
        check_mode: ctx.check,
    });

    match reconcile(resource.as_ref(), &reconciler) {
        Ok((outcome, report)) => {
            print_report(ctx.output, resource.as_ref(), &outcome, &report)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            print_failure(ctx.output, &failure)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Set up the authority client
///
/// A tool that cannot be found fails the declaration like any other
/// authority error. Config errors do not.
fn connect(
    config: &Config,
    declaration: &Declaration,
) -> Result<std::result::Result<Arc<Client>, FailureReport>> {
    let backend = config.backend_config()?;
    Ok(match Client::new(&backend) {
        Ok(client) => Ok(Arc::new(client)),
        Err(err) => Err(FailureReport {
            failed: true,
            name: declaration.name().to_string(),
            msg: err.to_string(),
            rc: None,
        }),
    })
}

/// Reconcile and build the record for either result
pub fn reconcile(
    resource: &dyn Resource,
    reconciler: &Reconciler,
) -> std::result::Result<(ReconcileOutcome, Report), FailureReport> {
    match reconciler.reconcile(resource) {
        Ok(outcome) => {
            let report = Report::new(resource, &outcome);
            Ok((outcome, report))
        }
        Err(err) => {
            log::debug!("{}: {err}", resource.description());
            Err(FailureReport::new(resource, &err))
        }
    }
}

fn print_report(
    format: OutputFormat,
    resource: &dyn Resource,
    outcome: &ReconcileOutcome,
    report: &Report,
) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string(report)?);
        return Ok(());
    }

    let description = resource.description();
    if !outcome.changed() {
        ui::unchanged(&format!("{description} is {}", report.state));
    } else if outcome.check_mode {
        ui::pending(&format!("would {} {description}", outcome.action));
    } else {
        ui::success(&format!("{} {description}", past_tense(outcome.action)));
    }

    if let Some(stdout) = &report.stdout {
        ui::dim(stdout);
    }
    if let Some(stderr) = &report.stderr {
        ui::dim(stderr);
    }
    Ok(())
}

fn print_failure(format: OutputFormat, failure: &FailureReport) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(failure)?),
        OutputFormat::Text => ui::error(&failure_line(failure)),
    }
    Ok(())
}

/// One-line text form of a failure record
fn failure_line(failure: &FailureReport) -> String {
    match failure.rc {
        Some(rc) => format!("{}: {} (exit code {rc})", failure.name, failure.msg),
        None => format!("{}: {}", failure.name, failure.msg),
    }
}

fn past_tense(action: Action) -> &'static str {
    match action {
        Action::None => "kept",
        Action::Create => "created",
        Action::Update => "updated",
        Action::Remove => "removed",
    }
}
