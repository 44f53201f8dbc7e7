//! Resource kinds managed through nine-manage-vhosts
//!
//! Each kind implements [`declarative::Resource`] on top of a shared
//! [`ninekit::Client`]:
//! - [`VirtualHost`]: keyed by domain
//! - [`User`]: keyed by name, refreshed in place on every run
//! - [`Alias`]: keyed by alias within its parent domain

pub mod alias;
pub mod user;
pub mod virtual_host;

#[cfg(test)]
pub mod fake;

pub use alias::Alias;
pub use user::User;
pub use virtual_host::VirtualHost;

use crate::declaration::Declaration;
use declarative::{Action, BoxedResource, CommandOutput};
use ninekit::{Client, Request};
use std::sync::Arc;

/// Build the resource for a declaration
pub fn build(declaration: Declaration, client: Arc<Client>) -> BoxedResource {
    match declaration {
        Declaration::VirtualHost(decl) => Box::new(VirtualHost::new(decl, client)),
        Declaration::User(decl) => Box::new(User::new(decl, client)),
        Declaration::Alias(decl) => Box::new(Alias::new(decl, client)),
    }
}

/// A listing that failed or could not be parsed
fn query_error(resource: &str, err: &ninekit::Error) -> declarative::Error {
    declarative::Error::query(resource, err, err.exit_code())
}

/// Run the request for an action
///
/// `request` is `None` when the kind has no command for the action. Nothing
/// runs and the action fails.
fn execute(
    client: &Client,
    kind: &str,
    resource: &str,
    action: Action,
    request: Option<Request>,
) -> declarative::Result<CommandOutput> {
    let Some(request) = request else {
        return Err(declarative::Error::Execution {
            resource: resource.to_string(),
            action,
            exit_code: None,
            stdout: String::new(),
            stderr: format!("{kind} has no {action} command"),
        });
    };

    match client.execute(&request) {
        Ok(output) => Ok(CommandOutput::new(output.exit_code, output.stdout, output.stderr)),
        Err(err) => Err(declarative::Error::Execution {
            resource: resource.to_string(),
            action,
            exit_code: None,
            stdout: String::new(),
            stderr: err.to_string(),
        }),
    }
}
