//! Host user resource

use super::{execute, query_error};
use crate::declaration::{UpdatePassword, UserDecl};
use declarative::{Action, CommandOutput, Presence, Resource, ResourceState, Result};
use ninekit::{Client, Request};
use std::sync::Arc;

/// A host user, matched by name
///
/// An existing user is updated on every run. The tool cannot report whether
/// anything differed, so such a run always reports a change.
#[derive(Debug)]
pub struct User {
    decl: UserDecl,
    client: Arc<Client>,
}

impl User {
    pub fn new(decl: UserDecl, client: Arc<Client>) -> Self {
        Self { decl, client }
    }

    /// Password passed to an update, per the update policy
    fn update_password(&self) -> Option<&str> {
        match self.decl.update_password {
            UpdatePassword::Always => self.decl.password.as_deref(),
            UpdatePassword::OnCreate => None,
        }
    }

    fn request(&self, action: Action) -> Option<Request> {
        let name = &self.decl.name;
        match action {
            Action::Create => Some(Request::create_user(name, self.decl.password.as_deref())),
            Action::Update => Some(Request::update_user(name, self.update_password())),
            Action::Remove => Some(Request::remove_user(name)),
            Action::None => None,
        }
    }
}

impl Resource for User {
    fn id(&self) -> String {
        self.decl.name.clone()
    }

    fn resource_type(&self) -> &'static str {
        "user"
    }

    fn key_fields(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.decl.name.clone())]
    }

    fn desired_presence(&self) -> Presence {
        self.decl.state
    }

    fn remove_requested(&self) -> bool {
        self.decl.remove
    }

    fn secrets(&self) -> Vec<(&'static str, String)> {
        self.decl
            .password
            .iter()
            .map(|p| ("password", p.clone()))
            .collect()
    }

    fn current_state(&self) -> Result<ResourceState> {
        let snapshot = self
            .client
            .users()
            .map_err(|e| query_error(&self.decl.name, &e))?;
        Ok(ResourceState::from_exists(snapshot.contains(&self.decl.name)))
    }

    fn converged_action(&self) -> Action {
        Action::Update
    }

    fn apply(&self, action: Action) -> Result<CommandOutput> {
        execute(
            &self.client,
            self.resource_type(),
            &self.decl.name,
            action,
            self.request(action),
        )
    }
}
