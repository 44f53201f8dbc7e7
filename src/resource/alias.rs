//! Domain alias resource

use super::{execute, query_error};
use crate::declaration::AliasDecl;
use declarative::{Action, CommandOutput, Presence, Resource, ResourceState, Result};
use ninekit::{Client, Request};
use std::sync::Arc;

/// An alias of a virtual host
///
/// Exists only if the virtual host with the declared domain lists the alias;
/// the same alias under another domain does not count.
#[derive(Debug)]
pub struct Alias {
    decl: AliasDecl,
    client: Arc<Client>,
}

impl Alias {
    pub fn new(decl: AliasDecl, client: Arc<Client>) -> Self {
        Self { decl, client }
    }

    // The tool has no alias update.
    fn request(&self, action: Action) -> Option<Request> {
        let (alias, domain) = (&self.decl.alias, &self.decl.domain);
        match action {
            Action::Create => Some(Request::create_alias(alias, domain)),
            Action::Remove => Some(Request::remove_alias(alias, domain)),
            Action::Update | Action::None => None,
        }
    }
}

impl Resource for Alias {
    fn id(&self) -> String {
        self.decl.alias.clone()
    }

    fn resource_type(&self) -> &'static str {
        "alias"
    }

    fn description(&self) -> String {
        format!("alias {} of {}", self.decl.alias, self.decl.domain)
    }

    fn key_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("alias", self.decl.alias.clone()),
            ("domain", self.decl.domain.clone()),
        ]
    }

    fn desired_presence(&self) -> Presence {
        self.decl.state
    }

    fn remove_requested(&self) -> bool {
        self.decl.remove
    }

    fn current_state(&self) -> Result<ResourceState> {
        let snapshot = self
            .client
            .virtual_hosts()
            .map_err(|e| query_error(&self.decl.alias, &e))?;
        Ok(ResourceState::from_exists(
            snapshot.contains_alias(&self.decl.domain, &self.decl.alias),
        ))
    }

    fn apply(&self, action: Action) -> Result<CommandOutput> {
        execute(
            &self.client,
            self.resource_type(),
            &self.decl.alias,
            action,
            self.request(action),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::fake::FakeBackend;
    use declarative::{Error, FailureReport, Reconciler, Report};
    use ninekit::VirtualHostEntry;

    fn decl(domain: &str, alias: &str, state: Presence) -> AliasDecl {
        AliasDecl {
            domain: domain.to_string(),
            alias: alias.to_string(),
            state,
            remove: false,
        }
    }

    #[test]
    fn test_alias_under_other_domain_does_not_count() {
        let backend = FakeBackend::new()
            .with_virtual_host(VirtualHostEntry::new("other.com").with_alias("www.example.com"))
            .with_virtual_host(VirtualHostEntry::new("example.com"));
        let alias = Alias::new(
            decl("example.com", "www.example.com", Presence::Present),
            backend.client(),
        );

        let outcome = Reconciler::default().reconcile(&alias).unwrap();
        assert_eq!(outcome.action, Action::Create);
        assert!(!outcome.existed_before);
        assert_eq!(
            backend.requests()[0].args(),
            vec![
                "alias",
                "create",
                "www.example.com",
                "--virtual-host=example.com"
            ]
        );
    }

    #[test]
    fn test_create_then_remove_round() {
        let backend = FakeBackend::new().with_virtual_host(VirtualHostEntry::new("example.com"));
        let reconciler = Reconciler::default();

        let present = Alias::new(
            decl("example.com", "www.example.com", Presence::Present),
            backend.client(),
        );
        assert!(reconciler.reconcile(&present).unwrap().changed());
        assert!(!reconciler.reconcile(&present).unwrap().changed());

        let absent = Alias::new(
            decl("example.com", "www.example.com", Presence::Absent),
            backend.client(),
        );
        assert_eq!(reconciler.reconcile(&absent).unwrap().action, Action::Remove);
        assert!(!reconciler.reconcile(&absent).unwrap().changed());

        assert_eq!(backend.requests().len(), 2);
        assert!(backend.virtual_hosts()[0].aliases.is_empty());
    }

    #[test]
    fn test_report_carries_both_keys() {
        let backend = FakeBackend::new()
            .with_virtual_host(VirtualHostEntry::new("example.com").with_alias("www.example.com"));
        let alias = Alias::new(
            decl("example.com", "www.example.com", Presence::Present),
            backend.client(),
        );

        let outcome = Reconciler::default().reconcile(&alias).unwrap();
        assert_eq!(
            serde_json::to_value(Report::new(&alias, &outcome)).unwrap(),
            serde_json::json!({
                "changed": false,
                "alias": "www.example.com",
                "domain": "example.com",
                "state": "present"
            })
        );
    }

    #[test]
    fn test_missing_parent_domain_fails() {
        let backend = FakeBackend::new();
        let alias = Alias::new(
            decl("example.com", "www.example.com", Presence::Present),
            backend.client(),
        );

        let err = Reconciler::default().reconcile(&alias).unwrap_err();
        assert!(matches!(err, Error::Execution { exit_code: Some(1), .. }));

        let failure = FailureReport::new(&alias, &err);
        assert_eq!(failure.name, "www.example.com");
        assert_eq!(failure.msg, "virtual host example.com does not exist");
    }

    #[test]
    fn test_invalid_alias_never_reaches_tool() {
        let backend = FakeBackend::new();
        let alias = Alias::new(
            decl("example.com", "--all", Presence::Absent),
            backend.client(),
        );

        let err = Reconciler::default().reconcile(&alias).unwrap_err();
        assert!(matches!(err, Error::InvalidDeclaration { .. }));
        assert_eq!(backend.listings(), 0);
        assert!(backend.requests().is_empty());
    }

    #[test]
    fn test_update_has_no_command() {
        let backend = FakeBackend::new()
            .with_virtual_host(VirtualHostEntry::new("example.com").with_alias("www.example.com"));
        let alias = Alias::new(
            decl("example.com", "www.example.com", Presence::Present),
            backend.client(),
        );

        let err = alias.apply(Action::Update).unwrap_err();
        match &err {
            Error::Execution {
                action, exit_code, ..
            } => {
                assert_eq!(*action, Action::Update);
                assert_eq!(*exit_code, None);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.message(), "alias has no update command");
        assert!(alias.apply(Action::None).is_err());
        assert!(backend.requests().is_empty());
    }
}
