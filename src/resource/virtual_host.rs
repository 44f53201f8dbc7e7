//! Virtual host resource

use super::{execute, query_error};
use crate::declaration::VirtualHostDecl;
use declarative::{Action, CommandOutput, Presence, Resource, ResourceState, Result};
use ninekit::{Client, Request, VirtualHostAttrs};
use std::sync::Arc;

/// A virtual host, matched by domain
///
/// An existing virtual host is converged regardless of its user, paths or
/// template; attribute drift is not reconciled.
#[derive(Debug)]
pub struct VirtualHost {
    decl: VirtualHostDecl,
    client: Arc<Client>,
}

impl VirtualHost {
    pub fn new(decl: VirtualHostDecl, client: Arc<Client>) -> Self {
        Self { decl, client }
    }

    fn attrs(&self) -> VirtualHostAttrs {
        VirtualHostAttrs {
            user: self.decl.user.clone(),
            relative_path: self.decl.rel_path.clone(),
            web_root: self.decl.web_root.clone(),
            template: self.decl.template.clone(),
        }
    }

    fn request(&self, action: Action) -> Option<Request> {
        let domain = &self.decl.domain;
        match action {
            Action::Create => Some(Request::create_virtual_host(domain, &self.attrs())),
            Action::Update => Some(Request::update_virtual_host(domain, &self.attrs())),
            Action::Remove => Some(Request::remove_virtual_host(domain)),
            Action::None => None,
        }
    }
}

impl Resource for VirtualHost {
    fn id(&self) -> String {
        self.decl.domain.clone()
    }

    fn resource_type(&self) -> &'static str {
        "virtual_host"
    }

    fn key_fields(&self) -> Vec<(&'static str, String)> {
        vec![("domain", self.decl.domain.clone())]
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
            .map_err(|e| query_error(&self.decl.domain, &e))?;
        Ok(ResourceState::from_exists(
            snapshot.contains_domain(&self.decl.domain),
        ))
    }

    fn apply(&self, action: Action) -> Result<CommandOutput> {
        execute(
            &self.client,
            self.resource_type(),
            &self.decl.domain,
            action,
            self.request(action),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::fake::FakeBackend;
    use declarative::{Reconciler, Report};
    use ninekit::{ResourceKind, Verb, VirtualHostEntry};

    fn decl(domain: &str) -> VirtualHostDecl {
        VirtualHostDecl {
            domain: domain.to_string(),
            state: Presence::Present,
            remove: false,
            user: None,
            web_root: None,
            rel_path: None,
            template: None,
        }
    }

    #[test]
    fn test_create_example_vhost() {
        let backend = FakeBackend::new();
        let vhost = VirtualHost::new(
            VirtualHostDecl {
                web_root: Some("/var/www/example".to_string()),
                ..decl("example.com")
            },
            backend.client(),
        );

        let outcome = Reconciler::default().reconcile(&vhost).unwrap();
        assert_eq!(outcome.action, Action::Create);

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].args(),
            vec![
                "virtual-host",
                "create",
                "example.com",
                "--webroot=/var/www/example"
            ]
        );

        let report = serde_json::to_value(Report::new(&vhost, &outcome)).unwrap();
        assert_eq!(report["changed"], serde_json::json!(true));
        assert_eq!(report["domain"], serde_json::json!("example.com"));
        assert_eq!(report["state"], serde_json::json!("present"));
    }

    #[test]
    fn test_second_run_is_converged() {
        let backend = FakeBackend::new();
        let vhost = VirtualHost::new(decl("example.com"), backend.client());
        let reconciler = Reconciler::default();

        assert!(reconciler.reconcile(&vhost).unwrap().changed());
        let second = reconciler.reconcile(&vhost).unwrap();
        assert!(!second.changed());
        assert!(second.existed_before);
        assert_eq!(backend.requests().len(), 1);
        assert_eq!(backend.listings(), 2);
    }

    #[test]
    fn test_attribute_drift_is_ignored() {
        let backend = FakeBackend::new().with_virtual_host(VirtualHostEntry::new("example.com"));
        let vhost = VirtualHost::new(
            VirtualHostDecl {
                user: Some("www-other".to_string()),
                template: Some("php".to_string()),
                ..decl("example.com")
            },
            backend.client(),
        );

        let outcome = Reconciler::default().reconcile(&vhost).unwrap();
        assert!(!outcome.changed());
        assert!(backend.requests().is_empty());
    }

    #[test]
    fn test_remove_existing() {
        let backend = FakeBackend::new().with_virtual_host(VirtualHostEntry::new("example.com"));
        let vhost = VirtualHost::new(
            VirtualHostDecl {
                state: Presence::Absent,
                remove: true,
                ..decl("example.com")
            },
            backend.client(),
        );

        let outcome = Reconciler::default().reconcile(&vhost).unwrap();
        assert_eq!(outcome.action, Action::Remove);
        assert!(backend.virtual_hosts().is_empty());

        let requests = backend.requests();
        assert_eq!(requests[0].kind(), ResourceKind::VirtualHost);
        assert_eq!(requests[0].verb(), Verb::Remove);
        assert_eq!(requests[0].args(), vec!["virtual-host", "remove", "example.com"]);
    }

    #[test]
    fn test_update_request_omits_user() {
        let backend = FakeBackend::new();
        let vhost = VirtualHost::new(
            VirtualHostDecl {
                user: Some("www-example".to_string()),
                rel_path: Some("public".to_string()),
                ..decl("example.com")
            },
            backend.client(),
        );

        let request = vhost.request(Action::Update).unwrap();
        assert!(!request.has_flag("user"));
        assert_eq!(request.flag("relative-path"), Some("public"));
        assert!(vhost.request(Action::None).is_none());
    }

    #[test]
    fn test_apply_none_runs_nothing_and_fails() {
        let backend = FakeBackend::new();
        let vhost = VirtualHost::new(decl("example.com"), backend.client());

        let err = vhost.apply(Action::None).unwrap_err();
        assert_eq!(err.message(), "virtual_host has no none command");
        assert!(backend.requests().is_empty());
    }
}
