//! In-memory nine-manage-vhosts for tests
//!
//! Keeps virtual hosts, aliases and users in memory and applies successful
//! requests to them, so repeated reconciliations see their own effects.

use ninekit::{
    Backend, Client, CommandOutput, Request, ResourceKind, UserEntry, UserSnapshot, Verb,
    VirtualHostEntry, VirtualHostSnapshot,
};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct State {
    virtual_hosts: Vec<VirtualHostEntry>,
    users: Vec<UserEntry>,
    requests: Vec<Request>,
    listings: usize,
    failure: Option<(i32, String)>,
    listing_fails: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<State>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_virtual_host(self, entry: VirtualHostEntry) -> Self {
        self.lock().virtual_hosts.push(entry);
        self
    }

    pub fn with_user(self, name: &str) -> Self {
        self.lock().users.push(UserEntry::new(name));
        self
    }

    /// Every following request exits with `code` and `stderr`
    pub fn fail_with(&self, code: i32, stderr: &str) {
        self.lock().failure = Some((code, stderr.to_string()));
    }

    pub fn fail_listings(&self) {
        self.lock().listing_fails = true;
    }

    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    pub fn listings(&self) -> usize {
        self.lock().listings
    }

    pub fn virtual_hosts(&self) -> Vec<VirtualHostEntry> {
        self.lock().virtual_hosts.clone()
    }

    pub fn client(&self) -> Arc<Client> {
        Arc::new(Client::with_backend(Box::new(self.clone())))
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn listing_failure(kind: ResourceKind) -> ninekit::Error {
        ninekit::Error::QueryFailed {
            kind,
            exit_code: Some(2),
            stderr: "permission denied\n".to_string(),
        }
    }
}

impl Backend for FakeBackend {
    fn list_virtual_hosts(&self) -> ninekit::Result<VirtualHostSnapshot> {
        let mut state = self.lock();
        if state.listing_fails {
            return Err(Self::listing_failure(ResourceKind::VirtualHost));
        }
        state.listings += 1;
        Ok(VirtualHostSnapshot {
            entries: state.virtual_hosts.clone(),
        })
    }

    fn list_users(&self) -> ninekit::Result<UserSnapshot> {
        let mut state = self.lock();
        if state.listing_fails {
            return Err(Self::listing_failure(ResourceKind::User));
        }
        state.listings += 1;
        Ok(UserSnapshot {
            entries: state.users.clone(),
        })
    }

    fn execute(&self, request: &Request) -> ninekit::Result<CommandOutput> {
        let mut state = self.lock();
        state.requests.push(request.clone());

        if let Some((code, stderr)) = state.failure.clone() {
            return Ok(CommandOutput {
                exit_code: Some(code),
                stdout: String::new(),
                stderr,
            });
        }

        let key = request.key().to_string();
        match (request.kind(), request.verb()) {
            (ResourceKind::VirtualHost, Verb::Create) => {
                state.virtual_hosts.push(VirtualHostEntry::new(key));
            }
            (ResourceKind::VirtualHost, Verb::Remove) => {
                state.virtual_hosts.retain(|v| v.domain != key);
            }
            (ResourceKind::User, Verb::Create) => state.users.push(UserEntry::new(key)),
            (ResourceKind::User, Verb::Remove) => state.users.retain(|u| u.name != key),
            (ResourceKind::Alias, verb) => {
                let domain = request.flag("virtual-host").unwrap_or_default();
                let Some(vhost) = state.virtual_hosts.iter_mut().find(|v| v.domain == domain)
                else {
                    return Ok(CommandOutput {
                        exit_code: Some(1),
                        stdout: String::new(),
                        stderr: format!("virtual host {domain} does not exist\n"),
                    });
                };
                if verb == Verb::Remove {
                    vhost.aliases.remove(&key);
                } else {
                    vhost.aliases.insert(key);
                }
            }
            (_, Verb::Update) => {}
        }

        // Echoes the raw arguments, secrets included, like a chatty tool would.
        Ok(CommandOutput {
            exit_code: Some(0),
            stdout: format!("{}\n", request.args().join(" ")),
            stderr: String::new(),
        })
    }
}
