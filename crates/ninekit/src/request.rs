//! Deterministic construction of nine-manage-vhosts command lines.
//!
//! A [`Request`] always renders as `<noun> <verb> <key>` followed by its
//! flags in the order they were added. The constructors below fix that
//! order per kind and verb, and only add a flag when its attribute is set.

use crate::types::{ResourceKind, Verb, VirtualHostAttrs};
use std::fmt;

/// Placeholder shown instead of secret flag values.
pub const MASK: &str = "********";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Flag {
    Value {
        name: &'static str,
        value: String,
        secret: bool,
    },
    Switch(&'static str),
}

impl Flag {
    fn render(&self, redact: bool) -> String {
        match self {
            Flag::Value {
                name,
                value,
                secret,
            } => {
                if redact && *secret {
                    format!("--{name}={MASK}")
                } else {
                    format!("--{name}={value}")
                }
            }
            Flag::Switch(name) => format!("--{name}"),
        }
    }
}

/// A single mutating invocation of the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    kind: ResourceKind,
    verb: Verb,
    key: String,
    flags: Vec<Flag>,
    stdin: Option<String>,
}

impl Request {
    fn new(kind: ResourceKind, verb: Verb, key: &str) -> Self {
        Self {
            kind,
            verb,
            key: key.to_string(),
            flags: Vec::new(),
            stdin: None,
        }
    }

    fn value(mut self, name: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.flags.push(Flag::Value {
                name,
                value: value.to_string(),
                secret: false,
            });
        }
        self
    }

    fn secret(mut self, name: &'static str, value: &str) -> Self {
        self.flags.push(Flag::Value {
            name,
            value: value.to_string(),
            secret: true,
        });
        self
    }

    fn switch(mut self, name: &'static str) -> Self {
        self.flags.push(Flag::Switch(name));
        self
    }

    /// `virtual-host create <domain> [--user=] [--relative-path=] [--webroot=] [--template=]`
    pub fn create_virtual_host(domain: &str, attrs: &VirtualHostAttrs) -> Self {
        Self::new(ResourceKind::VirtualHost, Verb::Create, domain)
            .value("user", attrs.user.as_deref())
            .value("relative-path", attrs.relative_path.as_deref())
            .value("webroot", attrs.web_root.as_deref())
            .value("template", attrs.template.as_deref())
    }

    /// `virtual-host update <domain> [--relative-path=] [--webroot=] [--template=]`
    ///
    /// The owner of an existing virtual host cannot be changed.
    pub fn update_virtual_host(domain: &str, attrs: &VirtualHostAttrs) -> Self {
        Self::new(ResourceKind::VirtualHost, Verb::Update, domain)
            .value("relative-path", attrs.relative_path.as_deref())
            .value("webroot", attrs.web_root.as_deref())
            .value("template", attrs.template.as_deref())
    }

    /// `virtual-host remove <domain>`
    pub fn remove_virtual_host(domain: &str) -> Self {
        Self::new(ResourceKind::VirtualHost, Verb::Remove, domain)
    }

    /// `user create <name> (--password=<p> | --no-password)`
    pub fn create_user(name: &str, password: Option<&str>) -> Self {
        let request = Self::new(ResourceKind::User, Verb::Create, name);
        match password {
            Some(password) => request.secret("password", password),
            None => request.switch("no-password"),
        }
    }

    /// `user update <name> [--password=<p>]`
    pub fn update_user(name: &str, password: Option<&str>) -> Self {
        let request = Self::new(ResourceKind::User, Verb::Update, name);
        match password {
            Some(password) => request.secret("password", password),
            None => request,
        }
    }

    /// `user remove <name>`, confirming the tool's prompt on stdin.
    pub fn remove_user(name: &str) -> Self {
        let mut request = Self::new(ResourceKind::User, Verb::Remove, name);
        request.stdin = Some("Y".to_string());
        request
    }

    /// `alias create <alias> --virtual-host=<domain>`
    pub fn create_alias(alias: &str, domain: &str) -> Self {
        Self::new(ResourceKind::Alias, Verb::Create, alias).value("virtual-host", Some(domain))
    }

    /// `alias remove <alias> --virtual-host=<domain>`
    pub fn remove_alias(alias: &str, domain: &str) -> Self {
        Self::new(ResourceKind::Alias, Verb::Remove, alias).value("virtual-host", Some(domain))
    }

    /// Kind of resource this request mutates.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Verb of this request.
    pub fn verb(&self) -> Verb {
        self.verb
    }

    /// Key of the resource this request mutates.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Data written to the tool's standard input, if any.
    pub fn stdin(&self) -> Option<&str> {
        self.stdin.as_deref()
    }

    /// Value of a flag, if the request carries it.
    pub fn flag(&self, name: &str) -> Option<&str> {
        self.flags.iter().find_map(|flag| match flag {
            Flag::Value { name: n, value, .. } if *n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Whether the request carries a flag, with or without a value.
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.iter().any(|flag| match flag {
            Flag::Value { name: n, .. } | Flag::Switch(n) => *n == name,
        })
    }

    /// Arguments to pass to the tool.
    pub fn args(&self) -> Vec<String> {
        self.render(false)
    }

    /// Arguments with secret values masked, for logs and error messages.
    pub fn redacted_args(&self) -> Vec<String> {
        self.render(true)
    }

    fn render(&self, redact: bool) -> Vec<String> {
        let mut args = vec![
            self.kind.noun().to_string(),
            self.verb.as_str().to_string(),
            self.key.clone(),
        ];
        args.extend(self.flags.iter().map(|f| f.render(redact)));
        args
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted_args().join(" "))
    }
}
