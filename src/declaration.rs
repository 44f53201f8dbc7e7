//! Desired-state declarations
//!
//! One declaration describes one resource. It comes either from CLI flags or
//! from an argument file (`ninectl apply <file>`) in JSON or TOML, tagged by
//! `kind`:
//!
//! ```toml
//! kind = "user"
//! name = "deploy"
//! password = "s3cret"
//! update_password = "on_create"
//! ```

use anyhow::{Context, Result, bail};
use declarative::Presence;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// When an existing user's password is passed to the update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePassword {
    /// Pass the password on every update
    #[default]
    Always,
    /// Only set the password when the user is created
    #[value(name = "on_create")]
    OnCreate,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VirtualHostDecl {
    #[serde(alias = "host")]
    pub domain: String,
    #[serde(default)]
    pub state: Presence,
    #[serde(default)]
    pub remove: bool,
    pub user: Option<String>,
    pub web_root: Option<String>,
    pub rel_path: Option<String>,
    pub template: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserDecl {
    #[serde(alias = "user")]
    pub name: String,
    #[serde(default)]
    pub state: Presence,
    #[serde(default)]
    pub remove: bool,
    pub password: Option<String>,
    #[serde(default)]
    pub update_password: UpdatePassword,
}

// Keeps the password out of debug logs.
impl fmt::Debug for UserDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDecl")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("remove", &self.remove)
            .field("password", &self.password.as_ref().map(|_| "********"))
            .field("update_password", &self.update_password)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasDecl {
    #[serde(alias = "host")]
    pub domain: String,
    pub alias: String,
    #[serde(default)]
    pub state: Presence,
    #[serde(default)]
    pub remove: bool,
}

/// A declaration of any kind
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    #[serde(rename = "vhost", alias = "virtual_host")]
    VirtualHost(VirtualHostDecl),
    User(UserDecl),
    Alias(AliasDecl),
}

impl Declaration {
    /// Name the resource is reported under
    pub fn name(&self) -> &str {
        match self {
            Self::VirtualHost(decl) => &decl.domain,
            Self::User(decl) => &decl.name,
            Self::Alias(decl) => &decl.alias,
        }
    }

    /// Load a declaration file, format chosen by extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        let parsed = match ext {
            "json" => Self::from_json(&content),
            "toml" => Self::from_toml(&content),
            _ => bail!(
                "Unsupported declaration format '{}': expected .json or .toml",
                path.display()
            ),
        };
        parsed.with_context(|| format!("Invalid declaration {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse JSON")
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_vhost_defaults() {
        let decl = Declaration::from_json(r#"{"kind": "vhost", "domain": "example.com"}"#).unwrap();
        match decl {
            Declaration::VirtualHost(v) => {
                assert_eq!(v.domain, "example.com");
                assert_eq!(v.state, Presence::Present);
                assert!(!v.remove);
                assert_eq!(v.user, None);
                assert_eq!(v.web_root, None);
            }
            other => panic!("unexpected declaration: {other:?}"),
        }
    }

    #[test]
    fn test_input_aliases() {
        let vhost = Declaration::from_json(r#"{"kind": "vhost", "host": "a.com"}"#).unwrap();
        assert_eq!(vhost.name(), "a.com");

        let user = Declaration::from_json(r#"{"kind": "user", "user": "deploy"}"#).unwrap();
        assert_eq!(user.name(), "deploy");

        let alias = Declaration::from_json(
            r#"{"kind": "alias", "host": "a.com", "alias": "www.a.com", "state": "absent"}"#,
        )
        .unwrap();
        match alias {
            Declaration::Alias(a) => {
                assert_eq!(a.domain, "a.com");
                assert_eq!(a.alias, "www.a.com");
                assert_eq!(a.state, Presence::Absent);
            }
            other => panic!("unexpected declaration: {other:?}"),
        }
    }

    #[test]
    fn test_user_toml() {
        let decl = Declaration::from_toml(
            r#"
            kind = "user"
            name = "deploy"
            password = "s3cret"
            update_password = "on_create"
            "#,
        )
        .unwrap();

        match decl {
            Declaration::User(u) => {
                assert_eq!(u.password.as_deref(), Some("s3cret"));
                assert_eq!(u.update_password, UpdatePassword::OnCreate);
            }
            other => panic!("unexpected declaration: {other:?}"),
        }
    }

    #[test]
    fn test_user_debug_hides_password() {
        let decl = Declaration::from_json(r#"{"kind": "user", "name": "deploy", "password": "s3cret"}"#)
            .unwrap();
        let shown = format!("{decl:?}");
        assert!(!shown.contains("s3cret"));
        assert!(shown.contains("deploy"));
    }

    #[test]
    fn test_rejects_bad_input() {
        // unknown kind
        assert!(Declaration::from_json(r#"{"kind": "mailbox", "name": "x"}"#).is_err());
        // missing key
        assert!(Declaration::from_json(r#"{"kind": "alias", "domain": "a.com"}"#).is_err());
        // invalid state
        assert!(
            Declaration::from_json(r#"{"kind": "vhost", "domain": "a.com", "state": "gone"}"#)
                .is_err()
        );
        // unknown field
        assert!(
            Declaration::from_json(r#"{"kind": "vhost", "domain": "a.com", "webroot": "/x"}"#)
                .is_err()
        );
    }

    #[test]
    fn test_load_by_extension() {
        let dir = TempDir::new().unwrap();

        let json = dir.path().join("site.json");
        fs::write(&json, r#"{"kind": "vhost", "domain": "a.com"}"#).unwrap();
        assert_eq!(Declaration::load(&json).unwrap().name(), "a.com");

        let toml_path = dir.path().join("site.toml");
        fs::write(&toml_path, "kind = \"vhost\"\ndomain = \"b.com\"\n").unwrap();
        assert_eq!(Declaration::load(&toml_path).unwrap().name(), "b.com");

        let yaml = dir.path().join("site.yaml");
        fs::write(&yaml, "kind: vhost\n").unwrap();
        assert!(Declaration::load(&yaml).is_err());
    }
}
