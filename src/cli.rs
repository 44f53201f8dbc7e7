use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use declarative::Presence;
use std::path::PathBuf;

use crate::declaration::{AliasDecl, UpdatePassword, UserDecl, VirtualHostDecl};

#[derive(Parser)]
#[command(name = "ninectl")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(
    about = "Declare virtual hosts, users and aliases on nine managed servers",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: ~/.config/ninectl/config.toml)
    #[arg(long, global = true, env = "NINECTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report what would change without changing anything
    #[arg(long, global = true)]
    pub check: bool,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile a virtual host
    Vhost(VhostArgs),

    /// Reconcile a host user
    User(UserArgs),

    /// Reconcile an alias of a virtual host
    Alias(AliasArgs),

    /// Reconcile the declaration in a JSON or TOML file
    Apply {
        /// Declaration file (.json or .toml)
        file: PathBuf,
    },

    /// Show what nine-manage-vhosts currently lists
    List {
        #[arg(value_enum)]
        kind: ListKind,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON record on stdout
    Json,
    /// Human-readable summary
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Vhosts,
    Users,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    Present,
    Absent,
}

impl From<StateArg> for Presence {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Present => Presence::Present,
            StateArg::Absent => Presence::Absent,
        }
    }
}

// ============================================================================
// Resource arguments
// ============================================================================

#[derive(Args, Debug)]
pub struct VhostArgs {
    /// Primary domain of the virtual host
    #[arg(long, visible_alias = "host")]
    pub domain: String,

    /// Whether the virtual host should exist
    #[arg(long, value_enum, default_value_t = StateArg::Present)]
    pub state: StateArg,

    /// Owning user
    #[arg(long)]
    pub user: Option<String>,

    /// Web root directory
    #[arg(long)]
    pub web_root: Option<String>,

    /// Path relative to the user's home
    #[arg(long)]
    pub rel_path: Option<String>,

    /// Template to create the virtual host from
    #[arg(long)]
    pub template: Option<String>,

    /// Echoed in the result after a removal
    #[arg(long)]
    pub remove: bool,
}

impl From<VhostArgs> for VirtualHostDecl {
    fn from(args: VhostArgs) -> Self {
        Self {
            domain: args.domain,
            state: args.state.into(),
            remove: args.remove,
            user: args.user,
            web_root: args.web_root,
            rel_path: args.rel_path,
            template: args.template,
        }
    }
}

#[derive(Args, Debug)]
pub struct UserArgs {
    /// Login name
    #[arg(long, visible_alias = "user")]
    pub name: String,

    /// Whether the user should exist
    #[arg(long, value_enum, default_value_t = StateArg::Present)]
    pub state: StateArg,

    /// Password to set
    #[arg(long, env = "NINECTL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// When to pass the password to an existing user
    #[arg(long, value_enum, default_value_t = UpdatePassword::Always)]
    pub update_password: UpdatePassword,

    /// Echoed in the result after a removal
    #[arg(long)]
    pub remove: bool,
}

impl From<UserArgs> for UserDecl {
    fn from(args: UserArgs) -> Self {
        Self {
            name: args.name,
            state: args.state.into(),
            remove: args.remove,
            password: args.password,
            update_password: args.update_password,
        }
    }
}

#[derive(Args, Debug)]
pub struct AliasArgs {
    /// Domain of the virtual host the alias belongs to
    #[arg(long, visible_alias = "host")]
    pub domain: String,

    /// The alias domain
    #[arg(long)]
    pub alias: String,

    /// Whether the alias should exist
    #[arg(long, value_enum, default_value_t = StateArg::Present)]
    pub state: StateArg,

    /// Echoed in the result after a removal
    #[arg(long)]
    pub remove: bool,
}

impl From<AliasArgs> for AliasDecl {
    fn from(args: AliasArgs) -> Self {
        Self {
            domain: args.domain,
            alias: args.alias,
            state: args.state.into(),
            remove: args.remove,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_vhost_flags() {
        let cli = parse(&[
            "ninectl",
            "vhost",
            "--domain",
            "example.com",
            "--web-root",
            "/var/www/example",
        ]);
        assert!(!cli.check);
        assert_eq!(cli.output, OutputFormat::Json);

        let Command::Vhost(args) = cli.command else {
            panic!("expected vhost command");
        };
        let decl = VirtualHostDecl::from(args);
        assert_eq!(decl.domain, "example.com");
        assert_eq!(decl.state, Presence::Present);
        assert_eq!(decl.web_root.as_deref(), Some("/var/www/example"));
        assert_eq!(decl.user, None);
    }

    #[test]
    fn test_user_flags() {
        let cli = parse(&[
            "ninectl",
            "--check",
            "user",
            "--user",
            "deploy",
            "--state",
            "absent",
            "--update-password",
            "on_create",
            "--remove",
        ]);
        assert!(cli.check);

        let Command::User(args) = cli.command else {
            panic!("expected user command");
        };
        let decl = UserDecl::from(args);
        assert_eq!(decl.name, "deploy");
        assert_eq!(decl.state, Presence::Absent);
        assert_eq!(decl.update_password, UpdatePassword::OnCreate);
        assert!(decl.remove);
    }

    #[test]
    fn test_alias_requires_both_keys() {
        assert!(Cli::try_parse_from(["ninectl", "alias", "--domain", "a.com"]).is_err());

        let cli = parse(&[
            "ninectl", "alias", "--host", "a.com", "--alias", "www.a.com", "--output", "text",
        ]);
        assert_eq!(cli.output, OutputFormat::Text);
        assert!(matches!(cli.command, Command::Alias(_)));
    }

    #[test]
    fn test_invalid_state_is_rejected() {
        assert!(
            Cli::try_parse_from(["ninectl", "vhost", "--domain", "a.com", "--state", "gone"])
                .is_err()
        );
    }
}
