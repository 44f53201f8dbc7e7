//! Real backend using the `nine-manage-vhosts` command.

use crate::backend::{Backend, BackendConfig, Elevation};
use crate::error::{Error, Result};
use crate::request::Request;
use crate::types::{CommandOutput, ResourceKind, UserSnapshot, VirtualHostSnapshot};
use serde::de::DeserializeOwned;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Directories checked before `PATH`.
const SEARCH_DIRS: &[&str] = &["/usr/local/bin", "/usr/bin"];

/// Backend that executes real `nine-manage-vhosts` commands.
#[derive(Debug, Clone)]
pub struct NineBackend {
    /// Path to the tool
    program: PathBuf,
    elevation: Option<Elevation>,
}

impl NineBackend {
    /// Create a new NineBackend.
    ///
    /// Returns an error if the tool cannot be found.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let program = find_program(config)?;
        log::debug!("using {}", program.display());
        Ok(Self {
            program,
            elevation: config.elevation.clone(),
        })
    }

    fn command(&self, args: &[String]) -> Command {
        let mut command = match &self.elevation {
            Some(elevation) => {
                let mut command = Command::new(&elevation.program);
                command.args(&elevation.args).arg(&self.program);
                command
            }
            None => Command::new(&self.program),
        };
        command.args(args);
        command
    }

    fn command_line(&self, shown_args: &[String]) -> String {
        let mut parts = Vec::new();
        if let Some(elevation) = &self.elevation {
            parts.push(elevation.program.clone());
            parts.extend(elevation.args.iter().cloned());
        }
        parts.push(self.program.display().to_string());
        parts.extend(shown_args.iter().cloned());
        parts.join(" ")
    }

    /// Run the tool and wait for it to exit.
    ///
    /// The child is always waited on before returning, including when
    /// writing to its stdin fails.
    fn run(&self, args: &[String], shown_args: &[String], stdin: Option<&str>) -> Result<CommandOutput> {
        let shown = self.command_line(shown_args);
        log::debug!("running: {shown}");

        let mut command = self.command(args);
        command
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn().map_err(|source| Error::Spawn {
            command: shown.clone(),
            source,
        })?;

        let mut write_error = None;
        if let (Some(data), Some(mut pipe)) = (stdin, child.stdin.take()) {
            if let Err(e) = pipe.write_all(data.as_bytes()) {
                // The tool may exit without reading its input.
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    write_error = Some(e);
                }
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|source| Error::Spawn {
                command: shown.clone(),
                source,
            })?;

        if let Some(e) = write_error {
            return Err(Error::Io(e));
        }

        let output = CommandOutput::from(output);
        log::trace!("{shown} exited with {:?}", output.exit_code);
        Ok(output)
    }

    fn list<T: DeserializeOwned>(&self, kind: ResourceKind) -> Result<T> {
        let args = vec![kind.noun().to_string(), "list".to_string(), "--json".to_string()];
        let output = self.run(&args, &args, None)?;

        if !output.success() {
            return Err(Error::QueryFailed {
                kind,
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        parse_listing(kind, &output.stdout)
    }
}

impl Backend for NineBackend {
    fn list_virtual_hosts(&self) -> Result<VirtualHostSnapshot> {
        self.list(ResourceKind::VirtualHost)
    }

    fn list_users(&self) -> Result<UserSnapshot> {
        self.list(ResourceKind::User)
    }

    fn execute(&self, request: &Request) -> Result<CommandOutput> {
        self.run(&request.args(), &request.redacted_args(), request.stdin())
    }
}

/// Parse the JSON array printed by a `list --json` command.
pub fn parse_listing<T: DeserializeOwned>(kind: ResourceKind, stdout: &str) -> Result<T> {
    serde_json::from_str(stdout.trim()).map_err(|source| Error::Parse { kind, source })
}

/// Locate the tool: explicit path first, then well-known directories, then `PATH`.
fn find_program(config: &BackendConfig) -> Result<PathBuf> {
    if let Some(path) = &config.path {
        if path.is_file() {
            return Ok(path.clone());
        }
        return Err(Error::ToolPathMissing(path.clone()));
    }

    if config.program.contains('/') {
        let path = PathBuf::from(&config.program);
        if path.is_file() {
            return Ok(path);
        }
        return Err(Error::ToolPathMissing(path));
    }

    let mut dirs: Vec<PathBuf> = SEARCH_DIRS.iter().map(PathBuf::from).collect();
    if let Some(path_var) = std::env::var_os("PATH") {
        dirs.extend(std::env::split_paths(&path_var));
    }

    for dir in &dirs {
        let candidate = dir.join(&config.program);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(Error::ToolNotFound {
        program: config.program.clone(),
        searched: format!("{} and PATH", SEARCH_DIRS.join(", ")),
    })
}
