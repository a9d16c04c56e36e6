use crate::git::{run_output, run_status};

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Repository visibility passed to `gh repo create`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Private,
    Public,
}

impl Visibility {
    pub fn from_private(private: bool) -> Self {
        if private {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }

    fn flag(self) -> &'static str {
        match self {
            Visibility::Private => "--private",
            Visibility::Public => "--public",
        }
    }
}

/// Why `gh repo create` did not produce a repository.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateError {
    /// The account already owns a repository with this name.
    #[error("a repository with that name already exists")]
    NameTaken,
    /// Any other failure, carrying the CLI's error output.
    #[error("{0}")]
    Failed(String),
}

/// Operations on the hosting side of a repository.
///
/// The initializer talks to GitHub only through this trait, so tests can
/// substitute a scripted host for the real `gh` binary.
pub trait RepoHost {
    /// Whether the host CLI is installed and runnable.
    fn is_available(&mut self) -> bool;

    /// Whether the host CLI has a logged-in account.
    fn is_authenticated(&mut self) -> bool;

    /// Whether a repository called `name` can be viewed.
    fn repo_exists(&mut self, name: &str) -> bool;

    /// Creates a repository called `name`.
    fn create_repo(&mut self, name: &str, visibility: Visibility) -> Result<(), CreateError>;

    /// The web URL of repository `name`, without a `.git` suffix.
    fn repo_url(&mut self, name: &str) -> Result<String, String>;
}

/// [`RepoHost`] backed by the GitHub CLI (`gh`).
///
/// Every invocation runs with `workdir` as its current directory.
pub struct GhCli {
    workdir: PathBuf,
}

impl GhCli {
    pub fn new(workdir: &Path) -> Self {
        GhCli {
            workdir: workdir.to_path_buf(),
        }
    }

    fn gh(&self) -> Command {
        let mut cmd = Command::new("gh");
        cmd.current_dir(&self.workdir);
        cmd
    }
}

impl RepoHost for GhCli {
    fn is_available(&mut self) -> bool {
        if which::which("gh").is_err() {
            return false;
        }
        let mut cmd = self.gh();
        cmd.arg("--version");
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());
        run_status(cmd).is_ok()
    }

    fn is_authenticated(&mut self) -> bool {
        let mut cmd = self.gh();
        cmd.arg("auth").arg("status");
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());
        run_status(cmd).is_ok()
    }

    fn repo_exists(&mut self, name: &str) -> bool {
        let mut cmd = self.gh();
        cmd.arg("repo").arg("view").arg(name);
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());
        run_status(cmd).is_ok()
    }

    fn create_repo(&mut self, name: &str, visibility: Visibility) -> Result<(), CreateError> {
        let mut cmd = self.gh();
        cmd.arg("repo").arg("create").arg(name).arg(visibility.flag());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        match run_output(cmd) {
            Ok(out) => {
                if !out.is_empty() {
                    println!("{}", out);
                }
                Ok(())
            }
            Err(e) => Err(classify_create_error(&e)),
        }
    }

    fn repo_url(&mut self, name: &str) -> Result<String, String> {
        let mut cmd = self.gh();
        cmd.arg("repo")
            .arg("view")
            .arg(name)
            .arg("--json")
            .arg("url")
            .arg("-q")
            .arg(".url");
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        run_output(cmd).map_err(|e| format!("`gh repo view {}` failed: {}", name, e))
    }
}

/// Maps the error output of `gh repo create` to a [`CreateError`].
///
/// GitHub reports a collision as "Name already exists on this account".
pub(crate) fn classify_create_error(stderr: &str) -> CreateError {
    if stderr.to_lowercase().contains("name already exists") {
        CreateError::NameTaken
    } else {
        CreateError::Failed(stderr.to_string())
    }
}
