use crate::gh::{CreateError, RepoHost, Visibility};
use crate::git;
use crate::prompt::{self, ConfirmPrompter, StringPrompter};

use console::style;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// `github.com/<owner>/<repo>` anywhere in a URL.
static GITHUB_REPO_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com/[\w-]+/[\w-]+").expect("GitHub URL pattern is valid")
});

/// Name of the remote the history is published to.
pub const ORIGIN: &str = "origin";

/// Where the repository's remote came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOrigin {
    /// An `origin` remote was already configured locally.
    Existing,
    /// Found or created through the GitHub CLI.
    Hosted,
    /// Typed in by the user.
    Manual,
}

/// The remote the new history will be pushed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTarget {
    pub url: String,
    pub origin: TargetOrigin,
}

/// Result of repository setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Setup {
    /// The local repository exists and `origin` points at the target.
    Ready(RepositoryTarget),
    /// The user gave up choosing a repository name.
    Cancelled,
}

/// Whether `input` looks like a GitHub repository URL
/// (`github.com/<owner>/<repo>` anywhere in the string).
pub fn is_github_url(input: &str) -> bool {
    GITHUB_REPO_URL.is_match(input.trim())
}

/// Ensures a repository URL ends in `.git`.
///
/// A single trailing `/` is dropped before the suffix is appended. URLs that
/// already end in `.git` are returned unchanged.
///
/// # Examples
///
/// ```
/// use gitaura::remote::normalize_repo_url;
///
/// assert_eq!(
///     normalize_repo_url("https://github.com/acme/widgets/"),
///     "https://github.com/acme/widgets.git"
/// );
/// ```
pub fn normalize_repo_url(input: &str) -> String {
    let input = input.trim();
    if input.ends_with(".git") {
        return input.to_string();
    }
    let base = input.strip_suffix('/').unwrap_or(input);
    format!("{}.git", base)
}

/// Makes sure `repo` is a Git repository whose `origin` points at GitHub.
///
/// 1. An existing `origin` is adopted as-is; nothing is created or changed.
/// 2. With an authenticated GitHub CLI, the user names a repository which is
///    reused if it exists and created otherwise. A name collision on create
///    asks for another name; any other create failure is returned as an error.
/// 3. Without the CLI, the user types a GitHub URL.
///
/// The repository is then initialized if needed and `origin` is attached.
///
/// # Side effects
///
/// May create `repo/.git` and may create a repository on the user's GitHub
/// account. Both are announced on stdout before they happen.
pub fn setup<H, S, C>(
    repo: &Path,
    host: &mut H,
    strings: &mut S,
    confirms: &mut C,
) -> Result<Setup, String>
where
    H: RepoHost,
    S: StringPrompter,
    C: ConfirmPrompter,
{
    let is_repo = git::is_work_tree(repo);

    if is_repo {
        if let Ok(url) = git::remote_url(repo, ORIGIN) {
            println!("{}", style("Git repository with origin already exists.").green());
            println!("Using existing origin: {}", style(&url).cyan());
            return Ok(Setup::Ready(RepositoryTarget {
                url,
                origin: TargetOrigin::Existing,
            }));
        }
    }

    let gh_available = host.is_available();
    let gh_authenticated = gh_available && host.is_authenticated();

    let target = if gh_authenticated {
        println!(
            "{}",
            style("GitHub CLI detected and authenticated!").green().bold()
        );
        match hosted_target(repo, host, strings, confirms)? {
            Some(t) => t,
            None => return Ok(Setup::Cancelled),
        }
    } else {
        if gh_available {
            println!(
                "{}",
                style(
                    "GitHub CLI detected but not authenticated. Run `gh auth login` and try again, \
                     or create a GitHub repository and enter its URL."
                )
                .yellow()
            );
        } else {
            println!(
                "{}",
                style("GitHub CLI not detected. Using manual repository URL entry.").yellow()
            );
        }
        RepositoryTarget {
            url: prompt::ask_repo_url(strings)?,
            origin: TargetOrigin::Manual,
        }
    };

    if !is_repo {
        println!("{}", style("Initializing git repository...").cyan());
        git::init(repo)?;
    }

    println!("{}", style("Adding GitHub remote repository...").cyan());
    attach_origin(repo, &target.url)?;

    println!(
        "{}",
        style("Git repository initialized successfully!").green().bold()
    );
    println!("GitHub remote added: {}", style(&target.url).cyan());

    Ok(Setup::Ready(target))
}

/// Points `origin` at `url`, replacing the URL if the remote already exists.
fn attach_origin(repo: &Path, url: &str) -> Result<(), String> {
    if git::remote_url(repo, ORIGIN).is_ok() {
        git::remote_set_url(repo, ORIGIN, url)
    } else {
        git::remote_add(repo, ORIGIN, url)
    }
}

/// Asks for a repository name until one is adopted or created.
///
/// Returns `Ok(None)` when the user declines to retry after a collision.
fn hosted_target<H, S, C>(
    repo: &Path,
    host: &mut H,
    strings: &mut S,
    confirms: &mut C,
) -> Result<Option<RepositoryTarget>, String>
where
    H: RepoHost,
    S: StringPrompter,
    C: ConfirmPrompter,
{
    let default_name = repo
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("gitaura")
        .to_string();

    loop {
        let name = prompt::ask_repo_name(strings, &default_name)?;
        let private = prompt::ask_private(confirms)?;

        if host.repo_exists(&name) {
            println!(
                "Repository {} already exists. Using the existing repository.",
                style(&name).cyan()
            );
        } else {
            println!("Creating GitHub repository: {}...", style(&name).cyan());
            match host.create_repo(&name, Visibility::from_private(private)) {
                Ok(()) => {}
                Err(CreateError::NameTaken) => {
                    eprintln!(
                        "{}",
                        style("A repository with that name already exists.").yellow()
                    );
                    if prompt::confirm_retry_name(confirms)? {
                        continue;
                    }
                    return Ok(None);
                }
                Err(CreateError::Failed(e)) => {
                    return Err(format!("Failed to create repository: {}", e));
                }
            }
        }

        let url = host.repo_url(&name)?;
        return Ok(Some(RepositoryTarget {
            url: format!("{}.git", url),
            origin: TargetOrigin::Hosted,
        }));
    }
}
