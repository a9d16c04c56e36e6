use std::path::Path;
use std::process::{Command, Stdio};

/// Runs a command and returns only its exit status.
///
/// - Returns `Ok(())` if the command exits successfully (status code `0`).
/// - Returns `Err("non-zero exit")` if the command exits with a non-zero status.
/// - Returns `Err` containing the I/O error message if the process fails to start.
pub(crate) fn run_status(mut cmd: Command) -> Result<(), String> {
    let status_res = cmd.status();

    match status_res {
        Ok(status) => {
            if status.success() {
                Ok(())
            } else {
                Err(String::from("non-zero exit"))
            }
        }
        Err(e) => Err(format!("{}", e)),
    }
}

/// Runs a command and returns its trimmed standard output on success,
/// or its standard error as an `Err` on failure.
///
/// - If the command exits with a zero status, its `stdout` is captured,
///   converted to UTF-8 (lossy), trimmed, and returned as `Ok(String)`.
/// - If the command exits non-zero, its `stderr` is captured,
///   converted to UTF-8 (lossy), trimmed, and returned as `Err(String)`.
/// - If the process fails to spawn, the I/O error message is returned as `Err(String)`.
///
/// # Examples
///
/// ```ignore
/// use std::process::Command;
/// let mut cmd = Command::new("git");
/// cmd.arg("remote").arg("get-url").arg("origin");
/// match run_output(cmd) {
///     Ok(url) => println!("origin: {}", url),
///     Err(err) => eprintln!("git error: {}", err),
/// }
/// ```
pub(crate) fn run_output(mut cmd: Command) -> Result<String, String> {
    let out_res = cmd.output();
    match out_res {
        Ok(out) => {
            if out.status.success() {
                Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
            } else {
                Err(String::from_utf8_lossy(&out.stderr).trim().to_string())
            }
        }
        Err(e) => Err(format!("{}", e)),
    }
}

/// Builds a `git` command that runs inside `repo`.
fn git(repo: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(repo);
    cmd
}

/// Reports whether `repo` lies inside a Git work tree.
///
/// Runs `git rev-parse --is-inside-work-tree` and treats any failure as "no".
pub fn is_work_tree(repo: &Path) -> bool {
    let mut cmd = git(repo);
    cmd.arg("rev-parse").arg("--is-inside-work-tree");
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    match run_output(cmd) {
        Ok(out) => out == "true",
        Err(_) => false,
    }
}

/// Returns the URL configured for the remote `name`.
///
/// # Returns
///
/// * `Ok(String)` with the trimmed URL.
/// * `Err(String)` with Git's error output when the remote does not exist or
///   `repo` is not a repository.
pub fn remote_url(repo: &Path, name: &str) -> Result<String, String> {
    let mut cmd = git(repo);
    cmd.arg("remote").arg("get-url").arg(name);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    run_output(cmd)
}

/// Creates a new repository in `repo` with `git init`.
///
/// Git's own output is shown to the user.
pub fn init(repo: &Path) -> Result<(), String> {
    let mut cmd = git(repo);
    cmd.arg("init");
    cmd.stdout(Stdio::inherit());
    cmd.stderr(Stdio::inherit());
    run_status(cmd).map_err(|_| String::from("`git init` returned non-zero"))
}

/// Adds a new remote: `git remote add <name> <url>`.
pub fn remote_add(repo: &Path, name: &str, url: &str) -> Result<(), String> {
    let mut cmd = git(repo);
    cmd.arg("remote").arg("add").arg(name).arg(url);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    run_output(cmd)
        .map(|_| ())
        .map_err(|e| format!("`git remote add {}` failed: {}", name, e))
}

/// Points an existing remote at a new URL: `git remote set-url <name> <url>`.
pub fn remote_set_url(repo: &Path, name: &str, url: &str) -> Result<(), String> {
    let mut cmd = git(repo);
    cmd.arg("remote").arg("set-url").arg(name).arg(url);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    run_output(cmd)
        .map(|_| ())
        .map_err(|e| format!("`git remote set-url {}` failed: {}", name, e))
}

/// Stages a single path: `git add -- <path>`.
pub fn add(repo: &Path, path: &str) -> Result<(), String> {
    let mut cmd = git(repo);
    cmd.arg("add").arg("--").arg(path);
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::piped());
    run_output(cmd)
        .map(|_| ())
        .map_err(|e| format!("`git add {}` failed: {}", path, e))
}

/// Commits the staged changes with both author and committer dates forced
/// to `timestamp`.
///
/// Sets `GIT_AUTHOR_DATE` and `GIT_COMMITTER_DATE` for the child process
/// only. `timestamp` must be a date format Git understands, e.g.
/// `2024-01-01T00:00:00.000Z`.
///
/// # Notes
///
/// * Requires a configured `user.name` and `user.email`.
/// * Fails if nothing is staged.
pub fn commit_dated(repo: &Path, message: &str, timestamp: &str) -> Result<(), String> {
    let mut cmd = git(repo);
    cmd.arg("commit").arg("-m").arg(message);
    cmd.env("GIT_AUTHOR_DATE", timestamp);
    cmd.env("GIT_COMMITTER_DATE", timestamp);
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::piped());
    run_output(cmd)
        .map(|_| ())
        .map_err(|e| format!("`git commit` failed: {}", e))
}

/// Pushes the current branch and sets its upstream:
/// `git push -u <remote> HEAD`.
///
/// Standard input, output, and error are inherited so credential prompts and
/// progress reach the user.
pub fn push_upstream(repo: &Path, remote: &str) -> Result<(), String> {
    let mut cmd = git(repo);
    cmd.arg("push").arg("-u").arg(remote).arg("HEAD");
    cmd.stdin(Stdio::inherit());
    cmd.stdout(Stdio::inherit());
    cmd.stderr(Stdio::inherit());
    run_status(cmd).map_err(|_| format!("`git push -u {} HEAD` returned non-zero", remote))
}
