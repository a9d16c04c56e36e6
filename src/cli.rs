use crate::gh::{GhCli, RepoHost};
use crate::prompt::{ConfirmPrompter, StringPrompter};
use crate::{backdate, banner::print_plan_banner, distribute, git, prompt, remote};

use console::style;
use rand::{SeedableRng, rngs::StdRng};
use std::{env, fs, path::Path, path::PathBuf};

/// Name of the folder under the home directory used when no `--dir` is given.
const DEFAULT_FOLDER: &str = "gitaura";

/// Settings taken from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Seed for the commit distribution; random when absent.
    pub seed: Option<u64>,
    /// Default answer for the directory prompt.
    pub dir: Option<PathBuf>,
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    Run(Options),
}

/// Parses arguments (without the program name) into a [`Command`].
///
/// `--help` and `--version` win over everything else. Unknown flags and
/// missing or malformed values are errors.
pub fn parse_args<I, S>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        return Ok(Command::Help);
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        return Ok(Command::Version);
    }

    let mut opts = Options::default();
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--seed" => {
                let value = it.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid --seed value: {}", value))?;
                opts.seed = Some(seed);
            }
            "--dir" => {
                let value = it.next().ok_or("--dir needs a value")?;
                opts.dir = Some(PathBuf::from(value));
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }

    Ok(Command::Run(opts))
}

/// Prints usage information to stdout.
fn print_help() {
    println!(
        "\
gitaura {}

Create a git repository with commits spread across a date range.

USAGE:
    gitaura [OPTIONS]

OPTIONS:
    -h, --help         Print help information
    -V, --version      Print version information
    --seed <N>         Seed the commit distribution for a reproducible plan
    --dir <PATH>       Default repository directory (otherwise ~/{})

DESCRIPTION:
    This tool asks for a directory, connects it to a GitHub repository
    (through the GitHub CLI when it is installed and logged in, otherwise
    by URL), then asks for a date range and a commit count. Commits are
    spread at random over the days of the range, each dated to midnight UTC,
    and can be pushed to `origin` at the end.",
        env!("CARGO_PKG_VERSION"),
        DEFAULT_FOLDER
    );
}

/// Prints `msg` in red to stderr.
fn report(msg: &str) {
    eprintln!("{}", style(msg).red().bold());
}

/// Default directory: `--dir`, else `<home>/gitaura`.
fn default_dir(opts: &Options) -> Result<PathBuf, String> {
    if let Some(d) = &opts.dir {
        return Ok(d.clone());
    }
    match dirs::home_dir() {
        Some(home) => Ok(home.join(DEFAULT_FOLDER)),
        None => Err(String::from("cannot determine home directory; pass --dir")),
    }
}

/// Creates `dir` if it is missing, narrating either way.
///
/// Fails when `dir` exists but is not a directory.
fn ensure_dir(dir: &Path) -> Result<(), String> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(format!("{} exists and is not a directory", dir.display()));
        }
        println!("Directory already exists: {}", style(dir.display()).cyan());
        return Ok(());
    }
    println!("Creating directory: {}", style(dir.display()).cyan());
    fs::create_dir_all(dir).map_err(|e| format!("cannot create {}: {}", dir.display(), e))
}

/// Writes every planned commit into `repo`, oldest day first.
fn write_history(repo: &Path, plan: &distribute::CommitPlan, rng: &mut StdRng) -> Result<(), String> {
    println!("{}", style("Creating backdated commits:").cyan());
    for (date, count) in plan.iter() {
        if count == 0 {
            continue;
        }
        println!(
            "- Creating {} commit(s) for {}",
            count,
            date.format("%a %b %d %Y")
        );
        for _ in 0..count {
            backdate::create_backdated_commit(repo, date, rng)?;
        }
    }
    println!("{}", style("All commits created successfully!").green().bold());
    Ok(())
}

/// Runs the interactive flow against `opts`.
///
/// Returns `Ok(0)` on success or cancellation and `Err(message)` on any failure.
fn run(opts: &Options) -> Result<i32, String> {
    let mut strings = prompt::DialoguerStringPrompter;
    let mut confirms = prompt::DialoguerConfirmPrompter;

    let default = default_dir(opts)?;
    let repo = prompt::ask_directory(&mut strings, &default)?;
    ensure_dir(&repo)?;
    println!("Working in: {}", style(repo.display()).cyan());

    let mut host = GhCli::new(&repo);
    run_in_repo(opts, &repo, &mut host, &mut strings, &mut confirms)
}

/// Everything after the directory is known: remote setup, plan, commits, push.
///
/// Returns `Ok(0)` when the history was written (pushed or not) and when the
/// user cancels repository setup.
fn run_in_repo<H, S, C>(
    opts: &Options,
    repo: &Path,
    host: &mut H,
    strings: &mut S,
    confirms: &mut C,
) -> Result<i32, String>
where
    H: RepoHost,
    S: StringPrompter,
    C: ConfirmPrompter,
{
    let target = match remote::setup(repo, host, strings, confirms)? {
        remote::Setup::Ready(t) => t,
        remote::Setup::Cancelled => {
            println!(
                "{}",
                style("Canceled by user. No commits created.").yellow().bold()
            );
            return Ok(0);
        }
    };

    let start = prompt::ask_date(strings, "start")?;
    let end = prompt::ask_date(strings, "end")?;
    let count = prompt::ask_commit_count(strings)?;

    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    println!("{}", style("Distributing commits across date range...").cyan());
    let plan = distribute::distribute(start, end, count, &mut rng).map_err(|e| e.to_string())?;

    print_plan_banner(repo, &target.url, &plan);

    write_history(repo, &plan, &mut rng)?;

    if prompt::confirm_push(confirms)? {
        println!("{}", style("Pushing commits to GitHub...").cyan());
        git::push_upstream(repo, remote::ORIGIN)?;
        println!("{}", style("✅ Commits pushed successfully!").green().bold());
    } else {
        println!(
            "{}",
            style("Skipped push. Run `git push -u origin HEAD` when ready.").yellow()
        );
    }

    Ok(0)
}

/// Main CLI entry point for `gitaura`.
///
/// This function:
/// 1. Parses CLI flags (`--help`, `--version`, `--seed`, `--dir`).
/// 2. Verifies that `git` is installed.
/// 3. Asks for the target directory and creates it if needed.
/// 4. Connects the directory to a GitHub repository.
/// 5. Asks for the date range and commit count and builds the plan.
/// 6. Writes the backdated commits.
/// 7. Optionally pushes them to `origin`.
///
/// # Exit Codes
///
/// * `0` – Success, help/version output, or cancellation by the user.
/// * Non-zero – Any failure along the way; the message is printed to stderr.
pub fn entry() -> Result<i32, ()> {
    let opts = match parse_args(env::args().skip(1)) {
        Ok(Command::Help) => {
            print_help();
            return Ok(0);
        }
        Ok(Command::Version) => {
            println!("gitaura {}", env!("CARGO_PKG_VERSION"));
            return Ok(0);
        }
        Ok(Command::Run(opts)) => opts,
        Err(e) => {
            report(&format!("Error: {} (see --help)", e));
            return Err(());
        }
    };

    if which::which("git").is_err() {
        report("Error: `git` not found in PATH.");
        return Err(());
    }

    match run(&opts) {
        Ok(code) => Ok(code),
        Err(e) => {
            report(&format!("An error occurred: {}", e));
            Err(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gh::CreateError;
    use crate::git::tests::{add_bare_origin, git_available, git_ok, init_repo};
    use crate::prompt::tests::{ScriptedConfirmer, ScriptedPrompter};
    use crate::remote::tests::{MockHost, UntouchableHost};

    #[test]
    fn no_arguments_runs_with_defaults() {
        let cmd = parse_args(Vec::<String>::new()).unwrap();
        assert_eq!(cmd, Command::Run(Options::default()));
    }

    #[test]
    fn seed_and_dir_are_parsed() {
        let cmd = parse_args(["--seed", "42", "--dir", "/tmp/history"]).unwrap();
        assert_eq!(
            cmd,
            Command::Run(Options {
                seed: Some(42),
                dir: Some(PathBuf::from("/tmp/history")),
            })
        );
    }

    #[test]
    fn help_wins_over_other_flags() {
        assert_eq!(parse_args(["--seed", "1", "-h"]).unwrap(), Command::Help);
        assert_eq!(parse_args(["--version"]).unwrap(), Command::Version);
    }

    #[test]
    fn bad_arguments_are_errors() {
        assert!(parse_args(["--seed"]).is_err());
        assert!(parse_args(["--seed", "abc"]).is_err());
        assert!(parse_args(["--dir"]).is_err());
        assert!(parse_args(["--manual"]).is_err());
    }

    #[test]
    fn dir_option_overrides_home_default() {
        let opts = Options {
            seed: None,
            dir: Some(PathBuf::from("/srv/repo")),
        };
        assert_eq!(default_dir(&opts).unwrap(), PathBuf::from("/srv/repo"));
    }

    #[test]
    fn ensure_dir_creates_nested_directories() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let nested = tmp.path().join("a").join("b");
        ensure_dir(&nested).expect("ensure_dir failed");
        assert!(nested.is_dir());
        ensure_dir(&nested).expect("second ensure_dir failed");
    }

    #[test]
    fn ensure_dir_rejects_a_regular_file() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let file = tmp.path().join("plain.txt");
        fs::write(&file, "not a directory").expect("write failed");

        let err = ensure_dir(&file).unwrap_err();
        assert!(err.ends_with("exists and is not a directory"));
    }

    #[test]
    fn history_follows_the_plan() {
        if !git_available() {
            return;
        }
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        init_repo(tmp.path());

        let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = chrono::NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        let plan = distribute::distribute(start, end, 5, &mut rng).unwrap();

        write_history(tmp.path(), &plan, &mut rng).expect("write_history failed");

        let log = git_ok(tmp.path(), &["log", "--reverse", "--format=%aI"]);
        let dates: Vec<&str> = log.lines().collect();
        assert_eq!(dates.len(), 5);

        let mut expected = Vec::new();
        for (date, count) in plan.iter() {
            for _ in 0..count {
                expected.push(format!("{}T00:00:00+00:00", date.format("%Y-%m-%d")));
            }
        }
        assert_eq!(dates, expected);
    }

    fn seeded() -> Options {
        Options {
            seed: Some(7),
            dir: None,
        }
    }

    #[test]
    fn declined_push_leaves_origin_untouched() {
        if !git_available() {
            return;
        }
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let bare = tempfile::tempdir().expect("failed to create bare dir");
        init_repo(tmp.path());
        add_bare_origin(tmp.path(), bare.path());

        let mut strings = ScriptedPrompter::new(&["2024-01-01", "2024-01-03", "4"]);
        let mut confirms = ScriptedConfirmer::new(&[false]);
        let code = run_in_repo(
            &seeded(),
            tmp.path(),
            &mut UntouchableHost,
            &mut strings,
            &mut confirms,
        )
        .expect("run failed");

        assert_eq!(code, 0);
        assert_eq!(git_ok(tmp.path(), &["rev-list", "--count", "HEAD"]), "4");
        assert_eq!(confirms.prompts, vec!["Push commits to GitHub?"]);
        assert_eq!(git_ok(bare.path(), &["for-each-ref"]), "");
    }

    #[test]
    fn accepted_push_publishes_and_tracks() {
        if !git_available() {
            return;
        }
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let bare = tempfile::tempdir().expect("failed to create bare dir");
        init_repo(tmp.path());
        add_bare_origin(tmp.path(), bare.path());

        let mut strings = ScriptedPrompter::new(&["2024-03-01", "2024-03-02", "3"]);
        let mut confirms = ScriptedConfirmer::new(&[true]);
        let code = run_in_repo(
            &seeded(),
            tmp.path(),
            &mut UntouchableHost,
            &mut strings,
            &mut confirms,
        )
        .expect("run failed");

        assert_eq!(code, 0);
        let branch = git_ok(tmp.path(), &["rev-parse", "--abbrev-ref", "HEAD"]);
        let upstream = git_ok(tmp.path(), &["rev-parse", "--abbrev-ref", "@{u}"]);
        assert_eq!(upstream, format!("origin/{}", branch));
        assert_eq!(git_ok(bare.path(), &["rev-list", "--count", &branch]), "3");
    }

    #[test]
    fn inverted_range_aborts_before_any_commit() {
        if !git_available() {
            return;
        }
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let bare = tempfile::tempdir().expect("failed to create bare dir");
        init_repo(tmp.path());
        add_bare_origin(tmp.path(), bare.path());

        let mut strings = ScriptedPrompter::new(&["2024-01-03", "2024-01-01", "2"]);
        let mut confirms = ScriptedConfirmer::new(&[]);
        let err = run_in_repo(
            &seeded(),
            tmp.path(),
            &mut UntouchableHost,
            &mut strings,
            &mut confirms,
        )
        .unwrap_err();

        assert!(err.contains("must not be before"));
        assert!(confirms.prompts.is_empty());
    }

    #[test]
    fn cancelled_setup_skips_date_prompts() {
        if !git_available() {
            return;
        }
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let mut host = MockHost::new(true, true);
        host.create_results.push_back(Err(CreateError::NameTaken));

        let mut strings = ScriptedPrompter::new(&["taken"]);
        // private? yes, retry? no
        let mut confirms = ScriptedConfirmer::new(&[true, false]);
        let code = run_in_repo(&seeded(), tmp.path(), &mut host, &mut strings, &mut confirms)
            .expect("run failed");

        assert_eq!(code, 0);
        assert_eq!(strings.prompts, vec!["Enter a name for your new GitHub repository"]);
        assert_eq!(
            confirms.prompts,
            vec!["Should the repository be private?", "Try a different repository name?"]
        );
        assert!(!tmp.path().join(".git").exists());
    }
}
