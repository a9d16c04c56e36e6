use crate::remote;

use chrono::NaiveDate;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Exactly `YYYY-MM-DD`, digits only.
static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

/// Validation rule applied to every answer before it is accepted.
///
/// Returns `Err(message)` to reject the input; the message is shown to the
/// user and the question is asked again.
pub type Validator<'v> = &'v dyn Fn(&str) -> Result<(), String>;

/// Abstraction over a string input prompt.
///
/// Implementors define how string input is collected from the user,
/// including any styling or interactivity. Implementations must keep asking
/// until `validate` accepts the answer.
pub trait StringPrompter {
    /// Prompt the user for a string input.
    ///
    /// # Parameters
    /// - `prompt`: The message shown to the user.
    /// - `default`: Value used if the user presses Enter without input.
    /// - `validate`: Rule the answer must satisfy.
    ///
    /// # Returns
    /// `Ok(String)` once a valid answer is collected, or an `Err(String)` describing the failure.
    fn prompt(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validate: Validator<'_>,
    ) -> Result<String, String>;
}

/// Abstraction over a boolean (yes/no) confirmation prompt.
pub trait ConfirmPrompter {
    /// Prompt the user for a yes/no confirmation.
    ///
    /// # Returns
    /// `Ok(true)` if confirmed, `Ok(false)` if declined, or `Err(String)` on input failure.
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, String>;
}

/// Default implementation of `StringPrompter` using `dialoguer::Input`.
///
/// Uses the `ColorfulTheme` and dialoguer's own re-prompt on validation failure.
pub struct DialoguerStringPrompter;

impl StringPrompter for DialoguerStringPrompter {
    fn prompt(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validate: Validator<'_>,
    ) -> Result<String, String> {
        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .validate_with(|value: &String| validate(value.as_str()));
        if let Some(d) = default {
            input = input.default(d.to_string());
        }
        match input.interact_text() {
            Ok(v) => Ok(v),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Default implementation of `ConfirmPrompter` using `dialoguer::Confirm`.
pub struct DialoguerConfirmPrompter;

impl ConfirmPrompter for DialoguerConfirmPrompter {
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, String> {
        let theme = ColorfulTheme::default();
        let confirm = Confirm::with_theme(&theme)
            .with_prompt(prompt)
            .default(default);
        match confirm.interact() {
            Ok(v) => Ok(v),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Accepts any answer.
pub fn accept_any(_: &str) -> Result<(), String> {
    Ok(())
}

/// Accepts a non-empty repository name.
pub fn validate_repo_name(input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        Err(String::from("Please enter a repository name"))
    } else {
        Ok(())
    }
}

/// Accepts a URL of the shape `github.com/<owner>/<repo>`.
pub fn validate_repo_url(input: &str) -> Result<(), String> {
    if remote::is_github_url(input) {
        Ok(())
    } else {
        Err(String::from("Please enter a valid GitHub repository URL"))
    }
}

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// Rejects other layouts (`2024-1-5`, `05/01/2024`) and impossible dates
/// (`2023-02-29`).
pub fn parse_date(input: &str) -> Result<NaiveDate, String> {
    let input = input.trim();
    if !DATE_SHAPE.is_match(input) {
        return Err(String::from("Please enter a valid date in YYYY-MM-DD format"));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| String::from("Please enter a valid date in YYYY-MM-DD format"))
}

/// Accepts input that [`parse_date`] accepts.
pub fn validate_date(input: &str) -> Result<(), String> {
    parse_date(input).map(|_| ())
}

/// Parses a positive integer commit count.
pub fn parse_commit_count(input: &str) -> Result<u32, String> {
    match input.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(String::from("Please enter a positive integer")),
    }
}

/// Accepts input that [`parse_commit_count`] accepts.
pub fn validate_commit_count(input: &str) -> Result<(), String> {
    parse_commit_count(input).map(|_| ())
}

/// Ask where the repository should live.
pub fn ask_directory<P: StringPrompter>(prompter: &mut P, default: &Path) -> Result<PathBuf, String> {
    let default = default.to_string_lossy();
    let answer = prompter.prompt(
        "Where would you like to create your repository?",
        Some(&*default),
        &accept_any,
    )?;
    Ok(PathBuf::from(answer.trim()))
}

/// Ask for the name of the GitHub repository to use or create.
pub fn ask_repo_name<P: StringPrompter>(prompter: &mut P, default: &str) -> Result<String, String> {
    let answer = prompter.prompt(
        "Enter a name for your new GitHub repository",
        Some(default),
        &validate_repo_name,
    )?;
    Ok(answer.trim().to_string())
}

/// Ask whether a newly created repository should be private.
pub fn ask_private<P: ConfirmPrompter>(prompter: &mut P) -> Result<bool, String> {
    prompter.confirm("Should the repository be private?", true)
}

/// Ask for a GitHub repository URL, returned normalized to end in `.git`.
pub fn ask_repo_url<P: StringPrompter>(prompter: &mut P) -> Result<String, String> {
    let answer = prompter.prompt(
        "Enter your GitHub repository URL (e.g., https://github.com/username/repo)",
        None,
        &validate_repo_url,
    )?;
    Ok(remote::normalize_repo_url(&answer))
}

/// Ask for one end of the commit date range.
pub fn ask_date<P: StringPrompter>(prompter: &mut P, which_end: &str) -> Result<NaiveDate, String> {
    let prompt = format!("Enter the {} date for your commits (YYYY-MM-DD)", which_end);
    let answer = prompter.prompt(&prompt, None, &validate_date)?;
    parse_date(&answer)
}

/// Ask how many commits to create.
pub fn ask_commit_count<P: StringPrompter>(prompter: &mut P) -> Result<u32, String> {
    let answer = prompter.prompt(
        "How many commits do you want to create?",
        None,
        &validate_commit_count,
    )?;
    parse_commit_count(&answer)
}

/// Ask whether to pick another repository name after a collision.
pub fn confirm_retry_name<P: ConfirmPrompter>(prompter: &mut P) -> Result<bool, String> {
    prompter.confirm("Try a different repository name?", true)
}

/// Ask whether to push the new history.
pub fn confirm_push<P: ConfirmPrompter>(prompter: &mut P) -> Result<bool, String> {
    prompter.confirm("Push commits to GitHub?", true)
}
