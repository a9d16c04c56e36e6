use crate::distribute::CommitPlan;

use console::{measure_text_width, style};
use std::iter;
use std::path::Path;

/// Prints a boxed summary of the history about to be written.
///
/// The box is sized to the widest **visible** line, using
/// [`console::measure_text_width`] so ANSI color codes in the content do not
/// throw off the padding. Borders are styled separately from the content.
///
/// # Parameters
///
/// * `repo` – The directory the commits are written to.
/// * `remote` – The `origin` URL the history may be pushed to.
/// * `plan` – The per-day commit counts.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use gitaura::banner::print_plan_banner;
/// use gitaura::distribute::distribute;
/// use std::path::Path;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let plan = distribute(day, day, 3, &mut rand::thread_rng()).unwrap();
/// print_plan_banner(Path::new("/tmp/gitaura"), "https://github.com/me/gitaura.git", &plan);
/// ```
pub fn print_plan_banner(repo: &Path, remote: &str, plan: &CommitPlan) {
    let lines = banner_lines(repo, remote, plan);

    let max_width = lines
        .iter()
        .map(|l| measure_text_width(l))
        .max()
        .unwrap_or(0)
        + 2;

    let border = "═".repeat(max_width);
    let top = style(format!("╔{}╗", border)).blue().bold();
    let bottom = style(format!("╚{}╝", border)).blue().bold();
    let left = style("║ ").blue().bold().to_string();
    let right = style("║").blue().bold().to_string();

    println!();
    println!("{top}");
    for line in lines {
        let visible = measure_text_width(&line);
        let pad = max_width - visible;
        println!("{}{}{}{}", left, line, " ".repeat(pad - 1), right);
    }
    println!("{bottom}");
    println!();
}

/// Constructs the lines of the plan banner.
///
/// Some lines carry ANSI styling; measure them with
/// `console::measure_text_width`, not `str::len()`.
fn banner_lines(repo: &Path, remote: &str, plan: &CommitPlan) -> Vec<String> {
    let range = plan.range();
    let top = ["Backdated commit plan", ""].into_iter().map(|s| s.to_string());

    let summary = vec![
        format!("Repository: {}", repo.display()),
        format!("Remote:     {}", remote),
        format!(
            "Dates:      {} .. {} ({} days)",
            range.start().format("%Y-%m-%d"),
            range.end().format("%Y-%m-%d"),
            range.days()
        ),
        format!(
            "Commits:    {} across {} active day(s)",
            style(plan.total()).cyan().bold(),
            plan.active_days()
        ),
    ]
    .into_iter();

    let bottom = iter::once(String::new()).chain(
        [
            "One marker file and one commit per planned commit,",
            "with author and committer dates set to midnight UTC.",
        ]
        .into_iter()
        .map(|s| style(s).yellow().to_string()),
    );

    top.chain(summary).chain(bottom).collect()
}
