use crate::git;

use chrono::{NaiveDate, SecondsFormat, Utc};
use rand::Rng;
use std::fs;
use std::path::Path;

/// ISO-8601 timestamp for midnight UTC on `date`, e.g. `2024-01-01T00:00:00.000Z`.
pub fn commit_timestamp(date: NaiveDate) -> String {
    date.and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Commit message for a backdated commit, e.g. `Commit for Mon Jan 01 2024`.
pub fn commit_message(date: NaiveDate) -> String {
    format!("Commit for {}", date.format("%a %b %d %Y"))
}

/// Marker file name of the form `commit_<millis>_<suffix>.txt`.
pub fn marker_file_name(millis: i64, suffix: u32) -> String {
    format!("commit_{}_{}.txt", millis, suffix)
}

/// Picks a marker file name that does not exist yet in `repo`.
fn unused_marker_name<R: Rng + ?Sized>(repo: &Path, rng: &mut R) -> String {
    loop {
        let name = marker_file_name(Utc::now().timestamp_millis(), rng.gen_range(0..10_000));
        if !repo.join(&name).exists() {
            return name;
        }
    }
}

/// Creates one commit in `repo` dated to midnight UTC on `date`.
///
/// Writes a fresh marker file containing `Backdated commit: <timestamp>`,
/// stages it, and commits it with author and committer dates set to the
/// timestamp.
///
/// # Returns
///
/// * `Ok(String)` with the marker file name.
/// * `Err(String)` if writing, staging or committing fails. The marker file
///   is left on disk in that case.
pub fn create_backdated_commit<R: Rng + ?Sized>(
    repo: &Path,
    date: NaiveDate,
    rng: &mut R,
) -> Result<String, String> {
    let timestamp = commit_timestamp(date);
    let name = unused_marker_name(repo, rng);

    if let Err(e) = fs::write(repo.join(&name), format!("Backdated commit: {}", timestamp)) {
        return Err(format!("write {} failed: {}", name, e));
    }

    git::add(repo, &name)?;
    git::commit_dated(repo, &commit_message(date), &timestamp)?;

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::tests::{git_available, git_ok, init_repo};
    use rand::{SeedableRng, rngs::StdRng};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn timestamp_is_utc_midnight() {
        assert_eq!(commit_timestamp(ymd(2024, 1, 1)), "2024-01-01T00:00:00.000Z");
        assert_eq!(commit_timestamp(ymd(1999, 12, 31)), "1999-12-31T00:00:00.000Z");
    }

    #[test]
    fn message_names_the_day() {
        assert_eq!(commit_message(ymd(2024, 1, 1)), "Commit for Mon Jan 01 2024");
    }

    #[test]
    fn marker_name_layout() {
        assert_eq!(marker_file_name(1700000000123, 42), "commit_1700000000123_42.txt");
    }

    #[test]
    fn commit_carries_requested_dates() {
        if !git_available() {
            return;
        }
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        init_repo(dir.path());
        let mut rng = StdRng::seed_from_u64(5);

        let name = create_backdated_commit(dir.path(), ymd(2021, 6, 15), &mut rng)
            .expect("backdated commit failed");

        let content = fs::read_to_string(dir.path().join(&name)).expect("read failed");
        assert_eq!(content, "Backdated commit: 2021-06-15T00:00:00.000Z");

        let log = git_ok(dir.path(), &["log", "-1", "--format=%aI|%cI|%s"]);
        assert_eq!(
            log,
            "2021-06-15T00:00:00+00:00|2021-06-15T00:00:00+00:00|Commit for Tue Jun 15 2021"
        );
    }

    #[test]
    fn several_commits_on_one_day_use_distinct_files() {
        if !git_available() {
            return;
        }
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        init_repo(dir.path());
        // Same seed for every call: suffixes repeat, so names must still differ.
        let day = ymd(2022, 3, 1);
        let mut names = Vec::new();
        for _ in 0..3 {
            let mut rng = StdRng::seed_from_u64(0);
            names.push(create_backdated_commit(dir.path(), day, &mut rng).expect("commit failed"));
        }
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 3);

        let count = git_ok(dir.path(), &["rev-list", "--count", "HEAD"]);
        assert_eq!(count, "3");
    }

    #[test]
    fn write_failure_is_reported() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let missing = dir.path().join("not-a-repo");
        let mut rng = StdRng::seed_from_u64(1);
        // Directory does not exist, so even the write fails.
        assert!(create_backdated_commit(&missing, ymd(2024, 1, 1), &mut rng).is_err());
    }
}
