use std::path::Path;

use chrono::{DateTime, FixedOffset};

use super::process::{GIT_TIMEOUT, run};
use crate::model::project::{Commit, GitInfo, GitStatus};

fn run_git(path: &Path, args: &[&str]) -> Option<String> {
    run("git", args, path, GIT_TIMEOUT)
}

/// Gather the git summary for a project directory
pub fn git_info(path: &Path) -> GitInfo {
    if !path.join(".git").exists() {
        return GitInfo::default();
    }

    let branch = run_git(path, &["rev-parse", "--abbrev-ref", "HEAD"]).filter(|b| !b.is_empty());

    let (last_commit_date, last_commit_message) = run_git(path, &["log", "-1", "--format=%ci|%s"])
        .and_then(|line| parse_last_commit(&line))
        .map_or((None, None), |(date, msg)| (date, Some(msg)));

    let remote_url =
        run_git(path, &["remote", "get-url", "origin"]).filter(|url| !url.is_empty());

    let uncommitted_count = run_git(path, &["status", "--porcelain"])
        .map_or(0, |out| out.lines().filter(|l| !l.is_empty()).count());

    GitInfo {
        status: if uncommitted_count > 0 {
            GitStatus::Dirty
        } else {
            GitStatus::Clean
        },
        branch,
        last_commit_date,
        last_commit_message,
        remote_url,
        uncommitted_count,
    }
}

/// Most recent `count` commits, newest first
pub fn recent_commits(path: &Path, count: usize) -> Vec<Commit> {
    let limit = format!("-{}", count);
    match run_git(path, &["log", &limit, "--format=%H|%s|%ci|%an"]) {
        Some(output) => parse_commits(&output),
        None => Vec::new(),
    }
}

/// Parse `%ci|%s` output. The subject may itself contain `|`.
fn parse_last_commit(line: &str) -> Option<(Option<DateTime<FixedOffset>>, String)> {
    let (date, message) = line.split_once('|')?;
    Some((parse_git_date(date), message.trim().to_string()))
}

/// Parse `%H|%s|%ci|%an` lines. The author is the last field, so a `|` in
/// the subject is kept as part of the message.
fn parse_commits(output: &str) -> Vec<Commit> {
    output
        .lines()
        .filter_map(|line| {
            let (hash, rest) = line.split_once('|')?;
            let (rest, author) = rest.rsplit_once('|')?;
            let (message, date) = rest.rsplit_once('|')?;
            Some(Commit {
                hash: hash.chars().take(7).collect(),
                message: message.to_string(),
                date: parse_git_date(date),
                author: author.to_string(),
            })
        })
        .collect()
}

/// Parse git's `%ci` format, e.g. `2025-05-14 10:30:00 +0200`
fn parse_git_date(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S %z").ok()
}
