use std::path::Path;

use super::process::{GH_TIMEOUT, launch, run};
use crate::model::project::PullRequest;

/// Open pull requests for the repository at `path`, via `gh pr list`
pub fn open_prs(path: &Path) -> Vec<PullRequest> {
    run(
        "gh",
        &["pr", "list", "--json", "number,title,headRefName,url"],
        path,
        GH_TIMEOUT,
    )
    .map(|out| parse_pr_list(&out))
    .unwrap_or_default()
}

pub fn count_open_prs(path: &Path) -> usize {
    open_prs(path).len()
}

/// Open the repository page in the browser (`gh repo view --web`)
pub fn open_repo(path: &Path) -> bool {
    launch("gh", &["repo", "view", "--web"], path, GH_TIMEOUT)
}

/// Open the repository's pull request list in the browser
pub fn open_prs_in_browser(path: &Path) -> bool {
    launch("gh", &["pr", "list", "--web"], path, GH_TIMEOUT)
}

fn parse_pr_list(json: &str) -> Vec<PullRequest> {
    match serde_json::from_str(json) {
        Ok(prs) => prs,
        Err(e) => {
            log::warn!("unexpected `gh pr list` output: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pr_list() {
        let json = r#"[
            {"number": 12, "title": "Add todos", "headRefName": "todos", "url": "https://example.com/pr/12"},
            {"number": 9, "title": "Fix scan"}
        ]"#;
        let prs = parse_pr_list(json);
        assert_eq!(prs.len(), 2);
        assert_eq!(prs[0].number, 12);
        assert_eq!(prs[0].head_ref_name, "todos");
        assert_eq!(prs[1].title, "Fix scan");
        assert_eq!(prs[1].url, "");
    }

    #[test]
    fn test_parse_pr_list_garbage() {
        assert!(parse_pr_list("not json").is_empty());
        assert!(parse_pr_list("[]").is_empty());
    }
}
