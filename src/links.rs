use url::Url;

use crate::records::{CommitRecord, IssueRecord};

/// Host for outbound links. Links are constructed, never followed; opening
/// them is the embedding page's concern.
pub const LINK_HOST: &str = "https://github.com";

/// Build the external URL for an issue: `<host>/<owner>/<repo>/issues/<number>`.
pub fn issue_url(owner: &str, repo: &str, number: i64) -> Option<String> {
    build(&format!("{LINK_HOST}/{owner}/{repo}/issues/{number}"))
}

/// Build the external URL for a commit: `<host>/<owner>/<repo>/commit/<sha>`.
pub fn commit_url(owner: &str, repo: &str, sha: &str) -> Option<String> {
    build(&format!("{LINK_HOST}/{owner}/{repo}/commit/{sha}"))
}

/// Resolve the click-through link for a Gantt bar. A missing issue number is
/// a data-integrity gap: reported as a diagnostic, no link produced.
pub fn issue_link(issue: &IssueRecord) -> Option<String> {
    if issue.number == 0 {
        log::warn!("issue '{}' has no number; no link generated", issue.title);
        return None;
    }
    issue_url(&issue.repo_owner, &issue.repo_name, issue.number)
}

/// Resolve the click-through link for a scatter point. A missing sha is
/// reported and yields no link rather than a broken one.
pub fn commit_link(commit: &CommitRecord) -> Option<String> {
    if commit.sha.trim().is_empty() {
        log::warn!(
            "commit by '{}' at {} has no sha; no link generated",
            commit.author,
            commit.date
        );
        return None;
    }
    commit_url(&commit.repo_owner, &commit.repo_name, &commit.sha)
}

fn build(raw: &str) -> Option<String> {
    match Url::parse(raw) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            log::warn!("could not build link from {raw}: {e}");
            None
        }
    }
}
