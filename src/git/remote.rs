//! Remote URL parsing.

/// Owner and repository name of a GitHub remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubRepo {
    pub owner: String,
    pub repo: String,
}

/// Extract owner and repo from a GitHub remote URL.
///
/// Accepts `git@github.com:owner/repo(.git)` and
/// `https://github.com/owner/repo(.git)`. Other hosts yield `None`.
pub fn parse_github_repo(remote_url: &str) -> Option<GitHubRepo> {
    let url = remote_url.trim();
    let path = if let Some(rest) = url.strip_prefix("git@github.com:") {
        rest
    } else {
        let idx = url.find("github.com/")?;
        &url[idx + "github.com/".len()..]
    };

    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    let (owner, repo) = path.split_once('/')?;
    if owner.is_empty() || repo.is_empty() {
        return None;
    }

    Some(GitHubRepo {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(owner: &str, repo: &str) -> Option<GitHubRepo> {
        Some(GitHubRepo {
            owner: owner.into(),
            repo: repo.into(),
        })
    }

    #[test]
    fn ssh_url() {
        assert_eq!(
            parse_github_repo("git@github.com:octo/widgets.git"),
            repo("octo", "widgets")
        );
    }

    #[test]
    fn ssh_url_without_suffix() {
        assert_eq!(
            parse_github_repo("git@github.com:octo/widgets"),
            repo("octo", "widgets")
        );
    }

    #[test]
    fn https_url() {
        assert_eq!(
            parse_github_repo("https://github.com/octo/widgets.git"),
            repo("octo", "widgets")
        );
    }

    #[test]
    fn https_url_with_credentials() {
        assert_eq!(
            parse_github_repo("https://token@github.com/octo/widgets"),
            repo("octo", "widgets")
        );
    }

    #[test]
    fn other_hosts_are_rejected() {
        assert_eq!(parse_github_repo("git@gitlab.com:octo/widgets.git"), None);
        assert_eq!(parse_github_repo("https://bitbucket.org/octo/widgets"), None);
    }

    #[test]
    fn incomplete_paths_are_rejected() {
        assert_eq!(parse_github_repo("git@github.com:octo"), None);
        assert_eq!(parse_github_repo("https://github.com//widgets"), None);
        assert_eq!(parse_github_repo(""), None);
    }
}
