//! GitHub Actions REST client.

use reqwest::blocking::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::status::BuildStatus;
use crate::error::{Result, StatusLineError};
use crate::shell::Commander;

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Timeout for each API request.
pub const API_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct WorkflowList {
    #[serde(default)]
    workflows: Vec<Workflow>,
}

#[derive(Debug, Deserialize)]
struct Workflow {
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    path: String,
}

impl Workflow {
    fn matches(&self, wanted: &str) -> bool {
        let wanted = wanted.to_lowercase();
        let path = self.path.to_lowercase();
        self.name.to_lowercase() == wanted
            || path.ends_with(&format!("{wanted}.yml"))
            || path.ends_with(&format!("{wanted}.yaml"))
    }
}

#[derive(Debug, Deserialize)]
struct RunList {
    #[serde(default)]
    workflow_runs: Vec<WorkflowRun>,
}

#[derive(Debug, Deserialize)]
struct WorkflowRun {
    status: String,
    conclusion: Option<String>,
}

/// Fetches workflow run status for one configured workflow.
pub struct GitHubClient {
    client: Client,
    token: String,
    workflow: String,
    base_url: String,
}

impl GitHubClient {
    /// Create a client for `workflow` authenticated with `token`.
    pub fn new(workflow: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(StatusLineError::MissingToken);
        }

        let client = Client::builder()
            .user_agent(concat!("claude-status/", env!("CARGO_PKG_VERSION")))
            .timeout(API_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            token: token.trim().to_string(),
            workflow: workflow.into(),
            base_url: DEFAULT_API_URL.to_string(),
        })
    }

    /// Point the client at another API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Name or file stem of the workflow being tracked.
    pub fn workflow(&self) -> &str {
        &self.workflow
    }

    /// Status of the newest run of the configured workflow on `branch`.
    pub fn build_status(&self, owner: &str, repo: &str, branch: &str) -> Result<BuildStatus> {
        let workflow_id = self.workflow_id(owner, repo)?;

        let url = format!(
            "{}/repos/{}/{}/actions/workflows/{}/runs",
            self.base_url, owner, repo, workflow_id
        );
        let url = Url::parse_with_params(&url, &[("branch", branch), ("per_page", "1")])
            .map_err(|e| StatusLineError::parse("workflow runs URL", e))?;
        let runs: RunList = self.get_json(url)?;

        let run = runs
            .workflow_runs
            .first()
            .ok_or_else(|| StatusLineError::NoWorkflowRuns {
                branch: branch.to_string(),
            })?;

        Ok(BuildStatus::from_run(&run.status, run.conclusion.as_deref()))
    }

    fn workflow_id(&self, owner: &str, repo: &str) -> Result<u64> {
        let url = format!("{}/repos/{}/{}/actions/workflows", self.base_url, owner, repo);
        let url = Url::parse(&url).map_err(|e| StatusLineError::parse("workflows URL", e))?;
        let list: WorkflowList = self.get_json(url)?;

        list.workflows
            .iter()
            .find(|w| w.matches(&self.workflow))
            .map(|w| w.id)
            .ok_or_else(|| StatusLineError::WorkflowNotFound {
                name: self.workflow.clone(),
            })
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!(%url, "GitHub API request");
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()?;

        if !response.status().is_success() {
            return Err(StatusLineError::GitHubApi {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.json()?)
    }
}

/// Resolve a GitHub token from `GITHUB_TOKEN`, `GH_TOKEN`, then `gh auth token`.
pub fn resolve_token(commander: &dyn Commander) -> Result<String> {
    resolve_token_with(|key| std::env::var(key).ok(), commander)
}

/// Token resolution with an injectable environment lookup.
pub fn resolve_token_with(
    env: impl Fn(&str) -> Option<String>,
    commander: &dyn Commander,
) -> Result<String> {
    for key in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Some(token) = env(key).filter(|t| !t.trim().is_empty()) {
            return Ok(token.trim().to_string());
        }
    }

    let token = commander.output("gh", &["auth", "token"])?;
    let token = token.trim();
    if token.is_empty() {
        return Err(StatusLineError::MissingToken);
    }
    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockCommander;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> GitHubClient {
        GitHubClient::new("build_and_test", "test-token")
            .unwrap()
            .with_base_url(server.base_url())
    }

    fn mock_workflows(server: &MockServer) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/octo/widgets/actions/workflows")
                .header("authorization", "Bearer test-token")
                .header("x-github-api-version", "2022-11-28");
            then.status(200).json_body(json!({
                "total_count": 2,
                "workflows": [
                    { "id": 1, "name": "Lint", "path": ".github/workflows/lint.yml" },
                    { "id": 42, "name": "CI", "path": ".github/workflows/build_and_test.yml" }
                ]
            }));
        })
    }

    fn mock_runs(server: &MockServer, runs: serde_json::Value) -> httpmock::Mock<'_> {
        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/octo/widgets/actions/workflows/42/runs")
                .query_param("branch", "main")
                .query_param("per_page", "1");
            then.status(200).json_body(json!({ "workflow_runs": runs }));
        })
    }

    #[test]
    fn empty_token_is_rejected() {
        let err = GitHubClient::new("ci", "  ").err().unwrap();
        assert!(matches!(err, StatusLineError::MissingToken));
    }

    #[test]
    fn successful_run() {
        let server = MockServer::start();
        let workflows = mock_workflows(&server);
        let runs = mock_runs(
            &server,
            json!([{ "status": "completed", "conclusion": "success" }]),
        );

        let status = client(&server).build_status("octo", "widgets", "main").unwrap();

        assert_eq!(status, BuildStatus::Success);
        workflows.assert();
        runs.assert();
    }

    #[test]
    fn in_progress_run_is_pending() {
        let server = MockServer::start();
        mock_workflows(&server);
        mock_runs(
            &server,
            json!([{ "status": "in_progress", "conclusion": null }]),
        );

        let status = client(&server).build_status("octo", "widgets", "main").unwrap();

        assert_eq!(status, BuildStatus::Pending);
    }

    #[test]
    fn workflow_matched_by_name() {
        let server = MockServer::start();
        mock_workflows(&server);
        let runs = server.mock(|when, then| {
            when.method(GET).path("/repos/octo/widgets/actions/workflows/1/runs");
            then.status(200).json_body(json!({
                "workflow_runs": [{ "status": "completed", "conclusion": "failure" }]
            }));
        });

        let status = GitHubClient::new("lint", "test-token")
            .unwrap()
            .with_base_url(server.base_url())
            .build_status("octo", "widgets", "main")
            .unwrap();

        assert_eq!(status, BuildStatus::Failure);
        runs.assert();
    }

    #[test]
    fn unknown_workflow() {
        let server = MockServer::start();
        mock_workflows(&server);

        let err = GitHubClient::new("deploy", "test-token")
            .unwrap()
            .with_base_url(server.base_url())
            .build_status("octo", "widgets", "main")
            .unwrap_err();

        assert!(matches!(err, StatusLineError::WorkflowNotFound { name } if name == "deploy"));
    }

    #[test]
    fn no_runs_on_branch() {
        let server = MockServer::start();
        mock_workflows(&server);
        mock_runs(&server, json!([]));

        let err = client(&server)
            .build_status("octo", "widgets", "main")
            .unwrap_err();

        assert!(matches!(err, StatusLineError::NoWorkflowRuns { branch } if branch == "main"));
    }

    #[test]
    fn api_error_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/repos/octo/widgets/actions/workflows");
            then.status(404).json_body(json!({ "message": "Not Found" }));
        });

        let err = client(&server)
            .build_status("octo", "widgets", "main")
            .unwrap_err();

        assert!(matches!(err, StatusLineError::GitHubApi { status: 404, .. }));
    }

    #[test]
    fn token_prefers_environment() {
        let commander = MockCommander::new().respond("gh auth token", "from-gh");
        let token = resolve_token_with(
            |key| (key == "GH_TOKEN").then(|| "from-env".to_string()),
            &commander,
        )
        .unwrap();

        assert_eq!(token, "from-env");
        assert!(commander.calls().is_empty());
    }

    #[test]
    fn token_falls_back_to_gh_cli() {
        let commander = MockCommander::new().respond("gh auth token", "gho_abc\n");
        let token = resolve_token_with(|_| Some(String::new()), &commander).unwrap();
        assert_eq!(token, "gho_abc");
    }

    #[test]
    fn token_missing_everywhere() {
        let commander = MockCommander::new().respond("gh auth token", "");
        let err = resolve_token_with(|_| None, &commander).unwrap_err();
        assert!(matches!(err, StatusLineError::MissingToken));
    }
}
