//! Workflow event payload handling.
//!
//! When the bot runs as an action step, the runner writes the triggering
//! webhook payload to a file and points `GITHUB_EVENT_PATH` at it. Only
//! the pull request parts of the payload matter here.

use std::fmt;
use std::str::FromStr;

use anyhow::Context;

use crate::deserialize_payload;

#[derive(Debug, serde::Deserialize)]
pub struct WorkflowEvent {
    /// The pull request the event fired for, on `pull_request` events.
    pub pull_request: Option<PullRequest>,
    /// Candidate pull requests on events that carry several; picked from
    /// with the `pull-request-number` input.
    #[serde(default)]
    pub pull_requests: Vec<PullRequest>,
}

#[derive(Debug, serde::Deserialize)]
pub struct PullRequest {
    pub number: u64,
    /// The PR author.
    pub user: User,
    pub labels: Vec<Label>,
    /// Not every event sets this field.
    #[serde(default)]
    pub draft: bool,
}

#[derive(Debug, serde::Deserialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Label {
    pub name: String,
}

impl WorkflowEvent {
    /// Reads the payload file the actions runner wrote for this job.
    pub fn from_env() -> anyhow::Result<WorkflowEvent> {
        let path =
            std::env::var("GITHUB_EVENT_PATH").context("GITHUB_EVENT_PATH is not set")?;
        let payload = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read event payload at {path}"))?;
        deserialize_payload(&payload).context("event payload failed to deserialize")
    }

    /// Picks the pull request this run operates on.
    ///
    /// An explicit `number` is looked up in the candidate list; otherwise
    /// the event's own pull request is used. Draft pull requests are
    /// skipped.
    pub fn find_pull_request(&self, number: Option<u64>) -> Result<&PullRequest, Skip> {
        let pr = match number {
            Some(number) => self.pull_requests.iter().find(|pr| pr.number == number),
            None => self.pull_request.as_ref(),
        };
        let pr = pr.ok_or(Skip::NoPullRequest)?;
        if pr.draft {
            return Err(Skip::Draft);
        }
        Ok(pr)
    }
}

/// A reason to stop before reviewer selection without failing the run.
#[derive(Debug, PartialEq, Eq)]
pub enum Skip {
    NoPullRequest,
    Draft,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Skip::NoPullRequest => write!(f, "No pull request found."),
            Skip::Draft => write!(
                f,
                "No reviewer is assigned because the pull request is draft."
            ),
        }
    }
}

/// The repository the workflow runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    pub owner: String,
    pub name: String,
}

impl Repo {
    pub fn from_env() -> anyhow::Result<Repo> {
        std::env::var("GITHUB_REPOSITORY")
            .context("GITHUB_REPOSITORY is not set")?
            .parse()
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for Repo {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Repo> {
        let (owner, name) = s
            .split_once('/')
            .with_context(|| format!("`{s}` is not in `owner/name` form"))?;
        Ok(Repo {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(payload: serde_json::Value) -> WorkflowEvent {
        serde_json::from_value(payload).unwrap()
    }

    #[test]
    fn single_pull_request() {
        let event = event(serde_json::json!({
            "pull_request": {
                "number": 1234,
                "user": { "login": "octocat" },
                "labels": [ { "name": "label1" }, { "name": "label2" } ],
                "draft": false,
            },
        }));
        let pr = event.find_pull_request(None).unwrap();
        assert_eq!(pr.number, 1234);
        assert_eq!(pr.user.login, "octocat");
        assert_eq!(
            pr.labels.iter().map(|l| l.name.as_str()).collect::<Vec<_>>(),
            ["label1", "label2"]
        );
    }

    #[test]
    fn no_pull_request() {
        let event = event(serde_json::json!({}));
        assert_eq!(event.find_pull_request(None).unwrap_err(), Skip::NoPullRequest);
    }

    #[test]
    fn candidate_list_with_override() {
        let event = event(serde_json::json!({
            "pull_requests": [
                { "number": 7, "user": { "login": "a" }, "labels": [] },
                { "number": 8, "user": { "login": "b" }, "labels": [] },
            ],
        }));
        assert_eq!(event.find_pull_request(Some(8)).unwrap().user.login, "b");
        assert_eq!(
            event.find_pull_request(Some(9)).unwrap_err(),
            Skip::NoPullRequest
        );
        // Without an override the candidate list is not consulted.
        assert_eq!(event.find_pull_request(None).unwrap_err(), Skip::NoPullRequest);
    }

    #[test]
    fn draft_is_skipped() {
        let event = event(serde_json::json!({
            "pull_request": {
                "number": 1,
                "user": { "login": "octocat" },
                "labels": [],
                "draft": true,
            },
        }));
        assert_eq!(event.find_pull_request(None).unwrap_err(), Skip::Draft);
    }

    #[test]
    fn repo_from_str() {
        let repo: Repo = "rust-lang/rust".parse().unwrap();
        assert_eq!(repo.owner, "rust-lang");
        assert_eq!(repo.name, "rust");
        assert_eq!(repo.to_string(), "rust-lang/rust");
        assert!("no-slash".parse::<Repo>().is_err());
    }
}
