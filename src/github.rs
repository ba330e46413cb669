pub mod client;
pub mod event;

pub use client::GithubClient;
pub use event::{Label, PullRequest, Repo, Skip, User, WorkflowEvent};
