use anyhow::Context;
use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use tracing as log;

use crate::github::event::Repo;

#[derive(Clone)]
pub struct GithubClient {
    token: SecretString,
    client: Client,
    api_url: String,
}

impl GithubClient {
    pub fn new(token: SecretString, api_url: String) -> Self {
        GithubClient {
            client: Client::new(),
            token,
            api_url,
        }
    }

    /// Builds a client pointed at the API URL the actions runner
    /// provides, falling back to the public endpoint.
    pub fn new_from_env(token: SecretString) -> Self {
        Self::new(
            token,
            std::env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),
        )
    }

    /// Adds `reviewer` to the pull request's requested reviewers.
    ///
    /// Whether the login names an account that can actually review is
    /// left to GitHub to decide.
    pub async fn request_reviewer(
        &self,
        repo: &Repo,
        pull_number: u64,
        reviewer: &str,
    ) -> anyhow::Result<()> {
        log::info!("requesting review from {} on {}#{}", reviewer, repo, pull_number);
        let url = format!(
            "{api}/repos/{repo}/pulls/{pull_number}/requested_reviewers",
            api = self.api_url,
        );

        #[derive(serde::Serialize)]
        struct ReviewersReq<'a> {
            reviewers: &'a [&'a str],
        }

        self.send_req(self.post(&url).json(&ReviewersReq {
            reviewers: &[reviewer],
        }))
        .await?;
        Ok(())
    }

    async fn send_req(&self, req: RequestBuilder) -> anyhow::Result<Bytes> {
        log::debug!("send_req with {:?}", req);
        let req_dbg = format!("{req:?}");
        let req = req
            .build()
            .with_context(|| format!("building reqwest {req_dbg}"))?;

        let resp = self.client.execute(req).await?;
        let maybe_err = resp.error_for_status_ref().err();
        let body = resp
            .bytes()
            .await
            .with_context(|| format!("failed to read response body {req_dbg}"))?;
        if let Some(e) = maybe_err {
            return Err(anyhow::Error::new(e))
                .with_context(|| format!("response: {}", String::from_utf8_lossy(&body)));
        }

        Ok(body)
    }

    fn post(&self, url: &str) -> RequestBuilder {
        log::trace!("post {:?}", url);
        self.client.post(url).configure(self)
    }
}

trait RequestSend: Sized {
    fn configure(self, g: &GithubClient) -> Self;
}

impl RequestSend for RequestBuilder {
    fn configure(self, g: &GithubClient) -> RequestBuilder {
        let mut auth = reqwest::header::HeaderValue::from_maybe_shared(format!(
            "token {}",
            g.token.expose_secret()
        ))
        .unwrap();
        auth.set_sensitive(true);
        self.header(USER_AGENT, "assignbot")
            .header(AUTHORIZATION, &auth)
    }
}
