use std::collections::HashSet;

use anyhow::Context;
use clap::Parser;
use tracing as log;

use assignbot::config::{InputSource, Inputs};
use assignbot::github::{GithubClient, Repo, WorkflowEvent};
use assignbot::handlers::assign;
use assignbot::logger;

/// Requests a pull request review from a reviewer chosen by the PR's
/// labels.
#[derive(Debug, Parser)]
struct Args {
    /// Read settings from plain environment variables instead of the
    /// `INPUT_*` variables the actions runner provides.
    #[arg(long)]
    from_env: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    logger::init();

    let args = Args::parse();
    if let Err(err) = run(&args).await {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let source = if args.from_env {
        InputSource::Env
    } else {
        InputSource::ActionInputs
    };
    let inputs = Inputs::load(source).context("settings are invalid")?;

    let event = WorkflowEvent::from_env()?;
    let pr = match event.find_pull_request(inputs.pull_request_number) {
        Ok(pr) => pr,
        Err(skip) => {
            // Nothing to review here; this run succeeded by doing nothing.
            log::info!("{skip}");
            return Ok(());
        }
    };

    let mapping =
        parser::mapping::parse(&inputs.assign_mappings).context("finding reviewers failed")?;

    let labels: Vec<String> = pr.labels.iter().map(|label| label.name.clone()).collect();
    let exclude: HashSet<String> = std::iter::once(pr.user.login.clone()).collect();
    let Some(reviewer) =
        assign::select_reviewer(&labels, &mapping, &exclude, assign::random_index)
    else {
        log::info!("No reviewer found.");
        return Ok(());
    };

    let repo = Repo::from_env()?;
    let client = GithubClient::new_from_env(inputs.github_token);
    client
        .request_reviewer(&repo, pr.number, &reviewer)
        .await
        .context("requesting reviewers failed")?;

    Ok(())
}
