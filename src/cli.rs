use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::audit;
use crate::config;
use crate::fingerprint::ExistingIssueIndex;
use crate::github::pagination::list_all_issues;
use crate::github::transport::HttpTransport;
use crate::github::GitHubClient;
use crate::migrate::Migrator;
use crate::model::record::read_records;

/// Migrate Pivotal Tracker stories into GitHub issues and a GitHub project.
#[derive(Debug, Parser)]
#[command(name = "tracker-migrate", version)]
pub struct Cli {
    /// Tracker CSV export to read.
    #[arg(short, long)]
    pub file: PathBuf,

    /// Project settings file.
    #[arg(short, long, default_value = "project.toml")]
    pub config: PathBuf,

    /// Directory for the works log (overrides `works_dir` in the config).
    #[arg(short = 'o', long)]
    pub works_dir: Option<PathBuf>,
}

pub async fn run(cli: Cli) -> Result<()> {
    let settings = config::load_settings(&cli.config)?;
    let token = config::github_token()?;

    let records = read_records(&cli.file)?;
    tracing::info!("Found {} stories", records.len());

    let client = GitHubClient::new(HttpTransport::new(&settings.endpoint, token));
    let (repository_id, issues) =
        list_all_issues(&client, &settings.owner, &settings.repository_name).await?;
    let index = ExistingIssueIndex::from_issues(issues);
    tracing::info!("Found {} existing issues", index.len());

    let mut migrator = Migrator::new(&client, &settings.project, repository_id, index);
    let works = migrator.run(&records).await?;

    let works_dir = cli.works_dir.unwrap_or(settings.works_dir);
    let path = audit::write_works_log(&works_dir, &works, &chrono::Local::now())?;
    tracing::info!("Done. Works log saved to {}", path.display());
    Ok(())
}
