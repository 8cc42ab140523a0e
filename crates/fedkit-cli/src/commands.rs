//! CLI command definitions.

use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum Commands {
    /// Bootstrap OIDC federation trust for a pipeline
    Bootstrap(BootstrapArgs),

    /// Show persisted bootstrap configuration
    Show {
        /// Emit the section as JSON
        #[arg(long)]
        json: bool,

        /// Pipeline configuration file
        #[arg(long, default_value = fedkit_config::DEFAULT_FILE_NAME)]
        config: String,
    },

    /// List supported identity providers
    Providers,
}

#[derive(Args, Debug, Clone)]
pub struct BootstrapArgs {
    /// Identity provider (github, gitlab, bitbucket)
    #[arg(short, long)]
    pub provider: String,

    /// OIDC provider URL, e.g. https://token.actions.githubusercontent.com
    #[arg(long)]
    pub oidc_provider_url: Option<String>,

    /// OIDC client (audience) id
    #[arg(long)]
    pub oidc_client_id: Option<String>,

    /// GitHub organization
    #[arg(long)]
    pub github_org: Option<String>,

    /// GitHub repository
    #[arg(long)]
    pub github_repo: Option<String>,

    /// GitLab group
    #[arg(long)]
    pub gitlab_group: Option<String>,

    /// GitLab project
    #[arg(long)]
    pub gitlab_project: Option<String>,

    /// Bitbucket repository UUID
    #[arg(long)]
    pub bitbucket_repo_uuid: Option<String>,

    /// Branch deployments run from
    #[arg(long)]
    pub deployment_branch: Option<String>,

    /// Prompt for missing parameters instead of failing
    #[arg(short, long)]
    pub interactive: bool,

    /// Emit the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Pipeline configuration file
    #[arg(long, default_value = fedkit_config::DEFAULT_FILE_NAME)]
    pub config: String,
}
