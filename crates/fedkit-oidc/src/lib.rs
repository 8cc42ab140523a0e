//! OIDC federation providers for fedkit.
//!
//! This crate builds and validates the trust parameters that let a
//! CI/CD pipeline assume a cloud role without long-lived credentials,
//! and derives the subject claim the role's trust policy must match.

pub mod providers;

pub use providers::{
    CLIENT_ID_PARAMETER, DEPLOYMENT_BRANCH_PARAMETER, OidcProvider, PROVIDER_URL_PARAMETER,
    ProviderBase, ProviderKind, build_provider,
    bitbucket::BitbucketProvider,
    github::GitHubProvider,
    gitlab::GitLabProvider,
};
