//! GitHub Actions OIDC provider.

use super::{DEPLOYMENT_BRANCH_PARAMETER, OidcProvider, ProviderBase};
use fedkit_core::{ParameterSet, Result};
use std::collections::HashMap;

/// Parameter name for the GitHub organization.
pub const ORG_PARAMETER: &str = "github-org";

/// Parameter name for the repository within the organization.
pub const REPO_PARAMETER: &str = "github-repo";

/// OIDC provider for pipelines running on GitHub Actions.
///
/// GitHub's official OIDC action pins the audience claim, so the trust
/// policy condition has to match on the subject claim instead.
#[derive(Debug, Clone)]
pub struct GitHubProvider {
    base: ProviderBase,
}

impl GitHubProvider {
    pub const PROVIDER_NAME: &'static str = "GitHub";

    pub const EXTRA_REQUIRED_NAMES: &'static [&'static str] =
        &[ORG_PARAMETER, REPO_PARAMETER, DEPLOYMENT_BRANCH_PARAMETER];

    /// Merge the subject-claim parameters with the universal OIDC
    /// parameters and validate the combined set.
    pub fn new(
        subject_claim_parameters: HashMap<String, String>,
        oidc_parameters: HashMap<String, String>,
    ) -> Result<Self> {
        let parameters = ParameterSet::merged(oidc_parameters, subject_claim_parameters)?;
        let base = ProviderBase::new(parameters, Self::EXTRA_REQUIRED_NAMES, Self::PROVIDER_NAME)?;
        Ok(Self { base })
    }
}

impl OidcProvider for GitHubProvider {
    fn base(&self) -> &ProviderBase {
        &self.base
    }

    /// `repo:<org>/<repo>:ref:refs/heads/<branch>` — the literal pattern
    /// GitHub puts in the token's `sub` claim for branch pushes. Values
    /// are interpolated as-is, with no escaping or trimming.
    fn subject_claim(&self) -> String {
        let parameters = self.base.parameters();
        format!(
            "repo:{}/{}:ref:refs/heads/{}",
            parameters.value_of(ORG_PARAMETER),
            parameters.value_of(REPO_PARAMETER),
            parameters.value_of(DEPLOYMENT_BRANCH_PARAMETER),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn universal() -> HashMap<String, String> {
        HashMap::from([
            (
                "oidc-provider-url".to_string(),
                "https://token.actions.githubusercontent.com".to_string(),
            ),
            ("oidc-client-id".to_string(), "sts.amazonaws.com".to_string()),
        ])
    }

    #[test]
    fn test_subject_claim_format() {
        let subject = HashMap::from([
            ("github-org".to_string(), "acme".to_string()),
            ("github-repo".to_string(), "widgets".to_string()),
            ("deployment-branch".to_string(), "main".to_string()),
        ]);

        let provider = GitHubProvider::new(subject, universal()).unwrap();
        assert_eq!(
            provider.subject_claim(),
            "repo:acme/widgets:ref:refs/heads/main"
        );
    }

    #[test]
    fn test_empty_branch_fails_construction() {
        let subject = HashMap::from([
            ("github-org".to_string(), "acme".to_string()),
            ("github-repo".to_string(), "widgets".to_string()),
            ("deployment-branch".to_string(), String::new()),
        ]);

        let err = GitHubProvider::new(subject, universal()).unwrap_err();
        assert!(err.to_string().contains("--deployment-branch"));
    }
}
