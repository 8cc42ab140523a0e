//! GitLab CI/CD OIDC provider.

use super::{DEPLOYMENT_BRANCH_PARAMETER, OidcProvider, ProviderBase};
use fedkit_core::{ParameterSet, Result};
use std::collections::HashMap;

/// Parameter name for the GitLab group.
pub const GROUP_PARAMETER: &str = "gitlab-group";

/// Parameter name for the project within the group.
pub const PROJECT_PARAMETER: &str = "gitlab-project";

/// OIDC provider for pipelines running on GitLab CI/CD.
#[derive(Debug, Clone)]
pub struct GitLabProvider {
    base: ProviderBase,
}

impl GitLabProvider {
    pub const PROVIDER_NAME: &'static str = "GitLab";

    pub const EXTRA_REQUIRED_NAMES: &'static [&'static str] =
        &[GROUP_PARAMETER, PROJECT_PARAMETER, DEPLOYMENT_BRANCH_PARAMETER];

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

impl OidcProvider for GitLabProvider {
    fn base(&self) -> &ProviderBase {
        &self.base
    }

    /// `project_path:<group>/<project>:ref_type:branch:ref:<branch>` —
    /// the `sub` claim GitLab issues for branch pipelines.
    fn subject_claim(&self) -> String {
        let parameters = self.base.parameters();
        format!(
            "project_path:{}/{}:ref_type:branch:ref:{}",
            parameters.value_of(GROUP_PARAMETER),
            parameters.value_of(PROJECT_PARAMETER),
            parameters.value_of(DEPLOYMENT_BRANCH_PARAMETER),
        )
    }
}
