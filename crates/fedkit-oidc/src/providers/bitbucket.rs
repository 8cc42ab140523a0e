//! Bitbucket Pipelines OIDC provider.

use super::{OidcProvider, ProviderBase};
use fedkit_core::{ParameterSet, Result};
use std::collections::HashMap;

/// Parameter name for the Bitbucket repository UUID.
pub const REPO_UUID_PARAMETER: &str = "bitbucket-repo-uuid";

/// OIDC provider for pipelines running on Bitbucket Pipelines.
///
/// Bitbucket scopes the token to the repository UUID rather than a
/// branch, so the trust condition matches any pipeline in the
/// repository.
#[derive(Debug, Clone)]
pub struct BitbucketProvider {
    base: ProviderBase,
}

impl BitbucketProvider {
    pub const PROVIDER_NAME: &'static str = "Bitbucket";

    pub const EXTRA_REQUIRED_NAMES: &'static [&'static str] = &[REPO_UUID_PARAMETER];

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

impl OidcProvider for BitbucketProvider {
    fn base(&self) -> &ProviderBase {
        &self.base
    }

    /// `<repo-uuid>:*` — the repository UUID (braces included) followed
    /// by a wildcard step UUID.
    fn subject_claim(&self) -> String {
        format!(
            "{}:*",
            self.base.parameters().value_of(REPO_UUID_PARAMETER)
        )
    }
}
