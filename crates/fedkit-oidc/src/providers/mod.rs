//! OIDC federation provider implementations.

pub mod bitbucket;
pub mod github;
pub mod gitlab;

use fedkit_core::{ConfigStore, Error, ParameterSet, Result};
use std::collections::HashMap;
use tracing::debug;

/// Parameter name for the OIDC provider URL, required by every variant.
pub const PROVIDER_URL_PARAMETER: &str = "oidc-provider-url";

/// Parameter name for the OIDC client (audience) id, required by every variant.
pub const CLIENT_ID_PARAMETER: &str = "oidc-client-id";

/// Parameter name for the branch deployments run from, shared by the
/// variants whose subject claim is branch-scoped.
pub const DEPLOYMENT_BRANCH_PARAMETER: &str = "deployment-branch";

/// Persisted key recording which provider variant produced a section.
/// The stored section is a flat key/value map and carries no other
/// type tag.
const PROVIDER_NAME_KEY: &str = "oidc_provider";

/// A validated OIDC federation provider.
///
/// Values of this trait only exist after construction-time validation
/// has passed, so claim construction reads guaranteed-present values
/// and cannot fail.
pub trait OidcProvider {
    /// Shared parameter and required-name state.
    fn base(&self) -> &ProviderBase;

    /// The subject claim the cloud-side trust policy must match,
    /// byte-for-byte.
    fn subject_claim(&self) -> String;

    /// Stable provider name, e.g. `"GitHub"`.
    fn provider_name(&self) -> &str {
        self.base().provider_name()
    }

    /// Persist every required parameter, then the provider-name entry,
    /// through the injected store.
    fn persist(
        &self,
        store: &mut dyn ConfigStore,
        cmd_names: &[String],
        section: &str,
    ) -> Result<()> {
        self.base().persist(store, cmd_names, section)
    }
}

/// Parameter and required-name state shared by every provider variant.
#[derive(Debug, Clone)]
pub struct ProviderBase {
    parameters: ParameterSet,
    required_names: Vec<String>,
    provider_name: &'static str,
}

impl ProviderBase {
    /// Build and validate the shared provider state.
    ///
    /// The required-name order is fixed: the two universal names first,
    /// then the variant's extras in declaration order. This order is
    /// surfaced in error messages and persisted output. Validation runs
    /// here, so an invalid provider is never observable.
    pub fn new(
        parameters: ParameterSet,
        extra_required_names: &[&str],
        provider_name: &'static str,
    ) -> Result<Self> {
        let mut required_names = vec![
            PROVIDER_URL_PARAMETER.to_string(),
            CLIENT_ID_PARAMETER.to_string(),
        ];
        required_names.extend(extra_required_names.iter().map(|name| name.to_string()));

        parameters.validate(&required_names)?;
        debug!(provider = provider_name, "Validated OIDC provider parameters");

        Ok(Self {
            parameters,
            required_names,
            provider_name,
        })
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    /// Required parameter names in the order surfaced to users.
    pub fn required_names(&self) -> &[String] {
        &self.required_names
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider_name
    }

    /// Write every required parameter under `cmd_names`/`section` in
    /// declared order, followed by the provider-name entry.
    ///
    /// Persisted keys use the underscore convention; the hyphenated
    /// spelling stays the user-facing surface. The stored format is a
    /// compatibility surface for existing configurations.
    pub fn persist(
        &self,
        store: &mut dyn ConfigStore,
        cmd_names: &[String],
        section: &str,
    ) -> Result<()> {
        for name in &self.required_names {
            let key = name.replace('-', "_");
            debug!(provider = self.provider_name, key = %key, "Persisting OIDC parameter");
            store.put(cmd_names, section, &key, self.parameters.value_of(name))?;
        }
        store.put(cmd_names, section, PROVIDER_NAME_KEY, self.provider_name)
    }
}

/// Supported provider variants, selected by stable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    GitHub,
    GitLab,
    Bitbucket,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::GitHub,
        ProviderKind::GitLab,
        ProviderKind::Bitbucket,
    ];

    /// Stable name, also the value persisted under `oidc_provider`.
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::GitHub => github::GitHubProvider::PROVIDER_NAME,
            ProviderKind::GitLab => gitlab::GitLabProvider::PROVIDER_NAME,
            ProviderKind::Bitbucket => bitbucket::BitbucketProvider::PROVIDER_NAME,
        }
    }

    /// Parse a user-supplied spelling, case-insensitively.
    pub fn parse(input: &str) -> Result<Self> {
        match input.to_ascii_lowercase().as_str() {
            "github" => Ok(ProviderKind::GitHub),
            "gitlab" => Ok(ProviderKind::GitLab),
            "bitbucket" => Ok(ProviderKind::Bitbucket),
            _ => Err(Error::UnknownProvider(input.to_string())),
        }
    }

    /// Extra required parameter names beyond the universal pair, in the
    /// order they are validated and persisted.
    pub fn extra_required_names(&self) -> &'static [&'static str] {
        match self {
            ProviderKind::GitHub => github::GitHubProvider::EXTRA_REQUIRED_NAMES,
            ProviderKind::GitLab => gitlab::GitLabProvider::EXTRA_REQUIRED_NAMES,
            ProviderKind::Bitbucket => bitbucket::BitbucketProvider::EXTRA_REQUIRED_NAMES,
        }
    }
}

/// Construct a validated provider of the given kind.
pub fn build_provider(
    kind: ProviderKind,
    subject_claim_parameters: HashMap<String, String>,
    oidc_parameters: HashMap<String, String>,
) -> Result<Box<dyn OidcProvider>> {
    Ok(match kind {
        ProviderKind::GitHub => Box::new(github::GitHubProvider::new(
            subject_claim_parameters,
            oidc_parameters,
        )?),
        ProviderKind::GitLab => Box::new(gitlab::GitLabProvider::new(
            subject_claim_parameters,
            oidc_parameters,
        )?),
        ProviderKind::Bitbucket => Box::new(bitbucket::BitbucketProvider::new(
            subject_claim_parameters,
            oidc_parameters,
        )?),
    })
}
