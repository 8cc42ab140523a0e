//! Command handlers.

use crate::commands::BootstrapArgs;
use crate::output::StreamWriter;
use console::style;
use fedkit_config::PipelineConfig;
use fedkit_core::Error;
use fedkit_oidc::providers::{bitbucket, github, gitlab};
use fedkit_oidc::{
    CLIENT_ID_PARAMETER, DEPLOYMENT_BRANCH_PARAMETER, OidcProvider, PROVIDER_URL_PARAMETER,
    ProviderKind, build_provider,
};
use std::collections::HashMap;
use tracing::debug;

/// Section under which bootstrap parameters are persisted.
pub const PARAMETERS_SECTION: &str = "parameters";

/// Command path under which bootstrap parameters are persisted.
pub fn cmd_names() -> Vec<String> {
    vec!["pipeline".to_string(), "bootstrap".to_string()]
}

/// Bootstrap OIDC federation trust and persist the validated parameters.
pub async fn bootstrap(args: BootstrapArgs) -> Result<(), Box<dyn std::error::Error>> {
    let kind = ProviderKind::parse(&args.provider)?;
    let (mut subject_claim_parameters, mut oidc_parameters) = collect_parameters(kind, &args);

    let provider = match build_provider(
        kind,
        subject_claim_parameters.clone(),
        oidc_parameters.clone(),
    ) {
        Ok(provider) => provider,
        Err(Error::MissingParameters(missing)) if args.interactive => {
            prompt_for_missing(
                missing.names(),
                &mut subject_claim_parameters,
                &mut oidc_parameters,
            )?;
            build_provider(kind, subject_claim_parameters, oidc_parameters)?
        }
        Err(err) => return Err(err.into()),
    };

    let claim = provider.subject_claim();
    debug!(provider = provider.provider_name(), claim = %claim, "Constructed OIDC provider");

    let mut config = PipelineConfig::load_or_default(&args.config)?;
    provider.persist(&mut config, &cmd_names(), PARAMETERS_SECTION)?;
    config.save()?;

    if args.json {
        let summary = serde_json::json!({
            "provider": provider.provider_name(),
            "subject_claim": claim,
            "config": config.path(),
        });
        let mut writer = StreamWriter::stdout(true);
        writer.write_str(&serde_json::to_string_pretty(&summary)?)?;
        writer.write_str("\n")?;
    } else {
        println!(
            "{} Validated {} OIDC parameters",
            style("✓").green(),
            provider.provider_name()
        );
        println!(
            "{} Saved bootstrap parameters to {}",
            style("✓").green(),
            config.path().display()
        );
        println!();
        println!("Subject claim for the role trust policy:");
        println!("  {}", style(&claim).bold());
    }

    Ok(())
}

/// Show the persisted bootstrap section.
pub async fn show(json: bool, config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = PipelineConfig::load_or_default(config_path)?;
    let Some(section) = config.section(&cmd_names(), PARAMETERS_SECTION) else {
        println!(
            "{} No bootstrap parameters stored in {}",
            style("i").blue(),
            config_path
        );
        return Ok(());
    };

    if json {
        let mut writer = StreamWriter::stdout(true);
        writer.write_str(&serde_json::to_string_pretty(&section)?)?;
        writer.write_str("\n")?;
    } else {
        println!("Bootstrap parameters ({}):", config.path().display());
        for (key, value) in section {
            println!("  {} = {}", style(key).bold(), value);
        }
    }

    Ok(())
}

/// List supported identity providers and their required parameters.
pub async fn providers() -> Result<(), Box<dyn std::error::Error>> {
    for kind in ProviderKind::ALL {
        println!("{}", style(kind.name()).bold());
        println!("  --{}", PROVIDER_URL_PARAMETER);
        println!("  --{}", CLIENT_ID_PARAMETER);
        for name in kind.extra_required_names() {
            println!("  --{}", name);
        }
    }
    Ok(())
}

/// Split the CLI flags into the variant-specific subject-claim map and
/// the universal OIDC map, keeping only the names the chosen provider
/// validates.
pub(crate) fn collect_parameters(
    kind: ProviderKind,
    args: &BootstrapArgs,
) -> (HashMap<String, String>, HashMap<String, String>) {
    let mut oidc_parameters = HashMap::new();
    insert_if_present(&mut oidc_parameters, PROVIDER_URL_PARAMETER, &args.oidc_provider_url);
    insert_if_present(&mut oidc_parameters, CLIENT_ID_PARAMETER, &args.oidc_client_id);

    let mut subject_claim_parameters = HashMap::new();
    match kind {
        ProviderKind::GitHub => {
            insert_if_present(&mut subject_claim_parameters, github::ORG_PARAMETER, &args.github_org);
            insert_if_present(&mut subject_claim_parameters, github::REPO_PARAMETER, &args.github_repo);
            insert_if_present(
                &mut subject_claim_parameters,
                DEPLOYMENT_BRANCH_PARAMETER,
                &args.deployment_branch,
            );
        }
        ProviderKind::GitLab => {
            insert_if_present(&mut subject_claim_parameters, gitlab::GROUP_PARAMETER, &args.gitlab_group);
            insert_if_present(
                &mut subject_claim_parameters,
                gitlab::PROJECT_PARAMETER,
                &args.gitlab_project,
            );
            insert_if_present(
                &mut subject_claim_parameters,
                DEPLOYMENT_BRANCH_PARAMETER,
                &args.deployment_branch,
            );
        }
        ProviderKind::Bitbucket => {
            insert_if_present(
                &mut subject_claim_parameters,
                bitbucket::REPO_UUID_PARAMETER,
                &args.bitbucket_repo_uuid,
            );
        }
    }

    (subject_claim_parameters, oidc_parameters)
}

fn insert_if_present(map: &mut HashMap<String, String>, name: &str, value: &Option<String>) {
    if let Some(value) = value {
        map.insert(name.to_string(), value.clone());
    }
}

/// Prompt for exactly the parameters validation reported missing,
/// routing each answer into the map it came from.
fn prompt_for_missing(
    missing: &[String],
    subject_claim_parameters: &mut HashMap<String, String>,
    oidc_parameters: &mut HashMap<String, String>,
) -> Result<(), Box<dyn std::error::Error>> {
    for name in missing {
        let value: String = dialoguer::Input::new()
            .with_prompt(format!("Enter value for --{}", name))
            .interact_text()?;

        if name == PROVIDER_URL_PARAMETER || name == CLIENT_ID_PARAMETER {
            oidc_parameters.insert(name.clone(), value);
        } else {
            subject_claim_parameters.insert(name.clone(), value);
        }
    }
    Ok(())
}
