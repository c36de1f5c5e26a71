//! End-to-end run: readers → classifier loop → mapping writer → merger → tree writer.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::classification::Classifier;
use crate::config::Config;
use crate::errors::AppError;
use crate::input::{read_job_roles, read_naics_industries};
use crate::output::{read_mapping, write_json_pretty, RoleUriMapping};
use crate::tree::{merge_uris, MergeOutcome};

#[derive(Debug, Clone)]
pub struct ClassificationFailure {
    pub role: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct ClassificationRun {
    pub mapping: RoleUriMapping,
    pub failures: Vec<ClassificationFailure>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub requested: usize,
    pub classified: usize,
    pub failed: usize,
    pub rejected: usize,
    pub roles_in_tree: usize,
}

/// Classifies each role in turn, pausing for `pause` after every call
/// whether or not it succeeded. Failed roles are logged and left out of the
/// mapping; nothing is retried.
pub async fn classify_roles(
    classifier: &dyn Classifier,
    roles: &[String],
    industries: &[String],
    pause: Duration,
) -> ClassificationRun {
    let mut run = ClassificationRun::default();

    for (i, role) in roles.iter().enumerate() {
        info!("[{}/{}] Classifying '{}'...", i + 1, roles.len(), role);

        match classifier.classify(role, industries).await {
            Ok(uri) => {
                info!("Received URI for '{}': {}", role, uri);
                run.mapping.insert(role.clone(), uri);
            }
            Err(e) => {
                warn!("Failed to obtain URI for '{}': {}", role, e);
                run.failures.push(ClassificationFailure {
                    role: role.clone(),
                    reason: e.to_string(),
                });
            }
        }

        tokio::time::sleep(pause).await;
    }

    run
}

/// Full classification run. Input errors abort before any call is made;
/// output files are only written once every role has been processed.
pub async fn run(config: &Config, classifier: &dyn Classifier) -> Result<RunSummary, AppError> {
    let roles = read_job_roles(&config.job_roles_file)?;
    let industries = read_naics_industries(&config.naics_file)?;

    let classification = classify_roles(classifier, &roles, &industries, config.pause).await;
    if !classification.failures.is_empty() {
        let failed: Vec<String> = classification
            .failures
            .iter()
            .map(|f| format!("'{}' ({})", f.role, f.reason))
            .collect();
        warn!(
            "{} roles could not be classified: {}",
            failed.len(),
            failed.join(", ")
        );
    }
    if classification.mapping.is_empty() {
        warn!("No job roles were classified; the merged tree will be empty");
    }
    write_json_pretty(&config.mapping_output, &classification.mapping)?;

    let outcome = merge_and_write(&classification.mapping, &config.tree_output)?;

    let summary = RunSummary {
        requested: roles.len(),
        classified: classification.mapping.len(),
        failed: classification.failures.len(),
        rejected: outcome.rejected.len(),
        roles_in_tree: outcome.tree.role_count(),
    };
    log_summary(&summary);
    Ok(summary)
}

/// Rebuilds the tree from a mapping file written by an earlier run, without
/// calling the classifier.
pub fn remerge(mapping_path: &Path, config: &Config) -> Result<RunSummary, AppError> {
    let mapping = read_mapping(mapping_path)?;
    info!(
        "Loaded {} classified roles from {}",
        mapping.len(),
        mapping_path.display()
    );

    let outcome = merge_and_write(&mapping, &config.tree_output)?;

    let summary = RunSummary {
        requested: mapping.len(),
        classified: mapping.len(),
        failed: 0,
        rejected: outcome.rejected.len(),
        roles_in_tree: outcome.tree.role_count(),
    };
    log_summary(&summary);
    Ok(summary)
}

fn merge_and_write(mapping: &RoleUriMapping, tree_output: &Path) -> Result<MergeOutcome, AppError> {
    let outcome = merge_uris(mapping);
    if let Some(industries) = outcome.tree.children() {
        for (industry, node) in industries {
            debug!(
                "{}: {} roles, {} levels",
                industry,
                node.role_count(),
                node.depth() + 1
            );
        }
    }
    write_json_pretty(tree_output, &outcome.tree)?;
    Ok(outcome)
}

fn log_summary(summary: &RunSummary) {
    info!(
        "Run complete: requested={}, classified={}, failed={}, rejected={}, roles_in_tree={}",
        summary.requested,
        summary.classified,
        summary.failed,
        summary.rejected,
        summary.roles_in_tree
    );
}
