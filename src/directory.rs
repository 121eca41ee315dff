//! Account label resolution against the identity directory.
//!
//! The directory is only ever consulted for a prettier label. Whatever it
//! answers, or fails to answer, the resolution collapses into exactly one
//! label so formatting can proceed.

use crate::core::IdentityDirectory;
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_iam::error::{DisplayErrorContext, ProvideErrorMetadata};
use tracing::{debug, error, info, instrument};

/// How the account label for one invocation was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelResolution {
    /// The first alias the directory returned.
    Resolved(String),
    /// No alias is configured; the account id stands in.
    Fallback(String),
    /// The directory could not be reached; the account id stands in.
    DirectoryError { label: String, reason: String },
}

impl LabelResolution {
    pub fn label(&self) -> &str {
        match self {
            LabelResolution::Resolved(label)
            | LabelResolution::Fallback(label)
            | LabelResolution::DirectoryError { label, .. } => label,
        }
    }

    pub fn into_label(self) -> String {
        match self {
            LabelResolution::Resolved(label)
            | LabelResolution::Fallback(label)
            | LabelResolution::DirectoryError { label, .. } => label,
        }
    }
}

/// Resolves the label for `account_id`, never failing.
#[instrument(skip(directory))]
pub async fn resolve_label(directory: &dyn IdentityDirectory, account_id: &str) -> LabelResolution {
    match directory.list_account_aliases().await {
        Ok(aliases) => match aliases.into_iter().next() {
            Some(alias) => {
                debug!(label = %alias, "Resolved account alias");
                LabelResolution::Resolved(alias)
            }
            None => {
                info!(
                    account_id,
                    "No account alias configured, using the account id as label"
                );
                LabelResolution::Fallback(account_id.to_string())
            }
        },
        Err(e) => {
            let reason = format!("{e:#}");
            error!(
                account_id,
                error_kind = "directory_unavailable",
                error = %reason,
                "Failed to list account aliases, using the account id as label"
            );
            LabelResolution::DirectoryError {
                label: account_id.to_string(),
                reason,
            }
        }
    }
}

/// An `IdentityDirectory` backed by IAM and STS.
#[derive(Debug, Clone)]
pub struct AwsIdentityDirectory {
    iam: aws_sdk_iam::Client,
    sts: aws_sdk_sts::Client,
}

impl AwsIdentityDirectory {
    pub fn new(iam: aws_sdk_iam::Client, sts: aws_sdk_sts::Client) -> Self {
        Self { iam, sts }
    }
}

#[async_trait]
impl IdentityDirectory for AwsIdentityDirectory {
    async fn list_account_aliases(&self) -> Result<Vec<String>> {
        let response = match self.iam.list_account_aliases().send().await {
            Ok(response) => response,
            Err(e) => anyhow::bail!(
                "IAM ListAccountAliases failed ({}): {}",
                e.code().unwrap_or("unknown"),
                DisplayErrorContext(&e)
            ),
        };
        Ok(response.account_aliases().to_vec())
    }

    async fn caller_account_id(&self) -> Result<String> {
        let response = match self.sts.get_caller_identity().send().await {
            Ok(response) => response,
            Err(e) => anyhow::bail!(
                "STS GetCallerIdentity failed ({}): {}",
                e.code().unwrap_or("unknown"),
                DisplayErrorContext(&e)
            ),
        };
        response
            .account()
            .map(str::to_string)
            .context("no account returned from STS GetCallerIdentity")
    }
}
