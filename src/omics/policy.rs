//! Policy documents
//!
//! Builders and loaders for the IAM documents handed to
//! [`create_omics_role`](super::roles::create_omics_role).

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::path::Path;

/// Service principal Omics workflows run as
pub const OMICS_SERVICE_PRINCIPAL: &str = "omics.amazonaws.com";

/// Trust policy letting the Omics service assume a role
pub fn omics_trust_policy() -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Effect": "Allow",
                "Principal": {
                    "Service": OMICS_SERVICE_PRINCIPAL
                },
                "Action": "sts:AssumeRole"
            }
        ]
    })
}

/// Load a policy document from a JSON or YAML file
///
/// Files ending in `.yaml` or `.yml` are parsed as YAML, anything else as JSON.
pub fn load_policy_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read policy document {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    let document: Value = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML policy {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON policy {}", path.display()))?
    };

    if !document.is_object() {
        return Err(anyhow::anyhow!(
            "Policy document {} must be an object",
            path.display()
        ));
    }

    Ok(document)
}
