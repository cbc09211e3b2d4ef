//! IAM roles for Omics workflows

use serde::Serialize;
use serde_json::Value;

use crate::aws::api::IdentityApi;
use crate::aws::error::NO_SUCH_ENTITY;
use crate::error::OmicsError;

/// Description given to policies created by [`create_omics_role`]
pub const POLICY_DESCRIPTION: &str = "Policy for Amazon Omics";

/// Result of [`create_omics_role`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RoleStatus {
    /// The role was already present; nothing was created
    #[serde(rename_all = "camelCase")]
    Existing { role_arn: String },
    /// The role, its policy and the attachment were created
    #[serde(rename_all = "camelCase")]
    Created { role_arn: String, policy_arn: String },
}

impl RoleStatus {
    pub fn role_arn(&self) -> &str {
        match self {
            RoleStatus::Existing { role_arn } | RoleStatus::Created { role_arn, .. } => role_arn,
        }
    }
}

/// Name of the managed policy created alongside a role
pub fn policy_name_for(role_name: &str) -> String {
    format!("{}-policy", role_name)
}

/// Make sure a role with the given policies exists
///
/// Loads the role first. Only a `NoSuchEntity` lookup failure triggers
/// creation of the role, its managed policy and the attachment, in that
/// order. Any other lookup failure is returned to the caller.
pub async fn create_omics_role<C>(
    iam: &C,
    role_name: &str,
    policy: &Value,
    trust_policy: &Value,
) -> Result<RoleStatus, OmicsError>
where
    C: IdentityApi + ?Sized,
{
    if role_name.is_empty() {
        return Err(OmicsError::InvalidInput("role name must not be empty".to_string()));
    }

    let lookup_err = match iam.get_role(role_name).await {
        Ok(role) => {
            tracing::info!("Role {} already exists", role_name);
            return Ok(RoleStatus::Existing { role_arn: role.arn });
        }
        Err(err) => err,
    };

    if !lookup_err.is_code(NO_SUCH_ENTITY) {
        tracing::error!(
            "Failed to look up role {}: {}. Check your account settings and permissions",
            role_name,
            lookup_err
        );
        return Err(lookup_err.into());
    }

    let trust_document = serde_json::to_string(trust_policy)?;
    let policy_document = serde_json::to_string(policy)?;

    let role = iam.create_role(role_name, &trust_document).await?;
    tracing::info!("Created role {}", role.arn);

    let policy_name = policy_name_for(role_name);
    let managed = iam
        .create_policy(&policy_name, POLICY_DESCRIPTION, &policy_document)
        .await?;
    tracing::info!("Created policy {}", managed.arn);

    iam.attach_role_policy(role_name, &managed.arn).await?;
    tracing::info!("Attached {} to {}", managed.arn, role_name);

    Ok(RoleStatus::Created {
        role_arn: role.arn,
        policy_arn: managed.arn,
    })
}

/// Retrieve the ARN for an IAM role name
pub async fn get_role_arn<C>(iam: &C, role_name: &str) -> Result<String, OmicsError>
where
    C: IdentityApi + ?Sized,
{
    let role = iam.get_role(role_name).await?;
    Ok(role.arn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_name_for() {
        assert_eq!(policy_name_for("OmicsWorkflowRole"), "OmicsWorkflowRole-policy");
    }

    #[test]
    fn test_role_status_serializes_with_tag() {
        let status = RoleStatus::Created {
            role_arn: "arn:aws:iam::123456789012:role/r".to_string(),
            policy_arn: "arn:aws:iam::123456789012:policy/r-policy".to_string(),
        };
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["status"], "created");
        assert_eq!(value["policyArn"], "arn:aws:iam::123456789012:policy/r-policy");
        assert_eq!(status.role_arn(), "arn:aws:iam::123456789012:role/r");
    }
}
