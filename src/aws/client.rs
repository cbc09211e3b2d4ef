//! AWS Client
//!
//! Bundles the SDK clients the helpers talk to and implements every service
//! trait on top of them. Built once at the process boundary and passed to
//! the helpers by reference.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_glue::types::{TableIdentifier, TableInput};
use aws_sdk_ram::types::ResourceOwner;
use aws_sdk_sts::config::Region;

use super::api::{CallerIdentityApi, CatalogApi, IdentityApi, OmicsApi, SharingApi};
use super::error::{sdk_error, ServiceError};
use super::types::{
    CallerIdentity, CreateTableResult, ManagedPolicy, Page, Reference, ReferenceStore,
    ResourceShare, Role, SharedResource, Store, StoreKind, TableLinkInput,
};

/// Main AWS client
#[derive(Clone, Debug)]
pub struct AwsClients {
    pub iam: aws_sdk_iam::Client,
    pub omics: aws_sdk_omics::Client,
    pub ram: aws_sdk_ram::Client,
    pub glue: aws_sdk_glue::Client,
    pub sts: aws_sdk_sts::Client,
    region: Option<String>,
}

impl AwsClients {
    /// Create clients from the ambient credential and region chain
    pub async fn new(profile: Option<&str>, region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }

        let sdk_config = loader.load().await;
        Self::from_sdk_config(&sdk_config)
    }

    /// Create clients from an already loaded SDK config
    pub fn from_sdk_config(sdk_config: &SdkConfig) -> Self {
        Self {
            iam: aws_sdk_iam::Client::new(sdk_config),
            omics: aws_sdk_omics::Client::new(sdk_config),
            ram: aws_sdk_ram::Client::new(sdk_config),
            glue: aws_sdk_glue::Client::new(sdk_config),
            sts: aws_sdk_sts::Client::new(sdk_config),
            region: sdk_config.region().map(|r| r.to_string()),
        }
    }

    /// Region the clients were configured with, if any
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

fn missing(service: &'static str, operation: &'static str, field: &str) -> ServiceError {
    ServiceError::new(
        service,
        operation,
        None,
        &format!("response is missing {}", field),
    )
}

fn role_from_sdk(role: &aws_sdk_iam::types::Role) -> Role {
    Role {
        role_name: role.role_name().to_string(),
        arn: role.arn().to_string(),
    }
}

// =============================================================================
// IAM
// =============================================================================

#[async_trait]
impl IdentityApi for AwsClients {
    async fn get_role(&self, role_name: &str) -> Result<Role, ServiceError> {
        tracing::debug!("iam GetRole role_name={}", role_name);

        let output = self
            .iam
            .get_role()
            .role_name(role_name)
            .send()
            .await
            .map_err(sdk_error("iam", "GetRole"))?;

        let role = output
            .role()
            .ok_or_else(|| missing("iam", "GetRole", "Role"))?;
        Ok(role_from_sdk(role))
    }

    async fn create_role(&self, role_name: &str, trust_policy: &str) -> Result<Role, ServiceError> {
        tracing::debug!("iam CreateRole role_name={}", role_name);

        let output = self
            .iam
            .create_role()
            .role_name(role_name)
            .assume_role_policy_document(trust_policy)
            .send()
            .await
            .map_err(sdk_error("iam", "CreateRole"))?;

        let role = output
            .role()
            .ok_or_else(|| missing("iam", "CreateRole", "Role"))?;
        Ok(role_from_sdk(role))
    }

    async fn create_policy(
        &self,
        policy_name: &str,
        description: &str,
        policy_document: &str,
    ) -> Result<ManagedPolicy, ServiceError> {
        tracing::debug!("iam CreatePolicy policy_name={}", policy_name);

        let output = self
            .iam
            .create_policy()
            .policy_name(policy_name)
            .description(description)
            .policy_document(policy_document)
            .send()
            .await
            .map_err(sdk_error("iam", "CreatePolicy"))?;

        let policy = output
            .policy()
            .ok_or_else(|| missing("iam", "CreatePolicy", "Policy"))?;
        let arn = policy
            .arn()
            .ok_or_else(|| missing("iam", "CreatePolicy", "Policy.Arn"))?;

        Ok(ManagedPolicy {
            policy_name: policy.policy_name().unwrap_or(policy_name).to_string(),
            arn: arn.to_string(),
        })
    }

    async fn attach_role_policy(
        &self,
        role_name: &str,
        policy_arn: &str,
    ) -> Result<(), ServiceError> {
        tracing::debug!("iam AttachRolePolicy role_name={} policy_arn={}", role_name, policy_arn);

        self.iam
            .attach_role_policy()
            .role_name(role_name)
            .policy_arn(policy_arn)
            .send()
            .await
            .map_err(sdk_error("iam", "AttachRolePolicy"))?;

        Ok(())
    }
}

// =============================================================================
// STS
// =============================================================================

#[async_trait]
impl CallerIdentityApi for AwsClients {
    async fn caller_identity(&self) -> Result<CallerIdentity, ServiceError> {
        tracing::debug!("sts GetCallerIdentity");

        let output = self
            .sts
            .get_caller_identity()
            .send()
            .await
            .map_err(sdk_error("sts", "GetCallerIdentity"))?;

        let account = output
            .account()
            .ok_or_else(|| missing("sts", "GetCallerIdentity", "Account"))?;
        let arn = output
            .arn()
            .ok_or_else(|| missing("sts", "GetCallerIdentity", "Arn"))?;

        Ok(CallerIdentity {
            account: account.to_string(),
            arn: arn.to_string(),
            user_id: output.user_id().map(str::to_string),
        })
    }
}

// =============================================================================
// Omics
// =============================================================================

#[async_trait]
impl OmicsApi for AwsClients {
    async fn list_reference_stores(
        &self,
        max_results: Option<i32>,
        next_token: Option<&str>,
    ) -> Result<Page<ReferenceStore>, ServiceError> {
        tracing::debug!("omics ListReferenceStores max_results={:?}", max_results);

        let output = self
            .omics
            .list_reference_stores()
            .set_max_results(max_results)
            .set_next_token(next_token.map(|t| t.to_string()))
            .send()
            .await
            .map_err(sdk_error("omics", "ListReferenceStores"))?;

        let items = output
            .reference_stores()
            .iter()
            .map(|store| ReferenceStore {
                id: store.id().to_string(),
                arn: store.arn().to_string(),
                name: store.name().map(str::to_string),
            })
            .collect();

        Ok(Page {
            items,
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn list_references(
        &self,
        reference_store_id: &str,
        max_results: Option<i32>,
        next_token: Option<&str>,
    ) -> Result<Page<Reference>, ServiceError> {
        tracing::debug!(
            "omics ListReferences reference_store_id={} max_results={:?}",
            reference_store_id,
            max_results
        );

        let output = self
            .omics
            .list_references()
            .reference_store_id(reference_store_id)
            .set_max_results(max_results)
            .set_next_token(next_token.map(|t| t.to_string()))
            .send()
            .await
            .map_err(sdk_error("omics", "ListReferences"))?;

        let items = output
            .references()
            .iter()
            .map(|reference| Reference {
                id: reference.id().to_string(),
                arn: reference.arn().to_string(),
                name: reference.name().unwrap_or_default().to_string(),
            })
            .collect();

        Ok(Page {
            items,
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn get_analytics_store(
        &self,
        kind: StoreKind,
        name: &str,
    ) -> Result<Store, ServiceError> {
        tracing::debug!("omics get {} store name={}", kind.label(), name);

        let (id, store_name) = match kind {
            StoreKind::Variant => {
                let output = self
                    .omics
                    .get_variant_store()
                    .name(name)
                    .send()
                    .await
                    .map_err(sdk_error("omics", "GetVariantStore"))?;
                (output.id().to_string(), output.name().to_string())
            }
            StoreKind::Annotation => {
                let output = self
                    .omics
                    .get_annotation_store()
                    .name(name)
                    .send()
                    .await
                    .map_err(sdk_error("omics", "GetAnnotationStore"))?;
                (output.id().to_string(), output.name().to_string())
            }
        };

        Ok(Store {
            id,
            name: store_name,
            store_type: kind.label().to_string(),
        })
    }
}

// =============================================================================
// RAM
// =============================================================================

#[async_trait]
impl SharingApi for AwsClients {
    async fn list_shared_resources(
        &self,
        resource_type: &str,
        next_token: Option<&str>,
    ) -> Result<Page<SharedResource>, ServiceError> {
        tracing::debug!("ram ListResources resource_type={}", resource_type);

        let output = self
            .ram
            .list_resources()
            .resource_owner(ResourceOwner::OtherAccounts)
            .resource_type(resource_type)
            .set_next_token(next_token.map(|t| t.to_string()))
            .send()
            .await
            .map_err(sdk_error("ram", "ListResources"))?;

        let items = output
            .resources
            .unwrap_or_default()
            .into_iter()
            .filter_map(|resource| {
                // Entries without an ARN cannot be correlated with a store
                let arn = resource.arn?;
                Some(SharedResource {
                    arn,
                    resource_share_arn: resource.resource_share_arn,
                    resource_type: resource.r#type,
                    status: resource.status.map(|s| s.as_str().to_string()),
                })
            })
            .collect();

        Ok(Page {
            items,
            next_token: output.next_token,
        })
    }

    async fn get_resource_shares(
        &self,
        resource_share_arn: &str,
    ) -> Result<Vec<ResourceShare>, ServiceError> {
        tracing::debug!("ram GetResourceShares arn={}", resource_share_arn);

        let output = self
            .ram
            .get_resource_shares()
            .resource_owner(ResourceOwner::OtherAccounts)
            .resource_share_arns(resource_share_arn)
            .send()
            .await
            .map_err(sdk_error("ram", "GetResourceShares"))?;

        output
            .resource_shares()
            .iter()
            .map(|share| -> Result<ResourceShare, ServiceError> {
                let resource_share_arn = share
                    .resource_share_arn()
                    .ok_or_else(|| missing("ram", "GetResourceShares", "resourceShareArn"))?;
                // The link's target catalog comes from the owning account
                let owning_account_id = share
                    .owning_account_id()
                    .ok_or_else(|| missing("ram", "GetResourceShares", "owningAccountId"))?;

                Ok(ResourceShare {
                    resource_share_arn: resource_share_arn.to_string(),
                    name: share.name().map(str::to_string),
                    owning_account_id: owning_account_id.to_string(),
                    status: share.status().map(|s| s.as_str().to_string()),
                })
            })
            .collect()
    }
}

// =============================================================================
// Glue
// =============================================================================

#[async_trait]
impl CatalogApi for AwsClients {
    async fn create_table(
        &self,
        database_name: &str,
        table: &TableLinkInput,
    ) -> Result<CreateTableResult, ServiceError> {
        tracing::debug!(
            "glue CreateTable database={} table={} target={}.{}.{}",
            database_name,
            table.name,
            table.target_table.catalog_id,
            table.target_table.database_name,
            table.target_table.name
        );

        let target = TableIdentifier::builder()
            .catalog_id(&table.target_table.catalog_id)
            .database_name(&table.target_table.database_name)
            .name(&table.target_table.name)
            .build();

        let input = TableInput::builder()
            .name(&table.name)
            .target_table(target)
            .build()
            .map_err(|e| ServiceError::new("glue", "CreateTable", None, &e.to_string()))?;

        self.glue
            .create_table()
            .database_name(database_name)
            .table_input(input)
            .send()
            .await
            .map_err(sdk_error("glue", "CreateTable"))?;

        Ok(CreateTableResult {
            database_name: database_name.to_string(),
            table_name: table.name.clone(),
            target_table: table.target_table.clone(),
        })
    }
}
