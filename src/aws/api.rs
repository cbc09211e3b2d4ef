//! Service seams
//!
//! One trait per external service. [`AwsClients`](super::client::AwsClients)
//! implements all of them on top of the official SDK; tests implement them
//! with in-memory fakes.

use async_trait::async_trait;

use super::error::ServiceError;
use super::types::{
    CallerIdentity, CreateTableResult, ManagedPolicy, Page, Reference, ReferenceStore,
    ResourceShare, Role, SharedResource, Store, StoreKind, TableLinkInput,
};

/// IAM operations
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// Load a role by name. A missing role fails with code `NoSuchEntity`.
    async fn get_role(&self, role_name: &str) -> Result<Role, ServiceError>;

    /// Create a role with the given trust (assume-role) policy document
    async fn create_role(&self, role_name: &str, trust_policy: &str) -> Result<Role, ServiceError>;

    /// Create a customer managed policy
    async fn create_policy(
        &self,
        policy_name: &str,
        description: &str,
        policy_document: &str,
    ) -> Result<ManagedPolicy, ServiceError>;

    /// Attach a managed policy to a role
    async fn attach_role_policy(&self, role_name: &str, policy_arn: &str)
        -> Result<(), ServiceError>;
}

/// STS caller identity
#[async_trait]
pub trait CallerIdentityApi: Send + Sync {
    async fn caller_identity(&self) -> Result<CallerIdentity, ServiceError>;
}

/// Omics storage and analytics operations
#[async_trait]
pub trait OmicsApi: Send + Sync {
    async fn list_reference_stores(
        &self,
        max_results: Option<i32>,
        next_token: Option<&str>,
    ) -> Result<Page<ReferenceStore>, ServiceError>;

    async fn list_references(
        &self,
        reference_store_id: &str,
        max_results: Option<i32>,
        next_token: Option<&str>,
    ) -> Result<Page<Reference>, ServiceError>;

    /// Fetch a variant or annotation store by name
    async fn get_analytics_store(&self, kind: StoreKind, name: &str)
        -> Result<Store, ServiceError>;
}

/// RAM operations, always from the point of view of a consumer account
#[async_trait]
pub trait SharingApi: Send + Sync {
    /// List resources other accounts share with this one, filtered by resource type.
    /// Uses the service's default page size.
    async fn list_shared_resources(
        &self,
        resource_type: &str,
        next_token: Option<&str>,
    ) -> Result<Page<SharedResource>, ServiceError>;

    /// Look up the share with the given ARN among shares owned by other accounts
    async fn get_resource_shares(
        &self,
        resource_share_arn: &str,
    ) -> Result<Vec<ResourceShare>, ServiceError>;
}

/// Glue Data Catalog operations
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn create_table(
        &self,
        database_name: &str,
        table: &TableLinkInput,
    ) -> Result<CreateTableResult, ServiceError>;
}
