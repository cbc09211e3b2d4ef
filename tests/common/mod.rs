//! In-memory fake for the service traits
//!
//! Records every call in order and serves canned responses. Listings are
//! split into pages addressed by `page-N` continuation tokens.

#![allow(dead_code)]

use async_trait::async_trait;
use omics_helpers::aws::{
    CallerIdentity, CallerIdentityApi, CatalogApi, CreateTableResult, IdentityApi,
    ManagedPolicy, OmicsApi, Page, Reference, ReferenceStore, ResourceShare, Role, ServiceError,
    SharedResource, SharingApi, Store, StoreKind, TableLinkInput, NO_SUCH_ENTITY,
};
use std::sync::Mutex;

pub const ACCOUNT_ID: &str = "123456789012";
pub const OWNING_ACCOUNT_ID: &str = "111122223333";

/// A recorded service call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetRole(String),
    CreateRole { role_name: String, trust_policy: String },
    CreatePolicy { policy_name: String, description: String, document: String },
    AttachRolePolicy { role_name: String, policy_arn: String },
    CallerIdentity,
    ListReferenceStores { max_results: Option<i32>, next_token: Option<String> },
    ListReferences { store_id: String, max_results: Option<i32>, next_token: Option<String> },
    GetAnalyticsStore { kind: StoreKind, name: String },
    ListSharedResources { resource_type: String, next_token: Option<String> },
    GetResourceShares(String),
    CreateTable { database_name: String, table: TableLinkInput },
}

pub struct FakeAws {
    pub calls: Mutex<Vec<Call>>,
    pub role: Result<Role, ServiceError>,
    pub identity: CallerIdentity,
    pub identity_error: Option<ServiceError>,
    pub reference_stores: Vec<Vec<ReferenceStore>>,
    pub references: Vec<Vec<Reference>>,
    pub stores: Vec<Store>,
    pub shared_resources: Vec<Vec<SharedResource>>,
    pub shared_resources_error: Option<ServiceError>,
    pub shares: Vec<ResourceShare>,
    pub shares_error: Option<ServiceError>,
    pub create_table_error: Option<ServiceError>,
}

impl Default for FakeAws {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            role: Err(no_such_entity("GetRole")),
            identity: CallerIdentity {
                account: ACCOUNT_ID.to_string(),
                arn: format!("arn:aws:iam::{}:user/analyst", ACCOUNT_ID),
                user_id: Some("AIDAEXAMPLE".to_string()),
            },
            identity_error: None,
            reference_stores: Vec::new(),
            references: Vec::new(),
            stores: Vec::new(),
            shared_resources: Vec::new(),
            shared_resources_error: None,
            shares: Vec::new(),
            shares_error: None,
            create_table_error: None,
        }
    }
}

impl FakeAws {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn no_such_entity(operation: &'static str) -> ServiceError {
    ServiceError::new(
        "iam",
        operation,
        Some(NO_SUCH_ENTITY),
        "The role with name omics-role cannot be found.",
    )
}

pub fn reference_store(id: &str) -> ReferenceStore {
    ReferenceStore {
        id: id.to_string(),
        arn: format!("arn:aws:omics:us-east-1:{}:referenceStore/{}", ACCOUNT_ID, id),
        name: Some(format!("store-{}", id)),
    }
}

pub fn reference(name: &str, arn: &str) -> Reference {
    Reference {
        id: format!("id-{}", name),
        arn: arn.to_string(),
        name: name.to_string(),
    }
}

pub fn shared_database(database: &str, share: &str) -> SharedResource {
    SharedResource {
        arn: format!(
            "arn:aws:glue:us-east-1:{}:database/{}",
            OWNING_ACCOUNT_ID, database
        ),
        resource_share_arn: Some(share_arn(share)),
        resource_type: Some("glue:Database".to_string()),
        status: Some("AVAILABLE".to_string()),
    }
}

pub fn share_arn(share: &str) -> String {
    format!(
        "arn:aws:ram:us-east-1:{}:resource-share/{}",
        OWNING_ACCOUNT_ID, share
    )
}

pub fn resource_share(share: &str) -> ResourceShare {
    ResourceShare {
        resource_share_arn: share_arn(share),
        name: Some(share.to_string()),
        owning_account_id: OWNING_ACCOUNT_ID.to_string(),
        status: Some("ACTIVE".to_string()),
    }
}

fn serve_page<T: Clone>(pages: &[Vec<T>], next_token: Option<&str>) -> Page<T> {
    let index = next_token
        .and_then(|t| t.strip_prefix("page-"))
        .and_then(|n| n.parse::<usize>().ok())
        .unwrap_or(0);

    let items = pages.get(index).cloned().unwrap_or_default();
    let next_token = if index + 1 < pages.len() {
        Some(format!("page-{}", index + 1))
    } else {
        None
    };

    Page { items, next_token }
}

#[async_trait]
impl IdentityApi for FakeAws {
    async fn get_role(&self, role_name: &str) -> Result<Role, ServiceError> {
        self.record(Call::GetRole(role_name.to_string()));
        self.role.clone()
    }

    async fn create_role(&self, role_name: &str, trust_policy: &str) -> Result<Role, ServiceError> {
        self.record(Call::CreateRole {
            role_name: role_name.to_string(),
            trust_policy: trust_policy.to_string(),
        });
        Ok(Role {
            role_name: role_name.to_string(),
            arn: format!("arn:aws:iam::{}:role/{}", ACCOUNT_ID, role_name),
        })
    }

    async fn create_policy(
        &self,
        policy_name: &str,
        description: &str,
        policy_document: &str,
    ) -> Result<ManagedPolicy, ServiceError> {
        self.record(Call::CreatePolicy {
            policy_name: policy_name.to_string(),
            description: description.to_string(),
            document: policy_document.to_string(),
        });
        Ok(ManagedPolicy {
            policy_name: policy_name.to_string(),
            arn: format!("arn:aws:iam::{}:policy/{}", ACCOUNT_ID, policy_name),
        })
    }

    async fn attach_role_policy(
        &self,
        role_name: &str,
        policy_arn: &str,
    ) -> Result<(), ServiceError> {
        self.record(Call::AttachRolePolicy {
            role_name: role_name.to_string(),
            policy_arn: policy_arn.to_string(),
        });
        Ok(())
    }
}

#[async_trait]
impl CallerIdentityApi for FakeAws {
    async fn caller_identity(&self) -> Result<CallerIdentity, ServiceError> {
        self.record(Call::CallerIdentity);
        match &self.identity_error {
            Some(err) => Err(err.clone()),
            None => Ok(self.identity.clone()),
        }
    }
}

#[async_trait]
impl OmicsApi for FakeAws {
    async fn list_reference_stores(
        &self,
        max_results: Option<i32>,
        next_token: Option<&str>,
    ) -> Result<Page<ReferenceStore>, ServiceError> {
        self.record(Call::ListReferenceStores {
            max_results,
            next_token: next_token.map(|t| t.to_string()),
        });
        Ok(serve_page(&self.reference_stores, next_token))
    }

    async fn list_references(
        &self,
        reference_store_id: &str,
        max_results: Option<i32>,
        next_token: Option<&str>,
    ) -> Result<Page<Reference>, ServiceError> {
        self.record(Call::ListReferences {
            store_id: reference_store_id.to_string(),
            max_results,
            next_token: next_token.map(|t| t.to_string()),
        });
        Ok(serve_page(&self.references, next_token))
    }

    async fn get_analytics_store(
        &self,
        kind: StoreKind,
        name: &str,
    ) -> Result<Store, ServiceError> {
        self.record(Call::GetAnalyticsStore {
            kind,
            name: name.to_string(),
        });
        self.stores
            .iter()
            .find(|s| s.name == name && s.store_type == kind.label())
            .cloned()
            .ok_or_else(|| {
                ServiceError::new(
                    "omics",
                    "GetVariantStore",
                    Some("ResourceNotFoundException"),
                    "store not found",
                )
            })
    }
}

#[async_trait]
impl SharingApi for FakeAws {
    async fn list_shared_resources(
        &self,
        resource_type: &str,
        next_token: Option<&str>,
    ) -> Result<Page<SharedResource>, ServiceError> {
        self.record(Call::ListSharedResources {
            resource_type: resource_type.to_string(),
            next_token: next_token.map(|t| t.to_string()),
        });
        if let Some(err) = &self.shared_resources_error {
            return Err(err.clone());
        }
        Ok(serve_page(&self.shared_resources, next_token))
    }

    async fn get_resource_shares(
        &self,
        resource_share_arn: &str,
    ) -> Result<Vec<ResourceShare>, ServiceError> {
        self.record(Call::GetResourceShares(resource_share_arn.to_string()));
        if let Some(err) = &self.shares_error {
            return Err(err.clone());
        }
        Ok(self
            .shares
            .iter()
            .filter(|s| s.resource_share_arn == resource_share_arn)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CatalogApi for FakeAws {
    async fn create_table(
        &self,
        database_name: &str,
        table: &TableLinkInput,
    ) -> Result<CreateTableResult, ServiceError> {
        self.record(Call::CreateTable {
            database_name: database_name.to_string(),
            table: table.clone(),
        });

        if let Some(err) = &self.create_table_error {
            return Err(err.clone());
        }

        Ok(CreateTableResult {
            database_name: database_name.to_string(),
            table_name: table.name.clone(),
            target_table: table.target_table.clone(),
        })
    }
}
