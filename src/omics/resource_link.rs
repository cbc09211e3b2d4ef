//! Resource Link Resolver
//!
//! Omics analytics stores expose their tables through a Glue database owned
//! by a service account and shared to the caller with RAM. To query a store
//! from the caller's own catalog, a resource link table is created in a
//! local database that targets the shared table.
//!
//! The shared database is correlated with a store by ARN containment: the
//! shared resource's ARN must contain the store id. See [`ArnContainsStoreId`].

use serde::Serialize;

use crate::aws::api::{CallerIdentityApi, CatalogApi, SharingApi};
use crate::aws::types::{
    CreateTableResult, ResourceShare, SharedResource, Store, TableLinkInput, TargetTable,
    DEFAULT_STORE_TYPE,
};
use crate::error::{NotFound, OmicsError};

/// RAM resource type of a shared Glue database
pub const GLUE_DATABASE_RESOURCE_TYPE: &str = "glue:Database";

/// Decides whether a shared resource belongs to a store
pub trait ResourceMatcher: Send + Sync {
    fn matches(&self, resource: &SharedResource, store: &Store) -> bool;
}

/// Matches when the resource ARN contains the store id as a substring
///
/// The shared database name embeds the store id, and no other correlation
/// is available. Containment is intentional: an id that happens to be a
/// substring of another store's database ARN also matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArnContainsStoreId;

impl ResourceMatcher for ArnContainsStoreId {
    fn matches(&self, resource: &SharedResource, store: &Store) -> bool {
        resource.arn.contains(&store.id)
    }
}

impl<F> ResourceMatcher for F
where
    F: Fn(&SharedResource, &Store) -> bool + Send + Sync,
{
    fn matches(&self, resource: &SharedResource, store: &Store) -> bool {
        self(resource, store)
    }
}

/// How much of the shared resource listing to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pagination {
    /// Only the first page, at the service's default page size
    #[default]
    FirstPage,
    /// Follow continuation tokens until the listing is exhausted
    AllPages,
}

/// Everything produced by a resource link creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLink {
    pub resource: SharedResource,
    pub resource_share: ResourceShare,
    pub table: CreateTableResult,
}

/// Name of the shared Glue database backing a store
pub fn remote_database_name(store_type: &str, account_id: &str, store_id: &str) -> String {
    format!("{}_{}_{}", store_type, account_id, store_id)
}

/// Resource link creation request
pub struct ResourceLinkRequest<'a> {
    database_name: &'a str,
    store: &'a Store,
    store_type: &'a str,
    pagination: Pagination,
    matcher: Box<dyn ResourceMatcher + 'a>,
}

impl<'a> ResourceLinkRequest<'a> {
    pub fn new(database_name: &'a str, store: &'a Store) -> Self {
        Self {
            database_name,
            store,
            store_type: DEFAULT_STORE_TYPE,
            pagination: Pagination::FirstPage,
            matcher: Box::new(ArnContainsStoreId),
        }
    }

    /// Label used in the remote database name (default `variant`)
    pub fn store_type(mut self, store_type: &'a str) -> Self {
        self.store_type = store_type;
        self
    }

    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Replace the default [`ArnContainsStoreId`] matcher
    pub fn matcher(mut self, matcher: impl ResourceMatcher + 'a) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    fn validate(&self) -> Result<(), OmicsError> {
        if self.database_name.is_empty() {
            return Err(OmicsError::InvalidInput("database name must not be empty".to_string()));
        }
        if self.store.id.is_empty() {
            return Err(OmicsError::InvalidInput("store id must not be empty".to_string()));
        }
        if self.store.name.is_empty() {
            return Err(OmicsError::InvalidInput("store name must not be empty".to_string()));
        }
        Ok(())
    }

    /// Resolve the shared resource and create the link table
    pub async fn send<C>(self, clients: &C) -> Result<ResourceLink, OmicsError>
    where
        C: CallerIdentityApi + SharingApi + CatalogApi + ?Sized,
    {
        self.validate()?;

        let identity = clients.caller_identity().await?;
        tracing::debug!("Caller account {} ({})", identity.account, identity.arn);

        let resources = self.list_shared_databases(clients).await?;

        if resources.is_empty() {
            tracing::warn!(
                "No shared resources found. Verify that an Omics analytics store has been created"
            );
            return Err(NotFound::SharedResources.into());
        }

        let Some(resource) = resources
            .into_iter()
            .find(|resource| self.matcher.matches(resource, self.store))
        else {
            tracing::warn!(
                "No shared resources matching {} store id {} found",
                self.store_type,
                self.store.id
            );
            return Err(NotFound::MatchingSharedResource {
                store_type: self.store_type.to_string(),
                store_id: self.store.id.clone(),
            }
            .into());
        };

        let share_arn = resource
            .resource_share_arn
            .clone()
            .ok_or_else(|| NotFound::ShareArn {
                resource_arn: resource.arn.clone(),
            })?;

        let resource_share = clients
            .get_resource_shares(&share_arn)
            .await?
            .into_iter()
            .next()
            .ok_or(NotFound::ResourceShare { arn: share_arn })?;

        let table = TableLinkInput {
            name: self.store.name.clone(),
            target_table: TargetTable {
                catalog_id: resource_share.owning_account_id.clone(),
                database_name: remote_database_name(
                    self.store_type,
                    &identity.account,
                    &self.store.id,
                ),
                name: self.store.name.clone(),
            },
        };

        let created = clients.create_table(self.database_name, &table).await?;
        tracing::info!(
            "Created resource link {}.{} -> {}:{}.{}",
            created.database_name,
            created.table_name,
            created.target_table.catalog_id,
            created.target_table.database_name,
            created.target_table.name
        );

        Ok(ResourceLink {
            resource,
            resource_share,
            table: created,
        })
    }

    async fn list_shared_databases<C>(&self, clients: &C) -> Result<Vec<SharedResource>, OmicsError>
    where
        C: SharingApi + ?Sized,
    {
        let mut all_items = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = clients
                .list_shared_resources(GLUE_DATABASE_RESOURCE_TYPE, page_token.as_deref())
                .await?;
            all_items.extend(page.items);

            if self.pagination == Pagination::FirstPage || page.next_token.is_none() {
                break;
            }
            page_token = page.next_token;
        }

        Ok(all_items)
    }
}

/// Create a catalog table in `database_name` linking to the store's shared table
///
/// `store_type` defaults to `variant`. Only the first page of shared
/// resources is considered; use [`ResourceLinkRequest`] with
/// [`Pagination::AllPages`] to search the full listing.
pub async fn create_resource_link<C>(
    clients: &C,
    database_name: &str,
    store: &Store,
    store_type: Option<&str>,
) -> Result<ResourceLink, OmicsError>
where
    C: CallerIdentityApi + SharingApi + CatalogApi + ?Sized,
{
    ResourceLinkRequest::new(database_name, store)
        .store_type(store_type.unwrap_or(DEFAULT_STORE_TYPE))
        .send(clients)
        .await
}
