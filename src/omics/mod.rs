//! Omics helpers
//!
//! Short call sequences over the service traits in [`crate::aws`]. Each
//! helper is generic over the traits it needs, so any implementation can be
//! injected: [`AwsClients`](crate::aws::AwsClients) in production, fakes in
//! tests.
//!
//! - [`roles`] - Create a workflow role, look up role ARNs
//! - [`policy`] - Trust policy builder and policy file loading
//! - [`stores`] - Reference store and reference lookups
//! - [`resource_link`] - Link a shared analytics store table into a local catalog

pub mod policy;
pub mod resource_link;
pub mod roles;
pub mod stores;

pub use policy::{load_policy_document, omics_trust_policy};
pub use resource_link::{
    create_resource_link, remote_database_name, ArnContainsStoreId, Pagination, ResourceLink,
    ResourceLinkRequest, ResourceMatcher,
};
pub use roles::{create_omics_role, get_role_arn, RoleStatus};
pub use stores::{find_reference_arn, get_analytics_store, get_ref_store_id, get_reference_arn};
