//! Domain records
//!
//! Plain records read from (or sent to) the AWS APIs. Field names follow the
//! provider's camelCase wire names so results print the way the console and
//! the CLI show them.

use serde::{Deserialize, Serialize};

/// Label used when no store type is given to the resource link resolver
pub const DEFAULT_STORE_TYPE: &str = "variant";

/// An Omics analytics store (variant or annotation)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub store_type: String,
}

impl Store {
    pub fn new(id: &str, name: &str, store_type: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            store_type: store_type.to_string(),
        }
    }
}

/// Kind of analytics store that can be fetched by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Variant,
    Annotation,
}

impl StoreKind {
    /// Label used in the remote catalog database name
    pub fn label(self) -> &'static str {
        match self {
            StoreKind::Variant => "variant",
            StoreKind::Annotation => "annotation",
        }
    }
}

/// A genomic reference store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceStore {
    pub id: String,
    pub arn: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// A reference sequence inside a reference store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub id: String,
    pub arn: String,
    pub name: String,
}

/// A resource shared to this account through RAM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedResource {
    pub arn: String,
    #[serde(default)]
    pub resource_share_arn: Option<String>,
    #[serde(default, rename = "type")]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A RAM resource share
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceShare {
    pub resource_share_arn: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Account owning the original (non-link) table
    pub owning_account_id: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Identity of the caller as reported by STS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerIdentity {
    pub account: String,
    pub arn: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// IAM role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub role_name: String,
    pub arn: String,
}

/// IAM customer managed policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedPolicy {
    pub policy_name: String,
    pub arn: String,
}

/// Table a resource link points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetTable {
    pub catalog_id: String,
    pub database_name: String,
    pub name: String,
}

/// Catalog table definition whose data lives in another account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableLinkInput {
    pub name: String,
    pub target_table: TargetTable,
}

/// Outcome of a successful create-table call
///
/// Glue's CreateTable returns an empty body, so this records what was sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTableResult {
    pub database_name: String,
    pub table_name: String,
    pub target_table: TargetTable,
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// A page with no continuation token
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::last(Vec::new())
    }
}
