//! AWS API interaction module
//!
//! This module provides the seams between the helpers and the AWS services
//! they call: IAM, STS, Omics, RAM and Glue.
//!
//! # Module Structure
//!
//! - [`api`] - One async trait per service
//! - [`client`] - `AwsClients`, the SDK-backed implementation of every trait
//! - [`error`] - `ServiceError` and user-facing error formatting
//! - [`types`] - Plain records exchanged with the services
//!
//! # Example
//!
//! ```ignore
//! use omics_helpers::aws::AwsClients;
//! use omics_helpers::omics::get_ref_store_id;
//!
//! async fn example() -> Result<(), omics_helpers::OmicsError> {
//!     let clients = AwsClients::new(None, Some("us-east-1")).await;
//!     let store_id = get_ref_store_id(&clients).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::{CallerIdentityApi, CatalogApi, IdentityApi, OmicsApi, SharingApi};
pub use client::AwsClients;
pub use error::{format_service_error, ServiceError, NO_SUCH_ENTITY};
pub use types::*;
