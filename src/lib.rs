//! Helpers for Amazon Omics
//!
//! Create workflow roles, find the regional reference store and its
//! references, and link cross-account analytics store tables into a local
//! Glue catalog.

pub mod aws;
pub mod config;
pub mod error;
pub mod omics;

pub use error::{format_error, NotFound, OmicsError};
