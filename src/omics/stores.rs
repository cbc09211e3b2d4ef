//! Reference store lookups
//!
//! There is at most one reference store per account per region, so every
//! lookup here uses the first store of the listing.

use crate::aws::api::OmicsApi;
use crate::aws::types::{ReferenceStore, Store, StoreKind};
use crate::error::{NotFound, OmicsError};

/// Result cap for the store and reference listings
pub const LIST_PAGE_SIZE: i32 = 10;

async fn first_reference_store<C>(omics: &C) -> Result<Option<ReferenceStore>, OmicsError>
where
    C: OmicsApi + ?Sized,
{
    let page = omics
        .list_reference_stores(Some(LIST_PAGE_SIZE), None)
        .await?;
    Ok(page.items.into_iter().next())
}

/// Id of the reference store in this region, if one exists
pub async fn get_ref_store_id<C>(omics: &C) -> Result<Option<String>, OmicsError>
where
    C: OmicsApi + ?Sized,
{
    let store_id = first_reference_store(omics).await?.map(|store| store.id);

    if store_id.is_none() {
        tracing::debug!("No reference store found");
    }

    Ok(store_id)
}

/// ARN of the named reference in the region's reference store
///
/// Only the first page of references is searched. Use
/// [`find_reference_arn`] to search every page.
pub async fn get_reference_arn<C>(omics: &C, reference_name: &str) -> Result<String, OmicsError>
where
    C: OmicsApi + ?Sized,
{
    let store = first_reference_store(omics)
        .await?
        .ok_or(NotFound::ReferenceStore)?;

    let page = omics
        .list_references(&store.id, Some(LIST_PAGE_SIZE), None)
        .await?;

    // Last match wins when a name appears more than once
    let arn = page
        .items
        .into_iter()
        .filter(|reference| reference.name == reference_name)
        .last()
        .map(|reference| reference.arn);

    arn.ok_or_else(|| {
        NotFound::Reference {
            name: reference_name.to_string(),
        }
        .into()
    })
}

/// ARN of the named reference, following every page of the listing
pub async fn find_reference_arn<C>(omics: &C, reference_name: &str) -> Result<String, OmicsError>
where
    C: OmicsApi + ?Sized,
{
    let store = first_reference_store(omics)
        .await?
        .ok_or(NotFound::ReferenceStore)?;

    let mut found = None;
    let mut page_token: Option<String> = None;

    loop {
        let page = omics
            .list_references(&store.id, Some(LIST_PAGE_SIZE), page_token.as_deref())
            .await?;

        if let Some(reference) = page
            .items
            .into_iter()
            .filter(|reference| reference.name == reference_name)
            .last()
        {
            found = Some(reference.arn);
        }

        if page.next_token.is_none() {
            break;
        }
        page_token = page.next_token;
    }

    found.ok_or_else(|| {
        NotFound::Reference {
            name: reference_name.to_string(),
        }
        .into()
    })
}

/// Fetch a variant or annotation store by name
pub async fn get_analytics_store<C>(
    omics: &C,
    kind: StoreKind,
    name: &str,
) -> Result<Store, OmicsError>
where
    C: OmicsApi + ?Sized,
{
    if name.is_empty() {
        return Err(OmicsError::InvalidInput("store name must not be empty".to_string()));
    }

    Ok(omics.get_analytics_store(kind, name).await?)
}
