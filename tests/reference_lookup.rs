//! Tests for reference store and reference lookups

mod common;

use common::{reference, reference_store, Call, FakeAws};
use omics_helpers::aws::{Store, StoreKind};
use omics_helpers::omics::{
    find_reference_arn, get_analytics_store, get_ref_store_id, get_reference_arn,
};
use omics_helpers::NotFound;

fn fake_with_references(references: Vec<Vec<omics_helpers::aws::Reference>>) -> FakeAws {
    FakeAws {
        reference_stores: vec![vec![reference_store("1234567890")]],
        references,
        ..FakeAws::default()
    }
}

mod ref_store_id {
    use super::*;

    #[tokio::test]
    async fn test_first_store_is_used() {
        let fake = FakeAws {
            reference_stores: vec![vec![reference_store("first"), reference_store("second")]],
            ..FakeAws::default()
        };

        let id = get_ref_store_id(&fake).await.unwrap();
        assert_eq!(id.as_deref(), Some("first"));
        assert_eq!(
            fake.calls(),
            vec![Call::ListReferenceStores {
                max_results: Some(10),
                next_token: None
            }]
        );
    }

    #[tokio::test]
    async fn test_no_store_returns_none() {
        let fake = FakeAws::new();
        assert_eq!(get_ref_store_id(&fake).await.unwrap(), None);
    }
}

mod reference_arn {
    use super::*;

    #[tokio::test]
    async fn test_named_reference_is_found() {
        let fake = fake_with_references(vec![vec![reference("chr1", "A"), reference("chr2", "B")]]);

        let arn = get_reference_arn(&fake, "chr2").await.unwrap();
        assert_eq!(arn, "B");
        assert_eq!(
            fake.calls()[1],
            Call::ListReferences {
                store_id: "1234567890".to_string(),
                max_results: Some(10),
                next_token: None,
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_reference_is_not_found() {
        let fake = fake_with_references(vec![vec![reference("chr1", "A"), reference("chr2", "B")]]);

        let err = get_reference_arn(&fake, "chr3").await.unwrap_err();
        assert_eq!(
            err.not_found(),
            Some(&NotFound::Reference {
                name: "chr3".to_string()
            })
        );
    }

    /// Without a reference store, references are never listed
    #[tokio::test]
    async fn test_no_store_fails_before_listing_references() {
        let fake = FakeAws::new();

        let err = get_reference_arn(&fake, "chr1").await.unwrap_err();
        assert_eq!(err.not_found(), Some(&NotFound::ReferenceStore));
        assert!(fake
            .calls()
            .iter()
            .all(|call| !matches!(call, Call::ListReferences { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_names_take_last_match() {
        let fake = fake_with_references(vec![vec![
            reference("chr1", "first"),
            reference("chr1", "second"),
        ]]);

        assert_eq!(get_reference_arn(&fake, "chr1").await.unwrap(), "second");
    }

    /// The default lookup only reads the first page
    #[tokio::test]
    async fn test_second_page_is_not_searched() {
        let fake = fake_with_references(vec![
            vec![reference("chr1", "A")],
            vec![reference("chrX", "X")],
        ]);

        let err = get_reference_arn(&fake, "chrX").await.unwrap_err();
        assert!(err.not_found().is_some());
    }

    #[tokio::test]
    async fn test_find_follows_every_page() {
        let fake = fake_with_references(vec![
            vec![reference("chr1", "A")],
            vec![reference("chr2", "B")],
            vec![reference("chrX", "X")],
        ]);

        let arn = find_reference_arn(&fake, "chrX").await.unwrap();
        assert_eq!(arn, "X");

        let tokens: Vec<Option<String>> = fake
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::ListReferences { next_token, .. } => Some(next_token),
                _ => None,
            })
            .collect();
        assert_eq!(
            tokens,
            vec![None, Some("page-1".to_string()), Some("page-2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_find_without_store() {
        let fake = FakeAws::new();
        let err = find_reference_arn(&fake, "chr1").await.unwrap_err();
        assert_eq!(err.not_found(), Some(&NotFound::ReferenceStore));
    }
}

mod analytics_store {
    use super::*;

    #[tokio::test]
    async fn test_store_is_fetched_by_kind_and_name() {
        let fake = FakeAws {
            stores: vec![Store::new("abcde", "my_variants", "variant")],
            ..FakeAws::default()
        };

        let store = get_analytics_store(&fake, StoreKind::Variant, "my_variants")
            .await
            .unwrap();
        assert_eq!(store.id, "abcde");

        let err = get_analytics_store(&fake, StoreKind::Annotation, "my_variants")
            .await
            .unwrap_err();
        assert!(err
            .service_error()
            .unwrap()
            .is_code("ResourceNotFoundException"));
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        let fake = FakeAws::new();
        assert!(get_analytics_store(&fake, StoreKind::Variant, "").await.is_err());
        assert!(fake.calls().is_empty());
    }
}
