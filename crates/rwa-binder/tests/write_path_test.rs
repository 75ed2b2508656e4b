mod common;

use common::{MockRegistry, MockStore};
use rwa_binder::{BinderError, DirectUpload, StorageBinding};
use rwa_checksum::{compute_checksums, content_hash};
use rwa_greenfield::ObjectStore;
use rwa_registry::RegistryError;
use rwa_types::properties::{IssuerProperties, MediaProperties, NoticeProperties};
use rwa_types::{DocCategory, DocType, Properties, RwaObject};
use std::sync::Arc;

use alloy::primitives::U256;

fn binding() -> (Arc<MockRegistry>, Arc<MockStore>, StorageBinding) {
    let registry = Arc::new(MockRegistry::new("asset-7"));
    let store = Arc::new(MockStore::new());
    let strategy = Arc::new(DirectUpload::new(
        store.clone() as Arc<dyn ObjectStore>,
        None,
    ));
    let binding = StorageBinding::new(registry.clone(), store.clone(), strategy);
    (registry, store, binding)
}

fn asset() -> U256 {
    U256::from(7u64)
}

fn chains() -> Vec<String> {
    vec!["97".to_string()]
}

fn issuer_object() -> RwaObject {
    RwaObject {
        title: "Issuer statement".to_string(),
        doc_type: DocType::Contract,
        slot: None,
        category: DocCategory::Issuer,
        properties: Properties::Issuer(IssuerProperties {
            forename: "Grace".to_string(),
            lastname: "Hopper".to_string(),
            company_position: "CEO".to_string(),
            company: "Harbor Assets Ltd".to_string(),
            address: "1 Dock Street".to_string(),
            country_of_registration: "GB".to_string(),
            company_number: "01234567".to_string(),
            company_registration_link: "https://registry.example.org/01234567".to_string(),
            email: "grace@harbor.example".to_string(),
            telegram_group: "@harbor".to_string(),
            website_url: "https://harbor.example".to_string(),
            x_account: "@harborassets".to_string(),
            telephone_country_prefix: "+44".to_string(),
            telephone_number: "2070000000".to_string(),
            lawracle_link: "https://lawracle.example/harbor".to_string(),
        }),
        text: "Harbor Assets issues this RWA.".to_string(),
    }
}

fn notice_object(slot: u64, text: &str) -> RwaObject {
    RwaObject {
        title: format!("Notice for slot {}", slot),
        doc_type: DocType::Slot,
        slot: Some(slot),
        category: DocCategory::Notice,
        properties: Properties::Notice(NoticeProperties {
            forename: "Grace".to_string(),
            lastname: "Hopper".to_string(),
            position: "CEO".to_string(),
            email: "grace@harbor.example".to_string(),
        }),
        text: text.to_string(),
    }
}

#[tokio::test]
async fn test_first_write_must_be_issuer_contract() {
    let (registry, _store, binding) = binding();

    // A NOTICE before any ISSUER record must be rejected.
    let err = binding
        .add_object(asset(), &notice_object(4, "too early"), chains(), None, false)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BinderError::Registry(RegistryError::FirstDescriptorNotIssuer { .. })
    ));

    // The ISSUER/CONTRACT record succeeds.
    let issuer = binding
        .add_object(asset(), &issuer_object(), chains(), None, false)
        .await
        .unwrap();
    assert!(issuer.bind_tx.is_some());
    assert!(!issuer.reused);

    // Now the NOTICE for slot 4 succeeds, with a distinct object name.
    let notice = binding
        .add_object(asset(), &notice_object(4, "on time"), chains(), None, false)
        .await
        .unwrap();
    assert_ne!(notice.object_name, issuer.object_name);

    assert_eq!(registry.descriptor_total(), 2);
}

#[tokio::test]
async fn test_duplicate_hash_rejected_without_mutation() {
    let (registry, _store, binding) = binding();

    binding
        .add_object(asset(), &issuer_object(), chains(), None, false)
        .await
        .unwrap();
    assert_eq!(registry.descriptor_total(), 1);

    // Byte-identical payload, no reuse flag: rejected before any write.
    let err = binding
        .add_object(asset(), &issuer_object(), chains(), None, false)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BinderError::Registry(RegistryError::DuplicateHash(_))
    ));
    assert_eq!(registry.descriptor_total(), 1);
}

#[tokio::test]
async fn test_reuse_existing_object_for_identical_content() {
    let (registry, _store, binding) = binding();

    let first = binding
        .add_object(asset(), &issuer_object(), chains(), None, false)
        .await
        .unwrap();

    let second = binding
        .add_object(asset(), &issuer_object(), chains(), None, true)
        .await
        .unwrap();

    assert!(second.reused);
    assert!(second.bind_tx.is_none());
    assert_eq!(second.object_name, first.object_name);
    assert_eq!(registry.descriptor_total(), 1);
}

#[tokio::test]
async fn test_ensure_bucket_is_idempotent() {
    let (_registry, store, binding) = binding();

    let first = binding.ensure_bucket(asset()).await.unwrap();
    let second = binding.ensure_bucket(asset()).await.unwrap();

    assert_eq!(first, "asset-7");
    assert_eq!(second, "asset-7");
    assert_eq!(store.bucket_create_count(), 1);
}

#[tokio::test]
async fn test_distinct_names_per_counter_slot() {
    let (registry, _store, binding) = binding();

    binding
        .add_object(asset(), &issuer_object(), chains(), None, false)
        .await
        .unwrap();

    let mut names = Vec::new();
    for i in 0..3 {
        let outcome = binding
            .add_object(
                asset(),
                &notice_object(4, &format!("notice {}", i)),
                chains(),
                None,
                false,
            )
            .await
            .unwrap();
        names.push(outcome.object_name);
    }

    names.sort();
    names.dedup();
    assert_eq!(names.len(), 3);
}

#[tokio::test]
async fn test_fetch_round_trip_reproduces_registered_hash() {
    let (_registry, _store, binding) = binding();

    let outcome = binding
        .add_object(asset(), &issuer_object(), chains(), None, false)
        .await
        .unwrap();

    let bytes = binding
        .fetch_object(asset(), &outcome.object_name)
        .await
        .unwrap();
    let checksums = compute_checksums(&bytes).unwrap();
    assert_eq!(content_hash(&checksums), outcome.content_hash);

    let object = binding
        .fetch_rwa_object(asset(), &outcome.object_name)
        .await
        .unwrap();
    assert_eq!(object.category, DocCategory::Issuer);
}

#[tokio::test]
async fn test_policy_gate_runs_before_any_network_call() {
    let (registry, store, binding) = binding();

    let bad_image = RwaObject {
        title: "Not an image".to_string(),
        doc_type: DocType::Contract,
        slot: None,
        category: DocCategory::Image,
        properties: Properties::Media(MediaProperties {
            media_name: "doc.pdf".to_string(),
            media_type: "application/pdf".to_string(),
            media_data: "aGVsbG8=".to_string(),
        }),
        text: String::new(),
    };

    let err = binding
        .add_object(asset(), &bad_image, chains(), None, false)
        .await
        .unwrap_err();
    assert!(matches!(err, BinderError::Policy(_)));
    assert_eq!(store.bucket_create_count(), 0);
    assert_eq!(registry.descriptor_total(), 0);
}

#[tokio::test]
async fn test_delete_object() {
    let (_registry, _store, binding) = binding();

    let outcome = binding
        .add_object(asset(), &issuer_object(), chains(), None, false)
        .await
        .unwrap();

    binding
        .delete_object(asset(), &outcome.object_name)
        .await
        .unwrap();

    let err = binding
        .fetch_object(asset(), &outcome.object_name)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BinderError::Store(rwa_greenfield::GreenfieldError::ObjectNotFound(_))
    ));
}
