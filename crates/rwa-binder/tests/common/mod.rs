//! In-memory stand-ins for the external collaborators

use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use rwa_greenfield::{
    BucketInfo, CreateBucketRequest, CreateObjectRequest, GreenfieldError, ObjectInfo,
    ObjectStore, StorageProvider, Visibility,
};
use rwa_registry::{BindRequest, Registry, RegistryError, StorageDescriptor};
use rwa_types::{DocCategory, DocType};
use std::collections::HashMap;
use std::sync::Mutex;

/// Registry fixture: one asset, counters and descriptors in memory.
pub struct MockRegistry {
    bucket: String,
    admin: Address,
    state: Mutex<RegistryState>,
}

#[derive(Default)]
struct RegistryState {
    descriptors: HashMap<B256, StorageDescriptor>,
    name_counters: HashMap<(u8, u64), u64>,
    last_allocated: HashMap<(u8, u64), String>,
}

impl MockRegistry {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            admin: Address::repeat_byte(0x11),
            state: Mutex::new(RegistryState::default()),
        }
    }

    fn object_name(doc_type: DocType, slot: u64, counter: u64) -> String {
        format!("object-{}-{}-{}", doc_type.ordinal(), slot, counter)
    }

    pub fn descriptor_total(&self) -> usize {
        self.state.lock().unwrap().descriptors.len()
    }

    /// Seed a descriptor directly, bypassing the bind flow.
    pub fn seed_descriptor(&self, descriptor: StorageDescriptor) {
        let mut state = self.state.lock().unwrap();
        state
            .descriptors
            .insert(descriptor.content_hash, descriptor);
    }
}

#[async_trait]
impl Registry for MockRegistry {
    async fn storage_contract(&self, _asset_id: U256) -> rwa_registry::Result<Address> {
        Ok(Address::repeat_byte(0x22))
    }

    async fn token_admin(&self, _asset_id: U256) -> rwa_registry::Result<Address> {
        Ok(self.admin)
    }

    async fn bucket_name(&self, _asset_id: U256) -> rwa_registry::Result<String> {
        Ok(self.bucket.clone())
    }

    async fn next_object_name(
        &self,
        _asset_id: U256,
        doc_type: DocType,
        slot: u64,
    ) -> rwa_registry::Result<String> {
        let mut state = self.state.lock().unwrap();
        let key = (doc_type.ordinal(), slot);
        let counter = state.name_counters.entry(key).or_insert(0);
        let name = Self::object_name(doc_type, slot, *counter);
        *counter += 1;
        state.last_allocated.insert(key, name.clone());
        Ok(name)
    }

    async fn descriptor_by_hash(
        &self,
        _asset_id: U256,
        hash: B256,
    ) -> rwa_registry::Result<Option<StorageDescriptor>> {
        Ok(self.state.lock().unwrap().descriptors.get(&hash).cloned())
    }

    async fn hash_exists(&self, _asset_id: U256, hash: B256) -> rwa_registry::Result<bool> {
        Ok(self.state.lock().unwrap().descriptors.contains_key(&hash))
    }

    async fn descriptor_count(
        &self,
        _asset_id: U256,
        category: DocCategory,
        doc_type: DocType,
    ) -> rwa_registry::Result<u64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .descriptors
            .values()
            .filter(|d| d.category == category && d.doc_type == doc_type)
            .count() as u64)
    }

    async fn bind_descriptor(&self, request: BindRequest) -> rwa_registry::Result<String> {
        let mut state = self.state.lock().unwrap();

        if state.descriptors.contains_key(&request.content_hash) {
            return Err(RegistryError::DuplicateHash(format!(
                "0x{:x}",
                request.content_hash
            )));
        }

        let issuer_exists = state
            .descriptors
            .values()
            .any(|d| d.category == DocCategory::Issuer && d.doc_type == DocType::Contract);
        if !issuer_exists
            && !(request.category == DocCategory::Issuer && request.doc_type == DocType::Contract)
        {
            return Err(RegistryError::FirstDescriptorNotIssuer {
                category: request.category.to_string(),
                doc_type: request.doc_type.to_string(),
            });
        }

        let key = (request.doc_type.ordinal(), request.slot);
        let object_name = state
            .last_allocated
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Self::object_name(request.doc_type, request.slot, 0));

        state.descriptors.insert(
            request.content_hash,
            StorageDescriptor {
                category: request.category,
                doc_type: request.doc_type,
                title: request.title,
                slot: request.slot,
                object_name,
                content_hash: request.content_hash,
                timestamp: 1_700_000_000,
            },
        );

        Ok(format!("0xbind{:04}", state.descriptors.len()))
    }
}

/// Object-store fixture: buckets and objects in memory.
pub struct MockStore {
    state: Mutex<StoreState>,
}

#[derive(Default)]
struct StoreState {
    buckets: HashMap<String, BucketInfo>,
    bucket_creates: u64,
    pending: HashMap<String, CreateObjectRequest>,
    objects: HashMap<(String, String), (ObjectInfo, Vec<u8>)>,
    tx_counter: u64,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
        }
    }

    pub fn bucket_create_count(&self) -> u64 {
        self.state.lock().unwrap().bucket_creates
    }

    /// Place an object directly into a bucket, bypassing the create and
    /// upload flow.
    pub fn seed_object(&self, bucket_name: &str, info: ObjectInfo, payload: Vec<u8>) {
        let mut state = self.state.lock().unwrap();
        state.objects.insert(
            (bucket_name.to_string(), info.object_name.clone()),
            (info, payload),
        );
    }
}

#[async_trait]
impl ObjectStore for MockStore {
    async fn bucket_meta(&self, bucket_name: &str) -> rwa_greenfield::Result<BucketInfo> {
        self.state
            .lock()
            .unwrap()
            .buckets
            .get(bucket_name)
            .cloned()
            .ok_or_else(|| GreenfieldError::BucketNotFound(bucket_name.to_string()))
    }

    async fn create_bucket(&self, request: CreateBucketRequest) -> rwa_greenfield::Result<String> {
        let mut state = self.state.lock().unwrap();
        state.bucket_creates += 1;
        state.buckets.insert(
            request.bucket_name.clone(),
            BucketInfo {
                bucket_name: request.bucket_name,
                owner: request.creator,
                visibility: request.visibility,
                create_at: 1_700_000_050,
            },
        );
        state.tx_counter += 1;
        Ok(format!("0xbucket{:04}", state.tx_counter))
    }

    async fn create_object(&self, request: CreateObjectRequest) -> rwa_greenfield::Result<String> {
        let mut state = self.state.lock().unwrap();
        let key = (request.bucket_name.clone(), request.object_name.clone());
        if state.objects.contains_key(&key) {
            return Err(GreenfieldError::ObjectAlreadyExists(
                request.object_name.clone(),
            ));
        }
        state.tx_counter += 1;
        let tx_hash = format!("0xobject{:04}", state.tx_counter);
        state.pending.insert(tx_hash.clone(), request);
        Ok(tx_hash)
    }

    async fn upload_object(
        &self,
        bucket_name: &str,
        object_name: &str,
        payload: Vec<u8>,
        tx_hash: &str,
    ) -> rwa_greenfield::Result<()> {
        let mut state = self.state.lock().unwrap();
        let request = state.pending.remove(tx_hash).ok_or_else(|| {
            GreenfieldError::UploadFailed {
                object_name: object_name.to_string(),
                code: -1,
                message: format!("no pending creation for tx {}", tx_hash),
            }
        })?;

        let info = ObjectInfo {
            object_name: object_name.to_string(),
            owner: request.creator.clone(),
            creator: request.creator,
            payload_size: payload.len() as u64,
            visibility: request.visibility,
            create_at: 1_700_000_100,
            checksums: request.expect_checksums,
        };
        state.objects.insert(
            (bucket_name.to_string(), object_name.to_string()),
            (info, payload),
        );
        Ok(())
    }

    async fn get_object(
        &self,
        bucket_name: &str,
        object_name: &str,
    ) -> rwa_greenfield::Result<Vec<u8>> {
        self.state
            .lock()
            .unwrap()
            .objects
            .get(&(bucket_name.to_string(), object_name.to_string()))
            .map(|(_, payload)| payload.clone())
            .ok_or_else(|| GreenfieldError::ObjectNotFound(object_name.to_string()))
    }

    async fn head_object(
        &self,
        bucket_name: &str,
        object_name: &str,
    ) -> rwa_greenfield::Result<ObjectInfo> {
        self.state
            .lock()
            .unwrap()
            .objects
            .get(&(bucket_name.to_string(), object_name.to_string()))
            .map(|(info, _)| info.clone())
            .ok_or_else(|| GreenfieldError::ObjectNotFound(object_name.to_string()))
    }

    async fn list_objects(&self, bucket_name: &str) -> rwa_greenfield::Result<Vec<ObjectInfo>> {
        let state = self.state.lock().unwrap();
        let mut objects: Vec<ObjectInfo> = state
            .objects
            .iter()
            .filter(|((bucket, _), _)| bucket == bucket_name)
            .map(|(_, (info, _))| info.clone())
            .collect();
        objects.sort_by(|a, b| a.object_name.cmp(&b.object_name));
        Ok(objects)
    }

    async fn delete_object(
        &self,
        bucket_name: &str,
        object_name: &str,
    ) -> rwa_greenfield::Result<String> {
        let mut state = self.state.lock().unwrap();
        state
            .objects
            .remove(&(bucket_name.to_string(), object_name.to_string()))
            .ok_or_else(|| GreenfieldError::ObjectNotFound(object_name.to_string()))?;
        state.tx_counter += 1;
        Ok(format!("0xdelete{:04}", state.tx_counter))
    }

    async fn delete_bucket(&self, bucket_name: &str) -> rwa_greenfield::Result<String> {
        let mut state = self.state.lock().unwrap();
        state
            .buckets
            .remove(bucket_name)
            .ok_or_else(|| GreenfieldError::BucketNotFound(bucket_name.to_string()))?;
        state.tx_counter += 1;
        Ok(format!("0xdelete{:04}", state.tx_counter))
    }

    async fn storage_providers(&self) -> rwa_greenfield::Result<Vec<StorageProvider>> {
        Ok(vec![StorageProvider {
            id: 1,
            operator_address: format!("{:?}", Address::repeat_byte(0x33)),
            endpoint: "https://sp1.example.org".to_string(),
            moniker: "sp1".to_string(),
        }])
    }
}

/// Visibility helper for fixtures.
pub fn public_read() -> Visibility {
    Visibility::PublicRead
}
