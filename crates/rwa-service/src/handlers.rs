//! HTTP handlers
//!
//! Thin adapter over the binding layer: decode the request, run the
//! operation, encode the uniform `{ok, msg, ...}` envelope. Every
//! response is 200 with `ok: false` carrying the failure reason - no
//! stack traces past this boundary.

use alloy::primitives::U256;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rwa_binder::{StorageBinding, UploadRequest, UploadStrategy, VerifiedObjectInfo};
use rwa_checksum::{compute_checksums, content_hash, ChecksumSet};
use rwa_types::RwaObject;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Concurrent in-flight requests the service accepts
const MAX_IN_FLIGHT: usize = 64;

pub struct AppState {
    pub binding: StorageBinding,
    pub uploader: Arc<dyn UploadStrategy>,
    pub chain_id: String,
}

/// Uniform response envelope
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub ok: bool,
    pub msg: String,
    #[serde(flatten)]
    pub payload: Option<T>,
}

fn ok<T: Serialize>(msg: &str, payload: T) -> Json<Envelope<T>> {
    Json(Envelope {
        ok: true,
        msg: msg.to_string(),
        payload: Some(payload),
    })
}

fn fail<T: Serialize>(msg: String) -> Json<Envelope<T>> {
    warn!("Request failed: {}", msg);
    Json(Envelope {
        ok: false,
        msg,
        payload: None,
    })
}

fn parse_asset(raw: &str) -> Result<U256, String> {
    raw.parse::<U256>()
        .map_err(|e| format!("invalid asset id {:?}: {}", raw, e))
}

impl AppState {
    fn check_chain(&self, chain_id: &str) -> Result<(), String> {
        if chain_id != self.chain_id {
            return Err(format!(
                "service is bound to chain {}, request names chain {}",
                self.chain_id, chain_id
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddBucketRequest {
    #[serde(rename = "assetID")]
    asset_id: String,
    chain_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BucketPayload {
    bucket_name: String,
}

async fn add_bucket(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddBucketRequest>,
) -> Json<Envelope<BucketPayload>> {
    if let Err(msg) = state.check_chain(&request.chain_id) {
        return fail(msg);
    }
    let asset_id = match parse_asset(&request.asset_id) {
        Ok(id) => id,
        Err(msg) => return fail(msg),
    };

    match state.binding.ensure_bucket(asset_id).await {
        Ok(bucket_name) => ok("Bucket is ready", BucketPayload { bucket_name }),
        Err(e) => fail(e.to_string()),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddObjectRequest {
    #[serde(rename = "assetID")]
    asset_id: String,
    chain_id: String,
    owner: String,
    bucket_name: String,
    object_name: String,
    /// Payload bytes, base64
    payload: String,
    expected_checksums: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ObjectPayload {
    object_name: String,
    transaction_hash: Option<String>,
}

async fn add_object(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddObjectRequest>,
) -> Json<Envelope<ObjectPayload>> {
    if let Err(msg) = state.check_chain(&request.chain_id) {
        return fail(msg);
    }
    let asset_id = match parse_asset(&request.asset_id) {
        Ok(id) => id,
        Err(msg) => return fail(msg),
    };
    let payload = match STANDARD.decode(&request.payload) {
        Ok(bytes) => bytes,
        Err(e) => return fail(format!("payload is not valid base64: {}", e)),
    };
    let checksums = match ChecksumSet::from_base64(request.expected_checksums) {
        Ok(set) => set,
        Err(e) => return fail(e.to_string()),
    };

    let upload = UploadRequest {
        asset_id,
        bucket_name: request.bucket_name,
        object_name: request.object_name,
        payload,
        checksums,
        creator: request.owner,
    };

    match state.uploader.upload(upload).await {
        Ok(outcome) => ok(
            "Object successfully created",
            ObjectPayload {
                object_name: outcome.object_name,
                transaction_hash: outcome.tx_hash,
            },
        ),
        Err(e) => fail(e.to_string()),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListObjectsRequest {
    #[serde(rename = "assetID")]
    asset_id: String,
    chain_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListPayload {
    object_list: Vec<VerifiedObjectInfo>,
}

async fn list_objects(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ListObjectsRequest>,
) -> Json<Envelope<ListPayload>> {
    if let Err(msg) = state.check_chain(&request.chain_id) {
        return fail(msg);
    }
    let asset_id = match parse_asset(&request.asset_id) {
        Ok(id) => id,
        Err(msg) => return fail(msg),
    };

    match state.binding.reconcile(asset_id).await {
        Ok(object_list) => ok("listObjects successful", ListPayload { object_list }),
        Err(e) => fail(e.to_string()),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListOneObjectRequest {
    #[serde(rename = "assetID")]
    asset_id: String,
    object_name: String,
    chain_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OneObjectPayload {
    object: VerifiedObjectInfo,
}

async fn list_one_object(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ListOneObjectRequest>,
) -> Json<Envelope<OneObjectPayload>> {
    if let Err(msg) = state.check_chain(&request.chain_id) {
        return fail(msg);
    }
    let asset_id = match parse_asset(&request.asset_id) {
        Ok(id) => id,
        Err(msg) => return fail(msg),
    };

    match state
        .binding
        .reconcile_one(asset_id, &request.object_name)
        .await
    {
        Ok(object) => ok("listObject successful", OneObjectPayload { object }),
        Err(e) => fail(e.to_string()),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChecksumPayload {
    checksums: Vec<String>,
    hash: String,
}

async fn get_checksum(Json(object): Json<RwaObject>) -> Json<Envelope<ChecksumPayload>> {
    let payload = match object.to_canonical_bytes() {
        Ok(bytes) => bytes,
        Err(e) => return fail(e.to_string()),
    };
    let checksums = match compute_checksums(&payload) {
        Ok(set) => set,
        Err(e) => return fail(e.to_string()),
    };
    let hash = content_hash(&checksums);

    ok(
        "Checksum returned successfully",
        ChecksumPayload {
            checksums: checksums.as_strings().to_vec(),
            hash: format!("0x{:x}", hash),
        },
    )
}

async fn index() -> &'static str {
    "RWA storage binding service.\n\n\
     Routes:\n\
     \tPOST /add-bucket\n\
     \tPOST /add-object\n\
     \tPOST /list-objects\n\
     \tPOST /list-one-object\n\
     \tPOST /get-checksum\n"
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/add-bucket", post(add_bucket))
        .route("/add-object", post(add_object))
        .route("/list-objects", post(list_objects))
        .route("/list-one-object", post(list_one_object))
        .route("/get-checksum", post(get_checksum))
        .layer(ConcurrencyLimitLayer::new(MAX_IN_FLIGHT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
