//! EVM implementation of the registry trait
//!
//! A new provider is created for each operation (no connection pooling,
//! no cached registry state - every check is a live remote read).

use crate::abi::{IFeeManager, IRwaMap, IRwaStorage, IStorageManager, IERC20};
use crate::config::{ChainConfig, RegistryConfig};
use crate::descriptor::StorageDescriptor;
use crate::error::{RegistryError, Result};
use crate::interface::{BindRequest, Registry};
use crate::naming::sanitize_object_name;
use alloy::network::EthereumWallet;
use alloy::primitives::{Address, B256, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use rwa_types::{DocCategory, DocType};
use std::str::FromStr;
use tracing::{debug, info};

/// Fee amounts from the fee manager are quoted at this order of
/// magnitude below token units; on-chain amounts are scaled by
/// `10^(decimals - BASE_ORDER)`.
const BASE_ORDER: u8 = 2;

/// Fee types 0..=4 are reserved for admin/deploy/tx/mint operations;
/// per-category descriptor fees start after them.
const CATEGORY_FEE_OFFSET: u64 = 5;

/// Registry client for one EVM chain
#[derive(Debug)]
pub struct EvmRegistry {
    chain_id: String,
    chain: ChainConfig,
    map_address: Address,
    storage_manager: Address,
    fee_manager: Address,
    fee_token: Address,
    private_key: Option<String>,
    rwa_type: U256,
    version: U256,
}

impl EvmRegistry {
    /// Create a registry client for the given chain id.
    ///
    /// Validates the whole configuration and parses the chain's
    /// addresses up front so call sites never see a malformed table.
    pub fn new(config: &RegistryConfig, chain_id: &str) -> Result<Self> {
        config.validate().map_err(RegistryError::Configuration)?;

        let chain = config.chain(chain_id).ok_or_else(|| {
            RegistryError::Configuration(format!("chain {} is not configured", chain_id))
        })?;

        let parse = |name: &str, value: &str| {
            Address::from_str(value).map_err(|e| {
                RegistryError::Configuration(format!("invalid {} '{}': {}", name, value, e))
            })
        };

        info!("Initializing registry client for chain {}", chain_id);

        Ok(Self {
            chain_id: chain_id.to_string(),
            chain: chain.clone(),
            map_address: parse("map_address", &chain.map_address)?,
            storage_manager: parse("storage_manager_address", &chain.storage_manager_address)?,
            fee_manager: parse("fee_manager_address", &chain.fee_manager_address)?,
            fee_token: parse("fee_token_address", &chain.fee_token_address)?,
            private_key: config.private_key.clone(),
            rwa_type: U256::from(config.rwa_type),
            version: U256::from(config.version),
        })
    }

    /// Chain id this client is bound to
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Create a read-only provider for contract calls
    fn create_provider(&self) -> Result<impl Provider> {
        let rpc_url = self
            .chain
            .rpc_url
            .parse()
            .map_err(|e| RegistryError::ProviderError(format!("invalid RPC URL: {}", e)))?;
        Ok(ProviderBuilder::new().connect_http(rpc_url))
    }

    /// Create a provider with wallet for sending transactions
    fn create_provider_with_signer(&self) -> Result<impl Provider> {
        let private_key = self
            .private_key
            .as_deref()
            .filter(|pk| !pk.is_empty())
            .ok_or(RegistryError::NoPrivateKey)?;

        let signer = private_key.parse::<PrivateKeySigner>().map_err(|e| {
            RegistryError::ProviderError(format!("invalid private key: {}", e))
        })?;
        let wallet = EthereumWallet::from(signer);

        let rpc_url = self
            .chain
            .rpc_url
            .parse()
            .map_err(|e| RegistryError::ProviderError(format!("invalid RPC URL: {}", e)))?;
        Ok(ProviderBuilder::new().wallet(wallet).connect_http(rpc_url))
    }

    async fn storage_contract_address(&self, asset_id: U256) -> Result<Address> {
        let provider = self.create_provider()?;
        let map = IRwaMap::new(self.map_address, &provider);

        let result = map
            .getStorageContract(asset_id, self.rwa_type, self.version)
            .call()
            .await
            .map_err(|e| RegistryError::ContractCall(e.to_string()))?;

        if !result.ok {
            return Err(RegistryError::NoStorageContract(asset_id.to_string()));
        }
        Ok(result.storageContract)
    }

    /// Scale a quoted fee to on-chain token units.
    fn scale_fee(&self, fee: U256, decimals: u8) -> Result<U256> {
        if decimals < BASE_ORDER {
            return Err(RegistryError::FeeQuote(format!(
                "fee token has {} decimals, below the base order {}",
                decimals, BASE_ORDER
            )));
        }
        let exponent = U256::from(decimals - BASE_ORDER);
        Ok(fee * U256::from(10).pow(exponent))
    }
}

#[async_trait]
impl Registry for EvmRegistry {
    async fn storage_contract(&self, asset_id: U256) -> Result<Address> {
        debug!("Resolving storage contract for asset {}", asset_id);
        self.storage_contract_address(asset_id).await
    }

    async fn token_admin(&self, asset_id: U256) -> Result<Address> {
        let storage = self.storage_contract_address(asset_id).await?;
        let provider = self.create_provider()?;
        let contract = IRwaStorage::new(storage, &provider);

        contract
            .tokenAdmin()
            .call()
            .await
            .map_err(|e| RegistryError::ContractCall(e.to_string()))
    }

    async fn bucket_name(&self, asset_id: U256) -> Result<String> {
        let storage = self.storage_contract_address(asset_id).await?;
        let provider = self.create_provider()?;
        let contract = IRwaStorage::new(storage, &provider);

        let raw = contract
            .greenfieldBucket()
            .call()
            .await
            .map_err(|e| RegistryError::ContractCall(e.to_string()))?;

        let bucket_name = sanitize_object_name(&raw)?;
        debug!("Resolved bucket name {} for asset {}", bucket_name, asset_id);
        Ok(bucket_name)
    }

    async fn next_object_name(
        &self,
        asset_id: U256,
        doc_type: DocType,
        slot: u64,
    ) -> Result<String> {
        let storage = self.storage_contract_address(asset_id).await?;
        let provider = self.create_provider()?;
        let contract = IRwaStorage::new(storage, &provider);

        let raw = contract
            .greenfieldObject(U256::from(doc_type.ordinal()), U256::from(slot))
            .call()
            .await
            .map_err(|e| RegistryError::ContractCall(e.to_string()))?;

        let object_name = sanitize_object_name(&raw)?;
        debug!(
            "Resolved object name {} for asset {} ({}, slot {})",
            object_name, asset_id, doc_type, slot
        );
        Ok(object_name)
    }

    async fn descriptor_by_hash(
        &self,
        asset_id: U256,
        hash: B256,
    ) -> Result<Option<StorageDescriptor>> {
        let storage = self.storage_contract_address(asset_id).await?;
        let provider = self.create_provider()?;
        let contract = IRwaStorage::new(storage, &provider);

        let result = contract
            .getURIHash(hash)
            .call()
            .await
            .map_err(|e| RegistryError::ContractCall(e.to_string()))?;

        // The contract returns a zeroed tuple for unknown hashes.
        if result.objectName.is_empty() {
            return Ok(None);
        }

        let descriptor = StorageDescriptor::from_tuple(
            result.category,
            result.uriType,
            result.title,
            result.slot.to::<u64>(),
            result.objectName,
            result.uriHash,
            result.timestamp.to::<u64>(),
        )?;
        Ok(Some(descriptor))
    }

    async fn hash_exists(&self, asset_id: U256, hash: B256) -> Result<bool> {
        let storage = self.storage_contract_address(asset_id).await?;
        let provider = self.create_provider()?;
        let contract = IRwaStorage::new(storage, &provider);

        contract
            .existURIHash(hash)
            .call()
            .await
            .map_err(|e| RegistryError::ContractCall(e.to_string()))
    }

    async fn descriptor_count(
        &self,
        asset_id: U256,
        category: DocCategory,
        doc_type: DocType,
    ) -> Result<u64> {
        let storage = self.storage_contract_address(asset_id).await?;
        let provider = self.create_provider()?;
        let contract = IRwaStorage::new(storage, &provider);

        let count = contract
            .getURIHashCount(category.ordinal(), doc_type.ordinal())
            .call()
            .await
            .map_err(|e| RegistryError::ContractCall(e.to_string()))?;
        Ok(count.to::<u64>())
    }

    async fn bind_descriptor(&self, request: BindRequest) -> Result<String> {
        debug!(
            "Binding descriptor for asset {}: {}/{} slot {} title {:?}",
            request.asset_id, request.category, request.doc_type, request.slot, request.title
        );

        let provider = self.create_provider_with_signer()?;
        let storage = self.storage_contract_address(request.asset_id).await?;
        let storage_contract = IRwaStorage::new(storage, &provider);

        // Quote the cross-chain fee for this category and approve the
        // storage manager to spend it. Both are awaited to inclusion
        // before the descriptor write proceeds.
        let fee_token = request.fee_token.unwrap_or(self.fee_token);
        let fee_type = U256::from(request.category.ordinal() as u64 + CATEGORY_FEE_OFFSET);

        let fee_manager = IFeeManager::new(self.fee_manager, &provider);
        let fee = fee_manager
            .getCrossChainFee(
                request.destination_chains.clone(),
                false,
                fee_type,
                fee_token,
            )
            .call()
            .await
            .map_err(|e| RegistryError::FeeQuote(e.to_string()))?;

        let fee_token_contract = IERC20::new(fee_token, &provider);
        let decimals = fee_token_contract
            .decimals()
            .call()
            .await
            .map_err(|e| RegistryError::FeeQuote(e.to_string()))?;
        let fee_amount = self.scale_fee(fee, decimals)?;

        if fee_amount > U256::ZERO {
            debug!("Approving fee of {} token units", fee_amount);
            let receipt = fee_token_contract
                .approve(self.storage_manager, fee_amount)
                .send()
                .await
                .map_err(|e| RegistryError::FeeApproval(e.to_string()))?
                .get_receipt()
                .await
                .map_err(|e| RegistryError::FeeApproval(e.to_string()))?;
            if !receipt.status() {
                return Err(RegistryError::FeeApproval(
                    "approval transaction reverted".to_string(),
                ));
            }
        }

        // Advisory duplicate check. The registry enforces uniqueness at
        // commit time as well; this avoids a wasted submission.
        let exists = storage_contract
            .existURIHash(request.content_hash)
            .call()
            .await
            .map_err(|e| RegistryError::ContractCall(e.to_string()))?;
        if exists {
            return Err(RegistryError::DuplicateHash(format!(
                "0x{:x}",
                request.content_hash
            )));
        }

        // The very first descriptor for an asset must describe the
        // issuer at contract level.
        let issuer_count = storage_contract
            .getURIHashCount(DocCategory::Issuer.ordinal(), DocType::Contract.ordinal())
            .call()
            .await
            .map_err(|e| RegistryError::ContractCall(e.to_string()))?;
        if issuer_count == U256::ZERO
            && !(request.category == DocCategory::Issuer && request.doc_type == DocType::Contract)
        {
            return Err(RegistryError::FirstDescriptorNotIssuer {
                category: request.category.to_string(),
                doc_type: request.doc_type.to_string(),
            });
        }

        let manager = IStorageManager::new(self.storage_manager, &provider);
        let receipt = manager
            .addURI(
                request.asset_id,
                request.category.ordinal(),
                request.doc_type.ordinal(),
                request.title.clone(),
                U256::from(request.slot),
                request.content_hash,
                request.destination_chains.clone(),
                fee_token,
            )
            .send()
            .await
            .map_err(|e| RegistryError::RegistryWrite(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| RegistryError::RegistryWrite(e.to_string()))?;

        if !receipt.status() {
            return Err(RegistryError::RegistryWrite(format!(
                "addURI reverted for asset {} hash 0x{:x}",
                request.asset_id, request.content_hash
            )));
        }

        let tx_hash = format!("0x{:x}", receipt.transaction_hash);
        info!(
            "Bound descriptor for asset {} with hash 0x{:x} in tx {}",
            request.asset_id, request.content_hash, tx_hash
        );
        Ok(tx_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const ADDR: &str = "0x1234567890123456789012345678901234567890";

    fn test_config() -> RegistryConfig {
        let mut chains = HashMap::new();
        chains.insert(
            "97".to_string(),
            ChainConfig {
                rpc_url: "https://rpc.example.org".to_string(),
                map_address: ADDR.to_string(),
                storage_manager_address: ADDR.to_string(),
                fee_manager_address: ADDR.to_string(),
                fee_token_address: ADDR.to_string(),
            },
        );
        RegistryConfig {
            chains,
            private_key: None,
            rwa_type: 1,
            version: 1,
        }
    }

    #[test]
    fn test_new_with_configured_chain() {
        let registry = EvmRegistry::new(&test_config(), "97").unwrap();
        assert_eq!(registry.chain_id(), "97");
    }

    #[test]
    fn test_new_rejects_unknown_chain() {
        let err = EvmRegistry::new(&test_config(), "1").unwrap_err();
        assert!(matches!(err, RegistryError::Configuration(_)));
    }

    #[test]
    fn test_signer_requires_private_key() {
        let registry = EvmRegistry::new(&test_config(), "97").unwrap();
        let err = registry.create_provider_with_signer().err().unwrap();
        assert!(matches!(err, RegistryError::NoPrivateKey));
    }

    #[test]
    fn test_fee_scaling() {
        let registry = EvmRegistry::new(&test_config(), "97").unwrap();
        // 18-decimal token: quote of 150 scales by 10^16.
        let scaled = registry.scale_fee(U256::from(150u64), 18).unwrap();
        assert_eq!(
            scaled,
            U256::from(150u64) * U256::from(10u64).pow(U256::from(16u64))
        );
    }

    #[test]
    fn test_fee_scaling_rejects_tiny_decimals() {
        let registry = EvmRegistry::new(&test_config(), "97").unwrap();
        assert!(registry.scale_fee(U256::from(1u64), 1).is_err());
    }
}
