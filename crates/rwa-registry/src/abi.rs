//! Contract bindings for the registry surface
//!
//! Only the functions this layer consumes are declared; the contracts
//! themselves are external collaborators.

use alloy::sol;

sol! {
    /// Asset-id to per-asset contract lookup
    #[sol(rpc)]
    interface IRwaMap {
        function getStorageContract(uint256 id, uint256 rwaType, uint256 version)
            external view returns (bool ok, address storageContract);
    }

    /// Per-asset storage contract: names, counters and descriptors
    #[sol(rpc)]
    interface IRwaStorage {
        function greenfieldBucket() external view returns (string bucketName);
        function greenfieldObject(uint256 uriType, uint256 slot)
            external view returns (string objectName);
        function getURIHash(bytes32 hash)
            external view returns (
                uint8 category,
                uint8 uriType,
                string title,
                uint256 slot,
                string objectName,
                bytes32 uriHash,
                uint256 timestamp
            );
        function existURIHash(bytes32 hash) external view returns (bool exists);
        function getURIHashCount(uint8 category, uint8 uriType)
            external view returns (uint256 count);
        function tokenAdmin() external view returns (address admin);
    }

    /// Cross-chain storage manager: descriptor writes
    #[sol(rpc)]
    interface IStorageManager {
        function addURI(
            uint256 id,
            uint8 category,
            uint8 uriType,
            string title,
            uint256 slot,
            bytes32 hash,
            string[] destinationChainIds,
            address feeToken
        ) external;
    }

    /// Cross-chain fee quoting
    #[sol(rpc)]
    interface IFeeManager {
        function getCrossChainFee(
            string[] destinationChainIds,
            bool includeLocal,
            uint256 feeType,
            address feeToken
        ) external view returns (uint256 fee);
    }

    /// Minimal ERC-20 surface for the fee token
    #[sol(rpc)]
    interface IERC20 {
        function approve(address spender, uint256 value) external returns (bool success);
        function decimals() external view returns (uint8);
    }
}
