use rand::RngCore;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

use super::{present, simple_uuid};
use crate::data_api::DataApi;
use crate::error::{FunctionError, Result};

/// Properties advertised with every generated address
pub const PRIVACY_FEATURES: [&str; 4] = [
    "Unique address for each transaction",
    "Not traceable to original identity",
    "ZK proof for ownership verification",
    "Compatible with EIP-5564 standard",
];

const EPHEMERAL_KEY_LEN: usize = 130;

/// Body of `generate-stealth-address`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStealthAddressCommand {
    #[serde(default)]
    pub user_wallet: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StealthAddressReceipt {
    pub stealth_address: String,
    pub ephemeral_pubkey: String,
    pub zk_proof_commitment: String,
    pub id: Value,
    pub created_at: Value,
    pub privacy_features: [&'static str; 4],
}

/// Address material derived from 32 random bytes; no real key agreement
struct StealthMaterial {
    address: String,
    ephemeral_pubkey: String,
    commitment: String,
}

impl StealthMaterial {
    fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();

        let mut ephemeral_pubkey = format!("0x04{}{}", hex, simple_uuid());
        ephemeral_pubkey.truncate(EPHEMERAL_KEY_LEN);

        Self {
            address: format!("0x{}", &hex[..40]),
            ephemeral_pubkey,
            commitment: format!("zk_proof_{}", simple_uuid()),
        }
    }
}

pub struct GenerateStealthAddressUseCase<D: DataApi> {
    data_api: Arc<D>,
}

impl<D: DataApi> GenerateStealthAddressUseCase<D> {
    pub fn new(data_api: Arc<D>) -> Self {
        Self { data_api }
    }

    pub async fn execute(
        &self,
        command: GenerateStealthAddressCommand,
    ) -> Result<StealthAddressReceipt> {
        let Some(user_wallet) = present(&command.user_wallet) else {
            return Err(FunctionError::MissingParameter("userWallet"));
        };

        let material = StealthMaterial::generate();

        let stored = self
            .data_api
            .insert(
                "stealth_addresses",
                json!({
                    "user_wallet": user_wallet,
                    "stealth_address": material.address,
                    "ephemeral_pubkey": material.ephemeral_pubkey,
                    "zk_proof_commitment": material.commitment,
                    "is_used": false,
                }),
            )
            .await
            .map_err(|e| FunctionError::downstream("Failed to store stealth address", e))?
            .into_iter()
            .next()
            .unwrap_or(Value::Null);

        let tracking = json!({
            "type": "stealth_gen",
            "tx_type": "stealth_address_generation",
            "amount": 0,
            "token": "ETH",
            "privacy_level": "anonymous",
            "status": "completed",
            "tx_hash": material.commitment,
        });
        if let Err(e) = self.data_api.insert("transactions", tracking).await {
            tracing::warn!(error = %e, "Failed to record stealth address generation");
        }

        tracing::info!(user_wallet, address = %material.address, "Stealth address generated");
        Ok(StealthAddressReceipt {
            id: stored.get("id").cloned().unwrap_or(Value::Null),
            created_at: stored.get("created_at").cloned().unwrap_or(Value::Null),
            stealth_address: material.address,
            ephemeral_pubkey: material.ephemeral_pubkey,
            zk_proof_commitment: material.commitment,
            privacy_features: PRIVACY_FEATURES,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_api::InMemoryDataApi;

    fn command(wallet: Option<&str>) -> GenerateStealthAddressCommand {
        GenerateStealthAddressCommand {
            user_wallet: wallet.map(str::to_string),
        }
    }

    #[test]
    fn test_material_shape() {
        let material = StealthMaterial::generate();

        assert_eq!(material.address.len(), 42);
        assert!(material.address[2..].chars().all(|c| c.is_ascii_hexdigit()));
        // 0x04 + 64 hex + 32 hex of uuid
        assert_eq!(material.ephemeral_pubkey.len(), 100);
        assert!(material.ephemeral_pubkey.starts_with(&format!("0x04{}", &material.address[2..])));
        assert!(material.commitment.starts_with("zk_proof_"));
    }

    #[tokio::test]
    async fn test_generate_stores_address_and_tracking_row() {
        let api = Arc::new(InMemoryDataApi::new());
        let use_case = GenerateStealthAddressUseCase::new(api.clone());

        let receipt = use_case.execute(command(Some("0xabc"))).await.unwrap();

        let stored = api.rows("stealth_addresses");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0]["stealth_address"], receipt.stealth_address.as_str());
        assert_eq!(stored[0]["is_used"], false);
        assert_eq!(receipt.id, stored[0]["id"]);
        assert!(receipt.created_at.is_string());
        assert_eq!(receipt.privacy_features[3], "Compatible with EIP-5564 standard");

        let tracking = &api.rows("transactions")[0];
        assert_eq!(tracking["tx_hash"], receipt.zk_proof_commitment.as_str());
        assert_eq!(tracking["privacy_level"], "anonymous");
        assert_eq!(tracking["status"], "completed");
    }

    #[tokio::test]
    async fn test_addresses_are_unique() {
        let api = Arc::new(InMemoryDataApi::new());
        let use_case = GenerateStealthAddressUseCase::new(api);

        let first = use_case.execute(command(Some("0xabc"))).await.unwrap();
        let second = use_case.execute(command(Some("0xabc"))).await.unwrap();

        assert_ne!(first.stealth_address, second.stealth_address);
        assert_ne!(first.zk_proof_commitment, second.zk_proof_commitment);
    }

    #[tokio::test]
    async fn test_missing_wallet_and_rejection() {
        let api = Arc::new(InMemoryDataApi::new());
        let use_case = GenerateStealthAddressUseCase::new(api.clone());

        let err = use_case.execute(command(None)).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing required parameter: userWallet");

        api.reject_inserts("stealth_addresses", "table is read-only");
        let err = use_case.execute(command(Some("0xabc"))).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to store stealth address: table is read-only");
        assert!(api.rows("transactions").is_empty());
    }
}
