use chrono::SecondsFormat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use umbra_core::{PrivacyLevel, SIMULATED_ETH_PRICE};
use umbra_ports::Clock;

use super::{MAIN_POOL, count_field, decimal_field, decimal_json, id_filter, parse_decimal, present, simple_uuid};
use crate::data_api::{DataApi, Filter, Row};
use crate::error::{FunctionError, Result};

/// Deposit amount in ETH, accepted as a JSON number or numeric text
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(serde_json::Number),
    Text(String),
}

impl AmountInput {
    fn is_blank(&self) -> bool {
        matches!(self, AmountInput::Text(text) if text.trim().is_empty())
    }

    /// Positive amount, or [`FunctionError::InvalidAmount`]
    pub fn parse(&self) -> Result<Decimal> {
        let text = match self {
            AmountInput::Number(n) => n.to_string(),
            AmountInput::Text(t) => t.clone(),
        };
        match parse_decimal(&text) {
            Some(amount) if amount > Decimal::ZERO => Ok(amount),
            _ => Err(FunctionError::InvalidAmount(text)),
        }
    }
}

/// Body of `create-deposit`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepositCommand {
    #[serde(default)]
    pub user_wallet: Option<String>,
    #[serde(default)]
    pub amount: Option<AmountInput>,
    #[serde(default)]
    pub privacy_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositReceipt {
    /// Stored `privacy_deposits` row, still `processing`
    pub deposit: Row,
    pub commitment_hash: String,
    pub tx_hash: String,
    pub anonymity_set: u64,
    pub estimated_time: &'static str,
}

/// Accepts a deposit into the main privacy pool.
///
/// The deposit is stored as `processing` and flipped to `success` by a
/// detached task once `confirmation_delay` has elapsed.
pub struct CreateDepositUseCase<D: DataApi + 'static, C: Clock + 'static> {
    data_api: Arc<D>,
    clock: Arc<C>,
    confirmation_delay: Duration,
}

impl<D: DataApi + 'static, C: Clock + 'static> CreateDepositUseCase<D, C> {
    pub fn new(data_api: Arc<D>, clock: Arc<C>, confirmation_delay: Duration) -> Self {
        Self {
            data_api,
            clock,
            confirmation_delay,
        }
    }

    pub async fn execute(&self, command: CreateDepositCommand) -> Result<DepositReceipt> {
        let amount = command.amount.as_ref().filter(|a| !a.is_blank());
        let (Some(user_wallet), Some(amount), Some(privacy_level)) = (
            present(&command.user_wallet),
            amount,
            present(&command.privacy_level),
        ) else {
            return Err(FunctionError::MissingParameters("userWallet, amount, privacyLevel"));
        };
        let amount = amount.parse()?;

        // Unknown tiers are mixed like standard deposits
        let tier = PrivacyLevel::parse(privacy_level).unwrap_or_default();
        let anonymity_set = tier.anonymity_set();

        let commitment_hash = format!("zk_commit_{}", simple_uuid());
        let nullifier_hash = format!("zk_null_{}", simple_uuid());

        let deposit = self
            .data_api
            .insert(
                "privacy_deposits",
                json!({
                    "user_wallet": user_wallet,
                    "amount": decimal_json(amount),
                    "privacy_level": privacy_level,
                    "commitment_hash": commitment_hash,
                    "nullifier_hash": nullifier_hash,
                    "status": "processing",
                    "anonymity_set": anonymity_set,
                }),
            )
            .await
            .map_err(|e| FunctionError::downstream("Failed to create deposit", e))?
            .into_iter()
            .next()
            .unwrap_or(Value::Null);

        self.grow_main_pool(amount).await;

        let tx_hash = format!("0x{}", simple_uuid());
        match id_filter(&deposit) {
            Some(filter) => self.schedule_confirmation(filter, tx_hash.clone()),
            None => tracing::warn!("Stored deposit has no id; it will stay processing"),
        }

        let transaction = json!({
            "user_id": null,
            "type": "deposit",
            "tx_type": "privacy_deposit",
            "amount": decimal_json(amount * SIMULATED_ETH_PRICE),
            "token": "ETH",
            "privacy_level": privacy_level,
            "status": "pending",
            "tx_hash": tx_hash,
        });
        if let Err(e) = self.data_api.insert("transactions", transaction).await {
            tracing::warn!(tx_hash = %tx_hash, error = %e, "Failed to record deposit transaction");
        }

        tracing::info!(user_wallet, %amount, privacy_level, "Deposit initiated");
        Ok(DepositReceipt {
            deposit,
            commitment_hash,
            tx_hash,
            anonymity_set,
            estimated_time: tier.estimated_time(),
        })
    }

    /// Add the deposit's USD value to the main pool, when one exists
    async fn grow_main_pool(&self, amount: Decimal) {
        let pool = match self
            .data_api
            .select("pool_statistics", &[Filter::eq("pool_type", MAIN_POOL)])
            .await
        {
            Ok(rows) => rows.into_iter().next(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read main pool");
                None
            }
        };
        let Some(pool) = pool else {
            return;
        };
        let Some(filter) = id_filter(&pool) else {
            tracing::warn!("Main pool row has no id");
            return;
        };

        let patch = json!({
            "total_pool_size": decimal_json(
                decimal_field(&pool, "total_pool_size") + amount * SIMULATED_ETH_PRICE
            ),
            "active_mixers": count_field(&pool, "active_mixers") + 1,
            "total_deposits": count_field(&pool, "total_deposits") + 1,
            "updated_at": self.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true),
        });
        if let Err(e) = self.data_api.update("pool_statistics", &[filter], patch).await {
            tracing::warn!(error = %e, "Failed to update main pool");
        }
    }

    fn schedule_confirmation(&self, deposit: Filter, tx_hash: String) {
        let data_api = Arc::clone(&self.data_api);
        let clock = Arc::clone(&self.clock);
        let delay = self.confirmation_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let patch = json!({
                "status": "success",
                "tx_hash": tx_hash,
                "processed_at": clock.now().to_rfc3339_opts(SecondsFormat::Millis, true),
            });
            match data_api.update("privacy_deposits", &[deposit], patch).await {
                Ok(()) => tracing::debug!(tx_hash = %tx_hash, "Deposit confirmed"),
                Err(e) => tracing::warn!(tx_hash = %tx_hash, error = %e, "Failed to confirm deposit"),
            }
        });
    }
}
