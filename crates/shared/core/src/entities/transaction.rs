use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::privacy::PrivacyLevel;
use crate::values::Timestamp;

/// Unique identifier for a transaction
pub type TransactionId = Uuid;

/// Kind of simulated transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    StealthGen,
    Swap,
    YieldHarvest,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdrawal => "withdrawal",
            TransactionType::StealthGen => "stealth_gen",
            TransactionType::Swap => "swap",
            TransactionType::YieldHarvest => "yield_harvest",
        }
    }
}

/// Transaction processing status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Processing,
    Success,
    Error,
}

impl TransactionStatus {
    /// Returns true if the transaction will not change status again
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Success | TransactionStatus::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Processing => "processing",
            TransactionStatus::Success => "success",
            TransactionStatus::Error => "error",
        }
    }
}

/// A simulated transaction shown in live feeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    /// Token amount with two decimal places
    pub amount: Decimal,
    pub token: String,
    pub privacy_level: PrivacyLevel,
    pub status: TransactionStatus,
    pub timestamp: Timestamp,
    /// `0x` followed by 64 hex characters
    pub tx_hash: String,
}

impl Transaction {
    /// Restamp a freshly injected transaction.
    ///
    /// Live feeds call this right after generation; records are never
    /// mutated once they are in a window.
    pub fn refresh(&mut self, now: Timestamp, status: Option<TransactionStatus>) {
        self.timestamp = now;
        if let Some(status) = status {
            self.status = status;
        }
    }

    /// Amount rendered with exactly two decimal places
    pub fn amount_text(&self) -> String {
        format!("{:.2}", self.amount)
    }
}
