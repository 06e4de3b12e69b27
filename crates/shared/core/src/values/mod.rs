use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Token or USD amount - uses Decimal for precision
pub type Amount = Decimal;

/// Opaque agent identifier (`agent-1`, `agent-2`, ...)
pub type AgentId = String;

/// Simulated ETH/USD rate used to value pool deposits
pub const SIMULATED_ETH_PRICE: Decimal = dec!(2000);
