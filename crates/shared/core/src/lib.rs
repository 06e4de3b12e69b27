//! Umbra Core Domain
//!
//! Pure domain types for the Umbra privacy DeFi simulation.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Agent catalog
    Agent,
    AgentStatus,
    AgentType,
    Capabilities,
    PerformanceMetrics,
    PricingModel,
    TrustModel,
    // Live feed records
    LendingMarket,
    LogKind,
    OperationLog,
    PoolCounters,
    PoolStatistics,
    PortfolioSummary,
    PrivacyLevel,
    Transaction,
    TransactionId,
    TransactionStatus,
    TransactionType,
    // Durable state
    SimulationState,
    average_apy,
    privacy_score,
};
pub use values::{AgentId, Amount, SIMULATED_ETH_PRICE, Timestamp};
