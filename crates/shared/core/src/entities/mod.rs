mod agent;
mod capabilities;
mod lending;
mod operation_log;
mod pool;
mod portfolio;
mod privacy;
mod simulation_state;
mod transaction;

pub use agent::{Agent, AgentStatus, PerformanceMetrics, PricingModel, TrustModel};
pub use capabilities::{AgentType, Capabilities};
pub use lending::LendingMarket;
pub use operation_log::{LogKind, OperationLog};
pub use pool::{PoolCounters, PoolStatistics, privacy_score};
pub use portfolio::{PortfolioSummary, average_apy};
pub use privacy::PrivacyLevel;
pub use simulation_state::SimulationState;
pub use transaction::{Transaction, TransactionId, TransactionStatus, TransactionType};
