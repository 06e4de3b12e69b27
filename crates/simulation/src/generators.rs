//! Mock entity generators
//!
//! Produce randomized but schema-valid records. Every generator takes the
//! random source explicitly so callers can seed it for reproducible runs;
//! none of them can fail.

use chrono::Duration;
use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use umbra_core::{
    Agent, AgentStatus, AgentType, Capabilities, LendingMarket, PerformanceMetrics, PricingModel,
    PrivacyLevel, Timestamp, Transaction, TransactionStatus, TransactionType, TrustModel,
};
use uuid::Uuid;

/// Types drawn by the transaction generator. Withdrawals are never generated.
const TRANSACTION_TYPES: [TransactionType; 4] = [
    TransactionType::Deposit,
    TransactionType::Swap,
    TransactionType::YieldHarvest,
    TransactionType::StealthGen,
];

/// Biased 3:1:1 towards success
const TRANSACTION_STATUSES: [TransactionStatus; 5] = [
    TransactionStatus::Success,
    TransactionStatus::Success,
    TransactionStatus::Success,
    TransactionStatus::Processing,
    TransactionStatus::Pending,
];

pub const TOKENS: [&str; 4] = ["ETH", "USDC", "WBTC", "GLMR"];

/// Window of the bulk transaction history
const HISTORY_WINDOW_MS: i64 = 7 * 24 * 60 * 60 * 1000;

// ============================================================================
// PRIMITIVES
// ============================================================================

/// `n` lowercase hex characters
pub fn random_hex<R: Rng + ?Sized>(rng: &mut R, n: usize) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    (0..n)
        .map(|_| HEX[rng.gen_range(0..16)] as char)
        .collect()
}

/// `0x` followed by 64 hex characters (256 random bits)
pub fn random_hash<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("0x{}", random_hex(rng, 64))
}

/// Uniform decimal in `[min, max]` with two decimal places
fn random_decimal<R: Rng + ?Sized>(rng: &mut R, min: Decimal, max: Decimal) -> Decimal {
    let to_cents = |d: Decimal| (d * Decimal::ONE_HUNDRED).trunc().mantissa() as i64;
    let cents = rng.gen_range(to_cents(min)..=to_cents(max));
    Decimal::new(cents, 2)
}

fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid()
}

fn pick<R: Rng + ?Sized, T: Copy>(rng: &mut R, items: &[T]) -> T {
    // Every caller passes a non-empty constant table
    *items.choose(rng).unwrap_or(&items[0])
}

// ============================================================================
// AGENTS
// ============================================================================

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The six canonical agents.
///
/// Identity fields (id, name, type, trust and pricing model, capabilities,
/// reputation, initial status) are identical on every call so the catalog is
/// recognizable across reloads. Performance metrics and the proof
/// commitment are drawn fresh each time.
pub fn generate_agents<R: Rng + ?Sized>(rng: &mut R) -> Vec<Agent> {
    vec![
        Agent {
            id: "agent-1".to_string(),
            name: "Yield Optimizer Pro".to_string(),
            description: "Advanced AI agent for optimizing yield farming strategies across multiple DeFi protocols with ZK proof verification.".to_string(),
            agent_type: AgentType::Strategy,
            capabilities: Capabilities::Strategy {
                strategies: strings(&["Delta Neutral", "Yield Farming"]),
                risk: "Moderate".to_string(),
            },
            reputation_score: 98,
            performance_metrics: PerformanceMetrics {
                total_executions: rng.gen_range(1_000..=5_000),
                success_rate: random_decimal(rng, Decimal::new(95, 0), Decimal::new(999, 1)),
                average_apy: random_decimal(rng, Decimal::new(12, 0), Decimal::new(45, 0)),
                total_value_locked: rng.gen_range(1_000_000..=5_000_000),
            },
            zk_proof_commitment: random_hash(rng),
            trust_model: TrustModel::Trustless,
            pricing_model: PricingModel::Performance,
            status: AgentStatus::Active,
        },
        Agent {
            id: "agent-2".to_string(),
            name: "Privacy Sentinel".to_string(),
            description: "Privacy-first AI agent that ensures transaction anonymity with ZK proof verification and stealth address generation.".to_string(),
            agent_type: AgentType::Privacy,
            capabilities: Capabilities::Privacy {
                features: strings(&["Traffic Analysis Protection", "Mixer Integration"]),
            },
            reputation_score: 100,
            performance_metrics: PerformanceMetrics {
                total_executions: rng.gen_range(5_000..=10_000),
                success_rate: Decimal::new(999, 1),
                average_apy: Decimal::ZERO,
                total_value_locked: 0,
            },
            zk_proof_commitment: random_hash(rng),
            trust_model: TrustModel::Verified,
            pricing_model: PricingModel::Free,
            status: AgentStatus::Active,
        },
        Agent {
            id: "agent-3".to_string(),
            name: "Arbitrage Hunter".to_string(),
            description: "High-speed arbitrage detection across DEXs with automatic execution for maximum profit opportunities.".to_string(),
            agent_type: AgentType::Arbitrage,
            capabilities: Capabilities::Arbitrage {
                exchanges: strings(&["Uniswap", "Sushiswap", "Curve"]),
                speed: "<50ms".to_string(),
            },
            reputation_score: 92,
            performance_metrics: PerformanceMetrics {
                total_executions: rng.gen_range(800..=2_000),
                success_rate: random_decimal(rng, Decimal::new(85, 0), Decimal::new(95, 0)),
                average_apy: random_decimal(rng, Decimal::new(20, 0), Decimal::new(150, 0)),
                total_value_locked: rng.gen_range(500_000..=2_000_000),
            },
            zk_proof_commitment: random_hash(rng),
            trust_model: TrustModel::Community,
            pricing_model: PricingModel::Performance,
            status: AgentStatus::Active,
        },
        Agent {
            id: "agent-4".to_string(),
            name: "Liquidity Manager".to_string(),
            description: "Automated liquidity provisioning with dynamic rebalancing for optimal returns and minimal impermanent loss.".to_string(),
            agent_type: AgentType::Liquidity,
            capabilities: Capabilities::Liquidity {
                protocols: strings(&["Aave", "Compound"]),
                rebalancing: "Daily".to_string(),
            },
            reputation_score: 95,
            performance_metrics: PerformanceMetrics {
                total_executions: rng.gen_range(300..=1_000),
                success_rate: random_decimal(rng, Decimal::new(92, 0), Decimal::new(98, 0)),
                average_apy: random_decimal(rng, Decimal::new(8, 0), Decimal::new(25, 0)),
                total_value_locked: rng.gen_range(2_000_000..=8_000_000),
            },
            zk_proof_commitment: random_hash(rng),
            trust_model: TrustModel::Trustless,
            pricing_model: PricingModel::Free,
            status: AgentStatus::Idle,
        },
        Agent {
            id: "agent-5".to_string(),
            name: "Risk Shield AI".to_string(),
            description: "Real-time risk monitoring and portfolio protection with automated circuit breakers to safeguard your assets.".to_string(),
            agent_type: AgentType::RiskManagement,
            capabilities: Capabilities::RiskManagement {
                monitoring: "24/7".to_string(),
                reaction_time: "Instant".to_string(),
            },
            reputation_score: 99,
            performance_metrics: PerformanceMetrics {
                total_executions: rng.gen_range(100..=500),
                success_rate: Decimal::ONE_HUNDRED,
                average_apy: Decimal::ZERO,
                total_value_locked: rng.gen_range(10_000_000..=50_000_000),
            },
            zk_proof_commitment: random_hash(rng),
            trust_model: TrustModel::Verified,
            pricing_model: PricingModel::Subscription,
            status: AgentStatus::Active,
        },
        Agent {
            id: "agent-6".to_string(),
            name: "DeFi Strategy Bot".to_string(),
            description: "Multi-strategy trading agent combining yield farming, staking, and liquidity provision for diversified returns.".to_string(),
            agent_type: AgentType::Strategy,
            capabilities: Capabilities::Strategy {
                strategies: strings(&["Long/Short", "Staking"]),
                risk: "High".to_string(),
            },
            reputation_score: 88,
            performance_metrics: PerformanceMetrics {
                total_executions: rng.gen_range(2_000..=6_000),
                success_rate: random_decimal(rng, Decimal::new(88, 0), Decimal::new(94, 0)),
                average_apy: random_decimal(rng, Decimal::new(15, 0), Decimal::new(60, 0)),
                total_value_locked: rng.gen_range(1_500_000..=4_000_000),
            },
            zk_proof_commitment: random_hash(rng),
            trust_model: TrustModel::Community,
            pricing_model: PricingModel::Performance,
            status: AgentStatus::Training,
        },
    ]
}

// ============================================================================
// TRANSACTIONS
// ============================================================================

fn transaction_at<R: Rng + ?Sized>(rng: &mut R, timestamp: Timestamp) -> Transaction {
    Transaction {
        id: random_uuid(rng),
        tx_type: pick(rng, &TRANSACTION_TYPES),
        amount: random_decimal(rng, Decimal::new(1, 1), Decimal::new(4999, 2)),
        token: pick(rng, &TOKENS).to_string(),
        privacy_level: pick(rng, &PrivacyLevel::ALL),
        status: pick(rng, &TRANSACTION_STATUSES),
        timestamp,
        tx_hash: random_hash(rng),
    }
}

/// `count` transactions spread over the seven days before `now`, newest first
pub fn generate_transactions<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    now: Timestamp,
) -> Vec<Transaction> {
    let mut transactions: Vec<Transaction> = (0..count)
        .map(|_| {
            let age = Duration::milliseconds(rng.gen_range(0..=HISTORY_WINDOW_MS));
            transaction_at(rng, now - age)
        })
        .collect();

    transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    transactions
}

/// A single live transaction stamped `now`
pub fn generate_transaction<R: Rng + ?Sized>(rng: &mut R, now: Timestamp) -> Transaction {
    transaction_at(rng, now)
}

// ============================================================================
// MISC PAGES
// ============================================================================

/// Lending market table of the DeFi protocols page
pub fn generate_lending_markets<R: Rng + ?Sized>(rng: &mut R) -> Vec<LendingMarket> {
    [
        ("ETH", 3, 5, 120, 60),
        ("USDC", 4, 7, 80, 70),
        ("WBTC", 2, 4, 40, 50),
    ]
    .into_iter()
    .map(|(asset, supply, borrow, total, util)| LendingMarket {
        asset: asset.to_string(),
        supply_apy: Decimal::new(supply * 100 + rng.gen_range(0..100), 2),
        borrow_apy: Decimal::new(borrow * 100 + rng.gen_range(0..100), 2),
        total_supplied: Decimal::new(total * 10 + rng.gen_range(0..50), 1),
        utilization: util + rng.gen_range(0..10),
    })
    .collect()
}

/// One-time stealth address (`0x` + 40 hex characters)
pub fn generate_stealth_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("0x{}", random_hex(rng, 40))
}
