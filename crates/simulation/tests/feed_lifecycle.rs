//! Integration test: live feeds under a virtual-time scheduler
//!
//! Views are mounted, loaded and unmounted while a ManualScheduler moves a
//! WorldClock, so every tick and timestamp is deterministic.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use umbra_clock::WorldClock;
use umbra_ports::Clock;
use umbra_sim::generators::generate_transactions;
use umbra_sim::{
    DashboardView, FeedConfig, InMemoryStorage, ManualScheduler, MarketplaceView, PoolsView,
    SimulationConfig, SimulationStore, TransactionFeed,
};

struct Harness {
    clock: Arc<WorldClock>,
    scheduler: Arc<ManualScheduler>,
    store: Arc<SimulationStore<InMemoryStorage, Arc<WorldClock>>>,
    config: SimulationConfig,
}

fn harness(seed: u64) -> Harness {
    let _ = env_logger::try_init();

    let clock = WorldClock::fixed(None);
    let scheduler = Arc::new(ManualScheduler::with_clock(clock.clone()));
    let store = Arc::new(SimulationStore::with_seed(
        InMemoryStorage::new(),
        clock.clone(),
        seed,
    ));
    let config = SimulationConfig {
        seed: Some(seed),
        ..Default::default()
    };

    Harness {
        clock,
        scheduler,
        store,
        config,
    }
}

#[test]
fn test_two_batches_have_ten_distinct_hashes() {
    let mut rng = StdRng::seed_from_u64(10);
    let now = Utc::now();

    let hashes: HashSet<_> = generate_transactions(&mut rng, 5, now)
        .into_iter()
        .chain(generate_transactions(&mut rng, 5, now))
        .map(|t| t.tx_hash)
        .collect();

    assert_eq!(hashes.len(), 10);
}

#[test]
fn test_dashboard_window_never_exceeds_capacity() {
    let h = harness(1);
    let mut view = DashboardView::new(h.store.clone(), h.scheduler.clone(), &h.config);
    view.mount();
    view.load().unwrap();

    for _ in 0..200 {
        h.scheduler.advance(Duration::from_millis(2_000));
        assert!(view.transactions().len() <= 10);
    }
    // 200 ticks at p = 0.3 fill the window
    assert_eq!(view.transactions().len(), 10);

    let txs = view.transactions();
    assert!(txs.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    assert!(txs[0].timestamp <= h.clock.now());
}

#[test]
fn test_dashboard_ticks_wait_for_load() {
    let h = harness(2);
    let mut view = DashboardView::new(h.store.clone(), h.scheduler.clone(), &h.config);
    view.mount();
    assert!(view.is_loading());

    assert_eq!(h.scheduler.advance(Duration::from_secs(60)), 0);

    view.load().unwrap();
    assert!(!view.is_loading());
    // 30 transaction ticks and 20 price ticks
    assert_eq!(h.scheduler.advance(Duration::from_secs(60)), 50);
}

#[test]
fn test_no_tick_after_unmount() {
    let h = harness(3);
    let mut dashboard = DashboardView::new(h.store.clone(), h.scheduler.clone(), &h.config);
    let mut marketplace = MarketplaceView::new(h.store.clone(), h.scheduler.clone(), &h.config);
    let mut pools = PoolsView::new(h.clock.clone(), h.scheduler.clone(), &h.config);

    dashboard.mount();
    dashboard.load().unwrap();
    marketplace.mount();
    marketplace.load().unwrap();
    pools.mount();
    h.scheduler.advance(Duration::from_secs(30));

    dashboard.unmount();
    marketplace.unmount();
    pools.unmount();
    assert_eq!(h.scheduler.active(), 0);

    let snapshot = (
        dashboard.transactions(),
        marketplace.logs(),
        pools.transactions(),
        pools.counters(),
    );
    assert_eq!(h.scheduler.advance(Duration::from_secs(600)), 0);
    assert_eq!(
        snapshot,
        (
            dashboard.transactions(),
            marketplace.logs(),
            pools.transactions(),
            pools.counters(),
        )
    );
}

#[test]
fn test_dropping_view_cancels_tickers() {
    let h = harness(4);
    {
        let mut pools = PoolsView::new(h.clock.clone(), h.scheduler.clone(), &h.config);
        pools.mount();
        assert_eq!(h.scheduler.active(), 1);
    }
    assert_eq!(h.scheduler.active(), 0);
}

#[test]
fn test_injection_rate_matches_probability() {
    for (probability, seed) in [(0.3, 1u64), (0.5, 2), (0.6, 3)] {
        let mut feed = TransactionFeed::with_seed(FeedConfig::new(1_000, probability, 10), seed);
        let now = Utc::now();
        for _ in 0..20_000 {
            feed.tick(now);
        }

        let rate = feed.injected() as f64 / feed.ticks() as f64;
        assert!(
            (rate - probability).abs() < 0.02,
            "p = {} observed {}",
            probability,
            rate
        );
    }
}

#[test]
fn test_pool_counters_grow_with_mixes() {
    let h = harness(5);
    let mut pools = PoolsView::new(h.clock.clone(), h.scheduler.clone(), &h.config);
    pools.mount();
    let start = pools.counters();

    h.scheduler.advance(Duration::from_secs(250));

    let end = pools.counters();
    let mixes = end.active_mixers - start.active_mixers;
    assert_eq!(end.anonymity_set - start.anonymity_set, mixes);
    // 100 ticks at p = 0.5
    assert!((30..=70).contains(&mixes), "mixes {}", mixes);
    assert!(pools.transactions().len() <= 8);
    assert!(pools.privacy_score() >= 12);
}

#[test]
fn test_marketplace_activation_flow() {
    let h = harness(6);
    let mut view = MarketplaceView::new(h.store.clone(), h.scheduler.clone(), &h.config);
    view.mount();
    view.load().unwrap();

    let before = h.store.list_agents().unwrap();
    view.activate("agent-4").unwrap();
    h.scheduler.advance(Duration::from_secs(20));

    let after = h.store.list_agents().unwrap();
    let changed: Vec<_> = before
        .iter()
        .zip(&after)
        .filter(|(a, b)| a != b)
        .map(|(a, _)| a.id.as_str())
        .collect();
    assert_eq!(changed, vec!["agent-4"]);
    assert!(view.logs().len() <= 6);
}
