use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use umbra_clock::SystemClock;
use umbra_core::Agent;
use umbra_sim::{
    Activation, DashboardView, DefiView, FileStorage, IntervalScheduler, MarketplaceView,
    PoolsView, SimulationConfig, SimulationStore,
};

fn print_help() {
    eprintln!(
        r#"Umbra Simulation - mock agent catalog and live feeds

USAGE:
    umbra-sim [OPTIONS] <COMMAND>

COMMANDS:
    agents              List the agent catalog
    active              List running agents
    activate <ID>       Activate an agent (counts one execution)
    reset               Drop the persisted catalog
    watch <PAGE>        Run the live feeds of a page (dashboard, marketplace, pools, defi)

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --state-dir <DIR>   Directory holding the persisted state (default: .umbra)
    --seed <N>          Seed every random source
    --seconds <N>       How long `watch` runs (default: 20)
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: umbra_sim=info)

EXAMPLES:
    umbra-sim agents
    umbra-sim activate agent-4
    umbra-sim --seed 7 watch dashboard --seconds 10
"#
    );
}

enum Command {
    Agents,
    Active,
    Activate(String),
    Reset,
    Watch(String),
}

fn print_agents(agents: &[Agent]) {
    println!(
        "{:<9} {:<22} {:<16} {:<9} {:>10} {:>8}",
        "ID", "NAME", "TYPE", "STATUS", "EXECUTIONS", "APY"
    );
    for agent in agents {
        println!(
            "{:<9} {:<22} {:<16} {:<9} {:>10} {:>7}%",
            agent.id,
            agent.name,
            agent.agent_type.as_str(),
            format!("{:?}", agent.status).to_lowercase(),
            agent.performance_metrics.total_executions,
            agent.performance_metrics.average_apy
        );
    }
}

type Store = SimulationStore<FileStorage, SystemClock>;

async fn watch(
    page: &str,
    store: Arc<Store>,
    config: &SimulationConfig,
    seconds: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let scheduler = IntervalScheduler::current()?;
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // First tick completes immediately
    interval.tick().await;

    match page {
        "dashboard" => {
            let mut view = DashboardView::new(store, scheduler, config);
            view.mount();
            view.load()?;
            for _ in 0..seconds {
                interval.tick().await;
                let portfolio = view.portfolio();
                let latest = view.transactions().into_iter().next();
                println!(
                    "value ${} | apy {}% | {} txs | latest {}",
                    portfolio.total_value,
                    portfolio.average_apy,
                    view.transactions().len(),
                    latest
                        .map(|t| format!("{} {} {}", t.tx_type.as_str(), t.amount_text(), t.token))
                        .unwrap_or_default()
                );
            }
            view.unmount();
        }
        "marketplace" => {
            let mut view = MarketplaceView::new(store, scheduler, config);
            view.mount();
            view.load()?;
            for _ in 0..seconds {
                interval.tick().await;
                if let Some(entry) = view.logs().first() {
                    println!(
                        "[{}] {} :: {}{}",
                        entry.timestamp,
                        entry.agent_name,
                        entry.action,
                        entry.profit.as_deref().map(|p| format!(" {}", p)).unwrap_or_default()
                    );
                }
            }
            view.unmount();
        }
        "pools" => {
            let mut view = PoolsView::new(SystemClock, scheduler, config);
            view.mount();
            println!("stealth address {}", view.generate_stealth_address());
            for _ in 0..seconds {
                interval.tick().await;
                let counters = view.counters();
                println!(
                    "pool ${} | mixers {} | anonymity {} | score {}",
                    counters.total_pool_size.round_dp(2),
                    counters.active_mixers,
                    counters.anonymity_set,
                    view.privacy_score()
                );
            }
            view.unmount();
        }
        "defi" => {
            let mut view = DefiView::new(scheduler, config);
            view.mount();
            for _ in 0..seconds {
                interval.tick().await;
                for market in view.markets() {
                    println!(
                        "{:<5} supply {}% borrow {}% total ${}M util {}%",
                        market.asset,
                        market.supply_apy,
                        market.borrow_apy,
                        market.total_supplied,
                        market.utilization
                    );
                }
            }
            view.unmount();
        }
        other => {
            eprintln!("Unknown page: {}", other);
            print_help();
            std::process::exit(1);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("umbra_sim=info"))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut state_dir: Option<PathBuf> = None;
    let mut seed: Option<u64> = None;
    let mut seconds: u64 = 20;
    let mut positional: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            flag @ ("--config" | "-c" | "--state-dir" | "--seed" | "--seconds") => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: {} requires a value", flag);
                    std::process::exit(1);
                }
                let value = args[i].clone();
                match flag {
                    "--config" | "-c" => config_path = Some(value),
                    "--state-dir" => state_dir = Some(PathBuf::from(value)),
                    "--seed" => seed = Some(value.parse()?),
                    _ => seconds = value.parse()?,
                }
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
            arg => positional.push(arg.to_string()),
        }
        i += 1;
    }

    let command = match positional.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["agents"] => Command::Agents,
        ["active"] => Command::Active,
        ["activate", id] => Command::Activate(id.to_string()),
        ["reset"] => Command::Reset,
        ["watch", page] => Command::Watch(page.to_string()),
        _ => {
            print_help();
            std::process::exit(1);
        }
    };

    let mut config = match config_path {
        Some(path) => {
            log::info!("Loading configuration from: {}", path);
            SimulationConfig::from_file(&path)?
        }
        None => SimulationConfig::default(),
    };
    if let Some(dir) = state_dir {
        config.state_dir = dir;
    }
    if seed.is_some() {
        config.seed = seed;
    }

    let storage = FileStorage::open(&config.state_dir)?;
    let store = match config.seed {
        Some(seed) => SimulationStore::with_seed(storage, SystemClock, seed),
        None => SimulationStore::new(storage, SystemClock),
    }
    .with_key(config.storage_key.clone());

    match command {
        Command::Agents => print_agents(&store.list_agents()?),
        Command::Active => print_agents(&store.list_active_agents()?),
        Command::Activate(id) => match store.activate(&id)? {
            Activation::Activated(agent) => {
                println!(
                    "Activated {} ({}), {} executions",
                    agent.name, agent.id, agent.performance_metrics.total_executions
                );
            }
            Activation::NotFound => {
                eprintln!("Agent not found: {}", id);
                std::process::exit(1);
            }
        },
        Command::Reset => {
            store.reset()?;
            println!("Simulation state cleared");
        }
        Command::Watch(page) => watch(&page, Arc::new(store), &config, seconds).await?,
    }

    Ok(())
}
