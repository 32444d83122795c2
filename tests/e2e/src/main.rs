//! End-to-End Test Runner for the HTS harness

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use config::{Credentials, HarnessConfig};
use hts_e2e_tests::{
    framework::{TestConfig, TestFramework, TestScenario},
    mock_framework,
    report::{print_results_summary, save_results_to_file},
    AtomicTransferScenario, UnassociatedTransferScenario,
};
use network::{Participants, RpcLedger};
use std::path::PathBuf;
use std::sync::Arc;
use token_service::{ScenarioContext, SystemContractProvisioner};
use tracing::{error, info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use types::Hbar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Selection {
    Atomic,
    Unassociated,
    All,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Test scenario to run
    #[arg(short, long, value_enum, default_value_t = Selection::All)]
    scenario: Selection,

    /// Network profile (overrides HEDERA_NETWORK and the config file)
    #[arg(short, long)]
    network: Option<String>,

    /// Harness config file (defaults to config/harness.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output results to file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Run against the in-memory ledger with development keys
    #[arg(long)]
    mock: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for target in ["hts_e2e", "hts_e2e_tests", "token_service", "network", "hts_config"] {
        filter = filter.add_directive(format!("{}={}", target, log_level).parse()?);
    }
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HTS E2E Test Suite");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut harness = HarnessConfig::load(args.config.as_deref())
        .context("Loading harness configuration")?;
    if let Some(network) = &args.network {
        harness = harness.with_network(network.clone());
    }

    let test_config = TestConfig {
        timeout_secs: harness.suite_timeout_secs,
        verbose: args.verbose,
        network: if args.mock {
            "mock".to_string()
        } else {
            harness.network.clone()
        },
    };

    let framework = if args.mock {
        info!("🧪 Using in-memory ledger");
        mock_framework(test_config, &harness)?.0
    } else {
        live_framework(test_config, &harness).await?
    };

    let scenarios: Vec<Box<dyn TestScenario>> = match args.scenario {
        Selection::Atomic => vec![Box::new(AtomicTransferScenario::default())],
        Selection::Unassociated => vec![Box::new(UnassociatedTransferScenario::default())],
        Selection::All => {
            info!("Running all test scenarios");
            vec![
                Box::new(AtomicTransferScenario::default()),
                Box::new(UnassociatedTransferScenario::default()),
            ]
        }
    };

    let mut results = Vec::with_capacity(scenarios.len());
    for scenario in &scenarios {
        results.push(framework.run_scenario(scenario.as_ref()).await);
    }

    // Print results summary
    print_results_summary(&results);

    let output_path = args
        .output
        .unwrap_or_else(|| PathBuf::from(&harness.report_path));
    save_results_to_file(&results, &framework.config().network, &output_path).await?;
    info!("Results saved to: {}", output_path.display());

    // Exit with error code if any tests failed
    let all_passed = results.iter().all(|r| r.success);
    if !all_passed {
        error!("Some tests failed");
        std::process::exit(1);
    }

    info!("All tests passed successfully!");
    Ok(())
}

async fn live_framework(test_config: TestConfig, harness: &HarnessConfig) -> Result<TestFramework> {
    let profile = harness.resolve_network()?;
    info!(
        "🌐 Network {} (chain {}) via {}",
        profile.name, profile.chain_id, profile.rpc_url
    );

    let credentials = Credentials::from_env().context("Loading credentials")?;
    let participants = Participants::from_credentials(&credentials, profile.chain_id)
        .context("Loading signers")?;

    let ledger = RpcLedger::new(&profile, &harness.mirror)?;
    ledger
        .verify_chain_id()
        .await
        .with_context(|| format!("Connecting to {}", profile.rpc_url))?;

    let context = ScenarioContext::new(Arc::new(ledger), participants, harness.gas_limit);
    let provisioner = SystemContractProvisioner::new(
        Hbar::from_hbar(harness.token_create_fee_hbar)?,
        harness.token_create_gas_limit,
    );

    Ok(TestFramework::new(test_config, context, Arc::new(provisioner)))
}
