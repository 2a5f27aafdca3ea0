#![forbid(unsafe_code)]
//! Inspect the Reacoin chain parameters

use clap::{Parser, Subcommand};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Color as TableColor;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use reacoin_chainparams::chainparams::{Base58Type, ChainParams, ChainRegistry};
use reacoin_chainparams::config::{load_config, DEFAULT_CONFIG_PATH};
use reacoin_chainparams::error::ChainError;
use reacoin_chainparams::transaction::COIN;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    /// Network to inspect (main, test, regtest); overrides the config file
    #[arg(long)]
    chain: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summary of the selected network
    Show {
        /// Print the full parameter set as JSON
        #[arg(long)]
        json: bool,
    },
    /// Genesis block fields and digests
    Genesis,
    /// Checkpoint table
    Checkpoints,
    /// Soft-fork deployment windows
    Deployments,
    /// Encode a hex payload as an address or key of this network
    Address {
        /// Hex payload (or a SEC public key with --pubkey)
        payload: String,
        /// pubkey, script, script2, secret, ext-public or ext-secret
        #[arg(long, default_value = "pubkey")]
        kind: String,
        /// Treat the payload as a public key and derive its P2PKH address
        #[arg(long)]
        pubkey: bool,
    },
    /// Identify the network and kind of an encoded address or key
    Decode { address: String },
    /// DNS and fixed seeds
    Seeds {
        /// Resolve the DNS seeds now
        #[arg(long)]
        resolve: bool,
    },
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(TableColor::Cyan)
        .add_attribute(Attribute::Bold)
}

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| header_cell(h)).collect::<Vec<_>>());
    table
}

fn format_time(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| secs.to_string())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{} {}", "error:".red().bold(), e);
        if e.is_fatal() {
            eprintln!("{}", "Refusing to run on inconsistent chain parameters".red());
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), ChainError> {
    let mut config = load_config(&cli.config)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(chain) = cli.chain {
        config.network.chain = chain;
    }

    let mut registry = ChainRegistry::new()?;
    let params = config.apply(&mut registry)?;

    match cli.command {
        Commands::Show { json } => show(&params, json),
        Commands::Genesis => {
            genesis(&params);
            Ok(())
        }
        Commands::Checkpoints => {
            checkpoints(&params);
            Ok(())
        }
        Commands::Deployments => {
            deployments(&params);
            Ok(())
        }
        Commands::Address {
            payload,
            kind,
            pubkey,
        } => address(&params, &payload, &kind, pubkey),
        Commands::Decode { address } => decode(&registry, &address),
        Commands::Seeds { resolve } => {
            seeds(&params, resolve);
            Ok(())
        }
    }
}

fn show(params: &ChainParams, json: bool) -> Result<(), ChainError> {
    if json {
        let text = serde_json::to_string_pretty(params)
            .map_err(|e| ChainError::Config(format!("Failed to serialize parameters: {}", e)))?;
        println!("{}", text);
        return Ok(());
    }

    println!(
        "{}",
        format!("🔗 Reacoin {} network", params.network).bright_cyan().bold()
    );
    println!();

    let consensus = &params.consensus;
    let mut table = new_table(&["Parameter", "Value"]);
    let rows: Vec<(&str, String)> = vec![
        ("Magic", hex::encode(params.message_start)),
        ("Default port", params.default_port.to_string()),
        ("Prune after height", params.prune_after_height.to_string()),
        ("Genesis hash", params.genesis_hash().to_hex()),
        ("Halving interval", consensus.subsidy_halving_interval.to_string()),
        (
            "BIP34 / BIP65 / BIP66",
            format!(
                "{} / {} / {}",
                consensus.bip34_height, consensus.bip65_height, consensus.bip66_height
            ),
        ),
        ("PoW limit", consensus.pow_limit.to_hex()),
        (
            "Target timespan / spacing",
            format!(
                "{}s / {}s",
                consensus.pow_target_timespan, consensus.pow_target_spacing
            ),
        ),
        (
            "Retarget interval",
            format!("{} blocks", consensus.difficulty_adjustment_interval()),
        ),
        (
            "Min difficulty / no retarget",
            format!(
                "{} / {}",
                consensus.pow_allow_min_difficulty_blocks, consensus.pow_no_retargeting
            ),
        ),
        ("Minimum chain work", consensus.minimum_chain_work.to_hex()),
        ("Assume valid", consensus.default_assume_valid.to_hex()),
        (
            "Estimated transactions",
            format!(
                "{:.0}",
                params
                    .chain_tx_data
                    .estimated_tx_count(chrono::Utc::now().timestamp())
            ),
        ),
        ("Require standard", params.require_standard.to_string()),
        ("Mine on demand", params.mine_blocks_on_demand.to_string()),
    ];
    for (name, value) in rows {
        table.add_row(vec![
            Cell::new(name).fg(TableColor::White),
            Cell::new(value).fg(TableColor::Green),
        ]);
    }
    println!("{}", table);
    Ok(())
}

fn genesis(params: &ChainParams) {
    let block = params.genesis_block();
    let header = &block.header;

    println!("{}", "🧱 Genesis block".bright_cyan().bold());
    println!("  {} {}", "Hash:       ".cyan(), block.hash().to_hex().green());
    println!("  {} {}", "Merkle root:".cyan(), header.merkle_root);
    println!(
        "  {} {} ({})",
        "Time:       ".cyan(),
        header.time,
        format_time(header.time as i64)
    );
    println!("  {} {}", "Nonce:      ".cyan(), header.nonce);
    println!("  {} {:#010x}", "Bits:       ".cyan(), header.bits);
    println!("  {} {}", "Version:    ".cyan(), header.version);
    println!(
        "  {} {}",
        "Header:     ".cyan(),
        hex::encode(header.serialize()).dimmed()
    );

    if let Some(coinbase) = block.transactions.first() {
        println!();
        println!("{}", "💰 Coinbase".bright_yellow().bold());
        println!("  {} {}", "Txid:       ".yellow(), coinbase.txid());
        for input in &coinbase.inputs {
            println!(
                "  {} {}",
                "Script sig: ".yellow(),
                hex::encode(input.script_sig.as_bytes())
            );
        }
        for output in &coinbase.outputs {
            println!(
                "  {} {} RCN to {}",
                "Output:     ".yellow(),
                output.value / COIN,
                hex::encode(output.script_pubkey.as_bytes())
            );
        }
    }
}

fn checkpoints(params: &ChainParams) {
    let mut table = new_table(&["Height", "Block hash"]);
    for (height, hash) in params.checkpoints.iter() {
        table.add_row(vec![
            Cell::new(format!("#{}", height)).fg(TableColor::White),
            Cell::new(hash.to_hex()).fg(TableColor::Green),
        ]);
    }
    println!("{}", table);
    println!(
        "{}",
        format!(
            "{} checkpoints, last at height {}",
            params.checkpoints.len(),
            params.checkpoints.last_checkpoint_height()
        )
        .dimmed()
    );
}

fn deployments(params: &ChainParams) {
    let consensus = &params.consensus;
    let mut table = new_table(&["Deployment", "Bit", "Version", "Start", "Timeout"]);
    for (pos, deployment) in consensus.deployments.iter() {
        table.add_row(vec![
            Cell::new(pos.name()).fg(TableColor::White),
            Cell::new(deployment.bit).fg(TableColor::Yellow),
            Cell::new(
                deployment
                    .signal_version()
                    .map_or_else(|| "-".to_string(), |v| format!("{:#010x}", v)),
            )
            .fg(TableColor::Grey),
            Cell::new(format_time(deployment.start_time)).fg(TableColor::Green),
            Cell::new(format_time(deployment.timeout)).fg(TableColor::Red),
        ]);
    }
    println!("{}", table);
    println!(
        "{}",
        format!(
            "Activation needs {} of {} blocks",
            consensus.rule_change_activation_threshold, consensus.miner_confirmation_window
        )
        .dimmed()
    );
}

fn address(params: &ChainParams, payload: &str, kind: &str, pubkey: bool) -> Result<(), ChainError> {
    let bytes = hex::decode(payload.trim())
        .map_err(|e| ChainError::InvalidAddress(format!("Invalid hex payload: {}", e)))?;

    let encoded = if pubkey {
        params.pubkey_address(&bytes)?
    } else {
        let kind: Base58Type = kind.parse()?;
        if !kind.payload_lengths().contains(&bytes.len()) {
            return Err(ChainError::InvalidAddress(format!(
                "A {} payload cannot be {} bytes",
                kind,
                bytes.len()
            )));
        }
        params.encode_address(kind, &bytes)
    };

    println!("{}", encoded.green().bold());
    Ok(())
}

fn decode(registry: &ChainRegistry, address: &str) -> Result<(), ChainError> {
    let decoded = registry.decode_address(address)?;
    println!("  {} {}", "Network:".cyan(), decoded.network);
    println!("  {} {}", "Kind:   ".cyan(), decoded.kind);
    println!("  {} {}", "Payload:".cyan(), hex::encode(&decoded.payload));
    Ok(())
}

fn seeds(params: &ChainParams, resolve: bool) {
    if params.dns_seeds.is_empty() && params.fixed_seeds.is_empty() {
        println!("{}", "No seeds configured for this network".yellow());
        return;
    }

    let mut table = new_table(&["Source", "Seed"]);
    for seed in &params.dns_seeds {
        table.add_row(vec![
            Cell::new("dns").fg(TableColor::Cyan),
            Cell::new(&seed.host).fg(TableColor::White),
        ]);
    }
    for seed in &params.fixed_seeds {
        table.add_row(vec![
            Cell::new("fixed").fg(TableColor::Magenta),
            Cell::new(seed.to_string()).fg(TableColor::White),
        ]);
    }
    println!("{}", table);

    if resolve {
        let (resolved, failures) = params.resolve_dns_seeds();
        for spec in &resolved {
            println!("  {} {}", "✓".green(), spec);
        }
        for failure in &failures {
            println!("  {} {}", "✗".red(), failure);
        }
        println!(
            "{}",
            format!("{} resolved, {} failed", resolved.len(), failures.len()).dimmed()
        );
    }
}
