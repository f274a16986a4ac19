use android_detector::{run_all, Config, Discovery, OutputFormat, Report};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dhcp_proto::DhcpPacket;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG_PATH: &str = "/etc/android-detector/config.yaml";

/// Android Detector - Notices Android devices joining the network via DHCP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Listen addresses, overriding the configuration (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    listen: Vec<Ipv4Addr>,

    /// UDP port, overriding the configuration
    #[arg(short, long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Listen for DHCP traffic and report Android devices (default)
    Listen,
    /// Decode a raw DHCP payload from a file and print it as JSON
    Inspect {
        /// File holding the UDP payload of one DHCP message
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing, stdout is kept for discoveries
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "android_detector=info,dhcp_proto=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match args.command {
        Some(Command::Inspect { ref file }) => inspect(file),
        Some(Command::Listen) | None => listen(load_config(&args)).await,
    }
}

fn load_config(args: &Args) -> Config {
    // Try specified path, then current directory
    let config_path = if Path::new(&args.config).exists() {
        args.config.clone()
    } else if args.config == DEFAULT_CONFIG_PATH
        && Path::new("config.yaml").exists()
    {
        info!("Config not found at {}, using config.yaml", args.config);
        "config.yaml".to_string()
    } else {
        args.config.clone()
    };

    let mut config = match Config::from_file(&config_path) {
        Ok(cfg) => {
            info!("Loaded configuration from {}", config_path);
            cfg
        }
        Err(e) => {
            warn!("Failed to load configuration from {}: {}", config_path, e);
            info!("Using default configuration");
            Config::default()
        }
    };

    if !args.listen.is_empty() {
        config.listen_addresses = args.listen.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    config
}

fn inspect(file: &Path) -> Result<()> {
    let data = std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let packet = DhcpPacket::parse(&data)
        .with_context(|| format!("failed to decode {}", file.display()))?;
    println!("{}", serde_json::to_string_pretty(&Report::from(&packet))?);
    Ok(())
}

async fn listen(config: Config) -> Result<()> {
    info!("Starting Android detector");
    let config = Arc::new(config);
    let (tx, mut rx) = mpsc::channel(64);

    info!(
        "Listening on addresses {:?}, port {}",
        config.listen_addresses, config.port
    );
    let handles = run_all(Arc::clone(&config), tx).await?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
            discovery = rx.recv() => match discovery {
                Some(discovery) => report(&discovery, config.output),
                None => {
                    error!("All listeners stopped");
                    break;
                }
            },
        }
    }

    drop(rx);
    for handle in handles {
        let _ = handle.await;
    }
    Ok(())
}

fn report(discovery: &Discovery, output: OutputFormat) {
    match output {
        OutputFormat::Log => info!(
            "Android device discovered: hostname={} mac={} from {}",
            discovery.hostname.as_deref().unwrap_or("<none>"),
            discovery.client_mac,
            discovery.source
        ),
        OutputFormat::Json => match serde_json::to_string(discovery) {
            Ok(line) => println!("{line}"),
            Err(e) => error!("Failed to serialize discovery: {}", e),
        },
    }
}
