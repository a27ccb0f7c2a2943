use clap::{Parser, Subcommand};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use remote_power::application::errors::ListenerError;
use remote_power::domain::entities::PowerAction;
use remote_power::application::messaging::Dispatcher;
use remote_power::infrastructure::adapters::{send_command, UdpListener};
use remote_power::infrastructure::config::{Config, DEFAULT_PORT};
use remote_power::infrastructure::power;

#[derive(Parser)]
#[command(name = "remote-power")]
#[command(about = "Listen for UDP power commands and act on the host", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the listener
    Run {
        /// Address to bind (overrides config)
        #[arg(short, long)]
        bind: Option<IpAddr>,

        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Report failed power actions instead of ignoring them
        #[arg(long)]
        strict: bool,
    },
    /// Send a command to a listener
    Send {
        /// Host running the listener
        host: String,

        /// Command to send (shutdown, reboot, sleep, hibernate)
        command: String,

        /// Listener port
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { bind, port, strict } => run_listener(&cli.config, bind, port, strict),
        Commands::Send { host, command, port } => send(&host, port, &command),
        Commands::Version => {
            println!("remote-power v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(&cli.config),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run_listener(
    config_path: &str,
    bind: Option<IpAddr>,
    port: Option<u16>,
    strict: bool,
) -> Result<(), ListenerError> {
    let mut config = Config::resolve(config_path)?;
    if let Some(bind) = bind {
        config.listener.bind_address = bind;
    }
    if let Some(port) = port {
        config.listener.port = port;
    }
    config.power.strict |= strict;

    let dispatcher = Dispatcher::new(power::for_host(&config.power));
    tracing::info!(
        "Power actions for {} hosts ({} mode)",
        dispatcher.platform(),
        if config.power.strict { "strict" } else { "fire-and-forget" }
    );

    let rt = tokio::runtime::Runtime::new().map_err(ListenerError::Runtime)?;
    rt.block_on(async {
        let mut listener = UdpListener::bind(&config.listener, dispatcher).await?;
        tracing::info!(
            "Listening on {}, waiting for remote commands...",
            listener.local_addr()?
        );
        listener.run().await;
        Ok::<(), ListenerError>(())
    })
}

fn send(host: &str, port: u16, command: &str) -> Result<(), ListenerError> {
    let rt = tokio::runtime::Runtime::new().map_err(ListenerError::Runtime)?;
    rt.block_on(async {
        let target: SocketAddr = tokio::net::lookup_host((host, port))
            .await
            .map_err(ListenerError::Send)?
            .next()
            .ok_or_else(|| {
                ListenerError::Send(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no address for {}", host),
                ))
            })?;

        if command.parse::<PowerAction>().is_err() {
            tracing::warn!("'{}' is not a known command; the listener will ignore it", command);
        }

        send_command(target, command).await?;
        Ok::<(), ListenerError>(())
    })
}

fn init_config(config_path: &str) -> Result<(), ListenerError> {
    if Path::new(config_path).exists() {
        tracing::warn!("{} already exists, not overwriting", config_path);
        return Ok(());
    }

    let yaml = Config::default().to_yaml()?;
    std::fs::write(config_path, yaml)
        .map_err(|e| ListenerError::Config(e.into()))?;
    println!("Wrote default config to {}", config_path);
    Ok(())
}
