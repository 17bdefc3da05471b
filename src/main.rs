use clap::{CommandFactory, Parser};
use punt::cli::{self, Cli, Commands, RawOrder};
use punt::config::AppConfig;
use punt::error::{PuntError, Result};
use punt::exchange::ExchangeClient;
use punt::logging::{init_logging, init_logging_simple};
use tokio::signal;
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Serve { port }) => {
            let mut config = load_config()?;
            init_logging(&config.logging);
            if let Some(port) = port {
                config.api.port = *port;
            }
            punt::api::serve(config, shutdown_signal()).await?;
        }
        Some(Commands::Chat) => {
            init_logging_simple();
            let config = load_config()?;
            let client = ExchangeClient::from_config(&config)?;
            cli::chat::run(&client).await?;
        }
        Some(Commands::Price { symbol }) => {
            init_logging_simple();
            let config = load_config()?;
            let client = ExchangeClient::from_config(&config)?;
            cli::show_price(&client, symbol).await?;
        }
        Some(Commands::Account) => {
            init_logging_simple();
            let config = load_config()?;
            let client = ExchangeClient::from_config(&config)?;
            cli::show_account(&client).await?;
        }
        Some(Commands::Test) => {
            init_logging_simple();
            let config = load_config()?;
            let client = ExchangeClient::from_config(&config)?;
            cli::test_connection(&client).await?;
        }
        None => {
            run_order_entry(&cli).await?;
        }
    }

    Ok(())
}

/// One-shot order entry from flags or the interactive prompt flow.
async fn run_order_entry(cli: &Cli) -> Result<()> {
    let has_flags = cli.symbol.is_some()
        && cli.side.is_some()
        && cli.order_type.is_some()
        && cli.quantity.is_some();

    if !cli.interactive && !has_flags {
        let mut command = Cli::command();
        command.print_help()?;
        println!("\nNote: Use --interactive for a guided experience.");
        return Ok(());
    }

    let config = load_config()?;
    init_logging(&config.logging);

    let raw = if cli.interactive {
        match cli::interactive::run()? {
            Some(raw) => raw,
            None => return Ok(()),
        }
    } else {
        RawOrder {
            symbol: cli.symbol.clone().unwrap_or_default(),
            side: cli.side.clone().unwrap_or_default(),
            order_type: cli.order_type.clone().unwrap_or_default(),
            quantity: cli.quantity.clone().unwrap_or_default(),
            price: cli.price.clone(),
            stop_price: cli.stop.clone(),
        }
    };

    cli::place_order(&config, &raw).await;
    Ok(())
}

fn load_config() -> Result<AppConfig> {
    let config = AppConfig::load()?;
    if let Err(errors) = config.validate() {
        for problem in &errors {
            eprintln!("Config error: {}", problem);
        }
        return Err(PuntError::Internal("Invalid configuration".to_string()));
    }
    Ok(config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
