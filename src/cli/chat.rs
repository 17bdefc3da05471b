//! Interactive natural-language order entry shell (`punt chat`).

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::cli::output::{print_error, print_warn};
use crate::dispatch::{format_report, OrderDispatcher};
use crate::exchange::ExchangeClient;
use crate::{parser, validation};

pub async fn run(client: &ExchangeClient) -> anyhow::Result<()> {
    println!("\x1b[36mBinance Futures Chat Terminal\x1b[0m");
    println!("Describe an order in plain words. E.g.: buy 0.01 btc at market");
    println!("Type 'help' for examples, 'exit' to quit.");
    let runtime = if client.simulation() {
        "SIMULATION"
    } else {
        "REAL TESTNET"
    };
    println!("Runtime: {}", runtime);
    println!();

    let history_path = dirs::config_dir().map(|d| d.join("punt").join("history.txt"));

    let mut rl = DefaultEditor::new()?;

    if let Some(ref path) = history_path {
        let _ = rl.load_history(path);
    }

    loop {
        match rl.readline("\x1b[36mpunt>\x1b[0m ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                match line {
                    "exit" | "quit" | "q" => break,
                    "help" | "?" => {
                        print_chat_help();
                        continue;
                    }
                    _ => {}
                }

                let Some(intent) = parser::parse(line) else {
                    print_warn(
                        "Could not parse command. Use: [action] [quantity] [symbol] at [price|market]",
                    );
                    continue;
                };

                println!(
                    "Target: {} {} {} ({})",
                    intent.side, intent.quantity, intent.symbol, intent.order_type
                );

                if let Err(e) = validation::validate_intent(&intent) {
                    print_error(&format!("{e}"));
                    continue;
                }

                match OrderDispatcher::new(client).place(&intent).await {
                    Ok(response) => println!("{}", format_report(&response)),
                    Err(e) => print_error(&format!("{e}")),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("readline error: {e}");
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = rl.save_history(path);
    }

    Ok(())
}

fn print_chat_help() {
    println!("Example commands:");
    println!("  buy 0.01 btc at market");
    println!("  sell 0.5 eth at 2500");
    println!("  stop limit buy 0.1 sol price 150 trigger 148");
    println!("  long 0.002 btc at market");
    println!("  help     (this message)");
    println!("  exit     (quit shell)");
}
