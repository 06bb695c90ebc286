use card_oracle::chat::{run_turn, ChatSession, Role};
use card_oracle::config::OracleConfig;
use card_oracle::oracle::OracleClient;

use color_eyre::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--version") {
        println!("card-oracle {}", VERSION);
        std::process::exit(0);
    }

    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = OracleConfig::from_env();
    let client = OracleClient::from_config(&config);

    match client.health_check().await {
        Ok(true) => {}
        _ => {
            eprintln!(
                "Warning: no oracle server responding at {}",
                client.base_url
            );
            eprintln!("Set ORACLE_API_BASE or start the server, then try again.\n");
        }
    }

    println!("Card Oracle {}. Ask about Magic cards. Ctrl+D to exit.\n", VERSION);

    let mut session = ChatSession::new();
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let Some(query) = session.begin_turn(&line) else {
            continue;
        };

        match client.stream_search(&query).await {
            Ok(stream) => run_turn(&mut session, stream, &client).await,
            Err(err) => session.fail(err.to_string()),
        }

        print_last_reply(&session);
    }

    Ok(())
}

/// Print the assistant's latest reply, any cards it surfaced, and any
/// session error.
fn print_last_reply(session: &ChatSession) {
    if let Some(message) = session
        .messages()
        .iter()
        .rev()
        .find(|m| m.role == Role::Assistant)
    {
        if !message.content.is_empty() {
            println!("\n{}", message.content.trim_end());
        }
        for card in &message.cards {
            let type_line = card.type_line.as_deref().unwrap_or("");
            println!("  [card] {} {}", card.name, type_line);
        }
    }

    if let Some(error) = session.error() {
        eprintln!("\nerror: {}", error);
    }
    println!();
}
