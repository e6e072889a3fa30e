use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use photobank_cli::{
    describe_error, is_exit_command, ChatClient, DEFAULT_CHAT_URL, EXIT_HINT, FAREWELL, GREETING,
    PROMPT,
};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

#[derive(Parser, Debug)]
#[command(name = "photobank-chat", version, about = "Chat with the photo-bank support assistant")]
struct Args {
    /// Chat endpoint of a running photobank-server.
    #[arg(long, env = "PHOTOBANK_CHAT_URL", default_value = DEFAULT_CHAT_URL)]
    url: String,

    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let client = ChatClient::new(args.url, Duration::from_secs(args.timeout_secs))
        .context("failed to build HTTP client")?;
    let mut editor = DefaultEditor::new().context("failed to start line editor")?;

    println!("{GREETING}");
    println!("{EXIT_HINT}");

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err).context("failed to read input"),
        };

        if is_exit_command(&line) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        if let Err(err) = editor.add_history_entry(line.as_str()) {
            tracing::debug!(error = %err, "failed to record history entry");
        }

        match client.ask(&line).await {
            Ok(answer) => println!("\nОтвет бота: {answer}"),
            Err(err) => eprintln!("Ошибка при отправке запроса: {}", describe_error(&err)),
        }
    }

    println!("{FAREWELL}");
    Ok(())
}
