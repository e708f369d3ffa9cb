mod chat;
mod config;
mod embedding;
mod matcher;
mod store;

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use chat::{ChatHistory, ChatTurn, QueryError, Reply, Role};
use config::Config;
use embedding::OpenAiEmbedder;
use store::JsonFileStore;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("faqbot=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let config = Config::from_env()?;
    let embedder = OpenAiEmbedder::new(&config.api_base, &config.api_key, &config.model);
    let store = JsonFileStore::new(&config.corpus_path);
    let typing_delay = Duration::from_millis(config.typing_delay_ms);

    println!("FAQ chatbot ready. Ask a question (Ctrl+D to exit).");

    let mut history: ChatHistory = Vec::new();

    loop {
        let mut question = String::new();
        print!("> ");
        std::io::stdout().flush()?;

        if std::io::stdin().read_line(&mut question)? == 0 {
            break; // EOF (Ctrl+D)
        }

        let question = question.trim();
        if question.is_empty() {
            continue;
        }

        history.push(ChatTurn {
            role: Role::User,
            message: question.to_string(),
        });

        print!("Typing...");
        std::io::stdout().flush()?;

        let reply = match chat::answer_query(&embedder, &store, question) {
            Ok(Reply::Answer(text)) => text,
            Ok(Reply::NoMatch) => "Sorry, no suitable answer found.".to_string(),
            Err(QueryError::Embedding(_)) => {
                // Already logged at the embedding boundary. Distinct from the
                // no-match message so failure causes stay distinguishable.
                "Sorry, I couldn't process that question right now.".to_string()
            }
            Err(QueryError::Store(e)) => {
                return Err(anyhow::Error::new(e).context("answer store unavailable"));
            }
        };

        print!("\r         \r");
        print_with_typing(&reply, typing_delay)?;

        history.push(ChatTurn {
            role: Role::Assistant,
            message: reply,
        });
    }

    Ok(())
}

/// Replays a completed reply character by character. Presentation only: the
/// answer is fully computed before the first character is shown.
fn print_with_typing(text: &str, delay: Duration) -> Result<()> {
    if delay.is_zero() {
        println!("{text}\n");
        return Ok(());
    }

    for ch in text.chars() {
        print!("{ch}");
        std::io::stdout().flush()?;
        std::thread::sleep(delay);
    }
    println!("\n");

    Ok(())
}
