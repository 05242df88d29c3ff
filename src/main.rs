//! eventscout CLI binary entry point.

use std::sync::Arc;

use eventscout::cli::{ChatArgs, Cli, Commands};
use eventscout::config::ScoutConfig;
use eventscout::session::{new_session_id, ChatSession, MemorySessionStore};
use eventscout::types::ConversationState;
use eventscout::workflow::{RunReport, Workflow};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventscout=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse_args();

    let result = match cli.command {
        Commands::Chat(chat_args) => handle_chat(cli.config, chat_args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn handle_chat(
    config_path: Option<std::path::PathBuf>,
    args: ChatArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match config_path {
        Some(path) => {
            let mut config = ScoutConfig::from_file(&path)?;
            config.apply_env();
            config
        }
        None => ScoutConfig::load()?,
    };
    if let Some(model) = &args.model {
        config.set_model(model.clone());
    }

    let workflow = Workflow::from_config(&config).map_err(|e| {
        format!(
            "Invalid model '{}': {e}. Use provider:model (e.g. openai:gpt-4o-mini)",
            config.model()
        )
    })?;

    let mut template = ConversationState::new();
    if let Some(survey) = args.survey() {
        template = template.with_survey(survey);
    }
    let session = ChatSession::new(workflow, Arc::new(MemorySessionStore::new()))
        .with_template(template);
    // one in-memory session per process; stdin lines share it
    let session_id = new_session_id();

    if let Some(prompt) = args.prompt {
        let report = session.send(&session_id, prompt).await?;
        print_turn(&report);
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let report = session.send(&session_id, line).await?;
        print_turn(&report);
    }
    Ok(())
}

/// Print the latest user message and everything after it.
fn print_turn(report: &RunReport) {
    let messages = report.messages();
    let start = messages.iter().rposition(|m| m.is_user()).unwrap_or(0);
    for message in &messages[start..] {
        println!("{}", message.transcript_line());
    }
}
