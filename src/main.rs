use anyhow::Context;
use careerbot::config::LogFormat;
use careerbot::domain::model::Message;
use careerbot::domain::ports::{AdviceBackend, ConnectivityObserver, ConnectivityStatus};
use careerbot::utils::logger;
use careerbot::{
    render, AdviceRequester, ChatState, CliConfig, GeminiBackend, TcpProbeObserver,
    TerminalRenderer,
};
use clap::Parser;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

const CONNECTIVITY_INTERVAL: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("🚀 Starting careerbot");

    let config = match cli.load_app_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    tracing::debug!(
        "Using model {} at {}",
        config.backend.model,
        config.backend.base_url
    );

    let template = config
        .prompt_template()
        .context("prompt template is invalid")?;
    let requester = AdviceRequester::new(GeminiBackend::from_config(&config.backend))
        .with_template(template)
        .with_settings(config.request_settings());
    let renderer = TerminalRenderer::new(!cli.plain);

    if cli.check_connectivity {
        watch_connectivity(&config.backend.base_url)
            .context("cannot watch connectivity for the configured base URL")?;
    }

    match &cli.question {
        Some(question) => ask_once(&requester, &renderer, question).await,
        None => interactive(&requester, &renderer).await,
    }
}

fn print_bot_message(renderer: &TerminalRenderer, message: &Message) {
    println!("{}\n", renderer.render(&render(&message.content)));
}

async fn ask_once<B: AdviceBackend>(
    requester: &AdviceRequester<B>,
    renderer: &TerminalRenderer,
    question: &str,
) -> anyhow::Result<()> {
    let state = ChatState::new().submit(question);
    let outcome = requester.request_advice(question).await;
    let failed = !outcome.is_success();
    let state = state.apply_outcome(outcome);

    if let Some(message) = state.last_message() {
        if failed {
            eprintln!("❌ {}", message.content);
            std::process::exit(2);
        }
        print_bot_message(renderer, message);
    }
    Ok(())
}

async fn interactive<B: AdviceBackend>(
    requester: &AdviceRequester<B>,
    renderer: &TerminalRenderer,
) -> anyhow::Result<()> {
    println!("💼 Ask a career question. Commands: /clear, /quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut state = ChatState::new();

    loop {
        print!("> ");
        std::io::stdout().flush().context("cannot write prompt")?;

        let Some(line) = lines.next_line().await.context("cannot read from stdin")? else {
            break;
        };
        let line = line.trim();

        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/clear" => {
                state = state.clear();
                println!("🧹 Conversation cleared");
                continue;
            }
            _ => {}
        }

        state = state.submit(line);
        let outcome = requester.request_advice(line).await;
        state = state.apply_outcome(outcome);

        if let Some(message) = state.last_message() {
            print_bot_message(renderer, message);
        }
        if let Some(error) = state.error.clone() {
            tracing::warn!("Request failed: {}", error);
            state = state.clear_error();
        }
    }

    tracing::info!("👋 Session ended after {} messages", state.messages.len());
    Ok(())
}

fn watch_connectivity(base_url: &str) -> careerbot::Result<()> {
    let observer = TcpProbeObserver::for_url(base_url, CONNECTIVITY_INTERVAL)?;
    let address = observer.address().to_string();
    let mut statuses = observer.observe();

    tokio::spawn(async move {
        while let Some(status) = statuses.recv().await {
            match status {
                ConnectivityStatus::Available => {
                    tracing::info!("🌐 {} is reachable", address);
                }
                ConnectivityStatus::Losing => {
                    tracing::warn!("📶 Connection to {} is degrading", address);
                }
                ConnectivityStatus::Lost | ConnectivityStatus::Unavailable => {
                    tracing::warn!("📡 {} is unreachable ({:?})", address, status);
                    eprintln!("⚠️ No internet connection. Please check your network.");
                }
            }
        }
    });

    Ok(())
}
