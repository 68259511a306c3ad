use std::process::ExitCode;
use std::sync::Arc;

use teloxide::prelude::*;
use tracing::{error, info};
use tracing_subscriber::prelude::*;

use usat_bot::chatbot::{
    AnswerGenerator, BotEngine, BotEvent, EngineConfig, GeminiClient, InMemorySessionStore, KnowledgeStore,
    TelegramClient,
};
use usat_bot::config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Logging is not set up yet
            init_stdout_logging();
            error!("{e}. Exiting.");
            return ExitCode::FAILURE;
        }
    };

    let _guard = init_logging(&config);

    info!("🚀 Starting USAT bot...");
    info!("Knowledge base: {}", config.knowledge_path.display());

    let gemini = match GeminiClient::new(
        config.gemini_api_token.clone(),
        config.gemini_model.clone(),
        config.gemini_timeout,
    ) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to initialize AI generator: {e}. Exiting.");
            return ExitCode::FAILURE;
        }
    };

    let bot = Bot::new(&config.telegram_bot_token);

    let generator = AnswerGenerator::new(
        Arc::new(gemini),
        Arc::new(KnowledgeStore::new(config.knowledge_path.clone())),
    );
    let engine = Arc::new(BotEngine::new(
        EngineConfig {
            chunk_delay: config.chunk_delay,
            ..Default::default()
        },
        generator,
        Arc::new(InMemorySessionStore::new()),
        Arc::new(TelegramClient::new(bot.clone())),
    ));

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback_query));

    info!("Bot started, waiting for messages...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![engine])
        .default_handler(|_| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    ExitCode::SUCCESS
}

fn init_stdout_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .init();
}

/// Log to stdout and to `<log_dir>/usat-bot.log`.
fn init_logging(config: &Config) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let env_filter = || {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
    };
    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_filter(env_filter());

    let log_file = std::fs::create_dir_all(&config.log_dir).and_then(|_| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_dir.join("usat-bot.log"))
    });

    match log_file {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::registry()
                .with(stdout_layer)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false)
                        .with_filter(env_filter()),
                )
                .init();
            Some(guard)
        }
        Err(e) => {
            tracing_subscriber::registry().with(stdout_layer).init();
            tracing::warn!("Cannot open log file in {}: {e}", config.log_dir.display());
            None
        }
    }
}

async fn handle_message(msg: Message, engine: Arc<BotEngine>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let chat_id = msg.chat.id.0;
    let event = if text.starts_with("/start") {
        BotEvent::Start { chat_id }
    } else {
        BotEvent::Text {
            chat_id,
            text: text.to_string(),
        }
    };

    engine.handle(event).await;
    Ok(())
}

async fn handle_callback_query(query: CallbackQuery, engine: Arc<BotEngine>) -> ResponseResult<()> {
    let callback_id = query.id.0.clone();
    let event = match query.message.as_ref() {
        // Payload-less presses are acknowledged as unknown payloads
        Some(message) => BotEvent::LanguageCallback {
            chat_id: message.chat().id.0,
            message_id: Some(message.id().0 as i64),
            callback_id,
            data: query.data.clone().unwrap_or_default(),
        },
        None => BotEvent::DetachedCallback { callback_id },
    };

    engine.handle(event).await;
    Ok(())
}
