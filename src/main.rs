//! jarvis-chat - Terminal chat client
//!
#![doc = "jarvis-chat - Terminal chat client for the J.A.R.V.I.S backend"]
#![doc = "Main entry point for the chat client application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jarvis_chat::api::ApiClient;
use jarvis_chat::cli::{Cli, Commands, HistoryCommand, SettingsCommand};
use jarvis_chat::commands;
use jarvis_chat::storage::JsonStorage;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // If the user supplied a storage directory on the CLI (or via env),
    // mirror it into JARVIS_STORAGE_DIR so the storage initializer can pick
    // it up. This keeps callers unchanged while allowing `JsonStorage::new()`
    // to honor an override.
    if let Some(dir) = &cli.storage_dir {
        std::env::set_var("JARVIS_STORAGE_DIR", dir);
        tracing::info!("Using storage directory override from CLI: {}", dir);
    }

    let storage = JsonStorage::new()?;

    // Execute command
    match cli.command {
        Commands::Chat {
            realtime,
            resume,
            url,
        } => {
            tracing::info!("Starting interactive chat mode");
            if realtime {
                tracing::debug!("Using realtime endpoint variant");
            }
            if let Some(r) = &resume {
                tracing::debug!("Resuming session: {}", r);
            }
            if let Some(u) = &url {
                tracing::debug!("Using backend URL override: {}", u);
            }

            commands::chat::run_chat(storage, realtime, resume, url).await?;
            Ok(())
        }
        Commands::History { command } => {
            let api = api_from_settings(&storage)?;
            match command {
                HistoryCommand::List => commands::history::list(&api, &storage).await,
                HistoryCommand::Show { session_id } => {
                    commands::history::show(&api, &storage, &session_id).await
                }
                HistoryCommand::Search { query } => {
                    commands::history::search(&api, &storage, &query).await
                }
                HistoryCommand::Delete { session_id } => {
                    commands::history::delete(&api, &storage, &session_id).await
                }
            }
        }
        Commands::Settings { command } => match command {
            SettingsCommand::Show => {
                commands::settings::show(&storage);
                Ok(())
            }
            SettingsCommand::Set { key, value } => commands::settings::set(&storage, &key, &value),
            SettingsCommand::Reset { force } => commands::settings::reset(&storage, force),
        },
        Commands::Stats => {
            commands::stats::show(&storage);
            Ok(())
        }
        Commands::Export { session_id } => {
            let api = api_from_settings(&storage)?;
            commands::export::run(&api, &storage, &session_id).await
        }
        Commands::Health => {
            let api = api_from_settings(&storage)?;
            commands::health::run(&api).await;
            Ok(())
        }
    }
}

/// Build an API client from the persisted `api_url` setting
fn api_from_settings(storage: &JsonStorage) -> Result<ApiClient> {
    let settings = storage.load_settings();
    ApiClient::new(&settings.api_url)
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "jarvis_chat=debug"
    } else {
        "jarvis_chat=info"
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
