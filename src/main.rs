use clap::{Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

mod domain;
mod application;
mod infrastructure;
mod plugins;

use application::errors::BotError;
use application::messaging::{AuthorizationResolver, MessageDispatcher, MessageParser, PrefixMatcher};
use application::services::MessageService;
use domain::traits::SettingsStore;
use infrastructure::adapters::console::ConsoleAdapter;
use infrastructure::config::Config;
use infrastructure::plugins::{PluginLoader, PluginRegistry};
use infrastructure::storage::{JsonSettingsStore, MemoryStore};
use plugins::{HandlerCatalog, Mode};

#[derive(Parser)]
#[command(name = "plume-bot")]
#[command(about = "A plugin-driven chat bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Command prefix characters (overrides config)
    #[arg(short, long)]
    prefix: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot on the console adapter
    Run,
    /// Load plugins and list the registry
    Plugins,
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
        Commands::Run => load_config(&cli.config, cli.prefix).and_then(run_bot),
        Commands::Plugins => load_config(&cli.config, cli.prefix).and_then(|c| list_plugins(&c)),
        Commands::Version => {
            println!("plume-bot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(&cli.config),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(config_path: &str, prefix_override: Option<String>) -> Result<Config, BotError> {
    let mut config = if Path::new(config_path).exists() {
        Config::load(config_path)?
    } else {
        tracing::info!("No config at {}, using defaults and environment", config_path);
        Config::load_env()
    };

    if let Some(prefix) = prefix_override {
        config.bot.prefix = prefix;
    }
    config.validate()?;
    Ok(config)
}

fn load_registry(config: &Config, catalog: &HandlerCatalog) -> Result<PluginRegistry, BotError> {
    if !config.plugins.auto_load {
        tracing::info!("Plugin auto-load disabled, using built-in commands");
        return Ok(plugins::builtin::default_registry());
    }
    Ok(PluginLoader::new(&config.plugins.directory, catalog).load_all()?)
}

fn build_dispatcher(config: &Config) -> Result<MessageDispatcher, BotError> {
    let catalog = HandlerCatalog::with_builtins();
    let registry = load_registry(config, &catalog)?;

    let parser = MessageParser::new(PrefixMatcher::from_chars(&config.bot.prefix)?);
    let resolver = AuthorizationResolver::new(config.bot.owners.clone(), config.bot.identity_suffix.clone())
        .with_unlisted(config.authorization.unlisted_participant);

    let mut dispatcher = MessageDispatcher::new(Arc::new(registry), parser, resolver);
    if let Some(id) = &config.plugins.fallback {
        match catalog.fallback(id) {
            Some(fallback) => dispatcher = dispatcher.with_fallback(fallback),
            None => tracing::warn!("Unknown fallback handler: {}", id),
        }
    }
    Ok(dispatcher)
}

fn run_bot(config: Config) -> Result<(), BotError> {
    tracing::info!("Starting {}", config.bot.name);

    let dispatcher = build_dispatcher(&config)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start runtime: {}", e)))?;

    rt.block_on(async {
        let settings = Arc::new(JsonSettingsStore::open(&config.storage.path).await?);
        let flusher = settings.spawn_flush_task(Duration::from_secs(config.storage.flush_interval_secs));

        let service = Arc::new(MessageService::new(
            Arc::new(dispatcher),
            settings.clone(),
            Arc::new(MemoryStore::with_limit(config.storage.history_limit)),
        ));

        let adapter = ConsoleAdapter::new(config.adapters.console.clone());
        let result = adapter.run(service).await;

        flusher.abort();
        settings.flush().await?;
        result
    })
}

fn list_plugins(config: &Config) -> Result<(), BotError> {
    let dispatcher = build_dispatcher(config)?;
    let registry = dispatcher.registry();

    println!("Commands ({}):", registry.command_count());
    if registry.commands().is_empty() {
        println!("  (none)");
    }
    for (key, command) in registry.commands().iter() {
        let mode = match command.mode() {
            Mode::Command => "command",
            Mode::NoPrefixTrigger => "no-prefix",
            Mode::EventHandler => "event",
        };
        println!(
            "  {:<16} {:<10} -> {}  {}",
            key,
            mode,
            command.name,
            command.description.as_deref().unwrap_or("")
        );
    }

    println!("Event handlers ({}):", registry.event_count());
    for event in registry.events() {
        println!("  {}", event.label);
    }
    Ok(())
}

fn init_config(path: &str) -> Result<(), BotError> {
    if Path::new(path).exists() {
        return Err(BotError::Internal(format!("{} already exists", path)));
    }
    let yaml = Config::default().to_yaml()?;
    std::fs::write(path, yaml).map_err(application::errors::ConfigError::from)?;
    println!("Wrote default config to {}", path);
    Ok(())
}
