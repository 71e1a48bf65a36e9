//! Moltbot CLI - scheduled posting and comment replies on Moltbook
//!
//! Usage:
//!   moltbot check                     Verify the API key and show the agent
//!   moltbot cycle                     Post once, then answer comments
//!   moltbot run                       Repeat cycles until Ctrl-C
//!   moltbot post [--dry-run]          Publish one random post
//!   moltbot register --name --description [--save]
//!   moltbot init                      Write a template .env and config file

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use molt_client::{check_auth, register_agent, HttpClient};
use molt_core::config::DEFAULT_CONFIG_PATH;
use molt_core::env_file::{save_api_key, write_env_template};
use molt_core::{default_post_templates, ContentPool, MoltConfig, PostDraft};
use molt_engage::{Driver, EngagementCycle};
use std::path::{Path, PathBuf};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

const ENV_FILE: &str = ".env";

#[derive(Parser)]
#[command(name = "moltbot")]
#[command(author, version, about = "Scheduled posting and comment replies for a Moltbook agent")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to .moltbot/config.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the API key is accepted
    Check,

    /// Run one cycle: publish a post, then reply to comments
    Cycle,

    /// Run cycles continuously until interrupted
    Run {
        /// Minutes between cycles (overrides POST_INTERVAL_MINUTES)
        #[arg(long)]
        interval_minutes: Option<u64>,
    },

    /// Publish one random post
    Post {
        /// Print the post instead of publishing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Register a new agent and obtain an API key
    Register {
        /// Agent name
        #[arg(long)]
        name: String,

        /// Agent description
        #[arg(long)]
        description: String,

        /// Store the key in .env
        #[arg(long)]
        save: bool,
    },

    /// Write a template .env and the default config file
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        std::env::var("LOG_LEVEL")
            .ok()
            .and_then(|v| v.parse::<Level>().ok())
            .unwrap_or(Level::INFO)
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Check => cmd_check(config_path).await,
        Commands::Cycle => cmd_cycle(config_path).await,
        Commands::Run { interval_minutes } => cmd_run(config_path, interval_minutes).await,
        Commands::Post { dry_run } => cmd_post(config_path, dry_run).await,
        Commands::Register {
            name,
            description,
            save,
        } => cmd_register(config_path, name, description, save).await,
        Commands::Init { force } => cmd_init(force),
    }
}

fn load_config(config_path: Option<&Path>) -> Result<MoltConfig> {
    MoltConfig::load(config_path).context("Failed to load configuration")
}

fn build_cycle(config: &MoltConfig) -> Result<EngagementCycle<HttpClient>> {
    let client = HttpClient::from_config(config).context("Failed to create API client")?;
    EngagementCycle::from_config(client, config).context("Invalid bot configuration")
}

async fn cmd_check(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let client = HttpClient::from_config(&config).context("Failed to create API client")?;

    let identity = check_auth(&client)
        .await
        .context("Authentication failed")?;

    println!("Authenticated as {}", identity);
    println!("API: {}", client.base_url());
    Ok(())
}

async fn cmd_cycle(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let cycle = build_cycle(&config)?;

    let report = cycle.run_cycle().await;
    println!("{}", report.summary());
    Ok(())
}

async fn cmd_run(config_path: Option<&Path>, interval_minutes: Option<u64>) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(minutes) = interval_minutes {
        config.post_interval_minutes = minutes;
        config.validate().context("Invalid --interval-minutes")?;
    }
    let cycle = build_cycle(&config)?;
    let mut driver = Driver::new(cycle, &config);

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl-C, shutting down");
    };

    driver
        .run_continuous(shutdown)
        .await
        .context("Continuous run aborted")?;
    Ok(())
}

async fn cmd_post(config_path: Option<&Path>, dry_run: bool) -> Result<()> {
    let config = load_config(config_path)?;

    if dry_run {
        let pool = ContentPool::new(
            config
                .post_templates
                .clone()
                .unwrap_or_else(default_post_templates),
        )
        .context("Invalid post_templates")?;
        let draft = PostDraft::new(config.submolt.clone(), pool.pick().as_str());
        println!("{}", serde_json::to_string_pretty(&draft)?);
        return Ok(());
    }

    let cycle = build_cycle(&config)?;
    match cycle.publish_new_post().await.context("Failed to publish post")? {
        Some(id) => println!("Published post {}", id),
        None => println!("Published post"),
    }
    Ok(())
}

async fn cmd_register(
    config_path: Option<&Path>,
    name: String,
    description: String,
    save: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let client = HttpClient::new(&config.base_url, None).context("Failed to create API client")?;

    let registration = register_agent(&client, &name, &description)
        .await
        .context("Registration failed")?;

    println!("Registered agent {}", name);
    if let Some(url) = &registration.claim_url {
        println!("Claim URL: {}", url);
    }
    if let Some(code) = &registration.verification_code {
        println!("Verification code: {}", code);
    }

    if save {
        save_api_key(Path::new(ENV_FILE), &registration.api_key)
            .with_context(|| format!("Failed to write {}", ENV_FILE))?;
        println!("API key saved to {}", ENV_FILE);
    } else {
        println!("API key: {}", registration.api_key);
        println!("Add it to {} as MOLTBOOK_API_KEY, or re-run with --save", ENV_FILE);
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let root = Path::new(".");

    if write_env_template(Path::new(ENV_FILE), force)
        .with_context(|| format!("Failed to write {}", ENV_FILE))?
    {
        println!("Created {}", ENV_FILE);
    } else {
        println!("{} already exists (use --force to overwrite)", ENV_FILE);
    }

    if root.join(DEFAULT_CONFIG_PATH).exists() && !force {
        println!("{} already exists (use --force to overwrite)", DEFAULT_CONFIG_PATH);
    } else {
        let path = MoltConfig::write_default(root).context("Failed to write config file")?;
        println!("Created {}", path.display());
    }

    println!("\nNext steps:");
    println!("  1. Set MOLTBOOK_USERNAME and MOLTBOOK_API_KEY in {}", ENV_FILE);
    println!("  2. Run 'moltbot check' to verify the key");
    println!("  3. Run 'moltbot run' to start posting");
    Ok(())
}
