use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use leadform::tracking::Dimensions;

mod cmd;

#[derive(Parser)]
#[command(name = "leadform")]
#[command(version, about = "Landing-page lead form handler")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Webhook URL. Overrides leadform.toml and LEADFORM_WEBHOOK_URL.
    #[arg(long, global = true)]
    pub webhook_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the masked form of a phone number
    Mask {
        /// Phone number as typed
        input: String,
    },
    /// Validate the four form fields
    Validate {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Print the JSON payload that would be submitted, without sending it
    Payload {
        #[command(flatten)]
        form: FormArgs,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Validate, post to the webhook and print the redirect target
    Submit {
        #[command(flatten)]
        form: FormArgs,
        #[command(flatten)]
        page: PageArgs,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

/// Values typed into the form controls.
#[derive(Args, Clone, Debug)]
pub struct FormArgs {
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    /// Phone as typed; the mask is applied before validation
    #[arg(long, default_value = "")]
    pub phone: String,

    /// The privacy-policy checkbox is ticked
    #[arg(long)]
    pub consent: bool,
}

/// Ambient page state normally read from the browser.
#[derive(Args, Clone, Debug)]
pub struct PageArgs {
    /// Full landing-page URL, including its query string
    #[arg(long)]
    pub page_url: String,

    #[arg(long)]
    pub referrer: Option<String>,

    #[arg(long, default_value = "")]
    pub title: String,

    #[arg(long, default_value = concat!("leadform/", env!("CARGO_PKG_VERSION")))]
    pub user_agent: String,

    #[arg(long, default_value = "pt-BR")]
    pub language: String,

    /// Screen size as WIDTHxHEIGHT
    #[arg(long, default_value = "0x0")]
    pub screen: Dimensions,

    /// Viewport size as WIDTHxHEIGHT
    #[arg(long, default_value = "0x0")]
    pub viewport: Dimensions,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default leadform.toml file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    leadform::logging::init(cli.verbose, cli.log_json);

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let config = leadform::config::LeadformConfig::with_cli_args(
        project_dir,
        cli.webhook_url.clone(),
    )?;

    match &cli.command {
        Commands::Mask { input } => cmd::cmd_mask(&config, input),
        Commands::Validate { form } => cmd::cmd_validate(&config, form)?,
        Commands::Payload { form, page } => cmd::cmd_payload(&config, form, page)?,
        Commands::Submit { form, page } => cmd::cmd_submit(&config, form, page).await?,
        Commands::Config { command } => cmd::cmd_config(&config, command.clone())?,
    }

    Ok(())
}
