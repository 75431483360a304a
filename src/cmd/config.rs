//! Configuration view and validation commands — `leadform config`.

use anyhow::Result;

use leadform::config::LeadformConfig;

use super::super::ConfigCommands;

pub fn cmd_config(config: &LeadformConfig, command: Option<ConfigCommands>) -> Result<()> {
    let config_path = config.config_file();

    match command {
        None | Some(ConfigCommands::Show) => {
            println!("Project directory: {}", config.project_dir.display());
            if config_path.exists() {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No leadform.toml found at {}", config_path.display());
                println!("Using default configuration.");
            }
            println!();

            let toml = &config.toml;
            println!("[webhook]");
            println!("  url = \"{}\"", toml.webhook.url);
            println!("[metadata]");
            println!("  form_id = \"{}\"", toml.metadata.form_id);
            println!("  form_version = \"{}\"", toml.metadata.form_version);
            println!("  source = \"{}\"", toml.metadata.source);
            println!("[redirect]");
            println!("  target = \"{}\"", toml.redirect.target);
            println!("[phone]");
            println!("  country_code = \"{}\"", toml.phone.country_code);
            println!("[delivery]");
            println!("  assume_success = {}", toml.delivery.assume_success);
            println!();

            // Show effective values (including env overrides)
            println!("Effective values (with env/CLI overrides):");
            println!("  webhook_url = \"{}\"", config.webhook_url());
            println!("  redirect = \"{}\"", config.redirect_target());
        }
        Some(ConfigCommands::Validate) => {
            if !config_path.exists() {
                println!("No leadform.toml found. Using defaults.");
            }

            let warnings = config.validate();
            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in &warnings {
                    println!("  - {}", warning);
                }
                anyhow::bail!("{} configuration warning(s)", warnings.len());
            }
        }
        Some(ConfigCommands::Init) => {
            let path = config.init()?;
            println!("Created leadform.toml at {}", path.display());
            println!();
            println!("You can now customize:");
            println!("  - [webhook] url");
            println!("  - [metadata] form_id, form_version, source");
            println!("  - [redirect] target");
            println!("  - [delivery] assume_success");
        }
    }

    Ok(())
}
