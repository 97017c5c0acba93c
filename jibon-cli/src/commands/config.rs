use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::{ConfigLoader, JibonConfig};

const MASK: &str = "********";

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (merged, password masked)
    Show,
    /// Show configuration file paths
    Path,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    match args.command.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => show_config(),
        ConfigCommands::Path => show_paths(),
    }
}

fn show_config() -> Result<()> {
    let config = ConfigLoader::load()?;
    println!("{}", render(config)?);
    Ok(())
}

/// TOML for display, never containing the admin password
fn render(mut config: JibonConfig) -> Result<String> {
    config.admin.password = MASK.to_string();
    Ok(toml::to_string_pretty(&config)?)
}

fn show_paths() -> Result<()> {
    println!("User config:    {:?}", ConfigLoader::user_config_path());
    println!("Project config: {:?}", ConfigLoader::project_config_path());
    println!("History:        {:?}", jibon_paths::history_path());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_masks_password() {
        let mut config = JibonConfig::default();
        config.admin.password = "hunter2".to_string();

        let rendered = render(config).unwrap();

        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains(MASK));
        assert!(rendered.contains("[server]"));
        assert!(rendered.contains("port = 3000"));
        assert!(rendered.contains("recording = \"best_effort\""));
    }
}
