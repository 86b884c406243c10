//! Implementation of the `sidebyside init` command.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tokio::fs;

use crate::adapters::sqlite::{initialize_database, PoolConfig};
use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Config, SecurityConfig};
use crate::infrastructure::config::CONFIG_DIR;

const CONFIG_HEADER: &str = "\
# sidebyside configuration
#
# PROVISIONAL SECURITY POSTURE
# Authentication and CSRF protection are switched off below so the service
# can be tried locally. Before exposing it anywhere, set
# security.permit_all to false, set security.csrf_protection to true and
# list the accepted accounts under security.users.
";

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force reinitialization even if already initialized
    #[arg(long, short)]
    pub force: bool,

    /// Target directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, serde::Serialize)]
pub struct InitOutput {
    pub success: bool,
    pub message: String,
    pub initialized_path: PathBuf,
    pub config_written: bool,
    pub database_initialized: bool,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![self.message.clone()];
        if self.config_written {
            lines.push(format!("\nConfiguration written to {CONFIG_DIR}/config.yaml"));
            lines.push("WARNING: the written security posture is for local demos only".to_string());
        }
        if self.database_initialized {
            lines.push(format!("Database initialized at {CONFIG_DIR}/sidebyside.db"));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// The configuration `init` writes: defaults plus the demo posture.
pub fn demo_config() -> Config {
    Config {
        security: SecurityConfig::demo(),
        ..Default::default()
    }
}

/// Render a configuration as the commented YAML file `init` writes.
pub fn render_config(config: &Config) -> Result<String> {
    let body = serde_yaml::to_string(config).context("Failed to serialize configuration")?;
    Ok(format!("{CONFIG_HEADER}\n{body}"))
}

pub async fn execute(args: InitArgs, json_mode: bool) -> Result<()> {
    let target_path = if args.path.is_absolute() {
        args.path.clone()
    } else {
        std::env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.path)
    };

    let config_dir = target_path.join(CONFIG_DIR);

    if config_dir.exists() && !args.force {
        let output_data = InitOutput {
            success: false,
            message: "Project already initialized. Use --force to reinitialize.".to_string(),
            initialized_path: target_path,
            config_written: false,
            database_initialized: false,
        };
        output(&output_data, json_mode);
        return Ok(());
    }

    if args.force && config_dir.exists() {
        fs::remove_dir_all(&config_dir)
            .await
            .with_context(|| format!("Failed to remove existing {}", config_dir.display()))?;
    }

    fs::create_dir_all(&config_dir)
        .await
        .with_context(|| format!("Failed to create {}", config_dir.display()))?;

    let config = demo_config();
    fs::write(config_dir.join("config.yaml"), render_config(&config)?)
        .await
        .context("Failed to write config.yaml")?;

    let db_path = config_dir.join("sidebyside.db");
    let db_url = format!("sqlite:{}", db_path.display());
    let pool = initialize_database(&db_url, PoolConfig::default())
        .await
        .context("Failed to initialize database")?;
    pool.close().await;

    tracing::info!(path = %target_path.display(), "project initialized");

    let output_data = InitOutput {
        success: true,
        message: if args.force {
            "Project reinitialized successfully.".to_string()
        } else {
            "Project initialized successfully.".to_string()
        },
        initialized_path: target_path,
        config_written: true,
        database_initialized: true,
    };

    output(&output_data, json_mode);
    Ok(())
}
