use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use crate::config::{Config, Overrides};
use crate::jenkins::JenkinsClient;
use crate::mcp;

#[derive(Parser)]
#[command(name = "jenkins-mcp")]
#[command(author, version, about = "Read-only Jenkins tools for AI assistants over MCP", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to a jenkins-mcp.{toml,json,yaml} file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Jenkins base URL
    #[arg(long, global = true, env = "JENKINS_URL")]
    url: Option<String>,

    /// Jenkins user name
    #[arg(long, global = true, env = "JENKINS_USER")]
    user: Option<String>,

    /// Jenkins API token
    #[arg(long, global = true, env = "JENKINS_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP tools over stdin/stdout (default)
    Serve,

    /// Check connectivity to Jenkins and print the result as JSON
    Check {
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, default_value_t = false)]
        pretty: bool,
    },
}

impl Cli {
    fn client(&self) -> Result<JenkinsClient> {
        let overrides = Overrides {
            url: self.url.clone(),
            user: self.user.clone(),
            api_token: self.api_token.clone(),
        };

        let config = Config::load(self.config.as_deref())?
            .resolve(overrides)
            .context("Invalid Jenkins configuration")?;
        info!("Using Jenkins at {}", config.base_url);

        JenkinsClient::new(config).context("Failed to initialize Jenkins client")
    }

    async fn execute_check(&self, output: Option<&PathBuf>, pretty: bool) -> Result<()> {
        let health = self
            .client()?
            .health()
            .await
            .context("Jenkins health check failed")?;

        let json_output = if pretty {
            serde_json::to_string_pretty(&health)?
        } else {
            serde_json::to_string(&health)?
        };

        if let Some(output_path) = output {
            std::fs::write(output_path, json_output)?;
            info!("Health report written to: {}", output_path.display());
        } else {
            println!("{}", json_output);
        }

        Ok(())
    }

    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            None | Some(Commands::Serve) => mcp::serve_stdio(self.client()?).await,
            Some(Commands::Check { output, pretty }) => {
                self.execute_check(output.as_ref(), *pretty).await
            }
        }
    }
}
