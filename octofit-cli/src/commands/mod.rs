mod config_cmd;
mod dashboard;
mod output;
mod resources;
mod users;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::api::ApiClient;
use crate::config::{AppConfig, Config};
use crate::models::{Activity, LeaderboardEntry, Team, Workout};
use crate::views::DateStyle;

pub use dashboard::DashboardCommand;
pub use users::UsersCommand;

#[derive(Parser)]
#[command(name = "octofit")]
#[command(about = "Terminal dashboard for the OctoFit Tracker API", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base URL of the OctoFit API (overrides the config file)
    #[arg(long, global = true, env = "OCTOFIT_API_URL")]
    api_url: Option<String>,

    /// Path to configuration file
    #[arg(long, global = true, env = "OCTOFIT_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List users, or edit one
    Users(UsersCommand),

    /// List logged activities
    Activities,

    /// List teams and their members
    Teams,

    /// Show the leaderboard
    Leaderboard,

    /// List suggested workouts
    Workouts,

    /// Launch interactive dashboard
    Dashboard(DashboardCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Edit configuration file
    Edit,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Everything a command needs that comes from flags, the config file and
/// the environment. Built once per invocation.
pub struct Context {
    pub config: Config,
    pub app: AppConfig,
    pub dates: DateStyle,
}

impl Context {
    pub fn load(api_url: Option<&str>, config_path: Option<&std::path::Path>) -> Result<Self> {
        let path = Config::resolve_path(config_path)?;
        let config = Config::load_from(&path)?;
        let codespace = std::env::var("CODESPACE_NAME").ok();
        let app = AppConfig::resolve(api_url, &config, codespace.as_deref());
        let dates = DateStyle::new(config.ui.date_format.clone());

        tracing::debug!("Using API at {}", app.api_base_url);

        Ok(Self { config, app, dates })
    }

    pub fn client(&self) -> Result<ApiClient> {
        let timeout = match self.config.api.timeout_seconds {
            0 => ApiClient::DEFAULT_TIMEOUT,
            secs => Duration::from_secs(secs),
        };
        Ok(ApiClient::with_timeout(&self.app, timeout)?)
    }
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let Cli {
            command,
            verbose,
            api_url,
            config,
        } = self;

        if verbose {
            tracing::info!("Verbose mode enabled");
        }

        let context = || Context::load(api_url.as_deref(), config.as_deref());

        match command {
            Commands::Users(cmd) => cmd.execute(&context()?).await,
            Commands::Activities => resources::show::<Activity>(&context()?).await,
            Commands::Teams => resources::show::<Team>(&context()?).await,
            Commands::Leaderboard => resources::show::<LeaderboardEntry>(&context()?).await,
            Commands::Workouts => resources::show::<Workout>(&context()?).await,
            Commands::Dashboard(cmd) => cmd.execute(&context()?).await,
            Commands::Config(subcmd) => {
                let path = Config::resolve_path(config.as_deref())?;
                match subcmd {
                    ConfigSubcommands::Show => config_cmd::show_config(&path).await,
                    ConfigSubcommands::Edit => config_cmd::edit_config(&path).await,
                    ConfigSubcommands::Init { force } => {
                        config_cmd::init_config(&path, force).await
                    }
                }
            }
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_users_edit() {
        let cli = Cli::try_parse_from([
            "octofit",
            "--api-url",
            "http://example.test",
            "users",
            "edit",
            "u1",
            "--team",
            "Blue",
        ])
        .unwrap();

        assert_eq!(cli.api_url.as_deref(), Some("http://example.test"));
        assert!(matches!(cli.command, Commands::Users(_)));
    }

    #[test]
    fn test_context_prefers_flag_over_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[api]\nbase_url = \"http://from-file:9000\"\n\n[ui]\ndate_format = \"%d/%m/%Y\"\n",
        )
        .unwrap();

        let ctx = Context::load(Some("http://flag:1234/"), Some(&path)).unwrap();
        assert_eq!(ctx.app.api_base_url, "http://flag:1234");
        assert_eq!(ctx.dates.format, "%d/%m/%Y");

        let ctx = Context::load(None, Some(&path)).unwrap();
        assert_eq!(ctx.app.api_base_url, "http://from-file:9000");
    }
}
