mod config_cmd;
mod dashboard;
mod exercise_parser;
mod goals;
mod meal;
mod profile;
mod reminders;
mod stats;
mod workout;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use fittrack::services::AnalyticsService;

use crate::config::Config;
use crate::storage::JsonFileStore;

pub use dashboard::DashboardCommand;
pub use exercise_parser::parse_exercise;
pub use goals::GoalsCommand;
pub use reminders::RemindersCommand;
pub use stats::StatsCommand;

#[derive(Parser)]
#[command(name = "fittrack")]
#[command(about = "Workout and nutrition log with daily analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "FITTRACK_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan, log and complete workouts
    #[command(subcommand)]
    Workout(WorkoutSubcommands),

    /// Log and review meals
    #[command(subcommand)]
    Meal(MealSubcommands),

    /// Show or edit your profile
    #[command(subcommand)]
    Profile(ProfileSubcommands),

    /// Show calorie and workout totals over a window of days
    Stats(StatsCommand),

    /// Show progress against today's nutrition goals
    Goals(GoalsCommand),

    /// Show or dismiss active reminders
    Reminders(RemindersCommand),

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
enum WorkoutSubcommands {
    /// Plan a workout
    Create {
        /// Workout name
        #[arg(short, long)]
        name: String,

        /// Exercise as NAME:CATEGORY:SETSxREPS, e.g. "Plank:Core:3x45s"
        #[arg(short, long = "exercise", value_name = "EXERCISE")]
        exercises: Vec<String>,

        /// Planned length in minutes
        #[arg(short, long, default_value_t = 0)]
        duration: u32,

        /// Scheduled date (YYYY-MM-DD), defaults to now
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Log a finished workout with the default exercise set
    Quick {
        /// Workout name
        name: String,

        /// Length in minutes
        #[arg(short, long, default_value_t = fittrack::models::QUICK_LOG_MINUTES)]
        duration: u32,
    },

    /// List workouts, newest first
    List {
        /// Only show workouts not yet completed
        #[arg(long)]
        pending: bool,

        /// Number of workouts to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Mark a workout as completed now
    Complete {
        /// Workout ID
        id: String,
    },

    /// Delete a workout
    Delete {
        /// Workout ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum MealSubcommands {
    /// Log a meal
    Log(meal::LogMealArgs),

    /// List meals for a day
    List {
        /// Day to list (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Delete a meal entry
    Delete {
        /// Entry ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ProfileSubcommands {
    /// Show profile, BMI and derived goals
    Show,

    /// Update profile fields
    Set(profile::SetProfileArgs),
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Loaded configuration plus the stores and services commands run against
pub struct AppContext {
    pub config: Config,
    pub owner_id: String,
    pub records: Arc<JsonFileStore>,
    pub analytics: AnalyticsService,
}

impl AppContext {
    pub async fn open(config: Config) -> Result<Self> {
        let records = Arc::new(JsonFileStore::open(Config::data_dir()?).await?);
        let zone = config.bucket_zone()?;

        Ok(Self {
            owner_id: config.profile.owner_id.clone(),
            analytics: AnalyticsService::new(records.clone(), records.clone(), zone),
            records,
            config,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.analytics.today(Utc::now())
    }

    /// Render a stored timestamp in the configured zone and date format
    pub fn format_date(&self, at: DateTime<Utc>) -> String {
        self.config
            .format_day(at.with_timezone(&self.analytics.zone()).date_naive())
    }
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::info!("Verbose mode enabled");
        }

        let config_path = match self.config {
            Some(path) => path,
            None => Config::config_file()?,
        };

        // Commands that do not need the record store
        match self.command {
            Commands::Config(subcmd) => {
                return match subcmd {
                    ConfigSubcommands::Show => config_cmd::show_config(&config_path),
                    ConfigSubcommands::Init { force } => {
                        config_cmd::init_config(&config_path, force)
                    }
                };
            }
            Commands::Completions { shell } => {
                generate_completions(shell);
                return Ok(());
            }
            _ => {}
        }

        let ctx = AppContext::open(Config::load_from(&config_path)?).await?;

        match self.command {
            Commands::Workout(subcmd) => match subcmd {
                WorkoutSubcommands::Create {
                    name,
                    exercises,
                    duration,
                    date,
                } => workout::create_workout(&ctx, &name, &exercises, duration, date).await,
                WorkoutSubcommands::Quick { name, duration } => {
                    workout::quick_log(&ctx, &name, duration).await
                }
                WorkoutSubcommands::List { pending, limit } => {
                    workout::list_workouts(&ctx, pending, limit).await
                }
                WorkoutSubcommands::Complete { id } => workout::complete_workout(&ctx, &id).await,
                WorkoutSubcommands::Delete { id, force } => {
                    workout::delete_workout(&ctx, &id, force).await
                }
            },
            Commands::Meal(subcmd) => match subcmd {
                MealSubcommands::Log(args) => meal::log_meal(&ctx, args).await,
                MealSubcommands::List { date } => meal::list_meals(&ctx, date).await,
                MealSubcommands::Delete { id, force } => meal::delete_meal(&ctx, &id, force).await,
            },
            Commands::Profile(subcmd) => match subcmd {
                ProfileSubcommands::Show => profile::show_profile(&ctx).await,
                ProfileSubcommands::Set(args) => profile::set_profile(&ctx, args).await,
            },
            Commands::Stats(cmd) => cmd.execute(&ctx).await,
            Commands::Goals(cmd) => cmd.execute(&ctx).await,
            Commands::Reminders(cmd) => cmd.execute(&ctx).await,
            Commands::Dashboard(cmd) => cmd.execute(&ctx).await,
            Commands::Config(_) | Commands::Completions { .. } => Ok(()),
        }
    }
}

/// Ask before destroying a record unless `force` is set
fn confirm(prompt: &str, force: bool) -> Result<bool> {
    if force {
        return Ok(true);
    }
    Ok(dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

/// Fixed-width text progress bar for a 0..=1 ratio
fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
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

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0, 4), "░░░░");
        assert_eq!(progress_bar(0.5, 4), "██░░");
        assert_eq!(progress_bar(3.0, 4), "████");
    }

    #[test]
    fn test_confirm_is_skipped_when_forced() {
        assert!(confirm("Delete?", true).unwrap());
    }
}
