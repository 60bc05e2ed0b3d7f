use crate::core::render::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "weight-tracker")]
#[command(about = "Record weightlifting results and browse your history")]
pub struct CliConfig {
    /// Deployment environment (development or production)
    #[arg(long, global = true)]
    pub env: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Store the signed-in identity
    Login { email: String },

    /// Forget the signed-in identity
    Logout,

    /// Show the signed-in identity
    Whoami,

    /// Record a new result
    Record {
        #[arg(short, long)]
        exercise: String,

        /// Total plate weight in pounds, bar excluded
        #[arg(short, long)]
        weight: String,

        #[arg(short, long, default_value = "1")]
        reps: String,
    },

    /// Show recorded results for one exercise, newest first
    History {
        #[arg(short, long)]
        exercise: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Upload a voice memo for server-side processing
    Audio {
        file: PathBuf,
    },

    /// Print the plate-loading reference table
    Plates {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List the exercises that can be recorded
    Exercises,
}
