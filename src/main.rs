use clap::Parser;
use weight_tracker::app::commands;
use weight_tracker::config::{self, TomlConfig};
use weight_tracker::utils::logger;
use weight_tracker::{CliConfig, Command, HttpWeightApi, Result, SessionManager};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 先讀設定檔，日誌等級可能由它決定
    let file = match TomlConfig::load_optional(cli.config.as_deref()) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    let level = file.as_ref().and_then(TomlConfig::log_level);
    if cli.json_logs || file.as_ref().is_some_and(TomlConfig::json_logs) {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli, file).await {
        tracing::error!("❌ Command failed: {} (Category: {:?})", e, e.category());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: CliConfig, file: Option<TomlConfig>) -> Result<()> {
    let mut sessions = SessionManager::new(config::session_store(file.as_ref()));
    sessions.restore().await;

    match cli.command {
        Command::Login { email } => {
            let session = sessions.sign_in(&email).await?;
            println!("✅ Signed in as {}", session.email);
        }
        Command::Logout => {
            sessions.sign_out().await?;
            println!("✅ Signed out");
        }
        Command::Whoami => match sessions.current() {
            Some(session) => println!("{}", session.email),
            None => println!("Not signed in"),
        },
        Command::Exercises => println!("{}", commands::exercises()),
        Command::Plates { format } => println!("{}", commands::plates(format)?),
        Command::Record {
            exercise,
            weight,
            reps,
        } => {
            let api = connect(cli.env.as_deref(), file.as_ref())?;
            let message = commands::record(&api, &sessions, &exercise, &weight, &reps).await?;
            println!("✅ {}", message);
        }
        Command::History { exercise, format } => {
            let api = connect(cli.env.as_deref(), file.as_ref())?;
            let report = commands::history_report(&api, &sessions, &exercise, format).await?;
            println!("{}", report);
        }
        Command::Audio { file: audio_file } => {
            let api = connect(cli.env.as_deref(), file.as_ref())?;
            let ack = commands::audio(&api, &sessions, &audio_file).await?;
            println!("✅ Audio processed");
            println!("{}", serde_json::to_string_pretty(&ack)?);
        }
    }

    Ok(())
}

fn connect(env: Option<&str>, file: Option<&TomlConfig>) -> Result<HttpWeightApi> {
    let settings = config::resolve_settings(env, file)?;
    HttpWeightApi::new(&settings)
}
