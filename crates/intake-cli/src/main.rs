use anyhow::Context;
use clap::{Parser, Subcommand};
use intake_core::config::parse_date_override;
use intake_core::constants::TODAY_ENV_VAR;
use intake_core::{
    age_on, clock_from_env_value, compute_bmi, parse_action_log, parse_birth_date, FixedClock,
    FormAction, FormStore, IntakeConfig,
};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Patient intake form store CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded action log and print the final form state as JSON
    Replay {
        /// Path to a JSON array of actions
        file: String,
        /// Date to treat as today (YYYY-MM-DD), overrides INTAKE_TODAY
        #[arg(long)]
        today: Option<String>,
    },
    /// Compute body-mass index
    Bmi {
        /// Weight in kilograms
        weight: String,
        /// Height in centimetres
        height: String,
    },
    /// Compute age in whole years
    Age {
        /// Date of birth (YYYY-MM-DD)
        birth_date: String,
        /// Evaluation date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        on: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("intake=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Replay { file, today }) => {
            let config = resolve_config(today)?;
            let actions = load_actions(Path::new(&file))?;
            let store = replay(config, actions);
            println!("{}", store.state().to_json_pretty()?);
        }
        Some(Commands::Bmi { weight, height }) => {
            println!("{:.1}", compute_bmi(&weight, &height));
        }
        Some(Commands::Age { birth_date, on }) => {
            let config = resolve_config(on)?;
            let birth = parse_birth_date(&birth_date)?;
            println!("{}", age_on(birth, config.today())?);
        }
        None => {
            println!("Use 'intake --help' for commands");
        }
    }

    Ok(())
}

/// Build the session config from an explicit date, falling back to `INTAKE_TODAY`.
fn resolve_config(explicit_today: Option<String>) -> anyhow::Result<IntakeConfig> {
    if let Some(value) = explicit_today {
        let today = parse_date_override(&value)?;
        return Ok(IntakeConfig::new(Arc::new(FixedClock(today))));
    }

    let clock = clock_from_env_value(std::env::var(TODAY_ENV_VAR).ok())
        .with_context(|| format!("invalid {TODAY_ENV_VAR}"))?;
    Ok(IntakeConfig::new(clock))
}

fn load_actions(path: &Path) -> anyhow::Result<Vec<FormAction>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read action log {}", path.display()))?;
    let actions = parse_action_log(&text)
        .with_context(|| format!("failed to parse action log {}", path.display()))?;
    tracing::info!("loaded {} actions from {}", actions.len(), path.display());
    Ok(actions)
}

fn replay(config: IntakeConfig, actions: Vec<FormAction>) -> FormStore {
    let mut store = FormStore::new(config);
    let changed = store.replay(actions);
    tracing::info!(session = %store.session_id(), changed, "replay finished");
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn replays_action_log_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[
                {{ "type": "UPDATE_VITALS", "payload": {{ "weight": "70", "height": "175" }} }},
                {{ "type": "CALCULATE_BMI" }},
                {{ "type": "SET_STEP", "payload": 2 }},
                {{ "type": "SET_STEP", "payload": 5 }}
            ]"#
        )
        .expect("write log");

        let actions = load_actions(file.path()).expect("load actions");
        let config = resolve_config(Some("2024-01-10".into())).expect("config");
        let store = replay(config, actions);

        assert_eq!(store.state().vitals.bmi, 22.9);
        assert_eq!(store.state().current_step.get(), 2);
        assert_eq!(store.state().referral.consultation_date, "2024-01-10");
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.json");
        let err = load_actions(&path).expect_err("file does not exist");
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn explicit_today_must_be_iso_date() {
        assert!(resolve_config(Some("01/10/2024".into())).is_err());
    }
}
