//! Comandos del CLI y su ejecución.
//!
//! `run` devuelve el JSON a imprimir; el binario sólo parsea argumentos,
//! configura logging y traduce errores a códigos de salida.
use clap::{Parser, Subcommand};
use log::debug;
use serde::Serialize;
use serde_json::{json, Value};

use crate::checkout::build_coordinator;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::params::request_from_params;
use flow_core::FlowSession;
use flow_persistence::open_storage;

/// Coordinador de wizards multi-paso (demo de checkout).
#[derive(Debug, Parser)]
#[command(name = "stepflow", version, about = "Multi-step flow coordinator")]
pub struct Cli {
    /// Sesión del visitante (por defecto STEPFLOW_SESSION o "default")
    #[arg(long, global = true)]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List registered scenarios and their steps
    Scenarios,
    /// Start a scenario from its first step
    Start { scenario: String },
    /// Display a step (rewinds history when going back)
    Display { scenario: String, step: String },
    /// Submit a step
    Forward {
        scenario: String,
        step: String,
        /// Request parameter as key=value (repeatable)
        #[arg(short = 'p', long = "param")]
        params: Vec<String>,
    },
    /// Redirect to the last step reached in this session
    Resume { scenario: String },
    /// Print the persisted snapshot of this session
    History { scenario: String },
    /// Print a fresh session id
    NewSession,
}

#[derive(Serialize)]
struct ScenarioInfo<'a> {
    alias: &'a str,
    start: String,
    steps: Vec<&'a str>,
    definition_hash: &'a str,
}

pub fn run(cli: Cli, config: AppConfig) -> Result<Value, AppError> {
    let session_id = cli.session.unwrap_or(config.session);
    let coordinator = build_coordinator(&config.storage.route_prefix)?;
    let storage = open_storage(&config.storage)?;
    let session = FlowSession::new(&coordinator, storage.as_ref(), session_id);
    debug!("session '{}' ({:?} storage)", session.session_id(), config.storage.backend);

    let output = match cli.command {
        Commands::Scenarios => {
            let registry = coordinator.scenarios();
            let mut listing = Vec::with_capacity(registry.len());
            for alias in registry.aliases() {
                let process = registry.load(alias)?;
                let scenario = process.scenario();
                let info = ScenarioInfo { alias,
                                          start: coordinator.start_address(&process)?,
                                          steps: scenario.step_names().collect(),
                                          definition_hash: scenario.definition_hash() };
                listing.push(serde_json::to_value(info)?);
            }
            return Ok(Value::Array(listing));
        }
        Commands::Start { scenario } => session.start(&scenario)?,
        Commands::Display { scenario, step } => session.display(&scenario, &step)?,
        Commands::Forward { scenario, step, params } => {
            let request = request_from_params(&params)?;
            session.forward(&scenario, &step, request)?
        }
        Commands::Resume { scenario } => session.resume(&scenario)?,
        Commands::History { scenario } => {
            coordinator.load_scenario(&scenario)?;
            return Ok(serde_json::to_value(session.snapshot(&scenario)?)?);
        }
        Commands::NewSession => return Ok(json!({ "session": uuid::Uuid::new_v4().to_string() })),
    };
    Ok(serde_json::to_value(output)?)
}
