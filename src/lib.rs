//! stepflow
//!
//! Aplicación de ejemplo sobre `flow-core`:
//! - `checkout`: escenario de checkout (steps + registro en el coordinador).
//! - `cli`: comandos del binario y su ejecución.
//! - `config`: configuración desde entorno.
//! - `errors`: errores del CLI y códigos de salida.
//! - `params`: parseo de `clave=valor` a `FlowRequest`.

pub mod checkout;
pub mod cli;
pub mod config;
pub mod errors;
pub mod params;

pub use flow_core;
pub use flow_persistence;
