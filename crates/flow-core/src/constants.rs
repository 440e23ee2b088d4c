//! Constantes del coordinador.
//!
//! Nombres de rutas y parámetros que el `Coordinator` entrega al generador de
//! direcciones. Las rutas por defecto las registra
//! `PathRouter::with_flow_routes`.

/// Ruta de display por defecto (recibe `scenarioAlias` y `stepName`).
pub const DISPLAY_ROUTE: &str = "flow_display";
/// Ruta de forward (envío del step) con los mismos parámetros que display.
pub const FORWARD_ROUTE: &str = "flow_forward";
/// Ruta de inicio de un escenario (sólo `scenarioAlias`).
pub const START_ROUTE: &str = "flow_start";
/// Destino de finalización cuando el escenario no declara `redirect`.
pub const COMPLETED_ROUTE: &str = "flow_completed";

pub const PARAM_SCENARIO_ALIAS: &str = "scenarioAlias";
pub const PARAM_STEP_NAME: &str = "stepName";

/// Versión del formato de `FlowSnapshot`. Entra en el fingerprint de la
/// definición: un cambio invalida los snapshots persistidos.
pub const SNAPSHOT_VERSION: &str = "S1.0";
