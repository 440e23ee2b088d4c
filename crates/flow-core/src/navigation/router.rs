use std::collections::{BTreeMap, HashMap};

use crate::constants::{COMPLETED_ROUTE, DISPLAY_ROUTE, FORWARD_ROUTE, PARAM_SCENARIO_ALIAS, PARAM_STEP_NAME,
                       START_ROUTE};
use crate::errors::CoreFlowError;

pub type RouteParams = BTreeMap<String, String>;

/// Genera direcciones navegables a partir de una ruta con nombre.
pub trait RouteGenerator: Send + Sync {
    fn generate(&self, route: &str, params: &RouteParams) -> Result<String, CoreFlowError>;
}

/// Router de plantillas `/{placeholder}`.
///
/// Cada `{param}` del patrón se sustituye por el valor url-encoded; los
/// parámetros sobrantes se agregan como query string (orden alfabético).
#[derive(Debug, Clone, Default)]
pub struct PathRouter {
    routes: HashMap<String, String>,
}

impl PathRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Router con las rutas del coordinador montadas bajo `prefix`.
    pub fn with_flow_routes(prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('/');
        Self::new().route(START_ROUTE, format!("{prefix}/{{{PARAM_SCENARIO_ALIAS}}}/start"))
                   .route(DISPLAY_ROUTE,
                          format!("{prefix}/{{{PARAM_SCENARIO_ALIAS}}}/{{{PARAM_STEP_NAME}}}"))
                   .route(FORWARD_ROUTE,
                          format!("{prefix}/{{{PARAM_SCENARIO_ALIAS}}}/{{{PARAM_STEP_NAME}}}/forward"))
                   .route(COMPLETED_ROUTE, format!("{prefix}/{{{PARAM_SCENARIO_ALIAS}}}/completed"))
    }

    pub fn route(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.routes.insert(name.into(), pattern.into());
        self
    }
}

impl RouteGenerator for PathRouter {
    fn generate(&self, route: &str, params: &RouteParams) -> Result<String, CoreFlowError> {
        let pattern = self.routes
                          .get(route)
                          .ok_or_else(|| CoreFlowError::UnknownRoute(route.to_string()))?;
        let mut url = String::with_capacity(pattern.len());
        let mut used: Vec<&str> = Vec::new();
        let mut rest = pattern.as_str();
        while let Some(open) = rest.find('{') {
            url.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find('}')
                             .ok_or_else(|| CoreFlowError::UnknownRoute(format!("{route} (malformed pattern)")))?;
            let name = &after[..close];
            let value = params.get(name)
                              .ok_or_else(|| CoreFlowError::MissingRouteParameter { route: route.to_string(),
                                                                                    param: name.to_string() })?;
            url.push_str(&urlencoding::encode(value));
            used.push(name);
            rest = &after[close + 1..];
        }
        url.push_str(rest);

        let query: Vec<String> = params.iter()
                                       .filter(|(k, _)| !used.contains(&k.as_str()))
                                       .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                                       .collect();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }
        Ok(url)
    }
}
