//! Parseo de parámetros `clave=valor` del CLI.
//!
//! El valor se interpreta como JSON si es válido (`qty=2`, `gift=true`); si
//! no, como string.
use flow_core::FlowRequest;
use serde_json::Value;

use crate::errors::AppError;

pub fn parse_param(raw: &str) -> Result<(String, Value), AppError> {
    let (key, value) = raw.split_once('=')
                          .ok_or_else(|| AppError::InvalidParam(raw.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(AppError::InvalidParam(raw.to_string()));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

pub fn request_from_params<I, S>(params: I) -> Result<FlowRequest, AppError>
    where I: IntoIterator<Item = S>,
          S: AsRef<str>
{
    params.into_iter().try_fold(FlowRequest::new(), |req, raw| {
                          let (k, v) = parse_param(raw.as_ref())?;
                          Ok(req.with_param(k, v))
                      })
}
