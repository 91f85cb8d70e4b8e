use crate::errors::AppError;
use crate::models::{
    BatchItem, BatchQueryResponse, HealthResponse, StatsResponse, StatusQueryResult,
};
use crate::monitor::SatMonitor;
use crate::rfc::Rfc;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

/// Maximum number of RFCs accepted by `/consultar_multiple`.
pub const MAX_BATCH_RFCS: usize = 10;

pub const INVALID_RFC_MESSAGE: &str =
    "RFC inválido. Formato: ABCD123456789 (13 caracteres) o ABC123456789 (12 caracteres)";

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Credential loader and Finkok client, built once at startup.
    pub monitor: SatMonitor,
}

/// GET /
///
/// Health check. Always 200.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "Monitor SAT Backend",
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}

/// POST /consultar_sat
///
/// Validates `{"rfc": "..."}` and returns the normalized Finkok status with
/// derived alerts. Format errors are 400; credential, Finkok or processing
/// failures are 500.
pub async fn consultar_sat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<StatusQueryResult>, AppError> {
    let Json(body) = payload?;

    if is_empty_body(&body) {
        return Err(AppError::BadRequest(
            "Se requiere JSON en el cuerpo de la petición".to_string(),
        ));
    }

    let raw = body
        .get("rfc")
        .and_then(Value::as_str)
        .filter(|rfc| !rfc.is_empty())
        .ok_or_else(|| AppError::BadRequest("Se requiere el campo \"rfc\"".to_string()))?;

    let rfc =
        Rfc::parse(raw).ok_or_else(|| AppError::BadRequest(INVALID_RFC_MESSAGE.to_string()))?;

    tracing::info!("POST /consultar_sat - RFC {}", rfc);

    let result = state.monitor.consult(&rfc).await?;
    Ok(Json(result))
}

/// POST /consultar_multiple
///
/// Queries up to [`MAX_BATCH_RFCS`] RFCs sequentially. Each entry succeeds or
/// fails on its own; the response is 200 whenever the list itself is acceptable.
pub async fn consultar_multiple(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<BatchQueryResponse>, AppError> {
    let Json(body) = payload?;

    let entries = match body.get("rfcs") {
        None => return Err(AppError::BadRequest("Se requiere una lista de RFCs".to_string())),
        Some(Value::Array(entries)) if !entries.is_empty() => entries,
        Some(_) => {
            return Err(AppError::BadRequest(
                "La lista de RFCs no puede estar vacía".to_string(),
            ))
        }
    };

    if entries.len() > MAX_BATCH_RFCS {
        return Err(AppError::BadRequest(format!(
            "Máximo {} RFCs por consulta",
            MAX_BATCH_RFCS
        )));
    }

    tracing::info!("POST /consultar_multiple - {} RFC(s)", entries.len());

    let mut results = Vec::with_capacity(entries.len());

    for entry in entries {
        let item = match entry.as_str().and_then(Rfc::parse) {
            Some(rfc) => match state.monitor.consult(&rfc).await {
                Ok(result) => BatchItem::Success(result),
                Err(e) => {
                    e.log();
                    BatchItem::Failure(e.body())
                }
            },
            None => {
                tracing::debug!("Skipping invalid RFC in batch: {}", entry);
                BatchItem::Failure(json!({ "rfc": entry, "error": "RFC inválido" }))
            }
        };
        results.push(item);
    }

    tracing::info!("Batch query complete: {} result(s)", results.len());

    Ok(Json(BatchQueryResponse {
        total_queried: results.len(),
        results,
        timestamp: Utc::now(),
    }))
}

/// GET /estadisticas
///
/// Dashboard counters. The figures are fixed; only the timestamp changes.
pub async fn estadisticas() -> Json<StatsResponse> {
    Json(StatsResponse {
        consultas_hoy: 150,
        rfcs_activos: 25,
        alertas_criticas: 3,
        uptime: "99.9%",
        ultima_actualizacion: Utc::now(),
    })
}

/// A body that carries nothing to read: `null`, `false`, zero, or an empty
/// string, array or object.
fn is_empty_body(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("Endpoint no encontrado".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_detection() {
        let empty = [
            json!(null),
            json!(false),
            json!(0),
            json!(-0.0),
            json!(""),
            json!([]),
            json!({}),
        ];
        for body in empty {
            assert!(is_empty_body(&body), "{}", body);
        }

        let present = [
            json!(true),
            json!(1),
            json!(0.5),
            json!(" "),
            json!([0]),
            json!({ "rfc": "" }),
        ];
        for body in present {
            assert!(!is_empty_body(&body), "{}", body);
        }
    }
}
