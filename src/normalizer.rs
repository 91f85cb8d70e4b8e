/// Reshapes Finkok status payloads into `StatusQueryResult`.
///
/// Absent counters default to zero. Alerts are derived from three of them:
/// overdue invoices (critical), more than ten pending invoices (warning) and
/// discrepancies (notice), always in that order.
use crate::errors::AppError;
use crate::models::{Alert, AlertKind, StatusData, StatusQueryResult};
use crate::rfc::Rfc;
use chrono::Utc;
use serde_json::{Map, Value};

/// Pending invoices above this count raise a warning.
pub const PENDING_WARNING_THRESHOLD: i64 = 10;

pub fn normalize(external: Value, rfc: &Rfc) -> Result<StatusQueryResult, AppError> {
    let fields = match external {
        Value::Object(fields) => fields,
        other => {
            return Err(AppError::ProcessingError(format!(
                "Error procesando datos: expected a JSON object, got {}",
                type_name(&other)
            )))
        }
    };

    if fields.contains_key("error") {
        return Err(AppError::UpstreamRejected(Value::Object(fields)));
    }

    let data = extract_status_data(&fields)?;
    let alerts = derive_alerts(&data);

    Ok(StatusQueryResult {
        rfc: rfc.clone(),
        timestamp: Utc::now(),
        status: "success",
        data,
        alerts,
    })
}

pub fn extract_status_data(fields: &Map<String, Value>) -> Result<StatusData, AppError> {
    Ok(StatusData {
        pending: count_field(fields, "pendientes")?,
        overdue: count_field(fields, "vencidas")?,
        discrepancies: count_field(fields, "discrepancias")?,
        total_invoices: count_field(fields, "total_facturas")?,
        total_amount: amount_field(fields, "monto_total")?,
    })
}

pub fn derive_alerts(data: &StatusData) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if data.overdue > 0 {
        alerts.push(Alert {
            kind: AlertKind::Critical,
            message: format!(
                "You have {} overdue invoices requiring immediate attention.",
                data.overdue
            ),
        });
    }

    if data.pending > PENDING_WARNING_THRESHOLD {
        alerts.push(Alert {
            kind: AlertKind::Warning,
            message: format!("You have {} invoices pending processing.", data.pending),
        });
    }

    if data.discrepancies > 0 {
        alerts.push(Alert {
            kind: AlertKind::Notice,
            message: format!(
                "{} discrepancies were found in your invoices.",
                data.discrepancies
            ),
        });
    }

    alerts
}

/// Integer-like field: JSON integer, integral float or numeric string.
///
/// Values outside the `i64` range are rejected rather than clamped.
fn count_field(fields: &Map<String, Value>, name: &str) -> Result<i64, AppError> {
    let parsed = match fields.get(name) {
        None | Some(Value::Null) => return Ok(0),
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(integral_i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    parsed.ok_or_else(|| non_numeric(name, fields.get(name)))
}

fn integral_i64(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

fn amount_field(fields: &Map<String, Value>, name: &str) -> Result<f64, AppError> {
    let parsed = match fields.get(name) {
        None | Some(Value::Null) => return Ok(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Some(_) => None,
    };

    parsed.ok_or_else(|| non_numeric(name, fields.get(name)))
}

fn non_numeric(name: &str, value: Option<&Value>) -> AppError {
    AppError::ProcessingError(format!(
        "Error procesando datos: field '{}' is not numeric ({})",
        name,
        value.map(type_name).unwrap_or("missing")
    ))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
