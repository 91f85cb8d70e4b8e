use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::rfc::Rfc;

// ============ Status Query ============

/// Invoice counters reported by Finkok for one taxpayer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusData {
    /// Invoices pending processing.
    #[serde(rename = "pendientes")]
    pub pending: i64,
    /// Overdue invoices.
    #[serde(rename = "vencidas")]
    pub overdue: i64,
    /// Invoices with discrepancies.
    #[serde(rename = "discrepancias")]
    pub discrepancies: i64,
    #[serde(rename = "total_facturas")]
    pub total_invoices: i64,
    #[serde(rename = "monto_total")]
    pub total_amount: f64,
}

/// Severity of a derived alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Critical,
    Warning,
    Notice,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    #[serde(rename = "tipo")]
    pub kind: AlertKind,
    #[serde(rename = "mensaje")]
    pub message: String,
}

/// Normalized answer for a single RFC.
#[derive(Debug, Clone, Serialize)]
pub struct StatusQueryResult {
    pub rfc: Rfc,
    pub timestamp: DateTime<Utc>,
    pub status: &'static str,
    #[serde(rename = "datos")]
    pub data: StatusData,
    #[serde(rename = "alertas")]
    pub alerts: Vec<Alert>,
}

// ============ Batch Query ============

/// Outcome of one RFC inside a batch query.
///
/// Failures carry the same body a single query would have returned.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchItem {
    Success(StatusQueryResult),
    Failure(serde_json::Value),
}

#[derive(Debug, Serialize)]
pub struct BatchQueryResponse {
    /// One entry per requested RFC, in request order.
    #[serde(rename = "resultados")]
    pub results: Vec<BatchItem>,
    #[serde(rename = "total_consultados")]
    pub total_queried: usize,
    pub timestamp: DateTime<Utc>,
}

// ============ Service Info ============

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate counters shown on the dashboard. The values are fixed.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub consultas_hoy: u32,
    pub rfcs_activos: u32,
    pub alertas_criticas: u32,
    pub uptime: &'static str,
    pub ultima_actualizacion: DateTime<Utc>,
}
