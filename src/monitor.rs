/// Shared status-query workflow for single and batch handlers
///
/// 1. Load certificate and private key from disk
/// 2. Query Finkok for the RFC
/// 3. Normalize the response and derive alerts
use crate::config::Config;
use crate::credentials::CredentialLoader;
use crate::errors::AppError;
use crate::finkok_client::FinkokClient;
use crate::models::StatusQueryResult;
use crate::normalizer::normalize;
use crate::rfc::Rfc;

#[derive(Clone)]
pub struct SatMonitor {
    credentials: CredentialLoader,
    client: FinkokClient,
}

impl SatMonitor {
    pub fn new(credentials: CredentialLoader, client: FinkokClient) -> Self {
        Self {
            credentials,
            client,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Ok(Self::new(
            CredentialLoader::from_config(config),
            FinkokClient::from_config(config)?,
        ))
    }

    pub fn credentials(&self) -> &CredentialLoader {
        &self.credentials
    }

    /// Runs the full query for one already-validated RFC.
    pub async fn consult(&self, rfc: &Rfc) -> Result<StatusQueryResult, AppError> {
        tracing::info!("Consulting SAT status for RFC {} ({:?})", rfc, rfc.kind());

        let credentials = self.credentials.load().await?;
        let external = self.client.query_status(rfc, &credentials).await?;
        let result = normalize(external, rfc)?;

        tracing::info!(
            "RFC {} processed: {} pending, {} overdue, {} alert(s)",
            rfc,
            result.data.pending,
            result.data.overdue,
            result.alerts.len()
        );

        Ok(result)
    }
}
