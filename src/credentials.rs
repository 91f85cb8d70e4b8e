use crate::config::Config;
use crate::errors::AppError;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::path::{Path, PathBuf};

/// Certificate and private key, base64-encoded for the Finkok payload.
///
/// Lives for a single query only.
#[derive(Clone)]
pub struct Credentials {
    pub certificate: String,
    pub private_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("certificate", &format_args!("[{} bytes]", self.certificate.len()))
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Reads the CSD certificate and private key from disk.
///
/// Files are read on every call, so replacing them on disk takes effect on
/// the next query without a restart.
#[derive(Debug, Clone)]
pub struct CredentialLoader {
    cert_path: PathBuf,
    key_path: PathBuf,
}

impl CredentialLoader {
    pub fn new(cert_path: impl Into<PathBuf>, key_path: impl Into<PathBuf>) -> Self {
        Self {
            cert_path: cert_path.into(),
            key_path: key_path.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cert_path.clone(), config.key_path.clone())
    }

    pub async fn load(&self) -> Result<Credentials, AppError> {
        let certificate = read_base64(&self.cert_path).await?;
        let private_key = read_base64(&self.key_path).await?;

        Ok(Credentials {
            certificate,
            private_key,
        })
    }

    /// Creates the directory holding the certificate if it does not exist yet.
    pub async fn ensure_directory(&self) -> std::io::Result<()> {
        match self.cert_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => tokio::fs::create_dir_all(dir).await,
            _ => Ok(()),
        }
    }
}

async fn read_base64(path: &Path) -> Result<String, AppError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::CredentialError(format!("Credential file not found: {}", path.display()))
        } else {
            AppError::CredentialError(format!("Failed to read {}: {}", path.display(), e))
        }
    })?;

    Ok(STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_encodes_both_files() {
        let cert = temp_file(b"certificate-bytes");
        let key = temp_file(b"key-bytes");

        let loader = CredentialLoader::new(cert.path(), key.path());
        let credentials = loader.load().await.unwrap();

        assert_eq!(credentials.certificate, STANDARD.encode(b"certificate-bytes"));
        assert_eq!(credentials.private_key, STANDARD.encode(b"key-bytes"));
    }

    #[tokio::test]
    async fn test_missing_key_fails() {
        let cert = temp_file(b"certificate-bytes");
        let dir = tempfile::tempdir().unwrap();

        let loader = CredentialLoader::new(cert.path(), dir.path().join("missing.key"));
        let result = loader.load().await;

        assert!(matches!(result, Err(AppError::CredentialError(_))));
    }

    #[tokio::test]
    async fn test_files_are_reread_on_each_load() {
        let cert = temp_file(b"first");
        let key = temp_file(b"key");
        let loader = CredentialLoader::new(cert.path(), key.path());

        let first = loader.load().await.unwrap();
        std::fs::write(cert.path(), b"second").unwrap();
        let second = loader.load().await.unwrap();

        assert_eq!(first.certificate, STANDARD.encode(b"first"));
        assert_eq!(second.certificate, STANDARD.encode(b"second"));
    }

    #[tokio::test]
    async fn test_ensure_directory_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let cert_dir = dir.path().join("certificados");
        let loader = CredentialLoader::new(cert_dir.join("cert.cer"), cert_dir.join("key.key"));

        loader.ensure_directory().await.unwrap();

        assert!(cert_dir.is_dir());
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let credentials = Credentials {
            certificate: "Y2VydA==".to_string(),
            private_key: "c2VjcmV0".to_string(),
        };
        let rendered = format!("{:?}", credentials);
        assert!(!rendered.contains("c2VjcmV0"));
    }
}
