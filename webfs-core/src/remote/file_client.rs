//! src/remote/file_client.rs
//! ============================================================================
//! # FileClient: Remote File-Operation Protocol
//!
//! List, download, and delete against the `/api/file` endpoint, built on
//! [`RequestClient`]. The [`FileOps`] trait is the seam the navigation layer
//! depends on; tests substitute a scripted implementation.
//!
//! Outcome mapping for delete, in order: HTTP 401 is an authorization
//! failure before any body parsing; a non-success envelope code is a
//! rejection carrying the raw body; code 10 is success. Callers re-list the
//! containing directory afterwards whatever the outcome.

use std::future::Future;

use reqwest::Url;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::AppError;
use crate::net::envelope::{self, ApiOutcome};
use crate::net::request::{RequestBody, RequestClient, RequestResult};
use crate::remote::entry::FileEntry;

const OP_LIST: &str = "list";
const OP_DOWNLOAD: &str = "down";
const OP_DELETE: &str = "del";

/// File API operations the navigation layer is generic over.
pub trait FileOps: Clone + Send + Sync + 'static {
    fn list(&self, rel: &str) -> impl Future<Output = Result<Vec<FileEntry>, AppError>> + Send;

    fn delete(
        &self,
        rel: &str,
        token: Option<&str>,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    fn download(&self, rel: &str) -> impl Future<Output = Result<(), AppError>> + Send;
}

#[derive(Debug, Clone)]
pub struct FileClient {
    http: RequestClient,
    base: Url,
    opener: String,
}

impl FileClient {
    /// `base` is the server root (keep a trailing slash so joins resolve
    /// under it); `opener` is the command downloads are handed to.
    pub fn new(http: RequestClient, base: Url, opener: impl Into<String>) -> Self {
        Self {
            http,
            base,
            opener: opener.into(),
        }
    }

    /// Builds `{base}api/file?op=<op>&rel=<rel>` with the path
    /// percent-encoded by the query serializer.
    fn endpoint(&self, op: &str, rel: &str) -> Result<Url, AppError> {
        let mut url: Url = self
            .base
            .join("api/file")
            .map_err(|e| AppError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("op", op)
            .append_pair("rel", rel);
        Ok(url)
    }
}

impl FileOps for FileClient {
    async fn list(&self, rel: &str) -> Result<Vec<FileEntry>, AppError> {
        let url: Url = self.endpoint(OP_LIST, rel)?;
        debug!("listing {rel}");

        let response: RequestResult = self.http.request(url.as_str(), None, &HeaderMap::new()).await?;
        match envelope::parse::<Vec<FileEntry>>(&response.text)? {
            ApiOutcome::Success(entries) => Ok(entries),
            ApiOutcome::Failure { code, raw } => Err(AppError::ListingFailed { code, raw }),
        }
    }

    async fn delete(&self, rel: &str, token: Option<&str>) -> Result<(), AppError> {
        let url: Url = self.endpoint(OP_DELETE, rel)?;
        debug!("deleting {rel}");

        let mut headers: HeaderMap = HeaderMap::new();
        if let Some(token) = token {
            let value = HeaderValue::from_str(token).map_err(|_| {
                AppError::Other("authorization token contains invalid header bytes".to_string())
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        let response: RequestResult = self
            .http
            .request(url.as_str(), Some(RequestBody::Empty), &headers)
            .await?;
        if response.status == 401 {
            return Err(AppError::Unauthorized {
                path: rel.to_string(),
            });
        }

        match envelope::parse::<serde::de::IgnoredAny>(&response.text)? {
            ApiOutcome::Success(_) => Ok(()),
            ApiOutcome::Failure { code, raw } => Err(AppError::DeletionRejected { code, raw }),
        }
    }

    /// Hands the download URL to the configured opener; the resulting
    /// transfer is owned by whatever the opener launches. No result is
    /// parsed.
    async fn download(&self, rel: &str) -> Result<(), AppError> {
        let url: Url = self.endpoint(OP_DOWNLOAD, rel)?;
        info!("handing {rel} to `{}`", self.opener);
        Command::new(&self.opener).arg(url.as_str()).spawn()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> FileClient {
        FileClient::new(
            RequestClient::new().unwrap(),
            Url::parse("http://files.test/").unwrap(),
            "xdg-open",
        )
    }

    fn query_pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn endpoint_carries_op_and_encoded_rel() {
        let url = client().endpoint(OP_LIST, "./docs").unwrap();
        assert_eq!(url.path(), "/api/file");
        assert_eq!(
            query_pairs(&url),
            vec![
                ("op".to_string(), "list".to_string()),
                ("rel".to_string(), "./docs".to_string()),
            ]
        );
    }

    #[test]
    fn endpoint_encodes_awkward_names() {
        let url = client().endpoint(OP_DOWNLOAD, "./music & notes/a b.txt").unwrap();
        // The raw query must not contain spaces or ampersands from the path.
        let query = url.query().unwrap();
        assert!(!query.contains(' '));
        assert_eq!(query.matches('&').count(), 1);
        assert_eq!(
            query_pairs(&url)[1],
            ("rel".to_string(), "./music & notes/a b.txt".to_string())
        );
    }

    #[test]
    fn endpoint_resolves_under_base_path() {
        let nested = FileClient::new(
            RequestClient::new().unwrap(),
            Url::parse("http://files.test/station/").unwrap(),
            "xdg-open",
        );
        let url = nested.endpoint(OP_LIST, ".").unwrap();
        assert_eq!(url.path(), "/station/api/file");
    }
}
