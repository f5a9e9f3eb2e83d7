//! Manifest fetching with candidate URL ordering over a pluggable document store.
//!
//! Each package is looked up at `<base_url>/<package>/<branch>/manifest.<ext>`
//! for every branch × extension pair, branch-major. The first candidate that
//! returns a parseable YAML document wins. Not-found candidates are skipped
//! quietly; transport, status and parse errors are logged and skipped too.
//! Every candidate is tried at most once.

use std::future::Future;

use reqwest::StatusCode;

use crate::config::GatherConfig;
use crate::error::TargetsError;
use crate::manifest::Manifest;

/// Read access to the remote document host.
pub trait DocumentStore {
    /// Fetch the raw document at `location`.
    ///
    /// Returns `Ok(None)` when the host reports the document does not exist.
    fn fetch(&self, location: &str) -> impl Future<Output = crate::Result<Option<Vec<u8>>>>;
}

/// [`DocumentStore`] backed by plain HTTP GETs.
///
/// Idle connections are not pooled, so every request opens its own
/// connection. No request timeout is set beyond reqwest's defaults.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
}

impl HttpStore {
    /// Build a store that identifies itself with `user_agent`.
    pub fn new(user_agent: &str) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| {
                TargetsError::InvalidConfig(format!("cannot build HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }
}

impl DocumentStore for HttpStore {
    async fn fetch(&self, location: &str) -> crate::Result<Option<Vec<u8>>> {
        let resp = self
            .client
            .get(location)
            .send()
            .await
            .map_err(|e| TargetsError::Transport(location.to_string(), e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(TargetsError::HttpStatus(
                location.to_string(),
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown").to_string(),
            ));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| TargetsError::Transport(location.to_string(), e.to_string()))?;
        Ok(Some(body.to_vec()))
    }
}

/// Candidate manifest URLs for `package`, in the order they are tried.
pub fn candidate_urls(config: &GatherConfig, package: &str) -> Vec<String> {
    let base = config.base_url.trim_end_matches('/');
    config
        .branches
        .iter()
        .flat_map(|branch| {
            config
                .extensions
                .iter()
                .map(move |ext| format!("{}/{}/{}/manifest.{}", base, package, branch, ext))
        })
        .collect()
}

/// Fetch and parse the manifest for `package`, or `None` once every
/// candidate has failed.
pub async fn fetch_manifest<S: DocumentStore>(
    store: &S,
    config: &GatherConfig,
    package: &str,
) -> Option<Manifest> {
    for url in candidate_urls(config, package) {
        let body = match store.fetch(&url).await {
            Ok(Some(body)) => body,
            Ok(None) => {
                tracing::debug!(url = %url, "manifest not found");
                continue;
            }
            Err(e) => {
                tracing::warn!(error = %e, "manifest fetch failed");
                continue;
            }
        };

        match Manifest::from_slice(&body) {
            Ok(manifest) => {
                tracing::debug!(url = %url, "manifest fetched");
                return Some(manifest);
            }
            Err(e) => {
                let err = TargetsError::Parse(url, e.to_string());
                tracing::warn!(error = %err, "manifest parse failed");
            }
        }
    }
    None
}

/// In-memory [`DocumentStore`] for tests. Unknown locations are not-found.
#[cfg(test)]
pub(crate) mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::DocumentStore;
    use crate::error::TargetsError;

    pub(crate) enum Response {
        Body(Vec<u8>),
        Status(u16),
        Transport(&'static str),
    }

    #[derive(Default)]
    pub(crate) struct MemoryStore {
        responses: HashMap<String, Response>,
        requests: Mutex<Vec<String>>,
    }

    impl MemoryStore {
        pub(crate) fn with_body(mut self, location: &str, body: &str) -> Self {
            self.responses
                .insert(location.to_string(), Response::Body(body.as_bytes().to_vec()));
            self
        }

        pub(crate) fn with_status(mut self, location: &str, status: u16) -> Self {
            self.responses
                .insert(location.to_string(), Response::Status(status));
            self
        }

        pub(crate) fn with_transport_error(
            mut self,
            location: &str,
            message: &'static str,
        ) -> Self {
            self.responses
                .insert(location.to_string(), Response::Transport(message));
            self
        }

        /// Locations requested so far, in order.
        pub(crate) fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl DocumentStore for MemoryStore {
        async fn fetch(&self, location: &str) -> crate::Result<Option<Vec<u8>>> {
            self.requests.lock().unwrap().push(location.to_string());
            match self.responses.get(location) {
                None | Some(Response::Status(404)) => Ok(None),
                Some(Response::Status(code)) => Err(TargetsError::HttpStatus(
                    location.to_string(),
                    *code,
                    "stub".to_string(),
                )),
                Some(Response::Transport(message)) => Err(TargetsError::Transport(
                    location.to_string(),
                    message.to_string(),
                )),
                Some(Response::Body(body)) => Ok(Some(body.clone())),
            }
        }
    }
}
