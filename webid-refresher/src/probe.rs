//! Reachability checks for identity documents

use crate::models::{Entry, EntryStatus};
use crate::RefresherError;
use reqwest::header::ACCEPT;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Content types a WebID profile is usually served as
pub const RDF_ACCEPT: &str = "text/turtle, application/ld+json, application/rdf+xml";

/// Checks one source URL. Implementations never fail: any problem is an
/// `inactive` entry.
pub trait Prober {
    fn probe(&self, url: &str) -> impl Future<Output = Entry> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    pub fn new(timeout: Duration) -> Result<Self, RefresherError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("webid-refresher/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Prober for HttpProber {
    async fn probe(&self, url: &str) -> Entry {
        let status = match self.client.get(url).header(ACCEPT, RDF_ACCEPT).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(url, status = %response.status(), "source reachable");
                EntryStatus::Active
            }
            Ok(response) => {
                warn!(url, status = %response.status(), "source answered with an error status");
                EntryStatus::Inactive
            }
            Err(e) if e.is_timeout() => {
                warn!(url, "source timed out");
                EntryStatus::Inactive
            }
            Err(e) => {
                warn!(url, error = %e, "error checking source");
                EntryStatus::Inactive
            }
        };
        Entry::probed(url, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webid_devkit::{unreachable_url, StubServer};

    fn prober(timeout_ms: u64) -> HttpProber {
        HttpProber::new(Duration::from_millis(timeout_ms)).unwrap()
    }

    #[tokio::test]
    async fn test_success_is_active_and_sends_rdf_accept() {
        let server = StubServer::builder().document("/card", 200).start().await.unwrap();

        let entry = prober(2_000).probe(&server.url("/card#me")).await;

        assert_eq!(entry.status, EntryStatus::Active);
        assert_eq!(entry.url, server.url("/card#me"));
        let requests = server.requests_for("/card");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].accept.as_deref(), Some(RDF_ACCEPT));
    }

    #[tokio::test]
    async fn test_error_status_is_inactive() {
        let server = StubServer::builder()
            .document("/gone", 410)
            .document("/broken", 500)
            .start()
            .await
            .unwrap();
        let prober = prober(2_000);

        assert_eq!(prober.probe(&server.url("/gone")).await.status, EntryStatus::Inactive);
        assert_eq!(prober.probe(&server.url("/broken")).await.status, EntryStatus::Inactive);
        assert_eq!(prober.probe(&server.url("/unrouted")).await.status, EntryStatus::Inactive);
    }

    #[tokio::test]
    async fn test_timeout_is_inactive() {
        let server = StubServer::builder()
            .slow_document("/slow", Duration::from_secs(3))
            .start()
            .await
            .unwrap();

        let entry = prober(200).probe(&server.url("/slow")).await;
        assert_eq!(entry.status, EntryStatus::Inactive);
    }

    #[tokio::test]
    async fn test_unreachable_and_malformed_urls_are_inactive() {
        let prober = prober(1_000);
        let refused = unreachable_url().await.unwrap();

        assert_eq!(prober.probe(&refused).await.status, EntryStatus::Inactive);
        let malformed = prober.probe("not a url").await;
        assert_eq!(malformed.status, EntryStatus::Inactive);
        assert_eq!(malformed.url, "not a url");
    }
}
