use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Identity presented on every probe. A bare library user-agent gets
/// trivially filtered by some hosts, so this mimics a desktop browser.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36";

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Outcome of probing a single candidate host.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The host answered HTTP 200. `body` is empty when the response
    /// body could not be read; the subdomain still counts as live.
    Live { url: String, body: String },
    /// Transport failure, or any status other than 200.
    Unreachable,
    /// The label cannot form a valid host string.
    InvalidHost,
}

/// Issues one plain-HTTP GET per candidate against `{label}.{domain}`.
///
/// The underlying client (and its connection pool) is shared across
/// every probe of a run; cloning is cheap.
#[derive(Clone)]
pub struct Prober {
    client: Client,
    domain: String,
}

impl Prober {
    pub fn new(domain: &str) -> Self {
        Self::with_timeout(domain, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(domain: &str, timeout_secs: u64) -> Self {
        // Redirects are not followed: success is exactly a 200 served
        // by the candidate host itself.
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .pool_max_idle_per_host(50)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self::with_client(domain, client)
    }

    pub(crate) fn with_client(domain: &str, client: Client) -> Self {
        Self {
            client,
            domain: domain.to_string(),
        }
    }

    /// Probes `http://{label}.{domain}` once. Never fails: every
    /// failure mode collapses into a negative outcome, so one bad
    /// candidate cannot abort its batch.
    pub async fn probe(&self, label: &str) -> ProbeOutcome {
        let url = format!("http://{}.{}", label, self.domain);

        // Wordlists routinely contain entries that cannot appear in a
        // host label; weed those out before touching the wire.
        let parsed = match Url::parse(&url) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("candidate {:?} does not form a valid host: {}", label, e);
                return ProbeOutcome::InvalidHost;
            }
        };

        match self.client.get(parsed).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                let body = response.text().await.unwrap_or_default();
                ProbeOutcome::Live { url, body }
            }
            Ok(response) => {
                debug!("{} answered {}", url, response.status());
                ProbeOutcome::Unreachable
            }
            Err(e) if e.is_builder() => {
                debug!("candidate {:?} rejected by client: {}", label, e);
                ProbeOutcome::InvalidHost
            }
            Err(e) => {
                debug!("{} unreachable: {}", url, e);
                ProbeOutcome::Unreachable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Routes `{label}.example.com` hosts to the mock listener. The
    /// returned domain carries the listener port, since DNS overrides
    /// cannot redirect ports.
    fn mock_prober(server: &MockServer, labels: &[&str]) -> (Prober, String) {
        let domain = format!("example.com:{}", server.address().port());
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(2))
            .redirect(reqwest::redirect::Policy::none());
        for label in labels {
            builder = builder.resolve(&format!("{}.example.com", label), *server.address());
        }
        let prober = Prober::with_client(&domain, builder.build().unwrap());
        (prober, domain)
    }

    #[tokio::test]
    async fn status_200_is_live_with_verbatim_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>hi</html>"))
            .mount(&server)
            .await;

        let (prober, domain) = mock_prober(&server, &["foo"]);
        match prober.probe("foo").await {
            ProbeOutcome::Live { url, body } => {
                assert_eq!(url, format!("http://foo.{}", domain));
                assert_eq!(body, "<html>hi</html>");
            }
            other => panic!("expected Live, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn non_200_statuses_are_unreachable() {
        for status in [404u16, 500] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let (prober, _) = mock_prober(&server, &["foo"]);
            assert!(matches!(
                prober.probe("foo").await,
                ProbeOutcome::Unreachable
            ));
        }
    }

    #[tokio::test]
    async fn redirects_are_not_followed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(301).insert_header("location", "http://elsewhere.org/"),
            )
            .mount(&server)
            .await;

        let (prober, _) = mock_prober(&server, &["foo"]);
        assert!(matches!(
            prober.probe("foo").await,
            ProbeOutcome::Unreachable
        ));
    }

    #[tokio::test]
    async fn transport_failure_is_unreachable() {
        // Reserved TLD, guaranteed not to resolve.
        let prober = Prober::with_timeout("sink.invalid", 2);
        assert!(matches!(
            prober.probe("foo").await,
            ProbeOutcome::Unreachable
        ));
    }

    #[tokio::test]
    async fn unencodable_label_is_invalid_host() {
        let prober = Prober::with_timeout("example.com", 2);
        assert!(matches!(
            prober.probe("bad label").await,
            ProbeOutcome::InvalidHost
        ));
    }
}
