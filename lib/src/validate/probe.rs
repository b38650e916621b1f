//! Network liveness checks for a single URL.

use crate::config::Config;
use crate::error::Result;
use crate::models::StatusUpdate;
use reqwest::blocking::{Client, ClientBuilder, Response};
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::Url;

/// Checks one URL. Implementations are shared by every in-flight probe task.
pub trait Probe: Sync {
    fn probe(&self, url: &str) -> ProbeOutcome;
}

/// Classification of one probe. A failed probe is data, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub dead: bool,
    /// Final URL when the response was reached through at least one redirect
    pub redirect_url: Option<String>,
}

impl ProbeOutcome {
    pub fn live() -> Self {
        Self {
            dead: false,
            redirect_url: None,
        }
    }

    pub fn dead() -> Self {
        Self {
            dead: true,
            redirect_url: None,
        }
    }

    pub fn redirected(target: impl Into<String>) -> Self {
        Self {
            dead: false,
            redirect_url: Some(target.into()),
        }
    }

    pub fn into_update(self, id: usize) -> StatusUpdate {
        StatusUpdate {
            id,
            dead: self.dead,
            redirect: self.redirect_url.is_some(),
            redirect_url: self.redirect_url,
        }
    }
}

/// GET-based prober with a fixed per-request timeout and no retries.
///
/// Redirects are followed by hand so that every hop is counted, including
/// chains that end back at the requested URL.
pub struct HttpProber {
    client: Client,
    max_redirects: usize,
}

impl HttpProber {
    pub fn new(config: &Config) -> Result<Self> {
        let builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout());
        Self::with_builder(builder, config.max_redirects)
    }

    /// Finish a partially configured client, e.g. one without proxy settings.
    /// Automatic redirect handling is always switched off.
    pub fn with_builder(builder: ClientBuilder, max_redirects: usize) -> Result<Self> {
        let client = builder.redirect(Policy::none()).build()?;
        Ok(Self {
            client,
            max_redirects,
        })
    }
}

impl Probe for HttpProber {
    fn probe(&self, url: &str) -> ProbeOutcome {
        let mut current = url.to_string();
        let mut hops = 0;

        let response = loop {
            let response = match self.client.get(&current).send() {
                Ok(response) => response,
                Err(e) => {
                    log::warn!("Dead link ({}): {}", describe_failure(&e), url);
                    return ProbeOutcome::dead();
                }
            };

            let Some(next) = redirect_target(&response) else {
                break response;
            };
            if hops == self.max_redirects {
                log::warn!("Dead link (too many redirects): {}", url);
                return ProbeOutcome::dead();
            }
            hops += 1;
            log::debug!("{} redirects to {}", current, next);
            current = next.to_string();
        };

        let status = response.status().as_u16();
        if status >= 400 {
            log::warn!("Dead link (HTTP {}): {}", status, url);
        } else {
            log::debug!("HTTP {} for {} after {} redirect(s)", status, url, hops);
        }

        ProbeOutcome {
            dead: status >= 400,
            redirect_url: (hops > 0).then(|| response.url().to_string()),
        }
    }
}

/// Absolute URL named by a redirect response's `Location` header
fn redirect_target(response: &Response) -> Option<Url> {
    if !response.status().is_redirection() {
        return None;
    }
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    response.url().join(location).ok()
}

fn describe_failure(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "timed out"
    } else if error.is_connect() {
        "connection failed"
    } else if error.is_builder() {
        "invalid URL"
    } else {
        "request failed"
    }
}
