use std::path::PathBuf;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::StatusCode;
use scraper::Html;
use thiserror::Error;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use crate::parser::node::Markup;
use crate::settings::Settings;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: StatusCode },
    #[error("failed to read snapshot {path}: {source}")]
    Snapshot {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    /// Rate limits, server errors, timeouts and refused connections are worth retrying.
    fn is_transient(&self) -> bool {
        match self {
            RenderError::Request { source, .. } => source.is_timeout() || source.is_connect(),
            RenderError::Status { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            _ => false,
        }
    }
}

/// A document snapshot the extractor can read as-is.
#[derive(Debug)]
pub struct RenderedPage {
    /// URL or file the snapshot came from.
    pub source: String,
    pub html: String,
}

/// Produces the rendered documentation page.
pub trait Renderer {
    async fn render(&self) -> Result<RenderedPage, RenderError>;
}

/// Fetches the documentation page over HTTP, refetching until sections appear.
pub struct HttpRenderer {
    client: reqwest::Client,
    url: String,
    markup: Markup,
    settle_delay: Duration,
    selector_timeout: Duration,
    max_retries: u32,
    retry_backoff: Duration,
}

impl HttpRenderer {
    pub fn new(settings: &Settings, markup: Markup) -> Result<Self, RenderError> {
        let client = reqwest::Client::builder()
            .timeout(settings.navigation_timeout())
            .user_agent(settings.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(RenderError::Client)?;

        Ok(Self {
            client,
            url: settings.url.clone(),
            markup,
            settle_delay: settings.settle_delay(),
            selector_timeout: settings.selector_timeout(),
            max_retries: settings.max_retries,
            retry_backoff: settings.retry_backoff(),
        })
    }

    async fn fetch_with_retry(&self) -> Result<String, RenderError> {
        let mut attempt = 0u32;
        loop {
            match self.fetch_once().await {
                Ok(html) => return Ok(html),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let backoff = backoff_delay(self.retry_backoff, attempt);
                    warn!(
                        "{} (attempt {}/{}), backing off {:.1}s",
                        e,
                        attempt + 1,
                        self.max_retries,
                        backoff.as_secs_f64()
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn fetch_once(&self) -> Result<String, RenderError> {
        let request_err = |source: reqwest::Error| RenderError::Request {
            url: self.url.clone(),
            source,
        };

        let response = self.client.get(&self.url).send().await.map_err(request_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::Status {
                url: self.url.clone(),
                status,
            });
        }
        response.text().await.map_err(request_err)
    }

    fn shows_sections(&self, html: &str) -> bool {
        self.markup.has_sections(&Html::parse_document(html))
    }
}

/// `base * 2^attempt`, saturating instead of overflowing for large retry counts.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

impl Renderer for HttpRenderer {
    async fn render(&self) -> Result<RenderedPage, RenderError> {
        info!("Fetching {}", self.url);
        let mut html = self.fetch_with_retry().await?;
        let deadline = Instant::now() + self.selector_timeout;

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );

        let mut snapshots = 1u32;
        while !self.shows_sections(&html) {
            if Instant::now() + self.settle_delay > deadline {
                warn!(
                    "no sections with prefix {:?} appeared within {:.1}s, continuing with the last snapshot",
                    self.markup.section_prefix(),
                    self.selector_timeout.as_secs_f64()
                );
                break;
            }
            pb.set_message(format!("waiting for sections ({} snapshots)", snapshots));
            pb.enable_steady_tick(Duration::from_millis(120));
            tokio::time::sleep(self.settle_delay).await;

            match self.fetch_with_retry().await {
                Ok(next) => html = next,
                Err(e) => warn!("Refetch failed, keeping previous snapshot: {}", e),
            }
            snapshots += 1;
        }
        pb.finish_and_clear();

        Ok(RenderedPage {
            source: self.url.clone(),
            html,
        })
    }
}

/// Reads a page that was already rendered elsewhere; `-` means stdin.
pub struct SnapshotRenderer {
    path: PathBuf,
    markup: Markup,
}

impl SnapshotRenderer {
    pub fn new(path: PathBuf, markup: Markup) -> Self {
        Self { path, markup }
    }
}

impl Renderer for SnapshotRenderer {
    async fn render(&self) -> Result<RenderedPage, RenderError> {
        let (source, html) = if self.path.as_os_str() == "-" {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .map_err(|source| RenderError::Snapshot {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            ("<stdin>".to_string(), buf)
        } else {
            let path = self.path.display().to_string();
            let html = tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| RenderError::Snapshot {
                    path: path.clone(),
                    source,
                })?;
            (path, html)
        };

        if !self.markup.has_sections(&Html::parse_document(&html)) {
            warn!(
                "snapshot {} has no sections with prefix {:?}",
                source,
                self.markup.section_prefix()
            );
        }
        Ok(RenderedPage { source, html })
    }
}

// ── Tests ──
