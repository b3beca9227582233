//! Client for the third-party resume parsing API.

use crate::dto::ParsedResume;
use async_trait::async_trait;
use bytes::Bytes;
use jobboard_config::ResumeParserConfig;
use jobboard_core::{Interface, JobBoardError, JobBoardResult};
use reqwest::header::CONTENT_TYPE;
use shaku::Component;
use tracing::{debug, error};

const SERVICE_NAME: &str = "resume_parser";

/// Turns an uploaded document into structured resume fields.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResumeParser: Interface + Send + Sync {
    /// Sends `document` to the parser and decodes its answer.
    async fn parse(&self, document: Bytes) -> JobBoardResult<ParsedResume>;
}

/// HTTP implementation posting the raw document bytes.
#[derive(Component, Clone)]
#[shaku(interface = ResumeParser)]
pub struct HttpResumeParser {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpResumeParser {
    /// Creates a parser client from configuration.
    pub fn new(config: &ResumeParserConfig) -> JobBoardResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| JobBoardError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }

    /// Component parameters for registering the parser in a shaku module.
    pub fn parameters(config: &ResumeParserConfig) -> JobBoardResult<HttpResumeParserParameters> {
        let Self { client, url, api_key } = Self::new(config)?;
        Ok(HttpResumeParserParameters { client, url, api_key })
    }
}

#[async_trait]
impl ResumeParser for HttpResumeParser {
    async fn parse(&self, document: Bytes) -> JobBoardResult<ParsedResume> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| JobBoardError::Configuration("resume_parser.api_key is not set".to_string()))?;

        debug!("Sending {} bytes to resume parser", document.len());

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header("apikey", api_key)
            .body(document)
            .send()
            .await
            .map_err(|e| {
                error!("Resume parser request failed: {}", e);
                if e.is_timeout() {
                    JobBoardError::Timeout("resume parser did not answer in time".to_string())
                } else {
                    JobBoardError::external(SERVICE_NAME, e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Resume parser returned status {}", status);
            return Err(JobBoardError::external(
                SERVICE_NAME,
                format!("unexpected status {}", status.as_u16()),
            ));
        }

        response.json::<ParsedResume>().await.map_err(|e| {
            error!("Failed to decode resume parser response: {}", e);
            JobBoardError::external(SERVICE_NAME, format!("invalid response body: {}", e))
        })
    }
}

impl std::fmt::Debug for HttpResumeParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResumeParser")
            .field("url", &self.url)
            .field("api_key_set", &self.api_key.is_some())
            .finish()
    }
}
