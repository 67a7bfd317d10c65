//! LibreTranslate-compatible translation adapter
//!
//! `POST {base}/translate` with `{q, source, target, format}` answering
//! `{translatedText}`. The engine calls translators from blocking threads, so
//! requests are driven to completion on the server runtime through its handle,
//! each bounded by `tokio::time::timeout`.

use std::time::Duration;

use compliance_engine::{TranslationError, Translator};
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
    runtime: Handle,
}

impl HttpTranslator {
    /// Must be called from within the server runtime
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().connect_timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/translate", base_url.trim_end_matches('/')),
            timeout,
            runtime: Handle::current(),
        })
    }

    async fn request(&self, text: &str, src: &str, dest: &str) -> Result<String, TranslationError> {
        let body = TranslateRequest {
            q: text,
            source: src,
            target: dest,
            format: "text",
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(unavailable)?;

        if response.status() == reqwest::StatusCode::BAD_REQUEST {
            return Err(TranslationError::UnsupportedPair {
                src: src.to_string(),
                dest: dest.to_string(),
            });
        }

        let parsed: TranslateResponse = response
            .error_for_status()
            .map_err(unavailable)?
            .json()
            .await
            .map_err(unavailable)?;
        Ok(parsed.translated_text)
    }
}

fn unavailable(e: reqwest::Error) -> TranslationError {
    TranslationError::Unavailable(e.to_string())
}

impl Translator for HttpTranslator {
    fn translate(&self, text: &str, src: &str, dest: &str) -> Result<String, TranslationError> {
        self.runtime.block_on(async {
            tokio::time::timeout(self.timeout, self.request(text, src, dest))
                .await
                .map_err(|_| TranslationError::Timeout(self.timeout.as_millis() as u64))?
        })
    }
}
