use anyhow::{anyhow, bail, Context as _, Result};
use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::QUOTE_API_URL;

/// Payload for the fake-quote API; mirrors the fields the service expects.
#[derive(Debug, Serialize)]
pub struct QuoteRequest {
    pub username: String,
    pub display_name: String,
    pub text: String,
    pub avatar: String,
    pub color: bool,
}

pub struct ApiHandle {
    client: Client,
}

impl ApiHandle {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Asks the quote service to render the message and returns the URL of the
    /// generated PNG.
    pub async fn generate_quote(&self, request: &QuoteRequest) -> Result<String> {
        let response = self
            .client
            .post(QUOTE_API_URL)
            .json(request)
            .send()
            .await
            .context("Failed to reach the quote API")?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            bail!("Quote API returned {status}");
        }

        extract_png_url(&body)?
            .ok_or_else(|| anyhow!("Quote API response contained no image URL"))
    }

    pub async fn download_image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to download the image")?;

        let status = response.status();
        if !status.is_success() {
            bail!("Image download returned {status}");
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Pulls the generated PNG's URL out of the response body. Well-formed
/// responses carry it in a `url` field; the raw body is scanned as a fallback,
/// as the response shape has changed before.
fn extract_png_url(body: &str) -> Result<Option<String>> {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(url) = json["url"].as_str() {
            if url.ends_with(".png") {
                return Ok(Some(url.to_owned()));
            }
        }
    }

    let png_pattern = Regex::new(r#"https?://[^\s"]+\.png"#)?;

    Ok(png_pattern.find(body).map(|url| url.as_str().to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_url_from_json_body() {
        let body = r#"{"success":true,"url":"https://api.voids.top/quotes/abc123.png"}"#;

        assert_eq!(
            extract_png_url(body).unwrap().as_deref(),
            Some("https://api.voids.top/quotes/abc123.png")
        );
    }

    #[test]
    fn json_url_field_wins_over_other_links() {
        let body = r#"{"msg":"see https://example.com/other.png","url":"https://api.voids.top/quotes/abc123.png"}"#;

        assert_eq!(
            extract_png_url(body).unwrap().as_deref(),
            Some("https://api.voids.top/quotes/abc123.png")
        );
    }

    #[test]
    fn no_png_url_in_body() {
        assert_eq!(extract_png_url(r#"{"success":false}"#).unwrap(), None);
    }

    #[test]
    fn png_url_scanned_from_non_json_body() {
        let body = r#"before "http://example.com/a.png" after"#;

        assert_eq!(
            extract_png_url(body).unwrap().as_deref(),
            Some("http://example.com/a.png")
        );
    }
}
