use std::io::Read;

use anyhow::Result;
use axum::http::header::{CONTENT_ENCODING, REFERER, USER_AGENT};
use axum::http::HeaderMap;
use flate2::read::GzDecoder;

use backend_domain::{normalize_optional_text, RequestContext, TryOnPayload};

pub fn parse_try_on(headers: &HeaderMap, body: &[u8]) -> Result<TryOnPayload> {
    let content = maybe_gunzip(headers, body)?;
    if content.trim().is_empty() {
        return Ok(TryOnPayload::default());
    }
    Ok(serde_json::from_str(&content)?)
}

pub fn request_context(headers: &HeaderMap) -> RequestContext {
    RequestContext {
        user_agent: header_text(headers, USER_AGENT.as_str()),
        referrer: header_text(headers, REFERER.as_str()),
    }
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    let value = headers.get(name)?.to_str().ok()?;
    normalize_optional_text(Some(value.to_string()))
}

fn maybe_gunzip(headers: &HeaderMap, body: &[u8]) -> Result<String> {
    if let Some(encoding) = headers.get(CONTENT_ENCODING) {
        if encoding.to_str().unwrap_or("") == "gzip" {
            let mut decoder = GzDecoder::new(body);
            let mut out = String::new();
            decoder.read_to_string(&mut out)?;
            return Ok(out);
        }
    }
    Ok(String::from_utf8(body.to_vec())?)
}
