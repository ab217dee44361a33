//! Content negotiation from the `Accept` header.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::ACCEPT, request::Parts},
};

/// Output media types the API can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaType {
    Json,
    Hateoas,
    Friendly,
    FriendlyHateoas,
    Full,
    FullHateoas,
}

impl MediaType {
    const SUPPORTED: [MediaType; 6] = [
        MediaType::Json,
        MediaType::Hateoas,
        MediaType::Friendly,
        MediaType::FriendlyHateoas,
        MediaType::Full,
        MediaType::FullHateoas,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Json => "application/json",
            MediaType::Hateoas => "application/vnd.company.hateoas+json",
            MediaType::Friendly => "application/vnd.company.friendly+json",
            MediaType::FriendlyHateoas => "application/vnd.company.friendly.hateoas+json",
            MediaType::Full => "application/vnd.company.full+json",
            MediaType::FullHateoas => "application/vnd.company.full.hateoas+json",
        }
    }

    /// Full company representation instead of the friendly one.
    pub fn is_full(self) -> bool {
        matches!(self, MediaType::Full | MediaType::FullHateoas)
    }

    /// HATEOAS links are added to the body.
    pub fn includes_links(self) -> bool {
        matches!(
            self,
            MediaType::Hateoas | MediaType::FriendlyHateoas | MediaType::FullHateoas
        )
    }

    fn from_range(range: &str) -> Option<Self> {
        if matches!(range, "*/*" | "application/*") {
            return Some(MediaType::Json);
        }
        Self::SUPPORTED
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(range))
    }

    /// Best supported type for an `Accept` header value. Absent or blank means JSON.
    /// Ranges are tried by descending `q`, then in header order; `q=0` excludes a range.
    pub fn negotiate(accept: Option<&str>) -> Result<Self, AppError> {
        let Some(accept) = accept.map(str::trim).filter(|a| !a.is_empty()) else {
            return Ok(MediaType::Json);
        };
        let mut ranges: Vec<(&str, f32)> = accept
            .split(',')
            .filter_map(|part| {
                let mut pieces = part.split(';').map(str::trim);
                let range = pieces.next().filter(|r| !r.is_empty())?;
                let q = pieces
                    .filter_map(|p| p.strip_prefix("q="))
                    .find_map(|q| q.parse::<f32>().ok())
                    .unwrap_or(1.0);
                Some((range, q))
            })
            .filter(|(_, q)| *q > 0.0)
            .collect();
        ranges.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranges
            .iter()
            .find_map(|(range, _)| Self::from_range(range))
            .ok_or_else(|| AppError::NotAcceptable(accept.to_string()))
    }
}

/// Extractor for the negotiated [`MediaType`]; rejects with 406 when nothing matches.
#[derive(Clone, Copy, Debug)]
pub struct Negotiated(pub MediaType);

#[async_trait]
impl<S> FromRequestParts<S> for Negotiated
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accept = parts
            .headers
            .get(ACCEPT)
            .and_then(|v: &axum::http::HeaderValue| v.to_str().ok());
        MediaType::negotiate(accept).map(Negotiated)
    }
}
