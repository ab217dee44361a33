//! Response helpers: negotiated JSON bodies, link wrappers and pagination metadata.

use crate::extractors::MediaType;
use crate::links::{companies_page_uri, Link, PageRel};
use crate::model::{CompanyParameters, PagedList};
use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const PAGINATION_HEADER: HeaderName = HeaderName::from_static("x-pagination");

/// Collection body for HATEOAS media types.
#[derive(Serialize)]
pub struct LinkedCollection<T> {
    pub value: Vec<T>,
    pub links: Vec<Link>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub total_count: u64,
    pub page_size: u32,
    pub current_page: u32,
    pub total_pages: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_page_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_link: Option<String>,
}

impl PaginationMetadata {
    /// Page links are only included when the body itself carries no links.
    pub fn for_page<T>(page: &PagedList<T>, params: &CompanyParameters, include_page_links: bool) -> Self {
        let link = |cond: bool, rel| (include_page_links && cond).then(|| companies_page_uri(params, rel));
        PaginationMetadata {
            total_count: page.total_count,
            page_size: page.page_size,
            current_page: page.current_page,
            total_pages: page.total_pages,
            previous_page_link: link(page.has_previous(), PageRel::Previous),
            next_page_link: link(page.has_next(), PageRel::Next),
        }
    }

    pub fn header_value(&self) -> Option<HeaderValue> {
        let json = serde_json::to_string(self).ok()?;
        HeaderValue::from_str(&json).ok()
    }
}

/// JSON body with the negotiated media type as Content-Type.
pub fn negotiated<T: Serialize>(status: StatusCode, media: MediaType, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(media.as_str()))],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "response serialization failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// 201 with a Location header.
pub fn created<T: Serialize>(location: &str, media: MediaType, body: &T) -> Response {
    let mut response = negotiated(StatusCode::CREATED, media, body);
    if let Ok(v) = HeaderValue::from_str(location) {
        response.headers_mut().insert(header::LOCATION, v);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_links_only_without_body_links() {
        let params = CompanyParameters::default();
        let page: PagedList<u8> = PagedList::new(vec![1; 5], 12, 1, 5);
        let plain = PaginationMetadata::for_page(&page, &params, true);
        assert!(plain.previous_page_link.is_none());
        assert!(plain.next_page_link.as_deref().unwrap().contains("pageNumber=2"));
        let linked = PaginationMetadata::for_page(&page, &params, false);
        assert!(linked.next_page_link.is_none());
        let header = linked.header_value().unwrap();
        assert_eq!(
            header.to_str().unwrap(),
            r#"{"totalCount":12,"pageSize":5,"currentPage":1,"totalPages":3}"#
        );
    }
}
