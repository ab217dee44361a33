//! HATEOAS links for company resources and the company collection.

use crate::model::CompanyParameters;
use serde::Serialize;
use uuid::Uuid;

pub const COMPANIES_PATH: &str = "/api/companies";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    pub rel: String,
    pub method: String,
}

impl Link {
    pub fn new(href: impl Into<String>, rel: &str, method: &str) -> Self {
        Link {
            href: href.into(),
            rel: rel.to_string(),
            method: method.to_string(),
        }
    }
}

pub fn company_uri(id: Uuid) -> String {
    format!("{}/{}", COMPANIES_PATH, id)
}

pub fn employees_uri(company_id: Uuid) -> String {
    format!("{}/{}/employees", COMPANIES_PATH, company_id)
}

pub fn employee_uri(company_id: Uuid, employee_id: Uuid) -> String {
    format!("{}/{}", employees_uri(company_id), employee_id)
}

/// Links for a single company. `fields` is carried into the self link.
pub fn company_links(id: Uuid, fields: &str) -> Vec<Link> {
    let fields = fields.trim();
    let self_href = if fields.is_empty() {
        company_uri(id)
    } else {
        format!("{}?{}", company_uri(id), encode_pairs(&[("fields", fields)]))
    };
    vec![
        Link::new(self_href, "self", "GET"),
        Link::new(company_uri(id), "delete_company", "DELETE"),
        Link::new(employees_uri(id), "create_employee_for_company", "POST"),
        Link::new(employees_uri(id), "employees", "GET"),
    ]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageRel {
    Previous,
    Current,
    Next,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompanyListQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_by: Option<&'a str>,
    page_number: u32,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    company_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_term: Option<&'a str>,
}

fn encode_pairs(pairs: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(pairs).unwrap_or_default()
}

/// Company list URI for the current, previous or next page of `params`.
pub fn companies_page_uri(params: &CompanyParameters, rel: PageRel) -> String {
    let current = params.page_number();
    let page_number = match rel {
        PageRel::Previous => current.saturating_sub(1).max(1),
        PageRel::Current => current,
        PageRel::Next => current + 1,
    };
    let query = CompanyListQuery {
        fields: params.fields.as_deref().map(str::trim).filter(|f| !f.is_empty()),
        order_by: params.order_by.as_deref().map(str::trim).filter(|o| !o.is_empty()),
        page_number,
        page_size: params.page_size(),
        company_name: params.company_name.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        search_term: params.search_term.as_deref().map(str::trim).filter(|s| !s.is_empty()),
    };
    match serde_urlencoded::to_string(&query) {
        Ok(qs) => format!("{}?{}", COMPANIES_PATH, qs),
        Err(_) => COMPANIES_PATH.to_string(),
    }
}

/// Links for a page of the company collection.
pub fn companies_links(params: &CompanyParameters, has_previous: bool, has_next: bool) -> Vec<Link> {
    let mut links = vec![Link::new(
        companies_page_uri(params, PageRel::Current),
        "self",
        "GET",
    )];
    if has_previous {
        links.push(Link::new(
            companies_page_uri(params, PageRel::Previous),
            "previous_page",
            "GET",
        ));
    }
    if has_next {
        links.push(Link::new(
            companies_page_uri(params, PageRel::Next),
            "next_page",
            "GET",
        ));
    }
    links
}
