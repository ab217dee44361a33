//! Query-string parameters for list endpoints and the repository queries built from them.

use super::entities::Gender;
use crate::mapping::{Shape, SortClause};
use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const MAX_PAGE_SIZE: u32 = 20;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyParameters {
    pub company_name: Option<String>,
    pub search_term: Option<String>,
    pub page_number: u32,
    pub page_size: u32,
    /// Client sort terms; absent or blank sorts by company name.
    pub order_by: Option<String>,
    pub fields: Option<String>,
}

impl Default for CompanyParameters {
    fn default() -> Self {
        CompanyParameters {
            company_name: None,
            search_term: None,
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            order_by: None,
            fields: None,
        }
    }
}

impl CompanyParameters {
    pub fn page_number(&self) -> u32 {
        self.page_number.max(1)
    }

    /// Clamped to `1..=MAX_PAGE_SIZE`.
    pub fn page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    pub fn fields(&self) -> &str {
        self.fields.as_deref().unwrap_or("")
    }

    /// `orderBy` in the vocabulary of `shape`; the name ordering when none was given.
    pub fn order_by(&self, shape: Shape) -> &str {
        match self.order_by.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(order_by) => order_by,
            None if shape == Shape::CompanyFullDto => "Name",
            None => "CompanyName",
        }
    }

    /// Repository query with already-translated sort clauses.
    pub fn to_query(&self, sort: Vec<SortClause>) -> CompanyQuery {
        CompanyQuery {
            company_name: non_blank(self.company_name.as_deref()),
            search_term: non_blank(self.search_term.as_deref()),
            page_number: self.page_number(),
            page_size: self.page_size(),
            sort,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeParameters {
    pub gender: Option<String>,
    pub q: Option<String>,
    pub order_by: String,
    pub fields: Option<String>,
}

impl Default for EmployeeParameters {
    fn default() -> Self {
        EmployeeParameters {
            gender: None,
            q: None,
            order_by: "name".into(),
            fields: None,
        }
    }
}

impl EmployeeParameters {
    pub fn fields(&self) -> &str {
        self.fields.as_deref().unwrap_or("")
    }

    /// Blank gender means no filter; anything else must name a gender.
    pub fn to_query(&self, sort: Vec<SortClause>) -> Result<EmployeeQuery, String> {
        let gender = match non_blank(self.gender.as_deref()) {
            Some(g) => Some(g.parse::<Gender>()?),
            None => None,
        };
        Ok(EmployeeQuery {
            gender,
            q: non_blank(self.q.as_deref()),
            sort,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompanyQuery {
    /// Exact match on name.
    pub company_name: Option<String>,
    /// Case-insensitive substring of name or introduction.
    pub search_term: Option<String>,
    pub page_number: u32,
    pub page_size: u32,
    pub sort: Vec<SortClause>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EmployeeQuery {
    pub gender: Option<Gender>,
    /// Case-insensitive substring of employee number, first or last name.
    pub q: Option<String>,
    pub sort: Vec<SortClause>,
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}
