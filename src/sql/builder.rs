//! Builds the parameterized list queries whose WHERE and ORDER BY depend on the request.

use super::params::PgBindValue;
use crate::case::to_snake_case;
use crate::mapping::{SortClause, SortDirection};
use crate::model::{CompanyQuery, EmployeeQuery, PagedList};
use uuid::Uuid;

pub const COMPANY_COLUMNS: &str =
    r#""id", "name", "introduction", "country", "industry", "product""#;
pub const EMPLOYEE_COLUMNS: &str =
    r#""id", "company_id", "employee_no", "first_name", "last_name", "gender", "date_of_birth""#;
pub const COMPANIES_TABLE: &str = r#""companies""#;
pub const EMPLOYEES_TABLE: &str = r#""employees""#;

/// Quote identifier for PostgreSQL (safe: only from mapping tables and code).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Storage column for a mapping destination field (`DateOfBirth` -> `date_of_birth`).
pub fn column_for(field: &str) -> String {
    to_snake_case(field)
}

#[derive(Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf::default()
    }

    fn push_param(&mut self, v: impl Into<PgBindValue>) -> u32 {
        self.params.push(v.into());
        self.params.len() as u32
    }
}

/// `ILIKE` pattern matching `term` anywhere, with LIKE metacharacters escaped.
fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// ` ORDER BY ...` from translated clauses, falling back to `default` when empty.
/// `"id"` is appended as a tiebreaker unless already present.
pub fn order_clause(sort: &[SortClause], default: &[&str]) -> String {
    let mut parts: Vec<(String, SortDirection)> = if sort.is_empty() {
        default
            .iter()
            .map(|f| (column_for(f), SortDirection::Asc))
            .collect()
    } else {
        sort.iter()
            .map(|c| (column_for(&c.field), c.direction))
            .collect()
    };
    if !parts.iter().any(|(col, _)| col == "id") {
        parts.push(("id".into(), SortDirection::Asc));
    }
    let rendered: Vec<String> = parts
        .iter()
        .map(|(col, dir)| format!("{} {}", quoted(col), dir.as_sql()))
        .collect();
    format!(" ORDER BY {}", rendered.join(", "))
}

fn company_where(q: &CompanyQuery, buf: &mut QueryBuf) -> String {
    let mut where_parts = Vec::new();
    if let Some(name) = &q.company_name {
        let n = buf.push_param(name.as_str());
        where_parts.push(format!("\"name\" = ${}", n));
    }
    if let Some(term) = &q.search_term {
        let n = buf.push_param(contains_pattern(term));
        where_parts.push(format!("(\"name\" ILIKE ${n} OR \"introduction\" ILIKE ${n})"));
    }
    if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    }
}

/// One page of companies.
pub fn select_companies(q: &CompanyQuery) -> QueryBuf {
    let mut buf = QueryBuf::new();
    let where_clause = company_where(q, &mut buf);
    let order = order_clause(&q.sort, &["Name"]);
    let offset = PagedList::<()>::offset(q.page_number, q.page_size);
    buf.sql = format!(
        "SELECT {} FROM {}{}{} LIMIT {} OFFSET {}",
        COMPANY_COLUMNS, COMPANIES_TABLE, where_clause, order, q.page_size, offset
    );
    buf
}

/// Total matching companies, ignoring paging.
pub fn count_companies(q: &CompanyQuery) -> QueryBuf {
    let mut buf = QueryBuf::new();
    let where_clause = company_where(q, &mut buf);
    buf.sql = format!("SELECT COUNT(*) FROM {}{}", COMPANIES_TABLE, where_clause);
    buf
}

/// Companies whose id is in `ids`, ordered by name.
pub fn select_companies_by_ids(ids: &[Uuid]) -> QueryBuf {
    let mut buf = QueryBuf::new();
    if ids.is_empty() {
        buf.sql = format!("SELECT {} FROM {} WHERE 1 = 0", COMPANY_COLUMNS, COMPANIES_TABLE);
        return buf;
    }
    let placeholders: Vec<String> = ids
        .iter()
        .map(|id| format!("${}::uuid", buf.push_param(*id)))
        .collect();
    buf.sql = format!(
        "SELECT {} FROM {} WHERE \"id\" IN ({}) ORDER BY \"name\", \"id\"",
        COMPANY_COLUMNS,
        COMPANIES_TABLE,
        placeholders.join(", ")
    );
    buf
}

/// Employees of one company with optional gender and free-text filters.
pub fn select_employees(company_id: Uuid, q: &EmployeeQuery) -> QueryBuf {
    let mut buf = QueryBuf::new();
    let n = buf.push_param(company_id);
    let mut where_parts = vec![format!("\"company_id\" = ${}::uuid", n)];
    if let Some(gender) = q.gender {
        let n = buf.push_param(gender as i64);
        where_parts.push(format!("\"gender\" = ${}", n));
    }
    if let Some(term) = &q.q {
        let n = buf.push_param(contains_pattern(term));
        where_parts.push(format!(
            "(\"employee_no\" ILIKE ${n} OR \"first_name\" ILIKE ${n} OR \"last_name\" ILIKE ${n})"
        ));
    }
    let order = order_clause(&q.sort, &["FirstName", "LastName"]);
    buf.sql = format!(
        "SELECT {} FROM {} WHERE {}{}",
        EMPLOYEE_COLUMNS,
        EMPLOYEES_TABLE,
        where_parts.join(" AND "),
        order
    );
    buf
}
