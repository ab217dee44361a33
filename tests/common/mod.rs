//! Shared fixtures: an in-memory repository and request helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, NaiveDateTime};
use routine_api::mapping::{SortClause, SortDirection};
use routine_api::model::{
    Company, CompanyQuery, Employee, EmployeeQuery, Gender, PagedList,
};
use routine_api::repository::NewCompany;
use routine_api::{app, default_registry, AppError, AppState, CachePolicy, CompanyRepository};
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

pub const MICROSOFT: Uuid = Uuid::from_u128(0xbbdee09c_089b_4d30_bece_44df5923716c);
pub const GOOGLE: Uuid = Uuid::from_u128(0x6fb600c1_9011_4fd7_9234_881379716440);
pub const ALIPAPA: Uuid = Uuid::from_u128(0x5efc910b_2f45_43df_afae_620d40542853);
pub const NICK: Uuid = Uuid::from_u128(0x4b501cb3_d168_4cc0_b375_48fb33f318a4);
pub const VINCE: Uuid = Uuid::from_u128(0x7eaa532c_1be5_472c_a738_94fd26e5fad6);
pub const MARY: Uuid = Uuid::from_u128(0x72457e73_ea34_4e02_b575_8d384e82a481);

fn dob(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap()
}

fn company(id: Uuid, name: &str, intro: &str, country: &str) -> Company {
    Company {
        id,
        name: name.into(),
        introduction: Some(intro.into()),
        country: Some(country.into()),
        industry: Some("Software".into()),
        product: None,
    }
}

fn employee(
    id: Uuid,
    no: &str,
    first: &str,
    last: &str,
    gender: Gender,
    born: NaiveDateTime,
) -> Employee {
    Employee {
        id,
        company_id: MICROSOFT,
        employee_no: no.into(),
        first_name: first.into(),
        last_name: last.into(),
        gender,
        date_of_birth: born,
    }
}

#[derive(Default)]
pub struct MemoryRepository {
    companies: Mutex<Vec<Company>>,
    employees: Mutex<Vec<Employee>>,
}

impl MemoryRepository {
    /// Three companies; Microsoft has three employees.
    pub fn seeded() -> Self {
        let repo = MemoryRepository::default();
        *repo.companies.lock().unwrap() = vec![
            company(MICROSOFT, "Microsoft", "Great Company", "USA"),
            company(GOOGLE, "Google", "Don't be evil", "USA"),
            company(ALIPAPA, "Alipapa", "Fubao Company", "China"),
        ];
        *repo.employees.lock().unwrap() = vec![
            employee(NICK, "MSFT231", "Nick", "Carter", Gender::Male, dob(1976, 1, 2)),
            employee(VINCE, "MSFT245", "Vince", "Carter", Gender::Male, dob(1980, 11, 1)),
            employee(MARY, "MSFT301", "Mary", "Poppins", Gender::Female, dob(1991, 3, 4)),
        ];
        repo
    }

    pub fn employee_count(&self) -> usize {
        self.employees.lock().unwrap().len()
    }
}

fn compare_company(a: &Company, b: &Company, field: &str) -> Ordering {
    match field {
        "Id" => a.id.cmp(&b.id),
        "Name" => a.name.cmp(&b.name),
        "Introduction" => a.introduction.cmp(&b.introduction),
        "Country" => a.country.cmp(&b.country),
        "Industry" => a.industry.cmp(&b.industry),
        "Product" => a.product.cmp(&b.product),
        other => panic!("unexpected company sort field {}", other),
    }
}

fn compare_employee(a: &Employee, b: &Employee, field: &str) -> Ordering {
    match field {
        "Id" => a.id.cmp(&b.id),
        "CompanyId" => a.company_id.cmp(&b.company_id),
        "EmployeeNo" => a.employee_no.cmp(&b.employee_no),
        "FirstName" => a.first_name.cmp(&b.first_name),
        "LastName" => a.last_name.cmp(&b.last_name),
        "Gender" => a.gender.cmp(&b.gender),
        "DateOfBirth" => a.date_of_birth.cmp(&b.date_of_birth),
        other => panic!("unexpected employee sort field {}", other),
    }
}

fn sort_by<T>(rows: &mut [T], sort: &[SortClause], field_cmp: fn(&T, &T, &str) -> Ordering) {
    rows.sort_by(|a, b| {
        sort.iter()
            .map(|c| {
                let ord = field_cmp(a, b, &c.field);
                match c.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            })
            .find(|o| o.is_ne())
            .unwrap_or_else(|| field_cmp(a, b, "Id"))
    });
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl CompanyRepository for MemoryRepository {
    async fn list_companies(&self, query: &CompanyQuery) -> Result<PagedList<Company>, AppError> {
        let mut rows: Vec<Company> = self
            .companies
            .lock()
            .unwrap()
            .iter()
            .filter(|c| query.company_name.as_deref().map_or(true, |n| c.name == n))
            .filter(|c| {
                query.search_term.as_deref().map_or(true, |t| {
                    contains_ci(&c.name, t)
                        || c.introduction.as_deref().is_some_and(|i| contains_ci(i, t))
                })
            })
            .cloned()
            .collect();
        sort_by(&mut rows, &query.sort, compare_company);
        let total = rows.len() as u64;
        let offset = PagedList::<Company>::offset(query.page_number, query.page_size) as usize;
        let items = rows
            .into_iter()
            .skip(offset)
            .take(query.page_size as usize)
            .collect();
        Ok(PagedList::new(items, total, query.page_number, query.page_size))
    }

    async fn get_companies(&self, ids: &[Uuid]) -> Result<Vec<Company>, AppError> {
        Ok(self
            .companies
            .lock()
            .unwrap()
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn get_company(&self, id: Uuid) -> Result<Option<Company>, AppError> {
        Ok(self.companies.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn company_exists(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.companies.lock().unwrap().iter().any(|c| c.id == id))
    }

    async fn add_companies(&self, companies: &[NewCompany]) -> Result<(), AppError> {
        let mut stored = self.companies.lock().unwrap();
        let mut employees = self.employees.lock().unwrap();
        for (company, staff) in companies {
            stored.push(company.clone());
            employees.extend(staff.iter().cloned());
        }
        Ok(())
    }

    async fn delete_company(&self, id: Uuid) -> Result<bool, AppError> {
        let mut stored = self.companies.lock().unwrap();
        let before = stored.len();
        stored.retain(|c| c.id != id);
        self.employees.lock().unwrap().retain(|e| e.company_id != id);
        Ok(stored.len() != before)
    }

    async fn list_employees(
        &self,
        company_id: Uuid,
        query: &EmployeeQuery,
    ) -> Result<Vec<Employee>, AppError> {
        let mut rows: Vec<Employee> = self
            .employees
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.company_id == company_id)
            .filter(|e| query.gender.map_or(true, |g| e.gender == g))
            .filter(|e| {
                query.q.as_deref().map_or(true, |q| {
                    contains_ci(&e.employee_no, q)
                        || contains_ci(&e.first_name, q)
                        || contains_ci(&e.last_name, q)
                })
            })
            .cloned()
            .collect();
        sort_by(&mut rows, &query.sort, compare_employee);
        Ok(rows)
    }

    async fn get_employee(
        &self,
        company_id: Uuid,
        employee_id: Uuid,
    ) -> Result<Option<Employee>, AppError> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.company_id == company_id && e.id == employee_id)
            .cloned())
    }

    async fn add_employee(&self, employee: &Employee) -> Result<(), AppError> {
        self.employees.lock().unwrap().push(employee.clone());
        Ok(())
    }

    async fn update_employee(&self, employee: &Employee) -> Result<bool, AppError> {
        let mut employees = self.employees.lock().unwrap();
        match employees
            .iter_mut()
            .find(|e| e.company_id == employee.company_id && e.id == employee.id)
        {
            Some(slot) => {
                *slot = employee.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_employee(&self, company_id: Uuid, employee_id: Uuid) -> Result<bool, AppError> {
        let mut employees = self.employees.lock().unwrap();
        let before = employees.len();
        employees.retain(|e| !(e.company_id == company_id && e.id == employee_id));
        Ok(employees.len() != before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub fn test_app(repo: Arc<MemoryRepository>) -> Router {
    let state = AppState::new(repo, default_registry());
    app(state, CachePolicy::default(), 1024 * 1024)
}

pub fn seeded_app() -> (Router, Arc<MemoryRepository>) {
    let repo = Arc::new(MemoryRepository::seeded());
    (test_app(repo.clone()), repo)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_as(uri: &str, accept: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("accept", accept)
        .body(Body::empty())
        .unwrap()
}

pub fn with_json(method: &str, uri: &str, body: &Value) -> Request<Body> {
    with_body(method, uri, "application/json", body)
}

pub fn with_body(method: &str, uri: &str, content_type: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
