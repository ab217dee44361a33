//! Storage seam between HTTP handlers and the database.

mod postgres;

pub use postgres::PgCompanyRepository;

use crate::error::AppError;
use crate::model::{Company, CompanyQuery, Employee, EmployeeQuery, PagedList};
use async_trait::async_trait;
use uuid::Uuid;

/// A new company together with the employees created alongside it.
pub type NewCompany = (Company, Vec<Employee>);

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// One page of companies; `query.sort` is already translated to storage fields.
    async fn list_companies(&self, query: &CompanyQuery) -> Result<PagedList<Company>, AppError>;

    /// Companies with the given ids. Missing ids are simply absent from the result.
    async fn get_companies(&self, ids: &[Uuid]) -> Result<Vec<Company>, AppError>;

    async fn get_company(&self, id: Uuid) -> Result<Option<Company>, AppError>;

    async fn company_exists(&self, id: Uuid) -> Result<bool, AppError>;

    /// Insert all companies and their employees atomically.
    async fn add_companies(&self, companies: &[NewCompany]) -> Result<(), AppError>;

    async fn add_company(&self, company: &NewCompany) -> Result<(), AppError> {
        self.add_companies(std::slice::from_ref(company)).await
    }

    /// Removes the company and its employees. Returns false when it did not exist.
    async fn delete_company(&self, id: Uuid) -> Result<bool, AppError>;

    async fn list_employees(
        &self,
        company_id: Uuid,
        query: &EmployeeQuery,
    ) -> Result<Vec<Employee>, AppError>;

    async fn get_employee(
        &self,
        company_id: Uuid,
        employee_id: Uuid,
    ) -> Result<Option<Employee>, AppError>;

    async fn add_employee(&self, employee: &Employee) -> Result<(), AppError>;

    /// Overwrites every column but the keys. Returns false when no row matched.
    async fn update_employee(&self, employee: &Employee) -> Result<bool, AppError>;

    async fn delete_employee(&self, company_id: Uuid, employee_id: Uuid) -> Result<bool, AppError>;

    /// Storage liveness check behind `/ready`.
    async fn ping(&self) -> Result<(), AppError>;
}
