//! Client-facing representations (camelCase JSON) and their entity conversions.

use super::entities::{Company, Employee, Gender};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Friendly company representation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    pub id: Uuid,
    pub company_name: String,
    pub introduction: Option<String>,
}

impl From<&Company> for CompanyDto {
    fn from(c: &Company) -> Self {
        CompanyDto {
            id: c.id,
            company_name: c.name.clone(),
            introduction: c.introduction.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyFullDto {
    pub id: Uuid,
    pub name: String,
    pub country: Option<String>,
    pub industry: Option<String>,
    pub product: Option<String>,
    pub introduction: Option<String>,
}

impl From<&Company> for CompanyFullDto {
    fn from(c: &Company) -> Self {
        CompanyFullDto {
            id: c.id,
            name: c.name.clone(),
            country: c.country.clone(),
            industry: c.industry.clone(),
            product: c.product.clone(),
            introduction: c.introduction.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyAddDto {
    pub name: String,
    pub introduction: Option<String>,
    pub country: Option<String>,
    pub industry: Option<String>,
    pub product: Option<String>,
    pub employees: Vec<EmployeeAddDto>,
}

impl CompanyAddDto {
    /// New company row plus its employee rows, with fresh ids.
    pub fn into_entities(self) -> (Company, Vec<Employee>) {
        let company = Company {
            id: Uuid::new_v4(),
            name: self.name,
            introduction: self.introduction,
            country: self.country,
            industry: self.industry,
            product: self.product,
        };
        let employees = self
            .employees
            .into_iter()
            .map(|e| e.into_entity(company.id, Uuid::new_v4()))
            .collect();
        (company, employees)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: Uuid,
    pub company_id: Uuid,
    pub employee_no: String,
    pub name: String,
    pub gender_display: String,
    pub age: i32,
}

impl EmployeeDto {
    /// Age is the difference in calendar years, as of `today`.
    pub fn from_entity(e: &Employee, today: NaiveDate) -> Self {
        EmployeeDto {
            id: e.id,
            company_id: e.company_id,
            employee_no: e.employee_no.clone(),
            name: format!("{} {}", e.first_name, e.last_name),
            gender_display: e.gender.to_string(),
            age: today.year() - e.date_of_birth.year(),
        }
    }
}

impl From<&Employee> for EmployeeDto {
    fn from(e: &Employee) -> Self {
        EmployeeDto::from_entity(e, Utc::now().date_naive())
    }
}

/// Body for creating or fully replacing an employee.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeAddDto {
    pub employee_no: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDateTime,
}

pub type EmployeeUpdateDto = EmployeeAddDto;

impl EmployeeAddDto {
    pub fn into_entity(self, company_id: Uuid, id: Uuid) -> Employee {
        Employee {
            id,
            company_id,
            employee_no: self.employee_no,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            date_of_birth: self.date_of_birth,
        }
    }
}

impl From<&Employee> for EmployeeAddDto {
    fn from(e: &Employee) -> Self {
        EmployeeAddDto {
            employee_no: e.employee_no.clone(),
            first_name: e.first_name.clone(),
            last_name: e.last_name.clone(),
            gender: e.gender,
            date_of_birth: e.date_of_birth,
        }
    }
}
