//! HTTP handlers for companies, company collections and employees.

pub mod companies;
pub mod company_collections;
pub mod employees;
