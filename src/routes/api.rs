//! Company and employee resource routes under `/api`.

use crate::cache::{cache_headers, CachePolicy};
use crate::handlers::companies::{
    companies_options, create_company, delete_company, get_company, list_companies,
};
use crate::handlers::company_collections::{create_company_collection, get_company_collection};
use crate::handlers::employees::{
    create_employee, delete_employee, get_employee, list_employees, patch_employee, update_employee,
};
use crate::state::AppState;
use axum::{middleware, routing::get, routing::post, Router};

pub fn api_routes(state: AppState, cache: CachePolicy) -> Router {
    Router::new()
        .route(
            "/api/companies",
            get(list_companies)
                .post(create_company)
                .options(companies_options),
        )
        .route(
            "/api/companies/:company_id",
            get(get_company).delete(delete_company),
        )
        .route("/api/companycollections", post(create_company_collection))
        .route("/api/companycollections/:ids", get(get_company_collection))
        .route(
            "/api/companies/:company_id/employees",
            get(list_employees).post(create_employee),
        )
        .route(
            "/api/companies/:company_id/employees/:employee_id",
            get(get_employee)
                .put(update_employee)
                .patch(patch_employee)
                .delete(delete_employee),
        )
        .layer(middleware::from_fn_with_state(cache, cache_headers))
        .with_state(state)
}
