//! Employee handlers, nested under a company.

use super::companies::FieldsQuery;
use crate::error::AppError;
use crate::extractors::{AppJson, AppPath, AppQuery, MediaType, Negotiated};
use crate::links::employee_uri;
use crate::mapping::Shape;
use crate::model::{EmployeeAddDto, EmployeeDto, EmployeeParameters, EmployeeUpdateDto};
use crate::response::{created, negotiated};
use crate::service::RequestValidator;
use crate::shaping::{check_properties, shape, shape_all};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

async fn ensure_company(state: &AppState, company_id: Uuid) -> Result<(), AppError> {
    if state.repo.company_exists(company_id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("company {}", company_id)))
    }
}

fn not_found(employee_id: Uuid) -> AppError {
    AppError::NotFound(format!("employee {}", employee_id))
}

pub async fn list_employees(
    State(state): State<AppState>,
    Negotiated(media): Negotiated,
    AppPath(company_id): AppPath<Uuid>,
    AppQuery(params): AppQuery<EmployeeParameters>,
) -> Result<Response, AppError> {
    check_properties::<EmployeeDto>(params.fields())?;
    let table = state.mappings.resolve(Shape::EmployeeDto, Shape::Employee)?;
    let sort = table.translate(&params.order_by)?;
    let query = params.to_query(sort).map_err(AppError::BadRequest)?;

    ensure_company(&state, company_id).await?;
    let employees = state.repo.list_employees(company_id, &query).await?;
    let dtos: Vec<EmployeeDto> = employees.iter().map(EmployeeDto::from).collect();
    let body = shape_all(&dtos, params.fields())?;
    Ok(negotiated(StatusCode::OK, media, &body))
}

pub async fn get_employee(
    State(state): State<AppState>,
    Negotiated(media): Negotiated,
    AppPath((company_id, employee_id)): AppPath<(Uuid, Uuid)>,
    AppQuery(query): AppQuery<FieldsQuery>,
) -> Result<Response, AppError> {
    check_properties::<EmployeeDto>(query.fields())?;
    ensure_company(&state, company_id).await?;
    let employee = state
        .repo
        .get_employee(company_id, employee_id)
        .await?
        .ok_or_else(|| not_found(employee_id))?;
    let body = shape(&EmployeeDto::from(&employee), query.fields())?;
    Ok(negotiated(StatusCode::OK, media, &body))
}

pub async fn create_employee(
    State(state): State<AppState>,
    Negotiated(media): Negotiated,
    AppPath(company_id): AppPath<Uuid>,
    AppJson(body): AppJson<EmployeeAddDto>,
) -> Result<Response, AppError> {
    RequestValidator::validate_employee(&body)?;
    ensure_company(&state, company_id).await?;
    let employee = body.into_entity(company_id, Uuid::new_v4());
    state.repo.add_employee(&employee).await?;
    tracing::info!(company_id = %company_id, id = %employee.id, "employee created");
    Ok(created(
        &employee_uri(company_id, employee.id),
        media,
        &EmployeeDto::from(&employee),
    ))
}

/// Full replacement; creates the employee under the given id when it does not exist yet.
pub async fn update_employee(
    State(state): State<AppState>,
    Negotiated(media): Negotiated,
    AppPath((company_id, employee_id)): AppPath<(Uuid, Uuid)>,
    AppJson(body): AppJson<EmployeeUpdateDto>,
) -> Result<Response, AppError> {
    RequestValidator::validate_employee(&body)?;
    ensure_company(&state, company_id).await?;
    let exists = state.repo.get_employee(company_id, employee_id).await?.is_some();
    save(&state, media, body, company_id, employee_id, exists).await
}

/// RFC 6902 JSON Patch against the employee's update representation. Upserts like PUT.
pub async fn patch_employee(
    State(state): State<AppState>,
    Negotiated(media): Negotiated,
    AppPath((company_id, employee_id)): AppPath<(Uuid, Uuid)>,
    AppJson(patch): AppJson<json_patch::Patch>,
) -> Result<Response, AppError> {
    ensure_company(&state, company_id).await?;
    let existing = state.repo.get_employee(company_id, employee_id).await?;
    let base = existing
        .as_ref()
        .map(EmployeeUpdateDto::from)
        .unwrap_or_default();
    let mut doc = serde_json::to_value(&base)
        .map_err(|e| AppError::BadRequest(format!("cannot patch employee: {}", e)))?;
    json_patch::patch(&mut doc, &patch.0).map_err(|e| AppError::invalid("patch", e.to_string()))?;
    let patched: EmployeeUpdateDto =
        serde_json::from_value(doc).map_err(|e| AppError::invalid("patch", e.to_string()))?;
    RequestValidator::validate_employee(&patched)?;
    save(&state, media, patched, company_id, employee_id, existing.is_some()).await
}

async fn save(
    state: &AppState,
    media: MediaType,
    body: EmployeeUpdateDto,
    company_id: Uuid,
    employee_id: Uuid,
    exists: bool,
) -> Result<Response, AppError> {
    let employee = body.into_entity(company_id, employee_id);
    if exists {
        if !state.repo.update_employee(&employee).await? {
            return Err(not_found(employee_id));
        }
        tracing::info!(company_id = %company_id, id = %employee_id, "employee updated");
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    state.repo.add_employee(&employee).await?;
    tracing::info!(company_id = %company_id, id = %employee_id, "employee created by upsert");
    Ok(created(
        &employee_uri(company_id, employee_id),
        media,
        &EmployeeDto::from(&employee),
    ))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    AppPath((company_id, employee_id)): AppPath<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    ensure_company(&state, company_id).await?;
    if !state.repo.delete_employee(company_id, employee_id).await? {
        return Err(not_found(employee_id));
    }
    tracing::info!(company_id = %company_id, id = %employee_id, "employee deleted");
    Ok(StatusCode::NO_CONTENT)
}
