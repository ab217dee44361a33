//! Company handlers: paged list, single read, create, delete and OPTIONS.

use crate::error::AppError;
use crate::extractors::{AppJson, AppPath, AppQuery, MediaType, Negotiated};
use crate::links::{companies_links, company_links, company_uri};
use crate::mapping::Shape;
use crate::model::{Company, CompanyAddDto, CompanyDto, CompanyFullDto, CompanyParameters};
use crate::response::{created, negotiated, LinkedCollection, PaginationMetadata, PAGINATION_HEADER};
use crate::service::RequestValidator;
use crate::shaping::{check_properties, includes_property, shape};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

/// `?fields=` on single-resource reads.
#[derive(Debug, Default, Deserialize)]
pub struct FieldsQuery {
    #[serde(default)]
    pub fields: Option<String>,
}

impl FieldsQuery {
    pub fn fields(&self) -> &str {
        self.fields.as_deref().unwrap_or("")
    }
}

fn company_shape(media: MediaType) -> Shape {
    if media.is_full() {
        Shape::CompanyFullDto
    } else {
        Shape::CompanyDto
    }
}

/// Field names must exist on the negotiated DTO, and links need the id.
fn check_company_fields(media: MediaType, fields: &str) -> Result<(), AppError> {
    if media.is_full() {
        check_properties::<CompanyFullDto>(fields)?;
    } else {
        check_properties::<CompanyDto>(fields)?;
    }
    if media.includes_links() && !includes_property(fields, "id") {
        return Err(AppError::BadRequest(
            "fields must include id when links are requested".into(),
        ));
    }
    Ok(())
}

/// Shaped company body; `links` adds the company's HATEOAS links.
pub(crate) fn represent(
    company: &Company,
    full: bool,
    links: bool,
    fields: &str,
) -> Result<Map<String, Value>, AppError> {
    let mut body = if full {
        shape(&CompanyFullDto::from(company), fields)?
    } else {
        shape(&CompanyDto::from(company), fields)?
    };
    if links {
        body.insert("links".into(), json!(company_links(company.id, fields)));
    }
    Ok(body)
}

pub async fn list_companies(
    State(state): State<AppState>,
    Negotiated(media): Negotiated,
    AppQuery(params): AppQuery<CompanyParameters>,
) -> Result<Response, AppError> {
    let fields = params.fields();
    check_company_fields(media, fields)?;
    let dto_shape = company_shape(media);
    let table = state.mappings.resolve(dto_shape, Shape::Company)?;
    let sort = table.translate(params.order_by(dto_shape))?;

    let page = state.repo.list_companies(&params.to_query(sort)).await?;
    let items = page
        .items
        .iter()
        .map(|c| represent(c, media.is_full(), media.includes_links(), fields))
        .collect::<Result<Vec<_>, _>>()?;

    let metadata = PaginationMetadata::for_page(&page, &params, !media.includes_links());
    let mut response = if media.includes_links() {
        let body = LinkedCollection {
            value: items,
            links: companies_links(&params, page.has_previous(), page.has_next()),
        };
        negotiated(StatusCode::OK, media, &body)
    } else {
        negotiated(StatusCode::OK, media, &items)
    };
    if let Some(v) = metadata.header_value() {
        response.headers_mut().insert(PAGINATION_HEADER, v);
    }
    Ok(response)
}

pub async fn get_company(
    State(state): State<AppState>,
    Negotiated(media): Negotiated,
    AppPath(company_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<FieldsQuery>,
) -> Result<Response, AppError> {
    let fields = query.fields();
    check_company_fields(media, fields)?;
    let company = state
        .repo
        .get_company(company_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("company {}", company_id)))?;
    let body = represent(&company, media.is_full(), media.includes_links(), fields)?;
    Ok(negotiated(StatusCode::OK, media, &body))
}

pub async fn create_company(
    State(state): State<AppState>,
    Negotiated(media): Negotiated,
    AppJson(body): AppJson<CompanyAddDto>,
) -> Result<Response, AppError> {
    RequestValidator::validate_company(&body)?;
    let new_company = body.into_entities();
    state.repo.add_company(&new_company).await?;
    let company = &new_company.0;
    tracing::info!(id = %company.id, employees = new_company.1.len(), "company created");
    let body = represent(company, media.is_full(), true, "")?;
    Ok(created(&company_uri(company.id), media, &body))
}

pub async fn delete_company(
    State(state): State<AppState>,
    AppPath(company_id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.repo.delete_company(company_id).await? {
        return Err(AppError::NotFound(format!("company {}", company_id)));
    }
    tracing::info!(id = %company_id, "company deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn companies_options() -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, "GET,POST,OPTIONS")])
}
