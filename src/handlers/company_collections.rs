//! Company collections: fetch several companies by id, or create several at once.

use super::companies::represent;
use crate::error::AppError;
use crate::extractors::{AppJson, AppPath, Negotiated};
use crate::model::{Company, CompanyAddDto};
use crate::response::{created, negotiated};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
};
use std::collections::HashMap;
use uuid::Uuid;

pub const COMPANY_COLLECTIONS_PATH: &str = "/api/companycollections";

/// Parse `(id1,id2,...)`; the parentheses are optional.
pub fn parse_id_list(raw: &str) -> Result<Vec<Uuid>, AppError> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(trimmed);
    let ids = inner
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            Uuid::parse_str(s).map_err(|_| AppError::BadRequest(format!("invalid company id: {}", s)))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if ids.is_empty() {
        return Err(AppError::BadRequest("at least one company id is required".into()));
    }
    Ok(ids)
}

pub fn collection_uri(ids: &[Uuid]) -> String {
    let joined: Vec<String> = ids.iter().map(Uuid::to_string).collect();
    format!("{}/({})", COMPANY_COLLECTIONS_PATH, joined.join(","))
}

/// All requested companies, in request order; 404 if any is missing.
pub async fn get_company_collection(
    State(state): State<AppState>,
    Negotiated(media): Negotiated,
    AppPath(raw_ids): AppPath<String>,
) -> Result<Response, AppError> {
    let ids = parse_id_list(&raw_ids)?;
    let by_id: HashMap<Uuid, Company> = state
        .repo
        .get_companies(&ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();
    let body = ids
        .iter()
        .map(|id| {
            let company = by_id
                .get(id)
                .ok_or_else(|| AppError::NotFound(format!("company {}", id)))?;
            represent(company, media.is_full(), false, "")
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(negotiated(StatusCode::OK, media, &body))
}

pub async fn create_company_collection(
    State(state): State<AppState>,
    Negotiated(media): Negotiated,
    AppJson(bodies): AppJson<Vec<CompanyAddDto>>,
) -> Result<Response, AppError> {
    if bodies.is_empty() {
        return Err(AppError::BadRequest("body must contain at least one company".into()));
    }
    RequestValidator::validate_companies(&bodies)?;
    let new_companies: Vec<_> = bodies.into_iter().map(CompanyAddDto::into_entities).collect();
    state.repo.add_companies(&new_companies).await?;
    let ids: Vec<Uuid> = new_companies.iter().map(|(c, _)| c.id).collect();
    tracing::info!(count = ids.len(), "company collection created");
    let body = new_companies
        .iter()
        .map(|(c, _)| represent(c, media.is_full(), false, ""))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(created(&collection_uri(&ids), media, &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_list_accepts_parentheses_and_spaces() {
        let ids = parse_id_list(
            "(bbdee09c-089b-4d30-bece-44df5923716c, 6fb600c1-9011-4fd7-9234-881379716440)",
        )
        .unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(
            collection_uri(&ids),
            "/api/companycollections/(bbdee09c-089b-4d30-bece-44df5923716c,6fb600c1-9011-4fd7-9234-881379716440)"
        );
    }

    #[test]
    fn id_list_rejects_garbage_and_empty() {
        assert!(matches!(parse_id_list("(nope)"), Err(AppError::BadRequest(_))));
        assert!(matches!(parse_id_list("()"), Err(AppError::BadRequest(_))));
    }
}
