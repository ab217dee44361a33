//! Data shaping for `?fields=`: keep only the requested DTO properties.

use crate::error::AppError;
use crate::model::{CompanyDto, CompanyFullDto, EmployeeDto};
use serde::Serialize;
use serde_json::{Map, Value};

/// A DTO whose serialized properties can be selected by name.
pub trait Shapeable: Serialize {
    /// Serialized (camelCase) property names, in declaration order.
    const PROPERTIES: &'static [&'static str];
}

impl Shapeable for CompanyDto {
    const PROPERTIES: &'static [&'static str] = &["id", "companyName", "introduction"];
}

impl Shapeable for CompanyFullDto {
    const PROPERTIES: &'static [&'static str] =
        &["id", "name", "country", "industry", "product", "introduction"];
}

impl Shapeable for EmployeeDto {
    const PROPERTIES: &'static [&'static str] =
        &["id", "companyId", "employeeNo", "name", "genderDisplay", "age"];
}

fn requested(fields: &str) -> impl Iterator<Item = &str> {
    fields.split(',').map(str::trim).filter(|f| !f.is_empty())
}

fn canonical<T: Shapeable>(field: &str) -> Option<&'static str> {
    T::PROPERTIES
        .iter()
        .copied()
        .find(|p| p.eq_ignore_ascii_case(field))
}

/// Reject any requested field `T` does not have. Blank `fields` is always valid.
pub fn check_properties<T: Shapeable>(fields: &str) -> Result<(), AppError> {
    for field in requested(fields) {
        if canonical::<T>(field).is_none() {
            return Err(AppError::BadRequest(format!("unknown field: {}", field)));
        }
    }
    Ok(())
}

/// Whether the (possibly blank) field list includes `property`.
pub fn includes_property(fields: &str, property: &str) -> bool {
    let mut fields = requested(fields).peekable();
    fields.peek().is_none() || fields.any(|f| f.eq_ignore_ascii_case(property))
}

/// Serialize `dto` and keep the requested properties in request order.
pub fn shape<T: Shapeable>(dto: &T, fields: &str) -> Result<Map<String, Value>, AppError> {
    let Value::Object(mut full) = serde_json::to_value(dto)
        .map_err(|e| AppError::BadRequest(format!("cannot shape response: {}", e)))?
    else {
        return Err(AppError::BadRequest("cannot shape a non-object response".into()));
    };
    let mut names = requested(fields).peekable();
    if names.peek().is_none() {
        return Ok(full);
    }
    let mut shaped = Map::new();
    for field in names {
        let name = canonical::<T>(field)
            .ok_or_else(|| AppError::BadRequest(format!("unknown field: {}", field)))?;
        if let Some(v) = full.remove(name) {
            shaped.insert(name.to_string(), v);
        }
    }
    Ok(shaped)
}

pub fn shape_all<T: Shapeable>(dtos: &[T], fields: &str) -> Result<Vec<Map<String, Value>>, AppError> {
    dtos.iter().map(|d| shape(d, fields)).collect()
}
