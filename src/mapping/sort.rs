use super::registry::{MappingError, MappingTable};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A client-supplied field name plus requested direction, as parsed from `orderBy`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortToken {
    pub field: String,
    pub direction: SortDirection,
}

/// One storage-level sort clause: destination field and effective direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortClause {
    pub field: String,
    pub direction: SortDirection,
}

impl fmt::Display for SortClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction)
    }
}

/// Parse `"name, id desc"` into tokens. Empty segments are skipped.
pub fn parse_order_by(raw: &str) -> Result<Vec<SortToken>, MappingError> {
    let mut tokens = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (field, suffix) = match part.split_once(char::is_whitespace) {
            Some((field, rest)) => (field, rest.trim()),
            None => (part, ""),
        };
        let direction = if suffix.is_empty() || suffix.eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else if suffix.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            return Err(MappingError::InvalidSortToken(part.to_string()));
        };
        tokens.push(SortToken {
            field: field.to_string(),
            direction,
        });
    }
    Ok(tokens)
}

impl MappingTable {
    /// Check that every field named in `order_by` is sortable, without expanding it.
    pub fn validate(&self, order_by: &str) -> Result<(), MappingError> {
        for token in parse_order_by(order_by)? {
            if !self.contains(&token.field) {
                return Err(MappingError::UnknownSortField(token.field));
            }
        }
        Ok(())
    }

    /// Expand `order_by` into storage sort clauses, in request order. Multi-field entries
    /// yield one clause per destination field; reverted entries flip the direction.
    pub fn translate(&self, order_by: &str) -> Result<Vec<SortClause>, MappingError> {
        let mut clauses = Vec::new();
        for token in parse_order_by(order_by)? {
            let entry = self
                .get(&token.field)
                .ok_or_else(|| MappingError::UnknownSortField(token.field.clone()))?;
            let direction = if entry.revert() {
                token.direction.reversed()
            } else {
                token.direction
            };
            clauses.extend(entry.destination_fields().iter().map(|field| SortClause {
                field: field.clone(),
                direction,
            }));
        }
        Ok(clauses)
    }
}
