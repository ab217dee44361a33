use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Logical type on one side of a mapping: a client-facing DTO or a storage entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    CompanyDto,
    CompanyFullDto,
    Company,
    EmployeeDto,
    Employee,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::CompanyDto => "CompanyDto",
            Shape::CompanyFullDto => "CompanyFullDto",
            Shape::Company => "Company",
            Shape::EmployeeDto => "EmployeeDto",
            Shape::Employee => "Employee",
        };
        f.write_str(name)
    }
}

/// Registry key: the pair of shapes a table translates between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShapePair {
    pub source: Shape,
    pub destination: Shape,
}

impl ShapePair {
    pub const fn new(source: Shape, destination: Shape) -> Self {
        ShapePair { source, destination }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Registry misconfiguration: zero or several tables for one pair.
    #[error("no unique sort mapping for {source_shape} -> {destination_shape} ({matches} registered)")]
    AmbiguousOrMissing {
        source_shape: Shape,
        destination_shape: Shape,
        matches: usize,
    },
    #[error("unknown sort field: {0}")]
    UnknownSortField(String),
    #[error("invalid sort token: '{0}' (expected 'field', 'field asc' or 'field desc')")]
    InvalidSortToken(String),
}

/// One client-visible sortable field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingEntry {
    destination_fields: Vec<String>,
    revert: bool,
}

impl MappingEntry {
    pub fn new<I, S>(destination_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MappingEntry {
            destination_fields: destination_fields.into_iter().map(Into::into).collect(),
            revert: false,
        }
    }

    /// Entry whose sort direction is inverted relative to its destination fields
    /// (e.g. `Age` against `DateOfBirth`).
    pub fn reverted<I, S>(destination_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MappingEntry {
            revert: true,
            ..MappingEntry::new(destination_fields)
        }
    }

    pub fn destination_fields(&self) -> &[String] {
        &self.destination_fields
    }

    pub fn revert(&self) -> bool {
        self.revert
    }
}

/// Client field name (case-insensitive) to [`MappingEntry`]. Immutable once built.
#[derive(Clone, Debug, Default)]
pub struct MappingTable {
    /// Keyed by lowercased field name.
    entries: HashMap<String, MappingEntry>,
}

impl MappingTable {
    pub fn new() -> Self {
        MappingTable::default()
    }

    /// Builder-style insert. A later entry with the same name (ignoring case) replaces the earlier one.
    pub fn with(mut self, field: impl Into<String>, entry: MappingEntry) -> Self {
        self.entries.insert(field.into().to_lowercase(), entry);
        self
    }

    pub fn get(&self, field: &str) -> Option<&MappingEntry> {
        self.entries.get(&field.to_lowercase())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }
}

impl<K: Into<String>> FromIterator<(K, MappingEntry)> for MappingTable {
    fn from_iter<T: IntoIterator<Item = (K, MappingEntry)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(MappingTable::new(), |table, (field, entry)| table.with(field, entry))
    }
}

/// All mapping tables, each tagged by the shape pair it serves.
#[derive(Clone, Debug, Default)]
pub struct MappingRegistry {
    tables: Vec<(ShapePair, MappingTable)>,
}

impl MappingRegistry {
    pub fn new() -> Self {
        MappingRegistry::default()
    }

    /// Adds a table for the pair. Called during initialization only; duplicates are
    /// not rejected here but make [`resolve`](Self::resolve) fail for that pair.
    pub fn register_mapping(&mut self, source: Shape, destination: Shape, table: MappingTable) {
        self.tables.push((ShapePair::new(source, destination), table));
    }

    /// Returns the table for the pair. Fails unless exactly one is registered.
    pub fn resolve(&self, source: Shape, destination: Shape) -> Result<&MappingTable, MappingError> {
        let pair = ShapePair::new(source, destination);
        let mut matching = self.tables.iter().filter(|(p, _)| *p == pair).map(|(_, t)| t);
        match (matching.next(), matching.next()) {
            (Some(table), None) => Ok(table),
            (first, _) => Err(MappingError::AmbiguousOrMissing {
                source_shape: source,
                destination_shape: destination,
                matches: first.map_or(0, |_| 2 + matching.count()),
            }),
        }
    }

    /// Start-up check that every pair resolves to exactly one table.
    pub fn ensure_resolvable(&self, pairs: &[ShapePair]) -> Result<(), MappingError> {
        for pair in pairs {
            self.resolve(pair.source, pair.destination)?;
        }
        Ok(())
    }
}
