use super::registry::{MappingEntry, MappingRegistry, MappingTable, Shape, ShapePair};

/// Pairs the HTTP handlers resolve; checked at start-up.
pub const REQUIRED_PAIRS: &[ShapePair] = &[
    ShapePair::new(Shape::EmployeeDto, Shape::Employee),
    ShapePair::new(Shape::CompanyDto, Shape::Company),
    ShapePair::new(Shape::CompanyFullDto, Shape::Company),
];

fn employee_mapping() -> MappingTable {
    MappingTable::new()
        .with("Id", MappingEntry::new(["Id"]))
        .with("CompanyId", MappingEntry::new(["CompanyId"]))
        .with("EmployeeNo", MappingEntry::new(["EmployeeNo"]))
        .with("Name", MappingEntry::new(["FirstName", "LastName"]))
        .with("GenderDisplay", MappingEntry::new(["Gender"]))
        // age grows as date of birth decreases
        .with("Age", MappingEntry::reverted(["DateOfBirth"]))
}

fn company_mapping() -> MappingTable {
    MappingTable::new()
        .with("Id", MappingEntry::new(["Id"]))
        .with("CompanyName", MappingEntry::new(["Name"]))
        .with("Introduction", MappingEntry::new(["Introduction"]))
}

fn company_full_mapping() -> MappingTable {
    ["Id", "Name", "Country", "Industry", "Product", "Introduction"]
        .into_iter()
        .map(|f| (f, MappingEntry::new([f])))
        .collect()
}

/// The registry served by the API.
pub fn default_registry() -> MappingRegistry {
    let mut registry = MappingRegistry::new();
    registry.register_mapping(Shape::EmployeeDto, Shape::Employee, employee_mapping());
    registry.register_mapping(Shape::CompanyDto, Shape::Company, company_mapping());
    registry.register_mapping(Shape::CompanyFullDto, Shape::Company, company_full_mapping());
    registry
}
