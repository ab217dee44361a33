//! Identifier case conversion between mapping field names and storage columns.

/// Convert a PascalCase or camelCase identifier to snake_case.
/// e.g. "DateOfBirth" -> "date_of_birth", "companyId" -> "company_id"
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
