//! Request body validation for company and employee writes.

use crate::error::{AppError, FieldErrors};
use crate::model::{CompanyAddDto, EmployeeAddDto};

pub struct RequestValidator;

#[derive(Default)]
struct Collector {
    errors: FieldErrors,
}

impl Collector {
    fn push(&mut self, field: String, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    fn required(&mut self, field: &str, value: &str, max: usize) {
        if value.trim().is_empty() {
            self.push(field.to_string(), format!("{} is required", field));
        } else {
            self.max_length(field, value, max);
        }
    }

    fn max_length(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.push(
                field.to_string(),
                format!("{} must be at most {} characters", field, max),
            );
        }
    }

    fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

impl RequestValidator {
    pub fn validate_company(body: &CompanyAddDto) -> Result<(), AppError> {
        let mut c = Collector::default();
        c.required("name", &body.name, 100);
        if let Some(intro) = &body.introduction {
            c.max_length("introduction", intro, 500);
        }
        for (i, e) in body.employees.iter().enumerate() {
            employee_rules(&mut c, &format!("employees[{}].", i), e);
        }
        c.finish()
    }

    pub fn validate_companies(bodies: &[CompanyAddDto]) -> Result<(), AppError> {
        let mut errors = FieldErrors::new();
        for (i, body) in bodies.iter().enumerate() {
            if let Err(AppError::Validation(found)) = Self::validate_company(body) {
                for (field, messages) in found {
                    errors.insert(format!("[{}].{}", i, field), messages);
                }
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }

    /// Same rules for add, full update and the result of a JSON Patch.
    pub fn validate_employee(body: &EmployeeAddDto) -> Result<(), AppError> {
        let mut c = Collector::default();
        employee_rules(&mut c, "", body);
        c.finish()
    }
}

fn employee_rules(c: &mut Collector, prefix: &str, e: &EmployeeAddDto) {
    c.required(&format!("{}employeeNo", prefix), &e.employee_no, 10);
    c.required(&format!("{}firstName", prefix), &e.first_name, 50);
    c.required(&format!("{}lastName", prefix), &e.last_name, 50);
    if !e.employee_no.is_empty() && e.employee_no == e.first_name {
        c.push(
            format!("{}employeeNo", prefix),
            "employeeNo must differ from firstName",
        );
    }
    if !e.first_name.is_empty() && e.first_name == e.last_name {
        c.push(
            format!("{}lastName", prefix),
            "lastName must differ from firstName",
        );
    }
}
