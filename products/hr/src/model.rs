use std::borrow::Cow;

use chrono::{NaiveDate, Utc};
use entity::employees;
use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{ColumnTrait, Condition, Order};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::error::{HrError, HrResult};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;
pub const MIN_SALARY: i64 = 40_000;

static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(\d{3}\) \d{3}-\d{4}$").expect("phone pattern compiles"));

/// Create/update payload. Every field is optional so the same type serves
/// partial updates; creation enforces presence separately.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    #[validate(length(min = 2, max = 20, message = "First name must be between 2 and 20 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 2, max = 20, message = "Last name must be between 2 and 20 characters"))]
    pub last_name: Option<String>,
    #[validate(
        email(message = "Email should be valid"),
        length(max = 50, message = "Email must not exceed 50 characters")
    )]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    #[schema(example = "(555) 123-4567")]
    pub phone_number: Option<String>,
    #[validate(length(min = 2, max = 50, message = "Department must be between 2 and 50 characters"))]
    pub department: Option<String>,
    #[validate(length(min = 5, max = 50, message = "Position must be at least 5 characters long"))]
    pub position: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: Option<String>,
    #[validate(range(min = 40000, message = "Salary must be at least 40000"))]
    pub salary: Option<i64>,
    #[validate(custom(function = "validate_hire_date"))]
    pub hire_date: Option<NaiveDate>,
    pub performance_review: Option<String>,
    pub skills: Option<String>,
    pub active: Option<bool>,
}

fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if PHONE_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("phone_format")
            .with_message(Cow::Borrowed("Phone number must be in format (XXX) XXX-XXXX")))
    }
}

fn validate_hire_date(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value <= Utc::now().date_naive() {
        Ok(())
    } else {
        Err(ValidationError::new("past_or_present")
            .with_message(Cow::Borrowed("Hire date must be in the past or present")))
    }
}

/// Fields a creation request must carry, fully resolved.
#[derive(Clone, Debug)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub department: String,
    pub position: String,
    pub password: String,
    pub salary: i64,
    pub hire_date: NaiveDate,
    pub performance_review: Option<String>,
    pub skills: Option<String>,
    pub active: bool,
}

impl EmployeeRequest {
    /// Validates field constraints and resolves the required creation fields.
    pub fn into_new_employee(self) -> HrResult<NewEmployee> {
        self.validate()?;
        let mut missing = Vec::new();
        if self.first_name.is_none() {
            missing.push("firstName");
        }
        if self.last_name.is_none() {
            missing.push("lastName");
        }
        if self.email.is_none() {
            missing.push("email");
        }
        if self.phone_number.is_none() {
            missing.push("phoneNumber");
        }
        if self.department.is_none() {
            missing.push("department");
        }
        if self.position.is_none() {
            missing.push("position");
        }
        if self.password.is_none() {
            missing.push("password");
        }
        if self.salary.is_none() {
            missing.push("salary");
        }
        if self.hire_date.is_none() {
            missing.push("hireDate");
        }
        let (
            Some(first_name),
            Some(last_name),
            Some(email),
            Some(phone_number),
            Some(department),
            Some(position),
            Some(password),
            Some(salary),
            Some(hire_date),
        ) = (
            self.first_name,
            self.last_name,
            self.email,
            self.phone_number,
            self.department,
            self.position,
            self.password,
            self.salary,
            self.hire_date,
        )
        else {
            return Err(HrError::missing_fields(&missing));
        };
        Ok(NewEmployee {
            first_name,
            last_name,
            email: email.trim().to_lowercase(),
            phone_number,
            department,
            position,
            password,
            salary,
            hire_date,
            performance_review: self.performance_review,
            skills: self.skills,
            active: self.active.unwrap_or(true),
        })
    }
}

/// Public view of an employee record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    #[schema(example = "EMP-1A2B3C4D")]
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub department: String,
    pub position: String,
    pub salary: i64,
    pub hire_date: NaiveDate,
    pub performance_review: Option<String>,
    pub skills: Option<String>,
    pub active: bool,
}

impl From<employees::Model> for EmployeeResponse {
    fn from(model: employees::Model) -> Self {
        Self {
            employee_id: model.employee_id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            phone_number: model.phone_number,
            department: model.department,
            position: model.position,
            salary: model.salary,
            hire_date: model.hire_date,
            performance_review: model.performance_review,
            skills: model.skills,
            active: model.active,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SortField {
    FirstName,
    LastName,
    Email,
    Department,
    Position,
    Salary,
    HireDate,
}

impl SortField {
    /// Accepts `firstName`, `first_name` and the legacy `employee.firstName`.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let bare = trimmed.strip_prefix("employee.").unwrap_or(trimmed);
        match bare.replace('_', "").to_ascii_lowercase().as_str() {
            "firstname" => Some(SortField::FirstName),
            "lastname" => Some(SortField::LastName),
            "email" => Some(SortField::Email),
            "department" => Some(SortField::Department),
            "position" => Some(SortField::Position),
            "salary" => Some(SortField::Salary),
            "hiredate" => Some(SortField::HireDate),
            _ => None,
        }
    }

    pub fn column(self) -> employees::Column {
        match self {
            SortField::FirstName => employees::Column::FirstName,
            SortField::LastName => employees::Column::LastName,
            SortField::Email => employees::Column::Email,
            SortField::Department => employees::Column::Department,
            SortField::Position => employees::Column::Position,
            SortField::Salary => employees::Column::Salary,
            SortField::HireDate => employees::Column::HireDate,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Direction::Asc),
            "desc" => Some(Direction::Desc),
            _ => None,
        }
    }

    pub fn order(self) -> Order {
        match self {
            Direction::Asc => Order::Asc,
            Direction::Desc => Order::Desc,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort_by: SortField,
    pub direction: Direction,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort_by: SortField::FirstName,
            direction: Direction::Asc,
        }
    }
}

impl PageRequest {
    pub fn parse(
        page: Option<i64>,
        size: Option<i64>,
        sort_by: Option<&str>,
        direction: Option<&str>,
    ) -> HrResult<Self> {
        let defaults = Self::default();
        let page = match page {
            None => defaults.page,
            Some(value) if value >= 0 => value as u64,
            Some(value) => {
                return Err(HrError::BadRequest(format!(
                    "page must not be negative, got {value}"
                )));
            }
        };
        let size = match size {
            None => defaults.size,
            Some(value) if (1..=MAX_PAGE_SIZE as i64).contains(&value) => value as u64,
            Some(value) => {
                return Err(HrError::BadRequest(format!(
                    "size must be between 1 and {MAX_PAGE_SIZE}, got {value}"
                )));
            }
        };
        if page
            .checked_mul(size)
            .is_none_or(|offset| offset > i64::MAX as u64)
        {
            return Err(HrError::BadRequest(format!(
                "page {page} is out of range for size {size}"
            )));
        }
        let sort_by = match sort_by {
            None => defaults.sort_by,
            Some(raw) => SortField::parse(raw)
                .ok_or_else(|| HrError::BadRequest(format!("Unknown sort field: {raw}")))?,
        };
        let direction = match direction {
            None => defaults.direction,
            Some(raw) => Direction::parse(raw)
                .ok_or_else(|| HrError::BadRequest(format!("Unknown sort direction: {raw}")))?,
        };
        Ok(Self {
            page,
            size,
            sort_by,
            direction,
        })
    }
}

/// One page of employees plus the paging envelope the listing endpoint returns.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePage {
    pub employees: Vec<EmployeeResponse>,
    pub current_page: u64,
    pub total_pages: u64,
    pub total_elements: u64,
    pub size: u64,
    pub number_of_elements: u64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl EmployeePage {
    pub fn new(
        employees: Vec<EmployeeResponse>,
        request: &PageRequest,
        total_elements: u64,
        total_pages: u64,
    ) -> Self {
        let number_of_elements = employees.len() as u64;
        Self {
            current_page: request.page,
            total_pages,
            total_elements,
            size: request.size,
            number_of_elements,
            first: request.page == 0,
            last: request.page + 1 >= total_pages,
            empty: employees.is_empty(),
            employees,
        }
    }
}

/// Optional search criteria combined with AND. `min_salary` is inclusive.
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeFilter {
    pub department: Option<String>,
    pub position: Option<String>,
    #[serde(rename = "salary")]
    pub min_salary: Option<i64>,
}

impl EmployeeFilter {
    pub fn condition(&self) -> Condition {
        Condition::all()
            .add_option(
                non_blank(&self.department).map(|value| employees::Column::Department.eq(value)),
            )
            .add_option(non_blank(&self.position).map(|value| employees::Column::Position.eq(value)))
            .add_option(
                self.min_salary
                    .map(|salary| employees::Column::Salary.gte(salary)),
            )
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn complete_request() -> EmployeeRequest {
        EmployeeRequest {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            email: Some("Ada.Lovelace@Example.com".into()),
            phone_number: Some("(555) 123-4567".into()),
            department: Some("Engineering".into()),
            position: Some("Software Engineer".into()),
            password: Some("Str0ng!Pass".into()),
            salary: Some(95_000),
            hire_date: NaiveDate::from_ymd_opt(2020, 5, 17),
            performance_review: None,
            skills: Some("Rust, SQL".into()),
            active: None,
        }
    }

    #[test]
    fn complete_request_resolves_and_normalizes_email() {
        let new = complete_request().into_new_employee().unwrap();
        assert_eq!(new.email, "ada.lovelace@example.com");
        assert!(new.active);
    }

    #[test]
    fn phone_must_match_pattern() {
        let request = EmployeeRequest {
            phone_number: Some("555-123-4567".into()),
            ..complete_request()
        };
        let HrError::Validation(fields) = request.into_new_employee().unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(
            fields["phoneNumber"],
            "Phone number must be in format (XXX) XXX-XXXX"
        );
    }

    #[test]
    fn future_hire_date_and_low_salary_are_rejected() {
        let request = EmployeeRequest {
            hire_date: Some(Utc::now().date_naive() + Duration::days(3)),
            salary: Some(10_000),
            ..complete_request()
        };
        let HrError::Validation(fields) = request.into_new_employee().unwrap_err() else {
            panic!("expected validation error");
        };
        assert!(fields.contains_key("hireDate"));
        assert_eq!(fields["salary"], "Salary must be at least 40000");
    }

    #[test]
    fn missing_fields_are_reported_by_wire_name() {
        let request = EmployeeRequest {
            email: None,
            hire_date: None,
            ..complete_request()
        };
        let HrError::Validation(fields) = request.into_new_employee().unwrap_err() else {
            panic!("expected validation error");
        };
        assert_eq!(
            fields.keys().cloned().collect::<Vec<_>>(),
            vec!["email".to_string(), "hireDate".to_string()]
        );
    }

    #[test]
    fn partial_request_passes_field_validation() {
        let request = EmployeeRequest {
            position: Some("Data Analyst".into()),
            ..EmployeeRequest::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn page_request_defaults_and_legacy_sort_names() {
        assert_eq!(
            PageRequest::parse(None, None, None, None).unwrap(),
            PageRequest::default()
        );
        let parsed =
            PageRequest::parse(Some(2), Some(25), Some("employee.hireDate"), Some("DESC")).unwrap();
        assert_eq!(parsed.sort_by, SortField::HireDate);
        assert_eq!(parsed.direction, Direction::Desc);
        assert_eq!(parsed.size, 25);
    }

    #[test]
    fn page_request_rejects_out_of_range_values() {
        assert!(PageRequest::parse(Some(-1), None, None, None).is_err());
        assert!(PageRequest::parse(None, Some(0), None, None).is_err());
        assert!(PageRequest::parse(None, Some(101), None, None).is_err());
        assert!(PageRequest::parse(None, None, Some("password"), None).is_err());
        assert!(PageRequest::parse(None, None, None, Some("sideways")).is_err());
    }

    #[test]
    fn page_offset_must_fit_in_a_signed_64_bit_integer() {
        assert!(matches!(
            PageRequest::parse(Some(i64::MAX), Some(100), None, None),
            Err(HrError::BadRequest(msg)) if msg.contains("out of range")
        ));
        assert!(PageRequest::parse(Some(i64::MAX / 100), Some(100), None, None).is_ok());
        assert!(PageRequest::parse(Some(i64::MAX / 100 + 1), Some(100), None, None).is_err());
    }

    #[test]
    fn page_envelope_flags() {
        let request = PageRequest {
            page: 1,
            size: 10,
            ..PageRequest::default()
        };
        let page = EmployeePage::new(Vec::new(), &request, 15, 2);
        assert!(!page.first);
        assert!(page.last);
        assert!(page.empty);
        assert_eq!(page.number_of_elements, 0);

        let empty = EmployeePage::new(Vec::new(), &PageRequest::default(), 0, 0);
        assert!(empty.first && empty.last && empty.empty);
    }
}
