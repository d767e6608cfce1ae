//! HR vertical slice.
//!
//! [`EmployeeService`] and [`AccountService`] hold the record operations behind
//! the REST API; [`seed`] synthesizes and bulk-loads fixture employees.

pub mod accounts;
pub mod error;
pub mod model;
pub mod seed;
pub mod service;

pub use accounts::AccountService;
pub use error::{HrError, HrResult};
pub use model::{
    Direction, EmployeeFilter, EmployeePage, EmployeeRequest, EmployeeResponse, PageRequest,
    SortField,
};
pub use service::EmployeeService;
