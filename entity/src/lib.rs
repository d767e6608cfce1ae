//! sea-orm entities for the employee store.

pub mod employees;
pub mod roles;
pub mod system_users;
