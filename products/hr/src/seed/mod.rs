//! Synthetic employee data.
//!
//! [`catalog`] holds the lookup tables, the generator modules synthesize
//! fields, and [`EmployeeSeeder`] ties them together: uniqueness per run,
//! batched inserts and the JSON credentials file.

pub mod catalog;
pub mod dates;
pub mod generator;
pub mod password;
pub mod review;
pub mod seeder;
pub mod uniqueness;

pub use generator::{GeneratedEmployee, generate_employee};
pub use seeder::{Credential, EmployeeSeeder, SeedConfig, SeedRecord, SeedReport};
pub use uniqueness::UniquenessRegistry;
