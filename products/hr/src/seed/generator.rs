use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;

use super::{catalog, dates, review::generate_review};

/// A synthetic employee before user id, password and role are attached.
#[derive(Clone, Debug)]
pub struct GeneratedEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub department: &'static str,
    pub position: &'static str,
    pub salary: i64,
    pub hire_date: NaiveDate,
    pub performance_review: String,
    pub skills: String,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Department drives position, position drives skills and salary, department
/// drives the review.
pub fn generate_employee<R: Rng + ?Sized>(
    rng: &mut R,
    email_domain: &str,
    now: NaiveDateTime,
) -> GeneratedEmployee {
    let department = catalog::random_department(rng);
    let position = catalog::random_position(rng, department);
    let skills = catalog::random_skills(rng, catalog::skills_for(position)).join(", ");
    let dates = dates::generate(rng, now);
    let first_name = catalog::pick(rng, catalog::FIRST_NAMES).to_string();
    let last_name = catalog::pick(rng, catalog::LAST_NAMES).to_string();

    GeneratedEmployee {
        email: email_for(&first_name, &last_name, department, email_domain),
        phone_number: phone_number(rng),
        salary: salary_for(rng, position),
        performance_review: generate_review(rng, department),
        active: rng.gen_bool(0.5),
        first_name,
        last_name,
        department,
        position,
        skills,
        hire_date: dates.hire_date,
        created_at: dates.created_at,
        updated_at: dates.updated_at,
    }
}

/// `first.last@department_snake.domain`, lower-cased, apostrophes dropped.
pub fn email_for(first_name: &str, last_name: &str, department: &str, domain: &str) -> String {
    let clean = |value: &str| value.to_lowercase().replace('\'', "");
    format!(
        "{}.{}@{}.{}",
        clean(first_name),
        clean(last_name),
        department.to_lowercase().replace(' ', "_"),
        domain
    )
}

/// `(XXX) XXX-XXXX` with a non-zero leading digit in each group.
pub fn phone_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "({}) {}-{:04}",
        rng.gen_range(200..1000),
        rng.gen_range(200..1000),
        rng.gen_range(0..10_000)
    )
}

/// Drawn from the position's band and floored to whole thousands.
pub fn salary_for<R: Rng + ?Sized>(rng: &mut R, position: &str) -> i64 {
    let (min, max) = catalog::salary_band(position);
    rng.gen_range(min..max) / 1000 * 1000
}
