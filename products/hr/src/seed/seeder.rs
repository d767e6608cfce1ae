use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::{NaiveDateTime, Utc};
use entity::{employees, roles, system_users};
use platform_authn::hash_password_blocking;
use platform_authz::Role;
use futures::future::try_join_all;
use rand::Rng;
use sea_orm::{
    ActiveValue::NotSet, ActiveValue::Set, DatabaseConnection, EntityTrait, QuerySelect,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{
    generator::{GeneratedEmployee, generate_employee},
    password::generate_password,
    uniqueness::UniquenessRegistry,
};
use crate::{accounts::to_entity, error::HrResult};

pub const DEFAULT_COUNT: usize = 1000;
pub const DEFAULT_BATCH_SIZE: usize = 250;
pub const DEFAULT_PROGRESS_EVERY: usize = 100;
pub const DEFAULT_OUTPUT: &str = "user_details.json";
pub const DEFAULT_EMAIL_DOMAIN: &str = "example.com";

#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub count: usize,
    pub batch_size: usize,
    pub progress_every: usize,
    pub output: PathBuf,
    pub email_domain: String,
    /// Delete existing employees, roles and users before seeding.
    pub clear_existing: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            batch_size: DEFAULT_BATCH_SIZE,
            progress_every: DEFAULT_PROGRESS_EVERY,
            output: PathBuf::from(DEFAULT_OUTPUT),
            email_domain: DEFAULT_EMAIL_DOMAIN.to_string(),
            clear_existing: true,
        }
    }
}

/// One generated employee with the credentials that go with it.
#[derive(Clone, Debug)]
pub struct SeedRecord {
    pub user_id: String,
    pub password: String,
    pub role: Role,
    pub employee: GeneratedEmployee,
}

/// Entry of the credentials file, keyed by user id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Clone, Debug)]
pub struct SeedReport {
    pub seeded: usize,
    pub batches: usize,
    pub output: PathBuf,
}

#[derive(Default)]
struct Batch {
    users: Vec<system_users::ActiveModel>,
    roles: Vec<roles::ActiveModel>,
    employees: Vec<employees::ActiveModel>,
}

impl Batch {
    fn push(&mut self, record: &SeedRecord, password_hash: String) {
        let employee = &record.employee;
        self.users.push(system_users::ActiveModel {
            user_id: Set(record.user_id.clone()),
            password: Set(password_hash),
            active: Set(true),
            email: Set(employee.email.clone()),
        });
        self.roles.push(roles::ActiveModel {
            id: NotSet,
            user_role: Set(to_entity(record.role)),
            user_id: Set(record.user_id.clone()),
        });
        self.employees.push(employees::ActiveModel {
            id: NotSet,
            employee_id: Set(record.user_id.clone()),
            first_name: Set(employee.first_name.clone()),
            last_name: Set(employee.last_name.clone()),
            email: Set(employee.email.clone()),
            phone_number: Set(employee.phone_number.clone()),
            department: Set(employee.department.to_string()),
            position: Set(employee.position.to_string()),
            salary: Set(employee.salary),
            hire_date: Set(employee.hire_date),
            performance_review: Set(Some(employee.performance_review.clone())),
            skills: Set(Some(employee.skills.clone())),
            active: Set(employee.active),
            created_at: Set(employee.created_at.and_utc().fixed_offset()),
            updated_at: Set(employee.updated_at.and_utc().fixed_offset()),
        });
    }

    fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Inserts users, roles and employees in one transaction and empties the batch.
    async fn flush(&mut self, db: &DatabaseConnection) -> HrResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        let txn = db.begin().await?;
        system_users::Entity::insert_many(std::mem::take(&mut self.users))
            .exec(&txn)
            .await?;
        roles::Entity::insert_many(std::mem::take(&mut self.roles))
            .exec(&txn)
            .await?;
        employees::Entity::insert_many(std::mem::take(&mut self.employees))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        Ok(())
    }
}

/// Generates fixture employees with unique contact details and bulk-loads them.
pub struct EmployeeSeeder<R> {
    config: SeedConfig,
    rng: R,
    registry: UniquenessRegistry,
}

impl<R: Rng + Send> EmployeeSeeder<R> {
    pub fn new(config: SeedConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            registry: UniquenessRegistry::new(),
        }
    }

    /// Email, phone and user id are each claimed before the next one is drawn.
    pub fn next_record(&mut self, now: NaiveDateTime) -> SeedRecord {
        let mut employee = generate_employee(&mut self.rng, &self.config.email_domain, now);
        employee.email = self
            .registry
            .claim_email(&mut self.rng, std::mem::take(&mut employee.email));
        employee.phone_number = self
            .registry
            .claim_phone(&mut self.rng, std::mem::take(&mut employee.phone_number));
        let user_id = self.registry.claim_user_id();
        let password = generate_password(&mut self.rng);
        let role = Role::ALL[self.rng.gen_range(0..Role::ALL.len())];
        SeedRecord {
            user_id,
            password,
            role,
            employee,
        }
    }

    pub async fn run(&mut self, db: &DatabaseConnection) -> HrResult<SeedReport> {
        if self.config.clear_existing {
            clear_existing(db).await?;
        } else {
            self.reserve_existing(db).await?;
        }
        let output = self.config.output.clone();
        remove_stale_output(&output).await;

        let total = self.config.count;
        let batch_size = self.config.batch_size.max(1);
        let progress_every = self.config.progress_every.max(1);
        info!(count = total, batch_size, "seeding employees");

        let mut credentials = BTreeMap::new();
        let mut pending = Vec::with_capacity(batch_size.min(total));
        let mut batches = 0;
        for index in 0..total {
            pending.push(self.next_record(Utc::now().naive_utc()));
            let done = index + 1;
            if pending.len() >= batch_size || done == total {
                if let Err(err) = store_batch(db, &mut pending, &mut credentials).await {
                    // Rows from earlier batches are committed; keep their logins.
                    if let Err(write_err) = write_credentials(&output, &credentials).await {
                        warn!(error = %write_err, "failed to write partial user details");
                    }
                    return Err(err);
                }
                batches += 1;
            }
            if done % progress_every == 0 || done == total {
                info!(
                    done,
                    total,
                    percent = done * 100 / total,
                    "seeding progress"
                );
            }
        }

        write_credentials(&output, &credentials).await?;
        info!(seeded = total, path = %output.display(), "seeding complete");
        Ok(SeedReport {
            seeded: total,
            batches,
            output,
        })
    }

    /// Existing emails, phones and user ids count as taken when rows are kept.
    async fn reserve_existing(&mut self, db: &DatabaseConnection) -> HrResult<()> {
        let users: Vec<(String, String)> = system_users::Entity::find()
            .select_only()
            .column(system_users::Column::UserId)
            .column(system_users::Column::Email)
            .into_tuple()
            .all(db)
            .await?;
        let contacts: Vec<(String, String)> = employees::Entity::find()
            .select_only()
            .column(employees::Column::Email)
            .column(employees::Column::PhoneNumber)
            .into_tuple()
            .all(db)
            .await?;
        for (user_id, email) in users {
            self.registry.reserve_user_id(user_id);
            self.registry.reserve_email(email);
        }
        for (email, phone) in contacts {
            self.registry.reserve_email(email);
            self.registry.reserve_phone(phone);
        }
        info!(existing = self.registry.len(), "keeping existing users");
        Ok(())
    }
}

/// Hashes the pending passwords concurrently, then inserts the batch in one
/// transaction. Credentials are recorded only once the batch is committed.
async fn store_batch(
    db: &DatabaseConnection,
    pending: &mut Vec<SeedRecord>,
    credentials: &mut BTreeMap<String, Credential>,
) -> HrResult<()> {
    let records = std::mem::take(pending);
    let hashes = try_join_all(
        records
            .iter()
            .map(|record| hash_password_blocking(record.password.clone())),
    )
    .await?;

    let mut batch = Batch::default();
    for (record, hash) in records.iter().zip(hashes) {
        batch.push(record, hash);
    }
    batch.flush(db).await?;

    credentials.extend(records.into_iter().map(|record| {
        (
            record.user_id,
            Credential {
                email: record.employee.email,
                password: record.password,
                role: record.role.as_str().to_string(),
            },
        )
    }));
    Ok(())
}

/// Children first so foreign keys hold throughout.
async fn clear_existing(db: &DatabaseConnection) -> HrResult<()> {
    info!("clearing existing employees, roles and users");
    let txn = db.begin().await?;
    employees::Entity::delete_many().exec(&txn).await?;
    roles::Entity::delete_many().exec(&txn).await?;
    system_users::Entity::delete_many().exec(&txn).await?;
    txn.commit().await?;
    Ok(())
}

async fn remove_stale_output(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => info!(path = %path.display(), "removed previous user details file"),
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => warn!(path = %path.display(), error = %err, "failed to delete existing file"),
    }
}

async fn write_credentials(path: &Path, credentials: &BTreeMap<String, Credential>) -> HrResult<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let body = serde_json::to_vec_pretty(credentials)?;
    tokio::fs::write(path, body).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{seed::catalog, testing};
    use platform_authn::check_password_policy;
    use rand::{SeedableRng, rngs::StdRng};
    use sea_orm::PaginatorTrait;
    use std::collections::HashSet;

    fn seeder(config: SeedConfig) -> EmployeeSeeder<StdRng> {
        EmployeeSeeder::new(config, StdRng::seed_from_u64(99))
    }

    #[test]
    fn records_are_unique_and_consistent() {
        let mut seeder = seeder(SeedConfig::default());
        let now = Utc::now().naive_utc();
        let mut emails = HashSet::new();
        let mut phones = HashSet::new();
        let mut ids = HashSet::new();
        for _ in 0..1000 {
            let record = seeder.next_record(now);
            let employee = &record.employee;
            assert!(emails.insert(employee.email.clone()));
            assert!(phones.insert(employee.phone_number.clone()));
            assert!(ids.insert(record.user_id.clone()));

            let (min, max) = catalog::salary_band(employee.position);
            assert!(employee.salary >= min && employee.salary < max);

            let pool = catalog::skills_for(employee.position);
            let skills: Vec<_> = employee.skills.split(", ").collect();
            assert!(!skills.is_empty() && skills.len() <= pool.len());
            assert!(skills.iter().all(|skill| pool.contains(skill)));

            assert!(check_password_policy(&record.password).is_ok());
        }
    }

    #[tokio::test]
    async fn run_persists_batches_and_writes_credentials() {
        let db = testing::sqlite().await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested").join("user_details.json");
        let config = SeedConfig {
            count: 7,
            batch_size: 3,
            progress_every: 2,
            output: output.clone(),
            ..SeedConfig::default()
        };

        let report = seeder(config).run(&db).await.unwrap();
        assert_eq!(report.seeded, 7);
        assert_eq!(report.batches, 3);

        assert_eq!(employees::Entity::find().count(&db).await.unwrap(), 7);
        assert_eq!(system_users::Entity::find().count(&db).await.unwrap(), 7);
        assert_eq!(roles::Entity::find().count(&db).await.unwrap(), 7);

        let written: BTreeMap<String, serde_json::Value> =
            serde_json::from_slice(&std::fs::read(&output).unwrap()).unwrap();
        assert_eq!(written.len(), 7);
        for (user_id, details) in &written {
            assert!(user_id.starts_with("EMP-"));
            assert!(details["email"].as_str().unwrap().contains('@'));
            assert!(Role::parse(details["role"].as_str().unwrap()).is_some());
        }
    }

    #[tokio::test]
    async fn rerun_clears_previous_rows_and_replaces_file() {
        let db = testing::sqlite().await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("user_details.json");
        std::fs::write(&output, "stale").unwrap();
        let config = SeedConfig {
            count: 2,
            batch_size: 250,
            output: output.clone(),
            ..SeedConfig::default()
        };

        seeder(config.clone()).run(&db).await.unwrap();
        let report = EmployeeSeeder::new(config, StdRng::seed_from_u64(100))
            .run(&db)
            .await
            .unwrap();
        assert_eq!(report.batches, 1);
        assert_eq!(employees::Entity::find().count(&db).await.unwrap(), 2);

        let written: BTreeMap<String, Credential> =
            serde_json::from_slice(&std::fs::read(&output).unwrap()).unwrap();
        assert!(written.values().all(|cred| cred.password.len() == 12));
        assert_eq!(written.len(), 2);
    }

    #[tokio::test]
    async fn keep_existing_reruns_avoid_stored_contacts() {
        let db = testing::sqlite().await;
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("user_details.json");
        let config = SeedConfig {
            count: 30,
            batch_size: 10,
            output: output.clone(),
            clear_existing: false,
            ..SeedConfig::default()
        };

        // Same seed twice, so the second run draws the same names and phones.
        seeder(config.clone()).run(&db).await.unwrap();
        let report = seeder(config).run(&db).await.unwrap();
        assert_eq!(report.seeded, 30);
        assert_eq!(report.batches, 3);
        assert_eq!(employees::Entity::find().count(&db).await.unwrap(), 60);
        assert_eq!(system_users::Entity::find().count(&db).await.unwrap(), 60);

        let written: BTreeMap<String, Credential> =
            serde_json::from_slice(&std::fs::read(&output).unwrap()).unwrap();
        assert_eq!(written.len(), 30);
        for user_id in written.keys() {
            assert!(
                system_users::Entity::find_by_id(user_id.clone())
                    .one(&db)
                    .await
                    .unwrap()
                    .is_some()
            );
        }
    }
}
