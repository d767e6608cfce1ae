use chrono::Utc;
use entity::{employees, roles, system_users};
use platform_authn::{check_password_policy, hash_password_blocking};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use validator::Validate;

use crate::{
    accounts::fresh_user_id,
    error::{HrError, HrResult},
    model::{EmployeeFilter, EmployeePage, EmployeeRequest, EmployeeResponse, PageRequest},
};

pub const EMAIL_TAKEN: &str = "Email already exists.";
pub const PHONE_TAKEN: &str = "Phone number already exists.";

/// Employee record operations. Every write runs in a single transaction.
pub struct EmployeeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmployeeService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_page(&self, request: PageRequest) -> HrResult<EmployeePage> {
        let paginator = employees::Entity::find()
            .order_by(request.sort_by.column(), request.direction.order())
            .order_by_asc(employees::Column::Id)
            .paginate(self.db, request.size);
        let totals = paginator.num_items_and_pages().await?;
        let models = paginator.fetch_page(request.page).await?;
        Ok(EmployeePage::new(
            models.into_iter().map(EmployeeResponse::from).collect(),
            &request,
            totals.number_of_items,
            totals.number_of_pages,
        ))
    }

    pub async fn find_by_employee_id(&self, employee_id: &str) -> HrResult<EmployeeResponse> {
        find_model(self.db, employee_id).await.map(Into::into)
    }

    pub async fn filter(&self, filter: &EmployeeFilter) -> HrResult<Vec<EmployeeResponse>> {
        let models = employees::Entity::find()
            .filter(filter.condition())
            .order_by_asc(employees::Column::LastName)
            .order_by_asc(employees::Column::FirstName)
            .all(self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    /// Pretty JSON array of the filtered employees.
    pub async fn export(&self, filter: &EmployeeFilter) -> HrResult<Vec<u8>> {
        let employees = self.filter(filter).await?;
        tracing::info!(count = employees.len(), "exporting employees");
        Ok(serde_json::to_vec_pretty(&employees)?)
    }

    /// Creates the user, its `ROLE_EMPLOYEE` role and the employee record.
    pub async fn register(&self, request: EmployeeRequest) -> HrResult<EmployeeResponse> {
        let new = request.into_new_employee()?;
        check_password_policy(&new.password)?;
        let password_hash = hash_password_blocking(new.password).await?;

        let txn = self.db.begin().await?;
        ensure_contact_free(&txn, Some(&new.email), Some(&new.phone_number), None).await?;
        let user_id = fresh_user_id(&txn).await?;
        let now = Utc::now().fixed_offset();

        system_users::ActiveModel {
            user_id: Set(user_id.clone()),
            password: Set(password_hash),
            active: Set(true),
            email: Set(new.email.clone()),
        }
        .insert(&txn)
        .await?;
        roles::ActiveModel {
            id: NotSet,
            user_role: Set(roles::UserRole::Employee),
            user_id: Set(user_id.clone()),
        }
        .insert(&txn)
        .await?;
        let employee = employees::ActiveModel {
            id: NotSet,
            employee_id: Set(user_id.clone()),
            first_name: Set(new.first_name),
            last_name: Set(new.last_name),
            email: Set(new.email),
            phone_number: Set(new.phone_number),
            department: Set(new.department),
            position: Set(new.position),
            salary: Set(new.salary),
            hire_date: Set(new.hire_date),
            performance_review: Set(new.performance_review),
            skills: Set(new.skills),
            active: Set(new.active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        tracing::info!(employee_id = %user_id, "employee registered");
        Ok(employee.into())
    }

    /// Applies the fields present in `request`. Returns the record before and after.
    pub async fn update(
        &self,
        employee_id: &str,
        request: EmployeeRequest,
    ) -> HrResult<(EmployeeResponse, EmployeeResponse)> {
        request.validate()?;
        let password_hash = match request.password.clone() {
            Some(password) => {
                check_password_policy(&password)?;
                Some(hash_password_blocking(password).await?)
            }
            None => None,
        };
        let email = request.email.map(|email| email.trim().to_lowercase());

        let txn = self.db.begin().await?;
        let existing = find_model(&txn, employee_id).await?;
        let email_changed = email.as_ref().filter(|email| **email != existing.email);
        let phone_changed = request
            .phone_number
            .as_ref()
            .filter(|phone| **phone != existing.phone_number);
        ensure_contact_free(
            &txn,
            email_changed.map(String::as_str),
            phone_changed.map(String::as_str),
            Some(employee_id),
        )
        .await?;

        if email_changed.is_some() || password_hash.is_some() {
            let user = system_users::Entity::find_by_id(employee_id.to_string())
                .one(&txn)
                .await?
                .ok_or_else(|| HrError::employee_not_found(employee_id))?;
            let mut user = user.into_active_model();
            if let Some(email) = email_changed {
                user.email = Set(email.clone());
            }
            if let Some(hash) = password_hash {
                user.password = Set(hash);
            }
            user.update(&txn).await?;
        }

        let mut active = existing.clone().into_active_model();
        if let Some(value) = request.first_name {
            active.first_name = Set(value);
        }
        if let Some(value) = request.last_name {
            active.last_name = Set(value);
        }
        if let Some(value) = email {
            active.email = Set(value);
        }
        if let Some(value) = request.phone_number {
            active.phone_number = Set(value);
        }
        if let Some(value) = request.department {
            active.department = Set(value);
        }
        if let Some(value) = request.position {
            active.position = Set(value);
        }
        if let Some(value) = request.salary {
            active.salary = Set(value);
        }
        if let Some(value) = request.hire_date {
            active.hire_date = Set(value);
        }
        if request.performance_review.is_some() {
            active.performance_review = Set(request.performance_review);
        }
        if request.skills.is_some() {
            active.skills = Set(request.skills);
        }
        if let Some(value) = request.active {
            active.active = Set(value);
        }
        active.updated_at = Set(Utc::now().fixed_offset());
        let updated = active.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(employee_id, "employee updated");
        Ok((existing.into(), updated.into()))
    }

    /// Removes the employee together with its user and roles.
    pub async fn delete(&self, employee_id: &str) -> HrResult<EmployeeResponse> {
        let txn = self.db.begin().await?;
        let existing = find_model(&txn, employee_id).await?;
        roles::Entity::delete_many()
            .filter(roles::Column::UserId.eq(employee_id))
            .exec(&txn)
            .await?;
        employees::Entity::delete_many()
            .filter(employees::Column::EmployeeId.eq(employee_id))
            .exec(&txn)
            .await?;
        system_users::Entity::delete_by_id(employee_id.to_string())
            .exec(&txn)
            .await?;
        txn.commit().await?;

        tracing::info!(employee_id, "employee deleted");
        Ok(existing.into())
    }
}

async fn find_model<C: ConnectionTrait>(conn: &C, employee_id: &str) -> HrResult<employees::Model> {
    employees::Entity::find()
        .filter(employees::Column::EmployeeId.eq(employee_id))
        .one(conn)
        .await?
        .ok_or_else(|| HrError::employee_not_found(employee_id))
}

/// Rejects an email or phone already held by another employee.
async fn ensure_contact_free<C: ConnectionTrait>(
    conn: &C,
    email: Option<&str>,
    phone: Option<&str>,
    except: Option<&str>,
) -> HrResult<()> {
    let others = || {
        let query = employees::Entity::find();
        match except {
            Some(id) => query.filter(employees::Column::EmployeeId.ne(id)),
            None => query,
        }
    };
    if let Some(email) = email {
        let taken = others()
            .filter(employees::Column::Email.eq(email))
            .count(conn)
            .await?
            > 0
            || system_users::Entity::find()
                .filter(system_users::Column::Email.eq(email))
                .count(conn)
                .await?
                > 0;
        if taken {
            return Err(HrError::Conflict(EMAIL_TAKEN.into()));
        }
    }
    if let Some(phone) = phone {
        if others()
            .filter(employees::Column::PhoneNumber.eq(phone))
            .count(conn)
            .await?
            > 0
        {
            return Err(HrError::Conflict(PHONE_TAKEN.into()));
        }
    }
    Ok(())
}
