use entity::{roles, system_users};
use platform_authn::verify_password_blocking;
use platform_authz::{Principal, Role};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, ConnectionTrait,
    DatabaseConnection, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use crate::error::{HrError, HrResult};

/// `EMP-` followed by the first eight hex digits of a v4 UUID, upper-cased.
pub fn new_user_id() -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("EMP-{}", raw[..8].to_ascii_uppercase())
}

pub fn to_authz(role: roles::UserRole) -> Role {
    match role {
        roles::UserRole::Employee => Role::Employee,
        roles::UserRole::Manager => Role::Manager,
        roles::UserRole::Admin => Role::Admin,
    }
}

pub fn to_entity(role: Role) -> roles::UserRole {
    match role {
        Role::Employee => roles::UserRole::Employee,
        Role::Manager => roles::UserRole::Manager,
        Role::Admin => roles::UserRole::Admin,
    }
}

/// Issues a user id not yet present in `system_users`.
pub(crate) async fn fresh_user_id<C: ConnectionTrait>(conn: &C) -> HrResult<String> {
    loop {
        let candidate = new_user_id();
        if system_users::Entity::find_by_id(candidate.clone())
            .one(conn)
            .await?
            .is_none()
        {
            return Ok(candidate);
        }
    }
}

/// Credential and role lookups behind authentication and role assignment.
pub struct AccountService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AccountService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn roles_for(&self, user_id: &str) -> HrResult<Vec<Role>> {
        let rows = roles::Entity::find()
            .filter(roles::Column::UserId.eq(user_id))
            .all(self.db)
            .await?;
        Ok(rows.into_iter().map(|row| to_authz(row.user_role)).collect())
    }

    /// Checks Basic credentials. `None` covers unknown, inactive and wrong-password cases alike.
    pub async fn authenticate(&self, user_id: &str, password: &str) -> HrResult<Option<Principal>> {
        let Some(user) = system_users::Entity::find_by_id(user_id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };
        if !user.active {
            tracing::debug!(user_id, "inactive user attempted to authenticate");
            return Ok(None);
        }
        if !verify_password_blocking(password.to_string(), user.password).await? {
            return Ok(None);
        }
        let roles = self.roles_for(user_id).await?;
        Ok(Some(Principal::new(user.user_id, roles)))
    }

    /// Grants `role` (`ROLE_ADMIN` or `ADMIN`) to an existing user.
    pub async fn assign_role(&self, user_id: &str, role: &str) -> HrResult<Role> {
        let role = Role::parse(role)
            .ok_or_else(|| HrError::BadRequest(format!("Unknown role: {role}")))?;
        if system_users::Entity::find_by_id(user_id.to_string())
            .one(self.db)
            .await?
            .is_none()
        {
            return Err(HrError::NotFound("User not found".into()));
        }
        if self.roles_for(user_id).await?.contains(&role) {
            return Err(HrError::Conflict(format!("User already has role: {role}")));
        }
        roles::ActiveModel {
            id: NotSet,
            user_role: Set(to_entity(role)),
            user_id: Set(user_id.to_string()),
        }
        .insert(self.db)
        .await?;
        tracing::info!(user_id, role = %role, "role assigned");
        Ok(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EmployeeRequest, EmployeeService, testing};
    use chrono::NaiveDate;

    async fn registered(db: &DatabaseConnection) -> String {
        let request = EmployeeRequest {
            first_name: Some("Grace".into()),
            last_name: Some("Hopper".into()),
            email: Some("grace.hopper@example.com".into()),
            phone_number: Some("(555) 000-1111".into()),
            department: Some("Engineering".into()),
            position: Some("Lead Developer".into()),
            password: Some("C0bol!Rules".into()),
            salary: Some(120_000),
            hire_date: NaiveDate::from_ymd_opt(2015, 3, 2),
            ..EmployeeRequest::default()
        };
        EmployeeService::new(db)
            .register(request)
            .await
            .unwrap()
            .employee_id
    }

    #[test]
    fn user_ids_have_expected_shape() {
        let id = new_user_id();
        assert_eq!(id.len(), 12);
        assert!(id.starts_with("EMP-"));
        assert!(
            id[4..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        );
    }

    #[tokio::test]
    async fn authenticate_checks_password_and_loads_roles() {
        let db = testing::sqlite().await;
        let user_id = registered(&db).await;
        let accounts = AccountService::new(&db);

        let principal = accounts
            .authenticate(&user_id, "C0bol!Rules")
            .await
            .unwrap()
            .expect("valid credentials");
        assert_eq!(principal.roles, vec![Role::Employee]);

        assert!(
            accounts
                .authenticate(&user_id, "wrong")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            accounts
                .authenticate("EMP-00000000", "C0bol!Rules")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn inactive_users_are_refused() {
        let db = testing::sqlite().await;
        let user_id = registered(&db).await;
        let mut user: system_users::ActiveModel = system_users::Entity::find_by_id(user_id.clone())
            .one(&db)
            .await
            .unwrap()
            .unwrap()
            .into();
        user.active = Set(false);
        user.update(&db).await.unwrap();

        assert!(
            AccountService::new(&db)
                .authenticate(&user_id, "C0bol!Rules")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn assign_role_rejects_unknown_duplicate_and_missing() {
        let db = testing::sqlite().await;
        let user_id = registered(&db).await;
        let accounts = AccountService::new(&db);

        assert_eq!(
            accounts.assign_role(&user_id, "manager").await.unwrap(),
            Role::Manager
        );
        let mut roles = accounts.roles_for(&user_id).await.unwrap();
        roles.sort_by_key(|role| role.level());
        assert_eq!(roles, vec![Role::Employee, Role::Manager]);

        assert!(matches!(
            accounts.assign_role(&user_id, "ROLE_MANAGER").await,
            Err(HrError::Conflict(msg)) if msg == "User already has role: ROLE_MANAGER"
        ));
        assert!(matches!(
            accounts.assign_role(&user_id, "owner").await,
            Err(HrError::BadRequest(msg)) if msg == "Unknown role: owner"
        ));
        assert!(matches!(
            accounts.assign_role("EMP-FFFFFFFF", "admin").await,
            Err(HrError::NotFound(_))
        ));
    }
}
