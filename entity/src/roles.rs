use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_role: UserRole,
    #[sea_orm(indexed)]
    pub user_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::system_users::Entity",
        from = "Column::UserId",
        to = "super::system_users::Column::UserId",
        on_delete = "Cascade"
    )]
    SystemUser,
}

impl Related<super::system_users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SystemUser.def()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Hash)]
#[sea_orm(rs_type = "String", db_type = "String(Some(50))")]
pub enum UserRole {
    #[sea_orm(string_value = "ROLE_EMPLOYEE")]
    Employee,
    #[sea_orm(string_value = "ROLE_MANAGER")]
    Manager,
    #[sea_orm(string_value = "ROLE_ADMIN")]
    Admin,
}

impl ActiveModelBehavior for ActiveModel {}
