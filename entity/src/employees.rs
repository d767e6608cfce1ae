use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Mirrors `system_users.user_id` of the owning credential.
    #[sea_orm(unique)]
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub phone_number: String,
    #[sea_orm(indexed)]
    pub department: String,
    #[sea_orm(indexed)]
    pub position: String,
    pub salary: i64,
    pub hire_date: Date,
    #[sea_orm(column_type = "Text", nullable)]
    pub performance_review: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub skills: Option<String>,
    pub active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::system_users::Entity",
        from = "Column::EmployeeId",
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

impl ActiveModelBehavior for ActiveModel {}
