//! 注册申请实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "registration_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role_requested: String,
    pub status: String,
    pub processed_by_admin_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_registration_request(
        self,
    ) -> crate::models::registrations::entities::RegistrationRequest {
        use crate::models::registrations::entities::{RegistrationRequest, RegistrationStatus};
        use crate::models::users::entities::UserRole;

        RegistrationRequest {
            id: self.id,
            user_id: self.user_id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            role_requested: self
                .role_requested
                .parse::<UserRole>()
                .unwrap_or(UserRole::Student),
            status: self
                .status
                .parse::<RegistrationStatus>()
                .unwrap_or(RegistrationStatus::Pending),
            processed_by_admin_id: self.processed_by_admin_id,
            created_at: super::from_unix(self.created_at),
            updated_at: super::from_unix(self.updated_at),
        }
    }
}
