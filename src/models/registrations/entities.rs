use crate::models::users::entities::UserRole;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 注册申请状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/registration.ts")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationStatus::Pending => write!(f, "pending"),
            RegistrationStatus::Approved => write!(f, "approved"),
            RegistrationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RegistrationStatus::Pending),
            "approved" => Ok(RegistrationStatus::Approved),
            "rejected" => Ok(RegistrationStatus::Rejected),
            _ => Err(format!("Invalid registration status: {s}")),
        }
    }
}

// 注册申请
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/registration.ts")]
pub struct RegistrationRequest {
    pub id: String,
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role_requested: UserRole,
    pub status: RegistrationStatus,
    pub processed_by_admin_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 审批操作的结果
#[derive(Debug, Clone)]
pub enum ProcessOutcome {
    NotFound,
    AlreadyProcessed(RegistrationStatus),
    Processed(RegistrationRequest),
}
