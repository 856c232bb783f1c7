use super::entities::RegistrationRequest;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/registration.ts")]
pub struct RegistrationListResponse {
    pub items: Vec<RegistrationRequest>,
}
