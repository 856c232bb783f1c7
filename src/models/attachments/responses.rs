use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attachment.ts")]
pub struct AttachmentUploadResponse {
    pub id: String,
    pub file_name: String,
    pub file_type: String,
}
