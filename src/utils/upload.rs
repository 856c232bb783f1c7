//! multipart 上传的落盘逻辑
//!
//! 只接受一个 `file` 字段，其余字段按文本收集。

use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::errors::PocketBuddyError;

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// 单个文本字段的最大字节数
pub const MAX_TEXT_FIELD_SIZE: usize = 64 * 1024;

/// 已写入磁盘的文件
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub original_name: String,
    pub path: String,
    pub file_type: String,
    pub size: i64,
}

impl StoredFile {
    /// 后续步骤失败时删除已写入的文件
    pub fn discard(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!("Failed to remove uploaded file {}: {}", self.path, e);
        }
    }
}

#[derive(Debug)]
pub struct MultipartUpload {
    pub file: StoredFile,
    pub fields: HashMap<String, String>,
}

impl MultipartUpload {
    /// 文本字段，空白视为未填写
    pub fn field(&self, name: &str) -> Option<String> {
        super::non_blank(self.fields.get(name).cloned())
    }
}

#[derive(Debug)]
pub enum UploadError {
    MissingFile,
    MultipleFiles,
    TooLarge,
    Io(PocketBuddyError),
}

impl From<std::io::Error> for UploadError {
    fn from(err: std::io::Error) -> Self {
        UploadError::Io(err.into())
    }
}

/// 原文件名的扩展名，包含点号
pub fn file_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

fn discard_stored(stored: Option<StoredFile>) {
    if let Some(file) = stored {
        file.discard();
    }
}

/// 读取文本字段，超过 `MAX_TEXT_FIELD_SIZE` 时返回 `TooLarge`
async fn read_text_field(field: &mut actix_multipart::Field) -> Result<String, UploadError> {
    let mut value = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|e| UploadError::Io(PocketBuddyError::file_operation(e.to_string())))?;
        if value.len() + data.len() > MAX_TEXT_FIELD_SIZE {
            return Err(UploadError::TooLarge);
        }
        value.extend_from_slice(&data);
    }
    Ok(String::from_utf8_lossy(&value).into_owned())
}

/// 读取 multipart，将文件保存为 `<upload_dir>/<stem><ext>`
pub async fn save_multipart(
    mut payload: Multipart,
    upload_dir: &str,
    stem: &str,
    max_size: usize,
) -> Result<MultipartUpload, UploadError> {
    fs::create_dir_all(upload_dir)?;

    let mut stored: Option<StoredFile> = None;
    let mut fields = HashMap::new();

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                discard_stored(stored.take());
                return Err(UploadError::Io(PocketBuddyError::file_operation(
                    e.to_string(),
                )));
            }
        };
        let content_disposition = field.content_disposition().cloned();
        let name = content_disposition
            .as_ref()
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            match read_text_field(&mut field).await {
                Ok(value) => {
                    fields.insert(name, value);
                }
                Err(e) => {
                    discard_stored(stored.take());
                    return Err(e);
                }
            }
            continue;
        }

        if let Some(previous) = stored.take() {
            previous.discard();
            return Err(UploadError::MultipleFiles);
        }

        let original_name = content_disposition
            .as_ref()
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();
        let file_type = field
            .content_type()
            .map(|ct| ct.to_string())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
        let path = format!("{upload_dir}/{stem}{}", file_extension(&original_name));

        let mut file = File::create(&path)?;
        let mut total_size: usize = 0;
        while let Some(chunk) = field.next().await {
            let data = match chunk {
                Ok(data) => data,
                Err(e) => {
                    let _ = fs::remove_file(&path);
                    return Err(UploadError::Io(PocketBuddyError::file_operation(
                        e.to_string(),
                    )));
                }
            };
            total_size += data.len();
            if total_size > max_size {
                drop(file);
                let _ = fs::remove_file(&path);
                return Err(UploadError::TooLarge);
            }
            if let Err(e) = file.write_all(&data) {
                let _ = fs::remove_file(&path);
                return Err(e.into());
            }
        }

        stored = Some(StoredFile {
            original_name,
            path,
            file_type,
            size: total_size as i64,
        });
    }

    match stored {
        Some(file) => Ok(MultipartUpload { file, fields }),
        None => Err(UploadError::MissingFile),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("skripta.PDF"), ".PDF");
        assert_eq!(file_extension("archiv.tar.gz"), ".gz");
        assert_eq!(file_extension("bez_pripony"), "");
    }
}
