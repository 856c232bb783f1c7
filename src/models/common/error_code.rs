/// 业务错误码，随 ApiResponse 的 `code` 字段返回
///
/// HTTP 状态码表示错误类别，这里的错误码用于区分具体原因。
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2000,
    TokenInvalid = 2001,
    TokenExpired = 2002,
    AccountNotApproved = 2003,
    AccountDisabled = 2004,

    // 用户
    UserNotFound = 3000,
    UserEmailAlreadyExists = 3001,
    UserEmailInvalid = 3002,
    UserPasswordInvalid = 3003,
    CanNotDeleteCurrentUser = 3004,
    PromoteGradeNotAllowed = 3010,

    // 注册申请
    RegistrationNotFound = 3100,
    RegistrationAlreadyProcessed = 3101,

    // 年级、班级、科目
    GradeNotFound = 4000,
    GradeNameInvalid = 4001,
    ClassNotFound = 4100,
    ClassNameInvalid = 4101,
    SubjectNotFound = 4200,
    SubjectNameInvalid = 4201,
    AssignmentNotFound = 4300,
    AssignmentAlreadyExists = 4301,

    // AI 来源
    AiSourceNotFound = 5000,

    // 对话
    ChatNotFound = 6000,
    MessageContentEmpty = 6001,

    // 文件
    FileNotFound = 7000,
    FileUploadFailed = 7001,
    FileSizeExceeded = 7002,
    MultifileUploadNotAllowed = 7003,
    FileMissing = 7004,

    // 学习工具
    StudyTopicEmpty = 8000,
    StudyCountInvalid = 8001,
    StudyGenerationFailed = 8002,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_is_zero() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_ne!(ErrorCode::NotFound as i32, ErrorCode::Success as i32);
    }
}
