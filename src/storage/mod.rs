use std::sync::Arc;

use crate::models::{
    ai_sources::{
        entities::AiSource,
        requests::{AiSourceFilter, AiSourceUpdate, CreateAiSource},
    },
    attachments::entities::{Attachment, CreateAttachment},
    chats::entities::{Chat, Message, SenderType},
    classes::entities::Class,
    grades::entities::Grade,
    registrations::entities::{ProcessOutcome, RegistrationRequest},
    statistics::responses::StatisticsResponse,
    subjects::entities::Subject,
    teacher_subjects::entities::TeacherSubject,
    users::{
        entities::User,
        requests::{CreateUserRequest, UserListQuery, UserUpdate},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 初始分类数据
#[derive(Debug, Clone, Default)]
pub struct TaxonomySeed {
    /// (名称, 排序)
    pub grades: Vec<(String, i32)>,
    /// (名称, 描述)
    pub subjects: Vec<(String, Option<String>)>,
    /// (名称, 所属年级在 grades 中的下标)
    pub classes: Vec<(String, usize)>,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 注册：在同一事务中创建用户与待审批申请
    async fn register_user(&self, user: CreateUserRequest)
    -> Result<(User, RegistrationRequest)>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;
    // 批量获取用户
    async fn get_users_by_ids(&self, ids: &[String]) -> Result<Vec<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<Option<User>>;
    // 级联删除用户，返回需要清理的磁盘文件路径；用户不存在时返回 None
    async fn delete_user_cascade(&self, id: &str) -> Result<Option<Vec<String>>>;
    // 管理员数量
    async fn count_admins(&self) -> Result<u64>;

    /// 注册申请
    async fn list_pending_registrations(&self) -> Result<Vec<RegistrationRequest>>;
    async fn approve_registration(&self, id: &str, admin_id: &str) -> Result<ProcessOutcome>;
    async fn reject_registration(&self, id: &str, admin_id: &str) -> Result<ProcessOutcome>;

    /// 年级
    async fn list_grades(&self) -> Result<Vec<Grade>>;
    async fn get_grade_by_id(&self, id: &str) -> Result<Option<Grade>>;
    async fn get_grade_by_order(&self, order: i32) -> Result<Option<Grade>>;
    async fn create_grade(&self, name: &str, order: i32) -> Result<Grade>;
    async fn delete_grade_cascade(&self, id: &str) -> Result<bool>;
    // 仅在没有任何年级时写入初始数据
    async fn seed_taxonomy(&self, seed: TaxonomySeed) -> Result<bool>;

    /// 班级
    async fn list_classes(&self) -> Result<Vec<Class>>;
    async fn get_class_by_id(&self, id: &str) -> Result<Option<Class>>;
    async fn create_class(&self, name: &str, grade_id: &str) -> Result<Class>;
    async fn delete_class_cascade(&self, id: &str) -> Result<bool>;

    /// 科目
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    async fn get_subject_by_id(&self, id: &str) -> Result<Option<Subject>>;
    async fn create_subject(&self, name: &str, description: Option<String>) -> Result<Subject>;
    async fn delete_subject_cascade(&self, id: &str) -> Result<bool>;

    /// 教师任教科目
    async fn list_teacher_subjects(&self, teacher_id: &str) -> Result<Vec<TeacherSubject>>;
    async fn find_teacher_subject(
        &self,
        teacher_id: &str,
        subject_id: &str,
        grade_id: Option<&str>,
    ) -> Result<Option<TeacherSubject>>;
    async fn create_teacher_subject(
        &self,
        teacher_id: &str,
        subject_id: &str,
        grade_id: Option<String>,
    ) -> Result<TeacherSubject>;
    async fn delete_teacher_subject(&self, id: &str, teacher_id: &str) -> Result<bool>;

    /// AI 来源
    async fn create_ai_source(&self, source: CreateAiSource) -> Result<AiSource>;
    async fn get_ai_source_by_id(&self, id: &str) -> Result<Option<AiSource>>;
    async fn list_ai_sources(&self, filter: AiSourceFilter) -> Result<Vec<AiSource>>;
    async fn update_ai_source(&self, id: &str, update: AiSourceUpdate)
    -> Result<Option<AiSource>>;
    async fn delete_ai_source(&self, id: &str) -> Result<bool>;

    /// 对话
    async fn list_chats(&self, user_id: &str, limit: u64) -> Result<Vec<Chat>>;
    async fn create_chat(&self, user_id: &str, title: &str) -> Result<Chat>;
    // 获取未删除且属于该用户的对话
    async fn get_active_chat(&self, id: &str, user_id: &str) -> Result<Option<Chat>>;
    async fn soft_delete_chat(&self, id: &str, user_id: &str) -> Result<bool>;
    async fn touch_chat(&self, id: &str) -> Result<()>;

    /// 消息
    async fn create_message(
        &self,
        chat_id: &str,
        sender_type: SenderType,
        sender_user_id: Option<String>,
        content: &str,
    ) -> Result<Message>;
    // 按时间正序返回最早的 limit 条
    async fn list_messages(&self, chat_id: &str, limit: u64) -> Result<Vec<Message>>;
    // 按时间正序返回最近的 limit 条
    async fn list_recent_messages(&self, chat_id: &str, limit: u64) -> Result<Vec<Message>>;

    /// 附件
    async fn create_attachment(&self, attachment: CreateAttachment) -> Result<Attachment>;
    async fn get_attachment_by_id(&self, id: &str) -> Result<Option<Attachment>>;
    // 只关联本人上传且尚未关联的附件
    async fn link_attachments(
        &self,
        message_id: &str,
        attachment_ids: &[String],
        user_id: &str,
    ) -> Result<Vec<Attachment>>;
    async fn list_attachments_for_messages(&self, message_ids: &[String])
    -> Result<Vec<Attachment>>;

    /// 统计
    async fn get_statistics(&self) -> Result<StatisticsResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
