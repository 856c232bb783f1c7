//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod ai_sources;
mod attachments;
mod chats;
mod classes;
mod grades;
mod messages;
mod registrations;
mod statistics;
mod subjects;
mod teacher_subjects;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{PocketBuddyError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config.database.pool_size, config.database.timeout)
                .await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Self::migrate(&db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 内存 SQLite，单连接保证所有查询看到同一个库
    pub async fn new_in_memory() -> Result<Self> {
        let db = Self::connect_sqlite("sqlite::memory:", 1, 5).await?;
        Self::migrate(&db).await?;
        Ok(Self { db })
    }

    async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None)
            .await
            .map_err(|e| PocketBuddyError::database_operation(format!("数据库迁移失败: {e}")))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");
        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PocketBuddyError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("temp_store", "memory");
        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .pragma("cache_size", "-64000")
                .pragma("wal_autocheckpoint", "1000");
        }

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(pool_size.max(1))
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(timeout_secs));
        if in_memory {
            // 连接关闭后内存库即丢失
            pool_options = pool_options.idle_timeout(None).max_lifetime(None);
        } else {
            pool_options = pool_options
                .test_before_acquire(true)
                .idle_timeout(Duration::from_secs(300));
        }

        let pool = pool_options.connect_with(opt).await.map_err(|e| {
            PocketBuddyError::database_connection(format!("SQLite 连接失败: {e}"))
        })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| PocketBuddyError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(PocketBuddyError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 生成新的随机 ID
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn now_ts() -> i64 {
    chrono::Utc::now().timestamp()
}

pub(crate) fn db_err(context: &str) -> impl Fn(sea_orm::DbErr) -> PocketBuddyError + '_ {
    move |e| PocketBuddyError::database_operation(format!("{context}: {e}"))
}

// Storage trait 实现
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
use crate::storage::{Storage, TaxonomySeed};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn register_user(
        &self,
        user: CreateUserRequest,
    ) -> Result<(User, RegistrationRequest)> {
        self.register_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_users_by_ids(&self, ids: &[String]) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user_cascade(&self, id: &str) -> Result<Option<Vec<String>>> {
        self.delete_user_cascade_impl(id).await
    }

    async fn count_admins(&self) -> Result<u64> {
        self.count_admins_impl().await
    }

    // 注册申请模块
    async fn list_pending_registrations(&self) -> Result<Vec<RegistrationRequest>> {
        self.list_pending_registrations_impl().await
    }

    async fn approve_registration(&self, id: &str, admin_id: &str) -> Result<ProcessOutcome> {
        self.approve_registration_impl(id, admin_id).await
    }

    async fn reject_registration(&self, id: &str, admin_id: &str) -> Result<ProcessOutcome> {
        self.reject_registration_impl(id, admin_id).await
    }

    // 年级模块
    async fn list_grades(&self) -> Result<Vec<Grade>> {
        self.list_grades_impl().await
    }

    async fn get_grade_by_id(&self, id: &str) -> Result<Option<Grade>> {
        self.get_grade_by_id_impl(id).await
    }

    async fn get_grade_by_order(&self, order: i32) -> Result<Option<Grade>> {
        self.get_grade_by_order_impl(order).await
    }

    async fn create_grade(&self, name: &str, order: i32) -> Result<Grade> {
        self.create_grade_impl(name, order).await
    }

    async fn delete_grade_cascade(&self, id: &str) -> Result<bool> {
        self.delete_grade_cascade_impl(id).await
    }

    async fn seed_taxonomy(&self, seed: TaxonomySeed) -> Result<bool> {
        self.seed_taxonomy_impl(seed).await
    }

    // 班级模块
    async fn list_classes(&self) -> Result<Vec<Class>> {
        self.list_classes_impl().await
    }

    async fn get_class_by_id(&self, id: &str) -> Result<Option<Class>> {
        self.get_class_by_id_impl(id).await
    }

    async fn create_class(&self, name: &str, grade_id: &str) -> Result<Class> {
        self.create_class_impl(name, grade_id).await
    }

    async fn delete_class_cascade(&self, id: &str) -> Result<bool> {
        self.delete_class_cascade_impl(id).await
    }

    // 科目模块
    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    async fn get_subject_by_id(&self, id: &str) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn create_subject(&self, name: &str, description: Option<String>) -> Result<Subject> {
        self.create_subject_impl(name, description).await
    }

    async fn delete_subject_cascade(&self, id: &str) -> Result<bool> {
        self.delete_subject_cascade_impl(id).await
    }

    // 教师任教科目模块
    async fn list_teacher_subjects(&self, teacher_id: &str) -> Result<Vec<TeacherSubject>> {
        self.list_teacher_subjects_impl(teacher_id).await
    }

    async fn find_teacher_subject(
        &self,
        teacher_id: &str,
        subject_id: &str,
        grade_id: Option<&str>,
    ) -> Result<Option<TeacherSubject>> {
        self.find_teacher_subject_impl(teacher_id, subject_id, grade_id)
            .await
    }

    async fn create_teacher_subject(
        &self,
        teacher_id: &str,
        subject_id: &str,
        grade_id: Option<String>,
    ) -> Result<TeacherSubject> {
        self.create_teacher_subject_impl(teacher_id, subject_id, grade_id)
            .await
    }

    async fn delete_teacher_subject(&self, id: &str, teacher_id: &str) -> Result<bool> {
        self.delete_teacher_subject_impl(id, teacher_id).await
    }

    // AI 来源模块
    async fn create_ai_source(&self, source: CreateAiSource) -> Result<AiSource> {
        self.create_ai_source_impl(source).await
    }

    async fn get_ai_source_by_id(&self, id: &str) -> Result<Option<AiSource>> {
        self.get_ai_source_by_id_impl(id).await
    }

    async fn list_ai_sources(&self, filter: AiSourceFilter) -> Result<Vec<AiSource>> {
        self.list_ai_sources_impl(filter).await
    }

    async fn update_ai_source(
        &self,
        id: &str,
        update: AiSourceUpdate,
    ) -> Result<Option<AiSource>> {
        self.update_ai_source_impl(id, update).await
    }

    async fn delete_ai_source(&self, id: &str) -> Result<bool> {
        self.delete_ai_source_impl(id).await
    }

    // 对话模块
    async fn list_chats(&self, user_id: &str, limit: u64) -> Result<Vec<Chat>> {
        self.list_chats_impl(user_id, limit).await
    }

    async fn create_chat(&self, user_id: &str, title: &str) -> Result<Chat> {
        self.create_chat_impl(user_id, title).await
    }

    async fn get_active_chat(&self, id: &str, user_id: &str) -> Result<Option<Chat>> {
        self.get_active_chat_impl(id, user_id).await
    }

    async fn soft_delete_chat(&self, id: &str, user_id: &str) -> Result<bool> {
        self.soft_delete_chat_impl(id, user_id).await
    }

    async fn touch_chat(&self, id: &str) -> Result<()> {
        self.touch_chat_impl(id).await
    }

    // 消息模块
    async fn create_message(
        &self,
        chat_id: &str,
        sender_type: SenderType,
        sender_user_id: Option<String>,
        content: &str,
    ) -> Result<Message> {
        self.create_message_impl(chat_id, sender_type, sender_user_id, content)
            .await
    }

    async fn list_messages(&self, chat_id: &str, limit: u64) -> Result<Vec<Message>> {
        self.list_messages_impl(chat_id, limit).await
    }

    async fn list_recent_messages(&self, chat_id: &str, limit: u64) -> Result<Vec<Message>> {
        self.list_recent_messages_impl(chat_id, limit).await
    }

    // 附件模块
    async fn create_attachment(&self, attachment: CreateAttachment) -> Result<Attachment> {
        self.create_attachment_impl(attachment).await
    }

    async fn get_attachment_by_id(&self, id: &str) -> Result<Option<Attachment>> {
        self.get_attachment_by_id_impl(id).await
    }

    async fn link_attachments(
        &self,
        message_id: &str,
        attachment_ids: &[String],
        user_id: &str,
    ) -> Result<Vec<Attachment>> {
        self.link_attachments_impl(message_id, attachment_ids, user_id)
            .await
    }

    async fn list_attachments_for_messages(
        &self,
        message_ids: &[String],
    ) -> Result<Vec<Attachment>> {
        self.list_attachments_for_messages_impl(message_ids).await
    }

    // 统计模块
    async fn get_statistics(&self) -> Result<StatisticsResponse> {
        self.get_statistics_impl().await
    }
}
