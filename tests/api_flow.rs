use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use async_trait::async_trait;
use serde_json::{Value, json};

use pocketbuddy::cache::ObjectCache;
use pocketbuddy::cache::object_cache::moka::MokaCacheWrapper;
use pocketbuddy::errors::{PocketBuddyError, Result as PbResult};
use pocketbuddy::llm::prompt::APOLOGY_REPLY;
use pocketbuddy::llm::{ChatTurn, EchoClient, LlmClient};
use pocketbuddy::models::AppStartTime;
use pocketbuddy::models::users::entities::{User, UserRole};
use pocketbuddy::models::users::requests::CreateUserRequest;
use pocketbuddy::routes;
use pocketbuddy::storage::Storage;
use pocketbuddy::storage::sea_orm_storage::SeaOrmStorage;
use pocketbuddy::models::users::requests::UserUpdate;
use pocketbuddy::utils::jwt::JwtUtils;
use pocketbuddy::utils::password::hash_password;
use pocketbuddy::utils::{json_error_handler, query_error_handler};

async fn memory_storage() -> Arc<dyn Storage> {
    Arc::new(SeaOrmStorage::new_in_memory().await.unwrap())
}

async fn insert_user(storage: &Arc<dyn Storage>, email: &str, password: &str, role: UserRole) -> User {
    storage
        .create_user(CreateUserRequest {
            email: email.to_string(),
            password_hash: hash_password(password).unwrap(),
            first_name: "Test".to_string(),
            last_name: "Používateľ".to_string(),
            role,
            is_approved: true,
            is_active: true,
        })
        .await
        .unwrap()
}

// 每个测试使用不同的来源 IP，避免共享限流计数
fn peer(last_octet: u8) -> SocketAddr {
    SocketAddr::from(([10, 0, 0, last_octet], 40000))
}

// 模型调用总是失败
struct FailingClient;

#[async_trait]
impl LlmClient for FailingClient {
    async fn complete(&self, _system: &str, _history: &[ChatTurn], _prompt: &str) -> PbResult<String> {
        Err(PocketBuddyError::llm_request("connection refused"))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

// 固定回复
struct ScriptedClient(&'static str);

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn complete(&self, _system: &str, _history: &[ChatTurn], _prompt: &str) -> PbResult<String> {
        Ok(self.0.to_string())
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

const BOUNDARY: &str = "pocketbuddy-form-boundary";

fn multipart_header() -> (&'static str, String) {
    (
        "Content-Type",
        format!("multipart/form-data; boundary={BOUNDARY}"),
    )
}

// 手工拼装 multipart 请求体，文本字段在前
fn multipart_body(fields: &[(&str, String)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((file_name, content)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: text/plain\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

macro_rules! init_app {
    ($storage:expr) => {
        init_app!($storage, Arc::new(EchoClient))
    };
    ($storage:expr, $llm:expr) => {{
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_capacity(1000, 60));
        let llm: Arc<dyn LlmClient> = $llm;
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($storage.clone()))
                .app_data(web::Data::new(cache))
                .app_data(web::Data::new(llm))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .configure(routes::configure_api_routes),
        )
        .await
    }};
}

macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

macro_rules! login {
    ($app:expr, $ip:expr, $email:expr, $password:expr) => {{
        let (status, body) = send!(
            $app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .peer_addr($ip)
                .set_json(json!({ "email": $email, "password": $password }))
        );
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

#[actix_web::test]
async fn registration_requires_admin_approval() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let ip = peer(1);
    insert_user(&storage, "admin@skola.sk", "admin123", UserRole::Admin).await;

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .peer_addr(ip)
            .set_json(json!({
                "email": "Jana@Skola.sk",
                "password": "tajne123",
                "first_name": "Jana",
                "last_name": "Nováková"
            }))
    );
    assert_eq!(status, StatusCode::OK);

    // 重复注册
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .peer_addr(ip)
            .set_json(json!({
                "email": "jana@skola.sk",
                "password": "tajne123",
                "first_name": "Jana",
                "last_name": "Nováková"
            }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .peer_addr(ip)
            .set_json(json!({ "email": "jana@skola.sk", "password": "tajne123" }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin_token = login!(app, ip, "admin@skola.sk", "admin123");
    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/admin/registration-requests")
            .insert_header(bearer(&admin_token))
    );
    assert_eq!(status, StatusCode::OK);
    let request_id = body["data"]["items"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/admin/approve/{request_id}"))
            .insert_header(bearer(&admin_token))
    );
    assert_eq!(status, StatusCode::OK);

    // 已处理的申请不能再次处理
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/admin/reject/{request_id}"))
            .insert_header(bearer(&admin_token))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let student_token = login!(app, ip, "jana@skola.sk", "tajne123");
    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(bearer(&student_token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "student");
    assert!(body["data"].get("password_hash").is_none());
}

#[actix_web::test]
async fn role_guards_protect_admin_routes() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let ip = peer(2);
    insert_user(&storage, "ziak@skola.sk", "heslo123", UserRole::Student).await;

    let (status, _) = send!(app, test::TestRequest::get().uri("/api/grades"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = login!(app, ip, "ziak@skola.sk", "heslo123");

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/admin/users")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/grades")
            .insert_header(bearer(&token))
            .set_json(json!({ "name": "5. ročník", "order": 5 }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/grades")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["items"].as_array().unwrap().is_empty());

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/teacher/my-subjects")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn seed_is_idempotent_and_public() {
    let storage = memory_storage().await;
    let app = init_app!(storage);

    let (status, body) = send!(app, test::TestRequest::post().uri("/api/seed"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["seeded"], true);
    assert_eq!(body["data"]["subjects"], 24);

    let (status, body) = send!(app, test::TestRequest::post().uri("/api/seed"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["seeded"], false);
    assert_eq!(body["message"], "Dáta už existujú");

    assert_eq!(storage.list_grades().await.unwrap().len(), 4);
    assert_eq!(storage.list_classes().await.unwrap().len(), 4);

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "PocketBuddy API");
}

#[actix_web::test]
async fn chat_round_trip_with_echo_model() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let ip = peer(4);
    insert_user(&storage, "ziak2@skola.sk", "heslo123", UserRole::Student).await;
    let token = login!(app, ip, "ziak2@skola.sk", "heslo123");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/chats")
            .insert_header(bearer(&token))
            .set_json(json!({}))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Nová konverzácia");
    let chat_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/chats/{chat_id}/messages"))
            .peer_addr(ip)
            .insert_header(bearer(&token))
            .set_json(json!({ "content": "   " }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/chats/{chat_id}/messages"))
            .peer_addr(ip)
            .insert_header(bearer(&token))
            .set_json(json!({ "content": "Čo je derivácia?" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user_message"]["sender_type"], "user");
    assert_eq!(body["data"]["ai_message"]["sender_type"], "ai");
    assert_eq!(body["data"]["ai_message"]["content"], "[echo] Čo je derivácia?");

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/chats/{chat_id}/messages"))
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);

    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/chats/{chat_id}"))
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/chats/{chat_id}"))
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn chats_are_private_to_their_owner() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let ip = peer(5);
    insert_user(&storage, "a@skola.sk", "heslo123", UserRole::Student).await;
    insert_user(&storage, "b@skola.sk", "heslo123", UserRole::Student).await;
    let token_a = login!(app, ip, "a@skola.sk", "heslo123");
    let token_b = login!(app, ip, "b@skola.sk", "heslo123");

    let (_, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/chats")
            .insert_header(bearer(&token_a))
            .set_json(json!({ "title": "Fyzika" }))
    );
    let chat_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/chats/{chat_id}/messages"))
            .insert_header(bearer(&token_b))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/chats")
            .insert_header(bearer(&token_b))
    );
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["items"].as_array().unwrap().is_empty());

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/chats/not-a-uuid/messages")
            .insert_header(bearer(&token_a))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn teacher_assignments_reject_duplicates() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let ip = peer(6);
    insert_user(&storage, "ucitel@skola.sk", "heslo123", UserRole::Teacher).await;
    let subject = storage
        .create_subject("Matematika", None)
        .await
        .unwrap();
    let token = login!(app, ip, "ucitel@skola.sk", "heslo123");

    let assign = || {
        test::TestRequest::post()
            .uri("/api/teacher/my-subjects")
            .insert_header(bearer(&token))
            .set_json(json!({ "subject_id": subject.id }))
    };

    let (status, _) = send!(app, assign());
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send!(app, assign());
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/teacher/my-subjects")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["subject"]["name"], "Matematika");
}

#[actix_web::test]
async fn admin_statistics_and_user_deactivation() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let ip = peer(7);
    insert_user(&storage, "admin2@skola.sk", "admin123", UserRole::Admin).await;
    let student = insert_user(&storage, "ziak3@skola.sk", "heslo123", UserRole::Student).await;
    let admin_token = login!(app, ip, "admin2@skola.sk", "admin123");
    let student_token = login!(app, ip, "ziak3@skola.sk", "heslo123");

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/admin/statistics")
            .insert_header(bearer(&admin_token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_users"], 2);
    assert_eq!(body["data"]["students"], 1);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/admin/users/{}/deactivate", student.id))
            .insert_header(bearer(&admin_token))
    );
    assert_eq!(status, StatusCode::OK);

    // 缓存已失效，旧 token 立即不可用
    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(bearer(&student_token))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/admin/users?role=student")
            .insert_header(bearer(&admin_token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pagination"]["total"], 1);
}

#[actix_web::test]
async fn login_without_token_is_limited_per_address() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let ip = peer(8);
    insert_user(&storage, "limit@skola.sk", "heslo123", UserRole::Student).await;

    let login = || {
        test::TestRequest::post()
            .uri("/api/auth/login")
            .peer_addr(ip)
            .set_json(json!({ "email": "limit@skola.sk", "password": "heslo123" }))
    };

    for _ in 0..10 {
        let (status, body) = send!(app, login());
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
    }

    let resp = test::call_service(&app, login().to_request()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(resp.headers().contains_key("Retry-After"));

    // 其他地址不受影响
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .peer_addr(peer(108))
            .set_json(json!({ "email": "limit@skola.sk", "password": "heslo123" }))
    );
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn promote_grade_moves_student_to_next_grade() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let ip = peer(9);
    insert_user(&storage, "admin3@skola.sk", "admin123", UserRole::Admin).await;
    let first = storage.create_grade("1. ročník", 1).await.unwrap();
    let second = storage.create_grade("2. ročník", 2).await.unwrap();
    let last = storage.create_grade("Posledný", i32::MAX).await.unwrap();

    let with_grade = |grade_id: &str| UserUpdate {
        grade_id: Some(Some(grade_id.to_string())),
        ..Default::default()
    };
    let student = insert_user(&storage, "p1@skola.sk", "heslo123", UserRole::Student).await;
    storage.update_user(&student.id, with_grade(&first.id)).await.unwrap();
    let top = insert_user(&storage, "p2@skola.sk", "heslo123", UserRole::Student).await;
    storage.update_user(&top.id, with_grade(&last.id)).await.unwrap();
    let dangling = insert_user(&storage, "p3@skola.sk", "heslo123", UserRole::Student).await;
    storage.update_user(&dangling.id, with_grade("zmazany-rocnik")).await.unwrap();
    let no_grade = insert_user(&storage, "p4@skola.sk", "heslo123", UserRole::Student).await;
    let teacher = insert_user(&storage, "p5@skola.sk", "heslo123", UserRole::Teacher).await;

    let token = login!(app, ip, "admin3@skola.sk", "admin123");
    let promote = |user_id: &str| {
        test::TestRequest::post()
            .uri(&format!("/api/admin/users/{user_id}/promote-grade"))
            .insert_header(bearer(&token))
    };

    let (status, body) = send!(app, promote(&student.id));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], second.id.as_str());
    let promoted = storage.get_user_by_id(&student.id).await.unwrap().unwrap();
    assert_eq!(promoted.grade_id.as_deref(), Some(second.id.as_str()));

    // 没有 order 为 3 的年级
    let (status, body) = send!(app, promote(&student.id));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3010);

    let (status, _) = send!(app, promote(&top.id));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(app, promote(&no_grade.id));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send!(app, promote(&teacher.id));
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(app, promote(&dangling.id));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4000);

    let (status, _) = send!(app, promote(&uuid::Uuid::new_v4().to_string()));
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn ai_source_upload_and_update_check_references() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let ip = peer(10);
    insert_user(&storage, "zdroje@skola.sk", "heslo123", UserRole::Teacher).await;
    let subject = storage.create_subject("Biológia", None).await.unwrap();
    let token = login!(app, ip, "zdroje@skola.sk", "heslo123");

    // 空的 subject_id 视为未指定
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/ai-sources/upload")
            .peer_addr(ip)
            .insert_header(bearer(&token))
            .insert_header(multipart_header())
            .set_payload(multipart_body(
                &[
                    ("subject_id", String::new()),
                    ("description", "Bunka a jej časti".to_string()),
                ],
                Some(("bunka.txt", b"mitochondria".as_slice())),
            ))
    );
    assert_eq!(status, StatusCode::OK, "upload failed: {body}");
    assert_eq!(body["data"]["file_name"], "bunka.txt");
    let source_id = body["data"]["id"].as_str().unwrap().to_string();

    let stored = storage.get_ai_source_by_id(&source_id).await.unwrap().unwrap();
    assert!(stored.subject_id.is_none());
    assert_eq!(stored.description.as_deref(), Some("Bunka a jej časti"));

    // 文本字段超过上限
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/ai-sources/upload")
            .peer_addr(ip)
            .insert_header(bearer(&token))
            .insert_header(multipart_header())
            .set_payload(multipart_body(
                &[("description", "a".repeat(70 * 1024))],
                Some(("velky.txt", b"obsah".as_slice())),
            ))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7002);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/ai-sources/upload")
            .peer_addr(ip)
            .insert_header(bearer(&token))
            .insert_header(multipart_header())
            .set_payload(multipart_body(&[("description", "bez súboru".to_string())], None))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let update = |payload: Value| {
        test::TestRequest::put()
            .uri(&format!("/api/ai-sources/{source_id}"))
            .insert_header(bearer(&token))
            .set_json(payload)
    };

    let (status, body) = send!(app, update(json!({ "subject_id": uuid::Uuid::new_v4().to_string() })));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4200);

    let (status, body) = send!(app, update(json!({ "grade_id": "neexistuje" })));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4000);

    let (status, body) = send!(app, update(json!({ "subject_id": subject.id })));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["subject_id"], subject.id.as_str());

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/ai-sources")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"][0]["subject_name"], "Biológia");

    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/ai-sources/{source_id}"))
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn attachment_download_is_limited_to_uploader() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let ip = peer(11);
    insert_user(&storage, "owner@skola.sk", "heslo123", UserRole::Student).await;
    insert_user(&storage, "other@skola.sk", "heslo123", UserRole::Student).await;
    let owner_token = login!(app, ip, "owner@skola.sk", "heslo123");
    let other_token = login!(app, ip, "other@skola.sk", "heslo123");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/attachments/upload")
            .peer_addr(ip)
            .insert_header(bearer(&owner_token))
            .insert_header(multipart_header())
            .set_payload(multipart_body(&[], Some(("poznamky.txt", b"vzorec: E = mc^2".as_slice()))))
    );
    assert_eq!(status, StatusCode::OK, "upload failed: {body}");
    let attachment_id = body["data"]["id"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/attachments/{attachment_id}"))
            .insert_header(bearer(&owner_token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("poznamky.txt"));
    let bytes = test::read_body(resp).await;
    assert_eq!(&bytes[..], b"vzorec: E = mc^2");

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/attachments/{attachment_id}"))
            .insert_header(bearer(&other_token))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 7000);
}

#[actix_web::test]
async fn failed_model_call_stores_apology() {
    let storage = memory_storage().await;
    let app = init_app!(storage, Arc::new(FailingClient));
    let ip = peer(12);
    insert_user(&storage, "ospravedlnenie@skola.sk", "heslo123", UserRole::Student).await;
    let token = login!(app, ip, "ospravedlnenie@skola.sk", "heslo123");

    let (_, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/chats")
            .insert_header(bearer(&token))
            .set_json(json!({ "title": "Chémia" }))
    );
    let chat_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/chats/{chat_id}/messages"))
            .peer_addr(ip)
            .insert_header(bearer(&token))
            .set_json(json!({ "content": "Čo je mol?" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ai_message"]["content"], APOLOGY_REPLY);

    let messages = storage.list_messages(&chat_id, 10).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].content, APOLOGY_REPLY);
}

#[actix_web::test]
async fn expired_and_inactive_tokens_are_rejected() {
    let storage = memory_storage().await;
    let app = init_app!(storage);
    let user = insert_user(&storage, "stary@skola.sk", "heslo123", UserRole::Student).await;

    let expired = JwtUtils::generate_token_with_expiry(
        &user.id,
        &user.email,
        "student",
        chrono::Duration::hours(-1),
    )
    .unwrap();
    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(bearer(&expired))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 2002);

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(bearer("nie.je.token"))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let valid = JwtUtils::generate_token(&user).unwrap();
    storage
        .update_user(
            &user.id,
            UserUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(bearer(&valid))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
}

const FLASHCARD_REPLY: &str = r#"```json
[
  {"otazka": "Ako znie Pytagorova veta?", "odpoved": "a² + b² = c²"},
  {"otazka": "Čo je prepona?", "odpoved": "Najdlhšia strana pravouhlého trojuholníka"}
]
```"#;

const QUIZ_REPLY: &str = r#"[
  {"otazka": "Kde prebieha fotosyntéza?",
   "moznosti": ["A) V mitochondriách", "B) V chloroplastoch", "C) V jadre", "D) V ribozómoch"],
   "spravna": "B",
   "vysvetlenie": "Chlorofyl sa nachádza v chloroplastoch."}
]"#;

#[actix_web::test]
async fn study_tools_return_parsed_model_output() {
    let storage = memory_storage().await;
    let ip = peer(13);
    insert_user(&storage, "studium@skola.sk", "heslo123", UserRole::Student).await;
    let subject = storage.create_subject("Matematika", None).await.unwrap();
    let teacher = insert_user(&storage, "autor@skola.sk", "heslo123", UserRole::Teacher).await;
    storage
        .create_ai_source(pocketbuddy::models::ai_sources::requests::CreateAiSource {
            id: uuid::Uuid::new_v4().to_string(),
            uploaded_by_user_id: teacher.id.clone(),
            subject_id: Some(subject.id.clone()),
            grade_id: None,
            file_name: "Pytagorova veta.pdf".to_string(),
            file_path: "uploads/pytagoras.pdf".to_string(),
            description: Some("Pravouhlý trojuholník".to_string()),
        })
        .await
        .unwrap();

    let app = init_app!(storage, Arc::new(ScriptedClient(FLASHCARD_REPLY)));
    let token = login!(app, ip, "studium@skola.sk", "heslo123");

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/topics")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["topics"][0]["name"], "Pytagorova veta");
    assert_eq!(body["data"]["topics"][0]["subject_name"], "Matematika");
    assert_eq!(body["data"]["subjects"].as_array().unwrap().len(), 1);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/flashcards/generate")
            .insert_header(bearer(&token))
            .set_json(json!({ "topic": " Pytagorova veta ", "subject_id": subject.id, "count": 3 }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["topic"], "Pytagorova veta");
    let cards = body["data"]["flashcards"].as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0]["odpoved"], "a² + b² = c²");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/flashcards/generate")
            .insert_header(bearer(&token))
            .set_json(json!({ "topic": "  " }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 8000);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/flashcards/generate")
            .insert_header(bearer(&token))
            .set_json(json!({ "topic": "Pytagorova veta", "count": 50 }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 8001);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/flashcards/generate")
            .insert_header(bearer(&token))
            .set_json(json!({ "topic": "Pytagorova veta", "subject_id": uuid::Uuid::new_v4().to_string() }))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 测验回复不是卡片格式
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/quiz/generate")
            .insert_header(bearer(&token))
            .set_json(json!({ "topic": "Fotosyntéza", "question_count": 3 }))
    );
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], 8002);

    let quiz_app = init_app!(storage, Arc::new(ScriptedClient(QUIZ_REPLY)));
    let (status, body) = send!(
        quiz_app,
        test::TestRequest::post()
            .uri("/api/quiz/generate")
            .insert_header(bearer(&token))
            .set_json(json!({ "topic": "Fotosyntéza", "question_count": 3 }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["topic"], "Fotosyntéza");
    assert_eq!(body["data"]["questions"][0]["spravna"], "B");
    assert_eq!(body["data"]["questions"][0]["moznosti"].as_array().unwrap().len(), 4);
}

#[actix_web::test]
async fn study_tools_report_model_failure() {
    let storage = memory_storage().await;
    let app = init_app!(storage, Arc::new(FailingClient));
    let ip = peer(14);
    insert_user(&storage, "kviz@skola.sk", "heslo123", UserRole::Student).await;
    let token = login!(app, ip, "kviz@skola.sk", "heslo123");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/quiz/generate")
            .insert_header(bearer(&token))
            .set_json(json!({ "topic": "Fotosyntéza" }))
    );
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], 8002);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/flashcards/generate")
            .set_json(json!({ "topic": "Fotosyntéza" }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
