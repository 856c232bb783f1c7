use super::SeaOrmStorage;
use crate::models::ai_sources::requests::{AiSourceFilter, AiSourceUpdate, CreateAiSource};
use crate::models::attachments::entities::{AttachmentKind, CreateAttachment};
use crate::models::chats::entities::SenderType;
use crate::models::registrations::entities::{ProcessOutcome, RegistrationStatus};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::{CreateUserRequest, UserListQuery, UserUpdate};
use crate::storage::{Storage, TaxonomySeed};

async fn storage() -> SeaOrmStorage {
    SeaOrmStorage::new_in_memory()
        .await
        .expect("in-memory storage")
}

fn new_user(email: &str, role: UserRole) -> CreateUserRequest {
    CreateUserRequest {
        email: email.to_string(),
        password_hash: "hash".to_string(),
        first_name: "Ján".to_string(),
        last_name: "Novák".to_string(),
        role,
        is_approved: true,
        is_active: true,
    }
}

fn small_seed() -> TaxonomySeed {
    TaxonomySeed {
        grades: vec![("1. ročník".to_string(), 1), ("2. ročník".to_string(), 2)],
        subjects: vec![("Matematika".to_string(), Some("Algebra".to_string()))],
        classes: vec![("1.A".to_string(), 0), ("2.A".to_string(), 1)],
    }
}

#[tokio::test]
async fn register_then_approve_activates_user() {
    let s = storage().await;
    let admin = s.create_user(new_user("admin@x.sk", UserRole::Admin)).await.unwrap();

    let mut req = new_user("student@x.sk", UserRole::Student);
    req.is_approved = false;
    req.is_active = false;
    let (user, registration) = s.register_user(req).await.unwrap();
    assert!(!user.is_approved);
    assert_eq!(registration.status, RegistrationStatus::Pending);
    assert_eq!(s.list_pending_registrations().await.unwrap().len(), 1);

    let outcome = s.approve_registration(&registration.id, &admin.id).await.unwrap();
    let ProcessOutcome::Processed(processed) = outcome else {
        panic!("expected processed");
    };
    assert_eq!(processed.status, RegistrationStatus::Approved);
    assert_eq!(processed.processed_by_admin_id.as_deref(), Some(admin.id.as_str()));

    let user = s.get_user_by_id(&user.id).await.unwrap().unwrap();
    assert!(user.is_approved);
    assert!(user.is_active);
    assert!(s.list_pending_registrations().await.unwrap().is_empty());

    // 第二次处理被拒绝
    let again = s.reject_registration(&registration.id, &admin.id).await.unwrap();
    assert!(matches!(
        again,
        ProcessOutcome::AlreadyProcessed(RegistrationStatus::Approved)
    ));
}

#[tokio::test]
async fn reject_deletes_user() {
    let s = storage().await;
    let admin = s.create_user(new_user("admin@x.sk", UserRole::Admin)).await.unwrap();
    let (user, registration) = s
        .register_user(new_user("t@x.sk", UserRole::Teacher))
        .await
        .unwrap();

    let outcome = s.reject_registration(&registration.id, &admin.id).await.unwrap();
    assert!(matches!(outcome, ProcessOutcome::Processed(_)));
    assert!(s.get_user_by_id(&user.id).await.unwrap().is_none());

    let missing = s.approve_registration("nope", &admin.id).await.unwrap();
    assert!(matches!(missing, ProcessOutcome::NotFound));
}

#[tokio::test]
async fn list_users_filters_and_paginates() {
    let s = storage().await;
    s.create_user(new_user("a@x.sk", UserRole::Student)).await.unwrap();
    s.create_user(new_user("b@x.sk", UserRole::Student)).await.unwrap();
    s.create_user(new_user("c@x.sk", UserRole::Teacher)).await.unwrap();

    let page = s
        .list_users_with_pagination(UserListQuery {
            page: 1,
            size: 1,
            role: Some(UserRole::Student),
            search: None,
        })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.pagination.total, 2);

    let found = s
        .list_users_with_pagination(UserListQuery {
            page: 1,
            size: 20,
            role: None,
            search: Some("c@".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(found.items.len(), 1);
    assert_eq!(found.items[0].email, "c@x.sk");
}

#[tokio::test]
async fn seed_is_idempotent() {
    let s = storage().await;
    assert!(s.seed_taxonomy(small_seed()).await.unwrap());
    assert!(!s.seed_taxonomy(small_seed()).await.unwrap());

    let grades = s.list_grades().await.unwrap();
    assert_eq!(grades.len(), 2);
    assert_eq!(grades[0].order, 1);
    assert_eq!(s.list_classes().await.unwrap().len(), 2);
    assert_eq!(s.list_subjects().await.unwrap().len(), 1);

    let second = s.get_grade_by_order(2).await.unwrap().unwrap();
    assert_eq!(second.name, "2. ročník");
}

#[tokio::test]
async fn deleting_grade_clears_references() {
    let s = storage().await;
    s.seed_taxonomy(small_seed()).await.unwrap();
    let grade = s.get_grade_by_order(1).await.unwrap().unwrap();
    let class = s
        .list_classes()
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.grade_id == grade.id)
        .unwrap();

    let student = s.create_user(new_user("s@x.sk", UserRole::Student)).await.unwrap();
    s.update_user(
        &student.id,
        UserUpdate {
            grade_id: Some(Some(grade.id.clone())),
            class_id: Some(Some(class.id.clone())),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(s.delete_grade_cascade(&grade.id).await.unwrap());
    assert!(!s.delete_grade_cascade(&grade.id).await.unwrap());

    let student = s.get_user_by_id(&student.id).await.unwrap().unwrap();
    assert!(student.grade_id.is_none());
    assert!(student.class_id.is_none());
    assert!(s.get_class_by_id(&class.id).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_class_clears_user_class() {
    let s = storage().await;
    s.seed_taxonomy(small_seed()).await.unwrap();
    let grade = s.get_grade_by_order(2).await.unwrap().unwrap();
    let class = s.create_class("2.B", &grade.id).await.unwrap();

    let student = s.create_user(new_user("c@x.sk", UserRole::Student)).await.unwrap();
    s.update_user(
        &student.id,
        UserUpdate {
            grade_id: Some(Some(grade.id.clone())),
            class_id: Some(Some(class.id.clone())),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(s.delete_class_cascade(&class.id).await.unwrap());
    assert!(!s.delete_class_cascade(&class.id).await.unwrap());

    // 年级保持不变
    let student = s.get_user_by_id(&student.id).await.unwrap().unwrap();
    assert!(student.class_id.is_none());
    assert_eq!(student.grade_id.as_deref(), Some(grade.id.as_str()));
    assert!(s.get_grade_by_id(&grade.id).await.unwrap().is_some());
}

#[tokio::test]
async fn deleting_subject_removes_assignments_and_source_links() {
    let s = storage().await;
    let teacher = s.create_user(new_user("u@x.sk", UserRole::Teacher)).await.unwrap();
    let subject = s.create_subject("Fyzika", None).await.unwrap();
    let other = s.create_subject("Chémia", None).await.unwrap();

    s.create_teacher_subject(&teacher.id, &subject.id, None)
        .await
        .unwrap();
    s.create_teacher_subject(&teacher.id, &other.id, None)
        .await
        .unwrap();
    let source = s
        .create_ai_source(CreateAiSource {
            id: "src-fyzika".to_string(),
            uploaded_by_user_id: teacher.id.clone(),
            subject_id: Some(subject.id.clone()),
            grade_id: None,
            file_name: "pohyb.pdf".to_string(),
            file_path: "uploads/src-fyzika.pdf".to_string(),
            description: None,
        })
        .await
        .unwrap();

    assert!(s.delete_subject_cascade(&subject.id).await.unwrap());
    assert!(s.get_subject_by_id(&subject.id).await.unwrap().is_none());

    let remaining = s.list_teacher_subjects(&teacher.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].subject_id, other.id);

    let source = s.get_ai_source_by_id(&source.id).await.unwrap().unwrap();
    assert!(source.subject_id.is_none());
}

#[tokio::test]
async fn teacher_subject_lookup_respects_grade() {
    let s = storage().await;
    s.seed_taxonomy(small_seed()).await.unwrap();
    let teacher = s.create_user(new_user("t@x.sk", UserRole::Teacher)).await.unwrap();
    let subject = s.list_subjects().await.unwrap().remove(0);
    let grade = s.get_grade_by_order(1).await.unwrap().unwrap();

    let assignment = s
        .create_teacher_subject(&teacher.id, &subject.id, Some(grade.id.clone()))
        .await
        .unwrap();

    let same = s
        .find_teacher_subject(&teacher.id, &subject.id, Some(&grade.id))
        .await
        .unwrap();
    assert!(same.is_some());
    let without_grade = s
        .find_teacher_subject(&teacher.id, &subject.id, None)
        .await
        .unwrap();
    assert!(without_grade.is_none());

    // 只能删除自己的分配
    assert!(!s.delete_teacher_subject(&assignment.id, "other").await.unwrap());
    assert!(s.delete_teacher_subject(&assignment.id, &teacher.id).await.unwrap());
    assert!(s.list_teacher_subjects(&teacher.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn ai_source_filters() {
    let s = storage().await;
    s.seed_taxonomy(small_seed()).await.unwrap();
    let teacher = s.create_user(new_user("t@x.sk", UserRole::Teacher)).await.unwrap();
    let g1 = s.get_grade_by_order(1).await.unwrap().unwrap();
    let g2 = s.get_grade_by_order(2).await.unwrap().unwrap();

    for (id, grade) in [("s1", Some(g1.id.clone())), ("s2", Some(g2.id.clone())), ("s3", None)] {
        s.create_ai_source(CreateAiSource {
            id: id.to_string(),
            uploaded_by_user_id: teacher.id.clone(),
            subject_id: None,
            grade_id: grade,
            file_name: format!("{id}.pdf"),
            file_path: format!("uploads/{id}.pdf"),
            description: None,
        })
        .await
        .unwrap();
    }

    s.update_ai_source(
        "s3",
        AiSourceUpdate {
            is_active: Some(false),
            description: Some(Some("staré".to_string())),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    let for_grade1 = s
        .list_ai_sources(AiSourceFilter {
            active_only: true,
            grade_or_unassigned: Some(g1.id.clone()),
            ..Default::default()
        })
        .await
        .unwrap();
    let ids: Vec<_> = for_grade1.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["s1"]);

    let mine = s
        .list_ai_sources(AiSourceFilter {
            uploaded_by: Some(teacher.id.clone()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(mine.len(), 3);

    assert!(s.delete_ai_source("s2").await.unwrap());
    assert!(s.get_ai_source_by_id("s2").await.unwrap().is_none());
    assert!(s.update_ai_source("s2", AiSourceUpdate::default()).await.unwrap().is_none());
}

#[tokio::test]
async fn chat_messages_keep_insert_order() {
    let s = storage().await;
    let user = s.create_user(new_user("s@x.sk", UserRole::Student)).await.unwrap();
    let chat = s.create_chat(&user.id, "Nová konverzácia").await.unwrap();

    for i in 0..5 {
        let sender = if i % 2 == 0 { SenderType::User } else { SenderType::Ai };
        s.create_message(&chat.id, sender, None, &format!("m{i}"))
            .await
            .unwrap();
    }

    let all = s.list_messages(&chat.id, 100).await.unwrap();
    let contents: Vec<_> = all.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["m0", "m1", "m2", "m3", "m4"]);

    let recent = s.list_recent_messages(&chat.id, 2).await.unwrap();
    let contents: Vec<_> = recent.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, vec!["m3", "m4"]);
}

#[tokio::test]
async fn soft_deleted_chat_is_hidden() {
    let s = storage().await;
    let user = s.create_user(new_user("s@x.sk", UserRole::Student)).await.unwrap();
    let chat = s.create_chat(&user.id, "A").await.unwrap();

    assert!(s.get_active_chat(&chat.id, "someone-else").await.unwrap().is_none());
    assert!(s.soft_delete_chat(&chat.id, &user.id).await.unwrap());
    assert!(!s.soft_delete_chat(&chat.id, &user.id).await.unwrap());
    assert!(s.get_active_chat(&chat.id, &user.id).await.unwrap().is_none());
    assert!(s.list_chats(&user.id, 50).await.unwrap().is_empty());
}

#[tokio::test]
async fn link_attachments_only_own_and_unlinked() {
    let s = storage().await;
    let user = s.create_user(new_user("s@x.sk", UserRole::Student)).await.unwrap();
    let other = s.create_user(new_user("o@x.sk", UserRole::Student)).await.unwrap();
    let chat = s.create_chat(&user.id, "A").await.unwrap();
    let message = s
        .create_message(&chat.id, SenderType::User, Some(user.id.clone()), "ahoj")
        .await
        .unwrap();

    for (id, owner) in [("a1", &user.id), ("a2", &other.id)] {
        s.create_attachment(CreateAttachment {
            id: id.to_string(),
            uploaded_by_user_id: owner.clone(),
            kind: AttachmentKind::Chat,
            file_name: format!("{id}.png"),
            file_path: format!("uploads/chat_{id}.png"),
            file_type: "image/png".to_string(),
            file_size: 10,
        })
        .await
        .unwrap();
    }

    let linked = s
        .link_attachments(&message.id, &["a1".to_string(), "a2".to_string()], &user.id)
        .await
        .unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id, "a1");
    assert_eq!(linked[0].message_id.as_deref(), Some(message.id.as_str()));

    let other_attachment = s.get_attachment_by_id("a2").await.unwrap().unwrap();
    assert!(other_attachment.message_id.is_none());
}

#[tokio::test]
async fn delete_user_cascade_returns_file_paths() {
    let s = storage().await;
    let user = s.create_user(new_user("s@x.sk", UserRole::Student)).await.unwrap();
    let chat = s.create_chat(&user.id, "A").await.unwrap();
    let message = s
        .create_message(&chat.id, SenderType::User, Some(user.id.clone()), "ahoj")
        .await
        .unwrap();
    s.create_attachment(CreateAttachment {
        id: "a1".to_string(),
        uploaded_by_user_id: user.id.clone(),
        kind: AttachmentKind::Chat,
        file_name: "a1.png".to_string(),
        file_path: "uploads/chat_a1.png".to_string(),
        file_type: "image/png".to_string(),
        file_size: 10,
    })
    .await
    .unwrap();
    s.link_attachments(&message.id, &["a1".to_string()], &user.id)
        .await
        .unwrap();

    let paths = s.delete_user_cascade(&user.id).await.unwrap().unwrap();
    assert_eq!(paths, vec!["uploads/chat_a1.png".to_string()]);
    assert!(s.get_user_by_id(&user.id).await.unwrap().is_none());
    assert!(s.get_attachment_by_id("a1").await.unwrap().is_none());
    assert!(s.delete_user_cascade(&user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn statistics_count_roles_and_pending() {
    let s = storage().await;
    s.create_user(new_user("admin@x.sk", UserRole::Admin)).await.unwrap();
    s.create_user(new_user("s@x.sk", UserRole::Student)).await.unwrap();
    s.register_user(new_user("t@x.sk", UserRole::Teacher)).await.unwrap();

    let stats = s.get_statistics().await.unwrap();
    assert_eq!(stats.total_users, 3);
    assert_eq!(stats.students, 1);
    assert_eq!(stats.teachers, 1);
    assert_eq!(stats.pending_requests, 1);
    assert_eq!(stats.total_chats, 0);
    assert_eq!(s.count_admins().await.unwrap(), 1);
}
