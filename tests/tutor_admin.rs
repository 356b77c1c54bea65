mod common;

use std::collections::BTreeSet;

use common::{ADMIN_EMAIL, OTHER_TUTOR_EMAIL, TUTOR_EMAIL, TestApp};
use rust_tutor_portal::errors::PortalError;
use rust_tutor_portal::models::admin::catalog::EntityKind;
use rust_tutor_portal::models::auth::{Caller, LoginRequest};
use rust_tutor_portal::models::tickets::requests::CloseTicketRequest;
use rust_tutor_portal::models::tutors::{
    requests::TutorSaveRequest, responses::TutorSaveOutcome,
};
use rust_tutor_portal::services::{AuthService, TicketService, TutorService};

fn save_request(email: &str) -> TutorSaveRequest {
    TutorSaveRequest {
        email: email.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_admin_creates_tutor_with_courses() {
    let app = TestApp::new().await;
    let catalog = app.seed_catalog().await;
    let admin = app.admin().await;
    let service = TutorService::new(&app.ctx);

    let outcome = service
        .save(
            &admin,
            TutorSaveRequest {
                new: true,
                fname: Some(Some("Grace".into())),
                lname: Some(Some("Hopper".into())),
                password: Some("Compiler1952".into()),
                is_working: Some(true),
                // 不存在的课程被忽略
                courses: Some(BTreeSet::from([catalog.course, 4242])),
                ..save_request("Grace@Example.edu")
            },
        )
        .await
        .unwrap();
    let TutorSaveOutcome::Created { tutor } = outcome else {
        panic!("expected create");
    };
    assert_eq!(tutor.email, "grace@example.edu");
    assert!(tutor.is_active);
    assert!(tutor.is_working);
    assert!(!tutor.is_superuser);

    let form = service.edit(&admin, Some("grace@example.edu")).await.unwrap();
    assert_eq!(form.assigned, BTreeSet::from([catalog.course]));
    assert_eq!(form.courses.len(), 1);

    // 新密码可以登录
    let login = AuthService::new(&app.ctx)
        .login(LoginRequest {
            email: "grace@example.edu".into(),
            password: "Compiler1952".into(),
        })
        .await
        .unwrap();
    assert_eq!(login.tutor.email, "grace@example.edu");
}

#[tokio::test]
async fn test_duplicate_and_missing_tutors() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    app.tutor(TUTOR_EMAIL).await;
    let service = TutorService::new(&app.ctx);

    let duplicate = service
        .save(
            &admin,
            TutorSaveRequest {
                new: true,
                ..save_request(TUTOR_EMAIL)
            },
        )
        .await;
    assert!(matches!(duplicate, Err(PortalError::Validation(_))));

    let missing = service
        .save(&admin, save_request("nobody@example.edu"))
        .await;
    assert!(matches!(missing, Err(PortalError::NotFound(_))));

    let weak_password = service
        .save(
            &admin,
            TutorSaveRequest {
                password: Some("short".into()),
                ..save_request(TUTOR_EMAIL)
            },
        )
        .await;
    assert!(matches!(weak_password, Err(PortalError::Validation(_))));
}

#[tokio::test]
async fn test_tutor_edits_only_own_record() {
    let app = TestApp::new().await;
    let tutor = app.tutor(TUTOR_EMAIL).await;
    app.tutor(OTHER_TUTOR_EMAIL).await;
    let service = TutorService::new(&app.ctx);

    let other = service.edit(&tutor, Some(OTHER_TUTOR_EMAIL)).await;
    assert!(matches!(other, Err(PortalError::Forbidden(_))));

    let new_form = service.edit(&tutor, None).await;
    assert!(matches!(new_form, Err(PortalError::Forbidden(_))));

    let list = service.list(&tutor).await;
    assert!(matches!(list, Err(PortalError::Forbidden(_))));

    let outcome = service
        .save(
            &tutor,
            TutorSaveRequest {
                is_working: Some(true),
                is_superuser: Some(true),
                is_active: Some(false),
                ..save_request(TUTOR_EMAIL)
            },
        )
        .await
        .unwrap();
    let TutorSaveOutcome::Updated { tutor: saved } = outcome else {
        panic!("expected update");
    };
    assert!(saved.is_working);
    assert!(!saved.is_superuser);
    assert!(saved.is_active);

    let delete = service
        .save(
            &tutor,
            TutorSaveRequest {
                action: Some("delete".into()),
                ..save_request(TUTOR_EMAIL)
            },
        )
        .await;
    assert!(matches!(delete, Err(PortalError::Forbidden(_))));

    let anonymous = service
        .save(&Caller::anonymous(), save_request(TUTOR_EMAIL))
        .await;
    assert!(matches!(anonymous, Err(PortalError::Forbidden(_))));
}

#[tokio::test]
async fn test_course_set_is_reconciled() {
    let app = TestApp::new().await;
    let catalog = app.seed_catalog().await;
    let second_course = app
        .create(EntityKind::Course, &[("number", "CS 102")])
        .await;
    let admin = app.admin().await;
    app.tutor(TUTOR_EMAIL).await;
    let service = TutorService::new(&app.ctx);

    let assign = |courses: BTreeSet<i64>| TutorSaveRequest {
        courses: Some(courses),
        ..save_request(TUTOR_EMAIL)
    };

    service
        .save(&admin, assign(BTreeSet::from([catalog.course])))
        .await
        .unwrap();
    service
        .save(&admin, assign(BTreeSet::from([second_course])))
        .await
        .unwrap();
    assert_eq!(
        app.storage().tutor_course_ids(TUTOR_EMAIL).await.unwrap(),
        BTreeSet::from([second_course])
    );

    // 不带课程字段时保持原有课程
    service.save(&admin, save_request(TUTOR_EMAIL)).await.unwrap();
    assert_eq!(
        app.storage().tutor_course_ids(TUTOR_EMAIL).await.unwrap(),
        BTreeSet::from([second_course])
    );
}

#[tokio::test]
async fn test_deleting_tutor_detaches_tickets() {
    let app = TestApp::new().await;
    let catalog = app.seed_catalog().await;
    let admin = app.admin().await;
    let tutor = app.tutor(TUTOR_EMAIL).await;
    let ticket = app.open_ticket(catalog.section, "s@example.edu").await;
    let tickets = TicketService::new(&app.ctx);
    tickets.claim(&tutor, ticket.id).await.unwrap();
    tickets
        .close(&tutor, ticket.id, CloseTicketRequest::default())
        .await
        .unwrap();
    let closed = app.storage().get_ticket(ticket.id).await.unwrap().unwrap();
    assert_eq!(closed.tutor_email.as_deref(), Some(TUTOR_EMAIL));

    let outcome = TutorService::new(&app.ctx)
        .save(
            &admin,
            TutorSaveRequest {
                action: Some("delete".into()),
                ..save_request(TUTOR_EMAIL)
            },
        )
        .await
        .unwrap();
    assert_eq!(
        outcome,
        TutorSaveOutcome::Deleted {
            email: TUTOR_EMAIL.into()
        }
    );

    let kept = app.storage().get_ticket(ticket.id).await.unwrap().unwrap();
    assert_eq!(kept.tutor_email, None);
    assert!(app.storage().get_tutor(TUTOR_EMAIL).await.unwrap().is_none());
}

#[tokio::test]
async fn test_tutors_listed_by_name() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    app.tutor("zed@example.edu").await;
    app.tutor("amy@example.edu").await;

    let tutors = TutorService::new(&app.ctx).list(&admin).await.unwrap();
    let emails: Vec<&str> = tutors.iter().map(|t| t.email.as_str()).collect();
    // 夹具里的姓是邮箱的用户名部分
    assert_eq!(emails, vec![ADMIN_EMAIL, "amy@example.edu", "zed@example.edu"]);
}

#[tokio::test]
async fn test_inactive_tutor_cannot_login() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    app.tutor(TUTOR_EMAIL).await;
    let service = TutorService::new(&app.ctx);

    service
        .save(
            &admin,
            TutorSaveRequest {
                password: Some("Tutoring2024".into()),
                is_active: Some(false),
                ..save_request(TUTOR_EMAIL)
            },
        )
        .await
        .unwrap();

    let login = AuthService::new(&app.ctx)
        .login(LoginRequest {
            email: TUTOR_EMAIL.into(),
            password: "Tutoring2024".into(),
        })
        .await;
    assert!(matches!(login, Err(PortalError::Authentication(_))));
}
