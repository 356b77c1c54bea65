mod common;

use std::collections::BTreeSet;

use common::{OTHER_TUTOR_EMAIL, TUTOR_EMAIL, TestApp};
use rust_tutor_portal::models::admin::catalog::EntityKind;
use rust_tutor_portal::models::auth::Caller;
use rust_tutor_portal::models::tickets::requests::CloseTicketRequest;
use rust_tutor_portal::models::tutors::requests::TutorSaveRequest;
use rust_tutor_portal::services::{StatusService, TicketService, TutorService};

async fn assign(app: &TestApp, email: &str, course: i64, working: bool, active: bool) {
    let admin = app.admin().await;
    app.tutor(email).await;
    TutorService::new(&app.ctx)
        .save(
            &admin,
            TutorSaveRequest {
                email: email.to_string(),
                is_working: Some(working),
                is_active: Some(active),
                courses: Some(BTreeSet::from([course])),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_only_displayed_courses_with_active_sections() {
    let app = TestApp::new().await;
    let catalog = app.seed_catalog().await;

    // 不展示的课程
    let hidden = app
        .create(EntityKind::Course, &[("number", "CS 999")])
        .await;
    app.create(
        EntityKind::Section,
        &[
            ("number", "1"),
            ("course_id", &hidden.to_string()),
            ("semester_id", &catalog.semester.to_string()),
        ],
    )
    .await;

    // 展示中但只有往期班次
    let past = app
        .create(
            EntityKind::Semester,
            &[
                ("year", "2023"),
                ("season", "Fall"),
                ("start_date", "2023-08-20"),
                ("end_date", "2023-12-15"),
            ],
        )
        .await;
    let retired = app
        .create(
            EntityKind::Course,
            &[("number", "CS 050"), ("on_display", "on")],
        )
        .await;
    app.create(
        EntityKind::Section,
        &[
            ("number", "1"),
            ("course_id", &retired.to_string()),
            ("semester_id", &past.to_string()),
        ],
    )
    .await;

    let board = StatusService::new(&app.ctx)
        .board(&Caller::anonymous())
        .await
        .unwrap();
    let courses: Vec<i64> = board.courses.iter().map(|s| s.course.id).collect();
    assert_eq!(courses, vec![catalog.course]);
    assert_eq!(board.courses[0].current_tickets, 0);
    assert!(board.courses[0].current_sections.is_empty());
}

#[tokio::test]
async fn test_pending_ticket_counts() {
    let app = TestApp::new().await;
    let catalog = app.seed_catalog().await;
    let tutor = app.tutor(TUTOR_EMAIL).await;
    let tickets = TicketService::new(&app.ctx);

    app.open_ticket(catalog.section, "a@example.edu").await;
    let claimed = app.open_ticket(catalog.section, "b@example.edu").await;
    tickets.claim(&tutor, claimed.id).await.unwrap();
    let closed = app.open_ticket(catalog.other_section, "c@example.edu").await;
    tickets
        .close(&tutor, closed.id, CloseTicketRequest::default())
        .await
        .unwrap();

    let board = StatusService::new(&app.ctx)
        .board(&Caller::anonymous())
        .await
        .unwrap();
    let status = &board.courses[0];
    assert_eq!(status.current_tickets, 2);
    let sections: Vec<i64> = status.current_sections.iter().map(|s| s.id).collect();
    assert_eq!(sections, vec![catalog.section]);
}

#[tokio::test]
async fn test_current_tutors_are_working_active_and_assigned() {
    let app = TestApp::new().await;
    let catalog = app.seed_catalog().await;
    let other_course = app
        .create(EntityKind::Course, &[("number", "CS 102")])
        .await;

    assign(&app, TUTOR_EMAIL, catalog.course, true, true).await;
    assign(&app, OTHER_TUTOR_EMAIL, catalog.course, false, true).await;
    assign(&app, "retired@example.edu", catalog.course, true, false).await;
    assign(&app, "elsewhere@example.edu", other_course, true, true).await;

    let board = StatusService::new(&app.ctx)
        .board(&Caller::anonymous())
        .await
        .unwrap();
    let tutors: Vec<&str> = board.courses[0]
        .current_tutors
        .iter()
        .map(|t| t.email.as_str())
        .collect();
    assert_eq!(tutors, vec![TUTOR_EMAIL]);
}

#[tokio::test]
async fn test_messages_shown_within_window() {
    let app = TestApp::new().await;

    let today = app
        .create(
            EntityKind::Message,
            &[
                ("message", "Closed early today"),
                ("start_date", "2024-03-05"),
                ("end_date", "2024-03-05"),
            ],
        )
        .await;
    let open_ended = app
        .create(EntityKind::Message, &[("message", "Welcome back")])
        .await;
    app.create(
        EntityKind::Message,
        &[
            ("message", "Finals week hours"),
            ("start_date", "2024-05-01"),
        ],
    )
    .await;
    app.create(
        EntityKind::Message,
        &[("message", "Snow day"), ("end_date", "2024-02-01")],
    )
    .await;

    let board = StatusService::new(&app.ctx)
        .board(&Caller::anonymous())
        .await
        .unwrap();
    let shown: BTreeSet<i64> = board.messages.iter().map(|m| m.id).collect();
    assert_eq!(shown, BTreeSet::from([today, open_ended]));
}

#[tokio::test]
async fn test_open_tickets_only_for_tutors() {
    let app = TestApp::new().await;
    let catalog = app.seed_catalog().await;
    let ticket = app.open_ticket(catalog.section, "s@example.edu").await;
    let service = StatusService::new(&app.ctx);

    let anonymous = service.board(&Caller::anonymous()).await.unwrap();
    assert!(anonymous.open_tickets.is_none());

    let tutor = app.tutor(TUTOR_EMAIL).await;
    let board = service.board(&tutor).await.unwrap();
    let open: Vec<i64> = board
        .open_tickets
        .unwrap_or_default()
        .iter()
        .map(|d| d.ticket.id)
        .collect();
    assert_eq!(open, vec![ticket.id]);
}
