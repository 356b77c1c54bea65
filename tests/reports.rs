mod common;

use chrono::Duration;

use common::{Catalog, TUTOR_EMAIL, TestApp};
use rust_tutor_portal::errors::PortalError;
use rust_tutor_portal::models::admin::catalog::EntityKind;
use rust_tutor_portal::models::auth::Caller;
use rust_tutor_portal::models::reports::{requests::ReportQuery, responses::REPORT_HEADERS};
use rust_tutor_portal::models::tickets::requests::CloseTicketRequest;
use rust_tutor_portal::services::{ReportService, TicketService};

fn query(pairs: &[(&str, &str)]) -> ReportQuery {
    let mut query = ReportQuery::default();
    for (key, value) in pairs {
        let value = Some(value.to_string());
        match *key {
            "min_date" => query.min_date = value,
            "max_date" => query.max_date = value,
            "semester" => query.semester = value,
            "course" => query.course = value,
            other => panic!("unknown report param {other}"),
        }
    }
    query
}

/// 秋季学期另开一门课程，返回 (学期, 课程, 班次)
async fn fall_catalog(app: &TestApp) -> (i64, i64, i64) {
    let semester = app
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
    let course = app
        .create(EntityKind::Course, &[("number", "CS 201")])
        .await;
    let section = app
        .create(
            EntityKind::Section,
            &[
                ("number", "3"),
                ("course_id", &course.to_string()),
                ("semester_id", &semester.to_string()),
            ],
        )
        .await;
    (semester, course, section)
}

async fn ids(app: &TestApp, pairs: &[(&str, &str)]) -> Vec<i64> {
    let admin = app.admin().await;
    ReportService::new(&app.ctx)
        .reports(&admin, &query(pairs))
        .await
        .unwrap()
        .tickets
        .iter()
        .map(|d| d.ticket.id)
        .collect()
}

#[tokio::test]
async fn test_reports_require_superuser() {
    let app = TestApp::new().await;
    let tutor = app.tutor(TUTOR_EMAIL).await;
    let service = ReportService::new(&app.ctx);

    for caller in [Caller::anonymous(), tutor] {
        assert!(matches!(
            service.reports(&caller, &ReportQuery::default()).await,
            Err(PortalError::Forbidden(_))
        ));
        assert!(matches!(
            service.export_csv(&caller, &ReportQuery::default()).await,
            Err(PortalError::Forbidden(_))
        ));
        assert!(matches!(
            service.ticket(&caller, 1).await,
            Err(PortalError::Forbidden(_))
        ));
    }
}

#[tokio::test]
async fn test_date_filters_include_whole_days() {
    let app = TestApp::new().await;
    let Catalog { section, .. } = app.seed_catalog().await;

    // 03-03 10:00 和 03-05 10:00 各一张
    app.clock.advance(Duration::days(-2));
    let early = app.open_ticket(section, "early@example.edu").await;
    app.clock.advance(Duration::days(2));
    let late = app.open_ticket(section, "late@example.edu").await;

    // 新的在前
    assert_eq!(ids(&app, &[]).await, vec![late.id, early.id]);
    assert_eq!(ids(&app, &[("min_date", "2024-03-04")]).await, vec![late.id]);
    assert_eq!(ids(&app, &[("max_date", "2024-03-03")]).await, vec![early.id]);
    assert_eq!(
        ids(&app, &[("min_date", "2024-03-05"), ("max_date", "2024-03-05")]).await,
        vec![late.id]
    );
    assert!(ids(&app, &[("min_date", "2024-03-06")]).await.is_empty());
}

#[tokio::test]
async fn test_semester_and_course_filters() {
    let app = TestApp::new().await;
    let catalog = app.seed_catalog().await;
    let (fall, fall_course, fall_section) = fall_catalog(&app).await;

    let spring_ticket = app.open_ticket(catalog.section, "a@example.edu").await;
    let fall_ticket = app.open_ticket(fall_section, "b@example.edu").await;

    assert_eq!(
        ids(&app, &[("semester", &fall.to_string())]).await,
        vec![fall_ticket.id]
    );
    assert_eq!(
        ids(&app, &[("course", &catalog.course.to_string())]).await,
        vec![spring_ticket.id]
    );
    assert!(
        ids(
            &app,
            &[
                ("semester", &catalog.semester.to_string()),
                ("course", &fall_course.to_string()),
            ],
        )
        .await
        .is_empty()
    );

    let admin = app.admin().await;
    let page = ReportService::new(&app.ctx)
        .reports(&admin, &ReportQuery::default())
        .await
        .unwrap();
    assert_eq!(page.semesters.len(), 2);
    assert_eq!(page.courses.len(), 2);
}

#[tokio::test]
async fn test_invalid_params_are_rejected() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let service = ReportService::new(&app.ctx);

    for pairs in [
        [("min_date", "March 1")],
        [("max_date", "2024-13-01")],
        [("semester", "spring")],
        [("course", "1.5")],
    ] {
        let result = service.reports(&admin, &query(&pairs)).await;
        assert!(
            matches!(result, Err(PortalError::Validation(_))),
            "{pairs:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn test_csv_export_rows() {
    let app = TestApp::new().await;
    let catalog = app.seed_catalog().await;
    let tutor = app.tutor(TUTOR_EMAIL).await;
    let ticket = app.open_ticket(catalog.section, "s@example.edu").await;
    app.clock.advance(Duration::minutes(15));
    TicketService::new(&app.ctx)
        .close(
            &tutor,
            ticket.id,
            CloseTicketRequest {
                problem_type_id: Some(Some(catalog.problem_type)),
                was_successful: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let admin = app.admin().await;
    let data = ReportService::new(&app.ctx)
        .export_csv(&admin, &ReportQuery::default())
        .await
        .unwrap();

    let mut reader = csv::Reader::from_reader(data.as_slice());
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, REPORT_HEADERS);

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(&row[0], format!("/reports/ticket/{}", ticket.id));
    assert_eq!(&row[1], "s@example.edu");
    assert_eq!(&row[6], "Debugging");
    assert_eq!(&row[8], "2024-03-05 10:00:00");
    assert_eq!(&row[9], "2024-03-05 10:15:00");
    assert_eq!(&row[10], "true");
    assert_eq!(&row[11], TUTOR_EMAIL);
    assert_eq!(&row[12], "");
    assert_eq!(&row[13], "Spring 2024");
    assert_eq!(&row[14], "CS 101");
    assert_eq!(&row[15], "1");
}

#[tokio::test]
async fn test_report_ticket_detail() {
    let app = TestApp::new().await;
    let catalog = app.seed_catalog().await;
    let ticket = app.open_ticket(catalog.section, "s@example.edu").await;
    let admin = app.admin().await;
    let service = ReportService::new(&app.ctx);

    let detail = service.ticket(&admin, ticket.id).await.unwrap();
    assert_eq!(detail.ticket.student_email, "s@example.edu");
    assert_eq!(detail.section.map(|s| s.id), Some(catalog.section));

    assert!(matches!(
        service.ticket(&admin, 12345).await,
        Err(PortalError::NotFound(_))
    ));
}
