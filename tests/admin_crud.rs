mod common;

use common::{TUTOR_EMAIL, TestApp, form};
use rust_tutor_portal::errors::PortalError;
use rust_tutor_portal::models::admin::{
    catalog::{EntityKind, FieldValue, coerce_form},
    entities::AdminEntity,
    responses::AdminSaveOutcome,
};
use rust_tutor_portal::models::auth::Caller;
use rust_tutor_portal::services::AdminService;

#[tokio::test]
async fn test_admin_requires_superuser() {
    let app = TestApp::new().await;
    let tutor = app.tutor(TUTOR_EMAIL).await;
    let service = AdminService::new(&app.ctx);

    assert!(matches!(
        service.index(&Caller::anonymous()),
        Err(PortalError::Forbidden(_))
    ));
    assert!(matches!(
        service.list(&tutor, EntityKind::Course).await,
        Err(PortalError::Forbidden(_))
    ));
    let save = service
        .save(&tutor, EntityKind::Course, form(&[("number", "CS 200")]))
        .await;
    assert!(matches!(save, Err(PortalError::Forbidden(_))));

    let admin = app.admin().await;
    let index = service.index(&admin).unwrap();
    assert_eq!(index.len(), 6);
    assert_eq!(index[4].slug, "problems");
}

#[tokio::test]
async fn test_create_update_delete_course() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let service = AdminService::new(&app.ctx);

    let id = app
        .create(EntityKind::Course, &[("number", "MATH 221"), ("name", "Calculus")])
        .await;

    // 复选框缺失即为 false
    let Some(AdminEntity::Course(course)) =
        app.storage().get_entity(EntityKind::Course, id).await.unwrap()
    else {
        panic!("course not stored");
    };
    assert!(!course.on_display);

    let updated = service
        .save(
            &admin,
            EntityKind::Course,
            form(&[
                ("id", &id.to_string()),
                ("number", "MATH 221"),
                ("name", ""),
                ("on_display", "on"),
            ]),
        )
        .await
        .unwrap();
    let AdminSaveOutcome::Updated { entity } = updated else {
        panic!("expected update");
    };
    let fields = entity.fields();
    assert_eq!(fields.get("name"), Some(&FieldValue::Null));
    assert_eq!(fields.get("on_display"), Some(&FieldValue::Boolean(true)));

    let deleted = service
        .save(
            &admin,
            EntityKind::Course,
            form(&[("id", &id.to_string()), ("action", "delete")]),
        )
        .await
        .unwrap();
    assert_eq!(
        deleted,
        AdminSaveOutcome::Deleted {
            kind: EntityKind::Course,
            id
        }
    );
    assert!(
        app.storage()
            .get_entity(EntityKind::Course, id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_created_entities_read_back_coerced_fields() {
    let app = TestApp::new().await;
    let catalog = app.seed_catalog().await;
    let storage = app.storage();

    let semester_form = form(&[
        ("year", " 2025 "),
        ("season", "Summer"),
        ("start_date", "2025-06-01"),
        ("end_date", "2025-08-15"),
    ]);
    let section_form = form(&[
        ("number", "7"),
        ("time", "TR 14:00"),
        ("course_id", &catalog.course.to_string()),
        ("semester_id", &catalog.semester.to_string()),
        ("professor_id", ""),
    ]);

    for (kind, raw) in [
        (EntityKind::Semester, semester_form),
        (EntityKind::Section, section_form),
    ] {
        let fields = coerce_form(kind, &raw).unwrap();
        let created = storage.create_entity(kind, fields.clone()).await.unwrap();
        let stored = storage
            .get_entity(kind, created.id())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(stored, created);
        assert_eq!(stored.fields(), fields, "{kind:?} fields differ after reload");
    }
}

#[tokio::test]
async fn test_repeated_update_is_idempotent() {
    let app = TestApp::new().await;
    let catalog = app.seed_catalog().await;
    let storage = app.storage();

    let cases = [
        (
            EntityKind::Semester,
            catalog.semester,
            form(&[
                ("year", "2024"),
                ("season", "Spring"),
                ("start_date", "2024-01-08"),
                ("end_date", "2024-05-03"),
            ]),
        ),
        (
            EntityKind::Section,
            catalog.other_section,
            form(&[
                ("number", "2"),
                ("time", "TR 11:00"),
                ("course_id", &catalog.course.to_string()),
                ("semester_id", &catalog.semester.to_string()),
                ("professor_id", &catalog.professor.to_string()),
            ]),
        ),
    ];

    for (kind, id, raw) in cases {
        let fields = coerce_form(kind, &raw).unwrap();
        let once = storage
            .update_entity(kind, id, fields.clone())
            .await
            .unwrap()
            .unwrap();
        let twice = storage
            .update_entity(kind, id, fields.clone())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice.fields(), fields);
        assert_eq!(storage.get_entity(kind, id).await.unwrap(), Some(twice));
    }
}

#[tokio::test]
async fn test_save_validation_errors() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let service = AdminService::new(&app.ctx);

    let missing_required = service
        .save(&admin, EntityKind::Professor, form(&[("fname", "Alan")]))
        .await;
    assert!(matches!(missing_required, Err(PortalError::Validation(_))));

    let bad_date = service
        .save(
            &admin,
            EntityKind::Semester,
            form(&[
                ("year", "2024"),
                ("season", "Fall"),
                ("start_date", "08/20/2024"),
                ("end_date", "2024-12-15"),
            ]),
        )
        .await;
    assert!(matches!(bad_date, Err(PortalError::Validation(_))));

    let reversed = service
        .save(
            &admin,
            EntityKind::Semester,
            form(&[
                ("year", "2024"),
                ("season", "Fall"),
                ("start_date", "2024-12-15"),
                ("end_date", "2024-08-20"),
            ]),
        )
        .await;
    assert!(matches!(reversed, Err(PortalError::Validation(_))));

    let dangling = service
        .save(
            &admin,
            EntityKind::Section,
            form(&[("number", "1"), ("course_id", "999")]),
        )
        .await;
    assert!(matches!(dangling, Err(PortalError::Validation(_))));

    let bad_id = service
        .save(
            &admin,
            EntityKind::Professor,
            form(&[("id", "abc"), ("fname", "Alan"), ("lname", "Turing")]),
        )
        .await;
    assert!(matches!(bad_id, Err(PortalError::Validation(_))));
}

#[tokio::test]
async fn test_update_and_delete_missing_rows() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let service = AdminService::new(&app.ctx);

    let update = service
        .save(
            &admin,
            EntityKind::ProblemType,
            form(&[("id", "77"), ("description", "Syntax")]),
        )
        .await;
    assert!(matches!(update, Err(PortalError::NotFound(_))));

    let delete = service
        .save(
            &admin,
            EntityKind::ProblemType,
            form(&[("id", "77"), ("action", "delete")]),
        )
        .await;
    assert!(matches!(delete, Err(PortalError::NotFound(_))));

    let delete_without_id = service
        .save(&admin, EntityKind::ProblemType, form(&[("action", "delete")]))
        .await;
    assert!(matches!(delete_without_id, Err(PortalError::Validation(_))));

    let edit = service.edit(&admin, EntityKind::Message, Some(77)).await;
    assert!(matches!(edit, Err(PortalError::NotFound(_))));
}

#[tokio::test]
async fn test_edit_form_offers_reference_choices() {
    let app = TestApp::new().await;
    let catalog = app.seed_catalog().await;
    let admin = app.admin().await;
    let service = AdminService::new(&app.ctx);

    let blank = service.edit(&admin, EntityKind::Section, None).await.unwrap();
    assert_eq!(blank.id, None);
    assert_eq!(blank.values.get("course_id"), Some(&FieldValue::Null));
    assert_eq!(blank.choices["course_id"].len(), 1);
    assert_eq!(blank.choices["course_id"][0].id, catalog.course);
    assert_eq!(blank.choices["semester_id"].len(), 1);
    assert_eq!(blank.choices["professor_id"].len(), 1);

    let existing = service
        .edit(&admin, EntityKind::Section, Some(catalog.section))
        .await
        .unwrap();
    assert_eq!(existing.id, Some(catalog.section));
    assert_eq!(
        existing.values.get("course_id"),
        Some(&FieldValue::Integer(catalog.course))
    );
}

#[tokio::test]
async fn test_sections_listed_newest_semester_first() {
    let app = TestApp::new().await;
    let catalog = app.seed_catalog().await;
    let admin = app.admin().await;

    let fall = app
        .create(
            EntityKind::Semester,
            &[
                ("year", "2024"),
                ("season", "Fall"),
                ("start_date", "2024-08-20"),
                ("end_date", "2024-12-15"),
            ],
        )
        .await;
    let fall_section = app
        .create(
            EntityKind::Section,
            &[
                ("number", "5"),
                ("course_id", &catalog.course.to_string()),
                ("semester_id", &fall.to_string()),
            ],
        )
        .await;

    let list = AdminService::new(&app.ctx)
        .list(&admin, EntityKind::Section)
        .await
        .unwrap();
    let ids: Vec<i64> = list.items.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![fall_section, catalog.section, catalog.other_section]);
}

#[tokio::test]
async fn test_deleting_section_keeps_tickets() {
    let app = TestApp::new().await;
    let catalog = app.seed_catalog().await;
    let ticket = app.open_ticket(catalog.section, "s@example.edu").await;
    let admin = app.admin().await;

    AdminService::new(&app.ctx)
        .save(
            &admin,
            EntityKind::Section,
            form(&[("id", &catalog.section.to_string()), ("action", "delete")]),
        )
        .await
        .unwrap();

    let kept = app.storage().get_ticket(ticket.id).await.unwrap().unwrap();
    assert_eq!(kept.section_id, None);
}

#[tokio::test]
async fn test_deleting_course_removes_sections_and_keeps_tickets() {
    let app = TestApp::new().await;
    let catalog = app.seed_catalog().await;
    let ticket = app.open_ticket(catalog.section, "s@example.edu").await;
    let admin = app.admin().await;

    AdminService::new(&app.ctx)
        .save(
            &admin,
            EntityKind::Course,
            form(&[("id", &catalog.course.to_string()), ("action", "delete")]),
        )
        .await
        .unwrap();

    for section in [catalog.section, catalog.other_section] {
        assert!(
            app.storage()
                .get_entity(EntityKind::Section, section)
                .await
                .unwrap()
                .is_none()
        );
    }
    let kept = app.storage().get_ticket(ticket.id).await.unwrap().unwrap();
    assert_eq!(kept.section_id, None);
}

#[tokio::test]
async fn test_deleting_semester_detaches_sections() {
    let app = TestApp::new().await;
    let catalog = app.seed_catalog().await;
    let admin = app.admin().await;

    AdminService::new(&app.ctx)
        .save(
            &admin,
            EntityKind::Semester,
            form(&[("id", &catalog.semester.to_string()), ("action", "delete")]),
        )
        .await
        .unwrap();

    let Some(AdminEntity::Section(section)) = app
        .storage()
        .get_entity(EntityKind::Section, catalog.section)
        .await
        .unwrap()
    else {
        panic!("section should survive");
    };
    assert_eq!(section.semester_id, None);
    assert_eq!(section.professor_id, Some(catalog.professor));
}
