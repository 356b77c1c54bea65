//! 集成测试共用的夹具：内存数据库、固定时钟和基础数据
#![allow(dead_code)]

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;

use rust_tutor_portal::config::{Argon2Config, DatabaseConfig};
use rust_tutor_portal::models::admin::catalog::{EntityKind, RawForm};
use rust_tutor_portal::models::admin::responses::AdminSaveOutcome;
use rust_tutor_portal::models::auth::Caller;
use rust_tutor_portal::models::tickets::{entities::Ticket, requests::OpenTicketRequest};
use rust_tutor_portal::models::tutors::entities::Tutor;
use rust_tutor_portal::runtime::{AppContext, SessionSettings};
use rust_tutor_portal::services::{AdminService, TicketService};
use rust_tutor_portal::storage::{Storage, create_storage};
use rust_tutor_portal::utils::FixedClock;

pub const ADMIN_EMAIL: &str = "admin@example.edu";
pub const TUTOR_EMAIL: &str = "tutor@example.edu";
pub const OTHER_TUTOR_EMAIL: &str = "other@example.edu";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
}

pub fn cheap_argon2() -> Argon2Config {
    Argon2Config {
        memory_cost: 1024,
        time_cost: 1,
        parallelism: 1,
    }
}

pub async fn memory_storage() -> Arc<dyn Storage> {
    create_storage(&DatabaseConfig {
        url: ":memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    })
    .await
    .expect("in-memory storage")
}

/// 临时目录下的 SQLite 文件数据库，连接池允许多个并发连接
pub async fn file_storage(name: &str, pool_size: u32) -> (Arc<dyn Storage>, PathBuf) {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let path = std::env::temp_dir().join(format!(
        "tutor-portal-{name}-{}-{nanos}.db",
        std::process::id()
    ));
    let storage = create_storage(&DatabaseConfig {
        url: path.to_string_lossy().into_owned(),
        pool_size,
        timeout: 5,
    })
    .await
    .expect("file storage");
    (storage, path)
}

/// 删除数据库文件及 WAL 附属文件
pub fn remove_database(path: &Path) {
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

pub struct TestApp {
    pub ctx: AppContext,
    pub clock: Arc<FixedClock>,
}

impl TestApp {
    /// 空数据库，时钟停在 2024-03-05 10:00 UTC
    pub async fn new() -> Self {
        Self::with_storage(memory_storage().await)
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        let clock = Arc::new(FixedClock::at(today(), 10, 0));
        let ctx = AppContext {
            storage,
            clock: clock.clone(),
            session: SessionSettings {
                secret: "integration-test-secret".to_string(),
                lifetime_minutes: 30,
            },
            argon2: cheap_argon2(),
        };
        Self { ctx, clock }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.ctx.storage
    }

    pub async fn add_tutor(&self, email: &str, superuser: bool) -> Tutor {
        let mut tutor = Tutor::new(email);
        tutor.fname = Some("Test".to_string());
        tutor.lname = Some(email.split('@').next().unwrap_or_default().to_string());
        tutor.is_superuser = superuser;
        self.storage()
            .create_tutor(&tutor, &BTreeSet::new())
            .await
            .expect("create tutor")
    }

    pub async fn admin(&self) -> Caller {
        let tutor = match self.storage().get_tutor(ADMIN_EMAIL).await.unwrap() {
            Some(tutor) => tutor,
            None => self.add_tutor(ADMIN_EMAIL, true).await,
        };
        Caller::from_tutor(tutor)
    }

    pub async fn tutor(&self, email: &str) -> Caller {
        let tutor = match self.storage().get_tutor(email).await.unwrap() {
            Some(tutor) => tutor,
            None => self.add_tutor(email, false).await,
        };
        Caller::from_tutor(tutor)
    }

    /// 通过管理表单创建实体，返回新 id
    pub async fn create(&self, kind: EntityKind, pairs: &[(&str, &str)]) -> i64 {
        let admin = self.admin().await;
        match AdminService::new(&self.ctx)
            .save(&admin, kind, form(pairs))
            .await
            .expect("admin create")
        {
            AdminSaveOutcome::Created { entity } => entity.id(),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    /// 当前学期、一门课程、两个班次和一个问题类型
    pub async fn seed_catalog(&self) -> Catalog {
        let semester = self
            .create(
                EntityKind::Semester,
                &[
                    ("year", "2024"),
                    ("season", "Spring"),
                    ("start_date", "2024-01-15"),
                    ("end_date", "2024-05-10"),
                ],
            )
            .await;
        let professor = self
            .create(
                EntityKind::Professor,
                &[("fname", "Ada"), ("lname", "Lovelace")],
            )
            .await;
        let course = self
            .create(
                EntityKind::Course,
                &[
                    ("number", "CS 101"),
                    ("name", "Intro to Programming"),
                    ("on_display", "on"),
                ],
            )
            .await;
        let section = self
            .create(
                EntityKind::Section,
                &[
                    ("number", "1"),
                    ("time", "MWF 9:00"),
                    ("course_id", &course.to_string()),
                    ("semester_id", &semester.to_string()),
                    ("professor_id", &professor.to_string()),
                ],
            )
            .await;
        let other_section = self
            .create(
                EntityKind::Section,
                &[
                    ("number", "2"),
                    ("course_id", &course.to_string()),
                    ("semester_id", &semester.to_string()),
                ],
            )
            .await;
        let problem_type = self
            .create(EntityKind::ProblemType, &[("description", "Debugging")])
            .await;

        Catalog {
            semester,
            professor,
            course,
            section,
            other_section,
            problem_type,
        }
    }

    pub async fn open_ticket(&self, section_id: i64, student: &str) -> Ticket {
        TicketService::new(&self.ctx)
            .open(OpenTicketRequest {
                student_email: student.to_string(),
                student_fname: Some("Sam".to_string()),
                student_lname: Some("Student".to_string()),
                assignment: Some("HW1".to_string()),
                question: Some("Segfault in loop".to_string()),
                section_id: Some(section_id),
                problem_type_id: None,
            })
            .await
            .expect("open ticket")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub semester: i64,
    pub professor: i64,
    pub course: i64,
    pub section: i64,
    pub other_section: i64,
    pub problem_type: i64,
}

pub fn form(pairs: &[(&str, &str)]) -> RawForm {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
