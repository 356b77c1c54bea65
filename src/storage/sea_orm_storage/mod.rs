//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod admin;
mod settings;
mod status;
mod tickets;
mod tutors;

use std::collections::BTreeSet;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::{PortalError, Result};

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| PortalError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    ///
    /// 内存数据库只存在于单个连接中，所以只保留一个常驻连接且不启用 WAL。
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| PortalError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory");
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size)
                .min_connections(1)
                .test_before_acquire(true)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| PortalError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") || url.starts_with("sqlite:") {
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
            Err(PortalError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, :memory: 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 数据库错误转换：唯一约束和外键约束是用户可以修正的输入错误
pub(crate) fn map_db_err(context: &str, err: DbErr) -> PortalError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            PortalError::validation("A record with the same value already exists")
        }
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            PortalError::validation("A referenced record does not exist")
        }
        _ => {
            tracing::error!("{context}: {err}");
            PortalError::database_operation(format!("{context}: {err}"))
        }
    }
}

// Storage trait 实现
use crate::models::{
    admin::{
        catalog::{EntityKind, FieldMap},
        entities::{AdminEntity, Message},
    },
    reports::requests::ReportFilter,
    settings::entities::Setting,
    status::responses::CourseStatus,
    tickets::{
        entities::{Ticket, TicketClosure, TransitionOutcome},
        requests::OpenTicketRequest,
        responses::{OpenCourse, TicketDetail},
    },
    tutors::entities::Tutor,
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 管理实体模块
    async fn get_entity(&self, kind: EntityKind, id: i64) -> Result<Option<AdminEntity>> {
        self.get_entity_impl(kind, id).await
    }

    async fn list_entities(&self, kind: EntityKind) -> Result<Vec<AdminEntity>> {
        self.list_entities_impl(kind).await
    }

    async fn create_entity(&self, kind: EntityKind, fields: FieldMap) -> Result<AdminEntity> {
        self.create_entity_impl(kind, fields).await
    }

    async fn update_entity(
        &self,
        kind: EntityKind,
        id: i64,
        fields: FieldMap,
    ) -> Result<Option<AdminEntity>> {
        self.update_entity_impl(kind, id, fields).await
    }

    async fn delete_entity(&self, kind: EntityKind, id: i64) -> Result<bool> {
        self.delete_entity_impl(kind, id).await
    }

    // 工单模块
    async fn create_ticket(
        &self,
        request: OpenTicketRequest,
        created_at: DateTime<Utc>,
    ) -> Result<Ticket> {
        self.create_ticket_impl(request, created_at).await
    }

    async fn get_ticket(&self, id: i64) -> Result<Option<Ticket>> {
        self.get_ticket_impl(id).await
    }

    async fn get_ticket_detail(&self, id: i64) -> Result<Option<TicketDetail>> {
        self.get_ticket_detail_impl(id).await
    }

    async fn claim_ticket(&self, id: i64, tutor_email: &str) -> Result<Option<TransitionOutcome>> {
        self.claim_ticket_impl(id, tutor_email).await
    }

    async fn close_ticket(
        &self,
        id: i64,
        closure: TicketClosure,
    ) -> Result<Option<TransitionOutcome>> {
        self.close_ticket_impl(id, closure).await
    }

    async fn reopen_ticket(&self, id: i64) -> Result<Option<TransitionOutcome>> {
        self.reopen_ticket_impl(id).await
    }

    async fn list_board_tickets(&self, since: i64) -> Result<Vec<TicketDetail>> {
        self.list_board_tickets_impl(since).await
    }

    async fn list_open_tickets(&self) -> Result<Vec<TicketDetail>> {
        self.list_open_tickets_impl().await
    }

    async fn filter_tickets(&self, filter: ReportFilter) -> Result<Vec<TicketDetail>> {
        self.filter_tickets_impl(filter).await
    }

    // 辅导员模块
    async fn get_tutor(&self, email: &str) -> Result<Option<Tutor>> {
        self.get_tutor_impl(email).await
    }

    async fn list_tutors(&self) -> Result<Vec<Tutor>> {
        self.list_tutors_impl().await
    }

    async fn count_tutors(&self) -> Result<u64> {
        self.count_tutors_impl().await
    }

    async fn tutor_course_ids(&self, email: &str) -> Result<BTreeSet<i64>> {
        self.tutor_course_ids_impl(email).await
    }

    async fn create_tutor(&self, tutor: &Tutor, courses: &BTreeSet<i64>) -> Result<Tutor> {
        self.create_tutor_impl(tutor, courses).await
    }

    async fn update_tutor(
        &self,
        tutor: &Tutor,
        courses: Option<&BTreeSet<i64>>,
    ) -> Result<Option<Tutor>> {
        self.update_tutor_impl(tutor, courses).await
    }

    async fn delete_tutor(&self, email: &str) -> Result<bool> {
        self.delete_tutor_impl(email).await
    }

    // 状态页模块
    async fn course_statuses(&self, today: NaiveDate) -> Result<Vec<CourseStatus>> {
        self.course_statuses_impl(today).await
    }

    async fn active_messages(&self, today: NaiveDate) -> Result<Vec<Message>> {
        self.active_messages_impl(today).await
    }

    async fn open_courses(&self, today: NaiveDate) -> Result<Vec<OpenCourse>> {
        self.open_courses_impl(today).await
    }

    // 设置模块
    async fn get_setting(&self, name: &str) -> Result<Option<Setting>> {
        self.get_setting_impl(name).await
    }

    async fn ensure_setting(&self, name: &str, default: &str) -> Result<Setting> {
        self.ensure_setting_impl(name, default).await
    }
}
