//! 持久化设置存储实现

use sea_orm::sea_query::OnConflict;
use sea_orm::{EntityTrait, Set};

use super::{SeaOrmStorage, map_db_err};
use crate::entity::configuration::{ActiveModel, Column, Entity as Configuration};
use crate::errors::{PortalError, Result};
use crate::models::settings::entities::Setting;

impl SeaOrmStorage {
    /// 通过名称获取设置
    pub(crate) async fn get_setting_impl(&self, name: &str) -> Result<Option<Setting>> {
        let setting = Configuration::find_by_id(name.to_string())
            .one(&self.db)
            .await
            .map_err(|e| map_db_err("获取设置失败", e))?;

        Ok(setting.map(|s| s.into_setting()))
    }

    /// 写入默认值（已存在则什么也不做），然后读回实际存储的值
    ///
    /// 并发的首次启动最终都会读到同一个值。
    pub(crate) async fn ensure_setting_impl(&self, name: &str, default: &str) -> Result<Setting> {
        let model = ActiveModel {
            name: Set(name.to_string()),
            setting: Set(default.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
        };

        // 冲突时不插入，受影响行数为 0
        Configuration::insert(model)
            .on_conflict(OnConflict::column(Column::Name).do_nothing().to_owned())
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| map_db_err("写入默认设置失败", e))?;

        self.get_setting_impl(name)
            .await?
            .ok_or_else(|| PortalError::database_operation(format!("配置项写入后仍不存在: {name}")))
    }
}
