use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;

use super::entities::Tutor;

/// 区分"字段缺失"和"显式置空"
fn patch<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// 辅导员保存请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TutorSaveRequest {
    pub email: String,
    /// 为 true 时新建，否则编辑已有记录
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default, deserialize_with = "patch")]
    pub fname: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch")]
    pub lname: Option<Option<String>>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub is_working: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_superuser: Option<bool>,
    #[serde(default)]
    pub courses: Option<BTreeSet<i64>>,
}

impl TutorSaveRequest {
    pub fn is_delete(&self) -> bool {
        self.action.as_deref().map(str::trim) == Some("delete")
    }

    /// 去掉非管理员不能修改的字段
    pub fn strip_privileged(&mut self) {
        self.is_active = None;
        self.is_superuser = None;
    }

    /// 把请求合并到辅导员记录上：缺失字段保持原值，空字符串清空
    pub fn apply_to(&self, tutor: &mut Tutor) {
        if let Some(fname) = &self.fname {
            tutor.fname = normalize(fname.clone());
        }
        if let Some(lname) = &self.lname {
            tutor.lname = normalize(lname.clone());
        }
        if let Some(is_working) = self.is_working {
            tutor.is_working = is_working;
        }
        if let Some(is_active) = self.is_active {
            tutor.is_active = is_active;
        }
        if let Some(is_superuser) = self.is_superuser {
            tutor.is_superuser = is_superuser;
        }
    }

    /// 非空的新密码
    pub fn new_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
