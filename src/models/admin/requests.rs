use serde::Deserialize;

use super::catalog::RawForm;
use crate::errors::{PortalError, Result};

/// 表单提交动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveAction {
    Save,
    Delete,
}

impl SaveAction {
    /// 只有 `delete` 是删除，其余（包括缺失）都按保存处理
    pub fn from_form(form: &RawForm) -> Self {
        match form.get("action").map(|a| a.trim()) {
            Some("delete") => SaveAction::Delete,
            _ => SaveAction::Save,
        }
    }
}

/// 从表单中取出 id，空值表示新建
pub fn form_id(form: &RawForm) -> Result<Option<i64>> {
    match form.get("id").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| PortalError::validation(format!("Invalid id: {raw}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_action_and_id() {
        let mut form = RawForm::new();
        assert_eq!(SaveAction::from_form(&form), SaveAction::Save);
        assert_eq!(form_id(&form), Ok(None));

        form.insert("action".into(), "delete".into());
        form.insert("id".into(), "12".into());
        assert_eq!(SaveAction::from_form(&form), SaveAction::Delete);
        assert_eq!(form_id(&form), Ok(Some(12)));

        form.insert("id".into(), "abc".into());
        assert!(form_id(&form).is_err());
    }
}
