use serde::{Deserialize, Deserializer};

/// 表单里的 id 可能是数字，也可能是字符串（包括空串）
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientId {
    Int(i64),
    Text(String),
}

impl LenientId {
    fn into_id<E: serde::de::Error>(self) -> Result<Option<i64>, E> {
        match self {
            LenientId::Int(i) => Ok(Some(i)),
            LenientId::Text(s) if s.trim().is_empty() => Ok(None),
            LenientId::Text(s) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| E::custom(format!("无效的 id: '{s}'"))),
        }
    }
}

/// 可选 id：缺失、null、空串都是 None
fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LenientId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(id) => id.into_id(),
    }
}

/// 修改用 id：缺失保持原值，null 或空串清空
fn deserialize_patch_id<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_id(deserializer).map(Some)
}

/// 修改用文本：缺失保持原值，null 或空串清空
fn deserialize_patch_text<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(Some(value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())))
}

// 学生提交工单
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenTicketRequest {
    #[serde(default)]
    pub student_email: String,
    #[serde(default)]
    pub student_fname: Option<String>,
    #[serde(default)]
    pub student_lname: Option<String>,
    #[serde(default)]
    pub assignment: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub section_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub problem_type_id: Option<i64>,
}

// 辅导员关闭工单
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CloseTicketRequest {
    #[serde(default, deserialize_with = "deserialize_patch_text")]
    pub assignment: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_patch_text")]
    pub question: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_patch_text")]
    pub tutor_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_patch_text")]
    pub assistant_tutor_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub section_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_patch_id")]
    pub problem_type_id: Option<Option<i64>>,
    #[serde(default)]
    pub was_successful: bool,
}

/// 去掉首尾空白，空串视为未填写
pub fn clean_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_request_accepts_string_ids() {
        let req: OpenTicketRequest = serde_json::from_str(
            r#"{"student_email":"s@example.edu","section_id":"12","problem_type_id":""}"#,
        )
        .unwrap();
        assert_eq!(req.section_id, Some(12));
        assert_eq!(req.problem_type_id, None);
    }

    #[test]
    fn test_open_request_rejects_garbage_id() {
        let result: Result<OpenTicketRequest, _> =
            serde_json::from_str(r#"{"student_email":"s@example.edu","section_id":"abc"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_close_request_distinguishes_absent_and_cleared() {
        let req: CloseTicketRequest = serde_json::from_str(
            r#"{"assignment":"HW3","question":"","problem_type_id":null,"was_successful":true}"#,
        )
        .unwrap();
        assert_eq!(req.assignment, Some(Some("HW3".into())));
        assert_eq!(req.question, Some(None));
        assert_eq!(req.problem_type_id, Some(None));
        assert_eq!(req.tutor_email, None);
        assert_eq!(req.section_id, None);
        assert!(req.was_successful);
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text(Some("  ".into())), None);
        assert_eq!(clean_text(Some(" HW1 ".into())), Some("HW1".into()));
    }
}
