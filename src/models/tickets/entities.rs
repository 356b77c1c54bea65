use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 工单状态
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    Claimed,
    Closed,
}

impl TicketStatus {
    pub const OPEN: &'static str = "open";
    pub const CLAIMED: &'static str = "claimed";
    pub const CLOSED: &'static str = "closed";

    /// 重新打开的目标状态：保留原认领人
    pub const REOPEN_TARGET: TicketStatus = TicketStatus::Claimed;

    /// 仍在处理中的状态
    pub fn active_statuses() -> &'static [TicketStatus] {
        &[TicketStatus::Open, TicketStatus::Claimed]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => Self::OPEN,
            TicketStatus::Claimed => Self::CLAIMED,
            TicketStatus::Closed => Self::CLOSED,
        }
    }

    pub fn is_active(&self) -> bool {
        Self::active_statuses().contains(self)
    }

    /// 从数据库值解析，缺失或无法识别的状态按 Open 处理
    pub fn from_db(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse::<TicketStatus>().ok())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "open" => Ok(TicketStatus::Open),
            "claimed" => Ok(TicketStatus::Claimed),
            "closed" => Ok(TicketStatus::Closed),
            _ => Err(format!("Invalid ticket status: {s}")),
        }
    }
}

// 工单
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    pub id: i64,
    pub student_email: String,
    pub student_fname: Option<String>,
    pub student_lname: Option<String>,
    pub assignment: Option<String>,
    pub question: Option<String>,
    pub status: TicketStatus,
    pub time_created: DateTime<Utc>,
    pub time_closed: Option<DateTime<Utc>>,
    pub was_successful: Option<bool>,
    pub tutor_email: Option<String>,
    pub assistant_tutor_email: Option<String>,
    pub section_id: Option<i64>,
    pub problem_type_id: Option<i64>,
}

/// 状态迁移的结果
///
/// 并发竞争失败不算错误：`Superseded` 携带工单的当前状态。
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionOutcome {
    Applied(Ticket),
    Superseded(Ticket),
}

impl TransitionOutcome {
    pub fn applied(&self) -> bool {
        matches!(self, TransitionOutcome::Applied(_))
    }

    pub fn ticket(&self) -> &Ticket {
        match self {
            TransitionOutcome::Applied(t) | TransitionOutcome::Superseded(t) => t,
        }
    }

    pub fn into_ticket(self) -> Ticket {
        match self {
            TransitionOutcome::Applied(t) | TransitionOutcome::Superseded(t) => t,
        }
    }
}

impl Serialize for TransitionOutcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("TransitionOutcome", 2)?;
        state.serialize_field("applied", &self.applied())?;
        state.serialize_field("ticket", self.ticket())?;
        state.end()
    }
}

/// 关闭工单时的修改项
///
/// 外层 `None` 表示保持原值，`Some(None)` 表示清空。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketClosure {
    pub assignment: Option<Option<String>>,
    pub question: Option<Option<String>>,
    pub tutor_email: Option<Option<String>>,
    pub assistant_tutor_email: Option<Option<String>>,
    pub section_id: Option<i64>,
    pub problem_type_id: Option<Option<i64>>,
    pub was_successful: bool,
    /// 关闭工单的辅导员，工单没有认领人时记为认领人
    pub closed_by: String,
    pub closed_at: DateTime<Utc>,
}

impl Ticket {
    /// 认领：只有 Open 状态可以认领
    pub fn can_claim(&self) -> bool {
        self.status == TicketStatus::Open
    }

    /// 重新打开：只有 Closed 状态可以重新打开
    pub fn can_reopen(&self) -> bool {
        self.status == TicketStatus::Closed
    }

    /// 关闭：任意状态 → Closed，同时应用修改项
    pub fn apply_closure(&mut self, closure: &TicketClosure) {
        if let Some(assignment) = &closure.assignment {
            self.assignment = assignment.clone();
        }
        if let Some(question) = &closure.question {
            self.question = question.clone();
        }
        if let Some(tutor) = &closure.tutor_email {
            self.tutor_email = tutor.clone();
        }
        if let Some(assistant) = &closure.assistant_tutor_email {
            self.assistant_tutor_email = assistant.clone();
        }
        if let Some(section_id) = closure.section_id {
            self.section_id = Some(section_id);
        }
        if let Some(problem_type_id) = closure.problem_type_id {
            self.problem_type_id = problem_type_id;
        }
        if self.tutor_email.is_none() {
            self.tutor_email = Some(closure.closed_by.clone());
        }

        self.status = TicketStatus::Closed;
        self.time_closed = Some(closure.closed_at.max(self.time_created));
        self.was_successful = Some(closure.was_successful);
    }

    /// 重新打开：回到 [`TicketStatus::REOPEN_TARGET`]，清除关闭时间和结果
    pub fn apply_reopen(&mut self) {
        self.status = TicketStatus::REOPEN_TARGET;
        self.time_closed = None;
        self.was_successful = None;
    }

    /// 关闭时间与状态一致，且成功标记只在关闭后出现
    pub fn is_consistent(&self) -> bool {
        let closed = self.status == TicketStatus::Closed;
        closed == self.time_closed.is_some()
            && (self.was_successful.is_none() || closed)
            && self.time_closed.is_none_or(|t| self.time_created <= t)
    }
}
