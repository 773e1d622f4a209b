//! Task and link entities with their closed vocabularies.
//!
//! Status, priority and link type are parsed once at the boundary into the
//! enums below; everything past that point works with validated values.

use super::error::{TaskError, TaskResult};
use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest accepted title, counted in characters after trimming.
pub const MAX_TITLE_LEN: usize = 255;

/// Board record created in every store.
pub const DEFAULT_BOARD_ID: i64 = 1;

/// Kanban column of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Todo,
    Doing,
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::Doing, Status::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::Doing => "doing",
            Status::Done => "done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Status::Todo),
            "doing" => Ok(Status::Doing),
            "done" => Ok(Status::Done),
            other => Err(TaskError::validation(format!("invalid status: '{}' (must be todo, doing, done)", other))),
        }
    }
}

impl ToSql for Status {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Status {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// Named priority levels, stored as integers 0..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Priority {
    #[default]
    None = 0,
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl Priority {
    pub const ALL: [Priority; 5] = [Priority::None, Priority::Low, Priority::Medium, Priority::High, Priority::Critical];

    pub fn level(&self) -> i64 {
        *self as i64
    }

    pub fn name(&self) -> &'static str {
        match self {
            Priority::None => "none",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> TaskResult<Self> {
        let lowered = name.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == lowered)
            .ok_or_else(|| TaskError::validation(format!("invalid priority name: {} (must be none, low, medium, high, critical)", name)))
    }
}

impl TryFrom<i64> for Priority {
    type Error = TaskError;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|p| p.level() == level)
            .ok_or_else(|| TaskError::validation(format!("invalid priority level: {} (must be 0-4)", level)))
    }
}

impl From<Priority> for i64 {
    fn from(p: Priority) -> Self {
        p.level()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ToSql for Priority {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.level()))
    }
}

impl FromSql for Priority {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let level = value.as_i64()?;
        Priority::try_from(level).map_err(|_| FromSqlError::OutOfRange(level))
    }
}

/// Priority as supplied by a caller: either a level or a name.
///
/// Resolved to a [`Priority`] through [`PriorityInput::resolve`] only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorityInput {
    Numeric(i64),
    Named(String),
}

impl PriorityInput {
    pub fn resolve(&self) -> TaskResult<Priority> {
        match self {
            PriorityInput::Numeric(level) => Priority::try_from(*level),
            PriorityInput::Named(name) => Priority::from_name(name.trim()),
        }
    }
}

impl From<Priority> for PriorityInput {
    fn from(p: Priority) -> Self {
        PriorityInput::Numeric(p.level())
    }
}

impl From<i64> for PriorityInput {
    fn from(level: i64) -> Self {
        PriorityInput::Numeric(level)
    }
}

impl From<&str> for PriorityInput {
    fn from(name: &str) -> Self {
        PriorityInput::Named(name.to_string())
    }
}

impl FromStr for PriorityInput {
    type Err = std::convert::Infallible;

    /// Digits become `Numeric`, anything else `Named`; validation happens in `resolve`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<i64>() {
            Ok(level) => PriorityInput::Numeric(level),
            Err(_) => PriorityInput::Named(s.to_string()),
        })
    }
}

/// Kind of a directed relation between two tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    #[default]
    Blocks,
    BlockedBy,
    Related,
    DependsOn,
}

impl LinkType {
    pub const ALL: [LinkType; 4] = [LinkType::Blocks, LinkType::BlockedBy, LinkType::Related, LinkType::DependsOn];

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Blocks => "blocks",
            LinkType::BlockedBy => "blocked_by",
            LinkType::Related => "related",
            LinkType::DependsOn => "depends_on",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkType {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| TaskError::validation(format!("invalid link type: '{}' (must be blocks, blocked_by, related, depends_on)", s)))
    }
}

impl ToSql for LinkType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for LinkType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    /// Board record inside the store, normally [`DEFAULT_BOARD_ID`].
    pub board_id: i64,
    /// Trimmed, 1 to 255 characters.
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    /// Set while the task is soft-deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    /// Bumped by every successful write.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Whether the task is soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// `#id title`, the form used in suggestions and listings.
    pub fn label(&self) -> String {
        format!("#{} {}", self.id, self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    /// Source of the relation, e.g. the blocking task.
    pub from_task_id: i64,
    /// Target of the relation.
    pub to_task_id: i64,
    pub link_type: LinkType,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Describes the link from the point of view of `task_id`.
    pub fn describe_for(&self, task_id: i64) -> String {
        if self.from_task_id == task_id {
            format!("{} task {}", self.link_type, self.to_task_id)
        } else {
            format!("{} by task {}", self.link_type, self.from_task_id)
        }
    }
}

/// Checks a title and returns it trimmed.
pub fn validate_title(title: &str) -> TaskResult<&str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskError::validation("task title cannot be empty"));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(TaskError::validation(format!("task title cannot exceed {} characters", MAX_TITLE_LEN)));
    }
    Ok(trimmed)
}
