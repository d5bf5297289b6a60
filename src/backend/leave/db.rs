/**
 * Leave Request Model and Database Operations
 *
 * Requests are created `pending` and move exactly once to `approved` or
 * `rejected`. The transition is a conditional update so two reviewers
 * cannot both decide the same request.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::shared::types::{ApplicantInfo, LeaveRequestResponse, LeaveStatus, LeaveType};

const LEAVE_COLUMNS: &str = "id, user_id, leave_type, start_date, end_date, reason, status, \
     emergency_contact, teacher_note, attachment_url, approved_by, approved_at, rejected_reason, \
     created_at, updated_at";

/// A stored leave request
#[derive(Debug, Clone)]
pub struct LeaveRequest {
    pub id: Uuid,
    /// Applicant
    pub user_id: Uuid,
    pub leave_type: LeaveType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub reason: String,
    pub status: LeaveStatus,
    pub emergency_contact: String,
    pub teacher_note: String,
    pub attachment_url: String,
    /// Reviewer, set on approval and on rejection
    pub approved_by: Option<Uuid>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_reason: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeaveRequest {
    pub fn to_response(&self, applicant: Option<ApplicantInfo>) -> LeaveRequestResponse {
        LeaveRequestResponse {
            id: self.id.to_string(),
            user_id: self.user_id.to_string(),
            leave_type: self.leave_type,
            start_date: self.start_date,
            end_date: self.end_date,
            reason: self.reason.clone(),
            status: self.status,
            emergency_contact: self.emergency_contact.clone(),
            teacher_note: self.teacher_note.clone(),
            attachment_url: self.attachment_url.clone(),
            approved_by: self.approved_by.map(|id| id.to_string()),
            approved_at: self.approved_at,
            rejected_reason: self.rejected_reason.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            applicant,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LeaveRequestRow {
    id: Uuid,
    user_id: Uuid,
    leave_type: String,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    reason: String,
    status: String,
    emergency_contact: String,
    teacher_note: String,
    attachment_url: String,
    approved_by: Option<Uuid>,
    approved_at: Option<DateTime<Utc>>,
    rejected_reason: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<LeaveRequestRow> for LeaveRequest {
    type Error = BackendError;

    fn try_from(row: LeaveRequestRow) -> Result<Self, Self::Error> {
        let leave_type = row
            .leave_type
            .parse::<LeaveType>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        let status = row
            .status
            .parse::<LeaveStatus>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(LeaveRequest {
            id: row.id,
            user_id: row.user_id,
            leave_type,
            start_date: row.start_date,
            end_date: row.end_date,
            reason: row.reason,
            status,
            emergency_contact: row.emergency_contact,
            teacher_note: row.teacher_note,
            attachment_url: row.attachment_url,
            approved_by: row.approved_by,
            approved_at: row.approved_at,
            rejected_reason: row.rejected_reason,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn collect(rows: Vec<LeaveRequestRow>) -> Result<Vec<LeaveRequest>, BackendError> {
    rows.into_iter().map(LeaveRequest::try_from).collect()
}

/// Fields needed to file a request
#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    pub user_id: Uuid,
    pub leave_type: LeaveType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub reason: String,
    pub emergency_contact: String,
}

/// Outcome of a review
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Approve { teacher_note: String },
    Reject { rejected_reason: String, teacher_note: String },
}

impl Decision {
    pub fn status(&self) -> LeaveStatus {
        match self {
            Self::Approve { .. } => LeaveStatus::Approved,
            Self::Reject { .. } => LeaveStatus::Rejected,
        }
    }
}

/// Insert a new pending request
pub async fn create_leave_request(
    pool: &SqlitePool,
    new_request: NewLeaveRequest,
) -> Result<LeaveRequest, BackendError> {
    let now = Utc::now();

    let row = sqlx::query_as::<_, LeaveRequestRow>(&format!(
        r#"
        INSERT INTO leave_requests
            (id, user_id, leave_type, start_date, end_date, reason, status, emergency_contact, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {LEAVE_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(new_request.user_id)
    .bind(new_request.leave_type.as_str())
    .bind(new_request.start_date)
    .bind(new_request.end_date)
    .bind(&new_request.reason)
    .bind(LeaveStatus::Pending.as_str())
    .bind(&new_request.emergency_contact)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    row.try_into()
}

/// Get a request by ID
pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<LeaveRequest>, BackendError> {
    let row = sqlx::query_as::<_, LeaveRequestRow>(&format!(
        "SELECT {LEAVE_COLUMNS} FROM leave_requests WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(LeaveRequest::try_from).transpose()
}

/// A user's requests, newest first, optionally filtered by status
pub async fn find_by_user(
    pool: &SqlitePool,
    user_id: Uuid,
    status: Option<LeaveStatus>,
    limit: Option<u32>,
) -> Result<Vec<LeaveRequest>, BackendError> {
    // SQLite treats a negative LIMIT as "no limit"
    let limit = limit.map(i64::from).unwrap_or(-1);

    let rows = sqlx::query_as::<_, LeaveRequestRow>(&format!(
        r#"
        SELECT {LEAVE_COLUMNS} FROM leave_requests
        WHERE user_id = ? AND (? IS NULL OR status = ?)
        ORDER BY created_at DESC, rowid DESC
        LIMIT ?
        "#
    ))
    .bind(user_id)
    .bind(status.map(|s| s.as_str()))
    .bind(status.map(|s| s.as_str()))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    collect(rows)
}

/// Every pending request, oldest first
pub async fn find_pending(pool: &SqlitePool) -> Result<Vec<LeaveRequest>, BackendError> {
    let rows = sqlx::query_as::<_, LeaveRequestRow>(&format!(
        r#"
        SELECT {LEAVE_COLUMNS} FROM leave_requests
        WHERE status = ?
        ORDER BY created_at ASC, rowid ASC
        "#
    ))
    .bind(LeaveStatus::Pending.as_str())
    .fetch_all(pool)
    .await?;

    collect(rows)
}

/// Apply a review decision to a pending request
///
/// Returns `None` when the request does not exist or is no longer pending.
pub async fn review(
    pool: &SqlitePool,
    id: Uuid,
    reviewer: Uuid,
    decision: Decision,
) -> Result<Option<LeaveRequest>, BackendError> {
    let status = decision.status();
    let (teacher_note, rejected_reason) = match decision {
        Decision::Approve { teacher_note } => (teacher_note, None),
        Decision::Reject {
            rejected_reason,
            teacher_note,
        } => (teacher_note, Some(rejected_reason)),
    };
    let now = Utc::now();

    let row = sqlx::query_as::<_, LeaveRequestRow>(&format!(
        r#"
        UPDATE leave_requests
        SET status = ?, approved_by = ?, approved_at = ?, teacher_note = ?,
            rejected_reason = COALESCE(?, rejected_reason), updated_at = ?
        WHERE id = ? AND status = ?
        RETURNING {LEAVE_COLUMNS}
        "#
    ))
    .bind(status.as_str())
    .bind(reviewer)
    .bind(now)
    .bind(&teacher_note)
    .bind(rejected_reason.as_deref())
    .bind(now)
    .bind(id)
    .bind(LeaveStatus::Pending.as_str())
    .fetch_optional(pool)
    .await?;

    row.map(LeaveRequest::try_from).transpose()
}

/// Applicant details for reviewers; `None` if the user is gone
pub async fn applicant_info(pool: &SqlitePool, user_id: Uuid) -> Result<Option<ApplicantInfo>, BackendError> {
    Ok(get_user_by_id(pool, user_id).await?.map(|user| ApplicantInfo {
        name: user.name,
        email: user.email,
        student_id: user.student_id,
    }))
}
