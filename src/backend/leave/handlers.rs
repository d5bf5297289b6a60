/**
 * Leave Request Handlers
 *
 * HTTP handlers for `/api/leave/...`. All routes sit behind the auth
 * middleware; review routes additionally require a teacher or admin.
 *
 * # Routes
 *
 * - `GET  /api/leave/types`          - Leave type catalogue
 * - `POST /api/leave/apply`          - File a request
 * - `GET  /api/leave/my-requests`    - Caller's requests, newest first
 * - `GET  /api/leave/pending`        - Pending requests with applicants (reviewers)
 * - `GET  /api/leave/request/{id}`   - One request (owner or reviewer)
 * - `POST /api/leave/approve/{id}`   - Approve (reviewers)
 * - `POST /api/leave/reject/{id}`    - Reject with a reason (reviewers)
 */

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::leave::dates::{parse_leave_date, validate_dates};
use crate::backend::leave::db::{
    applicant_info, create_leave_request, find_by_id, find_by_user, find_pending, review, Decision,
    LeaveRequest, NewLeaveRequest,
};
use crate::backend::middleware::AuthUser;
use crate::shared::types::{
    ApplyLeaveRequest, ApplyLeaveResponse, LeaveRequestEnvelope, LeaveStatus, LeaveType, LeaveTypesResponse,
    MyRequestsResponse, PendingRequestsResponse, ReviewRequest, ReviewResponse,
};

const NOT_FOUND: &str = "Leave request not found";

/// Query string of `GET /my-requests`
#[derive(Debug, Default, Deserialize)]
pub struct MyRequestsQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

fn parse_request_id(raw: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw).map_err(|_| BackendError::not_found(NOT_FOUND))
}

async fn load_request(pool: &SqlitePool, id: Uuid) -> Result<LeaveRequest, BackendError> {
    find_by_id(pool, id).await?.ok_or_else(|| {
        tracing::warn!("Leave request not found: {}", id);
        BackendError::not_found(NOT_FOUND)
    })
}

/// Review bodies are optional; an empty body means no note
fn parse_review_body(body: &Bytes) -> Result<ReviewRequest, BackendError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ReviewRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("Invalid review body: {}", e);
        BackendError::bad_request("Request body must be a JSON object")
    })
}

/// List the leave types
pub async fn leave_types(AuthUser(_auth): AuthUser) -> Json<LeaveTypesResponse> {
    Json(LeaveTypesResponse {
        leave_types: LeaveType::ALL.iter().map(LeaveType::info).collect(),
    })
}

/// File a new leave request for the caller
///
/// # Errors
///
/// * `400 Bad Request` - missing field, unknown leave type, bad or out-of-order dates
pub async fn apply_leave(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    payload: Result<Json<ApplyLeaveRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApplyLeaveResponse>), BackendError> {
    let Json(request) = payload?;

    for (field, value) in [
        ("leave_type", &request.leave_type),
        ("start_date", &request.start_date),
        ("end_date", &request.end_date),
        ("reason", &request.reason),
    ] {
        if value.trim().is_empty() {
            tracing::warn!("Leave application missing {}", field);
            return Err(BackendError::bad_request(format!("Missing required field: {}", field)));
        }
    }

    let leave_type: LeaveType = request.leave_type.trim().parse()?;
    let start_date = parse_leave_date(&request.start_date)?;
    let end_date = parse_leave_date(&request.end_date)?;
    validate_dates(start_date, end_date, Utc::now().date_naive())?;

    let leave_request = create_leave_request(
        &pool,
        NewLeaveRequest {
            user_id: auth.user_id,
            leave_type,
            start_date: start_date.with_timezone(&Utc),
            end_date: end_date.with_timezone(&Utc),
            reason: request.reason.trim().to_string(),
            emergency_contact: request.emergency_contact.trim().to_string(),
        },
    )
    .await?;

    tracing::info!(
        "Leave request {} filed by {} ({})",
        leave_request.id,
        auth.email,
        leave_type
    );

    Ok((
        StatusCode::CREATED,
        Json(ApplyLeaveResponse {
            message: "Leave request submitted successfully".to_string(),
            request_id: leave_request.id.to_string(),
            leave_request: leave_request.to_response(None),
        }),
    ))
}

/// The caller's own requests
pub async fn my_requests(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    query: Result<Query<MyRequestsQuery>, QueryRejection>,
) -> Result<Json<MyRequestsResponse>, BackendError> {
    let Query(query) = query.map_err(|e| BackendError::bad_request(e.body_text()))?;

    let status = query
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<LeaveStatus>)
        .transpose()?;

    let limit = match query.limit {
        Some(limit) if limit < 1 => return Err(BackendError::bad_request("limit must be at least 1")),
        Some(limit) => Some(u32::try_from(limit).unwrap_or(u32::MAX)),
        None => None,
    };

    let requests: Vec<_> = find_by_user(&pool, auth.user_id, status, limit)
        .await?
        .iter()
        .map(|r| r.to_response(None))
        .collect();

    Ok(Json(MyRequestsResponse {
        total: requests.len(),
        requests,
    }))
}

/// Pending requests with applicant details, oldest first
pub async fn pending_requests(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
) -> Result<Json<PendingRequestsResponse>, BackendError> {
    auth.require_reviewer()?;

    let pending = find_pending(&pool).await?;
    let mut applicants = HashMap::new();
    let mut requests = Vec::with_capacity(pending.len());

    for request in &pending {
        if !applicants.contains_key(&request.user_id) {
            let info = applicant_info(&pool, request.user_id).await?;
            applicants.insert(request.user_id, info);
        }
        let applicant = applicants.get(&request.user_id).cloned().flatten();
        requests.push(request.to_response(applicant));
    }

    tracing::info!("{} pending requests listed for {}", requests.len(), auth.email);

    Ok(Json(PendingRequestsResponse {
        message: "Pending requests retrieved successfully".to_string(),
        requests,
    }))
}

/// One request; visible to its owner and to reviewers
pub async fn request_detail(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(request_id): Path<String>,
) -> Result<Json<LeaveRequestEnvelope>, BackendError> {
    let request = load_request(&pool, parse_request_id(&request_id)?).await?;

    let is_reviewer = auth.role.can_review();
    if request.user_id != auth.user_id && !is_reviewer {
        tracing::warn!("User {} may not view request {}", auth.user_id, request.id);
        return Err(BackendError::forbidden("You are not allowed to view this leave request"));
    }

    let applicant = if is_reviewer {
        applicant_info(&pool, request.user_id).await?
    } else {
        None
    };

    Ok(Json(LeaveRequestEnvelope {
        request: request.to_response(applicant),
    }))
}

async fn decide(
    pool: &SqlitePool,
    reviewer: Uuid,
    id: Uuid,
    decision: Decision,
) -> Result<LeaveRequest, BackendError> {
    review(pool, id, reviewer, decision).await?.ok_or_else(|| {
        tracing::warn!("Leave request {} was reviewed concurrently", id);
        BackendError::bad_request("Leave request has already been processed")
    })
}

/// Approve a pending request
pub async fn approve_request(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(request_id): Path<String>,
    body: Bytes,
) -> Result<Json<ReviewResponse>, BackendError> {
    auth.require_reviewer()?;

    let request = load_request(&pool, parse_request_id(&request_id)?).await?;
    if request.status != LeaveStatus::Pending {
        return Err(BackendError::bad_request("Leave request has already been processed"));
    }

    let review_body = parse_review_body(&body)?;
    let decision = Decision::Approve {
        teacher_note: review_body.teacher_note.trim().to_string(),
    };
    let updated = decide(&pool, auth.user_id, request.id, decision).await?;

    tracing::info!("Leave request {} approved by {}", updated.id, auth.email);

    Ok(Json(ReviewResponse {
        message: "Leave request approved".to_string(),
        request: updated.to_response(None),
    }))
}

/// Reject a pending request; a reason is mandatory
pub async fn reject_request(
    State(pool): State<SqlitePool>,
    AuthUser(auth): AuthUser,
    Path(request_id): Path<String>,
    body: Bytes,
) -> Result<Json<ReviewResponse>, BackendError> {
    auth.require_reviewer()?;

    let request = load_request(&pool, parse_request_id(&request_id)?).await?;
    if request.status != LeaveStatus::Pending {
        return Err(BackendError::bad_request("Leave request has already been processed"));
    }

    let review_body = parse_review_body(&body)?;
    let rejected_reason = review_body.rejected_reason.trim();
    if rejected_reason.is_empty() {
        return Err(BackendError::bad_request("A rejection reason is required"));
    }

    let decision = Decision::Reject {
        rejected_reason: rejected_reason.to_string(),
        teacher_note: review_body.teacher_note.trim().to_string(),
    };
    let updated = decide(&pool, auth.user_id, request.id, decision).await?;

    tracing::info!("Leave request {} rejected by {}", updated.id, auth.email);

    Ok(Json(ReviewResponse {
        message: "Leave request rejected".to_string(),
        request: updated.to_response(None),
    }))
}
