//! Wire Types
//!
//! Request and response bodies exchanged between the client and the
//! backend, plus the small enums (roles, leave types, statuses) that both
//! sides interpret. Field names follow the JSON the service has always
//! spoken (`_id`, `student_id`, `leave_request`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::error::SharedError;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Teacher,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Teacher => "teacher",
            Self::Admin => "admin",
        }
    }

    /// Teachers and admins may list, approve and reject leave requests
    pub fn can_review(&self) -> bool {
        matches!(self, Self::Teacher | Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "teacher" => Ok(Self::Teacher),
            "admin" => Ok(Self::Admin),
            other => Err(SharedError::validation("role", format!("Unknown role: {}", other))),
        }
    }
}

/// Review state of a leave request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveStatus {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(SharedError::validation("status", format!("Unknown status: {}", other))),
        }
    }
}

/// Kind of leave a student may apply for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    Sick,
    Personal,
    Family,
    Funeral,
    Maternity,
    Emergency,
}

impl LeaveType {
    pub const ALL: [LeaveType; 6] = [
        Self::Sick,
        Self::Personal,
        Self::Family,
        Self::Funeral,
        Self::Maternity,
        Self::Emergency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sick => "sick",
            Self::Personal => "personal",
            Self::Family => "family",
            Self::Funeral => "funeral",
            Self::Maternity => "maternity",
            Self::Emergency => "emergency",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Sick => "Sick leave",
            Self::Personal => "Personal leave",
            Self::Family => "Family leave",
            Self::Funeral => "Funeral leave",
            Self::Maternity => "Maternity leave",
            Self::Emergency => "Emergency leave",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Sick => "Leave due to illness",
            Self::Personal => "Leave for personal matters",
            Self::Family => "Leave for family matters",
            Self::Funeral => "Leave due to a death in the family",
            Self::Maternity => "Leave for childbirth",
            Self::Emergency => "Leave for an emergency",
        }
    }

    pub fn info(&self) -> LeaveTypeInfo {
        LeaveTypeInfo {
            id: self.as_str().to_string(),
            name: self.display_name().to_string(),
            description: self.description().to_string(),
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaveType {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SharedError::validation("leave_type", format!("Unknown leave type: {}", s)))
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Login request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub student_id: String,
    /// Requested role; honoured only when the server allows role selection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
}

/// New leave application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyLeaveRequest {
    #[serde(default)]
    pub leave_type: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub emergency_contact: String,
}

/// Body of approve/reject calls
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub teacher_note: String,
    #[serde(default)]
    pub rejected_reason: String,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// User information that is safe to return to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub role: Role,
    pub name: String,
    pub student_id: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserResponse {
    /// Name to greet the user with, falling back to the email
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub status: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveTypeInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveTypesResponse {
    pub leave_types: Vec<LeaveTypeInfo>,
}

/// Who filed a request; shown to reviewers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantInfo {
    pub name: String,
    pub email: String,
    pub student_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequestResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub leave_type: LeaveType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub reason: String,
    pub status: LeaveStatus,
    pub emergency_contact: String,
    pub teacher_note: String,
    pub attachment_url: String,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_reason: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicant: Option<ApplicantInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyLeaveResponse {
    pub message: String,
    pub request_id: String,
    pub leave_request: LeaveRequestResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyRequestsResponse {
    pub requests: Vec<LeaveRequestResponse>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingRequestsResponse {
    pub message: String,
    pub requests: Vec<LeaveRequestResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequestEnvelope {
    pub request: LeaveRequestResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub message: String,
    pub request: LeaveRequestResponse,
}
