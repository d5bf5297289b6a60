//! Leave Module
//!
//! Leave applications filed by students and the review workflow for
//! teachers and admins.
//!
//! # Module Structure
//!
//! ```text
//! leave/
//! ├── mod.rs       - Module exports and documentation
//! ├── dates.rs     - Date parsing and the start/end rules
//! ├── db.rs        - LeaveRequest model and SQLite operations
//! └── handlers.rs  - HTTP handlers for /api/leave/*
//! ```
//!
//! # Workflow
//!
//! ```text
//! apply ──> pending ──approve──> approved
//!                  └──reject───> rejected
//! ```
//!
//! A request is reviewed at most once. Reviewer id and time are recorded
//! for both outcomes.

/// Date parsing and validation
pub mod dates;

/// Leave request storage
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use db::{Decision, LeaveRequest, NewLeaveRequest};
pub use handlers::{
    apply_leave, approve_request, leave_types, my_requests, pending_requests, reject_request, request_detail,
};
