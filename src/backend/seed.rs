//! Seed accounts and demo leave requests for a fresh database.
//!
//! Seeding is idempotent: an email that already exists is left untouched,
//! and a student who already has requests gets no demo ones.

use chrono::{Days, NaiveDate, NaiveTime};
use sqlx::SqlitePool;
use std::collections::HashMap;
use uuid::Uuid;

use crate::backend::auth::users::{create_user, get_user_by_email, NewUser, User};
use crate::backend::error::BackendError;
use crate::backend::leave::db::{create_leave_request, find_by_user, NewLeaveRequest};
use crate::shared::types::{LeaveType, Role};
use crate::shared::validation::normalize_email;

/// Account to create when missing
#[derive(Debug, Clone)]
pub struct SeedUser {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub name: String,
    pub student_id: String,
}

impl SeedUser {
    fn new(email: &str, password: &str, role: Role, name: &str, student_id: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            role,
            name: name.to_string(),
            student_id: student_id.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum SeedOutcome {
    Created(User),
    Existing(User),
}

impl SeedOutcome {
    pub fn user(&self) -> &User {
        match self {
            Self::Created(user) | Self::Existing(user) => user,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// The administrator every installation starts with
pub fn default_admin() -> SeedUser {
    SeedUser::new("admin@example.com", "admin123", Role::Admin, "System Administrator", "")
}

/// Demo accounts: two students, a teacher and a second admin
pub fn demo_users() -> Vec<SeedUser> {
    vec![
        SeedUser::new("student1@example.com", "password123", Role::Student, "Wang Xiaoming", "S20231001"),
        SeedUser::new("student2@example.com", "password123", Role::Student, "Li Xiaohua", "S20231002"),
        SeedUser::new("teacher1@example.com", "password123", Role::Teacher, "Ms Zhang", ""),
        SeedUser::new("admin1@example.com", "password123", Role::Admin, "Lin (Admin)", ""),
    ]
}

/// Create the user unless the email is already registered
pub async fn seed_user(pool: &SqlitePool, seed: &SeedUser, bcrypt_cost: u32) -> Result<SeedOutcome, BackendError> {
    let email = normalize_email(&seed.email);

    if let Some(existing) = get_user_by_email(pool, &email).await? {
        tracing::info!("Seed user already exists: {}", email);
        return Ok(SeedOutcome::Existing(existing));
    }

    let user = create_user(
        pool,
        NewUser {
            email,
            password_hash: bcrypt::hash(&seed.password, bcrypt_cost)?,
            role: seed.role,
            name: seed.name.clone(),
            student_id: seed.student_id.clone(),
        },
    )
    .await?;

    tracing::info!("Seed user created: {} ({})", user.email, user.role);
    Ok(SeedOutcome::Created(user))
}

/// Pending request filed for a demo student
#[derive(Debug, Clone)]
pub struct SeedLeave {
    pub student_email: &'static str,
    pub leave_type: LeaveType,
    /// First day, counted from the seeding day
    pub starts_in_days: u64,
    pub length_days: u64,
    pub reason: &'static str,
    pub emergency_contact: &'static str,
}

/// Demo requests, all pending and in the future
pub fn demo_leave_requests() -> Vec<SeedLeave> {
    vec![
        SeedLeave {
            student_email: "student1@example.com",
            leave_type: LeaveType::Sick,
            starts_in_days: 1,
            length_days: 2,
            reason: "Cold and fever, need to rest",
            emergency_contact: "Mother 0912-345-678",
        },
        SeedLeave {
            student_email: "student1@example.com",
            leave_type: LeaveType::Personal,
            starts_in_days: 5,
            length_days: 1,
            reason: "Important family matter to handle",
            emergency_contact: "Father 0987-654-321",
        },
        SeedLeave {
            student_email: "student2@example.com",
            leave_type: LeaveType::Family,
            starts_in_days: 5,
            length_days: 2,
            reason: "Accompanying a relative to hospital",
            emergency_contact: "",
        },
    ]
}

/// File the demo requests for students that have none yet
///
/// Returns the number of requests created. Students missing from the
/// database are skipped.
pub async fn seed_leave_requests(pool: &SqlitePool, today: NaiveDate) -> Result<usize, BackendError> {
    // Student id per email, or None when the student is missing or already has requests
    let mut eligible: HashMap<&str, Option<Uuid>> = HashMap::new();
    let mut created = 0;

    for seed in demo_leave_requests() {
        if !eligible.contains_key(seed.student_email) {
            let id = match get_user_by_email(pool, seed.student_email).await? {
                None => {
                    tracing::warn!("Demo student {} is missing, skipping its requests", seed.student_email);
                    None
                }
                Some(student) if !find_by_user(pool, student.id, None, Some(1)).await?.is_empty() => {
                    tracing::info!("Demo student {} already has requests", seed.student_email);
                    None
                }
                Some(student) => Some(student.id),
            };
            eligible.insert(seed.student_email, id);
        }
        let Some(user_id) = eligible.get(seed.student_email).copied().flatten() else {
            continue;
        };

        let start = today
            .checked_add_days(Days::new(seed.starts_in_days))
            .ok_or_else(|| BackendError::config("Demo leave start is out of range"))?;
        let end = start
            .checked_add_days(Days::new(seed.length_days.saturating_sub(1)))
            .ok_or_else(|| BackendError::config("Demo leave end is out of range"))?;

        create_leave_request(
            pool,
            NewLeaveRequest {
                user_id,
                leave_type: seed.leave_type,
                start_date: start.and_time(NaiveTime::MIN).and_utc(),
                end_date: end.and_time(NaiveTime::MIN).and_utc(),
                reason: seed.reason.to_string(),
                emergency_contact: seed.emergency_contact.to_string(),
            },
        )
        .await?;
        created += 1;
    }

    tracing::info!("Seeded {} demo leave requests", created);
    Ok(created)
}

/// What a seeding run did
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub users: Vec<SeedOutcome>,
    pub leave_requests: usize,
}

/// Seed the default admin and, optionally, the demo accounts and requests
pub async fn seed_all(pool: &SqlitePool, include_demo: bool, bcrypt_cost: u32) -> Result<SeedReport, BackendError> {
    let mut seeds = vec![default_admin()];
    if include_demo {
        seeds.extend(demo_users());
    }

    let mut users = Vec::with_capacity(seeds.len());
    for seed in &seeds {
        users.push(seed_user(pool, seed, bcrypt_cost).await?);
    }

    let leave_requests = if include_demo {
        seed_leave_requests(pool, chrono::Utc::now().date_naive()).await?
    } else {
        0
    };

    Ok(SeedReport { users, leave_requests })
}
