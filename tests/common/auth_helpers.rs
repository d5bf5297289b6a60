//! Authentication test helpers

use uuid::Uuid;

use studentleave::backend::auth::users::{create_user, NewUser};
use studentleave::shared::types::Role;

use super::app::TestApp;

pub const TEST_PASSWORD: &str = "password123";

/// A user inserted straight into the database, with a signed token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

impl TestUser {
    pub fn token(&self) -> Option<&str> {
        Some(&self.token)
    }
}

/// Insert a user with [`TEST_PASSWORD`] and issue a token for it
pub async fn create_test_user(app: &TestApp, email: &str, role: Role, name: &str) -> TestUser {
    let password_hash = bcrypt::hash(TEST_PASSWORD, 4).expect("Failed to hash password");
    let user = create_user(
        app.pool(),
        NewUser {
            email: email.to_string(),
            password_hash,
            role,
            name: name.to_string(),
            student_id: if role == Role::Student {
                format!("S{}", &Uuid::new_v4().simple().to_string()[..8])
            } else {
                String::new()
            },
        },
    )
    .await
    .expect("Failed to create test user");

    let token = app
        .state
        .tokens
        .create_token(&user)
        .expect("Failed to create token");

    TestUser {
        id: user.id,
        email: user.email,
        token,
    }
}
