//! Canned server responses for wiremock-backed client tests

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use studentleave::client::{ApiClient, ClientConfig, MemoryTokenStore};

/// A user object the way the server serializes it
pub fn user_json(email: &str, role: &str) -> Value {
    json!({
        "_id": "00000000-0000-0000-0000-000000000001",
        "email": email,
        "role": role,
        "name": "Wang Xiaoming",
        "student_id": "S20231001",
        "is_active": true,
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z",
    })
}

/// A pending sick-leave request owned by user 1
pub fn leave_request_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "user_id": "00000000-0000-0000-0000-000000000001",
        "leave_type": "sick",
        "start_date": "2030-03-01T00:00:00Z",
        "end_date": "2030-03-02T00:00:00Z",
        "reason": "Fever",
        "status": status,
        "emergency_contact": "",
        "teacher_note": "",
        "attachment_url": "",
        "approved_by": null,
        "approved_at": null,
        "rejected_reason": "",
        "created_at": "2030-02-27T08:00:00Z",
        "updated_at": "2030-02-27T08:00:00Z",
    })
}

/// Mount a successful login on `/api/auth/login` answering with `token`
pub async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "token": token,
            "user": user_json("student1@example.com", "student"),
        })))
        .mount(server)
        .await;
}

/// Client pointed at the mock server with an in-memory token store
pub fn client_for(server: &MockServer, store: MemoryTokenStore) -> ApiClient<MemoryTokenStore> {
    ApiClient::new(ClientConfig::new(server.uri()), store)
}
