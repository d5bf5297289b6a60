//! Leave helpers of the client against wiremock

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use studentleave::client::{ClientError, MemoryTokenStore, TokenStore};
use studentleave::shared::types::{LeaveStatus, LeaveType};

use crate::common::fresh_token;
use crate::common::mock_server::{client_for, leave_request_json};

const REQUEST_ID: &str = "0b5d8a52-5a4f-4b07-9c7e-3f1f1f0a0001";

#[tokio::test]
async fn test_my_requests_sends_filters_and_bearer() {
    let server = MockServer::start().await;
    let token = fresh_token();
    Mock::given(method("GET"))
        .and(path("/api/leave/my-requests"))
        .and(query_param("status", "pending"))
        .and(query_param("limit", "5"))
        .and(header("authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "requests": [leave_request_json(REQUEST_ID, "pending")],
            "total": 1,
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server, MemoryTokenStore::with_token(token));

    let response = client.my_requests(Some(LeaveStatus::Pending), Some(5)).await.unwrap();

    assert_eq!(response.total, 1);
    assert_eq!(response.requests[0].id, REQUEST_ID);
    assert_eq!(response.requests[0].leave_type, LeaveType::Sick);
    assert_eq!(response.requests[0].status, LeaveStatus::Pending);
}

#[tokio::test]
async fn test_rejected_token_is_cleared() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/leave/types"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid token", "status": 401 })))
        .mount(&server)
        .await;
    let client = client_for(&server, MemoryTokenStore::with_token(fresh_token()));

    let err = client.leave_types().await.unwrap_err();

    assert_matches!(err, ClientError::Api { status: 401, .. });
    assert_eq!(client.store().load(), None);
    assert_matches!(client.leave_types().await, Err(ClientError::NotLoggedIn));
}

#[tokio::test]
async fn test_forbidden_keeps_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/leave/pending"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Only teachers and admins can review leave requests",
            "status": 403,
        })))
        .mount(&server)
        .await;
    let client = client_for(&server, MemoryTokenStore::with_token(fresh_token()));

    let err = client.pending_requests().await.unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert_eq!(err.user_message(), "Only teachers and admins can review leave requests");
    assert!(client.store().load().is_some());
}

#[tokio::test]
async fn test_reject_posts_reason_and_note() {
    let server = MockServer::start().await;
    let mut rejected = leave_request_json(REQUEST_ID, "rejected");
    rejected["rejected_reason"] = json!("Exam week");
    Mock::given(method("POST"))
        .and(path(format!("/api/leave/reject/{}", REQUEST_ID)))
        .and(body_json(json!({ "teacher_note": "Sorry", "rejected_reason": "Exam week" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Leave request rejected",
            "request": rejected,
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server, MemoryTokenStore::with_token(fresh_token()));

    let response = client.reject(REQUEST_ID, " Exam week ", Some("Sorry")).await.unwrap();

    assert_eq!(response.message, "Leave request rejected");
    assert_eq!(response.request.status, LeaveStatus::Rejected);
    assert_eq!(response.request.rejected_reason, "Exam week");
}

#[tokio::test]
async fn test_request_detail_unwraps_envelope() {
    let server = MockServer::start().await;
    let mut request = leave_request_json(REQUEST_ID, "pending");
    request["applicant"] = json!({ "name": "Wang Xiaoming", "email": "student1@example.com", "student_id": "S20231001" });
    Mock::given(method("GET"))
        .and(path(format!("/api/leave/request/{}", REQUEST_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "request": request })))
        .mount(&server)
        .await;
    let client = client_for(&server, MemoryTokenStore::with_token(fresh_token()));

    let request = client.request_detail(REQUEST_ID).await.unwrap();

    assert_eq!(request.applicant.map(|a| a.student_id), Some("S20231001".to_string()));
}
