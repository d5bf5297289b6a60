//! Leave workflow API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use studentleave::shared::types::Role;

use crate::common::{create_test_user, date_before_today, date_from_today, TestApp, TestUser};

fn application(leave_type: &str, reason: &str) -> Value {
    json!({
        "leave_type": leave_type,
        "start_date": date_from_today(1),
        "end_date": date_from_today(2),
        "reason": reason,
        "emergency_contact": "Mother 13800000000"
    })
}

async fn apply(app: &TestApp, user: &TestUser, leave_type: &str, reason: &str) -> String {
    let response = app
        .post("/api/leave/apply", user.token(), application(leave_type, reason))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body["request_id"].as_str().expect("request_id").to_string()
}

struct Cast {
    app: TestApp,
    student: TestUser,
    other_student: TestUser,
    teacher: TestUser,
}

async fn cast() -> Cast {
    let app = TestApp::new().await;
    let student = create_test_user(&app, "student1@example.com", Role::Student, "Wang Xiaoming").await;
    let other_student = create_test_user(&app, "student2@example.com", Role::Student, "Li Xiaohua").await;
    let teacher = create_test_user(&app, "teacher1@example.com", Role::Teacher, "Ms Zhang").await;
    Cast {
        app,
        student,
        other_student,
        teacher,
    }
}

#[tokio::test]
async fn test_leave_types_catalogue() {
    let Cast { app, student, .. } = cast().await;

    let response = app.get("/api/leave/types", student.token()).await;

    assert_eq!(response.status, StatusCode::OK);
    let ids: Vec<&str> = response.body["leave_types"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["sick", "personal", "family", "funeral", "maternity", "emergency"]);
}

#[tokio::test]
async fn test_apply_creates_pending_request() {
    let Cast { app, student, .. } = cast().await;

    let response = app
        .post("/api/leave/apply", student.token(), application("sick", "  Fever "))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.message(), "Leave request submitted successfully");
    let request = &response.body["leave_request"];
    assert_eq!(request["_id"], response.body["request_id"]);
    assert_eq!(request["status"], "pending");
    assert_eq!(request["leave_type"], "sick");
    assert_eq!(request["reason"], "Fever");
    assert_eq!(request["user_id"], student.id.to_string());
    assert_eq!(request["approved_by"], Value::Null);
    assert!(request.get("applicant").is_none());
}

#[tokio::test]
async fn test_apply_validation() {
    let Cast { app, student, .. } = cast().await;

    let mut missing_reason = application("sick", "x");
    missing_reason["reason"] = json!("   ");
    let response = app.post("/api/leave/apply", student.token(), missing_reason).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Missing required field: reason");

    let response = app
        .post("/api/leave/apply", student.token(), json!({ "reason": "x" }))
        .await;
    assert_eq!(response.message(), "Missing required field: leave_type");

    let response = app
        .post("/api/leave/apply", student.token(), application("vacation", "Beach"))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let mut past = application("personal", "Errand");
    past["start_date"] = json!(date_before_today(1));
    let response = app.post("/api/leave/apply", student.token(), past).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Start date cannot be earlier than today");

    let mut backwards = application("personal", "Errand");
    backwards["start_date"] = json!(date_from_today(5));
    backwards["end_date"] = json!(date_from_today(3));
    let response = app.post("/api/leave/apply", student.token(), backwards).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "End date cannot be earlier than start date");

    let mut garbled = application("personal", "Errand");
    garbled["start_date"] = json!("next tuesday");
    let response = app.post("/api/leave/apply", student.token(), garbled).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let mine = app.get("/api/leave/my-requests", student.token()).await;
    assert_eq!(mine.body["total"], 0);
}

#[tokio::test]
async fn test_same_day_leave_is_allowed() {
    let Cast { app, student, .. } = cast().await;
    let today = date_from_today(0);

    let response = app
        .post(
            "/api/leave/apply",
            student.token(),
            json!({ "leave_type": "emergency", "start_date": today, "end_date": today, "reason": "Flooded" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_my_requests_are_private_sorted_and_filterable() {
    let Cast {
        app,
        student,
        other_student,
        teacher,
    } = cast().await;

    let first = apply(&app, &student, "sick", "first").await;
    let second = apply(&app, &student, "personal", "second").await;
    let third = apply(&app, &student, "family", "third").await;
    apply(&app, &other_student, "sick", "not mine").await;

    let all = app.get("/api/leave/my-requests", student.token()).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["total"], 3);
    let ids: Vec<&str> = all.body["requests"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, [third.as_str(), second.as_str(), first.as_str()]);

    let approved = app
        .post(&format!("/api/leave/approve/{}", second), teacher.token(), json!({}))
        .await;
    assert_eq!(approved.status, StatusCode::OK);

    let pending = app.get("/api/leave/my-requests?status=pending", student.token()).await;
    assert_eq!(pending.body["total"], 2);

    let approved = app.get("/api/leave/my-requests?status=approved", student.token()).await;
    assert_eq!(approved.body["total"], 1);
    assert_eq!(approved.body["requests"][0]["_id"], second);

    let limited = app.get("/api/leave/my-requests?limit=1", student.token()).await;
    assert_eq!(limited.body["total"], 1);
    assert_eq!(limited.body["requests"][0]["_id"], third);

    let zero = app.get("/api/leave/my-requests?limit=0", student.token()).await;
    assert_eq!(zero.status, StatusCode::BAD_REQUEST);
    assert_eq!(zero.message(), "limit must be at least 1");

    let bogus = app.get("/api/leave/my-requests?status=lost", student.token()).await;
    assert_eq!(bogus.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_pending_is_for_reviewers_only() {
    let Cast {
        app,
        student,
        other_student,
        teacher,
    } = cast().await;
    let admin = create_test_user(&app, "admin1@example.com", Role::Admin, "Lin").await;

    let first = apply(&app, &student, "sick", "first").await;
    let second = apply(&app, &other_student, "funeral", "second").await;

    let forbidden = app.get("/api/leave/pending", student.token()).await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
    assert_eq!(forbidden.message(), "Only teachers and admins can review leave requests");

    let listed = app.get("/api/leave/pending", teacher.token()).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.message(), "Pending requests retrieved successfully");
    let requests = listed.body["requests"].as_array().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0]["_id"], first);
    assert_eq!(requests[1]["_id"], second);
    assert_eq!(requests[0]["applicant"]["name"], "Wang Xiaoming");
    assert_eq!(requests[0]["applicant"]["email"], "student1@example.com");
    assert_eq!(requests[1]["applicant"]["name"], "Li Xiaohua");

    let rejected = app
        .post(
            &format!("/api/leave/reject/{}", first),
            admin.token(),
            json!({ "rejected_reason": "Exam week" }),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::OK);

    let listed = app.get("/api/leave/pending", admin.token()).await;
    assert_eq!(listed.body["requests"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_request_detail_visibility() {
    let Cast {
        app,
        student,
        other_student,
        teacher,
    } = cast().await;
    let id = apply(&app, &student, "sick", "Fever").await;
    let uri = format!("/api/leave/request/{}", id);

    let own = app.get(&uri, student.token()).await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["request"]["_id"], id);
    assert!(own.body["request"].get("applicant").is_none());

    let stranger = app.get(&uri, other_student.token()).await;
    assert_eq!(stranger.status, StatusCode::FORBIDDEN);
    assert_eq!(stranger.message(), "You are not allowed to view this leave request");

    let reviewer = app.get(&uri, teacher.token()).await;
    assert_eq!(reviewer.status, StatusCode::OK);
    assert_eq!(reviewer.body["request"]["applicant"]["email"], "student1@example.com");

    let unknown = app
        .get(
            "/api/leave/request/00000000-0000-0000-0000-000000000000",
            teacher.token(),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.message(), "Leave request not found");

    let garbage = app.get("/api/leave/request/not-a-uuid", teacher.token()).await;
    assert_eq!(garbage.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_approve_once() {
    let Cast { app, student, teacher, .. } = cast().await;
    let id = apply(&app, &student, "sick", "Fever").await;
    let uri = format!("/api/leave/approve/{}", id);

    let by_student = app.post(&uri, student.token(), json!({})).await;
    assert_eq!(by_student.status, StatusCode::FORBIDDEN);

    let approved = app
        .post(&uri, teacher.token(), json!({ "teacher_note": " Get well soon " }))
        .await;
    assert_eq!(approved.status, StatusCode::OK);
    assert_eq!(approved.message(), "Leave request approved");
    assert_eq!(approved.body["request"]["status"], "approved");
    assert_eq!(approved.body["request"]["teacher_note"], "Get well soon");
    assert_eq!(approved.body["request"]["approved_by"], teacher.id.to_string());
    assert!(approved.body["request"]["approved_at"].is_string());

    let again = app.post(&uri, teacher.token(), json!({})).await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.message(), "Leave request has already been processed");

    let reject_after = app
        .post(
            &format!("/api/leave/reject/{}", id),
            teacher.token(),
            json!({ "rejected_reason": "Changed my mind" }),
        )
        .await;
    assert_eq!(reject_after.status, StatusCode::BAD_REQUEST);

    let missing = app
        .post(
            "/api/leave/approve/00000000-0000-0000-0000-000000000000",
            teacher.token(),
            json!({}),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_approve_without_body() {
    let Cast { app, student, teacher, .. } = cast().await;
    let id = apply(&app, &student, "personal", "Errand").await;

    let response = app
        .request(
            axum::http::Method::POST,
            &format!("/api/leave/approve/{}", id),
            teacher.token(),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["request"]["teacher_note"], "");
}

#[tokio::test]
async fn test_reject_requires_reason() {
    let Cast { app, student, teacher, .. } = cast().await;
    let id = apply(&app, &student, "personal", "Errand").await;
    let uri = format!("/api/leave/reject/{}", id);

    let blank = app
        .post(&uri, teacher.token(), json!({ "rejected_reason": "  " }))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.message(), "A rejection reason is required");

    let rejected = app
        .post(
            &uri,
            teacher.token(),
            json!({ "rejected_reason": "Exam week", "teacher_note": "Ask again next week" }),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::OK);
    assert_eq!(rejected.message(), "Leave request rejected");
    assert_eq!(rejected.body["request"]["status"], "rejected");
    assert_eq!(rejected.body["request"]["rejected_reason"], "Exam week");
    assert_eq!(rejected.body["request"]["approved_by"], teacher.id.to_string());

    let seen_by_owner = app.get(&format!("/api/leave/request/{}", id), student.token()).await;
    assert_eq!(seen_by_owner.body["request"]["status"], "rejected");
}

#[tokio::test]
async fn test_concurrent_reviews_decide_once() {
    let Cast { app, student, teacher, .. } = cast().await;
    let admin = create_test_user(&app, "admin1@example.com", Role::Admin, "Lin").await;
    let id = apply(&app, &student, "sick", "Fever").await;

    let approve_uri = format!("/api/leave/approve/{}", id);
    let reject_uri = format!("/api/leave/reject/{}", id);
    let (approve, reject) = tokio::join!(
        app.post(&approve_uri, teacher.token(), json!({})),
        app.post(&reject_uri, admin.token(), json!({ "rejected_reason": "No" })),
    );

    let mut statuses = [approve.status.as_u16(), reject.status.as_u16()];
    statuses.sort_unstable();
    assert_eq!(statuses, [200, 400]);

    let detail = app.get(&format!("/api/leave/request/{}", id), student.token()).await;
    let expected = if approve.status == StatusCode::OK { "approved" } else { "rejected" };
    assert_eq!(detail.body["request"]["status"], expected);
}

#[tokio::test]
async fn test_offset_dates_use_the_written_calendar_day() {
    let Cast { app, student, .. } = cast().await;

    // The end is a later instant than the start but falls on the day before
    let response = app
        .post(
            "/api/leave/apply",
            student.token(),
            json!({
                "leave_type": "personal",
                "start_date": format!("{}T00:30:00+08:00", date_from_today(10)),
                "end_date": format!("{}T20:00:00-05:00", date_from_today(9)),
                "reason": "Travel"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "End date cannot be earlier than start date");
}
