use serde_json::json;

use super::*;
use crate::api::test_support::{client_with, spawn_recorder};
use crate::api::types::ProjectLogItem;

#[tokio::test]
async fn submit_posts_date_and_project_logs() {
    let (base, calls) = spawn_recorder(|c| (201, Some(json!({ "id": 9, "userId": 3, "reportDate": c.body["reportDate"] })))).await;
    let (client, _) = client_with(&base, Some("tok"));

    let report = NewWorkReport {
        report_date: "2024-05-02".into(),
        project_logs: vec![ProjectLogItem { project_id: "p1".into(), hours: 7.5, description: String::new() }],
        ..NewWorkReport::default()
    };
    let created = client.submit_work_report(&report).await.unwrap();

    assert_eq!(created.id, "9");
    assert_eq!(created.user_id.as_deref(), Some("3"));
    assert_eq!(created.report_date.as_deref(), Some("2024-05-02"));
    let call = calls.last();
    assert_eq!((call.method.as_str(), call.uri.as_str()), ("POST", "/work-reports"));
    assert_eq!(
        call.body,
        json!({ "reportDate": "2024-05-02", "projectLogs": [{ "projectId": "p1", "hours": 7.5 }] })
    );
}

#[tokio::test]
async fn listing_paths_split_mine_and_all() {
    let (base, calls) = spawn_recorder(|_| (200, Some(json!([{ "id": "r1" }])))).await;
    let (client, _) = client_with(&base, Some("tok"));

    assert_eq!(client.fetch_my_work_reports().await.unwrap().len(), 1);
    assert_eq!(calls.last().uri, "/work-reports");
    client.fetch_all_work_reports().await.unwrap();
    assert_eq!(calls.last().uri, "/work-reports/all");
}

#[tokio::test]
async fn forbidden_listing_reports_server_message() {
    let (base, _) = spawn_recorder(|_| (403, Some(json!({ "message": "Admins only" })))).await;
    let (client, _) = client_with(&base, Some("tok"));

    let err = client.fetch_all_work_reports().await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "Admins only");
}
