use serde_json::json;

use super::*;
use crate::api::test_support::{client_with, spawn_recorder};

#[tokio::test]
async fn add_project_posts_name_and_extra_fields() {
    let (base, calls) = spawn_recorder(|c| (201, Some(json!({ "id": 5, "name": c.body["name"], "client": c.body["client"] })))).await;
    let (client, _) = client_with(&base, Some("tok"));

    let mut project = NewProject { name: "Intranet".into(), ..NewProject::default() };
    project.extra.insert("client".into(), json!("Acme"));
    let created = client.add_project(&project).await.unwrap();

    assert_eq!(created.id, "5");
    assert_eq!(created.extra.get("client"), Some(&json!("Acme")));
    assert_eq!(calls.last().body, json!({ "name": "Intranet", "client": "Acme" }));
}

#[tokio::test]
async fn update_and_delete_target_project_path() {
    let (base, calls) = spawn_recorder(|c| {
        if c.method == "DELETE" { (204, None) } else { (200, Some(json!({ "id": "p1", "name": "Renamed" }))) }
    })
    .await;
    let (client, _) = client_with(&base, Some("tok"));

    let mut patch = Patch::new();
    patch.insert("name".into(), json!("Renamed"));
    let updated = client.update_project("p1", &patch).await.unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(calls.last().method, "PUT");
    assert_eq!(calls.last().uri, "/projects/p1");

    client.delete_project("p1").await.unwrap();
    assert_eq!(calls.last().method, "DELETE");
    assert_eq!(calls.len(), 2);
}

#[tokio::test]
async fn missing_project_surfaces_server_message() {
    let (base, _) = spawn_recorder(|_| (404, Some(json!({ "message": "Project not found" })))).await;
    let (client, _) = client_with(&base, Some("tok"));

    let err = client.fetch_project("nope").await.unwrap_err();
    assert_eq!(err.to_string(), "Project not found");
}
