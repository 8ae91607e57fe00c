mod common;

use airavata_registry_client::{
    DescriptorKind, ExecutionState, Experiment, Project, WorkflowInstanceStatus,
};
use chrono::{TimeZone, Utc};
use common::{api_path, client};
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn project_lifecycle_uses_project_family_paths() {
    let server = MockServer::start_async().await;
    let add = server.mock(|when, then| {
        when.method(POST)
            .path(api_path("projectregistry/add/project"))
            .body("projectName=climate");
        then.status(200).body("Project added successfully");
    });
    let list = server.mock(|when, then| {
        when.method(GET)
            .path(api_path("projectregistry/get/projects"))
            .header("accept", "application/json");
        then.status(200)
            .json_body(json!([{"projectName": "climate"}, {"projectName": "default"}]));
    });
    let delete = server.mock(|when, then| {
        when.method(DELETE)
            .path(api_path("projectregistry/delete/project"))
            .query_param("projectName", "climate");
        then.status(200);
    });

    let (registry, _) = client(&server);
    let projects = registry.projects();
    projects
        .add_project(&Project::new("climate"))
        .await
        .expect("add project");
    let listed = projects.get_projects().await.expect("list projects");
    projects
        .delete_project("climate")
        .await
        .expect("delete project");

    assert_eq!(listed, vec![Project::new("climate"), Project::new("default")]);
    add.assert();
    list.assert();
    delete.assert();
}

#[tokio::test]
async fn empty_project_list_is_no_content() {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(GET).path(api_path("projectregistry/get/projects"));
        then.status(204);
    });

    let (registry, _) = client(&server);
    let listed = registry
        .projects()
        .get_projects()
        .await
        .expect("no projects");
    assert!(listed.is_empty());
}

#[tokio::test]
async fn experiments_are_filtered_by_project() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(api_path("experimentregistry/get/experiments"))
            .query_param("projectName", "climate");
        then.status(200).json_body(json!([{
            "experimentId": "exp-1",
            "projectName": "climate",
            "submittedUser": "admin",
            "experimentName": "baseline"
        }]));
    });

    let (registry, _) = client(&server);
    let experiments = registry
        .experiments()
        .get_experiments(Some("climate"))
        .await
        .expect("experiments");

    assert_eq!(
        experiments,
        vec![Experiment {
            id: "exp-1".to_string(),
            project: "climate".to_string(),
            submitted_user: Some("admin".to_string()),
            name: Some("baseline".to_string()),
        }]
    );
    mock.assert();
}

#[tokio::test]
async fn add_experiment_prefers_explicit_project() {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path(api_path("experimentregistry/add/experiment"))
            .body("experimentId=exp-2&projectName=override");
        then.status(200);
    });

    let (registry, _) = client(&server);
    let experiment = Experiment {
        id: "exp-2".to_string(),
        project: "ignored".to_string(),
        submitted_user: None,
        name: None,
    };
    registry
        .experiments()
        .add_experiment("override", &experiment)
        .await
        .expect("add experiment");
    mock.assert();
}

#[tokio::test]
async fn workflow_status_round_trips_through_provenance() {
    let server = MockServer::start_async().await;
    let read = server.mock(|when, then| {
        when.method(GET)
            .path(api_path("provenanceregistry/get/workflowinstancestatus"))
            .query_param("workflowInstanceId", "wf-9");
        then.status(200).json_body(json!({
            "executionStatus": "STARTED",
            "statusUpdateTime": "2026-03-01T12:00:00Z"
        }));
    });
    let write = server.mock(|when, then| {
        when.method(POST)
            .path(api_path("provenanceregistry/update/workflowinstancestatus"))
            .body(
                "executionStatus=FINISHED&statusUpdateTime=2026-03-01T13%3A30%3A00.000Z&workflowInstanceId=wf-9",
            );
        then.status(200);
    });

    let (registry, _) = client(&server);
    let provenance = registry.provenance();
    let status = provenance
        .get_workflow_instance_status("wf-9")
        .await
        .expect("status read")
        .expect("status present");
    assert_eq!(status.state, ExecutionState::Started);

    provenance
        .update_workflow_instance_status(
            "wf-9",
            &WorkflowInstanceStatus {
                state: ExecutionState::Finished,
                updated_at: Utc.with_ymd_and_hms(2026, 3, 1, 13, 30, 0).single(),
            },
        )
        .await
        .expect("status write");
    read.assert();
    write.assert();
}

#[tokio::test]
async fn descriptor_calls_use_kind_specific_paths() {
    let server = MockServer::start_async().await;
    let exists = server.mock(|when, then| {
        when.method(GET)
            .path(api_path("descriptorsregistry/hostdescriptor/exist"))
            .query_param("hostDescriptorName", "bigred");
        then.status(200).body("true");
    });
    let missing = server.mock(|when, then| {
        when.method(GET)
            .path(api_path("descriptorsregistry/get/applicationdescriptor"))
            .query_param("applicationDescriptorName", "echo");
        then.status(204);
    });
    let names = server.mock(|when, then| {
        when.method(GET)
            .path(api_path("descriptorsregistry/get/servicedescriptor/names"));
        then.status(200).json_body(json!(["echo", "wrf"]));
    });

    let (registry, _) = client(&server);
    let descriptors = registry.descriptors();
    assert!(
        descriptors
            .descriptor_exists(DescriptorKind::Host, "bigred")
            .await
            .expect("exists")
    );
    assert_eq!(
        descriptors
            .get_descriptor(DescriptorKind::Application, "echo")
            .await
            .expect("get"),
        None
    );
    assert_eq!(
        descriptors
            .descriptor_names(DescriptorKind::Service)
            .await
            .expect("names"),
        vec!["echo".to_string(), "wrf".to_string()]
    );
    exists.assert();
    missing.assert();
    names.assert();
}

#[tokio::test]
async fn configuration_write_sends_expiry_date() {
    let server = MockServer::start_async().await;
    let save = server.mock(|when, then| {
        when.method(POST)
            .path(api_path("configurationregistry/save/configuration"))
            .body("date=2027-01-01T00%3A00%3A00Z&key=gfac&value=enabled");
        then.status(200);
    });
    let purge = server.mock(|when, then| {
        when.method(DELETE)
            .path(api_path("configurationregistry/delete/allconfiguration"))
            .query_param("key", "gfac");
        then.status(200);
    });

    let (registry, _) = client(&server);
    let configuration = registry.configuration();
    let expiry = Utc
        .with_ymd_and_hms(2027, 1, 1, 0, 0, 0)
        .single()
        .expect("valid date");
    configuration
        .set_configuration("gfac", "enabled", expiry)
        .await
        .expect("save configuration");
    configuration
        .remove_all_configuration("gfac")
        .await
        .expect("purge configuration");
    save.assert();
    purge.assert();
}

#[tokio::test]
async fn publishing_a_workflow_names_both_sides() {
    let server = MockServer::start_async().await;
    let publish = server.mock(|when, then| {
        when.method(POST)
            .path(api_path("publishwfregistry/publish/workflow"))
            .body("publishWorkflowName=shared-echo&workflowName=echo");
        then.status(200);
    });
    let published = server.mock(|when, then| {
        when.method(GET)
            .path(api_path("publishwfregistry/publishwf/exist"))
            .query_param("workflowName", "shared-echo");
        then.status(200).body("true");
    });

    let (registry, _) = client(&server);
    let workflows = registry.published_workflows();
    workflows
        .publish_workflow("echo", "shared-echo")
        .await
        .expect("publish");
    assert!(workflows.is_published("shared-echo").await.expect("exists"));
    publish.assert();
    published.assert();
}
