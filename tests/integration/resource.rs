//! Resource lifecycle against an in-memory server.

use std::sync::Arc;
use std::thread;

use rdjob::testing::{sample_flat_job, sample_job};
use rdjob::{
    ClientError, InMemoryJobClient, JobClient, JobId, JobResource, ResourceError, YamlLoader,
};

use crate::common::FULL_JOB_YAML;

#[test]
fn test_full_lifecycle() {
    let resource = JobResource::new(InMemoryJobClient::new());
    let mut flat = YamlLoader::parse_job_config(FULL_JOB_YAML).unwrap();

    let id = resource.create(&mut flat).unwrap();
    assert_eq!(flat.id.as_deref(), Some(id.as_str()));

    flat.log_level = "WARN".into();
    flat.command.truncate(1);
    resource.update(&mut flat).unwrap();

    let stored = resource.client().get_job(&id).unwrap();
    assert_eq!(stored.log_level, "WARN");
    assert_eq!(stored.sequence.commands.len(), 1);

    resource.delete(&mut flat).unwrap();
    assert!(flat.id.is_none());
    assert!(resource.client().is_empty().unwrap());
}

#[test]
fn test_read_normalizes_legacy_job() {
    let client = InMemoryJobClient::new().omitting_project_name();
    let mut legacy = sample_job();
    legacy.dispatch = None;
    let id = client.insert(legacy).unwrap();

    let resource = JobResource::new(client);
    let mut flat = sample_flat_job();
    flat.id = Some(id.to_string());
    flat.max_thread_count = 8;

    resource.read(&mut flat).unwrap();
    assert_eq!(flat.max_thread_count, 1);
    assert_eq!(flat.rank_order, "ascending");
    assert!(flat.rank_attribute.is_empty());
    assert_eq!(flat.project_name, "prod");
}

#[test]
fn test_lookup_of_legacy_job_has_no_project() {
    let client = InMemoryJobClient::new().omitting_project_name();
    let id = client.insert(sample_job()).unwrap();

    let flat = JobResource::new(client).lookup(&id).unwrap();
    assert_eq!(flat.id.as_deref(), Some(id.as_str()));
    assert!(flat.project_name.is_empty());
}

#[test]
fn test_read_after_remote_delete_fails() {
    let resource = JobResource::new(InMemoryJobClient::new());
    let mut flat = sample_flat_job();
    let id = resource.create(&mut flat).unwrap();

    resource.client().delete_job(&id).unwrap();
    assert!(matches!(
        resource.read(&mut flat),
        Err(ResourceError::Client(ClientError::NotFound(_)))
    ));
}

#[test]
fn test_shared_client_across_threads() {
    let client = Arc::new(InMemoryJobClient::new());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let client = Arc::clone(&client);
            thread::spawn(move || {
                let resource = JobResource::new(client);
                let mut flat = sample_flat_job();
                flat.name = format!("deploy-{}", i);
                resource.create(&mut flat).unwrap()
            })
        })
        .collect();

    let ids: Vec<JobId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(client.len().unwrap(), 4);
    for id in &ids {
        assert!(client.get_job(id).unwrap().name.starts_with("deploy-"));
    }
}
