//! Job resource lifecycle.
//!
//! [`JobResource`] ties the translators to a [`JobClient`]: a flat record is
//! assembled and imported on create and update, and refreshed from the server
//! on read. Every write is followed by a read so the flat record reflects what
//! the server stored.

use thiserror::Error;
use tracing::{debug, info};

use crate::client::{ClientError, JobClient};
use crate::config::types::FlatJob;
use crate::core::types::JobId;
use crate::translate::{TranslateError, job_from_flat, job_to_flat, write_job_to_flat};

/// Errors that can occur while managing a job resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The flat record could not be assembled into a job.
    #[error(transparent)]
    Translate(#[from] TranslateError),

    /// The remote call failed.
    #[error("remote call failed: {0}")]
    Client(#[from] ClientError),

    /// The operation needs a job that was already created.
    #[error("job has no identity yet")]
    MissingId,
}

/// Create, read, update and delete jobs described by flat records.
pub struct JobResource<C> {
    client: C,
}

impl<C: JobClient> JobResource<C> {
    /// Create a resource backed by the given client.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Import a new job and record its identity in `flat`.
    ///
    /// Any identity already present in `flat` is ignored; the server assigns
    /// a fresh one.
    pub fn create(&self, flat: &mut FlatJob) -> Result<JobId, ResourceError> {
        let mut job = job_from_flat(flat)?;
        job.id = None;

        let id = self.client.create_job(&job)?;
        info!(job = %job.full_name(), id = %id, "created job");

        flat.id = Some(id.to_string());
        self.read(flat)?;
        Ok(id)
    }

    /// Refresh `flat` from the server.
    pub fn read(&self, flat: &mut FlatJob) -> Result<(), ResourceError> {
        let id = current_id(flat)?;
        let job = self.client.get_job(&id)?;
        debug!(id = %id, "refreshing job");
        write_job_to_flat(&job, flat);
        Ok(())
    }

    /// Replace the server's job with the one described by `flat`.
    pub fn update(&self, flat: &mut FlatJob) -> Result<JobId, ResourceError> {
        current_id(flat)?;
        let job = job_from_flat(flat)?;

        let id = self.client.update_job(&job)?;
        info!(job = %job.full_name(), id = %id, "updated job");

        flat.id = Some(id.to_string());
        self.read(flat)?;
        Ok(id)
    }

    /// Delete the job and clear the identity in `flat`.
    pub fn delete(&self, flat: &mut FlatJob) -> Result<(), ResourceError> {
        let id = current_id(flat)?;
        self.client.delete_job(&id)?;
        info!(id = %id, "deleted job");

        flat.id = None;
        Ok(())
    }

    /// Fetch an existing job as a fresh flat record.
    pub fn lookup(&self, id: &JobId) -> Result<FlatJob, ResourceError> {
        let job = self.client.get_job(id)?;
        Ok(job_to_flat(&job))
    }
}

fn current_id(flat: &FlatJob) -> Result<JobId, ResourceError> {
    flat.id
        .as_deref()
        .filter(|id| !id.is_empty())
        .map(JobId::new)
        .ok_or(ResourceError::MissingId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryJobClient;
    use crate::core::job::Job;
    use crate::testing::sample_flat_job;

    struct RejectingClient;

    impl JobClient for RejectingClient {
        fn get_job(&self, id: &JobId) -> Result<Job, ClientError> {
            Err(ClientError::NotFound(id.clone()))
        }

        fn create_job(&self, _job: &Job) -> Result<JobId, ClientError> {
            Err(ClientError::Transport("connection refused".into()))
        }

        fn update_job(&self, _job: &Job) -> Result<JobId, ClientError> {
            Err(ClientError::Transport("connection refused".into()))
        }

        fn delete_job(&self, _id: &JobId) -> Result<(), ClientError> {
            Err(ClientError::Transport("connection refused".into()))
        }
    }

    #[test]
    fn test_create_threads_identity_back() {
        let resource = JobResource::new(InMemoryJobClient::new());
        let mut flat = sample_flat_job();

        let id = resource.create(&mut flat).unwrap();
        assert_eq!(flat.id.as_deref(), Some(id.as_str()));
        assert_eq!(resource.client().get_job(&id).unwrap().name, flat.name);
    }

    #[test]
    fn test_create_ignores_stale_identity() {
        let resource = JobResource::new(InMemoryJobClient::new());
        let mut flat = sample_flat_job();
        flat.id = Some("stale".into());

        let id = resource.create(&mut flat).unwrap();
        assert_ne!(id.as_str(), "stale");
    }

    #[test]
    fn test_create_leaves_record_unchanged_apart_from_identity() {
        let resource = JobResource::new(InMemoryJobClient::new());
        let original = sample_flat_job();
        let mut flat = original.clone();

        resource.create(&mut flat).unwrap();
        flat.id = None;
        assert_eq!(flat, original);
    }

    #[test]
    fn test_create_fails_fast_on_invalid_record() {
        let resource = JobResource::new(InMemoryJobClient::new());
        let mut flat = sample_flat_job();
        flat.schedule = "0 0 12 15 1 MON *".into();

        let result = resource.create(&mut flat);
        assert!(matches!(result, Err(ResourceError::Translate(_))));
        assert!(flat.id.is_none());
        assert!(resource.client().is_empty().unwrap());
    }

    #[test]
    fn test_read_keeps_project_when_server_omits_it() {
        let resource = JobResource::new(InMemoryJobClient::new().omitting_project_name());
        let mut flat = sample_flat_job();

        resource.create(&mut flat).unwrap();
        assert_eq!(flat.project_name, sample_flat_job().project_name);
    }

    #[test]
    fn test_read_requires_identity() {
        let resource = JobResource::new(InMemoryJobClient::new());
        let mut flat = sample_flat_job();
        assert!(matches!(
            resource.read(&mut flat),
            Err(ResourceError::MissingId)
        ));
    }

    #[test]
    fn test_update_round_trip() {
        let resource = JobResource::new(InMemoryJobClient::new());
        let mut flat = sample_flat_job();
        let id = resource.create(&mut flat).unwrap();

        flat.description = "second revision".into();
        assert_eq!(resource.update(&mut flat).unwrap(), id);
        assert_eq!(flat.description, "second revision");
        assert_eq!(
            resource.client().get_job(&id).unwrap().description,
            "second revision"
        );
    }

    #[test]
    fn test_update_requires_identity() {
        let resource = JobResource::new(InMemoryJobClient::new());
        let mut flat = sample_flat_job();
        assert!(matches!(
            resource.update(&mut flat),
            Err(ResourceError::MissingId)
        ));
    }

    #[test]
    fn test_update_surfaces_client_error() {
        let resource = JobResource::new(RejectingClient);
        let mut flat = sample_flat_job();
        flat.id = Some("abc".into());
        assert!(matches!(
            resource.update(&mut flat),
            Err(ResourceError::Client(ClientError::Transport(_)))
        ));
    }

    #[test]
    fn test_delete_clears_identity() {
        let resource = JobResource::new(InMemoryJobClient::new());
        let mut flat = sample_flat_job();
        let id = resource.create(&mut flat).unwrap();

        resource.delete(&mut flat).unwrap();
        assert!(flat.id.is_none());
        assert!(matches!(
            resource.client().get_job(&id),
            Err(ClientError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_failure_keeps_identity() {
        let resource = JobResource::new(RejectingClient);
        let mut flat = sample_flat_job();
        flat.id = Some("abc".into());

        assert!(resource.delete(&mut flat).is_err());
        assert_eq!(flat.id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_lookup_returns_fresh_record() {
        let resource = JobResource::new(InMemoryJobClient::new());
        let mut flat = sample_flat_job();
        let id = resource.create(&mut flat).unwrap();

        assert_eq!(resource.lookup(&id).unwrap(), flat);
    }

    #[test]
    fn test_lookup_not_found() {
        let resource = JobResource::new(RejectingClient);
        assert!(matches!(
            resource.lookup(&JobId::new("gone")),
            Err(ResourceError::Client(ClientError::NotFound(_)))
        ));
    }
}
