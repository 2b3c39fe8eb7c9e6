//! Boundary to the remote job-scheduling system.
//!
//! The translators never perform I/O. A [`JobClient`] fetches jobs by
//! identifier and accepts fully assembled jobs for import; transports own
//! their own retry and timeout policy.

mod memory;

pub use memory::InMemoryJobClient;

use thiserror::Error;

use crate::core::job::Job;
use crate::core::types::JobId;

/// Errors returned by a job client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The requested job does not exist.
    #[error("job not found: {0}")]
    NotFound(JobId),

    /// The job was rejected, or the transport failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// Client lock was poisoned.
    #[error("client lock poisoned")]
    LockPoisoned,
}

/// Operations the remote system offers on job definitions.
///
/// Calls are synchronous and return either a complete result or an error.
pub trait JobClient: Send + Sync {
    /// Fetch a job by identifier.
    fn get_job(&self, id: &JobId) -> Result<Job, ClientError>;

    /// Import a new job and return the identity the server assigned.
    fn create_job(&self, job: &Job) -> Result<JobId, ClientError>;

    /// Replace the job with the same identity and return that identity.
    fn update_job(&self, job: &Job) -> Result<JobId, ClientError>;

    /// Delete a job.
    fn delete_job(&self, id: &JobId) -> Result<(), ClientError>;
}

impl<C: JobClient + ?Sized> JobClient for std::sync::Arc<C> {
    fn get_job(&self, id: &JobId) -> Result<Job, ClientError> {
        (**self).get_job(id)
    }

    fn create_job(&self, job: &Job) -> Result<JobId, ClientError> {
        (**self).create_job(job)
    }

    fn update_job(&self, job: &Job) -> Result<JobId, ClientError> {
        (**self).update_job(job)
    }

    fn delete_job(&self, id: &JobId) -> Result<(), ClientError> {
        (**self).delete_job(id)
    }
}
