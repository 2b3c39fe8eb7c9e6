//! In-memory job client.
//!
//! Provides a thread-safe stand-in for the remote system in tests and local
//! rendering.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{ClientError, JobClient};
use crate::core::job::Job;
use crate::core::types::JobId;

/// In-memory job client.
///
/// Assigns random identities on create. Can be configured to drop the project
/// name from retrieved jobs, as some server versions do.
pub struct InMemoryJobClient {
    jobs: RwLock<HashMap<JobId, Job>>,
    omit_project_name: bool,
}

impl InMemoryJobClient {
    /// Create a new empty client.
    pub fn new() -> Self {
        Self {
            jobs: RwLock::new(HashMap::new()),
            omit_project_name: false,
        }
    }

    /// Return jobs without their project name.
    pub fn omitting_project_name(mut self) -> Self {
        self.omit_project_name = true;
        self
    }

    /// Store a job as-is, bypassing import. Uses the job's own identity or
    /// generates one.
    pub fn insert(&self, mut job: Job) -> Result<JobId, ClientError> {
        let id = job.id.clone().unwrap_or_else(JobId::generate);
        job.id = Some(id.clone());
        let mut jobs = self.jobs.write().map_err(|_| ClientError::LockPoisoned)?;
        jobs.insert(id.clone(), job);
        Ok(id)
    }

    /// Number of stored jobs.
    pub fn len(&self) -> Result<usize, ClientError> {
        let jobs = self.jobs.read().map_err(|_| ClientError::LockPoisoned)?;
        Ok(jobs.len())
    }

    /// Whether no jobs are stored.
    pub fn is_empty(&self) -> Result<bool, ClientError> {
        Ok(self.len()? == 0)
    }
}

impl Default for InMemoryJobClient {
    fn default() -> Self {
        Self::new()
    }
}

impl JobClient for InMemoryJobClient {
    fn get_job(&self, id: &JobId) -> Result<Job, ClientError> {
        let jobs = self.jobs.read().map_err(|_| ClientError::LockPoisoned)?;
        let mut job = jobs
            .get(id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(id.clone()))?;
        if self.omit_project_name {
            job.project_name.clear();
        }
        Ok(job)
    }

    fn create_job(&self, job: &Job) -> Result<JobId, ClientError> {
        if let Some(id) = &job.id {
            return Err(ClientError::Transport(format!(
                "job {} already has an identity, use update",
                id
            )));
        }

        let id = JobId::generate();
        let mut stored = job.clone();
        stored.id = Some(id.clone());

        let mut jobs = self.jobs.write().map_err(|_| ClientError::LockPoisoned)?;
        jobs.insert(id.clone(), stored);
        Ok(id)
    }

    fn update_job(&self, job: &Job) -> Result<JobId, ClientError> {
        let id = job
            .id
            .clone()
            .ok_or_else(|| ClientError::Transport("cannot update a job without identity".into()))?;

        let mut jobs = self.jobs.write().map_err(|_| ClientError::LockPoisoned)?;
        let stored = jobs
            .get_mut(&id)
            .ok_or_else(|| ClientError::NotFound(id.clone()))?;

        // The stored project is kept when the update omits it.
        let project_name = std::mem::take(&mut stored.project_name);
        *stored = job.clone();
        if stored.project_name.is_empty() {
            stored.project_name = project_name;
        }
        Ok(id)
    }

    fn delete_job(&self, id: &JobId) -> Result<(), ClientError> {
        let mut jobs = self.jobs.write().map_err(|_| ClientError::LockPoisoned)?;
        jobs.remove(id)
            .ok_or_else(|| ClientError::NotFound(id.clone()))?;
        Ok(())
    }
}
