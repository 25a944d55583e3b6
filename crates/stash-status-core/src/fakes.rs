//! In-memory status client for tests.
//!
//! `ScriptedStatusClient` replays a fixed sequence of outcomes and records
//! every call so tests can assert on attempt counts and arguments.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::client::StatusClient;
use crate::domain::{BuildStatus, ClientError, CommitId};

type Outcome = Result<Option<BuildStatus>, ClientError>;

/// Status client whose responses are scripted up front.
#[derive(Debug)]
pub struct ScriptedStatusClient {
    script: Mutex<VecDeque<Outcome>>,
    /// Returned once the script runs out.
    fallback: Outcome,
    calls: Mutex<Vec<(CommitId, BuildStatus)>>,
}

impl ScriptedStatusClient {
    pub fn new(script: Vec<Outcome>, fallback: Outcome) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Accepts every call.
    pub fn accepting() -> Self {
        Self::new(Vec::new(), Ok(None))
    }

    /// Fails `failures` times with `error`, then accepts.
    pub fn failing_then_accepting(failures: u32, error: ClientError) -> Self {
        let script = (0..failures).map(|_| Err(error.clone())).collect();
        Self::new(script, Ok(None))
    }

    /// Fails every call with `error`.
    pub fn always_failing(error: ClientError) -> Self {
        Self::new(Vec::new(), Err(error))
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Arguments of every call, oldest first.
    pub fn calls(&self) -> Vec<(CommitId, BuildStatus)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusClient for ScriptedStatusClient {
    async fn set_build_status(
        &self,
        commit: &CommitId,
        status: &BuildStatus,
    ) -> Result<Option<BuildStatus>, ClientError> {
        self.calls
            .lock()
            .unwrap()
            .push((commit.clone(), status.clone()));
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }
}
