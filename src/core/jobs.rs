// ─── Job Identifiers ───
// Stable integer ids handed to the OS job scheduler, one per job type.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::core::error::{ShellError, ShellResult};

/// Keeps our ids out of the range other schedulers' producers use.
pub const ID_BASE: i32 = 1070;
pub const JOB_TYPE_SHIFT: u32 = 12;

/// Background jobs the shell schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobType {
    OsmUpload,
}

/// Job type → identifier table, built once at startup and read-only after.
#[derive(Debug, Clone)]
pub struct JobIdRegistry<K> {
    ids: HashMap<K, i32>,
}

impl JobIdRegistry<JobType> {
    pub fn standard() -> ShellResult<Self> {
        // Order matters: ids are derived from position.
        Self::from_types([JobType::OsmUpload])
    }
}

impl<K: Eq + Hash + Debug> JobIdRegistry<K> {
    /// Register `types` in order. The n-th type (0-based) gets
    /// `((n + 1) << JOB_TYPE_SHIFT) + ID_BASE`.
    pub fn from_types(types: impl IntoIterator<Item = K>) -> ShellResult<Self> {
        let mut ids = HashMap::new();
        for (index, job_type) in types.into_iter().enumerate() {
            if ids.contains_key(&job_type) {
                return Err(ShellError::JobAlreadyRegistered(format!("{job_type:?}")));
            }
            ids.insert(job_type, calc_identifier(index)?);
        }
        Ok(Self { ids })
    }

    /// Fails for a type that was never registered; there is no fallback id.
    pub fn id(&self, job_type: &K) -> ShellResult<i32> {
        self.ids
            .get(job_type)
            .copied()
            .ok_or_else(|| ShellError::JobNotRegistered(format!("{job_type:?}")))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

fn calc_identifier(index: usize) -> ShellResult<i32> {
    i32::try_from(index + 1)
        .ok()
        .and_then(|slot| slot.checked_mul(1 << JOB_TYPE_SHIFT))
        .and_then(|shifted| shifted.checked_add(ID_BASE))
        .ok_or(ShellError::JobIdOverflow(index))
}
