use crate::model::{EntityKind, Id};
use log::debug;
use rand::{distributions::Alphanumeric, Rng};
use std::collections::HashSet;

/// Shortest random id handed out.
pub const MIN_ID_LENGTH: usize = 4;

/// Collisions tolerated at one length before ids grow by a character.
const MAX_ATTEMPTS: usize = 32;

/// Source of fresh identifiers for new columns and tasks.
pub trait IdGenerator {
    fn next_id(&mut self, kind: EntityKind) -> Id;
}

/// Short alphanumeric ids that are never repeated within the process.
pub struct RandomIds {
    length: usize,
    issued: HashSet<Id>,
}

impl RandomIds {
    /// Lengths below [`MIN_ID_LENGTH`] are raised to it.
    pub fn new(length: usize) -> Self {
        RandomIds {
            length: length.max(MIN_ID_LENGTH),
            issued: HashSet::new(),
        }
    }

    fn candidate(&self) -> Id {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

impl Default for RandomIds {
    fn default() -> Self {
        RandomIds::new(6)
    }
}

impl IdGenerator for RandomIds {
    fn next_id(&mut self, _kind: EntityKind) -> Id {
        loop {
            for _ in 0..MAX_ATTEMPTS {
                let id = self.candidate();
                if self.issued.insert(id.clone()) {
                    return id;
                }
            }
            self.length += 1;
            debug!("event=id_length_grown length={}", self.length);
        }
    }
}

/// Predictable ids (`col-1`, `task-1`, ...) for scripted runs.
#[derive(Default)]
pub struct SequentialIds {
    columns: u64,
    tasks: u64,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, kind: EntityKind) -> Id {
        match kind {
            EntityKind::Column => {
                self.columns += 1;
                format!("col-{}", self.columns)
            }
            EntityKind::Task => {
                self.tasks += 1;
                format!("task-{}", self.tasks)
            }
        }
    }
}
