//! In-memory ordered collection of projects.
//!
//! The only mutation is wholesale replacement. Each replacement bumps the
//! revision and yields a `StoreEvent` that callers forward to the alert
//! scheduler.

use crate::models::project::Project;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// The project set was replaced; `revision` is the new one.
    Replaced { revision: u64, count: usize },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectStore {
    projects: Vec<Project>,
    revision: u64,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store loaded from persistent storage, keeping its revision.
    pub fn from_parts(projects: Vec<Project>, revision: u64) -> Self {
        Self { projects, revision }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn replace(&mut self, projects: Vec<Project>) -> StoreEvent {
        self.projects = projects;
        self.revision += 1;
        StoreEvent::Replaced {
            revision: self.revision,
            count: self.projects.len(),
        }
    }

    /// Replace the set with `current ++ batch` (import default).
    pub fn append(&mut self, batch: Vec<Project>) -> StoreEvent {
        let mut next = self.projects.clone();
        next.extend(batch);
        self.replace(next)
    }
}
