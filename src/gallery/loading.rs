use crate::error::{GalleryError, Result};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SourceStatus {
    Pending,
    Loaded,
    Failed,
    Abandoned, // Timed out; may still load late
}

impl SourceStatus {
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !matches!(self, SourceStatus::Pending)
    }
}

/// Load outcome of every configured image source.
#[derive(Debug, Clone)]
pub struct SourceTracker {
    sources: Vec<String>,
    statuses: Vec<SourceStatus>,
}

impl SourceTracker {
    pub fn new(sources: Vec<String>) -> Self {
        let statuses = vec![SourceStatus::Pending; sources.len()];
        Self { sources, statuses }
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    #[must_use]
    pub fn status(&self, index: usize) -> Option<SourceStatus> {
        self.statuses.get(index).copied()
    }

    pub fn pending(&self) -> impl Iterator<Item = (usize, &str)> {
        self.sources
            .iter()
            .zip(&self.statuses)
            .enumerate()
            .filter(|(_, (_, status))| **status == SourceStatus::Pending)
            .map(|(index, (source, _))| (index, source.as_str()))
    }

    /// Pending and abandoned sources may load; a second outcome for a
    /// loaded or failed source is rejected.
    pub fn mark_loaded(&mut self, index: usize) -> Result<()> {
        self.transition(index, SourceStatus::Loaded)
    }

    pub fn mark_failed(&mut self, index: usize) -> Result<()> {
        self.transition(index, SourceStatus::Failed)
    }

    /// Abandon every pending source, returning their indices.
    pub fn abandon_pending(&mut self) -> Vec<usize> {
        let mut abandoned = Vec::new();
        for (index, status) in self.statuses.iter_mut().enumerate() {
            if *status == SourceStatus::Pending {
                *status = SourceStatus::Abandoned;
                abandoned.push(index);
            }
        }
        abandoned
    }

    #[must_use]
    pub fn all_settled(&self) -> bool {
        self.statuses.iter().all(SourceStatus::is_settled)
    }

    fn transition(&mut self, index: usize, to: SourceStatus) -> Result<()> {
        let status = self
            .statuses
            .get_mut(index)
            .ok_or(GalleryError::UnknownSource(index))?;

        match *status {
            SourceStatus::Pending | SourceStatus::Abandoned => {
                *status = to;
                Ok(())
            }
            settled => Err(GalleryError::SourceAlreadySettled { index, status: settled }),
        }
    }
}
