#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GalleryState {
    Loading,    // Waiting for image sources to settle
    Running,    // Rotation timer active
    Paused,     // Filled at least once, rotation timer stopped
    LoadFailed, // Every source settled and none loaded
}

impl GalleryState {
    /// Whether the layout has been filled and input is being handled.
    #[must_use]
    pub fn has_started(&self) -> bool {
        matches!(self, GalleryState::Running | GalleryState::Paused)
    }
}
