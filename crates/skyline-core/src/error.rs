use thiserror::Error;

/// Failures the visualizer core can report.
///
/// None of these are fatal: the render loop logs them and degrades the frame.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum VisualizerError {
    #[error("audio track `{track}` is unavailable: {reason}")]
    AssetUnavailable { track: String, reason: String },
    #[error("invalid range: {what}")]
    InvalidRange { what: String },
    #[error("audio is not ready yet")]
    NotReady,
    #[error("drawing surface is empty ({width}x{height})")]
    EmptySurface { width: f32, height: f32 },
}

impl VisualizerError {
    pub fn invalid_range(what: impl Into<String>) -> Self {
        Self::InvalidRange { what: what.into() }
    }

    pub fn asset_unavailable(track: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AssetUnavailable {
            track: track.into(),
            reason: reason.into(),
        }
    }
}
