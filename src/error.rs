use thiserror::Error;

/// Configuration problems detected before any generation work starts.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum DelveError {
    #[error("grid {width}x{height} is too small, both sides must be at least 3")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("{axis} room bound {max} plus a 2-cell margin exceeds grid size {grid}")]
    RoomBoundsExceedGrid {
        axis: &'static str,
        max: u32,
        grid: u32,
    },

    #[error("{axis} room bounds {min}..={max} are invalid")]
    InvalidRoomBounds {
        axis: &'static str,
        min: u32,
        max: u32,
    },

    #[error("corridor width {width} must be between 1 and {max}")]
    InvalidCorridorWidth { width: u32, max: u32 },

    #[error("{field} probability {value} is outside [0, 1]")]
    ProbabilityOutOfRange { field: &'static str, value: f32 },
}
