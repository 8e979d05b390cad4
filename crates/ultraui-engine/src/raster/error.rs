use std::fmt;

/// Error returned when a framebuffer cannot take the requested extent.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RasterError {
    /// Width or height is zero.
    EmptyExtent { width: u32, height: u32 },
    /// `width * height` does not fit in memory addressing.
    ExtentOverflow { width: u32, height: u32 },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::EmptyExtent { width, height } => {
                write!(f, "framebuffer extent {width}x{height} is empty")
            }
            RasterError::ExtentOverflow { width, height } => {
                write!(f, "framebuffer extent {width}x{height} is too large")
            }
        }
    }
}

impl std::error::Error for RasterError {}
