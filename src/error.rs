//! Error types raised by the maze core.
//!
//! The core only fails at construction time. Everything above it, such as terminal handling and
//! score file I/O, reports through [`color_eyre`] instead.

use thiserror::Error;

/// Failures reported while building a maze.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MazeError {
    /// The requested maze dimensions cannot produce a grid.
    ///
    /// This variant is returned when the side length of the square grid is zero.
    #[error("invalid maze configuration: size must be positive, got {size}")]
    InvalidConfiguration {
        /// Side length that was requested.
        size: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_message() {
        let err = MazeError::InvalidConfiguration { size: 0 };

        assert_eq!(
            err.to_string(),
            "invalid maze configuration: size must be positive, got 0"
        );
    }
}
