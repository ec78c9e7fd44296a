//! Configuration for buffer growth.
//!
//! - [`BufferConfig`] - Growth unit used when a buffer runs out of capacity
//!
//! # Example
//!
//! ```
//! use growbuf::BufferConfig;
//!
//! // Custom growth unit
//! let config = BufferConfig::new(256)?;
//!
//! // Presets
//! let inline = BufferConfig::small();
//! let document = BufferConfig::large();
//! assert!(inline.growth_unit() < document.growth_unit());
//!
//! # Ok::<(), growbuf::BufferError>(())
//! ```

use std::num::NonZeroUsize;

use crate::error::BufferError;

/// Default growth unit (64 bytes).
pub const DEFAULT_GROWTH_UNIT: usize = 64;

/// Growth unit of [`BufferConfig::small`].
pub const SMALL_GROWTH_UNIT: usize = 16;

/// Growth unit of [`BufferConfig::large`].
pub const LARGE_GROWTH_UNIT: usize = 1024;

/// Configuration for buffer growth behavior.
///
/// A buffer never grows by less than its growth unit: when an append needs
/// more room, capacity is raised to the smallest `capacity + k * unit` that
/// fits. Small units waste less memory, large units reallocate less often.
///
/// The growth unit must be non-zero. The `with_*` builders do not check this;
/// use [`BufferConfig::validate`] or let [`Buffer::new`](crate::Buffer::new)
/// reject it.
///
/// # Example
///
/// ```
/// use growbuf::BufferConfig;
///
/// let config = BufferConfig::default().with_growth_unit(4096);
/// assert_eq!(config.growth_unit(), 4096);
/// assert!(config.validate().is_ok());
///
/// assert!(BufferConfig::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferConfig {
    /// Minimum capacity increment in bytes.
    growth_unit: usize,
}

impl BufferConfig {
    /// Creates a new configuration with the given growth unit.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidConfig`] if `growth_unit` is zero.
    pub fn new(growth_unit: usize) -> Result<Self, BufferError> {
        if growth_unit == 0 {
            return Err(BufferError::InvalidConfig {
                message: "growth unit must be non-zero",
            });
        }

        Ok(Self { growth_unit })
    }

    /// Preset for short inline spans (16-byte unit).
    pub const fn small() -> Self {
        Self {
            growth_unit: SMALL_GROWTH_UNIT,
        }
    }

    /// Preset for whole rendered documents (1 KiB unit).
    pub const fn large() -> Self {
        Self {
            growth_unit: LARGE_GROWTH_UNIT,
        }
    }

    /// Sets the growth unit.
    ///
    /// Note: This does not validate the configuration.
    pub fn with_growth_unit(mut self, unit: usize) -> Self {
        self.growth_unit = unit;
        self
    }

    /// Returns the growth unit.
    pub fn growth_unit(&self) -> usize {
        self.growth_unit
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), BufferError> {
        Self::new(self.growth_unit).map(|_| ())
    }

    pub(crate) fn checked_unit(&self) -> Result<NonZeroUsize, BufferError> {
        NonZeroUsize::new(self.growth_unit).ok_or(BufferError::InvalidConfig {
            message: "growth unit must be non-zero",
        })
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            growth_unit: DEFAULT_GROWTH_UNIT,
        }
    }
}
