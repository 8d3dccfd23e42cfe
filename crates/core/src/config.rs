//! Engine configuration and construction errors
//!
//! Every recognized option has a default in [`crate::types`]; the binary
//! overlays environment variables on top:
//!
//! - `BLOCKDROP_GRID_WIDTH`: grid width including both wall columns (default: 12)
//! - `BLOCKDROP_GRID_HEIGHT`: grid height (default: 22)
//! - `BLOCKDROP_DROP_MS`: normal gravity interval (default: 600)
//! - `BLOCKDROP_FAST_DROP_MS`: gravity interval while soft drop is held (default: 30)
//! - `BLOCKDROP_ROTATE_COOLDOWN_MS`: minimum time between rotations (default: 120)
//!
//! An engine is never constructed from an invalid configuration.

use thiserror::Error;

use crate::types::{
    DEFAULT_DROP_MS, DEFAULT_FAST_DROP_MS, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH,
    DEFAULT_ROTATE_COOLDOWN_MS, MAX_GRID_DIM, MIN_GRID_HEIGHT, MIN_GRID_WIDTH,
};

pub const ENV_GRID_WIDTH: &str = "BLOCKDROP_GRID_WIDTH";
pub const ENV_GRID_HEIGHT: &str = "BLOCKDROP_GRID_HEIGHT";
pub const ENV_DROP_MS: &str = "BLOCKDROP_DROP_MS";
pub const ENV_FAST_DROP_MS: &str = "BLOCKDROP_FAST_DROP_MS";
pub const ENV_ROTATE_COOLDOWN_MS: &str = "BLOCKDROP_ROTATE_COOLDOWN_MS";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid {width}x{height} is too small (minimum {min_width}x{min_height})")]
    GridTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
    #[error("grid {width}x{height} is too large (maximum {max} per side)")]
    GridTooLarge { width: u16, height: u16, max: u16 },
    #[error("{name} drop interval must be greater than zero")]
    ZeroDropInterval { name: &'static str },
    #[error("grid is {actual:?}, configuration expects {expected:?}")]
    GridMismatch {
        expected: (u16, u16),
        actual: (u16, u16),
    },
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Checks grid dimensions against the supported range.
pub fn validate_dims(width: u16, height: u16) -> Result<(), ConfigError> {
    if width < MIN_GRID_WIDTH || height < MIN_GRID_HEIGHT {
        return Err(ConfigError::GridTooSmall {
            width,
            height,
            min_width: MIN_GRID_WIDTH,
            min_height: MIN_GRID_HEIGHT,
        });
    }
    if width > MAX_GRID_DIM || height > MAX_GRID_DIM {
        return Err(ConfigError::GridTooLarge {
            width,
            height,
            max: MAX_GRID_DIM,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub grid_width: u16,
    pub grid_height: u16,
    pub drop_ms: u32,
    pub fast_drop_ms: u32,
    pub rotate_cooldown_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            drop_ms: DEFAULT_DROP_MS,
            fast_drop_ms: DEFAULT_FAST_DROP_MS,
            rotate_cooldown_ms: DEFAULT_ROTATE_COOLDOWN_MS,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_dims(self.grid_width, self.grid_height)?;
        if self.drop_ms == 0 {
            return Err(ConfigError::ZeroDropInterval { name: "normal" });
        }
        if self.fast_drop_ms == 0 {
            return Err(ConfigError::ZeroDropInterval { name: "accelerated" });
        }
        Ok(())
    }

    /// Create from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`EngineConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            grid_width: read_var(&lookup, ENV_GRID_WIDTH, defaults.grid_width)?,
            grid_height: read_var(&lookup, ENV_GRID_HEIGHT, defaults.grid_height)?,
            drop_ms: read_var(&lookup, ENV_DROP_MS, defaults.drop_ms)?,
            fast_drop_ms: read_var(&lookup, ENV_FAST_DROP_MS, defaults.fast_drop_ms)?,
            rotate_cooldown_ms: read_var(
                &lookup,
                ENV_ROTATE_COOLDOWN_MS,
                defaults.rotate_cooldown_ms,
            )?,
        };
        config.validate()?;
        Ok(config)
    }
}

fn read_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed.parse().map_err(|_| ConfigError::InvalidEnv {
        var,
        value: trimmed.to_string(),
    })
}
