use thiserror::Error;

use crate::core::fractals::mandelbrot::escape::ESCAPE_LIMIT;
use crate::core::fractals::mandelbrot::passes::{PassSchedule, PassScheduleError};
use crate::core::fractals::mandelbrot::spectral_palette::DEFAULT_PALETTE_SIZE;

const DEFAULT_THREAD_NAME: &str = "mandelbrot-render";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("escape limit must be positive and finite: {0}")]
    InvalidEscapeLimit(f64),
    #[error("palette size must be greater than zero")]
    EmptyPalette,
    #[error(transparent)]
    Passes(#[from] PassScheduleError),
}

/// Tunables of the progressive renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    pub passes: PassSchedule,
    /// Squared escape radius.
    pub escape_limit: f64,
    pub palette_size: usize,
    pub thread_name: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            passes: PassSchedule::default(),
            escape_limit: ESCAPE_LIMIT,
            palette_size: DEFAULT_PALETTE_SIZE,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
        }
    }
}

impl RendererConfig {
    pub fn with_pass_count(mut self, pass_count: usize) -> Result<Self, ConfigError> {
        self.passes = self.passes.with_pass_count(pass_count)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_all_black_skip(mut self, target: Option<usize>) -> Self {
        self.passes = self.passes.with_all_black_skip(target);
        self
    }

    #[must_use]
    pub fn with_escape_limit(mut self, escape_limit: f64) -> Self {
        self.escape_limit = escape_limit;
        self
    }

    #[must_use]
    pub fn with_palette_size(mut self, palette_size: usize) -> Self {
        self.palette_size = palette_size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.escape_limit.is_finite() && self.escape_limit > 0.0) {
            return Err(ConfigError::InvalidEscapeLimit(self.escape_limit));
        }

        if self.palette_size == 0 {
            return Err(ConfigError::EmptyPalette);
        }

        Ok(())
    }
}
