//! Construction parameters for the Catcher environment.
//!
//! A `CatcherConfig` is plain data: build it with `Default` and the `with_*`
//! setters, or parse it from string kwargs the way `registry::make` receives
//! them. Nothing is checked until `validate()`, which `Catcher::new` calls.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::core::{EnvError, Result};

/// Key-value kwargs for `registry::make`. Stringly-typed values.
pub type KwArgs = HashMap<String, String>;

/// Smallest grid for which both reset ranges are non-empty.
pub const MIN_GRID_SIZE: usize = 4;

pub const DEFAULT_GRID_SIZE: usize = 10;

/// Which encoding `observe()` produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutputType {
    /// Rendered grid, one cell per pixel.
    #[default]
    Pixels,
    /// Raw `[fruit_row, fruit_col, basket_col]` triple.
    Position,
}

impl OutputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::Pixels => "pixels",
            OutputType::Position => "position",
        }
    }

    /// Shape used when the caller does not override it.
    pub fn default_shape(&self, grid_size: usize) -> Vec<usize> {
        match self {
            OutputType::Pixels => vec![grid_size * grid_size],
            OutputType::Position => vec![3],
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputType {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pixels" => Ok(OutputType::Pixels),
            "position" => Ok(OutputType::Position),
            other => Err(EnvError::InvalidConfiguration(format!(
                "unknown output_type {other:?}, expected \"pixels\" or \"position\""
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CatcherConfig {
    pub grid_size: usize,
    pub output_type: OutputType,
    /// Overrides the encoding's default shape. Must hold the same number of elements.
    pub output_shape: Option<Vec<usize>>,
    /// Seed for the environment RNG; `None` uses a fixed default seed.
    pub seed: Option<u64>,
}

impl Default for CatcherConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            output_type: OutputType::Pixels,
            output_shape: None,
            seed: None,
        }
    }
}

impl CatcherConfig {
    pub fn new(grid_size: usize, output_type: OutputType) -> Self {
        Self { grid_size, output_type, ..Self::default() }
    }

    pub fn with_grid_size(mut self, grid_size: usize) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = output_type;
        self
    }

    pub fn with_output_shape<S: Into<Vec<usize>>>(mut self, shape: S) -> Self {
        self.output_shape = Some(shape.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Explicit shape if given, otherwise the encoding's default.
    pub fn resolved_output_shape(&self) -> Vec<usize> {
        self.output_shape
            .clone()
            .unwrap_or_else(|| self.output_type.default_shape(self.grid_size))
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(invalid(format!(
                "grid_size must be at least {MIN_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }
        let cells = self
            .grid_size
            .checked_mul(self.grid_size)
            .filter(|&c| u32::try_from(c).is_ok())
            .ok_or_else(|| invalid(format!("grid_size {} is too large", self.grid_size)))?;

        if let Some(shape) = &self.output_shape {
            if shape.is_empty() || shape.contains(&0) {
                return Err(invalid(format!("output_shape {shape:?} must have non-zero dimensions")));
            }
            let expected = match self.output_type {
                OutputType::Pixels => cells,
                OutputType::Position => 3,
            };
            let len = shape.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d));
            if len != Some(expected) {
                return Err(invalid(format!(
                    "output_shape {shape:?} does not hold {expected} elements for {} output",
                    self.output_type
                )));
            }
        }
        Ok(())
    }

    /// Parse from string kwargs. Recognised keys: `grid_size`, `output_type`,
    /// `output_shape` (comma separated, e.g. `"10,10"`), `seed`.
    pub fn from_kwargs(kwargs: &KwArgs) -> Result<Self> {
        let mut config = Self::default();
        for (key, value) in kwargs {
            match key.as_str() {
                "grid_size" => config.grid_size = parse_number(key, value)?,
                "output_type" => config.output_type = value.parse()?,
                "output_shape" => config.output_shape = Some(parse_shape(value)?),
                "seed" => config.seed = Some(parse_number(key, value)?),
                other => return Err(invalid(format!("unknown kwarg {other:?}"))),
            }
        }
        config.validate()?;
        Ok(config)
    }
}

fn invalid(msg: String) -> EnvError {
    tracing::warn!(reason = %msg, "rejected catcher configuration");
    EnvError::InvalidConfiguration(msg)
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid(format!("{key} expects a non-negative integer, got {value:?}")))
}

fn parse_shape(value: &str) -> Result<Vec<usize>> {
    value
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_number("output_shape", s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kwargs(pairs: &[(&str, &str)]) -> KwArgs {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn default_config_is_pixels_on_ten_grid() {
        let c = CatcherConfig::default();
        assert_eq!(c.grid_size, 10);
        assert_eq!(c.output_type, OutputType::Pixels);
        assert_eq!(c.resolved_output_shape(), vec![100]);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn position_shape_is_three() {
        let c = CatcherConfig::new(7, OutputType::Position);
        assert_eq!(c.resolved_output_shape(), vec![3]);
    }

    #[test]
    fn output_type_parses_and_displays() {
        assert_eq!("pixels".parse::<OutputType>().unwrap(), OutputType::Pixels);
        assert_eq!(" Position ".parse::<OutputType>().unwrap(), OutputType::Position);
        assert_eq!(OutputType::Position.to_string(), "position");
        assert!(matches!("rgb".parse::<OutputType>(), Err(EnvError::InvalidConfiguration(_))));
    }

    #[test]
    fn small_grid_is_rejected() {
        let err = CatcherConfig::default().with_grid_size(3).validate().unwrap_err();
        assert!(matches!(err, EnvError::InvalidConfiguration(_)));
        assert!(CatcherConfig::default().with_grid_size(4).validate().is_ok());
    }

    #[test]
    fn explicit_shape_must_match_element_count() {
        let ok = CatcherConfig::new(5, OutputType::Pixels).with_output_shape(vec![5, 5]);
        assert!(ok.validate().is_ok());
        assert_eq!(ok.resolved_output_shape(), vec![5, 5]);

        let bad = CatcherConfig::new(5, OutputType::Pixels).with_output_shape(vec![24]);
        assert!(matches!(bad.validate(), Err(EnvError::InvalidConfiguration(_))));

        let zero = CatcherConfig::new(5, OutputType::Position).with_output_shape(vec![3, 0]);
        assert!(matches!(zero.validate(), Err(EnvError::InvalidConfiguration(_))));

        let pos = CatcherConfig::new(5, OutputType::Position).with_output_shape(vec![1, 3]);
        assert!(pos.validate().is_ok());
    }

    #[test]
    fn from_kwargs_reads_every_key() {
        let c = CatcherConfig::from_kwargs(&kwargs(&[
            ("grid_size", "6"),
            ("output_type", "pixels"),
            ("output_shape", "(6, 6)"),
            ("seed", "42"),
        ]))
        .unwrap();
        assert_eq!(c.grid_size, 6);
        assert_eq!(c.output_shape, Some(vec![6, 6]));
        assert_eq!(c.seed, Some(42));
    }

    #[test]
    fn from_kwargs_rejects_unknown_key_and_bad_values() {
        assert!(matches!(
            CatcherConfig::from_kwargs(&kwargs(&[("gridsize", "6")])),
            Err(EnvError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            CatcherConfig::from_kwargs(&kwargs(&[("grid_size", "-1")])),
            Err(EnvError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            CatcherConfig::from_kwargs(&kwargs(&[("output_type", "rgb")])),
            Err(EnvError::InvalidConfiguration(_))
        ));
    }
}
