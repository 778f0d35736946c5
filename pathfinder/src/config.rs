//! Command-line arguments and the validated [`Config`] built from them.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use pathgrid_core::Point;
use thiserror::Error;

use crate::view::STATUS_LINES;

/// Smallest accepted grid size.
pub const MIN_SIZE: i32 = 2;
/// Largest accepted grid size; bounds the cost of a single run.
pub const MAX_SIZE: i32 = 100;
/// Widest accepted cell, in terminal columns.
pub const MAX_SPAN: i32 = 8;

/// Interactive A* path finder on a square grid.
#[derive(Parser, Debug, Clone)]
#[command(name = "pathfinder")]
#[command(about = "Interactive A* path finder on a square grid")]
pub struct Args {
    /// Number of rows and columns
    #[arg(short, long, default_value_t = 20)]
    pub size: i32,

    /// Terminal columns per cell
    #[arg(long, default_value_t = 2)]
    pub span: i32,

    /// Pause after each search step, in milliseconds
    #[arg(long = "delay-ms", default_value_t = 15)]
    pub delay_ms: u64,

    /// Chance that `r` turns an empty cell into a barrier
    #[arg(long, default_value_t = 0.3)]
    pub density: f64,

    /// Seed for random barriers (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file; filter with RUST_LOG
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid size {0} is outside {min}..={max}", min = MIN_SIZE, max = MAX_SIZE)]
    Size(i32),
    #[error("cell span {0} is outside 1..={max}", max = MAX_SPAN)]
    Span(i32),
    #[error("barrier density must be in [0, 1), got {0}")]
    Density(f64),
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub size: i32,
    /// Screen columns and rows per cell.
    pub span: Point,
    pub step_delay: Duration,
    pub density: f64,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: 20,
            span: Point::new(2, 1),
            step_delay: Duration::from_millis(15),
            density: 0.3,
            seed: None,
            log_file: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(ConfigError::Size(self.size));
        }
        for span in [self.span.x, self.span.y] {
            if !(1..=MAX_SPAN).contains(&span) {
                return Err(ConfigError::Span(span));
            }
        }
        if !(0.0..1.0).contains(&self.density) {
            return Err(ConfigError::Density(self.density));
        }
        Ok(())
    }

    /// Screen area needed for the grid plus the status lines.
    pub fn screen_size(&self) -> Point {
        Point::new(
            self.size * self.span.x,
            self.size * self.span.y + STATUS_LINES,
        )
    }
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let config = Config {
            size: args.size,
            span: Point::new(args.span, 1),
            step_delay: Duration::from_millis(args.delay_ms),
            density: args.density,
            seed: args.seed,
            log_file: args.log_file,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Config, ConfigError> {
        let args = Args::try_parse_from(std::iter::once("pathfinder").chain(argv.iter().copied()))
            .unwrap();
        Config::try_from(args)
    }

    #[test]
    fn defaults_are_valid() {
        let c = parse(&[]).unwrap();
        assert_eq!(c.size, 20);
        assert_eq!(c.span, Point::new(2, 1));
        assert_eq!(c.step_delay, Duration::from_millis(15));
        assert_eq!(c.seed, None);
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn flags_override_defaults() {
        let c = parse(&[
            "--size", "8", "--span", "3", "--delay-ms", "0", "--seed", "42", "--density", "0.5",
        ])
        .unwrap();
        assert_eq!(c.size, 8);
        assert_eq!(c.span, Point::new(3, 1));
        assert!(c.step_delay.is_zero());
        assert_eq!(c.seed, Some(42));
        assert_eq!(c.screen_size(), Point::new(24, 8 + STATUS_LINES));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert_eq!(parse(&["--size", "1"]).unwrap_err(), ConfigError::Size(1));
        assert_eq!(parse(&["--size", "101"]).unwrap_err(), ConfigError::Size(101));
        assert_eq!(parse(&["--span", "0"]).unwrap_err(), ConfigError::Span(0));
        assert_eq!(parse(&["--span", "9"]).unwrap_err(), ConfigError::Span(9));
        assert_eq!(
            parse(&["--density", "1.0"]).unwrap_err(),
            ConfigError::Density(1.0)
        );
    }

    #[test]
    fn huge_span_is_rejected_before_any_geometry() {
        let err = parse(&["--size", "100", "--span", "2147483647"]).unwrap_err();
        assert_eq!(err, ConfigError::Span(i32::MAX));

        let widest = parse(&["--size", &MAX_SIZE.to_string(), "--span", &MAX_SPAN.to_string()])
            .unwrap();
        assert_eq!(
            widest.screen_size(),
            Point::new(MAX_SIZE * MAX_SPAN, MAX_SIZE + STATUS_LINES)
        );
    }
}
