//! Image rectangle used by overlay backgrounds.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned rectangle `(x, y, w, h)`.
///
/// Written as four comma-separated numbers, e.g. `"0,0,1,1"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub w: f64,
    /// Height
    pub h: f64,
}

impl Rect {
    /// The whole canvas in normalized units.
    pub const UNIT: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Creates a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Scales both position and size by `(sx, sy)`.
    #[must_use]
    pub fn scale(&self, sx: f64, sy: f64) -> Self {
        Self::new(self.x * sx, self.y * sy, self.w * sx, self.h * sy)
    }

    /// Parses `"x,y,w,h"`.
    ///
    /// # Errors
    ///
    /// Fails unless there are exactly four fields and each is a number.
    pub fn parse(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.trim().split(',').map(str::trim).collect();

        if fields.len() != 4 {
            anyhow::bail!(
                "Rectangle must have 4 comma-separated values, got {}: \"{s}\"",
                fields.len()
            );
        }

        let mut values = [0.0; 4];
        for (value, field) in values.iter_mut().zip(&fields) {
            *value = field
                .parse::<f64>()
                .with_context(|| format!("Invalid rectangle component '{field}' in \"{s}\""))?;
        }

        let [x, y, w, h] = values;
        Ok(Self::new(x, y, w, h))
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::UNIT
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.w, self.h)
    }
}
