use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{EvalError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimedPoint {
    pub timestamp: NaiveDateTime,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

/// Events stored as parallel timestamp / x / y buffers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimedPoints {
    timestamps: Vec<NaiveDateTime>,
    xcoords: Vec<f64>,
    ycoords: Vec<f64>,
}

impl TimedPoints {
    pub fn from_coords(
        timestamps: Vec<NaiveDateTime>,
        xcoords: Vec<f64>,
        ycoords: Vec<f64>,
    ) -> Result<Self> {
        if timestamps.len() != xcoords.len() || xcoords.len() != ycoords.len() {
            return Err(EvalError::InvalidArgument(format!(
                "coordinate buffers differ in length: t={}, x={}, y={}",
                timestamps.len(),
                xcoords.len(),
                ycoords.len()
            )));
        }
        for (idx, (x, y)) in xcoords.iter().zip(&ycoords).enumerate() {
            if !(x.is_finite() && y.is_finite()) {
                return Err(EvalError::InvalidArgument(format!(
                    "event {idx} has a non-finite coordinate ({x}, {y})"
                )));
            }
        }
        Ok(Self {
            timestamps,
            xcoords,
            ycoords,
        })
    }

    pub fn from_points(points: impl IntoIterator<Item = TimedPoint>) -> Result<Self> {
        let mut timestamps = Vec::new();
        let mut xcoords = Vec::new();
        let mut ycoords = Vec::new();
        for p in points {
            timestamps.push(p.timestamp);
            xcoords.push(p.x);
            ycoords.push(p.y);
        }
        Self::from_coords(timestamps, xcoords, ycoords)
    }

    pub fn len(&self) -> usize {
        self.xcoords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xcoords.is_empty()
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn xcoords(&self) -> &[f64] {
        &self.xcoords
    }

    pub fn ycoords(&self) -> &[f64] {
        &self.ycoords
    }

    pub fn coords(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xcoords.iter().copied().zip(self.ycoords.iter().copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = TimedPoint> + '_ {
        self.timestamps
            .iter()
            .zip(self.coords())
            .map(|(&timestamp, (x, y))| TimedPoint { timestamp, x, y })
    }

    /// Earliest and latest timestamp.
    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let min = self.timestamps.iter().min()?;
        let max = self.timestamps.iter().max()?;
        Some((*min, *max))
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        if self.is_empty() {
            return None;
        }
        let mut bbox = BoundingBox {
            xmin: f64::INFINITY,
            ymin: f64::INFINITY,
            xmax: f64::NEG_INFINITY,
            ymax: f64::NEG_INFINITY,
        };
        for (x, y) in self.coords() {
            bbox.xmin = bbox.xmin.min(x);
            bbox.ymin = bbox.ymin.min(y);
            bbox.xmax = bbox.xmax.max(x);
            bbox.ymax = bbox.ymax.max(y);
        }
        Some(bbox)
    }

    /// Events with `start <= timestamp < end`; an open bound keeps that side.
    pub fn between(&self, start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        let keep = |t: &NaiveDateTime| {
            start.is_none_or(|s| *t >= s) && end.is_none_or(|e| *t < e)
        };
        let mut out = Self::default();
        for p in self.iter().filter(|p| keep(&p.timestamp)) {
            out.timestamps.push(p.timestamp);
            out.xcoords.push(p.x);
            out.ycoords.push(p.y);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/points.rs"]
mod tests;
