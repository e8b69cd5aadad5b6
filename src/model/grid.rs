use serde::{Deserialize, Serialize};

use crate::array::MaskedArray;
use crate::error::{EvalError, Result};
use crate::model::points::TimedPoints;
use crate::model::top_slice::top_slice;

/// Cell size and origin of a regular grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub xsize: f64,
    pub ysize: f64,
    pub xoffset: f64,
    pub yoffset: f64,
}

impl GridGeometry {
    pub fn new(xsize: f64, ysize: f64, xoffset: f64, yoffset: f64) -> Result<Self> {
        if !(xsize.is_finite() && xsize > 0.0 && ysize.is_finite() && ysize > 0.0) {
            return Err(EvalError::InvalidArgument(format!(
                "cell size must be finite and positive, got ({xsize}, {ysize})"
            )));
        }
        if !(xoffset.is_finite() && yoffset.is_finite()) {
            return Err(EvalError::InvalidArgument(format!(
                "grid offset must be finite, got ({xoffset}, {yoffset})"
            )));
        }
        Ok(Self {
            xsize,
            ysize,
            xoffset,
            yoffset,
        })
    }

    /// Unbounded cell coordinate `(gx, gy)` containing the point.
    pub fn grid_coord(&self, x: f64, y: f64) -> (i64, i64) {
        let gx = ((x - self.xoffset) / self.xsize).floor();
        let gy = ((y - self.yoffset) / self.ysize).floor();
        (gx as i64, gy as i64)
    }
}

/// Risk intensity per grid cell. Rows run along `y`, columns along `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPrediction {
    geometry: GridGeometry,
    intensity: MaskedArray,
}

impl GridPrediction {
    pub fn new(geometry: GridGeometry, intensity: MaskedArray) -> Result<Self> {
        if intensity.shape().len() != 2 {
            return Err(EvalError::InvalidArgument(format!(
                "intensity must be two dimensional, got shape {:?}",
                intensity.shape()
            )));
        }
        if let Some((idx, v)) = intensity.iter_valid().find(|(_, v)| *v < 0.0) {
            return Err(EvalError::InvalidArgument(format!(
                "negative risk {v} at cell {idx}"
            )));
        }
        Ok(Self {
            geometry,
            intensity,
        })
    }

    pub fn from_rows(
        xsize: f64,
        ysize: f64,
        rows: &[Vec<f64>],
        xoffset: f64,
        yoffset: f64,
    ) -> Result<Self> {
        let geometry = GridGeometry::new(xsize, ysize, xoffset, yoffset)?;
        Self::new(geometry, MaskedArray::from_rows(rows)?)
    }

    /// Per-cell event counts over the geometry, extent and mask of `like`.
    /// Cells that are NaN in `like` stay invalid.
    pub fn from_counts(like: &GridPrediction, points: &TimedPoints) -> Result<Self> {
        let mut counts = vec![0.0f64; like.intensity.len()];
        for (x, y) in points.coords() {
            if let Some(cell) = like.cell_index(x, y) {
                counts[cell] += 1.0;
            }
        }
        let mask = (0..like.intensity.len())
            .map(|i| !like.intensity.is_valid(i))
            .collect();
        let intensity =
            MaskedArray::new(like.intensity.shape().to_vec(), counts)?.with_mask(mask)?;
        Self::new(like.geometry, intensity)
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn intensity(&self) -> &MaskedArray {
        &self.intensity
    }

    /// Number of columns.
    pub fn xextent(&self) -> usize {
        self.intensity.shape()[1]
    }

    /// Number of rows.
    pub fn yextent(&self) -> usize {
        self.intensity.shape()[0]
    }

    /// Flat cell index for a point, `None` when it falls outside the grid.
    pub fn cell_index(&self, x: f64, y: f64) -> Option<usize> {
        let (gx, gy) = self.geometry.grid_coord(x, y);
        if gx < 0 || gy < 0 {
            return None;
        }
        let (gx, gy) = (gx as usize, gy as usize);
        if gx >= self.xextent() || gy >= self.yextent() {
            return None;
        }
        Some(gy * self.xextent() + gx)
    }

    pub fn grid_risk(&self, gx: usize, gy: usize) -> Option<f64> {
        if gx >= self.xextent() || gy >= self.yextent() {
            return None;
        }
        self.intensity.get(gy * self.xextent() + gx)
    }

    /// Risk at a point; `None` outside the grid or in a masked cell.
    pub fn risk(&self, x: f64, y: f64) -> Option<f64> {
        self.cell_index(x, y).and_then(|cell| self.intensity.get(cell))
    }

    /// Copy of this prediction with every cell outside the top slice masked.
    pub fn top_slice(&self, fraction: f64) -> Result<Self> {
        let selected = top_slice(&self.intensity, fraction)?;
        let mask = selected.into_vec().into_iter().map(|s| !s).collect();
        let intensity = self.intensity.clone().with_mask(mask)?;
        Ok(Self {
            geometry: self.geometry,
            intensity,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/grid.rs"]
mod tests;
