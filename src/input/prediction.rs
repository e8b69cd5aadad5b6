use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::array::MaskedArray;
use crate::error::{EvalError, Result};
use crate::input::open_maybe_gz;
use crate::model::grid::{GridGeometry, GridPrediction};

/// On-disk grid prediction. `intensity` is row-major with rows along `y`;
/// `mask` marks excluded cells with `true`.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionDocument {
    pub xsize: f64,
    pub ysize: f64,
    #[serde(default)]
    pub xoffset: f64,
    #[serde(default)]
    pub yoffset: f64,
    pub intensity: Vec<Vec<f64>>,
    #[serde(default)]
    pub mask: Option<Vec<Vec<bool>>>,
}

impl PredictionDocument {
    pub fn into_prediction(self) -> Result<GridPrediction> {
        let geometry = GridGeometry::new(self.xsize, self.ysize, self.xoffset, self.yoffset)?;
        let mut intensity = MaskedArray::from_rows(&self.intensity)?;
        if let Some(mask) = self.mask {
            let rows_match = mask.len() == self.intensity.len()
                && mask
                    .iter()
                    .zip(&self.intensity)
                    .all(|(m, row)| m.len() == row.len());
            if !rows_match {
                return Err(EvalError::InvalidArgument(
                    "mask dimensions do not match intensity".to_string(),
                ));
            }
            intensity = intensity.with_mask(mask.into_iter().flatten().collect())?;
        }
        GridPrediction::new(geometry, intensity)
    }
}

pub fn load_prediction(path: &Path) -> Result<GridPrediction> {
    let reader = open_maybe_gz(path)?;
    let doc: PredictionDocument = serde_json::from_reader(reader)?;
    let prediction = doc.into_prediction()?;
    info!(
        path = %path.display(),
        rows = prediction.yextent(),
        cols = prediction.xextent(),
        valid_cells = prediction.intensity().valid_count(),
        "loaded grid prediction"
    );
    Ok(prediction)
}
