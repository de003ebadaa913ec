use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::fading_group::FadeKey;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Column type tag of the primary (horizontal) axis.
pub const PRIMARY_COLUMN_TYPE: &str = "x";
const DEFAULT_SERIES_NAME: &str = "line";

/// Shared horizontal coordinates (epoch milliseconds), monotonically increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryAxis {
    data: Vec<f64>,
}

impl PrimaryAxis {
    pub fn new(data: Vec<f64>) -> ChartResult<Self> {
        if data.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(
                "primary axis values must be finite".to_owned(),
            ));
        }
        if data.windows(2).any(|pair| pair[1] < pair[0]) {
            return Err(ChartError::InvalidData(
                "primary axis must be monotonically increasing".to_owned(),
            ));
        }
        Ok(Self { data })
    }

    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<f64> {
        self.data.first().copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<f64> {
        self.data.last().copied()
    }

    /// Full domain `(first, last)`, or `(0, 0)` when empty.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => (0.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesId(String);

impl SeriesId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One plotted value column aligned index-for-index to the primary axis.
///
/// Hidden series keep their data so re-enabling them can fade back in.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub id: SeriesId,
    pub name: String,
    pub color: Color,
    pub hidden: bool,
    data: Arc<[f64]>,
}

impl LineSeries {
    #[must_use]
    pub fn new(id: SeriesId, name: impl Into<String>, color: Color, data: Vec<f64>) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            hidden: false,
            data: data.into(),
        }
    }

    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    #[must_use]
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.data.get(index).copied()
    }

    #[must_use]
    pub fn with_hidden(&self, hidden: bool) -> Self {
        Self {
            hidden,
            ..self.clone()
        }
    }
}

impl FadeKey for LineSeries {
    type Key = SeriesId;

    fn fade_key(&self) -> Self::Key {
        self.id.clone()
    }
}

/// Typed dataset: one primary axis plus the series plotted against it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub primary_axis: PrimaryAxis,
    pub series: Vec<LineSeries>,
}

/// Dataset in its columnar interchange form.
///
/// Each column is `[id, v0, v1, ...]`; `types` maps ids to `"x"` or `"line"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDataset {
    pub columns: Vec<Vec<serde_json::Value>>,
    #[serde(default)]
    pub types: IndexMap<String, String>,
    #[serde(default)]
    pub names: IndexMap<String, String>,
    #[serde(default)]
    pub colors: IndexMap<String, String>,
}

impl ChartData {
    /// Builds typed series from `(id, values)` columns.
    ///
    /// The primary axis is the first column typed `x` (or, with no type tags,
    /// the column whose id is `x`). Every other column becomes a series.
    pub fn from_columns(
        columns: Vec<(String, Vec<f64>)>,
        types: &IndexMap<String, String>,
        names: &IndexMap<String, String>,
        colors: &IndexMap<String, String>,
    ) -> ChartResult<Self> {
        let primary_position = columns
            .iter()
            .position(|(id, _)| {
                types
                    .get(id)
                    .map_or(id == PRIMARY_COLUMN_TYPE, |kind| kind == PRIMARY_COLUMN_TYPE)
            })
            .ok_or(ChartError::MissingPrimaryAxis)?;

        let mut columns = columns;
        let (_, primary_values) = columns.remove(primary_position);
        let primary_axis = PrimaryAxis::new(primary_values)?;

        let mut series = Vec::with_capacity(columns.len());
        for (id, values) in columns {
            if values.len() != primary_axis.len() {
                return Err(ChartError::SeriesLengthMismatch {
                    id,
                    expected: primary_axis.len(),
                    actual: values.len(),
                });
            }
            if values.iter().any(|value| !value.is_finite()) {
                return Err(ChartError::InvalidData(format!(
                    "series `{id}` contains non-finite values"
                )));
            }

            let name = names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| DEFAULT_SERIES_NAME.to_owned());
            let color = match colors.get(&id) {
                Some(hex) => Color::from_hex(hex)?,
                None => Color::RED,
            };
            series.push(LineSeries::new(SeriesId::new(id), name, color, values));
        }

        debug!(
            samples = primary_axis.len(),
            series = series.len(),
            "dataset loaded"
        );
        Ok(Self {
            primary_axis,
            series,
        })
    }

    pub fn from_raw(raw: &RawDataset) -> ChartResult<Self> {
        let mut columns = Vec::with_capacity(raw.columns.len());
        for column in &raw.columns {
            let Some((head, values)) = column.split_first() else {
                return Err(ChartError::InvalidData("empty column".to_owned()));
            };
            let id = head
                .as_str()
                .ok_or_else(|| ChartError::InvalidData("column id must be a string".to_owned()))?
                .to_owned();
            let values = values
                .iter()
                .map(|value| {
                    value.as_f64().ok_or_else(|| {
                        ChartError::InvalidData(format!("column `{id}` has a non-numeric value"))
                    })
                })
                .collect::<ChartResult<Vec<f64>>>()?;
            columns.push((id, values));
        }
        Self::from_columns(columns, &raw.types, &raw.names, &raw.colors)
    }

    /// Parses the columnar JSON interchange format.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let raw: RawDataset = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse dataset: {e}")))?;
        Self::from_raw(&raw)
    }
}
