use serde::{Deserialize, Serialize};

/// Label/dataset structure handed to the chart renderer.
///
/// All numbers are computed here; the renderer only draws them.
/// Every dataset's `data` has exactly `labels.len()` entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartPayload {
    /// Short date labels (e.g., "Oct 14"), one per x-axis slot
    pub labels: Vec<String>,

    pub datasets: Vec<ChartDataset>,
}

impl ChartPayload {
    pub fn dataset(&self, label: &str) -> Option<&ChartDataset> {
        self.datasets.iter().find(|d| d.label == label)
    }
}

/// One line on the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,

    /// `None` marks a gap; serialized as JSON `null`
    pub data: Vec<Option<f64>>,

    #[serde(default)]
    pub style: DatasetStyle,
}

/// Presentation hints. The renderer decides what they look like.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetStyle {
    pub dashed: bool,
    pub point_markers: bool,
    pub tone: SeriesTone,
}

impl Default for DatasetStyle {
    fn default() -> Self {
        Self {
            dashed: false,
            point_markers: true,
            tone: SeriesTone::Neutral,
        }
    }
}

impl DatasetStyle {
    /// Dashed, no point markers; used for confidence bounds.
    pub fn bound() -> Self {
        Self {
            dashed: true,
            point_markers: false,
            tone: SeriesTone::Muted,
        }
    }

    pub fn with_tone(tone: SeriesTone) -> Self {
        Self {
            tone,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesTone {
    Neutral,
    Positive,
    Negative,
    Muted,
    Accent,
}

/// A series to place on a shared date axis.
///
/// `offset` is the axis slot of `values[0]`; slots before it are gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesInput {
    pub label: String,
    pub offset: usize,
    pub values: Vec<Option<f64>>,
    pub style: DatasetStyle,
}

impl SeriesInput {
    pub fn new(label: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            label: label.into(),
            offset: 0,
            values,
            style: DatasetStyle::default(),
        }
    }

    /// A dense series starting at axis slot `offset`.
    pub fn dense_at(label: impl Into<String>, offset: usize, values: &[f64]) -> Self {
        Self {
            label: label.into(),
            offset,
            values: values.iter().copied().map(Some).collect(),
            style: DatasetStyle::default(),
        }
    }

    pub fn styled(mut self, style: DatasetStyle) -> Self {
        self.style = style;
        self
    }
}
