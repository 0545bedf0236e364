// Chart specifications — the hand-off point to whatever draws the charts.
//
// A ChartSpec carries fully computed series plus every label needed to
// annotate them. It is written out as JSON; rendering happens elsewhere.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ModelConfig;
use crate::error::{DtmError, Result};
use crate::proportions::TimeSliceProportions;
use crate::words::WordSeries;

/// Decimal places kept for word likelihoods handed to charts.
pub const LIKELIHOOD_DECIMALS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    StackedArea,
}

/// One named line/area in a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    /// File name without extension
    pub file_stem: String,
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    /// Tick labels for some x positions (time slices)
    pub x_labels: BTreeMap<usize, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_value: Option<f64>,
    pub show_legend: bool,
    pub palette: Vec<String>,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    fn base(model: &ModelConfig, kind: ChartKind, file_stem: String, title: String) -> Self {
        Self {
            kind,
            file_stem,
            title,
            x_axis_label: "Year".to_string(),
            y_axis_label: "Proportion".to_string(),
            x_labels: model.time_slice_labels.clone(),
            minimum_value: None,
            maximum_value: None,
            show_legend: true,
            palette: model.palette.clone(),
            series: Vec::new(),
        }
    }

    /// Write the spec as pretty JSON into `dir`, returning the file path.
    pub fn write_json(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir).map_err(|e| DtmError::io(dir, e))?;
        let path = dir.join(format!("{}.json", self.file_stem));
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).map_err(|e| DtmError::io(&path, e))?;
        debug!(path = %path.display(), series = self.series.len(), "Wrote chart spec");
        Ok(path)
    }
}

/// Stacked area of every topic's share per time slice, pinned to 0-100.
pub fn topic_area_chart(model: &ModelConfig, slices: &TimeSliceProportions) -> ChartSpec {
    let mut chart = ChartSpec::base(
        model,
        ChartKind::StackedArea,
        "topic-proportion-graph".to_string(),
        "Average topic composition per time slice".to_string(),
    );
    chart.minimum_value = Some(0.0);
    chart.maximum_value = Some(100.0);
    chart.series = slices
        .by_topic()
        .iter()
        .enumerate()
        .map(|(topic, values)| ChartSeries {
            name: model.topic_label(topic),
            values: values.clone(),
        })
        .collect();
    chart
}

/// Line of a single topic's share per time slice.
pub fn topic_line_chart(
    model: &ModelConfig,
    topic: usize,
    slices: &TimeSliceProportions,
) -> Option<ChartSpec> {
    let values = slices.topic(topic)?.to_vec();
    let mut chart = ChartSpec::base(
        model,
        ChartKind::Line,
        format!("topic-{topic}-proportion-graph"),
        format!(
            "Average proportion per time slice for topic {}",
            model.topic_label(topic)
        ),
    );
    chart.show_legend = false;
    chart.series.push(ChartSeries {
        name: topic.to_string(),
        values,
    });
    Some(chart)
}

/// One word's likelihood across topics. Each series is named by its topic.
pub fn word_chart(model: &ModelConfig, word: &str, series: &[WordSeries]) -> ChartSpec {
    let mut chart = ChartSpec::base(
        model,
        ChartKind::Line,
        format!("{word}_likelihood"),
        format!("Likelihood of term '{word}' over time slices"),
    );
    chart.y_axis_label = "Likelihood".to_string();
    chart.series = series
        .iter()
        .map(|s| ChartSeries {
            name: model.topic_label(s.topic),
            values: s.rounded(LIKELIHOOD_DECIMALS),
        })
        .collect();
    chart
}

/// Several words within one topic. Each series is named by its word.
pub fn comparison_chart(
    model: &ModelConfig,
    title: &str,
    topic: usize,
    series: &[WordSeries],
) -> ChartSpec {
    let label = model.topic_label(topic);
    let mut chart = ChartSpec::base(
        model,
        ChartKind::Line,
        format!("{title}_{label}_likelihood"),
        format!("Selected terms in topic {label} over time slices"),
    );
    chart.y_axis_label = "Likelihood".to_string();
    chart.series = series
        .iter()
        .map(|s| ChartSeries {
            name: s.word.clone(),
            values: s.rounded(LIKELIHOOD_DECIMALS),
        })
        .collect();
    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::parse_matrix;

    fn model() -> ModelConfig {
        ModelConfig::from_json(
            r#"{ "topic_count": 2, "time_slices": [1, 1],
                 "topic_labels": { "0": "MATH", "1": "HR" },
                 "time_slice_labels": { "0": "1974" } }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_area_chart_has_every_topic() {
        let m = parse_matrix("1 3\n1 1\n", 2).unwrap();
        let slices = TimeSliceProportions::compute(&m, &model().time_slices).unwrap();
        let chart = topic_area_chart(&model(), &slices);
        assert_eq!(chart.kind, ChartKind::StackedArea);
        assert_eq!(chart.maximum_value, Some(100.0));
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "MATH");
        assert_eq!(chart.series[0].values, vec![25.0, 50.0]);
        assert_eq!(chart.x_labels.get(&0).map(String::as_str), Some("1974"));
    }

    #[test]
    fn test_word_chart_rounds_values() {
        let series = vec![WordSeries {
            word: "computer".to_string(),
            topic: 1,
            merged_plural: None,
            values: vec![0.123456, 0.000049],
        }];
        let chart = word_chart(&model(), "computer", &series);
        assert_eq!(chart.file_stem, "computer_likelihood");
        assert_eq!(chart.series[0].name, "HR");
        assert_eq!(chart.series[0].values, vec![0.1235, 0.0]);
    }

    #[test]
    fn test_comparison_file_stem() {
        let chart = comparison_chart(&model(), "secrecy", 0, &[]);
        assert_eq!(chart.file_stem, "secrecy_MATH_likelihood");
        assert_eq!(chart.title, "Selected terms in topic MATH over time slices");
    }

    #[test]
    fn test_write_json() {
        let dir = std::env::temp_dir().join("dtm-lens-chart-test");
        let chart = comparison_chart(&model(), "t", 1, &[]);
        let path = chart.write_json(&dir).unwrap();
        let back: ChartSpec =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(back, chart);
    }
}
