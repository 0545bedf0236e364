// Markdown summary report: topic proportions, ranking and top words.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::Utc;
use tracing::info;

use crate::config::ModelConfig;
use crate::error::{DtmError, Result};
use crate::pipeline::proportions::TopicProportions;

/// Render the report as a markdown string.
pub fn render_report(
    model: &ModelConfig,
    proportions: &TopicProportions,
    top_words: &[Vec<&str>],
) -> String {
    let mut md = String::new();
    let slices = &proportions.time_slices;

    let _ = writeln!(md, "# Dynamic Topic Model Summary\n");
    let _ = writeln!(
        md,
        "Generated {} from {} documents, {} topics, {} time slices.\n",
        Utc::now().format("%Y-%m-%d %H:%M UTC"),
        proportions.documents.document_count(),
        model.topic_count,
        slices.slice_count()
    );

    let _ = writeln!(md, "## Topic proportions per time slice\n");
    let mut header = String::from("| Topic |");
    let mut rule = String::from("|---|");
    for slice in 0..slices.slice_count() {
        let label = model
            .time_slice_labels
            .get(&slice)
            .cloned()
            .unwrap_or_else(|| slice.to_string());
        let _ = write!(header, " {label} |");
        rule.push_str("---:|");
    }
    let _ = writeln!(md, "{header}\n{rule}");
    for (topic, values) in slices.by_topic().iter().enumerate() {
        let cells: Vec<String> = values.iter().map(|v| format!("{v:.2}")).collect();
        let _ = writeln!(md, "| {} | {} |", model.topic_label(topic), cells.join(" | "));
    }

    let _ = writeln!(md, "\n## Topics by mean document proportion\n");
    for (rank, (topic, mean)) in proportions.documents.topic_ranking().iter().enumerate() {
        let _ = writeln!(md, "{}. **{}** {:.2}%", rank + 1, model.topic_label(*topic), mean);
    }

    if !top_words.is_empty() {
        let _ = writeln!(md, "\n## Top words per topic\n");
        for (topic, words) in top_words.iter().enumerate() {
            let _ = writeln!(md, "- **{}**: {}", model.topic_label(topic), words.join(", "));
        }
    }

    md
}

/// Write the report to `path`, creating parent directories.
pub fn generate_report(
    model: &ModelConfig,
    proportions: &TopicProportions,
    top_words: &[Vec<&str>],
    path: &Path,
) -> Result<String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| DtmError::io(parent, e))?;
    }
    fs::write(path, render_report(model, proportions, top_words))
        .map_err(|e| DtmError::io(path, e))?;
    info!(path = %path.display(), "Wrote markdown report");
    Ok(path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::parse_matrix;

    #[test]
    fn test_report_sections() {
        let model = ModelConfig::from_json(
            r#"{ "topic_count": 2, "time_slices": [1, 1],
                 "topic_labels": { "0": "MATH" }, "time_slice_labels": { "1": "1978" } }"#,
        )
        .unwrap();
        let m = parse_matrix("1 3\n1 1\n", 2).unwrap();
        let proportions = TopicProportions::compute(&m, &model).unwrap();
        let md = render_report(&model, &proportions, &[vec!["a", "b"], vec!["c"]]);

        assert!(md.contains("| Topic | 0 | 1978 |"));
        assert!(md.contains("| MATH | 25.00 | 50.00 |"));
        assert!(md.contains("1. **TOPIC 1** 62.50%"));
        assert!(md.contains("- **MATH**: a, b"));
    }
}
