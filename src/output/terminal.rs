// Colored terminal output for proportions, rankings and likelihoods.
//
// This module handles all terminal-specific formatting. The main.rs
// subcommands delegate here once the numbers are computed.

use colored::Colorize;

use crate::config::ModelConfig;
use crate::pipeline::proportions::TopicProportions;
use crate::words::{TopicWordStore, WordSeries};

/// Display the per-time-slice topic percentages as a table.
pub fn display_time_slice_table(model: &ModelConfig, proportions: &TopicProportions) {
    let slices = &proportions.time_slices;
    println!(
        "\n{}",
        format!(
            "=== Topic proportions per time slice ({} slices) ===",
            slices.slice_count()
        )
        .bold()
    );
    println!();

    print!("  {:<20}", "Topic".dimmed());
    for slice in 0..slices.slice_count() {
        let label = model
            .time_slice_labels
            .get(&slice)
            .cloned()
            .unwrap_or_else(|| format!("#{slice}"));
        print!(" {:>7}", label.dimmed());
    }
    println!();
    println!("  {}", "-".repeat(20 + 8 * slices.slice_count()).dimmed());

    for (topic, values) in slices.by_topic().iter().enumerate() {
        print!("  {:<20}", super::truncate_chars(&model.topic_label(topic), 20));
        for value in values {
            print!(" {:>7}", colorize_share(*value));
        }
        println!();
    }
}

/// Display topics ordered by their mean document proportion.
pub fn display_topic_ranking(model: &ModelConfig, proportions: &TopicProportions) {
    println!(
        "\n{}",
        format!(
            "=== Topic ranking ({} documents) ===",
            proportions.documents.document_count()
        )
        .bold()
    );
    println!();

    for (rank, (topic, mean)) in proportions.documents.topic_ranking().iter().enumerate() {
        println!(
            "  {:>2}. {:<24} {:>6.2}%",
            rank + 1,
            model.topic_label(*topic).bold(),
            mean
        );
    }
}

/// Display each topic's top words.
pub fn display_top_words(model: &ModelConfig, top_words: &[Vec<&str>]) {
    println!("\n{}", "=== Overall top words per topic ===".bold());
    println!();
    for (topic, words) in top_words.iter().enumerate() {
        println!("  {}: {}", model.topic_label(topic).bold(), words.join(", "));
    }
}

/// Display one topic's top words for every time slice.
pub fn display_slice_words(model: &ModelConfig, topic: usize, per_slice: &[Vec<&str>]) {
    println!(
        "\n{}",
        format!("******* TOPIC {} *****", model.topic_label(topic)).bold()
    );
    for (slice, words) in per_slice.iter().enumerate() {
        let label = match model.time_slice_labels.get(&slice) {
            Some(year) => format!("Time {slice} ({year})"),
            None => format!("Time {slice}"),
        };
        println!("  {}: {}", label, words.join(", "));
    }
}

/// Display the average likelihood of a word in every topic.
pub fn display_likelihoods(
    model: &ModelConfig,
    word: &str,
    per_topic: &[(usize, Option<WordSeries>)],
) {
    println!(
        "\n{}",
        format!("=== Average likelihood of '{word}' per topic ===").bold()
    );
    for (topic, series) in per_topic {
        match series {
            Some(series) => {
                let merged = match &series.merged_plural {
                    Some(plural) => format!(" (+ '{plural}')").dimmed().to_string(),
                    None => String::new(),
                };
                println!(
                    "  {:<24} {:.6}{}",
                    model.topic_label(*topic),
                    series.average(),
                    merged
                );
            }
            None => println!(
                "  {:<24} {}",
                model.topic_label(*topic),
                "not found".dimmed()
            ),
        }
    }
}

/// Display a summary of the loaded inputs.
pub fn display_check(
    model: &ModelConfig,
    proportions: &TopicProportions,
    store: &TopicWordStore,
) {
    println!("\n{}", "=== Model inputs ===".bold());
    println!(
        "  Documents: {} in {} time slices",
        proportions.documents.document_count(),
        model.time_slice_count()
    );
    println!("  Topics: {}", model.topic_count);
    for (topic, words) in store.topics() {
        println!(
            "    {:<24} {} words",
            model.topic_label(topic),
            words.len()
        );
    }
    println!("  {}", "All inputs loaded and consistent.".green());
}

/// Color a percentage by how dominant the topic is in that slice.
fn colorize_share(value: f64) -> colored::ColoredString {
    let text = format!("{value:.2}");
    if value >= 25.0 {
        text.bright_green()
    } else if value >= 10.0 {
        text.bright_yellow()
    } else {
        text.normal()
    }
}
