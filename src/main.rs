use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use dtm_lens::config::{Config, ModelConfig};
use dtm_lens::output::{chart, markdown, terminal};
use dtm_lens::pipeline;
use dtm_lens::words::{EnglishPluralizer, TopicWordStore, WordSeries, WordSeriesResolver};

/// dtm-lens: explore the output of a dynamic topic model.
///
/// Computes how much each topic weighs per document and per time slice, and
/// how individual words rise and fall within topics over time.
#[derive(Parser)]
#[command(name = "dtm-lens", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load every input file and report whether they agree with the config
    Check,

    /// Chart topic proportions per time slice
    Proportions {
        /// Also print the proportion table and topic ranking
        #[arg(long)]
        print: bool,
    },

    /// Print each topic's top words by peak likelihood
    TopWords {
        /// How many words per topic (default: 9)
        #[arg(long, default_value = "9")]
        count: usize,

        /// Skip this many top-ranked words first (default: 0)
        #[arg(long, default_value = "0")]
        offset: usize,
    },

    /// Print one topic's top words in every time slice
    SliceWords {
        /// Topic index
        #[arg(long)]
        topic: usize,

        /// How many words per time slice (default: 9)
        #[arg(long, default_value = "9")]
        count: usize,

        /// Skip this many top-ranked words first (default: 0)
        #[arg(long, default_value = "0")]
        offset: usize,
    },

    /// Chart a word's likelihood over time in every topic that has it
    WordGraph {
        /// The word to chart (its plural is merged in)
        word: String,
    },

    /// Chart several words within one topic
    Compare {
        /// Name used in the output file
        #[arg(long)]
        title: String,

        /// Topic index
        #[arg(long)]
        topic: usize,

        /// Words to compare
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Print a word's average likelihood in each topic
    Likelihoods {
        word: String,

        /// Only this topic; fails if the word is not in it
        #[arg(long)]
        topic: Option<usize>,
    },

    /// Write a markdown summary report
    Report,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dtm_lens=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load();
    let model = config.model()?;

    match cli.command {
        Commands::Check => {
            let proportions = pipeline::proportions::run(&model)?;
            let store = pipeline::likelihoods::load(&model)?;
            terminal::display_check(&model, &proportions, &store);
        }

        Commands::Proportions { print } => {
            let proportions = pipeline::proportions::run(&model)?;

            let area = chart::topic_area_chart(&model, &proportions.time_slices);
            let path = area.write_json(&config.output_dir)?;
            println!("Wrote {}", path.display());

            for topic in 0..model.topic_count {
                let line = chart::topic_line_chart(&model, topic, &proportions.time_slices)
                    .with_context(|| format!("no proportions for topic {topic}"))?;
                line.write_json(&config.output_dir)?;
            }
            println!(
                "Wrote {} per-topic charts to {}",
                model.topic_count,
                config.output_dir.display()
            );

            if print {
                terminal::display_time_slice_table(&model, &proportions);
                terminal::display_topic_ranking(&model, &proportions);
            }
        }

        Commands::TopWords { count, offset } => {
            let store = pipeline::likelihoods::load(&model)?;
            terminal::display_top_words(&model, &store.top_words(offset, count));
        }

        Commands::SliceWords {
            topic,
            count,
            offset,
        } => {
            require_topic(&model, topic)?;
            let store = pipeline::likelihoods::load(&model)?;
            let per_slice = (0..store.time_slice_count())
                .map(|slice| {
                    store
                        .top_words_in_slice(topic, slice, offset, count)
                        .with_context(|| format!("no words for topic {topic} slice {slice}"))
                })
                .collect::<Result<Vec<_>>>()?;
            terminal::display_slice_words(&model, topic, &per_slice);
        }

        Commands::WordGraph { word } => {
            let store = pipeline::likelihoods::load(&model)?;
            let series: Vec<WordSeries> = resolver(&store)
                .resolve_across_topics(&word)
                .into_iter()
                .filter_map(|(_, series)| series)
                .collect();

            if series.is_empty() {
                println!("'{word}' does not appear in any topic.");
                return Ok(());
            }

            let path = chart::word_chart(&model, &word, &series).write_json(&config.output_dir)?;
            println!(
                "Charted '{}' in {} of {} topics: {}",
                word,
                series.len(),
                model.topic_count,
                path.display()
            );
        }

        Commands::Compare {
            title,
            topic,
            words,
        } => {
            require_topic(&model, topic)?;
            let store = pipeline::likelihoods::load(&model)?;
            let resolver = resolver(&store);

            let mut series = Vec::with_capacity(words.len());
            for word in &words {
                match resolver.resolve(word, topic) {
                    Some(s) => series.push(s),
                    None => println!(
                        "  {} '{}' not in topic {}, skipping",
                        "Note:".yellow(),
                        word,
                        model.topic_label(topic)
                    ),
                }
            }

            let path = chart::comparison_chart(&model, &title, topic, &series)
                .write_json(&config.output_dir)?;
            println!("Wrote {}", path.display());
        }

        Commands::Likelihoods { word, topic } => {
            if let Some(topic) = topic {
                require_topic(&model, topic)?;
            }
            let store = pipeline::likelihoods::load(&model)?;
            let resolver = resolver(&store);
            let per_topic = match topic {
                Some(topic) => vec![(topic, Some(resolver.require(&word, topic)?))],
                None => resolver.resolve_across_topics(&word),
            };
            terminal::display_likelihoods(&model, &word, &per_topic);
        }

        Commands::Report => {
            let proportions = pipeline::proportions::run(&model)?;
            let store = pipeline::likelihoods::load(&model)?;
            let top_words = store.top_words(0, 9);

            let report_path = markdown::generate_report(
                &model,
                &proportions,
                &top_words,
                &config.output_dir.join("dtm-report.md"),
            )?;
            info!(path = %report_path, "Report generated");
            println!(
                "\n{}",
                format!("Markdown report saved to: {report_path}").bold()
            );
        }
    }

    Ok(())
}

fn resolver(store: &TopicWordStore) -> WordSeriesResolver<'_> {
    WordSeriesResolver::new(store, &EnglishPluralizer)
}

fn require_topic(model: &ModelConfig, topic: usize) -> Result<()> {
    if topic >= model.topic_count {
        anyhow::bail!(
            "Topic {topic} is out of range: the model has {} topics (0-{})",
            model.topic_count,
            model.topic_count - 1
        );
    }
    Ok(())
}
