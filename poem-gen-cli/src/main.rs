use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{error, info};
use poem_gen_core::config::{
    DEFAULT_LINES, DEFAULT_MAX_WORDS, DEFAULT_MIN_WORDS, DEFAULT_MODEL_FILE, DEFAULT_ORDER, DEFAULT_OUTPUT_DIR,
};
use poem_gen_core::io::{ensure_output_directory, poem_path};
use poem_gen_core::{MarkovModel, ModelStats, PoemGenerator, PoemOptions, PoemStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Markov chain poetry generator
#[derive(Parser, Debug)]
#[command(name = "poem-gen")]
#[command(version)]
struct Args {
    /// Train the model on --data-dir and save it to --model-file
    #[arg(long)]
    train: bool,

    /// Generate poems into --output-dir
    #[arg(long)]
    generate: bool,

    /// Show model statistics
    #[arg(long)]
    stats: bool,

    /// Directory containing training data (.txt files, searched recursively)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Path to save/load the model (.bin for the compact binary format)
    #[arg(long, default_value = DEFAULT_MODEL_FILE)]
    model_file: PathBuf,

    /// Order of the Markov chain
    #[arg(long, default_value_t = DEFAULT_ORDER)]
    order: usize,

    /// Directory to save generated poems
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Number of poems to generate
    #[arg(long, default_value_t = 1)]
    count: usize,

    /// Number of lines per poem
    #[arg(long, default_value_t = DEFAULT_LINES)]
    lines: usize,

    /// Minimum words per line
    #[arg(long, default_value_t = DEFAULT_MIN_WORDS)]
    min_words: usize,

    /// Maximum words per line
    #[arg(long, default_value_t = DEFAULT_MAX_WORDS)]
    max_words: usize,

    /// Style of poem to generate: default, haiku, sonnet or free_verse
    #[arg(long, default_value = "default")]
    style: PoemStyle,

    /// Generate poems without titles
    #[arg(long)]
    no_title: bool,

    /// Seed for reproducible poems
    #[arg(long)]
    seed: Option<u64>,

    /// Print statistics as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.train && args.data_dir.is_none() {
        error!("--data-dir is required for training");
        return Ok(ExitCode::FAILURE);
    }

    let model = if args.train {
        train_model(&args)?
    } else if args.model_file.exists() {
        info!("loading model from {}", args.model_file.display());
        MarkovModel::from_file(&args.model_file)?
    } else {
        error!(
            "model file {} not found, train a model first or specify a valid model file",
            args.model_file.display()
        );
        return Ok(ExitCode::FAILURE);
    };

    if args.stats {
        let stats = model.get_model_stats()?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            show_model_stats(&stats);
        }
    }

    if args.generate {
        generate_poems(&model, &args)?;
    }

    Ok(ExitCode::SUCCESS)
}

fn train_model(args: &Args) -> Result<MarkovModel, Box<dyn std::error::Error>> {
    let data_dir: &Path = args.data_dir.as_deref().ok_or("--data-dir is required for training")?;
    info!("training model with order {}...", args.order);

    let mut model = MarkovModel::new(args.order)?;
    let start = Instant::now();
    model.train_from_directory(data_dir)?;
    info!("training completed in {:.2} seconds", start.elapsed().as_secs_f64());

    model.save(&args.model_file)?;
    Ok(model)
}

fn generate_poems(model: &MarkovModel, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut generator = PoemGenerator::new(model, rng);

    let output_dir = ensure_output_directory(&args.output_dir)?;
    let options = PoemOptions {
        lines: args.lines,
        min_words: args.min_words,
        max_words: args.max_words,
        include_title: !args.no_title,
        style: args.style,
    };

    info!("generating {} poems...", args.count);
    for i in 0..args.count {
        let file_path = poem_path(&output_dir, i + 1);
        let poem = generator.save_poem(&file_path, &options)?;

        info!("generated poem saved to {}", file_path.display());
        println!("\nSample of the generated poem:");
        println!("------------------------------");
        for line in poem.split('\n').take(5) {
            println!("{line}");
        }
        println!("...");
        println!("------------------------------\n");
    }

    Ok(())
}

fn show_model_stats(stats: &ModelStats) {
    println!("\nModel Statistics:");
    println!("----------------");
    println!("Order: {}", stats.order);
    println!("Total words processed: {}", stats.total_words);
    println!("Unique words: {}", stats.unique_words);
    println!("Vocabulary size: {}", stats.vocabulary_size);
    println!("Beginning sequences: {}", stats.beginning_sequences);
    println!("Line endings: {}", stats.line_endings);

    println!("\nMost common words:");
    for (word, count) in stats.most_common_words.iter().take(10) {
        println!("  {word}: {count}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_configuration() {
        let args = Args::parse_from(["poem-gen"]);
        assert_eq!(args.order, DEFAULT_ORDER);
        assert_eq!(args.model_file, PathBuf::from(DEFAULT_MODEL_FILE));
        assert_eq!(args.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(args.count, 1);
        assert_eq!(args.style, PoemStyle::Default);
        assert!(!args.no_title);
    }

    #[test]
    fn styles_use_snake_case_names() {
        let args = Args::parse_from(["poem-gen", "--generate", "--style", "free_verse", "--no-title"]);
        assert_eq!(args.style, PoemStyle::FreeVerse);
        assert!(args.no_title);

        let err = Args::try_parse_from(["poem-gen", "--style", "limerick"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("unknown poem style: limerick"));
    }

    #[test]
    fn numeric_flags_parse() {
        let args = Args::parse_from([
            "poem-gen", "--train", "--data-dir", "corpus", "--order", "3", "--lines", "4", "--min-words", "2",
            "--max-words", "5", "--count", "2", "--seed", "7",
        ]);
        assert!(args.train);
        assert_eq!(args.data_dir, Some(PathBuf::from("corpus")));
        assert_eq!((args.order, args.lines, args.min_words, args.max_words), (3, 4, 2, 5));
        assert_eq!(args.count, 2);
        assert_eq!(args.seed, Some(7));
    }
}
