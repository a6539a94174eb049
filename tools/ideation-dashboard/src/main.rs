mod batch;
mod config;
mod harvest;
mod posts;
mod report;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use ideation_common::normalization::TextNormalizer;
use ideation_common::slang::SlangTable;
use ideation_common::Pipeline;
use ideation_models::{load_classifier, Classifier};
use tracing_subscriber::EnvFilter;

use crate::config::{default_config_path, Config, ModelChoice};
use crate::harvest::{HarvestRequest, Harvester};

#[derive(Parser)]
#[command(name = "ideation-dashboard")]
#[command(about = "Screen social media posts for signs of suicidal ideation")]
struct Cli {
    /// Config file (default: ~/.config/ideation-lens/config.toml)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the normalized form of a post
    Normalize { text: String },
    /// Print every stage of the pipeline for a post
    Inspect { text: String },
    /// Print the feature vector of a post, and its label when a model is configured
    Analyze {
        text: String,
        #[arg(long, short)]
        model: Option<ModelChoice>,
    },
    /// Classify the posts of a harvested CSV file
    Classify {
        #[arg(long, short)]
        input: PathBuf,
        #[arg(long, short)]
        model: Option<ModelChoice>,
    },
    /// Harvest posts for a keyword and date window, then classify them
    Crawl {
        #[arg(long, short)]
        keyword: String,
        /// First day, YYYY-MM-DD
        #[arg(long)]
        since: NaiveDate,
        /// Last day, YYYY-MM-DD
        #[arg(long)]
        until: NaiveDate,
        /// Number of posts to request (10 to 500)
        #[arg(long, short, default_value_t = 100)]
        limit: u32,
        #[arg(long, short)]
        model: Option<ModelChoice>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// The explicit config, else the default one if it exists.
fn optional_config(explicit: Option<&Path>) -> Result<Option<Config>> {
    if explicit.is_some() {
        return Config::locate(explicit).map(Some);
    }
    match default_config_path() {
        Some(path) if path.is_file() => Config::load(&path).map(Some),
        _ => Ok(None),
    }
}

fn load_model(
    config: &Config,
    pipeline: &Pipeline,
    choice: Option<ModelChoice>,
) -> Result<Box<dyn Classifier>> {
    let choice = choice.unwrap_or(config.models.default);
    let path = config
        .models
        .path(choice)
        .with_context(|| format!("no [models] {choice} path configured"))?;
    load_classifier(path, pipeline.fingerprint(), pipeline.dimension())
        .with_context(|| format!("cannot load {choice} model"))
}

fn normalize(config: Option<&Config>, text: &str) -> Result<()> {
    let extra = config.map(|c| c.pipeline.slang.clone()).unwrap_or_default();
    let normalizer = TextNormalizer::new(SlangTable::default().with_entries(extra));
    println!("{}", normalizer.normalize(text));
    Ok(())
}

fn inspect(pipeline: &Pipeline, text: &str) -> Result<()> {
    let analysis = pipeline.trace(text)?;
    let mut out = io::stdout().lock();
    writeln!(out, "normalized: {}", analysis.normalized)?;
    writeln!(out, "tokens:     {}", analysis.tokens.join(" "))?;
    writeln!(out, "filtered:   {}", analysis.filtered.join(" "))?;
    writeln!(out, "document:   {}", analysis.document)?;
    write_vector(&mut out, &analysis.vector)
}

fn write_vector<W: Write>(out: &mut W, vector: &ideation_common::FeatureVector) -> Result<()> {
    writeln!(out, "vector:     {} of {} features set", vector.nnz(), vector.dim())?;
    for (index, value) in vector.iter() {
        writeln!(out, "  {index:>6}  {value:.6}")?;
    }
    Ok(())
}

fn analyze(config: &Config, pipeline: &Pipeline, text: &str, model: Option<ModelChoice>) -> Result<()> {
    let vector = pipeline.analyze(text)?;
    let mut out = io::stdout().lock();
    write_vector(&mut out, &vector)?;
    let choice = model.unwrap_or(config.models.default);
    if model.is_some() || config.models.path(choice).is_some() {
        let classifier = load_model(config, pipeline, model)?;
        writeln!(out, "label:      {}", classifier.predict(&vector)?)?;
    }
    Ok(())
}

fn classify(config: &Config, pipeline: &Pipeline, input: &Path, model: Option<ModelChoice>) -> Result<()> {
    let classifier = load_model(config, pipeline, model)?;
    let posts = posts::read_posts(input)?;
    let rows = batch::classify_posts(pipeline, classifier.as_ref(), &posts);
    let summary = batch::summarize(&rows);
    report::write_report(&mut io::stdout().lock(), &rows, &summary)?;
    Ok(())
}

fn crawl(config: &Config, pipeline: &Pipeline, request: HarvestRequest, model: Option<ModelChoice>) -> Result<()> {
    // Fail on a bad model before spending a crawl.
    let classifier = load_model(config, pipeline, model)?;
    let csv = Harvester::new(&config.harvest).run(&request)?;
    println!("Crawled data saved to {}", csv.display());
    let posts = posts::read_posts(&csv)?;
    let mut out = io::stdout().lock();
    report::write_posts(&mut out, &posts)?;
    writeln!(out)?;
    let rows = batch::classify_posts(pipeline, classifier.as_ref(), &posts);
    let summary = batch::summarize(&rows);
    report::write_report(&mut out, &rows, &summary)?;
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();
    let cli = Cli::parse();
    let explicit = cli.config.as_deref();

    if let Commands::Normalize { text } = &cli.command {
        return normalize(optional_config(explicit)?.as_ref(), text);
    }

    let config = Config::locate(explicit)?;
    let pipeline = Pipeline::load(&config.pipeline).context("cannot initialize the pipeline")?;
    match cli.command {
        Commands::Normalize { .. } => Ok(()),
        Commands::Inspect { text } => inspect(&pipeline, &text),
        Commands::Analyze { text, model } => analyze(&config, &pipeline, &text, model),
        Commands::Classify { input, model } => classify(&config, &pipeline, &input, model),
        Commands::Crawl {
            keyword,
            since,
            until,
            limit,
            model,
        } => {
            let request = HarvestRequest::new(&keyword, since, until, limit)?;
            crawl(&config, &pipeline, request, model)
        }
    }
}
