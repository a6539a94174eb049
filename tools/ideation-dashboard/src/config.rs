use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ideation_common::PipelineConfig;
use serde::Deserialize;

/// Which pretrained model labels the posts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ModelChoice {
    #[default]
    #[serde(alias = "nb")]
    #[value(name = "nb", alias = "naive-bayes")]
    NaiveBayes,
    #[serde(alias = "tree")]
    #[value(name = "tree", alias = "decision-tree")]
    DecisionTree,
}

impl std::fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ModelChoice::NaiveBayes => "naive_bayes",
            ModelChoice::DecisionTree => "decision_tree",
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ModelsConfig {
    #[serde(default)]
    pub naive_bayes: Option<PathBuf>,
    #[serde(default)]
    pub decision_tree: Option<PathBuf>,
    #[serde(default)]
    pub default: ModelChoice,
}

impl ModelsConfig {
    pub fn path(&self, choice: ModelChoice) -> Option<&Path> {
        match choice {
            ModelChoice::NaiveBayes => self.naive_bayes.as_deref(),
            ModelChoice::DecisionTree => self.decision_tree.as_deref(),
        }
    }
}

/// How the external harvester is invoked.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HarvestConfig {
    pub program: String,
    pub package: String,
    /// Directory the harvester runs in; the config file's directory if unset.
    pub working_dir: Option<PathBuf>,
    /// Where the harvester writes its CSV, relative to `working_dir`.
    pub output_dir: PathBuf,
    pub tab: String,
    pub language: String,
    /// Environment variable holding the auth token.
    pub token_env: String,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            program: "npx".to_string(),
            package: "tweet-harvest@2.6.1".to_string(),
            working_dir: None,
            output_dir: PathBuf::from("tweets-data"),
            tab: "LATEST".to_string(),
            language: "en".to_string(),
            token_env: "TWITTER_AUTH_TOKEN".to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub harvest: HarvestConfig,
}

/// `~/.config/ideation-lens/config.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    let mut p = dirs::config_dir()?;
    p.push("ideation-lens");
    p.push("config.toml");
    Some(p)
}

impl Config {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Read a config file; relative paths inside it are resolved against
    /// the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let mut config =
            Self::parse(&text).with_context(|| format!("in config {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.resolve_paths(base);
        tracing::info!("Using config {}", path.display());
        Ok(config)
    }

    /// Load `explicit`, or the default location.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = default_config_path()
                    .context("no config directory; pass --config <path>")?;
                Self::load(&path)
            }
        }
    }

    pub fn resolve_paths(&mut self, base: &Path) {
        let pipeline = &mut self.pipeline;
        pipeline.vocabulary = resolve(base, &pipeline.vocabulary);
        pipeline.lexicon = resolve(base, &pipeline.lexicon);
        for p in [
            &mut pipeline.stopwords,
            &mut pipeline.exceptions,
            &mut self.models.naive_bayes,
            &mut self.models.decision_tree,
        ] {
            if let Some(path) = p.as_mut() {
                *path = resolve(base, path);
            }
        }
        let working_dir = match &self.harvest.working_dir {
            Some(dir) => resolve(base, dir),
            None => base.to_path_buf(),
        };
        self.harvest.working_dir = Some(working_dir);
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
