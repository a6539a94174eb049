use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// One harvested post. Columns the dashboard does not use are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub created_at: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub favorite_count: Option<u64>,
    pub full_text: String,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub retweet_count: Option<u64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub reply_count: Option<u64>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub tweet_url: String,
}

impl Post {
    pub fn favorites(&self) -> u64 {
        self.favorite_count.unwrap_or(0)
    }

    pub fn retweets(&self) -> u64 {
        self.retweet_count.unwrap_or(0)
    }

    pub fn replies(&self) -> u64 {
        self.reply_count.unwrap_or(0)
    }
}

pub fn read_posts_from<R: Read>(reader: R) -> Result<Vec<Post>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut posts = Vec::new();
    for (i, record) in rdr.deserialize().enumerate() {
        let post: Post = record.with_context(|| format!("bad post on row {}", i + 1))?;
        posts.push(post);
    }
    Ok(posts)
}

pub fn read_posts(path: &Path) -> Result<Vec<Post>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("cannot open {}", path.display()))?;
    let posts = read_posts_from(file).with_context(|| format!("in {}", path.display()))?;
    tracing::info!("Read {} posts from {}", posts.len(), path.display());
    Ok(posts)
}
