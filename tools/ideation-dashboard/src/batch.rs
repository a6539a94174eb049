use ideation_common::Pipeline;
use ideation_models::{Classifier, Label, LabelSummary};
use rayon::prelude::*;

use crate::posts::Post;

/// A post and what the model made of it. A failure stays on its own row.
#[derive(Debug)]
pub struct Classified<'a> {
    pub post: &'a Post,
    pub outcome: Result<Label, String>,
}

pub fn classify_one(pipeline: &Pipeline, model: &dyn Classifier, text: &str) -> Result<Label, String> {
    let features = pipeline.analyze(text).map_err(|e| e.to_string())?;
    model.predict(&features).map_err(|e| e.to_string())
}

/// Label every post in parallel. Output order follows `posts`.
pub fn classify_posts<'a>(
    pipeline: &Pipeline,
    model: &dyn Classifier,
    posts: &'a [Post],
) -> Vec<Classified<'a>> {
    let rows: Vec<Classified<'a>> = posts
        .par_iter()
        .map(|post| Classified {
            post,
            outcome: classify_one(pipeline, model, &post.full_text),
        })
        .collect();
    let failed = rows.iter().filter(|r| r.outcome.is_err()).count();
    if failed > 0 {
        tracing::warn!("{failed} of {} posts could not be classified", rows.len());
    }
    rows
}

/// Counts over the posts that were classified.
pub fn summarize(rows: &[Classified<'_>]) -> LabelSummary {
    LabelSummary::from_labels(rows.iter().filter_map(|r| r.outcome.as_ref().ok()))
}
