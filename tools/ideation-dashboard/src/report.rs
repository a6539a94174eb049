use std::io::{self, Write};

use ideation_models::LabelSummary;

use crate::batch::Classified;
use crate::posts::Post;

const TEXT_WIDTH: usize = 60;
const BAR_WIDTH: usize = 40;

/// First `width` characters of `text` on one line, with `...` when cut.
pub fn truncate(text: &str, width: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if flat.chars().count() <= width {
        return flat;
    }
    let mut cut: String = flat.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

/// `percentage` of `width` cells, rounded to the nearest cell.
pub fn bar(percentage: f64, width: usize) -> String {
    let cells = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    "#".repeat(cells)
}

/// The harvested posts as they came in.
pub fn write_posts<W: Write>(out: &mut W, posts: &[Post]) -> io::Result<()> {
    writeln!(
        out,
        "{:<30}  {:<16}  {:>6}  {:>6}  {:>7}  {:<44}  text",
        "created_at", "username", "likes", "shares", "replies", "tweet_url"
    )?;
    for post in posts {
        writeln!(
            out,
            "{:<30}  {:<16}  {:>6}  {:>6}  {:>7}  {:<44}  {}",
            post.created_at,
            post.username,
            post.favorites(),
            post.retweets(),
            post.replies(),
            post.tweet_url,
            truncate(&post.full_text, TEXT_WIDTH)
        )?;
    }
    Ok(())
}

pub fn write_table<W: Write>(out: &mut W, rows: &[Classified<'_>]) -> io::Result<()> {
    writeln!(
        out,
        "{:<30}  {:<16}  {:<24}  text",
        "created_at", "username", "label"
    )?;
    for row in rows {
        let label = match &row.outcome {
            Ok(label) => label.to_string(),
            Err(_) => "error".to_string(),
        };
        let text = match &row.outcome {
            Ok(_) => truncate(&row.post.full_text, TEXT_WIDTH),
            Err(reason) => truncate(reason, TEXT_WIDTH),
        };
        writeln!(
            out,
            "{:<30}  {:<16}  {:<24}  {}",
            row.post.created_at, row.post.username, label, text
        )?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, summary: &LabelSummary) -> io::Result<()> {
    if summary.total() == 0 {
        return writeln!(out, "No posts classified.");
    }
    writeln!(out, "Classified {} posts", summary.total())?;
    for (label, count, pct) in summary.rows() {
        writeln!(
            out,
            "{:<24}  {:>6.2}%  ({:>4})  {}",
            label.to_string(),
            pct,
            count,
            bar(pct, BAR_WIDTH)
        )?;
    }
    Ok(())
}

pub fn write_report<W: Write>(
    out: &mut W,
    rows: &[Classified<'_>],
    summary: &LabelSummary,
) -> io::Result<()> {
    write_table(out, rows)?;
    writeln!(out)?;
    write_summary(out, summary)
}
