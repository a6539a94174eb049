use std::collections::BTreeMap;

use crate::Label;

/// Share of each predicted label over a batch of posts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelSummary {
    counts: BTreeMap<Label, usize>,
    total: usize,
}

impl LabelSummary {
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a Label>,
    {
        let mut summary = Self::default();
        for label in labels {
            summary.add(label.clone());
        }
        summary
    }

    pub fn add(&mut self, label: Label) {
        *self.counts.entry(label).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, label: &Label) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Percentage of all predictions, 0.0 for an empty summary.
    pub fn percentage(&self, label: &Label) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(label) as f64 * 100.0 / self.total as f64
    }

    /// `(label, count, percentage)` ordered by label.
    pub fn rows(&self) -> Vec<(&Label, usize, f64)> {
        self.counts
            .iter()
            .map(|(label, &count)| (label, count, self.percentage(label)))
            .collect()
    }
}
