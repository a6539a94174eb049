use ideation_common::FeatureVector;
use ideation_models::decision_tree::DecisionTreeParams;
use ideation_models::naive_bayes::MultinomialNbParams;

pub const NOT_SUICIDE: &str = "Not Suicide post";
pub const POTENTIAL_SUICIDE: &str = "Potential Suicide post ";

/// Three features: 0 = "happy", 1 = "alone", 2 = "die".
#[allow(dead_code)]
pub fn naive_bayes() -> MultinomialNbParams {
    MultinomialNbParams {
        classes: vec![NOT_SUICIDE.to_string(), POTENTIAL_SUICIDE.to_string()],
        class_log_prior: vec![0.6f64.ln(), 0.4f64.ln()],
        feature_log_prob: vec![
            vec![0.7f64.ln(), 0.2f64.ln(), 0.1f64.ln()],
            vec![0.1f64.ln(), 0.4f64.ln(), 0.5f64.ln()],
        ],
        vocabulary_fingerprint: None,
    }
}

/// Splits on "die" first, then on "alone".
#[allow(dead_code)]
pub fn decision_tree() -> DecisionTreeParams {
    DecisionTreeParams {
        classes: vec![NOT_SUICIDE.to_string(), POTENTIAL_SUICIDE.to_string()],
        n_features: 3,
        children_left: vec![1, 3, -1, -1, -1],
        children_right: vec![2, 4, -1, -1, -1],
        feature: vec![2, 1, -2, -2, -2],
        threshold: vec![0.25, 0.5, -2.0, -2.0, -2.0],
        value: vec![
            vec![10.0, 10.0],
            vec![9.0, 4.0],
            vec![1.0, 6.0],
            vec![8.0, 1.0],
            vec![1.0, 3.0],
        ],
        vocabulary_fingerprint: None,
    }
}

#[allow(dead_code)]
pub fn vector(values: [f64; 3]) -> FeatureVector {
    FeatureVector::from_pairs(3, values.into_iter().enumerate()).expect("valid vector")
}
