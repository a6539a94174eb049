use ideation_common::FeatureVector;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::{argmax, Classifier, Label};

/// Fitted parameters of a multinomial Naive Bayes model, as exported from
/// scikit-learn's `MultinomialNB` (`classes_`, `class_log_prior_`,
/// `feature_log_prob_`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MultinomialNbParams {
    pub classes: Vec<String>,
    pub class_log_prior: Vec<f64>,
    pub feature_log_prob: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary_fingerprint: Option<String>,
}

#[derive(Clone, Debug)]
pub struct MultinomialNb {
    classes: Vec<Label>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
    n_features: usize,
}

impl MultinomialNb {
    pub fn from_params(params: MultinomialNbParams) -> Result<Self> {
        let n_classes = params.classes.len();
        if n_classes == 0 {
            return Err(ModelError::Shape("naive bayes model has no classes".to_string()));
        }
        if params.class_log_prior.len() != n_classes || params.feature_log_prob.len() != n_classes {
            return Err(ModelError::Shape(format!(
                "{} classes, {} priors, {} feature rows",
                n_classes,
                params.class_log_prior.len(),
                params.feature_log_prob.len()
            )));
        }
        let n_features = params.feature_log_prob[0].len();
        if params.feature_log_prob.iter().any(|row| row.len() != n_features) {
            return Err(ModelError::Shape("ragged feature_log_prob rows".to_string()));
        }
        Ok(Self {
            classes: params.classes.into_iter().map(Label).collect(),
            class_log_prior: params.class_log_prior,
            feature_log_prob: params.feature_log_prob,
            n_features,
        })
    }

    /// Unnormalized log posterior of every class.
    pub fn joint_log_likelihood(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        self.check_dimension(features)?;
        Ok(self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, row)| prior + features.iter().map(|(j, x)| x * row[j]).sum::<f64>())
            .collect())
    }

    /// Class probabilities, normalized with log-sum-exp.
    pub fn predict_proba(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        let jll = self.joint_log_likelihood(features)?;
        let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let log_norm = max + jll.iter().map(|v| (v - max).exp()).sum::<f64>().ln();
        Ok(jll.iter().map(|v| (v - log_norm).exp()).collect())
    }
}

impl Classifier for MultinomialNb {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[Label] {
        &self.classes
    }

    fn predict(&self, features: &FeatureVector) -> Result<Label> {
        let jll = self.joint_log_likelihood(features)?;
        let best = argmax(&jll).ok_or_else(|| ModelError::Shape("no classes".to_string()))?;
        Ok(self.classes[best].clone())
    }
}
