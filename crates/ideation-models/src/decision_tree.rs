use ideation_common::FeatureVector;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::{argmax, Classifier, Label};

/// Marks a leaf in `children_left` / `children_right`.
pub const LEAF: i64 = -1;

/// Parallel node arrays of a fitted scikit-learn `DecisionTreeClassifier`
/// (`tree_.children_left`, `children_right`, `feature`, `threshold`,
/// `value`), plus `classes_` and `n_features_in_`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DecisionTreeParams {
    pub classes: Vec<String>,
    pub n_features: usize,
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary_fingerprint: Option<String>,
}

#[derive(Clone, Debug)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: usize,
    },
}

#[derive(Clone, Debug)]
pub struct DecisionTree {
    classes: Vec<Label>,
    n_features: usize,
    nodes: Vec<Node>,
}

impl DecisionTree {
    /// Validate the node arrays. Children must come after their parent,
    /// which is how scikit-learn lays trees out and rules out cycles.
    pub fn from_params(params: DecisionTreeParams) -> Result<Self> {
        let n_nodes = params.children_left.len();
        let n_classes = params.classes.len();
        if n_nodes == 0 || n_classes == 0 {
            return Err(ModelError::Shape("decision tree is empty".to_string()));
        }
        if params.children_right.len() != n_nodes
            || params.feature.len() != n_nodes
            || params.threshold.len() != n_nodes
            || params.value.len() != n_nodes
        {
            return Err(ModelError::Shape("node arrays differ in length".to_string()));
        }

        let mut nodes = Vec::with_capacity(n_nodes);
        for i in 0..n_nodes {
            let (left, right) = (params.children_left[i], params.children_right[i]);
            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(ModelError::Shape(format!("node {i} has a single child")));
                }
                let values = &params.value[i];
                if values.len() != n_classes {
                    return Err(ModelError::Shape(format!(
                        "leaf {i} has {} class values for {n_classes} classes",
                        values.len()
                    )));
                }
                let class = argmax(values)
                    .ok_or_else(|| ModelError::Shape(format!("leaf {i} has no values")))?;
                nodes.push(Node::Leaf { class });
                continue;
            }

            let child = |c: i64| -> Result<usize> {
                usize::try_from(c)
                    .ok()
                    .filter(|&c| c > i && c < n_nodes)
                    .ok_or_else(|| ModelError::Shape(format!("node {i} has invalid child {c}")))
            };
            let feature = usize::try_from(params.feature[i])
                .ok()
                .filter(|&f| f < params.n_features)
                .ok_or_else(|| {
                    ModelError::Shape(format!(
                        "node {i} splits on feature {} of {}",
                        params.feature[i], params.n_features
                    ))
                })?;
            nodes.push(Node::Split {
                feature,
                threshold: params.threshold[i],
                left: child(left)?,
                right: child(right)?,
            });
        }

        Ok(Self {
            classes: params.classes.into_iter().map(Label).collect(),
            n_features: params.n_features,
            nodes,
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Index of the class stored at the leaf `features` lands in.
    fn leaf_class(&self, features: &FeatureVector) -> usize {
        let mut node = 0;
        loop {
            match &self.nodes[node] {
                Node::Leaf { class } => return *class,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    // Trees compare in single precision.
                    let x = f64::from(features.get(*feature) as f32);
                    node = if x <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

impl Classifier for DecisionTree {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn classes(&self) -> &[Label] {
        &self.classes
    }

    fn predict(&self, features: &FeatureVector) -> Result<Label> {
        self.check_dimension(features)?;
        Ok(self.classes[self.leaf_class(features)].clone())
    }
}
