//! Rule-based gesture classification.
//!
//! A classifier is an ordered list of declarative rules. Each frame is
//! checked against the rules in order and the first match decides the
//! label. Order matters: a two-fingertip line is a relaxation that also
//! fires on some four-fingertip poses, so the stricter rule goes first.

use handsign_common::config::{ClassifierConfig, FoldConfig, GestureRuleConfig};
use handsign_common::error::HandsignResult;
use handsign_hand_model::landmark::LandmarkFrame;
use handsign_hand_model::observation::GestureLabel;

use crate::features::{folded_except, line_of};

/// A single "vertical line" rule with an optional fold requirement.
///
/// Indices are validated on construction, so matching never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureRule {
    name: String,
    label: GestureLabel,
    indices: Vec<usize>,
    x_tolerance: f64,
    y_min_range: f64,
    fold: Option<FoldConfig>,
}

impl GestureRule {
    pub fn from_config(config: &GestureRuleConfig) -> HandsignResult<Self> {
        config.validate()?;
        Ok(Self {
            name: config.name.clone(),
            label: GestureLabel::new(config.label.clone()),
            indices: config.indices.clone(),
            x_tolerance: config.x_tolerance,
            y_min_range: config.y_min_range,
            fold: config.fold.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &GestureLabel {
        &self.label
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Whether `frame` satisfies this rule.
    pub fn matches(&self, frame: &LandmarkFrame) -> bool {
        if !line_of(frame, &self.indices, self.x_tolerance, self.y_min_range) {
            return false;
        }
        match &self.fold {
            Some(fold) => folded_except(frame, &fold.except, fold.threshold),
            None => true,
        }
    }
}

/// Ordered rule table.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    rules: Vec<GestureRule>,
}

impl GestureClassifier {
    pub fn new(rules: Vec<GestureRule>) -> Self {
        Self { rules }
    }

    /// Build the rule table, failing fast on any misconfigured rule.
    pub fn from_config(config: &ClassifierConfig) -> HandsignResult<Self> {
        let rules = config
            .rules
            .iter()
            .map(GestureRule::from_config)
            .collect::<HandsignResult<Vec<_>>>()?;
        Ok(Self::new(rules))
    }

    /// The two reference gestures with their reference thresholds.
    pub fn with_defaults() -> HandsignResult<Self> {
        Self::from_config(&ClassifierConfig::default())
    }

    pub fn rules(&self) -> &[GestureRule] {
        &self.rules
    }

    /// First rule matching `frame`, if any.
    pub fn matching_rule(&self, frame: &LandmarkFrame) -> Option<&GestureRule> {
        self.rules.iter().find(|rule| rule.matches(frame))
    }

    /// Label of the first matching rule, or `None`.
    pub fn classify(&self, frame: &LandmarkFrame) -> Option<GestureLabel> {
        self.matching_rule(frame).map(|rule| rule.label.clone())
    }
}
