//! Linear bag-of-words rating model loaded from a JSON artifact.
//!
//! This is the in-process alternative to the gRPC service: the trained
//! model is exported as token weights plus an intercept and evaluated
//! locally. Artifact format:
//!
//! ```json
//! {
//!   "intercept": 3.1,
//!   "token_weights": { "action": 0.25, "drama": 0.4 },
//!   "lowercase": true,
//!   "min_rating": 0.5,
//!   "max_rating": 5.0
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use catalog::{PredictorError, RatingPredictor};

use crate::error::{ModelArtifactError, Result};

fn default_lowercase() -> bool {
    true
}

/// A linear model over token counts.
///
/// The score of a text is the intercept plus the weight of every token
/// occurrence, clamped to `[min_rating, max_rating]` when those are set.
/// Unknown tokens contribute nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearTextModel {
    intercept: f64,
    #[serde(default)]
    token_weights: HashMap<String, f64>,
    #[serde(default = "default_lowercase")]
    lowercase: bool,
    #[serde(default)]
    min_rating: Option<f64>,
    #[serde(default)]
    max_rating: Option<f64>,
}

impl LinearTextModel {
    /// Load and validate a model artifact from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ModelArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model = Self::from_json_str(&raw)?;
        info!(
            "Loaded model artifact {} ({} token weights)",
            path.display(),
            model.token_weights.len()
        );
        Ok(model)
    }

    /// Parse and validate a model from its JSON form.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let mut model: Self = serde_json::from_str(raw)?;
        model.validate()?;
        if model.lowercase {
            // "Drama" and "drama" would otherwise fold into one arbitrary weight
            let mut folded = HashMap::with_capacity(model.token_weights.len());
            for (token, weight) in model.token_weights {
                let key = token.to_lowercase();
                if folded.contains_key(&key) {
                    return Err(ModelArtifactError::Invalid(format!(
                        "token '{}' appears more than once after lowercasing",
                        key
                    )));
                }
                folded.insert(key, weight);
            }
            model.token_weights = folded;
        }
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if !self.intercept.is_finite() {
            return Err(ModelArtifactError::Invalid(
                "intercept must be finite".to_string(),
            ));
        }
        if let Some((token, _)) = self.token_weights.iter().find(|(_, w)| !w.is_finite()) {
            return Err(ModelArtifactError::Invalid(format!(
                "weight for token '{}' must be finite",
                token
            )));
        }
        if let (Some(min), Some(max)) = (self.min_rating, self.max_rating) {
            if min > max {
                return Err(ModelArtifactError::Invalid(format!(
                    "min_rating {} is greater than max_rating {}",
                    min, max
                )));
            }
        }
        Ok(())
    }

    /// Score a text feature.
    pub fn score(&self, text: &str) -> f64 {
        let raw: f64 = self.intercept
            + tokenize(text)
                .map(|token| {
                    let weight = if self.lowercase {
                        self.token_weights.get(&token.to_lowercase())
                    } else {
                        self.token_weights.get(token)
                    };
                    weight.copied().unwrap_or(0.0)
                })
                .sum::<f64>();

        let raw = match self.min_rating {
            Some(min) => raw.max(min),
            None => raw,
        };
        match self.max_rating {
            Some(max) => raw.min(max),
            None => raw,
        }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.token_weights.len()
    }
}

/// Split on anything that is not a letter or digit.
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl RatingPredictor for LinearTextModel {
    fn name(&self) -> &str {
        "linear-text-model"
    }

    async fn predict(&self, text: &str) -> std::result::Result<f64, PredictorError> {
        Ok(self.score(text))
    }
}
