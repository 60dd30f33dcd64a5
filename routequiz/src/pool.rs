use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::EmptyPoolError;

/// A feature record as it arrives from the data feed, before validation.
#[derive(Clone, Debug, Deserialize)]
pub struct RawFeature {
    /// The label, if the record carries one. Records without a usable
    /// label are dropped when the pool is built.
    #[serde(default)]
    pub label: Option<String>,
    /// The shape itself. The engine never looks inside this; it is only
    /// carried through to whatever renders the shape.
    #[serde(default)]
    pub geometry: Value,
}

/// One labeled shape from the dataset. Immutable once loaded.
#[derive(Clone, Debug)]
pub struct Feature {
    pub label: String,
    pub geometry: Value,
}

/// Identifies a feature by its position in the pool.
///
/// Two features may share a label, so every correctness check in the
/// engine compares ids, never label strings.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FeatureId(pub(crate) usize);

impl FeatureId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The validated set of features available for a game. Built once,
/// read-only for the rest of the program's life.
#[derive(Clone, Debug)]
pub struct FeaturePool {
    features: Vec<Feature>,
}

impl FeaturePool {
    /// Builds a pool from raw records, keeping only those with a
    /// non-empty label. Relative order of the survivors is preserved.
    pub fn load(raw: impl IntoIterator<Item = RawFeature>) -> Result<Self, EmptyPoolError> {
        let features: Vec<Feature> = raw
            .into_iter()
            .filter_map(|record| {
                let label = record.label.filter(|label| !label.is_empty())?;
                Some(Feature {
                    label,
                    geometry: record.geometry,
                })
            })
            .collect();
        if features.is_empty() {
            return Err(EmptyPoolError);
        }
        Ok(Self { features })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, id: FeatureId) -> &Feature {
        &self.features[id.0]
    }

    pub fn ids(&self) -> impl Iterator<Item = FeatureId> {
        (0..self.features.len()).map(FeatureId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, &Feature)> {
        self.features
            .iter()
            .enumerate()
            .map(|(index, feature)| (FeatureId(index), feature))
    }
}
