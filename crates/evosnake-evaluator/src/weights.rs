//! Per-feature weight vectors.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::feature::{FEATURE_COUNT, Feature};

/// One weight per [`Feature`], stored in [`Feature::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureWeights([f32; FEATURE_COUNT]);

impl FeatureWeights {
    #[must_use]
    pub const fn zeros() -> Self {
        Self([0.0; FEATURE_COUNT])
    }

    #[must_use]
    pub const fn from_array(weights: [f32; FEATURE_COUNT]) -> Self {
        Self(weights)
    }

    /// Builds weights by calling `f` once per feature, in gene order.
    #[must_use]
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Feature) -> f32,
    {
        Self(Feature::ALL.map(&mut f))
    }

    #[must_use]
    pub const fn as_array(&self) -> &[f32; FEATURE_COUNT] {
        &self.0
    }

    #[must_use]
    pub fn as_mut_array(&mut self) -> &mut [f32; FEATURE_COUNT] {
        &mut self.0
    }

    /// Iterates over `(feature, weight)` pairs in gene order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, f32)> + '_ {
        Feature::ALL.into_iter().zip(self.0.iter().copied())
    }
}

impl Index<Feature> for FeatureWeights {
    type Output = f32;

    fn index(&self, feature: Feature) -> &Self::Output {
        &self.0[feature.index()]
    }
}

impl IndexMut<Feature> for FeatureWeights {
    fn index_mut(&mut self, feature: Feature) -> &mut Self::Output {
        &mut self.0[feature.index()]
    }
}
