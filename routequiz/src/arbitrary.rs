use quickcheck::{Arbitrary, Gen};

use crate::{FeaturePool, RawFeature};

/// Everything needed to reconstruct a pool and a seeded game
/// deterministically inside a property test.
#[derive(Clone, Debug)]
pub struct PoolBlueprint {
    pub labels: Vec<String>,
    pub seed: u64,
}

impl PoolBlueprint {
    pub fn pool(&self) -> FeaturePool {
        FeaturePool::load(self.labels.iter().map(|label| RawFeature {
            label: Some(label.clone()),
            geometry: serde_json::Value::Null,
        }))
        .expect("blueprint labels are never empty")
    }
}

impl Arbitrary for PoolBlueprint {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 12 + 1;
        let mut labels: Vec<String> = Vec::with_capacity(len);
        for _ in 0..len {
            // Duplicate labels happen in real datasets. Keep them likely,
            // so identity-vs-label mixups have a chance to surface.
            if bool::arbitrary(g) && !labels.is_empty() {
                let duplicate = g.choose(&labels).unwrap().clone();
                labels.push(duplicate);
            } else {
                labels.push(format!("route-{}", u8::arbitrary(g)));
            }
        }
        PoolBlueprint {
            labels,
            seed: u64::arbitrary(g),
        }
    }
}
