//! Case-insensitive normalization of region identifiers.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use zerotrie::{ZeroAsciiIgnoreCaseTrie, ZeroTrieBuildError};
use zerovec::VarZeroVec;

use crate::data::{ZoneRecord, ZONES};

/// A data struct for region identifier normalization.
#[derive(PartialEq, Debug, Clone)]
pub struct ZoneIdNormalizer {
    /// An index to the location of the normal identifier.
    pub available_id_index: ZeroAsciiIgnoreCaseTrie<Vec<u8>>,

    /// The normalized region identifiers, sorted.
    pub normalized_identifiers: VarZeroVec<'static, str>,
}

impl ZoneIdNormalizer {
    /// Builds the normalizer over the compiled zone table.
    pub fn build() -> Result<Self, ZeroTrieBuildError> {
        let norm_vec: Vec<&str> = ZONES.iter().map(|record| record.id).collect();
        let normalized_identifiers: VarZeroVec<'static, str> = norm_vec.as_slice().into();

        let identifier_map: BTreeMap<Vec<u8>, usize> = norm_vec
            .iter()
            .enumerate()
            .map(|(index, id)| (id.to_ascii_lowercase().into_bytes(), index))
            .collect();

        Ok(Self {
            available_id_index: ZeroAsciiIgnoreCaseTrie::try_from(&identifier_map)?,
            normalized_identifiers,
        })
    }

    /// Returns the canonical spelling of `id`, if it is known.
    pub fn normalize(&self, id: &str) -> Option<&str> {
        let index = self.available_id_index.get(id)?;
        self.normalized_identifiers.get(index)
    }

    /// Returns the full record of `id`, if it is known.
    pub fn record(&self, id: &str) -> Option<&'static ZoneRecord> {
        let index = self.available_id_index.get(id)?;
        ZONES.get(index)
    }

    /// The number of identifiers held by this normalizer.
    pub fn len(&self) -> usize {
        self.normalized_identifiers.len()
    }

    /// Whether this normalizer holds no identifiers.
    pub fn is_empty(&self) -> bool {
        self.normalized_identifiers.is_empty()
    }
}
