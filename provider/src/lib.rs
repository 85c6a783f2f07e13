//! Data providers for time zone data
//!
//! This crate provides a compiled table of region based time zone
//! identifiers, their standard offsets and their English display names,
//! along with a case-insensitive identifier normalizer.
//!
#![no_std]

extern crate alloc;

mod data;
mod tzdb;

pub use data::{ZoneRecord, ZONES};
pub use tzdb::ZoneIdNormalizer;

/// A prelude of needed types for interacting with `timezone_provider` data.
pub mod prelude {
    pub use zerotrie;
    pub use zerovec;
}

#[cfg(test)]
mod tests {
    use super::ZoneIdNormalizer;

    #[test]
    fn basic_normalization() {
        let normalizer = ZoneIdNormalizer::build().unwrap();
        assert_eq!(
            normalizer.normalize("America/CHICAGO"),
            Some("America/Chicago")
        );
        assert_eq!(normalizer.normalize("uTc"), Some("UTC"));
        assert_eq!(normalizer.normalize("eTC/uTc"), Some("Etc/UTC"));
        assert_eq!(normalizer.normalize("Mars/Olympus_Mons"), None);
    }

    #[test]
    fn record_lookup() {
        let normalizer = ZoneIdNormalizer::build().unwrap();
        let record = normalizer.record("europe/paris").unwrap();
        assert_eq!(record.id, "Europe/Paris");
        assert_eq!(record.standard_offset, 3600);
        assert_eq!(record.generic_name, "Central European Time");
    }

    #[test]
    fn table_is_sorted_and_unique() {
        for pair in super::ZONES.windows(2) {
            assert!(pair[0].id < pair[1].id, "{} >= {}", pair[0].id, pair[1].id);
        }
    }
}
