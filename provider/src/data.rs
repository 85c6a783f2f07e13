//! The compiled zone table.

/// A single region zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRecord {
    /// The canonical region identifier.
    pub id: &'static str,
    /// The standard offset from UTC in seconds.
    pub standard_offset: i32,
    /// The full standard time name.
    pub standard_name: &'static str,
    /// The abbreviated standard time name.
    pub standard_abbreviation: &'static str,
    /// The full daylight time name, when the zone observes daylight time.
    pub daylight_name: Option<&'static str>,
    /// The abbreviated daylight time name.
    pub daylight_abbreviation: Option<&'static str>,
    /// The generic (season independent) name.
    pub generic_name: &'static str,
}

// NOTE: Sorted by byte order of `id`, the normalizer index depends on it.
/// All zones known to this provider.
pub const ZONES: &[ZoneRecord] = &[
    ZoneRecord {
        id: "Africa/Cairo",
        standard_offset: 7200,
        standard_name: "Eastern European Standard Time",
        standard_abbreviation: "EET",
        daylight_name: Some("Eastern European Summer Time"),
        daylight_abbreviation: Some("EEST"),
        generic_name: "Eastern European Time",
    },
    ZoneRecord {
        id: "Africa/Johannesburg",
        standard_offset: 7200,
        standard_name: "South Africa Standard Time",
        standard_abbreviation: "SAST",
        daylight_name: None,
        daylight_abbreviation: None,
        generic_name: "South Africa Standard Time",
    },
    ZoneRecord {
        id: "Africa/Lagos",
        standard_offset: 3600,
        standard_name: "West Africa Standard Time",
        standard_abbreviation: "WAT",
        daylight_name: None,
        daylight_abbreviation: None,
        generic_name: "West Africa Time",
    },
    ZoneRecord {
        id: "America/Chicago",
        standard_offset: -21600,
        standard_name: "Central Standard Time",
        standard_abbreviation: "CST",
        daylight_name: Some("Central Daylight Time"),
        daylight_abbreviation: Some("CDT"),
        generic_name: "Central Time",
    },
    ZoneRecord {
        id: "America/Denver",
        standard_offset: -25200,
        standard_name: "Mountain Standard Time",
        standard_abbreviation: "MST",
        daylight_name: Some("Mountain Daylight Time"),
        daylight_abbreviation: Some("MDT"),
        generic_name: "Mountain Time",
    },
    ZoneRecord {
        id: "America/Los_Angeles",
        standard_offset: -28800,
        standard_name: "Pacific Standard Time",
        standard_abbreviation: "PST",
        daylight_name: Some("Pacific Daylight Time"),
        daylight_abbreviation: Some("PDT"),
        generic_name: "Pacific Time",
    },
    ZoneRecord {
        id: "America/New_York",
        standard_offset: -18000,
        standard_name: "Eastern Standard Time",
        standard_abbreviation: "EST",
        daylight_name: Some("Eastern Daylight Time"),
        daylight_abbreviation: Some("EDT"),
        generic_name: "Eastern Time",
    },
    ZoneRecord {
        id: "America/Sao_Paulo",
        standard_offset: -10800,
        standard_name: "Brasilia Standard Time",
        standard_abbreviation: "BRT",
        daylight_name: None,
        daylight_abbreviation: None,
        generic_name: "Brasilia Time",
    },
    ZoneRecord {
        id: "America/Toronto",
        standard_offset: -18000,
        standard_name: "Eastern Standard Time",
        standard_abbreviation: "EST",
        daylight_name: Some("Eastern Daylight Time"),
        daylight_abbreviation: Some("EDT"),
        generic_name: "Eastern Time",
    },
    ZoneRecord {
        id: "Asia/Dubai",
        standard_offset: 14400,
        standard_name: "Gulf Standard Time",
        standard_abbreviation: "GST",
        daylight_name: None,
        daylight_abbreviation: None,
        generic_name: "Gulf Standard Time",
    },
    ZoneRecord {
        id: "Asia/Kolkata",
        standard_offset: 19800,
        standard_name: "India Standard Time",
        standard_abbreviation: "IST",
        daylight_name: None,
        daylight_abbreviation: None,
        generic_name: "India Standard Time",
    },
    ZoneRecord {
        id: "Asia/Shanghai",
        standard_offset: 28800,
        standard_name: "China Standard Time",
        standard_abbreviation: "CST",
        daylight_name: None,
        daylight_abbreviation: None,
        generic_name: "China Time",
    },
    ZoneRecord {
        id: "Asia/Singapore",
        standard_offset: 28800,
        standard_name: "Singapore Standard Time",
        standard_abbreviation: "SGT",
        daylight_name: None,
        daylight_abbreviation: None,
        generic_name: "Singapore Standard Time",
    },
    ZoneRecord {
        id: "Asia/Tokyo",
        standard_offset: 32400,
        standard_name: "Japan Standard Time",
        standard_abbreviation: "JST",
        daylight_name: None,
        daylight_abbreviation: None,
        generic_name: "Japan Time",
    },
    ZoneRecord {
        id: "Australia/Sydney",
        standard_offset: 36000,
        standard_name: "Australian Eastern Standard Time",
        standard_abbreviation: "AEST",
        daylight_name: Some("Australian Eastern Daylight Time"),
        daylight_abbreviation: Some("AEDT"),
        generic_name: "Eastern Australia Time",
    },
    ZoneRecord {
        id: "EST",
        standard_offset: -18000,
        standard_name: "Eastern Standard Time",
        standard_abbreviation: "EST",
        daylight_name: None,
        daylight_abbreviation: None,
        generic_name: "Eastern Standard Time",
    },
    ZoneRecord {
        id: "EST5EDT",
        standard_offset: -18000,
        standard_name: "Eastern Standard Time",
        standard_abbreviation: "EST",
        daylight_name: Some("Eastern Daylight Time"),
        daylight_abbreviation: Some("EDT"),
        generic_name: "Eastern Time",
    },
    ZoneRecord {
        id: "Etc/GMT",
        standard_offset: 0,
        standard_name: "Greenwich Mean Time",
        standard_abbreviation: "GMT",
        daylight_name: None,
        daylight_abbreviation: None,
        generic_name: "Greenwich Mean Time",
    },
    ZoneRecord {
        id: "Etc/GMT+1",
        standard_offset: -3600,
        standard_name: "GMT-01:00",
        standard_abbreviation: "GMT-1",
        daylight_name: None,
        daylight_abbreviation: None,
        generic_name: "GMT-01:00",
    },
    ZoneRecord {
        id: "Etc/UTC",
        standard_offset: 0,
        standard_name: "Coordinated Universal Time",
        standard_abbreviation: "UTC",
        daylight_name: None,
        daylight_abbreviation: None,
        generic_name: "Coordinated Universal Time",
    },
    ZoneRecord {
        id: "Europe/Berlin",
        standard_offset: 3600,
        standard_name: "Central European Standard Time",
        standard_abbreviation: "CET",
        daylight_name: Some("Central European Summer Time"),
        daylight_abbreviation: Some("CEST"),
        generic_name: "Central European Time",
    },
    ZoneRecord {
        id: "Europe/London",
        standard_offset: 0,
        standard_name: "Greenwich Mean Time",
        standard_abbreviation: "GMT",
        daylight_name: Some("British Summer Time"),
        daylight_abbreviation: Some("BST"),
        generic_name: "United Kingdom Time",
    },
    ZoneRecord {
        id: "Europe/Madrid",
        standard_offset: 3600,
        standard_name: "Central European Standard Time",
        standard_abbreviation: "CET",
        daylight_name: Some("Central European Summer Time"),
        daylight_abbreviation: Some("CEST"),
        generic_name: "Central European Time",
    },
    ZoneRecord {
        id: "Europe/Moscow",
        standard_offset: 10800,
        standard_name: "Moscow Standard Time",
        standard_abbreviation: "MSK",
        daylight_name: None,
        daylight_abbreviation: None,
        generic_name: "Moscow Time",
    },
    ZoneRecord {
        id: "Europe/Paris",
        standard_offset: 3600,
        standard_name: "Central European Standard Time",
        standard_abbreviation: "CET",
        daylight_name: Some("Central European Summer Time"),
        daylight_abbreviation: Some("CEST"),
        generic_name: "Central European Time",
    },
    ZoneRecord {
        id: "Europe/Rome",
        standard_offset: 3600,
        standard_name: "Central European Standard Time",
        standard_abbreviation: "CET",
        daylight_name: Some("Central European Summer Time"),
        daylight_abbreviation: Some("CEST"),
        generic_name: "Central European Time",
    },
    ZoneRecord {
        id: "Pacific/Auckland",
        standard_offset: 43200,
        standard_name: "New Zealand Standard Time",
        standard_abbreviation: "NZST",
        daylight_name: Some("New Zealand Daylight Time"),
        daylight_abbreviation: Some("NZDT"),
        generic_name: "New Zealand Time",
    },
    ZoneRecord {
        id: "Pacific/Honolulu",
        standard_offset: -36000,
        standard_name: "Hawaii-Aleutian Standard Time",
        standard_abbreviation: "HST",
        daylight_name: None,
        daylight_abbreviation: None,
        generic_name: "Hawaii-Aleutian Time",
    },
    ZoneRecord {
        id: "UTC",
        standard_offset: 0,
        standard_name: "Coordinated Universal Time",
        standard_abbreviation: "UTC",
        daylight_name: None,
        daylight_abbreviation: None,
        generic_name: "Coordinated Universal Time",
    },
];
