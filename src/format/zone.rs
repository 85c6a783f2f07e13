//! Zone identifier and zone name printer-parsers.

use core::fmt;
use std::sync::Arc;

use writeable::Writeable;

use crate::{
    cache::{self, ZONE_ID_TREES, ZONE_NAME_TREES},
    fields::Field,
    iso::IsoDateTime,
    options::TextStyle,
    provider::{ZoneNameKind, ZoneProvider},
    trie::{MatchPolicy, PrefixTree},
    zone::{UtcOffset, ZoneId, ZonePrefix},
    TemporalResult,
};

use super::{
    context::{ParseContext, PrintContext},
    offset::OffsetIdElement,
};

/// Which zones a `ZoneIdElement` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ZoneQuery {
    /// The zone of the value.
    Strict,
    /// The zone of the value unless it is a plain offset.
    RegionOnly,
    /// The zone of the value, else its offset.
    Lenient,
}

impl ZoneQuery {
    fn zone(self, ctx: &PrintContext<'_>) -> Option<ZoneId> {
        let temporal = ctx.temporal();
        match self {
            Self::Strict => temporal.zone(),
            Self::RegionOnly => temporal.zone().filter(|zone| !zone.is_offset()),
            Self::Lenient => temporal.zone().or_else(|| temporal.offset().map(ZoneId::Offset)),
        }
    }
}

/// Prints and parses a zone identifier such as `Europe/Paris` or `+01:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ZoneIdElement {
    query: ZoneQuery,
}

impl ZoneIdElement {
    pub(crate) const fn new(query: ZoneQuery) -> Self {
        Self { query }
    }

    pub(crate) fn format(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> TemporalResult<bool> {
        let Some(zone) = ctx.query("ZoneId", self.query.zone(ctx))? else {
            return Ok(false);
        };
        buf.push_str(&zone.write_to_string());
        Ok(true)
    }

    pub(crate) fn parse(&self, ctx: &mut ParseContext<'_>, text: &[char], pos: usize) -> Result<usize, usize> {
        parse_zone(ctx, text, pos, |ctx| zone_id_tree(ctx.zone_provider(), ctx.is_case_sensitive()))
    }
}

impl fmt::Display for ZoneIdElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.query {
            ZoneQuery::Strict => "ZoneId()",
            ZoneQuery::RegionOnly => "ZoneRegionId()",
            ZoneQuery::Lenient => "ZoneOrOffsetId()",
        }
        .fmt(f)
    }
}

fn zone_id_tree(
    provider: &'static dyn ZoneProvider,
    case_sensitive: bool,
) -> TemporalResult<Arc<PrefixTree<&'static str>>> {
    let policy = MatchPolicy::of(case_sensitive);
    let key = (cache::provider_key(provider), policy, provider.generation());
    ZONE_ID_TREES.get_or_try_insert_with(key, || {
        let mut tree = PrefixTree::new(policy);
        for id in provider.available_ids() {
            tree.insert(id, id);
        }
        #[cfg(feature = "log")]
        log::debug!("built zone id tree with {} entries", tree.len());
        Ok(tree)
    })
}

/// Parses a zone, trying offset shaped text before the region tree.
fn parse_zone(
    ctx: &mut ParseContext<'_>,
    text: &[char],
    pos: usize,
    tree: impl FnOnce(&ParseContext<'_>) -> TemporalResult<Arc<PrefixTree<&'static str>>>,
) -> Result<usize, usize> {
    let Some(&next) = text.get(pos) else {
        return Err(pos);
    };
    if next == '+' || next == '-' {
        return parse_offset_based(ctx, text, pos, None, &OffsetIdElement::instant_id_z());
    }
    let at = |offset: usize, expected: char| {
        text.get(pos + offset)
            .is_some_and(|ch| ctx.char_equals(*ch, expected))
    };
    if at(0, 'U') && at(1, 'T') {
        let prefix = if at(2, 'C') {
            ZonePrefix::Utc
        } else {
            ZonePrefix::Ut
        };
        return parse_offset_based(ctx, text, pos, Some(prefix), &OffsetIdElement::instant_id_zero());
    }
    if at(0, 'G') && at(1, 'M') && at(2, 'T') {
        if text.get(pos + 3) == Some(&'0') {
            let zone = match ctx.zone_provider().normalize("GMT0") {
                Some(id) => ZoneId::Region(id.into()),
                None => ZoneId::Prefixed {
                    prefix: ZonePrefix::Gmt,
                    offset: UtcOffset::UTC,
                },
            };
            ctx.set_parsed_zone(zone);
            return Ok(pos + 4);
        }
        return parse_offset_based(
            ctx,
            text,
            pos,
            Some(ZonePrefix::Gmt),
            &OffsetIdElement::instant_id_zero(),
        );
    }

    let tree = tree(ctx).map_err(|_| pos)?;
    match tree.longest_match(text, pos) {
        Some((id, end)) => {
            ctx.set_parsed_zone(ZoneId::Region((*id).into()));
            Ok(end)
        }
        None if ctx.char_equals(next, 'Z') => {
            ctx.set_parsed_zone(ZoneId::UTC);
            Ok(pos + 1)
        }
        None => Err(pos),
    }
}

/// Parses an offset following an optional `UT`, `UTC` or `GMT` prefix.
fn parse_offset_based(
    ctx: &mut ParseContext<'_>,
    text: &[char],
    prefix_pos: usize,
    prefix: Option<ZonePrefix>,
    offset: &OffsetIdElement,
) -> Result<usize, usize> {
    let pos = prefix_pos + prefix.map_or(0, |p| p.as_str().len());
    let bare = |offset| match prefix {
        Some(prefix) => ZoneId::Prefixed { prefix, offset },
        None => ZoneId::Offset(offset),
    };
    let next = text.get(pos).copied();
    if prefix.is_some() && next.map_or(true, |ch| ch == '0' || ctx.char_equals(ch, 'Z')) {
        ctx.set_parsed_zone(bare(UtcOffset::UTC));
        return Ok(pos);
    }

    let mut sub = ctx.copy();
    match offset.parse(&mut sub, text, pos) {
        Ok(end) => {
            let seconds = sub.parsed_field(Field::OffsetSeconds).ok_or(prefix_pos)?;
            let offset = UtcOffset::from_seconds(seconds).map_err(|_| prefix_pos)?;
            ctx.set_parsed_zone(bare(offset));
            Ok(end)
        }
        Err(_) if prefix.is_none() => Err(prefix_pos),
        Err(_) => {
            ctx.set_parsed_zone(bare(UtcOffset::UTC));
            Ok(pos)
        }
    }
}

// ==== Zone text ====

/// Prints and parses the display name of a zone, such as
/// `Pacific Standard Time`.
#[derive(Debug, Clone)]
pub(crate) struct ZoneTextElement {
    style: TextStyle,
    generic: bool,
    preferred: Option<Arc<[String]>>,
}

impl ZoneTextElement {
    pub(crate) fn new(style: TextStyle, generic: bool, preferred: Option<Vec<String>>) -> Self {
        Self {
            style,
            generic,
            preferred: preferred.map(Into::into),
        }
    }

    /// Whether the printed value is in daylight time, `None` when that is
    /// unknown or ambiguous.
    fn daylight(ctx: &PrintContext<'_>, zone: &ZoneId) -> Option<bool> {
        let temporal = ctx.temporal();
        let provider = ctx.zone_provider();
        if let Some(seconds) = temporal.field(Field::InstantSeconds) {
            return Some(zone.is_daylight(seconds, provider));
        }
        let local = IsoDateTime::new(temporal.local_date()?, temporal.local_time()?);
        match zone.valid_offsets(local, provider).ok()?.as_slice() {
            [offset] => Some(zone.is_daylight(local.to_epoch_seconds(offset.seconds()), provider)),
            _ => None,
        }
    }

    pub(crate) fn format(&self, ctx: &mut PrintContext<'_>, buf: &mut String) -> TemporalResult<bool> {
        let Some(zone) = ctx.query("ZoneId", ctx.temporal().zone())? else {
            return Ok(false);
        };
        let name = match &zone {
            ZoneId::Region(id) => {
                let kind = match (self.generic, Self::daylight(ctx, &zone)) {
                    (false, Some(true)) => ZoneNameKind::Daylight,
                    (false, Some(false)) => ZoneNameKind::Standard,
                    _ => ZoneNameKind::Generic,
                };
                ctx.zone_provider()
                    .display_name(id, kind, self.style, ctx.locale())
            }
            _ => None,
        };
        match name {
            Some(name) => buf.push_str(name),
            None => buf.push_str(&zone.write_to_string()),
        }
        Ok(true)
    }

    fn tree(&self, ctx: &ParseContext<'_>) -> TemporalResult<Arc<PrefixTree<&'static str>>> {
        let provider = ctx.zone_provider();
        if self.style == TextStyle::Narrow {
            return zone_id_tree(provider, ctx.is_case_sensitive());
        }
        let policy = if !ctx.is_strict() && !ctx.is_case_sensitive() {
            MatchPolicy::Lenient
        } else {
            MatchPolicy::of(ctx.is_case_sensitive())
        };
        let locale = ctx.locale();
        let key = (
            cache::provider_key(provider),
            locale.to_string(),
            self.style,
            self.generic,
            policy,
            provider.generation(),
        );
        let names = |id: &'static str| {
            [
                ZoneNameKind::Standard,
                ZoneNameKind::Daylight,
                ZoneNameKind::Generic,
            ]
            .into_iter()
            .filter_map(move |kind| provider.display_name(id, kind, self.style, locale))
        };
        let tree = ZONE_NAME_TREES.get_or_try_insert_with(key, || {
            let ids = provider.available_ids();
            let mut tree = PrefixTree::new(policy);
            // Earlier zones win a shared name, and an identifier always
            // parses as itself.
            for id in ids.iter().rev() {
                for name in names(*id) {
                    tree.insert(name, *id);
                }
            }
            for id in &ids {
                tree.insert(id, *id);
            }
            #[cfg(feature = "log")]
            log::debug!("built zone name tree for {locale} with {} entries", tree.len());
            Ok(tree)
        })?;

        let Some(preferred) = &self.preferred else {
            return Ok(tree);
        };
        let mut tree = PrefixTree::clone(&tree);
        for id in provider.available_ids() {
            if preferred.iter().any(|p| p == id) {
                for name in names(id) {
                    tree.insert(name, id);
                }
            }
        }
        Ok(Arc::new(tree))
    }

    pub(crate) fn parse(&self, ctx: &mut ParseContext<'_>, text: &[char], pos: usize) -> Result<usize, usize> {
        parse_zone(ctx, text, pos, |ctx| self.tree(ctx))
    }
}

impl fmt::Display for ZoneTextElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZoneText({})", self.style)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        iso::{IsoDate, IsoDateTime, IsoTime},
        options::TextStyle,
        provider::STATIC_ZONES,
        temporal::{OffsetDateTime, ZonedDateTime},
        zone::{UtcOffset, ZoneId, ZonePrefix},
        DateTimeFormatter, DateTimeFormatterBuilder, ParsePosition,
    };

    fn parse_zone(formatter: &DateTimeFormatter, text: &str) -> Option<(ZoneId, usize)> {
        let mut position = ParsePosition::new(0);
        let parsed = formatter.parse_unresolved(text, &mut position)?;
        Some((parsed.zone()?.clone(), position.index()))
    }

    fn zone_id_formatter() -> DateTimeFormatter {
        let mut builder = DateTimeFormatterBuilder::new();
        builder.append_zone_id();
        builder.to_formatter()
    }

    fn region(id: &str) -> ZoneId {
        ZoneId::Region(id.into())
    }

    fn zoned(id: &str, month: u8) -> ZonedDateTime {
        let datetime = IsoDateTime::new(
            IsoDate::new(2011, month, 3).unwrap(),
            IsoTime::new(10, 15, 30, 0).unwrap(),
        );
        ZonedDateTime::of_local(datetime, region(id), None, &STATIC_ZONES).unwrap()
    }

    #[test]
    fn zone_ids_print() {
        let formatter = zone_id_formatter();
        assert_eq!(formatter.to_string(), "ZoneId()");
        assert_eq!(formatter.format(&zoned("Europe/Paris", 12)).unwrap(), "Europe/Paris");
        // An offset date time has no zone.
        let odt = OffsetDateTime::new(
            IsoDateTime::new(IsoDate::new(2011, 12, 3).unwrap(), IsoTime::MIDNIGHT),
            UtcOffset::from_seconds(3600).unwrap(),
        );
        assert!(formatter.format(&odt).is_err());

        let mut builder = DateTimeFormatterBuilder::new();
        builder.append_zone_or_offset_id();
        let formatter = builder.to_formatter();
        assert_eq!(formatter.to_string(), "ZoneOrOffsetId()");
        assert_eq!(formatter.format(&odt).unwrap(), "+01:00");
    }

    #[test]
    fn zone_longest_match() {
        let formatter = zone_id_formatter();
        assert_eq!(
            parse_zone(&formatter, "America/New_York"),
            Some((region("America/New_York"), 16))
        );
        assert_eq!(parse_zone(&formatter, "EST5EDT"), Some((region("EST5EDT"), 7)));
        assert_eq!(parse_zone(&formatter, "EST"), Some((region("EST"), 3)));
        assert_eq!(parse_zone(&formatter, "ESTx"), Some((region("EST"), 3)));
        assert_eq!(parse_zone(&formatter, "Etc/GMT+1"), Some((region("Etc/GMT+1"), 9)));
        assert_eq!(parse_zone(&formatter, "Mars/Base"), None);
        assert_eq!(parse_zone(&formatter, "america/new_york"), None);

        let mut builder = DateTimeFormatterBuilder::new();
        builder.parse_case_insensitive().append_zone_id();
        let formatter = builder.to_formatter();
        assert_eq!(
            parse_zone(&formatter, "america/new_york"),
            Some((region("America/New_York"), 16))
        );
    }

    #[test]
    fn offset_shaped_zones() {
        let formatter = zone_id_formatter();
        let offset = |s| UtcOffset::from_seconds(s).unwrap();
        assert_eq!(parse_zone(&formatter, "Z"), Some((ZoneId::UTC, 1)));
        assert_eq!(
            parse_zone(&formatter, "+01:30"),
            Some((ZoneId::Offset(offset(5400)), 6))
        );
        assert_eq!(parse_zone(&formatter, "+01"), None);
        assert_eq!(
            parse_zone(&formatter, "UTC+01:00"),
            Some((
                ZoneId::Prefixed {
                    prefix: ZonePrefix::Utc,
                    offset: offset(3600)
                },
                9
            ))
        );
        assert_eq!(
            parse_zone(&formatter, "GMT"),
            Some((
                ZoneId::Prefixed {
                    prefix: ZonePrefix::Gmt,
                    offset: UtcOffset::UTC
                },
                3
            ))
        );
        // A prefix followed by something other than an offset stops there.
        assert_eq!(
            parse_zone(&formatter, "UTx"),
            Some((
                ZoneId::Prefixed {
                    prefix: ZonePrefix::Ut,
                    offset: UtcOffset::UTC
                },
                2
            ))
        );
    }

    #[test]
    fn zone_names() {
        let mut builder = DateTimeFormatterBuilder::new();
        builder.append_zone_text(TextStyle::Full);
        let full = builder.to_formatter();
        assert_eq!(full.to_string(), "ZoneText(FULL)");
        let mut builder = DateTimeFormatterBuilder::new();
        builder.append_zone_text(TextStyle::Short);
        let short = builder.to_formatter();
        let mut builder = DateTimeFormatterBuilder::new();
        builder.append_generic_zone_text(TextStyle::Full);
        let generic = builder.to_formatter();

        let summer = zoned("America/Los_Angeles", 7);
        let winter = zoned("America/Los_Angeles", 12);
        assert_eq!(full.format(&summer).unwrap(), "Pacific Daylight Time");
        assert_eq!(full.format(&winter).unwrap(), "Pacific Standard Time");
        assert_eq!(short.format(&winter).unwrap(), "PST");
        assert_eq!(generic.format(&summer).unwrap(), "Pacific Time");

        assert_eq!(
            parse_zone(&full, "Pacific Daylight Time"),
            Some((region("America/Los_Angeles"), 21))
        );
        assert_eq!(parse_zone(&short, "PST"), Some((region("America/Los_Angeles"), 3)));
        assert_eq!(parse_zone(&full, "Europe/Paris"), Some((region("Europe/Paris"), 12)));

        // Prefixed offsets are recognised before the name tree is consulted.
        assert_eq!(
            parse_zone(&full, "GMT+01:00"),
            Some((
                ZoneId::Prefixed {
                    prefix: ZonePrefix::Gmt,
                    offset: UtcOffset::from_seconds(3600).unwrap()
                },
                9
            ))
        );
        assert_eq!(
            parse_zone(&short, "UTC"),
            Some((
                ZoneId::Prefixed {
                    prefix: ZonePrefix::Utc,
                    offset: UtcOffset::UTC
                },
                3
            ))
        );
    }
}
