use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::OffsetDateTime;

/// Parse an ISO-8601 datetime that carries a UTC offset.
///
/// Accepts the upstream form `2019-01-04T16:41:24+0200` as well as RFC 3339
/// (`+02:00`, `Z`), with optional fractional seconds. A space where the offset
/// sign belongs is read as `+`: an unescaped `+` in a query string arrives
/// decoded as a space.
pub fn parse_date_time(raw: &str) -> Option<OffsetDateTime> {
    let normalized = raw.trim().replace(' ', "+");

    OffsetDateTime::parse(
        &normalized,
        format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]][offset_hour sign:mandatory][offset_minute]"
        ),
    )
    .or_else(|_| OffsetDateTime::parse(&normalized, &Rfc3339))
    .ok()
}
