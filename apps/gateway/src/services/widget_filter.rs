//! Query-driven filtering of a user's widget list.
//!
//! A filter is a conjunction of clauses, one per recognised query parameter
//! that is present. If the query is empty or names any parameter outside the
//! recognised set, no clause is built and the list passes through whole.

use time::OffsetDateTime;

use crate::domain::{parse_date_time, Widget};
use crate::error::AppError;
use crate::errors::ErrorCode;

pub const TYPE_PARAM: &str = "type";
pub const CREATED_START_PARAM: &str = "created_start";
pub const CREATED_END_PARAM: &str = "created_end";

const RECOGNISED_PARAMS: [&str; 3] = [TYPE_PARAM, CREATED_START_PARAM, CREATED_END_PARAM];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    TypeEquals(String),
    /// Inclusive lower bound on `created`
    CreatedFrom(OffsetDateTime),
    /// Inclusive upper bound on `created`
    CreatedUntil(OffsetDateTime),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetFilter {
    clauses: Vec<Clause>,
}

impl WidgetFilter {
    /// Filter that keeps every widget.
    pub fn unfiltered() -> Self {
        Self::default()
    }

    /// Build a filter from decoded query pairs.
    ///
    /// A repeated parameter uses its first value. Date bounds are only parsed
    /// once the query is known to be fully recognised, so a fallback query
    /// never fails on a bad date.
    pub fn from_query(params: &[(String, String)]) -> Result<Self, AppError> {
        if params.is_empty()
            || params
                .iter()
                .any(|(name, _)| !RECOGNISED_PARAMS.contains(&name.as_str()))
        {
            return Ok(Self::unfiltered());
        }

        let first = |name: &str| {
            params
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        };

        // Type first so a type mismatch short-circuits before any date parsing.
        let mut clauses = Vec::new();
        if let Some(kind) = first(TYPE_PARAM) {
            clauses.push(Clause::TypeEquals(kind.to_string()));
        }
        if let Some(raw) = first(CREATED_START_PARAM) {
            clauses.push(Clause::CreatedFrom(parse_bound(CREATED_START_PARAM, raw)?));
        }
        if let Some(raw) = first(CREATED_END_PARAM) {
            clauses.push(Clause::CreatedUntil(parse_bound(CREATED_END_PARAM, raw)?));
        }

        Ok(Self { clauses })
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_unfiltered(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether `widget` satisfies every clause.
    ///
    /// `created` is parsed lazily; an unparseable upstream timestamp is only an
    /// error when a date clause actually needs it.
    pub fn matches(&self, widget: &Widget) -> Result<bool, AppError> {
        let mut created: Option<OffsetDateTime> = None;

        for clause in &self.clauses {
            let keep = match clause {
                Clause::TypeEquals(kind) => widget.kind == *kind,
                Clause::CreatedFrom(start) => created_at(widget, &mut created)? >= *start,
                Clause::CreatedUntil(end) => created_at(widget, &mut created)? <= *end,
            };
            if !keep {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Keep the matching widgets, in upstream order.
    pub fn apply(&self, widgets: Vec<Widget>) -> Result<Vec<Widget>, AppError> {
        if self.is_unfiltered() {
            return Ok(widgets);
        }

        let mut kept = Vec::with_capacity(widgets.len());
        for widget in widgets {
            if self.matches(&widget)? {
                kept.push(widget);
            }
        }
        Ok(kept)
    }
}

fn parse_bound(name: &str, raw: &str) -> Result<OffsetDateTime, AppError> {
    parse_date_time(raw).ok_or_else(|| {
        AppError::bad_request(ErrorCode::InvalidDateFilter, format!("Invalid {name}: {raw}"))
    })
}

fn created_at(widget: &Widget, cache: &mut Option<OffsetDateTime>) -> Result<OffsetDateTime, AppError> {
    if let Some(at) = cache {
        return Ok(*at);
    }
    let raw = widget.created.as_deref().ok_or_else(|| {
        AppError::upstream_unavailable(format!("widget {} has no created timestamp", widget.id))
    })?;
    let at = parse_date_time(raw).ok_or_else(|| {
        AppError::upstream_unavailable(format!(
            "widget {} has unparseable created timestamp {raw:?}",
            widget.id
        ))
    })?;
    *cache = Some(at);
    Ok(at)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn q(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample() -> Vec<Widget> {
        vec![
            Widget::new(1, "floogle", "2018-12-31T23:00:00+0000"),
            Widget::new(2, "big-floogle", "2019-01-01T00:00:00+0000"),
            Widget::new(3, "floogle", "2019-06-15T12:00:00+0200"),
            Widget::new(4, "big-floogle", "2019-12-31T23:59:59+0000"),
            Widget::new(5, "floogle", "2020-01-01T00:00:00+0000"),
        ]
    }

    fn ids(widgets: &[Widget]) -> Vec<i64> {
        widgets.iter().filter_map(|w| w.id.as_i64()).collect()
    }

    #[test]
    fn test_empty_query_is_unfiltered() {
        let filter = WidgetFilter::from_query(&[]).unwrap();
        assert!(filter.is_unfiltered());
        assert_eq!(ids(&filter.apply(sample()).unwrap()), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_unknown_param_falls_back_to_everything() {
        for query in [
            q(&[("foo", "bar")]),
            q(&[("type", "floogle"), ("foo", "bar")]),
            q(&[("created_start", "not-a-date"), ("page", "2")]),
        ] {
            let filter = WidgetFilter::from_query(&query).unwrap();
            assert!(filter.is_unfiltered(), "{query:?} should fall back");
        }
    }

    #[test]
    fn test_type_only() {
        let filter = WidgetFilter::from_query(&q(&[("type", "big-floogle")])).unwrap();
        assert_eq!(ids(&filter.apply(sample()).unwrap()), vec![2, 4]);
    }

    #[test]
    fn test_start_only_is_inclusive() {
        let filter =
            WidgetFilter::from_query(&q(&[("created_start", "2019-01-01T00:00:00+0000")]))
                .unwrap();
        assert_eq!(ids(&filter.apply(sample()).unwrap()), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_end_only_is_inclusive() {
        let filter =
            WidgetFilter::from_query(&q(&[("created_end", "2019-12-31T23:59:59+0000")])).unwrap();
        assert_eq!(ids(&filter.apply(sample()).unwrap()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_all_three_clauses() {
        let filter = WidgetFilter::from_query(&q(&[
            ("created_end", "2019-12-31T23:59:59+0000"),
            ("type", "floogle"),
            ("created_start", "2019-01-01T00:00:00+0000"),
        ]))
        .unwrap();

        assert_eq!(
            filter.clauses(),
            &[
                Clause::TypeEquals("floogle".to_string()),
                Clause::CreatedFrom(datetime!(2019-01-01 00:00:00 UTC)),
                Clause::CreatedUntil(datetime!(2019-12-31 23:59:59 UTC)),
            ]
        );
        assert_eq!(ids(&filter.apply(sample()).unwrap()), vec![3]);
    }

    #[test]
    fn test_window_without_type() {
        let filter = WidgetFilter::from_query(&q(&[
            ("created_start", "2019-01-01T00:00:00+0000"),
            ("created_end", "2019-06-30T00:00:00+0000"),
        ]))
        .unwrap();
        assert_eq!(ids(&filter.apply(sample()).unwrap()), vec![2, 3]);
    }

    #[test]
    fn test_type_with_end_only() {
        let filter = WidgetFilter::from_query(&q(&[
            ("type", "floogle"),
            ("created_end", "2019-06-15T10:00:00+0000"),
        ]))
        .unwrap();
        assert_eq!(ids(&filter.apply(sample()).unwrap()), vec![1, 3]);
    }

    #[test]
    fn test_type_with_start_only() {
        let filter = WidgetFilter::from_query(&q(&[
            ("type", "big-floogle"),
            ("created_start", "2019-06-01T00:00:00+0000"),
        ]))
        .unwrap();
        assert_eq!(ids(&filter.apply(sample()).unwrap()), vec![4]);
    }

    #[test]
    fn test_repeated_param_uses_first_value() {
        let filter =
            WidgetFilter::from_query(&q(&[("type", "floogle"), ("type", "big-floogle")])).unwrap();
        assert_eq!(ids(&filter.apply(sample()).unwrap()), vec![1, 3, 5]);
    }

    #[test]
    fn test_invalid_bound_is_bad_request() {
        match WidgetFilter::from_query(&q(&[("created_start", "soon")])) {
            Err(AppError::BadRequest { code, detail }) => {
                assert_eq!(code, ErrorCode::InvalidDateFilter);
                assert_eq!(detail, "Invalid created_start: soon");
            }
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_upstream_timestamp_only_fails_when_needed() {
        let widgets = vec![
            Widget::new(1, "floogle", "garbage"),
            Widget::new(2, "big-floogle", "2019-06-01T00:00:00+0000"),
        ];

        // Type mismatch short-circuits before the bad timestamp is parsed.
        let filter = WidgetFilter::from_query(&q(&[
            ("type", "big-floogle"),
            ("created_start", "2019-01-01T00:00:00+0000"),
        ]))
        .unwrap();
        assert_eq!(ids(&filter.apply(widgets.clone()).unwrap()), vec![2]);

        let filter =
            WidgetFilter::from_query(&q(&[("created_start", "2019-01-01T00:00:00+0000")]))
                .unwrap();
        assert!(matches!(
            filter.apply(widgets),
            Err(AppError::UpstreamUnavailable { .. })
        ));
    }

    #[test]
    fn test_missing_created_only_fails_when_needed() {
        let mut undated = Widget::new("w-1", "floogle", "");
        undated.created = None;
        let widgets = vec![undated, Widget::new(2, "floogle", "2019-06-01T00:00:00+0000")];

        let filter = WidgetFilter::from_query(&q(&[("type", "floogle")])).unwrap();
        assert_eq!(filter.apply(widgets.clone()).unwrap().len(), 2);

        let filter =
            WidgetFilter::from_query(&q(&[("created_end", "2020-01-01T00:00:00+0000")])).unwrap();
        assert!(matches!(
            filter.apply(widgets),
            Err(AppError::UpstreamUnavailable { .. })
        ));
    }
}
