//! Natural temporal syntax mapped onto the bi-temporal model.

use chrono::{DateTime, NaiveDate, Utc};

use axon_core::models::{QueryResponse, TemporalData, TemporalQuery, ValidInterval};
use axon_temporal::BiTemporalModel;

use crate::router::iso_dates;

fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

/// Parse the recognized temporal phrasings into a TemporalQuery:
/// `as of <date>`, `valid at <date>`, `valid during <a> and <b>` /
/// `between <a> and <b>`. Returns None when no date parses.
pub fn parse(query: &str) -> Option<TemporalQuery> {
    let lower = query.to_lowercase();
    let dates: Vec<DateTime<Utc>> = iso_dates(query).into_iter().filter_map(parse_date).collect();
    let first = *dates.first()?;

    let mut temporal = TemporalQuery::default();
    if (lower.contains("valid during") || lower.contains("between")) && dates.len() >= 2 {
        temporal.valid_during = Some(ValidInterval::closed(first, dates[1]));
    } else if lower.contains("as of") {
        temporal.as_of = Some(first);
    } else {
        temporal.valid_at = Some(first);
    }
    Some(temporal)
}

/// Run a routed temporal query. Results ride in `temporal_data`; the
/// ranked list stays empty because nothing was ranked.
pub fn run(model: &BiTemporalModel, query: &str) -> Option<QueryResponse> {
    let temporal_query = parse(query)?;
    let result = model.query(&temporal_query);
    Some(QueryResponse {
        total_matches: result.edges.len(),
        temporal_data: Some(TemporalData {
            edges: result.edges,
            windows: result.windows,
        }),
        ..Default::default()
    })
}
