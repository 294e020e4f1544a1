//! Query input (spec §6.1) and the validation spec §7 calls "malformed
//! query" rejection, performed before search starts.

use chrono::NaiveDate;

use crate::error::QueryError;
use crate::model::Time;

/// A single RAPTOR query. Construct with [`Query::new`], which performs
/// the malformed-query checks from spec §7; everything else (unknown
/// stop ids, missing calendar entries) is resolved lazily by the search
/// and is not an error.
#[derive(Debug, Clone)]
pub struct Query {
    pub origin_stop_ids: Vec<String>,
    pub destination_stop_ids: Vec<String>,
    pub specified_date: NaiveDate,
    pub specified_secs: Time,
    pub transfers_limit: u32,
    pub is_reverse_search: bool,
    pub available_trip_ids: Option<Vec<String>>,
    /// When `true`, an unknown stop_id in `origin_stop_ids` or
    /// `destination_stop_ids` is rejected instead of silently treated
    /// as unreachable (spec §7: "A strict-mode option may be offered").
    pub strict: bool,
}

impl Query {
    /// Validate and build a query.
    ///
    /// # Errors
    ///
    /// [`QueryError::EmptyOrigins`] if `origin_stop_ids` is empty;
    /// [`QueryError::InvalidDate`] if `specified_date` fails to parse;
    /// [`QueryError::NegativeSecs`] if `specified_secs` is negative.
    pub fn new(
        origin_stop_ids: Vec<String>,
        destination_stop_ids: Vec<String>,
        specified_date: &str,
        specified_secs: Time,
        transfers_limit: u32,
        is_reverse_search: bool,
        available_trip_ids: Option<Vec<String>>,
    ) -> Result<Self, QueryError> {
        if origin_stop_ids.is_empty() {
            return Err(QueryError::EmptyOrigins);
        }
        if specified_secs < 0 {
            return Err(QueryError::NegativeSecs(specified_secs));
        }
        let specified_date = specified_date
            .parse::<NaiveDate>()
            .map_err(|_| QueryError::InvalidDate(specified_date.to_string()))?;

        Ok(Self {
            origin_stop_ids,
            destination_stop_ids,
            specified_date,
            specified_secs,
            transfers_limit,
            is_reverse_search,
            available_trip_ids,
            strict: false,
        })
    }

    /// Enable strict mode (see [`Query::strict`]).
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn direction(&self) -> crate::model::Direction {
        if self.is_reverse_search {
            crate::model::Direction::Reverse
        } else {
            crate::model::Direction::Forward
        }
    }
}
