//! Resolution of optional listing filters into a single query.

use chrono::{DateTime, Utc};

use super::OrderStatus;

/// The query an order listing request resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderQuery {
    /// Filter by status alone.
    ByStatus(OrderStatus),
    /// Filter by creation time within `[start, end]` inclusive.
    ByPeriod {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// No filter.
    All,
}

impl OrderQuery {
    /// Picks the applicable filter from optional request parameters.
    ///
    /// Precedence: a status filter wins outright; otherwise a date range is
    /// used only when both bounds are present. Status and period are mutually
    /// exclusive: a request supplying both gets the status filter only. This
    /// mirrors the long-standing listing behavior and is kept as a known
    /// limitation rather than silently combined into an AND.
    pub fn resolve(
        status: Option<OrderStatus>,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        if let Some(status) = status {
            OrderQuery::ByStatus(status)
        } else if let (Some(start), Some(end)) = (start, end) {
            OrderQuery::ByPeriod { start, end }
        } else {
            OrderQuery::All
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, h, 0, 0).unwrap()
    }

    #[test]
    fn no_parameters_resolves_to_all() {
        assert_eq!(OrderQuery::resolve(None, None, None), OrderQuery::All);
    }

    #[test]
    fn status_alone_filters_by_status() {
        assert_eq!(
            OrderQuery::resolve(Some(OrderStatus::Confirmado), None, None),
            OrderQuery::ByStatus(OrderStatus::Confirmado)
        );
    }

    #[test]
    fn full_range_filters_by_period() {
        assert_eq!(
            OrderQuery::resolve(None, Some(ts(8)), Some(ts(18))),
            OrderQuery::ByPeriod {
                start: ts(8),
                end: ts(18)
            }
        );
    }

    #[test]
    fn half_open_range_is_ignored() {
        assert_eq!(OrderQuery::resolve(None, Some(ts(8)), None), OrderQuery::All);
        assert_eq!(OrderQuery::resolve(None, None, Some(ts(18))), OrderQuery::All);
    }

    #[test]
    fn status_wins_over_period() {
        assert_eq!(
            OrderQuery::resolve(Some(OrderStatus::Pendente), Some(ts(8)), Some(ts(18))),
            OrderQuery::ByStatus(OrderStatus::Pendente)
        );
    }
}
