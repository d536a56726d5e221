use chrono::NaiveDateTime;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) enum FeedingState {
    Unfed,
    // Fed until the next reset boundary
    Fed { until: NaiveDateTime },
}

impl FeedingState {
    pub(crate) fn is_fed(&self) -> bool {
        matches!(self, FeedingState::Fed { .. })
    }
}
