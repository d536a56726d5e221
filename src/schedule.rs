use chrono::{Days, NaiveDateTime, NaiveTime};
use std::fmt;

/// The two daily boundaries after which the pet counts as hungry again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResetSchedule {
    morning: NaiveTime,
    evening: NaiveTime,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ScheduleError {
    MorningNotBeforeEvening {
        morning: NaiveTime,
        evening: NaiveTime,
    },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::MorningNotBeforeEvening { morning, evening } => write!(
                f,
                "morning reset {morning} must be earlier than evening reset {evening}"
            ),
        }
    }
}

impl std::error::Error for ScheduleError {}

impl ResetSchedule {
    pub(crate) fn new(morning: NaiveTime, evening: NaiveTime) -> Result<Self, ScheduleError> {
        if morning >= evening {
            return Err(ScheduleError::MorningNotBeforeEvening { morning, evening });
        }
        Ok(Self { morning, evening })
    }

    pub(crate) fn morning(&self) -> NaiveTime {
        self.morning
    }

    pub(crate) fn evening(&self) -> NaiveTime {
        self.evening
    }

    /// Today's evening boundary, or tomorrow's morning one once the evening
    /// boundary has passed. Times before this morning's boundary still map to
    /// this evening.
    pub(crate) fn calculate_next_reset(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date();
        let evening = NaiveDateTime::new(today, self.evening);

        if now < evening {
            return evening;
        }

        // Only fails at the very end of chrono's representable range
        let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
        NaiveDateTime::new(tomorrow, self.morning)
    }
}

impl Default for ResetSchedule {
    fn default() -> Self {
        Self {
            morning: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or_default(),
            evening: NaiveTime::from_hms_opt(16, 30, 0).unwrap_or_default(),
        }
    }
}
