use chrono::{Local, NaiveDateTime};

pub(crate) trait Clock {
    fn now(&self) -> NaiveDateTime;
}

pub(crate) struct LocalClock {}

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
