use chrono::{Datelike, Local, NaiveDate};

/// Whole calendar months from `from` to `to`.
///
/// A partial month does not count and dates after `to` yield 0.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> u32 {
    if from >= to {
        return 0;
    }
    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0) as u32
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
