/// Age filter — decides which directories a scan visits and which files it keeps.
///
/// A [`FilterConfig`] is fixed before a scan starts and is only read while
/// the scan runs.
use crate::model::FileRecord;
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

/// Direction of the age comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Period {
    /// Keep files whose timestamp is strictly before the reference date.
    #[default]
    OlderThan,
    /// Keep files whose timestamp is strictly after the reference date.
    NewerThan,
}

/// Which timestamp of a record the filter compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateField {
    #[default]
    Modified,
    Accessed,
    Created,
}

impl DateField {
    fn of(self, record: &FileRecord) -> DateTime<Local> {
        match self {
            Self::Modified => record.modified(),
            Self::Accessed => record.accessed(),
            Self::Created => record.created(),
        }
    }
}

/// Filter settings for one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// When `false`, every file passes regardless of age.
    pub enabled: bool,
    pub period: Period,
    pub reference_date: DateTime<Local>,
    /// Timestamp compared against `reference_date`.
    #[serde(default)]
    pub field: DateField,
    /// Whether subdirectories are visited.
    pub recurse: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

impl FilterConfig {
    /// No age filtering, top-level directory only.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            period: Period::OlderThan,
            reference_date: Local::now(),
            field: DateField::Modified,
            recurse: false,
        }
    }

    /// Keep files modified strictly before `reference_date`.
    pub fn older_than(reference_date: DateTime<Local>) -> Self {
        Self {
            enabled: true,
            period: Period::OlderThan,
            reference_date,
            ..Self::disabled()
        }
    }

    /// Keep files modified strictly after `reference_date`.
    pub fn newer_than(reference_date: DateTime<Local>) -> Self {
        Self {
            enabled: true,
            period: Period::NewerThan,
            reference_date,
            ..Self::disabled()
        }
    }

    pub fn with_recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }

    pub fn with_field(mut self, field: DateField) -> Self {
        self.field = field;
        self
    }

    /// Use local midnight at the start of `day` as the reference date.
    ///
    /// When midnight does not exist locally (a DST gap) the earliest valid
    /// instant of that day is used. Returns `self` unchanged if the day has
    /// no representable local time at all.
    pub fn with_reference_day(mut self, day: NaiveDate) -> Self {
        if let Some(start) = local_start_of_day(day) {
            self.reference_date = start;
        }
        self
    }

    /// Whether `record` should be kept.
    ///
    /// Equal timestamps never pass: both directions are strict.
    pub fn passes(&self, record: &FileRecord) -> bool {
        if !self.enabled {
            return true;
        }
        let stamp = self.field.of(record);
        match self.period {
            Period::OlderThan => stamp < self.reference_date,
            Period::NewerThan => stamp > self.reference_date,
        }
    }
}

/// First valid local instant of `day`.
pub fn local_start_of_day(day: NaiveDate) -> Option<DateTime<Local>> {
    // Walk forward in 15-minute steps to skip over a DST gap at midnight.
    (0..8).find_map(|step| {
        let naive = day.and_hms_opt(0, 0, 0)? + chrono::Duration::minutes(15 * step);
        Local.from_local_datetime(&naive).earliest()
    })
}
