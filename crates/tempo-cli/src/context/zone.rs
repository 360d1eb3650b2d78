//! Timezone used to place timesheets on calendar days.

use std::fmt::Display;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone, Utc};
use tempo_config::{ExportFormat, GeneralConfig};
use tempo_core::hours::{CLOCK_FORMAT, DATE_FORMAT};
use tempo_core::report::{DailyHours, TimesheetRecord, group_by_date};
use tempo_export::{ExportError, ExportSummary, ProjectPaths, export_timesheet};

/// `general.timezone_offset_hours` when set, the system timezone otherwise.
#[derive(Debug, Clone, Copy)]
pub enum Zone {
    Fixed(FixedOffset),
    Local,
}

impl Zone {
    pub fn from_config(general: &GeneralConfig) -> anyhow::Result<Self> {
        Ok(general
            .timezone_offset()?
            .map_or(Self::Local, Self::Fixed))
    }

    pub fn today(self) -> NaiveDate {
        match self {
            Self::Fixed(tz) => Utc::now().with_timezone(&tz).date_naive(),
            Self::Local => Local::now().date_naive(),
        }
    }

    /// `%H:%M` of `at` in this zone.
    pub fn clock(self, at: DateTime<Utc>) -> String {
        match self {
            Self::Fixed(tz) => format_in(at, &tz, CLOCK_FORMAT),
            Self::Local => format_in(at, &Local, CLOCK_FORMAT),
        }
    }

    /// `%d/%m/%y` of `at` in this zone.
    pub fn date(self, at: DateTime<Utc>) -> String {
        match self {
            Self::Fixed(tz) => format_in(at, &tz, DATE_FORMAT),
            Self::Local => format_in(at, &Local, DATE_FORMAT),
        }
    }

    pub fn group(self, records: &[TimesheetRecord]) -> Vec<DailyHours> {
        match self {
            Self::Fixed(tz) => group_by_date(records, &tz),
            Self::Local => group_by_date(records, &Local),
        }
    }

    pub fn export(
        self,
        paths: &ProjectPaths,
        format: ExportFormat,
        records: &[TimesheetRecord],
    ) -> Result<ExportSummary, ExportError> {
        match self {
            Self::Fixed(tz) => export_timesheet(paths, format, records, &tz),
            Self::Local => export_timesheet(paths, format, records, &Local),
        }
    }
}

fn format_in<Tz>(at: DateTime<Utc>, tz: &Tz, format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.with_timezone(tz).format(format).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_zone_shifts_clock() {
        let zone = Zone::Fixed(FixedOffset::west_opt(3 * 3600).unwrap());
        let at = Utc.with_ymd_and_hms(2026, 3, 2, 12, 15, 0).unwrap();
        assert_eq!(zone.clock(at), "09:15");
    }

    #[test]
    fn late_utc_start_lands_on_previous_day() {
        let zone = Zone::Fixed(FixedOffset::west_opt(3 * 3600).unwrap());
        let at = Utc.with_ymd_and_hms(2026, 3, 3, 1, 0, 0).unwrap();
        assert_eq!(zone.date(at), "02/03/26");
    }

    #[test]
    fn unset_offset_uses_local_zone() {
        let zone = Zone::from_config(&GeneralConfig::default()).unwrap();
        assert!(matches!(zone, Zone::Local));
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        let general = GeneralConfig {
            timezone_offset_hours: Some(30),
            ..GeneralConfig::default()
        };
        assert!(Zone::from_config(&general).is_err());
    }
}
