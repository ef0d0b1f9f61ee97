//! Reduces the provider's 3-hourly series to daily and hourly views.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use std::collections::BTreeMap;

use crate::{
    model::{DailyForecastEntry, ForecastSample, HourlyEntry, TempRange},
    units::{fraction_to_percent, round_whole},
};

/// Days shown in the forecast strip.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Samples shown in the hourly strip.
pub const MAX_HOURLY_ENTRIES: usize = 24;

/// Running state for one calendar date. Everything but the temperature range
/// is taken from the first sample seen for that date.
#[derive(Debug)]
struct DayAccumulator<'a> {
    first: &'a ForecastSample,
    min: f64,
    max: f64,
}

impl<'a> DayAccumulator<'a> {
    fn new(first: &'a ForecastSample) -> Self {
        Self { first, min: first.temp, max: first.temp }
    }

    fn push(&mut self, sample: &ForecastSample) {
        self.min = self.min.min(sample.temp);
        self.max = self.max.max(sample.temp);
    }

    fn finish(self, date: NaiveDate) -> DailyForecastEntry {
        let first = self.first;
        DailyForecastEntry {
            date,
            temp: TempRange { min: round_whole(self.min), max: round_whole(self.max) },
            main: first.main.clone(),
            description: first.description.clone(),
            icon: first.icon.clone(),
            humidity: first.humidity,
            wind_speed: first.wind_speed,
            wind_direction: first.wind_direction,
            pressure: first.pressure,
            pop: fraction_to_percent(first.pop),
            uv_index: None,
        }
    }
}

/// Group samples by their calendar date in `tz`, oldest first, at most
/// [`MAX_FORECAST_DAYS`] days. Short series give fewer days.
pub fn aggregate_daily<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> Vec<DailyForecastEntry> {
    let mut days: BTreeMap<NaiveDate, DayAccumulator<'_>> = BTreeMap::new();

    for sample in samples {
        let Some(utc) = DateTime::from_timestamp(sample.dt, 0) else {
            tracing::warn!(dt = sample.dt, "Skipping forecast sample with unrepresentable timestamp");
            continue;
        };
        let date = utc.with_timezone(tz).date_naive();

        days.entry(date)
            .and_modify(|day| day.push(sample))
            .or_insert_with(|| DayAccumulator::new(sample));
    }

    days.into_iter()
        .take(MAX_FORECAST_DAYS)
        .map(|(date, day)| day.finish(date))
        .collect()
}

/// [`aggregate_daily`] in the machine's local time zone.
///
/// Day boundaries therefore follow where the program runs, not the searched
/// location.
pub fn daily_forecast(samples: &[ForecastSample]) -> Vec<DailyForecastEntry> {
    aggregate_daily(samples, &Local)
}

/// The first [`MAX_HOURLY_ENTRIES`] samples at the provider's own cadence.
pub fn hourly_entries(samples: &[ForecastSample]) -> Vec<HourlyEntry> {
    samples
        .iter()
        .take(MAX_HOURLY_ENTRIES)
        .filter_map(|s| {
            let time = DateTime::from_timestamp(s.dt, 0)?;
            Some(HourlyEntry {
                time,
                temp: round_whole(s.temp),
                feels_like: round_whole(s.feels_like),
                description: s.description.clone(),
                icon: s.icon.clone(),
                humidity: s.humidity,
                wind_speed: s.wind_speed,
                wind_direction: s.wind_direction,
                pop: fraction_to_percent(s.pop),
                pressure: s.pressure,
            })
        })
        .collect()
}
