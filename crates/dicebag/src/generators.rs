//! Built-in bounded generators for numbers, dates, money, places and identifiers.
//!
//! Each generator is a thin layer over the uniform source. The registry
//! exposes all of them by name for weighted dispatch.

use crate::config::{parse_clock, parse_date};
use crate::error::{RandomError, Result};
use crate::identifier::{Cnpj, Cpf};
use crate::locale::{strip_honorifics, BRAZILIAN_STATES, NEIGHBORHOODS};
use crate::random::{Operation, Random};
use crate::weighted::WeightEntry;
use chrono::{Duration, Local, NaiveDate, NaiveTime, Timelike, Utc};
use serde_json::Value;

/// Scale used by `lat_long`: five decimal places.
const COORDINATE_SCALE: i64 = 100_000;

/// Largest supported `code` length; `10^18 - 1` still fits in an `i64`.
const MAX_CODE_LENGTH: u32 = 18;

/// Largest supported decimal precision for `float`.
const MAX_PRECISION: u32 = 9;

/// Identity: returns the first parameter, or `null` when there is none.
pub fn echo(params: &[Value]) -> Result<Value> {
    Ok(params.first().cloned().unwrap_or(Value::Null))
}

impl Random {
    /// `true` with probability `chance_to_true` percent.
    pub fn boolean(&self, chance_to_true: i64) -> bool {
        self.source.int_in_range(1, 100) <= chance_to_true
    }

    /// Three random digits followed by the current Unix time in microseconds.
    pub fn unique_code(&self) -> String {
        format!(
            "{}{}",
            self.source.int_in_range(100, 999),
            Utc::now().timestamp_micros()
        )
    }

    /// A number with exactly `length` digits.
    pub fn code(&self, length: u32) -> Result<i64> {
        if !(1..=MAX_CODE_LENGTH).contains(&length) {
            return Err(RandomError::invalid_argument(format!(
                "code length must be between 1 and {}, got {}",
                MAX_CODE_LENGTH, length
            )));
        }
        let low = 10i64.pow(length - 1);
        let high = 10i64.pow(length) - 1;
        Ok(self.source.int_in_range(low, high))
    }

    /// Integer uniformly distributed over `[min, max]`.
    pub fn int(&self, min: i64, max: i64) -> Result<i64> {
        if min > max {
            return Err(RandomError::invalid_argument(format!(
                "min {} is greater than max {}",
                min, max
            )));
        }
        Ok(self.source.int_in_range(min, max))
    }

    /// Day uniformly distributed over `[start, end]`.
    ///
    /// `start` defaults to the configured `date_start`, `end` to today.
    pub fn date(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<NaiveDate> {
        let start = match start {
            Some(date) => date,
            None => parse_date(&self.config.date_start).ok_or_else(|| {
                RandomError::invalid_argument(format!(
                    "configured date_start '{}' is not a date",
                    self.config.date_start
                ))
            })?,
        };
        let end = end.unwrap_or_else(|| Local::now().date_naive());
        if start > end {
            return Err(RandomError::invalid_argument(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }

        let offset = self.source.int_in_range(0, (end - start).num_days());
        Ok(start + Duration::days(offset))
    }

    /// Clock time uniformly distributed, to the second, over `[start, end]`.
    ///
    /// Bounds default to the configured `time_start` and `time_end`.
    pub fn time(&self, start: Option<NaiveTime>, end: Option<NaiveTime>) -> Result<NaiveTime> {
        let start = match start {
            Some(time) => time,
            None => configured_clock(&self.config.time_start, "time_start", false)?,
        };
        let end = match end {
            Some(time) => time,
            None => configured_clock(&self.config.time_end, "time_end", true)?,
        };
        if start > end {
            return Err(RandomError::invalid_argument(format!(
                "start time {} is after end time {}",
                start, end
            )));
        }

        let secs = self.source.int_in_range(
            i64::from(start.num_seconds_from_midnight()),
            i64::from(end.num_seconds_from_midnight()),
        );
        NaiveTime::from_num_seconds_from_midnight_opt(secs as u32, 0)
            .ok_or_else(|| RandomError::invalid_argument(format!("{} seconds is not a time", secs)))
    }

    /// Real in `[min, max]` with `precision` decimal places.
    pub fn float(&self, min: f64, max: f64, precision: u32) -> Result<f64> {
        if precision > MAX_PRECISION {
            return Err(RandomError::invalid_argument(format!(
                "precision must be at most {}, got {}",
                MAX_PRECISION, precision
            )));
        }
        let scale = 10f64.powi(precision as i32);
        let low = (min * scale).ceil();
        let high = (max * scale).floor();
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(RandomError::invalid_argument(format!(
                "no value with {} decimals lies in [{}, {}]",
                precision, min, max
            )));
        }
        if low < i64::MIN as f64 || high > i64::MAX as f64 {
            return Err(RandomError::invalid_argument(format!(
                "range [{}, {}] is too wide for {} decimals",
                min, max, precision
            )));
        }
        Ok(self.source.int_in_range(low as i64, high as i64) as f64 / scale)
    }

    /// Monetary amount in `[min, max]`.
    ///
    /// Without `multiple_of` the amount has two decimals. With it, the amount is
    /// whole and, when `multiple_of` is positive, rounded to the nearest multiple.
    pub fn money(&self, min: f64, max: f64, multiple_of: Option<f64>) -> Result<f64> {
        let precision = if multiple_of.is_some() { 0 } else { 2 };
        let value = self.float(min, max, precision)?;
        match multiple_of {
            Some(step) if step > 0.0 => Ok((value / step).round() * step),
            _ => Ok(value),
        }
    }

    /// Weighted pick of a plain value: each entry's first parameter is returned as-is.
    pub fn jan_ken_pon(&self, entries: &[WeightEntry]) -> Result<Option<Value>> {
        self.generate(Operation::Callable(&echo), entries)
    }

    /// Uniform pick from `values`; `None` when empty.
    pub fn dice(&self, values: &[Value]) -> Option<Value> {
        if values.is_empty() {
            return None;
        }
        let idx = self.source.int_in_range(0, values.len() as i64 - 1);
        values.get(idx as usize).cloned()
    }

    /// Coordinate in `[min, max]` degrees with five decimals.
    pub fn lat_long(&self, min: i64, max: i64) -> Result<f64> {
        let low = min.checked_mul(COORDINATE_SCALE);
        let high = max.checked_mul(COORDINATE_SCALE);
        let (Some(low), Some(high)) = (low, high) else {
            return Err(RandomError::invalid_argument(format!(
                "coordinate bounds [{}, {}] are out of range",
                min, max
            )));
        };
        let value = self.int(low, high)?;
        Ok(value as f64 / COORDINATE_SCALE as f64)
    }

    /// Full person name without honorifics, for `locale` or the configured default.
    pub fn name(&self, locale: Option<&str>) -> String {
        let locale = locale.unwrap_or(&self.config.locale);
        strip_honorifics(&self.locale.full_name(locale, self.source.as_ref()))
    }

    /// Valid CPF, 11 digits.
    pub fn cpf(&self) -> String {
        Cpf::random(self.source.as_ref()).to_string()
    }

    /// Valid CNPJ, 14 digits.
    pub fn cnpj(&self) -> String {
        Cnpj::random(self.source.as_ref()).to_string()
    }

    /// Brazilian postcode (CEP), digits only.
    pub fn cep(&self) -> String {
        self.locale
            .postcode("pt_BR", self.source.as_ref())
            .chars()
            .filter(char::is_ascii_digit)
            .collect()
    }

    /// Brazilian state code.
    pub fn uf(&self) -> &'static str {
        let idx = self.source.int_in_range(0, BRAZILIAN_STATES.len() as i64 - 1);
        BRAZILIAN_STATES[idx as usize]
    }

    /// Neighborhood name.
    pub fn bairro(&self) -> &'static str {
        let idx = self.source.int_in_range(0, NEIGHBORHOODS.len() as i64 - 1);
        NEIGHBORHOODS[idx as usize]
    }
}

fn configured_clock(value: &str, field: &str, end_of_minute: bool) -> Result<NaiveTime> {
    parse_clock(value, end_of_minute).ok_or_else(|| {
        RandomError::invalid_argument(format!("configured {} '{}' is not a time", field, value))
    })
}
