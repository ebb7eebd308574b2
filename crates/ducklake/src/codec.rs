// SPDX-License-Identifier: Apache-2.0

//! Conversion of [`Value`]s into SQL literal text and engine bind values,
//! and of engine result values back into [`Value`]s.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike};
use duckdb::types::{TimeUnit, Value as NativeValue};
use rust_decimal::prelude::ToPrimitive;

use crate::error::{DuckLakeError, DuckLakeResult};
use crate::value::Value;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.6f";

/// Render a value as SQL literal text.
///
/// Timestamps are always rendered in UTC with microsecond precision and a
/// literal `Z` suffix.
pub fn encode_literal(value: &Value) -> DuckLakeResult<String> {
    match value {
        Value::Null => Ok("NULL".to_string()),
        Value::Boolean(true) => Ok("true".to_string()),
        Value::Boolean(false) => Ok("false".to_string()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) => Ok(encode_float(*f)),
        Value::Text(s) => Ok(quote_string(s)),
        Value::Timestamp(ts) => Ok(quote_string(&ts.format(TIMESTAMP_FORMAT).to_string())),
        Value::Date(d) => Ok(quote_string(&d.format(DATE_FORMAT).to_string())),
        Value::Time(t) => Ok(quote_string(&t.format(TIME_FORMAT).to_string())),
        other => Err(DuckLakeError::UnsupportedType(other.type_name())),
    }
}

/// Convert a value into the engine's native bind representation
pub fn encode_bind_value(value: &Value) -> DuckLakeResult<NativeValue> {
    match value {
        Value::Null => Ok(NativeValue::Null),
        Value::Boolean(b) => Ok(NativeValue::Boolean(*b)),
        Value::Integer(i) => Ok(NativeValue::BigInt(*i)),
        Value::Float(f) => Ok(NativeValue::Double(*f)),
        Value::Text(s) => Ok(NativeValue::Text(s.clone())),
        Value::Timestamp(ts) => Ok(NativeValue::Timestamp(
            TimeUnit::Microsecond,
            ts.timestamp_micros(),
        )),
        Value::Date(d) => Ok(NativeValue::Date32(days_since_epoch(*d))),
        Value::Time(t) => Ok(NativeValue::Time64(
            TimeUnit::Microsecond,
            micros_since_midnight(*t),
        )),
        other => Err(DuckLakeError::UnsupportedType(other.type_name())),
    }
}

/// Convert a native engine value read from a result row
pub fn decode_value(native: NativeValue) -> DuckLakeResult<Value> {
    let value = match native {
        NativeValue::Null => Value::Null,
        NativeValue::Boolean(b) => Value::Boolean(b),
        NativeValue::TinyInt(i) => Value::Integer(i.into()),
        NativeValue::SmallInt(i) => Value::Integer(i.into()),
        NativeValue::Int(i) => Value::Integer(i.into()),
        NativeValue::BigInt(i) => Value::Integer(i),
        NativeValue::UTinyInt(i) => Value::Integer(i.into()),
        NativeValue::USmallInt(i) => Value::Integer(i.into()),
        NativeValue::UInt(i) => Value::Integer(i.into()),
        NativeValue::UBigInt(i) => Value::from(i),
        NativeValue::HugeInt(i) => match i64::try_from(i) {
            Ok(v) => Value::Integer(v),
            Err(_) => Value::HugeInt(i),
        },
        NativeValue::Float(f) => Value::Float(f.into()),
        NativeValue::Double(f) => Value::Float(f),
        NativeValue::Decimal(d) => Value::Float(d.to_f64().ok_or_else(|| {
            DuckLakeError::UnexpectedResult(format!("decimal {} out of range", d))
        })?),
        NativeValue::Text(s) => Value::Text(s),
        NativeValue::Enum(s) => Value::Text(s),
        NativeValue::Blob(bytes) => Value::Blob(bytes),
        NativeValue::Timestamp(unit, v) => {
            let micros = to_micros(unit, v);
            let ts = DateTime::from_timestamp_micros(micros).ok_or_else(|| {
                DuckLakeError::UnexpectedResult(format!("timestamp {} out of range", micros))
            })?;
            Value::Timestamp(ts)
        }
        NativeValue::Date32(days) => Value::Date(date_from_days(days)?),
        NativeValue::Time64(unit, v) => Value::Time(time_from_micros(to_micros(unit, v))?),
        NativeValue::Interval {
            months,
            days,
            nanos,
        } => Value::Interval {
            months,
            days,
            nanos,
        },
        NativeValue::List(items) | NativeValue::Array(items) => Value::List(
            items
                .into_iter()
                .map(decode_value)
                .collect::<DuckLakeResult<Vec<_>>>()?,
        ),
        NativeValue::Struct(fields) => Value::Struct(
            fields
                .iter()
                .map(|(name, v)| Ok((name.clone(), decode_value(v.clone())?)))
                .collect::<DuckLakeResult<Vec<_>>>()?,
        ),
        NativeValue::Map(entries) => Value::Map(
            entries
                .iter()
                .map(|(k, v)| Ok((decode_value(k.clone())?, decode_value(v.clone())?)))
                .collect::<DuckLakeResult<Vec<_>>>()?,
        ),
        NativeValue::Union(inner) => decode_value(*inner)?,
        #[allow(unreachable_patterns)]
        _ => return Err(DuckLakeError::UnsupportedType("unknown")),
    };
    Ok(value)
}

/// Single-quote a string, doubling embedded quotes
pub(crate) fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn encode_float(f: f64) -> String {
    if f.is_nan() {
        "'NaN'::DOUBLE".to_string()
    } else if f.is_infinite() && f > 0.0 {
        "'Infinity'::DOUBLE".to_string()
    } else if f.is_infinite() {
        "'-Infinity'::DOUBLE".to_string()
    } else {
        f.to_string()
    }
}

fn to_micros(unit: TimeUnit, value: i64) -> i64 {
    match unit {
        TimeUnit::Second => value.saturating_mul(1_000_000),
        TimeUnit::Millisecond => value.saturating_mul(1_000),
        TimeUnit::Microsecond => value,
        TimeUnit::Nanosecond => value / 1_000,
    }
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

fn days_since_epoch(date: NaiveDate) -> i32 {
    // NaiveDate spans roughly +/- 262k years, well inside i32 days
    (date - epoch()).num_days() as i32
}

fn date_from_days(days: i32) -> DuckLakeResult<NaiveDate> {
    epoch()
        .checked_add_signed(Duration::days(days.into()))
        .ok_or_else(|| DuckLakeError::UnexpectedResult(format!("date {} out of range", days)))
}

fn micros_since_midnight(time: NaiveTime) -> i64 {
    // leap seconds are folded into the preceding second
    let micros = (time.nanosecond() % 1_000_000_000) / 1_000;
    i64::from(time.num_seconds_from_midnight()) * 1_000_000 + i64::from(micros)
}

fn time_from_micros(micros: i64) -> DuckLakeResult<NaiveTime> {
    let secs = u32::try_from(micros.div_euclid(1_000_000)).ok();
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    secs.and_then(|secs| NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos))
        .ok_or_else(|| DuckLakeError::UnexpectedResult(format!("time {}us out of range", micros)))
}
