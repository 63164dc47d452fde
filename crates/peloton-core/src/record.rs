// File: crates/peloton-core/src/record.rs
// Summary: Record model (year, race time, doping note), dataset parsing and domain bounds.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Elapsed race time with one-second resolution.
///
/// Parsed from `"MM:SS"`; minutes are unbounded, seconds must be `00..=59`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RaceTime(u32);

impl RaceTime {
    pub const fn from_seconds(total: u32) -> Self {
        Self(total)
    }

    pub fn from_min_sec(minutes: u32, seconds: u32) -> Option<Self> {
        if seconds >= 60 {
            return None;
        }
        minutes.checked_mul(60)?.checked_add(seconds).map(Self)
    }

    pub const fn total_seconds(&self) -> u32 {
        self.0
    }

    pub const fn minutes(&self) -> u32 {
        self.0 / 60
    }

    pub const fn seconds(&self) -> u32 {
        self.0 % 60
    }

    /// Fixed-epoch timestamp: 1970-01-01T00:00:00 plus the elapsed time.
    pub fn timestamp(&self) -> NaiveDateTime {
        NaiveDateTime::default() + chrono::Duration::seconds(i64::from(self.0))
    }
}

impl FromStr for RaceTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bad = || Error::Format(format!("invalid race time {s:?}, expected MM:SS"));
        let (mm, ss) = s.trim().split_once(':').ok_or_else(bad)?;
        let digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
        if !digits(mm) || ss.len() != 2 || !digits(ss) {
            return Err(bad());
        }
        let minutes: u32 = mm.parse().map_err(|_| bad())?;
        let seconds: u32 = ss.parse().map_err(|_| bad())?;
        Self::from_min_sec(minutes, seconds).ok_or_else(bad)
    }
}

impl fmt::Display for RaceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes(), self.seconds())
    }
}

/// Doping classification of a record. Drives mark and legend colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Alleged,
    Clean,
}

/// One cyclist's observation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub year: i32,
    pub time: RaceTime,
    /// `None` when the source field was absent, null or blank.
    pub doping: Option<String>,
    pub name: Option<String>,
    pub nationality: Option<String>,
}

impl Record {
    pub fn new(year: i32, time: RaceTime, doping: impl Into<String>) -> Self {
        Self {
            year,
            time,
            doping: non_blank(Some(doping.into())),
            name: None,
            nationality: None,
        }
    }

    pub fn with_rider(mut self, name: impl Into<String>, nationality: impl Into<String>) -> Self {
        self.name = non_blank(Some(name.into()));
        self.nationality = non_blank(Some(nationality.into()));
        self
    }

    pub fn category(&self) -> Category {
        match self.doping {
            Some(_) => Category::Alleged,
            None => Category::Clean,
        }
    }
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

/// Wire shape of one element of the JSON array.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Doping", default)]
    doping: Option<String>,
    #[serde(rename = "Name", default)]
    name: Option<String>,
    #[serde(rename = "Nationality", default)]
    nationality: Option<String>,
}

impl TryFrom<RawRecord> for Record {
    type Error = Error;

    fn try_from(raw: RawRecord) -> Result<Self> {
        Ok(Self {
            year: raw.year,
            time: raw.time.parse()?,
            doping: non_blank(raw.doping),
            name: non_blank(raw.name),
            nationality: non_blank(raw.nationality),
        })
    }
}

/// An element of the payload that was dropped while loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: String,
}

/// Min/max of year and time across a dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomainBounds {
    pub min_year: i32,
    pub max_year: i32,
    pub min_time: RaceTime,
    pub max_time: RaceTime,
}

impl DomainBounds {
    /// Single linear scan; `None` for an empty slice.
    pub fn from_records(records: &[Record]) -> Option<Self> {
        let (first, rest) = records.split_first()?;
        let mut b = Self {
            min_year: first.year,
            max_year: first.year,
            min_time: first.time,
            max_time: first.time,
        };
        for r in rest {
            b.min_year = b.min_year.min(r.year);
            b.max_year = b.max_year.max(r.year);
            b.min_time = b.min_time.min(r.time);
            b.max_time = b.max_time.max(r.time);
        }
        Some(b)
    }
}

/// Immutable, ordered set of records. Render order is dataset order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<Record>,
    skipped: Vec<SkippedRecord>,
    bounds: Option<DomainBounds>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        let bounds = DomainBounds::from_records(&records);
        Self { records, skipped: Vec::new(), bounds }
    }

    /// Parse the JSON array payload.
    ///
    /// A payload that is not an array fails the whole load. Elements with a
    /// missing or malformed `Year`/`Time` are skipped and reported through
    /// [`Dataset::skipped`].
    pub fn from_json(payload: &str) -> Result<Self> {
        Self::from_slice(payload.as_bytes())
    }

    /// Like [`Dataset::from_json`] over raw bytes; invalid UTF-8 is a format error.
    pub fn from_slice(payload: &[u8]) -> Result<Self> {
        let items: Vec<serde_json::Value> = serde_json::from_slice(payload)?;
        let mut records = Vec::with_capacity(items.len());
        let mut skipped = Vec::new();
        for (index, item) in items.into_iter().enumerate() {
            let parsed = serde_json::from_value::<RawRecord>(item)
                .map_err(Error::from)
                .and_then(Record::try_from);
            match parsed {
                Ok(r) => records.push(r),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping malformed record");
                    skipped.push(SkippedRecord { index, reason: e.to_string() });
                }
            }
        }
        let mut ds = Self::new(records);
        ds.skipped = skipped;
        Ok(ds)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }

    pub fn bounds(&self) -> Option<DomainBounds> {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }
}
