use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown output format '{other}', expected json or csv")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Entries,
    Slots,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    // `None` means the current local year.
    pub year: Option<i32>,
    pub date: Option<NaiveDate>,
}

impl ParseOptions {
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn effective_year(&self) -> i32 {
        self.year.unwrap_or_else(|| Local::now().year())
    }
}

pub fn parse_day(value: &str) -> Result<NaiveDate, String> {
    let trimmed = value.trim();
    let day_part = trimmed
        .split_once(['T', ' '])
        .map_or(trimmed, |(day, _)| day);
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d")
        .map_err(|error| format!("invalid date '{value}': {error}"))
}
