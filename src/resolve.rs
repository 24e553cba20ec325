use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::error::{MenuError, ReferenceTarget};
use crate::model::{Cell, DateMarker, MenuEntry};
use crate::table::TableLayout;
use crate::text::clean_lines;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)/([0-9]+)").expect("hardcoded date regex is valid"));

// Candidates arrive sorted along the searched axis; ties go to the later one.
pub fn nearest_preceding<T, F>(candidates: &[T], predicate: F) -> Option<&T>
where
    F: Fn(&T) -> bool,
{
    candidates
        .iter()
        .fold(None, |found, candidate| {
            if predicate(candidate) {
                Some(candidate)
            } else {
                found
            }
        })
}

pub(crate) fn parse_month_day(text: &str, year: i32) -> Result<Option<NaiveDate>, MenuError> {
    let Some(captures) = DATE_RE.captures(text) else {
        return Ok(None);
    };

    let invalid = || MenuError::InvalidDate {
        text: captures[0].to_string(),
    };
    let month = captures[1].parse::<u32>().map_err(|_| invalid())?;
    let day = captures[2].parse::<u32>().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day)
        .map(Some)
        .ok_or_else(invalid)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resolution {
    pub dates: Vec<DateMarker>,
    pub entries: Vec<MenuEntry>,
}

fn unresolved(target: ReferenceTarget, cell: &Cell) -> MenuError {
    MenuError::UnresolvedReference {
        target,
        x: cell.x,
        y: cell.y,
    }
}

pub(crate) fn resolve_cells(layout: &TableLayout, year: i32) -> Result<Resolution, MenuError> {
    let mut dates = Vec::new();
    let mut pending = Vec::new();

    for cell in &layout.cells {
        let lines = clean_lines(&cell.texts);
        match parse_month_day(&lines.concat(), year)? {
            Some(date) => dates.push(DateMarker {
                x: cell.x,
                y: cell.y,
                date,
            }),
            None => pending.push((cell, lines)),
        }
    }

    let mut entries = Vec::with_capacity(pending.len());
    for (cell, lines) in pending {
        let date = nearest_preceding(&dates, |marker| marker.x <= cell.x)
            .ok_or_else(|| unresolved(ReferenceTarget::Date, cell))?;
        let corner = nearest_preceding(&layout.corners, |corner| corner.y <= cell.y)
            .ok_or_else(|| unresolved(ReferenceTarget::Corner, cell))?;

        let meal = corner.meal.clone();
        entries.push(MenuEntry {
            x: cell.x,
            y: cell.y,
            text: lines.join("\n"),
            lines,
            start_date_time: date.date.and_time(meal.start_time),
            end_date_time: date.date.and_time(meal.end_time),
            date: date.date,
            corner: corner.clone(),
            meal,
        });
    }

    debug!(
        dates = dates.len(),
        entries = entries.len(),
        "cells resolved"
    );

    Ok(Resolution { dates, entries })
}
