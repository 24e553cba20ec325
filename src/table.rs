use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::band::{Axis, split_bands};
use crate::error::{MenuError, ReferenceTarget};
use crate::guides::Guides;
use crate::model::{Cell, Corner, Meal, MealKind, TextUnit};
use crate::resolve::nearest_preceding;
use crate::text::clean_lines;

static MEAL_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(조식|중식|석식)\((\d{1,2}):(\d{1,2})~(\d{1,2}):(\d{1,2})\)$")
        .expect("hardcoded meal header regex is valid")
});

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableLayout {
    pub meals: Vec<Meal>,
    pub corners: Vec<Corner>,
    pub cells: Vec<Cell>,
}

impl TableLayout {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meals.is_empty() && self.corners.is_empty() && self.cells.is_empty()
    }
}

fn time_of_day(hour: &str, minute: &str) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}

pub(crate) fn parse_meal_header(text: &str, x: f64, y: f64) -> Result<Meal, MenuError> {
    let malformed = || MenuError::MalformedHeader {
        text: text.to_string(),
    };

    let captures = MEAL_HEADER_RE.captures(text).ok_or_else(malformed)?;
    let name = &captures[1];
    let kind = MealKind::from_label(name).ok_or_else(malformed)?;
    let start_time = time_of_day(&captures[2], &captures[3]).ok_or_else(malformed)?;
    let end_time = time_of_day(&captures[4], &captures[5]).ok_or_else(malformed)?;

    Ok(Meal {
        x,
        y,
        kind,
        name: name.to_string(),
        start_time,
        end_time,
    })
}

fn read_meals(
    guides: &Guides,
    header_x: f64,
    header_w: f64,
    texts: &[TextUnit],
) -> Result<Vec<Meal>, MenuError> {
    // Only rules that reach the left edge separate meals; the shorter ones
    // split corners further right.
    let meal_rows = guides
        .rows
        .iter()
        .filter(|row| (row.x - header_w).round() <= header_x)
        .copied()
        .collect::<Vec<_>>();

    split_bands(&meal_rows, texts, Axis::Row)
        .into_iter()
        .map(|band| parse_meal_header(&clean_lines(&band.children).concat(), band.x, band.y))
        .collect()
}

fn read_corners(
    guides: &Guides,
    meals: &[Meal],
    texts: &[TextUnit],
) -> Result<Vec<Corner>, MenuError> {
    split_bands(&guides.rows, texts, Axis::Row)
        .into_iter()
        .map(|band| {
            let meal = nearest_preceding(meals, |meal| meal.y <= band.y).ok_or(
                MenuError::UnresolvedReference {
                    target: ReferenceTarget::Meal,
                    x: band.x,
                    y: band.y,
                },
            )?;

            Ok(Corner {
                x: band.x,
                y: band.y,
                label: clean_lines(&band.children).concat(),
                meal: meal.clone(),
            })
        })
        .collect()
}

pub(crate) fn build_table(guides: &Guides, texts: &[TextUnit]) -> Result<TableLayout, MenuError> {
    if !guides.is_table() {
        debug!(
            rows = guides.rows.len(),
            columns = guides.columns.len(),
            "not enough guides for a table"
        );
        return Ok(TableLayout::default());
    }

    let meals = match split_bands(&guides.columns[..2], texts, Axis::Column)
        .into_iter()
        .next()
    {
        Some(header) => read_meals(guides, header.x, header.w, &header.children)?,
        None => Vec::new(),
    };

    let mut columns = split_bands(&guides.columns[1..], texts, Axis::Column).into_iter();
    let corners = match columns.next() {
        Some(corner_column) => read_corners(guides, &meals, &corner_column.children)?,
        None => Vec::new(),
    };

    let mut cells = Vec::new();
    for column in columns {
        for row in split_bands(&guides.rows, &column.children, Axis::Row) {
            cells.push(Cell {
                x: column.x,
                y: row.y,
                w: column.w,
                h: row.h,
                texts: row.children,
            });
        }
    }

    debug!(
        meals = meals.len(),
        corners = corners.len(),
        cells = cells.len(),
        "table structure built"
    );

    Ok(TableLayout {
        meals,
        corners,
        cells,
    })
}
