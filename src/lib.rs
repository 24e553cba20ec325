mod aggregate;
mod band;
pub mod csv_out;
mod error;
mod guides;
mod model;
mod options;
mod page;
pub mod pdf_json;
pub mod pdf_reader;
mod resolve;
mod table;
mod text;
mod warning;

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::guides::classify_guides;
use crate::resolve::resolve_cells;
use crate::table::build_table;
use crate::text::normalize_tokens;

pub use aggregate::aggregate_entries;
pub use band::{Axis, Band};
pub use error::{MenuError, ReferenceTarget};
pub use guides::Guides;
pub use model::{
    Anchor, CORNER_MARKER, Cell, Corner, DateMarker, GuideLine, Meal, MealKind, MealSlot,
    MenuEntry, TextUnit,
};
pub use options::{OutputFormat, OutputMode, ParseOptions, parse_day};
pub use page::{Page, Rect, TextToken};
pub use resolve::nearest_preceding;
pub use table::TableLayout;
pub use warning::{ParseWarning, WarningCode};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuReport {
    pub layout: TableLayout,
    pub dates: Vec<DateMarker>,
    pub entries: Vec<MenuEntry>,
    pub warnings: Vec<ParseWarning>,
}

pub fn analyze(page: &Page, options: &ParseOptions) -> Result<MenuReport, MenuError> {
    let mut warnings = Vec::new();

    let colored = page.rectangles.iter().filter(|rect| rect.has_color).count();
    if colored > 0 {
        warnings.push(
            ParseWarning::new(
                WarningCode::ColoredFillsIgnored,
                "colored fills are treated as decoration, not table rules",
            )
            .with_count(colored),
        );
    }

    let guides = classify_guides(&page.rectangles);
    let texts = normalize_tokens(&page.text_tokens);
    debug!(
        rows = guides.rows.len(),
        columns = guides.columns.len(),
        texts = texts.len(),
        "page primitives classified"
    );

    let layout = build_table(&guides, &texts)?;
    if layout.is_empty() {
        warn!("no menu table found on page");
        warnings.push(ParseWarning::new(
            WarningCode::NoTableDetected,
            "page has no ruled table with content",
        ));
    } else if layout.meals.is_empty() {
        warnings.push(ParseWarning::new(
            WarningCode::NoMealHeaders,
            "meal header column is empty",
        ));
    }

    let resolution = resolve_cells(&layout, options.effective_year())?;
    if !layout.is_empty() && resolution.dates.is_empty() {
        warnings.push(ParseWarning::new(
            WarningCode::NoDateMarkers,
            "table has no month/day cells",
        ));
    }

    let entries = match options.date {
        Some(day) => resolution
            .entries
            .into_iter()
            .filter(|entry| entry.date == day)
            .collect(),
        None => resolution.entries,
    };

    Ok(MenuReport {
        layout,
        dates: resolution.dates,
        entries,
        warnings,
    })
}

pub fn parse(page: &Page, options: &ParseOptions) -> Result<Vec<MenuEntry>, MenuError> {
    analyze(page, options).map(|report| report.entries)
}

pub fn aggregate(page: &Page, options: &ParseOptions) -> Result<Vec<MealSlot>, MenuError> {
    let unfiltered = ParseOptions {
        date: None,
        ..*options
    };
    let entries = parse(page, &unfiltered)?;
    Ok(aggregate_entries(&entries))
}

pub fn read_page(input: &Path) -> Result<Page, MenuError> {
    let is_json = input
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));

    if is_json {
        let json = std::fs::read_to_string(input)?;
        pdf_json::page_from_json(&json)
    } else {
        pdf_reader::read_first_page(input)
    }
}

#[cfg(test)]
mod tests {
    use super::{ParseOptions, WarningCode, aggregate, analyze, parse};
    use crate::page::{Page, Rect, TextToken};

    #[test]
    fn empty_page_is_an_empty_result() {
        let report = analyze(&Page::default(), &ParseOptions::default()).expect("no error");
        assert!(report.entries.is_empty());
        assert_eq!(report.warnings[0].code, WarningCode::NoTableDetected);
        assert!(aggregate(&Page::default(), &ParseOptions::default())
            .expect("no error")
            .is_empty());
    }

    #[test]
    fn text_without_rules_is_not_a_table() {
        let page = Page {
            rectangles: vec![Rect::new(0.0, 0.0, 100.0, 40.0).colored()],
            text_tokens: vec![TextToken::new(10.0, 10.0, "03/15")],
        };

        let report = analyze(&page, &ParseOptions::default()).expect("no error");
        let codes = report.warnings.iter().map(|w| w.code).collect::<Vec<_>>();
        assert_eq!(
            codes,
            vec![WarningCode::ColoredFillsIgnored, WarningCode::NoTableDetected]
        );
        assert!(parse(&page, &ParseOptions::default()).expect("no error").is_empty());
    }
}
