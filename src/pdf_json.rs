use serde::Deserialize;

use crate::error::MenuError;
use crate::page::{Page, Rect, TextToken};

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(rename = "formImage")]
    form_image: Option<FormImage>,
    #[serde(rename = "Pages", default)]
    pages: Vec<RawPage>,
}

#[derive(Debug, Deserialize)]
struct FormImage {
    #[serde(rename = "Pages", default)]
    pages: Vec<RawPage>,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(rename = "Fills")]
    fills: Option<Vec<Fill>>,
    #[serde(rename = "Texts")]
    texts: Option<Vec<RawText>>,
}

#[derive(Debug, Deserialize)]
struct Fill {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    clr: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawText {
    x: f64,
    y: f64,
    sw: Option<f64>,
    #[serde(rename = "R", default)]
    runs: Vec<TextRun>,
}

#[derive(Debug, Deserialize)]
struct TextRun {
    #[serde(rename = "T", default)]
    text: String,
}

impl From<&Fill> for Rect {
    fn from(fill: &Fill) -> Self {
        Self {
            x: fill.x,
            y: fill.y,
            w: fill.w,
            h: fill.h,
            // pdf2json writes 0 for black and -1 for custom colors.
            has_color: fill.clr.is_some_and(|clr| clr != 0),
        }
    }
}

impl From<&RawText> for TextToken {
    fn from(text: &RawText) -> Self {
        Self {
            x: text.x,
            y: text.y,
            raw_text: text
                .runs
                .first()
                .map(|run| run.text.clone())
                .unwrap_or_default(),
            encoding_offset: text.sw,
        }
    }
}

pub fn page_from_json(json: &str) -> Result<Page, MenuError> {
    let document: Document = serde_json::from_str(json)?;
    let first = document
        .form_image
        .and_then(|form| form.pages.into_iter().next())
        .or_else(|| document.pages.into_iter().next())
        .ok_or(MenuError::DocumentAbsent)?;

    let (Some(fills), Some(texts)) = (first.fills, first.texts) else {
        return Ok(Page::default());
    };

    Ok(Page {
        rectangles: fills.iter().map(Rect::from).collect(),
        text_tokens: texts.iter().map(TextToken::from).collect(),
    })
}
