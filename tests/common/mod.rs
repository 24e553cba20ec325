#![allow(dead_code)]

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};
use welstory_menu::{Page, Rect, TextToken};

pub const PAGE_HEIGHT: i64 = 842;

pub struct Sheet {
    pub rules: Vec<(i64, i64, i64, i64)>,
    pub shading: Vec<(i64, i64, i64, i64)>,
    pub texts: Vec<(i64, i64, &'static str)>,
}

fn horizontal(x: i64, y: i64, right: i64) -> (i64, i64, i64, i64) {
    (x, y, right - x, 1)
}

fn vertical(x: i64, top: i64, bottom: i64) -> (i64, i64, i64, i64) {
    (x, top, 1, bottom - top)
}

// Lunch is split into two corners by a rule that stops at the meal column.
pub fn weekly_sheet() -> Sheet {
    let mut rules = [40, 100, 160, 260, 360]
        .into_iter()
        .map(|x| vertical(x, 100, 281))
        .collect::<Vec<_>>();
    rules.extend([100, 120, 200, 280].into_iter().map(|y| horizontal(40, y, 361)));
    rules.push(horizontal(100, 240, 361));

    Sheet {
        rules,
        shading: vec![(40, 100, 321, 20)],
        texts: vec![
            (45, 160, "조식(07:30~09:00)"),
            (45, 250, "중식(11:30~13:30)"),
            (105, 160, "코너1"),
            (105, 220, "코너2"),
            (105, 260, "Take-Out"),
            (165, 110, "03/18(월)"),
            (165, 150, "전복죽"),
            (165, 170, "김치"),
            (165, 220, "비빔밥"),
            (165, 260, "샌드위치"),
            (265, 110, "03/19(화)"),
            (265, 150, "누룽지"),
            (265, 220, "김치찌개"),
            (265, 260, "샌드"),
            (265, 260, "샌드위치"),
        ],
    }
}

#[allow(clippy::cast_precision_loss)]
fn rect(&(x, y, w, h): &(i64, i64, i64, i64)) -> Rect {
    Rect::new(x as f64, y as f64, w as f64, h as f64)
}

impl Sheet {
    #[allow(clippy::cast_precision_loss)]
    pub fn to_page(&self) -> Page {
        let mut rectangles = self.shading.iter().map(|r| rect(r).colored()).collect::<Vec<_>>();
        rectangles.extend(self.rules.iter().map(rect));
        Page {
            rectangles,
            text_tokens: self
                .texts
                .iter()
                .map(|&(x, y, text)| TextToken::new(x as f64, y as f64, text))
                .collect(),
        }
    }

    pub fn to_pdf2json(&self) -> String {
        let fills = self
            .shading
            .iter()
            .map(|&(x, y, w, h)| serde_json::json!({"x": x, "y": y, "w": w, "h": h, "clr": -1}))
            .chain(
                self.rules
                    .iter()
                    .map(|&(x, y, w, h)| serde_json::json!({"x": x, "y": y, "w": w, "h": h, "clr": 0})),
            )
            .collect::<Vec<_>>();
        let texts = self
            .texts
            .iter()
            .map(|&(x, y, text)| {
                serde_json::json!({
                    "x": x,
                    "y": y,
                    "R": [{"T": urlencoding::encode(text)}],
                })
            })
            .collect::<Vec<_>>();

        serde_json::json!({"formImage": {"Pages": [{"Fills": fills, "Texts": texts}]}}).to_string()
    }
}

fn utf16_string(text: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn re(&(x, y, w, h): &(i64, i64, i64, i64)) -> Operation {
    Operation::new(
        "re",
        vec![
            Object::Integer(x),
            Object::Integer(PAGE_HEIGHT - y - h),
            Object::Integer(w),
            Object::Integer(h),
        ],
    )
}

pub fn create_test_pdf(path: &Path, sheet: &Sheet) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut operations = vec![Operation::new(
        "rg",
        vec![Object::Integer(1), Object::Integer(1), Object::Integer(0)],
    )];
    operations.extend(sheet.shading.iter().map(re));
    operations.push(Operation::new("f", vec![]));
    operations.push(Operation::new("g", vec![Object::Integer(0)]));
    operations.extend(sheet.rules.iter().map(re));
    operations.push(Operation::new("f", vec![]));

    for &(x, y, text) in &sheet.texts {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), Object::Integer(10)]));
        operations.push(Operation::new(
            "Td",
            vec![Object::Integer(x), Object::Integer(PAGE_HEIGHT - y)],
        ));
        operations.push(Operation::new("Tj", vec![utf16_string(text)]));
        operations.push(Operation::new("ET", vec![]));
    }

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), Object::Integer(PAGE_HEIGHT)],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    doc.save(path)?;
    Ok(())
}

pub fn create_empty_pdf(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => Vec::<Object>::new(),
        "Count" => 0,
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path)?;
    Ok(())
}

pub fn grid_page(rows: &[f64], columns: &[f64], texts: &[(f64, f64, &str)]) -> Page {
    let left = columns.first().copied().unwrap_or(0.0);
    let right = columns.last().copied().unwrap_or(0.0);
    let top = rows.first().copied().unwrap_or(0.0);
    let bottom = rows.last().copied().unwrap_or(0.0);

    let mut rectangles = rows
        .iter()
        .map(|&y| Rect::new(left, y, right - left + 0.5, 0.5))
        .collect::<Vec<_>>();
    rectangles.extend(
        columns
            .iter()
            .map(|&x| Rect::new(x, top, 0.5, bottom - top + 0.5)),
    );

    Page {
        rectangles,
        text_tokens: texts
            .iter()
            .map(|&(x, y, text)| TextToken::new(x, y, text))
            .collect(),
    }
}
