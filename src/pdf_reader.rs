use std::collections::BTreeMap;
use std::path::Path;

use encoding_rs::{EUC_KR, UTF_16BE};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId};
use tracing::debug;

use crate::error::MenuError;
use crate::page::{Page, Rect, TextToken};

const DEFAULT_PAGE_TOP: f64 = 842.0;
const MAX_PARENT_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Matrix {
    const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    const fn translation(tx: f64, ty: f64) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    fn from_operands(operands: &[Object]) -> Option<Self> {
        let values = numbers(operands)?;
        let [a, b, c, d, e, f] = values.as_slice() else {
            return None;
        };
        Some(Self {
            a: *a,
            b: *b,
            c: *c,
            d: *d,
            e: *e,
            f: *f,
        })
    }

    fn multiply(self, next: Self) -> Self {
        Self {
            a: self.a * next.a + self.b * next.c,
            b: self.a * next.b + self.b * next.d,
            c: self.c * next.a + self.d * next.c,
            d: self.c * next.b + self.d * next.d,
            e: self.e * next.a + self.f * next.c + next.e,
            f: self.e * next.b + self.f * next.d + next.f,
        }
    }

    fn apply(self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }
}

#[allow(clippy::cast_precision_loss)]
fn number(object: &Object) -> Option<f64> {
    match object {
        Object::Integer(value) => Some(*value as f64),
        Object::Real(value) => Some(f64::from(*value)),
        _ => None,
    }
}

fn numbers(operands: &[Object]) -> Option<Vec<f64>> {
    operands.iter().map(number).collect()
}

fn is_black(components: &[f64]) -> bool {
    const EPSILON: f64 = 1e-6;
    match components {
        [gray] => gray.abs() < EPSILON,
        [r, g, b] => [r, g, b].iter().all(|value| value.abs() < EPSILON),
        [c, m, y, k] => {
            [c, m, y].iter().all(|value| value.abs() < EPSILON) && (k - 1.0).abs() < EPSILON
        }
        _ => true,
    }
}

fn looks_decoding_broken(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    if text.contains("?Identity-H Unimplemented?") {
        return true;
    }

    let total = text.chars().count();
    let replacement = text.matches('\u{FFFD}').count();
    let control = text
        .chars()
        .filter(|ch| ch.is_control() && !matches!(ch, '\n' | '\r' | '\t'))
        .count();

    replacement * 8 > total || control * 5 > total
}

fn is_korean_encoding(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.contains("ksc") || lower.contains("uhc") || lower.contains("euc-kr")
}

fn decode_pdf_bytes(encoding: Option<&str>, bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let (utf16, had_errors) = UTF_16BE.decode_without_bom_handling(rest);
        if !had_errors {
            return utf16.into_owned();
        }
    }

    if encoding.is_some_and(is_korean_encoding) {
        let (korean, _, had_errors) = EUC_KR.decode(bytes);
        if !had_errors && !korean.is_empty() {
            return korean.into_owned();
        }
    }

    let decoded = Document::decode_text(encoding, bytes);
    if !looks_decoding_broken(&decoded) {
        return decoded;
    }

    if let Some(name) = encoding {
        let lower = name.to_ascii_lowercase();
        if lower.contains("utf16")
            || lower.contains("ucs2")
            || lower.contains("identity-h")
            || lower.contains("unicode")
        {
            let (utf16, had_errors) = UTF_16BE.decode_without_bom_handling(bytes);
            if !had_errors && !utf16.is_empty() {
                return utf16.into_owned();
            }
        }
    }

    String::from_utf8_lossy(bytes).to_string()
}

fn collect_text(text: &mut String, encoding: Option<&str>, operands: &[Object]) {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => text.push_str(&decode_pdf_bytes(encoding, bytes)),
            Object::Array(items) => collect_text(text, encoding, items),
            other => {
                if number(other).is_some_and(|adjustment| adjustment < -100.0) {
                    text.push(' ');
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct GraphicsState {
    ctm: Matrix,
    fill_is_black: bool,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: Matrix::IDENTITY,
            fill_is_black: true,
        }
    }
}

fn collect_primitives(
    operations: &[Operation],
    encodings: &BTreeMap<Vec<u8>, &str>,
    top: f64,
) -> Page {
    let mut page = Page::default();
    let mut state = GraphicsState::default();
    let mut saved = Vec::new();
    let mut path: Vec<[(f64, f64); 4]> = Vec::new();

    let mut text_matrix = Matrix::IDENTITY;
    let mut line_matrix = Matrix::IDENTITY;
    let mut leading = 0.0;
    let mut encoding = None;

    for operation in operations {
        let operands = operation.operands.as_slice();
        match operation.operator.as_str() {
            "q" => saved.push(state),
            "Q" => state = saved.pop().unwrap_or_default(),
            "cm" => {
                if let Some(matrix) = Matrix::from_operands(operands) {
                    state.ctm = matrix.multiply(state.ctm);
                }
            }
            "g" | "rg" | "k" | "sc" | "scn" => {
                if let Some(components) = numbers(operands) {
                    state.fill_is_black = is_black(&components);
                } else {
                    state.fill_is_black = false;
                }
            }
            "cs" => state.fill_is_black = true,
            "re" => {
                if let Some(values) = numbers(operands)
                    && let [x, y, w, h] = values.as_slice()
                {
                    let ctm = state.ctm;
                    path.push([
                        ctm.apply(*x, *y),
                        ctm.apply(x + w, *y),
                        ctm.apply(*x, y + h),
                        ctm.apply(x + w, y + h),
                    ]);
                }
            }
            "f" | "F" | "f*" | "B" | "B*" | "b" | "b*" => {
                for corners in path.drain(..) {
                    let (min_x, max_x, min_y, max_y) = corners.iter().fold(
                        (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
                        |(min_x, max_x, min_y, max_y), (x, y)| {
                            (min_x.min(*x), max_x.max(*x), min_y.min(*y), max_y.max(*y))
                        },
                    );
                    page.rectangles.push(Rect {
                        x: min_x,
                        y: top - max_y,
                        w: max_x - min_x,
                        h: max_y - min_y,
                        has_color: !state.fill_is_black,
                    });
                }
            }
            "S" | "s" | "n" => path.clear(),
            "BT" => {
                text_matrix = Matrix::IDENTITY;
                line_matrix = Matrix::IDENTITY;
            }
            "Tf" => {
                encoding = operands
                    .first()
                    .and_then(|operand| operand.as_name().ok())
                    .and_then(|name| encodings.get(name).copied());
            }
            "TL" => {
                if let Some(value) = operands.first().and_then(number) {
                    leading = value;
                }
            }
            "Td" | "TD" => {
                if let Some(values) = numbers(operands)
                    && let [tx, ty] = values.as_slice()
                {
                    if operation.operator == "TD" {
                        leading = -ty;
                    }
                    line_matrix = Matrix::translation(*tx, *ty).multiply(line_matrix);
                    text_matrix = line_matrix;
                }
            }
            "Tm" => {
                if let Some(matrix) = Matrix::from_operands(operands) {
                    line_matrix = matrix;
                    text_matrix = matrix;
                }
            }
            "T*" | "'" | "\"" | "Tj" | "TJ" => {
                if operation.operator != "Tj" && operation.operator != "TJ" {
                    line_matrix = Matrix::translation(0.0, -leading).multiply(line_matrix);
                    text_matrix = line_matrix;
                }
                if operation.operator == "T*" {
                    continue;
                }

                // `"` carries word and character spacing ahead of the string.
                let shown = if operation.operator == "\"" {
                    operands.last().map(std::slice::from_ref).unwrap_or_default()
                } else {
                    operands
                };
                let mut text = String::new();
                collect_text(&mut text, encoding, shown);

                let (x, y) = text_matrix.multiply(state.ctm).apply(0.0, 0.0);
                page.text_tokens.push(TextToken::new(
                    x,
                    top - y,
                    urlencoding::encode(&text).into_owned(),
                ));
            }
            _ => {}
        }
    }

    page
}

fn resolve<'a>(document: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => document.get_object(*id).ok(),
        other => Some(other),
    }
}

// MediaBox is inheritable, so walk up through `Parent`; the depth cap keeps
// cyclic page trees from spinning.
fn page_top(document: &Document, page_id: ObjectId) -> Option<f64> {
    let mut current = document.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_PARENT_DEPTH {
        if let Ok(media_box) = current.get(b"MediaBox") {
            let values = resolve(document, media_box)?.as_array().ok()?;
            let values = values
                .iter()
                .map(|value| resolve(document, value).and_then(number))
                .collect::<Option<Vec<_>>>()?;
            return match values.as_slice() {
                [_, lly, _, ury] => Some(lly.max(*ury)),
                _ => None,
            };
        }

        let parent = current.get(b"Parent").ok()?.as_reference().ok()?;
        current = document.get_dictionary(parent).ok()?;
    }
    None
}

fn page_from_document(document: &Document) -> Result<Page, MenuError> {
    let Some((_, page_id)) = document.get_pages().into_iter().next() else {
        return Err(MenuError::DocumentAbsent);
    };

    let raw_content = document.get_page_content(page_id)?;
    let content = Content::decode(&raw_content)?;
    let encodings = document
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect::<BTreeMap<Vec<u8>, &str>>();
    let top = page_top(document, page_id).unwrap_or(DEFAULT_PAGE_TOP);

    let page = collect_primitives(&content.operations, &encodings, top);
    debug!(
        rectangles = page.rectangles.len(),
        texts = page.text_tokens.len(),
        "first page read"
    );
    Ok(page)
}

pub fn read_first_page(input_pdf: &Path) -> Result<Page, MenuError> {
    let document = Document::load(input_pdf)?;
    page_from_document(&document)
}

pub fn read_first_page_from_bytes(input_pdf: &[u8]) -> Result<Page, MenuError> {
    let document = Document::load_mem(input_pdf)?;
    page_from_document(&document)
}
