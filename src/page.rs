use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub has_color: bool,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            has_color: false,
        }
    }

    #[must_use]
    pub const fn colored(mut self) -> Self {
        self.has_color = true;
        self
    }
}

// `encoding_offset` is the extractor's shift, added back before the token
// lines up with the rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextToken {
    pub x: f64,
    pub y: f64,
    pub raw_text: String,
    pub encoding_offset: Option<f64>,
}

impl TextToken {
    #[must_use]
    pub fn new(x: f64, y: f64, raw_text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            raw_text: raw_text.into(),
            encoding_offset: None,
        }
    }

    #[must_use]
    pub const fn with_offset(mut self, offset: f64) -> Self {
        self.encoding_offset = Some(offset);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub rectangles: Vec<Rect>,
    pub text_tokens: Vec<TextToken>,
}

impl Page {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rectangles.is_empty() && self.text_tokens.is_empty()
    }
}
