use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    NoTableDetected,
    NoMealHeaders,
    NoDateMarkers,
    ColoredFillsIgnored,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseWarning {
    pub code: WarningCode,
    pub message: String,
    pub count: Option<usize>,
}

impl ParseWarning {
    #[must_use]
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            count: None,
        }
    }

    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}
