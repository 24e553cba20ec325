use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

pub trait Anchor {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GuideLine {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextUnit {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

impl TextUnit {
    #[must_use]
    pub fn new(x: f64, y: f64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
        }
    }
}

impl Anchor for TextUnit {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MealKind {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealKind {
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "조식" => Some(Self::Breakfast),
            "중식" => Some(Self::Lunch),
            "석식" => Some(Self::Dinner),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Breakfast => "조식",
            Self::Lunch => "중식",
            Self::Dinner => "석식",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meal {
    pub x: f64,
    pub y: f64,
    pub kind: MealKind,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

pub const CORNER_MARKER: &str = "코너";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Corner {
    pub x: f64,
    pub y: f64,
    pub label: String,
    pub meal: Meal,
}

impl Corner {
    #[must_use]
    pub fn is_numbered_station(&self) -> bool {
        self.label.starts_with(CORNER_MARKER)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateMarker {
    pub x: f64,
    pub y: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub texts: Vec<TextUnit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuEntry {
    pub x: f64,
    pub y: f64,
    pub lines: Vec<String>,
    pub text: String,
    pub meal: Meal,
    pub corner: Corner,
    pub date: NaiveDate,
    pub start_date_time: NaiveDateTime,
    pub end_date_time: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealSlot {
    pub title: String,
    pub summary: String,
    pub description: String,
    pub entries: Vec<MenuEntry>,
    pub start_date_time: NaiveDateTime,
    pub end_date_time: NaiveDateTime,
}

macro_rules! impl_anchor {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Anchor for $ty {
                fn x(&self) -> f64 {
                    self.x
                }

                fn y(&self) -> f64 {
                    self.y
                }
            }
        )+
    };
}

impl_anchor!(GuideLine, Meal, Corner, DateMarker, Cell, MenuEntry);
