use crate::model::{Anchor, GuideLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Column,
    Row,
}

impl Axis {
    fn coord<T: Anchor + ?Sized>(self, item: &T) -> f64 {
        match self {
            Self::Column => item.x(),
            Self::Row => item.y(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Band<T> {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub children: Vec<T>,
}

#[allow(clippy::cast_possible_truncation)]
fn fixed(value: f64) -> i64 {
    (value * 1000.0).round() as i64
}

// Membership is strict on both edges and compared in thousandths, so text
// sitting a rounding error off a rule does not flip sides.
pub(crate) fn split_bands<T>(guides: &[GuideLine], items: &[T], axis: Axis) -> Vec<Band<T>>
where
    T: Anchor + Clone,
{
    let mut sorted = items.to_vec();
    sorted.sort_by(|left, right| axis.coord(left).total_cmp(&axis.coord(right)));

    guides
        .windows(2)
        .filter_map(|pair| {
            let (start, end) = (&pair[0], &pair[1]);
            let low = fixed(axis.coord(start));
            let high = fixed(axis.coord(end));
            let children = sorted
                .iter()
                .filter(|item| {
                    let value = fixed(axis.coord(*item));
                    low < value && value < high
                })
                .cloned()
                .collect::<Vec<_>>();

            if children.is_empty() {
                return None;
            }

            Some(Band {
                x: start.x,
                y: start.y,
                w: start.w,
                h: start.h,
                children,
            })
        })
        .collect()
}
