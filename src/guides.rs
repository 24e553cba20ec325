use crate::model::GuideLine;
use crate::page::Rect;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Guides {
    pub rows: Vec<GuideLine>,
    pub columns: Vec<GuideLine>,
}

impl Guides {
    #[must_use]
    pub fn is_table(&self) -> bool {
        self.rows.len() >= 2 && self.columns.len() >= 2
    }
}

fn guide(rect: &Rect) -> GuideLine {
    GuideLine {
        x: rect.x,
        y: rect.y,
        w: rect.w,
        h: rect.h,
    }
}

pub(crate) fn classify_guides(rectangles: &[Rect]) -> Guides {
    let structural = rectangles.iter().filter(|rect| !rect.has_color);

    let mut rows = Vec::new();
    let mut columns = Vec::new();
    for rect in structural {
        if rect.w > rect.h {
            rows.push(guide(rect));
        } else if rect.w < rect.h {
            columns.push(guide(rect));
        }
    }

    rows.sort_by(|left, right| left.y.total_cmp(&right.y));
    columns.sort_by(|left, right| left.x.total_cmp(&right.x));

    Guides { rows, columns }
}

#[cfg(test)]
mod tests {
    use super::classify_guides;
    use crate::page::Rect;

    #[test]
    fn splits_by_aspect_and_sorts_each_axis() {
        let guides = classify_guides(&[
            Rect::new(0.0, 30.0, 100.0, 0.5),
            Rect::new(40.0, 0.0, 0.5, 80.0),
            Rect::new(0.0, 10.0, 100.0, 0.5),
            Rect::new(5.0, 0.0, 0.5, 80.0),
        ]);

        let row_ys = guides.rows.iter().map(|g| g.y).collect::<Vec<_>>();
        let column_xs = guides.columns.iter().map(|g| g.x).collect::<Vec<_>>();
        assert_eq!(row_ys, vec![10.0, 30.0]);
        assert_eq!(column_xs, vec![5.0, 40.0]);
        assert!(guides.is_table());
    }

    #[test]
    fn drops_colored_and_square_fills() {
        let guides = classify_guides(&[
            Rect::new(0.0, 0.0, 100.0, 20.0).colored(),
            Rect::new(0.0, 0.0, 4.0, 4.0),
            Rect::new(0.0, 50.0, 100.0, 0.5),
        ]);

        assert_eq!(guides.rows.len(), 1);
        assert!(guides.columns.is_empty());
        assert!(!guides.is_table());
    }
}
