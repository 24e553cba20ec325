use chrono::NaiveDateTime;
use indexmap::IndexMap;

use crate::model::{MealSlot, MenuEntry};

fn slot_title(meal_name: &str, entries: &[MenuEntry]) -> String {
    let stations = entries
        .iter()
        .filter(|entry| entry.corner.is_numbered_station())
        .filter_map(|entry| entry.lines.first())
        .filter(|line| !line.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>();

    if stations.is_empty() {
        meal_name.to_string()
    } else {
        format!("{meal_name}({})", stations.join("/"))
    }
}

fn slot_description(entries: &[MenuEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            std::iter::once(entry.corner.label.clone())
                .chain(entry.lines.iter().map(|line| format!("- {line}")))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[must_use]
pub fn aggregate_entries(entries: &[MenuEntry]) -> Vec<MealSlot> {
    let mut groups: IndexMap<NaiveDateTime, Vec<MenuEntry>> = IndexMap::new();
    for entry in entries {
        groups
            .entry(entry.start_date_time)
            .or_default()
            .push(entry.clone());
    }

    groups
        .into_values()
        .filter_map(|group| {
            let first = group.first()?;
            let summary = first.meal.name.clone();
            let start_date_time = first.start_date_time;
            let end_date_time = first.end_date_time;
            Some(MealSlot {
                title: slot_title(&summary, &group),
                description: slot_description(&group),
                summary,
                start_date_time,
                end_date_time,
                entries: group,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use pretty_assertions::assert_eq;

    use super::aggregate_entries;
    use crate::model::{Corner, Meal, MealKind, MenuEntry};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn entry(day: u32, hour: u32, corner: &str, lines: &[&str]) -> MenuEntry {
        let meal = Meal {
            x: 0.0,
            y: 0.0,
            kind: MealKind::Lunch,
            name: "중식".to_string(),
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
        };
        let lines = lines.iter().map(ToString::to_string).collect::<Vec<_>>();
        MenuEntry {
            x: 0.0,
            y: 0.0,
            text: lines.join("\n"),
            lines,
            corner: Corner {
                x: 0.0,
                y: 0.0,
                label: corner.to_string(),
                meal: meal.clone(),
            },
            meal,
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            start_date_time: at(day, hour),
            end_date_time: at(day, hour + 1),
        }
    }

    #[test]
    fn groups_by_start_in_first_seen_order() {
        let slots = aggregate_entries(&[
            entry(16, 12, "코너1", &["국수"]),
            entry(15, 12, "코너1", &["비빔밥"]),
            entry(16, 12, "코너2", &["돈까스"]),
        ]);

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].start_date_time, at(16, 12));
        assert_eq!(slots[0].end_date_time, at(16, 13));
        assert_eq!(slots[0].entries.len(), 2);
        assert_eq!(slots[1].start_date_time, at(15, 12));
    }

    #[test]
    fn title_lists_numbered_station_dishes() {
        let slots = aggregate_entries(&[
            entry(15, 12, "코너1", &["비빔밥", "된장국"]),
            entry(15, 12, "Take-Out", &["샌드위치"]),
            entry(15, 12, "코너2", &["돈까스"]),
        ]);

        assert_eq!(slots[0].title, "중식(비빔밥/돈까스)");
        assert_eq!(slots[0].summary, "중식");
    }

    #[test]
    fn title_is_plain_meal_name_without_numbered_stations() {
        let slots = aggregate_entries(&[entry(15, 12, "Plus", &["샐러드"])]);
        assert_eq!(slots[0].title, "중식");
    }

    #[test]
    fn description_lists_corner_then_bulleted_lines() {
        let slots = aggregate_entries(&[
            entry(15, 12, "코너1", &["비빔밥", "된장국"]),
            entry(15, 12, "Plus", &["샐러드"]),
        ]);

        assert_eq!(
            slots[0].description,
            "코너1\n- 비빔밥\n- 된장국\n\nPlus\n- 샐러드"
        );
    }
}
