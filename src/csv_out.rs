use csv::WriterBuilder;

use crate::error::MenuError;
use crate::model::{MealSlot, MenuEntry};

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, MenuError> {
    let bytes = writer
        .into_inner()
        .map_err(|error| MenuError::Csv(error.into_error().into()))?;
    String::from_utf8(bytes)
        .map_err(|error| MenuError::InvalidOption(format!("invalid utf-8 csv output: {error}")))
}

pub fn entries_to_csv(entries: &[MenuEntry]) -> Result<String, MenuError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::<u8>::new());
    writer.write_record(["date", "start", "end", "meal", "corner", "text"])?;
    for entry in entries {
        writer.write_record([
            entry.date.to_string(),
            entry.start_date_time.format(DATE_TIME_FORMAT).to_string(),
            entry.end_date_time.format(DATE_TIME_FORMAT).to_string(),
            entry.meal.name.clone(),
            entry.corner.label.clone(),
            entry.text.clone(),
        ])?;
    }
    writer.flush()?;
    finish(writer)
}

pub fn slots_to_csv(slots: &[MealSlot]) -> Result<String, MenuError> {
    let mut writer = WriterBuilder::new().from_writer(Vec::<u8>::new());
    writer.write_record(["start", "end", "title", "summary", "description"])?;
    for slot in slots {
        writer.write_record([
            slot.start_date_time.format(DATE_TIME_FORMAT).to_string(),
            slot.end_date_time.format(DATE_TIME_FORMAT).to_string(),
            slot.title.clone(),
            slot.summary.clone(),
            slot.description.clone(),
        ])?;
    }
    writer.flush()?;
    finish(writer)
}
