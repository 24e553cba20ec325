use crate::model::TextUnit;
use crate::page::TextToken;

fn decode_token_text(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

pub(crate) fn normalize_tokens(tokens: &[TextToken]) -> Vec<TextUnit> {
    tokens
        .iter()
        .map(|token| {
            let offset = token.encoding_offset.unwrap_or(0.0);
            TextUnit {
                x: token.x + offset,
                y: token.y + offset,
                text: decode_token_text(&token.raw_text).trim().to_string(),
            }
        })
        .collect()
}

// A label re-emitted with more text appended replaces the earlier copy.
pub(crate) fn clean_lines(units: &[TextUnit]) -> Vec<String> {
    let mut kept: Vec<&TextUnit> = Vec::with_capacity(units.len());
    for unit in units {
        if kept.last().is_some_and(|last| unit.text.contains(&last.text)) {
            kept.pop();
        }
        kept.push(unit);
    }

    let mut lines: Vec<(u64, String)> = Vec::new();
    for unit in kept {
        let key = unit.y.to_bits();
        match lines.iter_mut().find(|(y, _)| *y == key) {
            Some((_, line)) => line.push_str(&unit.text),
            None => lines.push((key, unit.text.clone())),
        }
    }

    lines.into_iter().map(|(_, line)| line).collect()
}
