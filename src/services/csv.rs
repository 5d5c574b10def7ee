//! Row parsing for the half-hourly ranking CSVs (`time,rank,appId,title`).

use chrono::NaiveTime;
use std::mem::take;

/// Split one CSV line into fields. Quotes may wrap a field and `""` escapes a quote.
pub fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if matches!(chars.peek(), Some('"')) {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(take(&mut field)),
            _ => field.push(ch),
        }
    }
    fields.push(field);
    fields
}

/// Parsed realtime row, before the file date is attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyRow {
    pub time: NaiveTime,
    pub rank: u32,
    pub app_id: String,
    pub title: String,
}

/// Parse `time,rank,appId,title`. Unquoted titles containing commas are rejoined.
pub fn parse_hourly_row(line: &str) -> Result<HourlyRow, String> {
    let fields = split_row(line.trim_end_matches(['\r', '\n']));
    if fields.len() < 4 {
        return Err(format!("expected 4 fields, found {}", fields.len()));
    }
    let time = NaiveTime::parse_from_str(fields[0].trim(), "%H:%M")
        .map_err(|_| format!("bad time '{}'", fields[0]))?;
    let rank = fields[1]
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|r| *r > 0)
        .ok_or_else(|| format!("bad rank '{}'", fields[1]))?;
    let app_id = fields[2].trim().to_string();
    if app_id.is_empty() {
        return Err("empty app id".to_string());
    }
    Ok(HourlyRow {
        time,
        rank,
        app_id,
        title: fields[3..].join(",").trim().to_string(),
    })
}
