use crate::domain::models::JsonOut;
use serde::Serialize;

/// Prints `data` inside the `{ok, data}` envelope, or one text row per item.
pub fn print_rows<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

/// Like `print_rows` for a single value rendered as several text lines.
pub fn print_report<T: Serialize>(
    json: bool,
    ok: bool,
    data: &T,
    lines: impl Fn(&T) -> Vec<String>,
) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&JsonOut { ok, data })?);
    } else {
        for line in lines(data) {
            println!("{}", line);
        }
    }
    Ok(())
}
