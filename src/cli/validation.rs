use crate::cli::args::CliArgs;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.input_format.as_deref() {
        if crate::input::InputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --input-format '{raw}', expected json, csv or tsv"
            ));
        }
    }
    if let Some(raw) = args.delimiter.as_deref() {
        parse_delimiter(raw).map_err(|e| format!("invalid --delimiter '{raw}': {e}"))?;
    }
    if let Some(title) = args.title.as_deref() {
        if title.trim().is_empty() {
            return Err("invalid --title, expected non-empty text".to_string());
        }
    }
    Ok(())
}

/// Accepts a single ASCII character or the escape `\t`.
pub fn parse_delimiter(raw: &str) -> Result<u8, String> {
    match raw {
        "\\t" | "\t" | "tab" => Ok(b'\t'),
        _ => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                (Some(_), None) => Err("delimiter must be ASCII".to_string()),
                _ => Err("expected a single character".to_string()),
            }
        }
    }
}
