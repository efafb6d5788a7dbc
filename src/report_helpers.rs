use serde::Serialize;

/// Compute the max display width of a set of labels, with a minimum.
pub fn max_width<'a>(labels: impl Iterator<Item = &'a str>, min: usize) -> usize {
    labels.map(str::len).max().unwrap_or(min).max(min)
}

/// A horizontal separator of box-drawing chars.
pub fn separator(width: usize) -> String {
    "\u{2500}".repeat(width)
}

/// Serialize to pretty JSON and print to stdout.
pub fn print_json_stdout(value: &impl Serialize) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "report_helpers_test.rs"]
mod tests;
