use std::fs;
use std::io::Write;
use std::path::Path;

use collation_rs::Report;

/// Pretty JSON with a trailing newline.
pub fn render_report(report: &Report) -> Result<String, String> {
    let mut rendered = serde_json::to_string_pretty(report)
        .map_err(|err| format!("Failed to serialize collation report: {err}"))?;
    rendered.push('\n');
    Ok(rendered)
}

pub fn write_report(path: &Path, report: &Report) -> Result<(), String> {
    let rendered = render_report(report)?;
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .map_err(|err| format!("Failed to create '{}': {err}", dir.display()))?,
        _ => {}
    }
    fs::write(path, rendered)
        .map_err(|err| format!("Failed to write collation report '{}': {err}", path.display()))
}

pub fn print_report(report: &Report) -> Result<(), String> {
    let rendered = render_report(report)?;
    std::io::stdout()
        .lock()
        .write_all(rendered.as_bytes())
        .map_err(|err| format!("Failed to write collation report to stdout: {err}"))
}
