//! String helpers for configuration values and command templates.

/// Trim an optional string and drop empty values.
///
/// # Returns
/// `None` when the input is missing or whitespace-only; otherwise the trimmed
/// string.
pub fn normalize_optional_nonempty(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Split a comma-separated list, dropping blank entries.
///
/// Entries keep their inner spacing, so `"# %%"` stays a distinct tag from
/// `"#%%"`. Only a single leading space after each comma is stripped.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|item| item.strip_prefix(' ').unwrap_or(item))
        .filter(|item| !item.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Fill the `{options}` and `{filepath}` placeholders of a run template.
///
/// When `options` is empty, the placeholder and one following space are
/// removed so `%run {options} "{filepath}"` renders as `%run "file.py"`.
pub fn render_run_command(template: &str, options: &str, filepath: &str) -> String {
    let options = options.trim();
    let rendered = if options.is_empty() {
        template.replace("{options} ", "").replace("{options}", "")
    } else {
        template.replace("{options}", options)
    };
    rendered.replace("{filepath}", filepath).trim_end().to_string()
}
