/// Logs a recoverable failure and evaluates to `None`.
macro_rules! swallow {
    ($what:expr, $err:expr) => {{
        tracing::warn!("{}: {}", $what, $err);
        None
    }};
}

/// Trims `value` and drops it when nothing is left.
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
