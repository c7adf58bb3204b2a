//! Small helpers shared by the form view rendering.

/// Spinner frames for the loading indicator, advanced once per tick.
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// Display-capitalize a backend status string ("success" -> "Success").
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_handles_common_cases() {
        assert_eq!(capitalize("success"), "Success");
        assert_eq!(capitalize("Error"), "Error");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("é"), "É");
    }

    #[test]
    fn spinner_wraps_around() {
        assert_eq!(spinner(0), SPINNER_FRAMES[0]);
        assert_eq!(spinner(SPINNER_FRAMES.len()), SPINNER_FRAMES[0]);
        assert_eq!(spinner(usize::MAX), SPINNER_FRAMES[usize::MAX % SPINNER_FRAMES.len()]);
    }
}
