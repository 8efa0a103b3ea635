/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

/// Returns GREY when the field is empty (None or "" or "--"),
/// and RESET otherwise.
pub fn color_for_optional_field<T: AsRef<str>>(value: Option<T>) -> &'static str {
    match value {
        Some(v) if !v.as_ref().trim().is_empty() && v.as_ref() != "--" => RESET,
        _ => GREY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_grey() {
        assert_eq!(color_for_optional_field(Some("")), GREY);
        assert_eq!(color_for_optional_field(Some("  ")), GREY);
        assert_eq!(color_for_optional_field::<&str>(None), GREY);
        assert_eq!(color_for_optional_field(Some("ACME")), RESET);
    }
}
