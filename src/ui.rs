//! Centralized UI formatting and color utilities

/// Check if quiet mode is enabled via environment variable or --quiet flag
pub fn is_quiet() -> bool {
    std::env::var("PEDIGREE_QUIET")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Color scheme for report output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Green for passing checks
    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    /// Yellow for warnings
    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    /// Cyan for animal identifiers
    pub fn identifier(text: &str) -> ColoredString {
        text.cyan()
    }

    /// Dimmed for secondary text
    pub fn secondary(text: &str) -> ColoredString {
        text.dimmed()
    }

    pub fn heading(text: &str) -> ColoredString {
        text.bold()
    }
}

/// Common text formatting patterns
pub mod format {
    /// Underline a heading with a rule of the same width
    pub fn underline(title: &str) -> String {
        "─".repeat(title.chars().count())
    }

    /// Singular or plural noun for a count, e.g. `1 record`, `3 records`
    pub fn count(n: usize, noun: &str) -> String {
        if n == 1 {
            format!("{} {}", n, noun)
        } else {
            format!("{} {}s", n, noun)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underline() {
        assert_eq!(format::underline("Cycles"), "──────");
    }

    #[test]
    fn test_count() {
        assert_eq!(format::count(1, "record"), "1 record");
        assert_eq!(format::count(0, "record"), "0 records");
        assert_eq!(format::count(3, "cycle"), "3 cycles");
    }
}
