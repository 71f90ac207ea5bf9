//! Slug and date rendering.

use std::sync::LazyLock;

use regex::Regex;
use time::OffsetDateTime;

// Everything except ASCII lowercase letters, ASCII digits and ASCII whitespace.
#[allow(clippy::expect_used)]
static NON_SLUG_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-z0-9 \t\n\x0B\x0C\r]").expect("Invalid regex pattern")
});

#[allow(clippy::expect_used)]
static DASH_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("-+").expect("Invalid regex pattern"));

/// URL slug for an article title.
///
/// Lowercases, turns newlines and any character outside `[a-z0-9\s]` into
/// spaces, joins the space-separated pieces with `-` and collapses dash runs.
/// Leading or trailing separators survive as a single `-`.
#[must_use]
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase().replace('\n', " ");
    let cleaned = NON_SLUG_CHARS.replace_all(&lowered, " ");
    let joined = cleaned.split(' ').collect::<Vec<_>>().join("-");
    DASH_RUNS.replace_all(&joined, "-").into_owned()
}

/// English ordinal for a day of month: `1st`, `2nd`, `3rd`, `11th`, `22nd`.
#[must_use]
pub fn ordinal(day: u8) -> String {
    let suffix = if (11..=13).contains(&(day % 100)) {
        "th"
    } else {
        match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        }
    };
    format!("{day}{suffix}")
}

/// `yyyy-MM-dd <ordinal day> yyyy`, e.g. `2024-03-01 1st 2024`.
#[must_use]
pub fn format_added_at(at: OffsetDateTime) -> String {
    let year = at.year();
    format!(
        "{year:04}-{:02}-{:02} {} {year:04}",
        u8::from(at.month()),
        at.day(),
        ordinal(at.day())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn slug_of_seed_titles() {
        assert_eq!(slugify("Reactor Bismuth is out"), "reactor-bismuth-is-out");
        assert_eq!(
            slugify("Reactor Aluminium has landed"),
            "reactor-aluminium-has-landed"
        );
    }

    #[test]
    fn slug_replaces_punctuation_and_collapses_dashes() {
        assert_eq!(slugify("Hello,  World!"), "hello-world-");
        assert_eq!(slugify("Reactor\nCore"), "reactor-core");
        assert_eq!(slugify("Reactor 1.9 -- released"), "reactor-1-9-released");
    }

    #[test]
    fn slug_drops_non_ascii_letters() {
        assert_eq!(slugify("Caf\u{e9} au lait"), "caf-au-lait");
    }

    #[test]
    fn ordinals() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (22, "22nd"),
            (23, "23rd"),
            (30, "30th"),
            (31, "31st"),
        ];
        for (day, expected) in cases {
            assert_eq!(ordinal(day), expected, "day {day}");
        }
    }

    #[test]
    fn added_at_format() {
        assert_eq!(
            format_added_at(datetime!(2024-03-01 10:30 UTC)),
            "2024-03-01 1st 2024"
        );
        assert_eq!(
            format_added_at(datetime!(2023-12-12 23:59 UTC)),
            "2023-12-12 12th 2023"
        );
    }
}
