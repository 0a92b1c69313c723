//! Extension vote parsing and reduction.

use serde::{Deserialize, Serialize};

/// Upper bound of a single agent's proposal.
pub const MAX_PROPOSED_TURNS: u32 = 10;

/// Result of one extension vote round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionOutcome {
    pub left: u32,
    pub right: u32,
    /// `ceil((left + right) / 2)`
    pub decided: u32,
}

impl ExtensionOutcome {
    pub fn from_votes(left: u32, right: u32) -> Self {
        let left = left.min(MAX_PROPOSED_TURNS);
        let right = right.min(MAX_PROPOSED_TURNS);
        Self {
            left,
            right,
            decided: (left + right).div_ceil(2),
        }
    }
}

impl std::fmt::Display for ExtensionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "left={}, right={}, decided={}",
            self.left, self.right, self.decided
        )
    }
}

/// Parse an agent's vote for additional turns.
///
/// Takes the first integer literal (optionally signed) in the text and
/// clamps it to `0..=10`. Text without a number votes 0. Literals too
/// large to represent saturate toward their sign.
///
/// ```
/// use duet_domain::debate::parse_proposed_turns;
///
/// assert_eq!(parse_proposed_turns("I think 3 more turns."), 3);
/// assert_eq!(parse_proposed_turns("-4"), 0);
/// assert_eq!(parse_proposed_turns("Let's do 15"), 10);
/// assert_eq!(parse_proposed_turns("none"), 0);
/// ```
pub fn parse_proposed_turns(text: &str) -> u32 {
    let bytes = text.as_bytes();
    let Some(first_digit) = bytes.iter().position(u8::is_ascii_digit) else {
        return 0;
    };

    let negative = first_digit > 0 && bytes[first_digit - 1] == b'-';
    let digits_len = bytes[first_digit..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    let digits = &text[first_digit..first_digit + digits_len];

    if negative {
        return 0;
    }

    match digits.parse::<u64>() {
        Ok(n) => n.min(u64::from(MAX_PROPOSED_TURNS)) as u32,
        Err(_) => MAX_PROPOSED_TURNS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_embedded_in_text() {
        for n in -5i64..=15 {
            let text = format!("After thinking, my answer is {} turns.", n);
            let expected = n.clamp(0, 10) as u32;
            assert_eq!(parse_proposed_turns(&text), expected, "n = {}", n);
        }
    }

    #[test]
    fn test_parse_first_literal_wins() {
        assert_eq!(parse_proposed_turns("2 or maybe 8"), 2);
        assert_eq!(parse_proposed_turns("turn-3"), 0);
    }

    #[test]
    fn test_parse_non_numeric() {
        assert_eq!(parse_proposed_turns(""), 0);
        assert_eq!(parse_proposed_turns("We are done here."), 0);
    }

    #[test]
    fn test_parse_overflow_saturates() {
        assert_eq!(parse_proposed_turns("99999999999999999999999"), 10);
        assert_eq!(parse_proposed_turns("-99999999999999999999999"), 0);
    }

    #[test]
    fn test_decided_is_rounded_up_average() {
        for left in 0..=10 {
            for right in 0..=10 {
                let outcome = ExtensionOutcome::from_votes(left, right);
                let expected = ((left + right) as f64 / 2.0).ceil() as u32;
                assert_eq!(outcome.decided, expected);
            }
        }
        assert_eq!(ExtensionOutcome::from_votes(3, 4).decided, 4);
        assert_eq!(ExtensionOutcome::from_votes(0, 0).decided, 0);
        assert_eq!(ExtensionOutcome::from_votes(2, 3).decided, 3);
    }

    #[test]
    fn test_outcome_display() {
        let outcome = ExtensionOutcome::from_votes(2, 3);
        assert_eq!(outcome.to_string(), "left=2, right=3, decided=3");
    }
}
