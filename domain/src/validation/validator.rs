//! Turn validator

use super::issue::{TurnIssue, ValidationResult};
use crate::agent::parse_agent_prompt_tags;
use crate::debate::transcript::Transcript;
use crate::text::{extract_keywords, has_keyword_hit, normalize_for_comparison};

/// Replies shorter than this (in characters, after trimming) are blocked.
pub const MIN_REPLY_LEN: usize = 50;

/// Boilerplate only blocks replies whose normalized form is shorter than this.
pub const BOILERPLATE_MAX_LEN: usize = 260;

/// The other speaker's point must be longer than this to expect a reference.
const REFERENCE_SOURCE_MIN_LEN: usize = 40;

const REFERENCE_KEYWORD_MIN_LEN: usize = 5;
const REFERENCE_MAX_KEYWORDS: usize = 12;
const TAG_KEYWORD_MIN_LEN: usize = 4;
const TAG_MAX_KEYWORDS: usize = 6;

/// Readiness/opening phrases, in normalized form.
const BOILERPLATE_PHRASES: &[&str] = &[
    "ready to be",
    "lets begin",
    "let s begin",
    "i m ready",
    "let s proceed",
];

/// Everything the validator needs to know about the surrounding conversation.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    pub speaker: &'a str,
    pub other: &'a str,
    pub agent_prompt: &'a str,
    pub transcript: &'a Transcript,
}

/// Validate a clean candidate turn against its conversation.
///
/// Runs [`validate_turn_output`] and adds the near-duplicate check against
/// the speaker's own last two entries.
pub fn validate_turn(text: &str, ctx: TurnContext<'_>) -> ValidationResult {
    let other_last = ctx.transcript.last_by_author(ctx.other).unwrap_or("");
    let mut result = validate_turn_output(text, ctx.other, ctx.agent_prompt, other_last);

    if is_near_duplicate(text, ctx.transcript, ctx.speaker) {
        result.push(TurnIssue::NearDuplicate);
    }

    result
}

/// Validate a clean candidate turn in isolation.
///
/// An empty reply yields exactly one blocking issue and nothing else runs.
pub fn validate_turn_output(
    text: &str,
    other_name: &str,
    agent_prompt: &str,
    other_last: &str,
) -> ValidationResult {
    let mut result = ValidationResult::default();
    let trimmed = text.trim();

    if trimmed.is_empty() {
        result.push(TurnIssue::EmptyReply);
        return result;
    }

    if trimmed.chars().count() < MIN_REPLY_LEN {
        result.push(TurnIssue::TooShort);
    }

    if is_low_value_turn(trimmed) {
        result.push(TurnIssue::LowValueBoilerplate);
    }

    let normalized = normalize_for_comparison(trimmed);

    if !other_last.is_empty()
        && other_last.chars().count() > REFERENCE_SOURCE_MIN_LEN
        && !has_other_reference(&normalized, other_last)
    {
        result.push(TurnIssue::WeakReference {
            other: other_name.to_string(),
        });
    }

    if !agent_prompt.trim().is_empty() && !has_agent_prompt_signal(&normalized, agent_prompt) {
        result.push(TurnIssue::AgentPromptSignalMissing);
    }

    result
}

/// Short replies made of readiness/opening phrases.
pub fn is_low_value_turn(text: &str) -> bool {
    let t = normalize_for_comparison(text);
    if t.is_empty() {
        return true;
    }

    let has_boilerplate =
        BOILERPLATE_PHRASES.iter().any(|p| t.contains(p)) || okay_then_begin(&t);

    has_boilerplate && t.chars().count() < BOILERPLATE_MAX_LEN
}

/// "okay" followed anywhere later by "begin".
fn okay_then_begin(normalized: &str) -> bool {
    normalized
        .find("okay")
        .is_some_and(|i| normalized[i + "okay".len()..].contains("begin"))
}

/// Whether `text` repeats, contains, or is contained by one of the
/// speaker's last two entries (all compared in normalized form).
pub fn is_near_duplicate(text: &str, transcript: &Transcript, speaker: &str) -> bool {
    let current = normalize_for_comparison(text);
    if current.is_empty() {
        return false;
    }

    transcript
        .recent_by_author(speaker, 2)
        .into_iter()
        .map(normalize_for_comparison)
        .any(|prev| {
            !prev.is_empty()
                && (prev == current || prev.contains(&current) || current.contains(&prev))
        })
}

fn has_other_reference(normalized_text: &str, other_last: &str) -> bool {
    let keywords = extract_keywords(other_last, REFERENCE_KEYWORD_MIN_LEN, REFERENCE_MAX_KEYWORDS);
    keywords.is_empty() || has_keyword_hit(normalized_text, &keywords)
}

fn has_agent_prompt_signal(normalized_text: &str, agent_prompt: &str) -> bool {
    let tags = parse_agent_prompt_tags(agent_prompt);
    if tags.is_empty() {
        return true;
    }

    tags.iter().any(|tag| {
        let keywords = extract_keywords(tag, TAG_KEYWORD_MIN_LEN, TAG_MAX_KEYWORDS);
        has_keyword_hit(normalized_text, &keywords)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debate::transcript::TranscriptEntry;

    const SOLID: &str = "Hybrid schedules keep the collaboration benefits of offices while \
                         cutting commuting costs. What would you measure first?";

    fn entry(author: &str, text: &str) -> TranscriptEntry {
        TranscriptEntry {
            author: author.to_string(),
            text: text.to_string(),
            raw_text: text.to_string(),
            thinking_text: String::new(),
        }
    }

    #[test]
    fn test_empty_reply_short_circuits() {
        for text in ["", "   ", "\n\t\n"] {
            let result = validate_turn_output(text, "Other", "economist", "a long point about budgets and deadlines here");
            assert_eq!(result.blocking, vec![TurnIssue::EmptyReply]);
            assert!(result.warnings.is_empty());
        }
    }

    #[test]
    fn test_too_short() {
        let result = validate_turn_output("Fair point, but why?", "Other", "", "");
        assert_eq!(result.blocking, vec![TurnIssue::TooShort]);
    }

    #[test]
    fn test_solid_turn_passes() {
        let result = validate_turn_output(SOLID, "Other", "", "");
        assert!(!result.is_blocked());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_boilerplate_blocks_short_replies() {
        let text = "Okay, I'm ready to be part of this discussion. Let's begin whenever you want!";
        let result = validate_turn_output(text, "Other", "", "");
        assert!(result.blocking.contains(&TurnIssue::LowValueBoilerplate));
        assert!(is_low_value_turn("OKAY... so we BEGIN now"));
    }

    #[test]
    fn test_lets_begin_matches_with_or_without_apostrophe() {
        assert!(is_low_value_turn("Lets begin."));
        assert!(is_low_value_turn("Let's begin."));
        assert!(!is_low_value_turn("Letters begin to pile up."));
    }

    #[test]
    fn test_boilerplate_ignored_in_long_replies() {
        let text = format!("I'm ready to dig in. {}", SOLID.repeat(3));
        assert!(!is_low_value_turn(&text));
    }

    #[test]
    fn test_weak_reference_warning() {
        let other_last = "Asynchronous communication reduces meeting overload dramatically.";
        let result = validate_turn_output(SOLID, "Right Analyst", "", other_last);
        assert_eq!(
            result.warnings,
            vec![TurnIssue::WeakReference {
                other: "Right Analyst".to_string()
            }]
        );
        assert!(!result.is_blocked());
    }

    #[test]
    fn test_single_keyword_hit_is_enough() {
        let other_last = "Offices matter less than people think for collaboration outcomes.";
        let result = validate_turn_output(SOLID, "Right Analyst", "", other_last);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_short_other_message_is_not_checked() {
        let result = validate_turn_output(SOLID, "Right Analyst", "", "Nope, disagree.");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_agent_prompt_signal() {
        let missing = validate_turn_output(SOLID, "Other", "statistician; quotes numbers", "");
        assert_eq!(missing.warnings, vec![TurnIssue::AgentPromptSignalMissing]);

        let present = validate_turn_output(SOLID, "Other", "focus on costs; be blunt", "");
        assert!(present.warnings.is_empty());
    }

    #[test]
    fn test_near_duplicate_of_own_previous_entry() {
        let mut transcript = Transcript::new();
        transcript.push(entry("Left", SOLID));
        transcript.push(entry("Right", "Something else entirely, about budgets and teams."));

        let rephrased = SOLID.to_uppercase().replace('?', "!!");
        assert!(is_near_duplicate(&rephrased, &transcript, "Left"));
        assert!(!is_near_duplicate(&rephrased, &transcript, "Right"));

        let result = validate_turn(
            &rephrased,
            TurnContext {
                speaker: "Left",
                other: "Right",
                agent_prompt: "",
                transcript: &transcript,
            },
        );
        assert!(result.blocking.contains(&TurnIssue::NearDuplicate));
    }

    #[test]
    fn test_near_duplicate_only_looks_at_last_two() {
        let mut transcript = Transcript::new();
        transcript.push(entry("Left", SOLID));
        transcript.push(entry("Left", "A second distinct idea about measuring output."));
        transcript.push(entry("Left", "A third distinct idea about async rituals."));
        assert!(!is_near_duplicate(SOLID, &transcript, "Left"));
    }

    #[test]
    fn test_containment_counts_as_duplicate() {
        let mut transcript = Transcript::new();
        transcript.push(entry("Left", "Hybrid schedules keep the collaboration benefits"));
        assert!(is_near_duplicate(SOLID, &transcript, "Left"));
    }
}
