//! Agent prompt tag parsing.

/// At most this many tags are taken from an agent prompt.
pub const MAX_AGENT_PROMPT_TAGS: usize = 5;

/// Split a free-text agent prompt into short tags.
///
/// Splits on `;`, `,` and newlines, trims each piece, drops empty pieces
/// and keeps the first [`MAX_AGENT_PROMPT_TAGS`].
pub fn parse_agent_prompt_tags(agent_prompt: &str) -> Vec<String> {
    agent_prompt
        .split([';', ',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(MAX_AGENT_PROMPT_TAGS)
        .map(str::to_string)
        .collect()
}
