//! Answer values and per-company answer statistics.

use serde::{Deserialize, Serialize};

pub const ANSWER_YES: &str = "Y";
pub const ANSWER_NO: &str = "N";
pub const ANSWER_DONT_KNOW: &str = "DN";

/// Default value of every freshly seeded answer slot.
pub const ANSWER_UNANSWERED: &str = "?";

/// All valid answer values.
pub const VALID_ANSWERS: &[&str] = &[ANSWER_YES, ANSWER_NO, ANSWER_DONT_KNOW, ANSWER_UNANSWERED];

/// Validate that an answer string is one of the accepted values.
pub fn validate_answer(answer: &str) -> Result<(), String> {
    if VALID_ANSWERS.contains(&answer) {
        Ok(())
    } else {
        Err(format!(
            "Invalid answer '{answer}'. Must be one of: {}",
            VALID_ANSWERS.join(", ")
        ))
    }
}

/// Tallies of answers for one company, restricted to one criterion type.
///
/// Unanswered slots count towards `total` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerStats {
    pub answered_y: u32,
    pub answered_n: u32,
    pub answered_dn: u32,
    pub total: u32,
}

impl AnswerStats {
    pub fn tally<'a, I>(answers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        answers.into_iter().fold(Self::default(), |mut stats, value| {
            match value {
                ANSWER_YES => stats.answered_y += 1,
                ANSWER_NO => stats.answered_n += 1,
                ANSWER_DONT_KNOW => stats.answered_dn += 1,
                _ => {}
            }
            stats.total += 1;
            stats
        })
    }
}
