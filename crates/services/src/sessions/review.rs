/// Display tag for one option in review mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionTag {
    /// The option is the correct answer.
    Correct,
    /// The user picked this option and it was not the correct answer.
    WrongChosen,
    /// Everything else, including every non-correct option of an unanswered
    /// question.
    Neutral,
}

/// Tag policy for a single option in review mode.
///
/// The correct answer is always tagged `Correct`, even when the user picked
/// it; a pick is only surfaced as such when it was wrong. An unanswered
/// question (`user_answer` of `None`) tags nothing as the user's choice.
#[must_use]
pub fn tag_for(option: &str, correct_answer: &str, user_answer: Option<&str>) -> OptionTag {
    if option == correct_answer {
        OptionTag::Correct
    } else if user_answer == Some(option) {
        OptionTag::WrongChosen
    } else {
        OptionTag::Neutral
    }
}
