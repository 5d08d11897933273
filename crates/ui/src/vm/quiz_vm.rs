use quiz_core::model::OPTION_COUNT;
use services::QuizSnapshot;

use crate::vm::time_fmt::format_time_left;

/// Keys the option list reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionKey {
    Previous,
    Next,
    /// Space or Enter on the focused option.
    Activate(usize),
    /// Digits `1`..=`4`.
    Digit(u32),
}

/// Option the key selects, if any.
///
/// Arrow keys step from the current selection (or from the first option when
/// nothing is selected) and stop at the ends.
#[must_use]
pub fn keyboard_selection(current: Option<usize>, key: OptionKey) -> Option<usize> {
    let last = OPTION_COUNT - 1;
    match key {
        OptionKey::Next => Some((current.unwrap_or(0) + 1).min(last)),
        OptionKey::Previous => Some(current.unwrap_or(0).saturating_sub(1)),
        OptionKey::Activate(index) => (index <= last).then_some(index),
        OptionKey::Digit(digit) => usize::try_from(digit)
            .ok()
            .and_then(|d| d.checked_sub(1))
            .filter(|index| *index <= last),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionRowVm {
    pub index: usize,
    pub text: String,
    pub selected: bool,
    pub aria_label: String,
}

impl OptionRowVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.selected {
            "btn option btn-primary"
        } else {
            "btn option btn-ghost"
        }
    }
}

/// Everything the quiz screen renders for the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub category: String,
    pub difficulty: String,
    pub prompt: String,
    pub options: Vec<OptionRowVm>,
    pub selected_text: Option<String>,
    pub progress_label: String,
    pub progress_percent: u32,
    pub time_left: String,
    pub can_go_back: bool,
    pub can_advance: bool,
    pub is_last: bool,
}

impl QuizVm {
    /// `None` when there is no question to show.
    #[must_use]
    pub fn from_snapshot(snapshot: &QuizSnapshot) -> Option<Self> {
        let question = snapshot.question.as_ref()?;
        let selection = snapshot.selection;

        let options = question
            .options()
            .iter()
            .enumerate()
            .map(|(index, text)| OptionRowVm {
                index,
                text: text.clone(),
                selected: selection == Some(index),
                aria_label: format!("Option {}: {text}", index + 1),
            })
            .collect();

        Some(Self {
            category: question.category_label().to_string(),
            difficulty: question
                .difficulty()
                .map(|d| d.as_str().to_uppercase())
                .unwrap_or_default(),
            prompt: question.prompt().to_string(),
            options,
            selected_text: selection
                .and_then(|index| question.option(index))
                .map(str::to_owned),
            progress_label: snapshot.progress_label(),
            progress_percent: snapshot.progress_percent(),
            time_left: format_time_left(snapshot.seconds_remaining),
            can_go_back: !snapshot.is_first(),
            can_advance: selection.is_some(),
            is_last: snapshot.is_last(),
        })
    }

    #[must_use]
    pub fn advance_label(&self) -> &'static str {
        if self.is_last { "Finish" } else { "Next" }
    }
}
