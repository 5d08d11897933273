mod quiz_vm;
mod results_vm;
mod time_fmt;

pub use quiz_vm::{OptionKey, OptionRowVm, QuizVm, keyboard_selection};
pub use results_vm::{ResultRowVm, ResultsVm};
pub use time_fmt::{format_datetime, format_time_left};
