mod answer;
mod ids;
mod question;
mod result;

pub use answer::{Answer, AnswerSheet};
pub use ids::QuestionId;
pub use question::{Difficulty, OPTION_COUNT, ParseDifficultyError, Question, QuestionError};
pub use result::{QuizResult, ResultEntry};
