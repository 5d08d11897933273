mod quiz;
mod results;
mod start;
mod state;

pub use quiz::QuizView;
pub use results::ResultsView;
pub use start::StartView;
pub use state::ViewError;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
