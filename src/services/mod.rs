pub mod trivia;

pub use trivia::{QuestionListing, QuestionStore, QuizOutcome, TriviaService};
