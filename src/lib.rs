pub mod db;
pub mod engine;
pub mod error;
pub mod models;
pub mod names;
pub mod services;

pub use error::TriviaError;
pub use services::{QuestionListing, QuestionStore, QuizOutcome, TriviaService};
