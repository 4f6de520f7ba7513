// Listing defaults
pub const QUESTIONS_PER_PAGE: i64 = 10;
pub const FIRST_PAGE: i64 = 1;

// Quiz
pub const ALL_CATEGORIES: &str = "all";

// Question validation
pub const MIN_DIFFICULTY: i64 = 1;
pub const MAX_DIFFICULTY: i64 = 5;

// Seed data, in internal key order (Science = 1)
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

// Logging
pub const DEFAULT_LOG_FILTER: &str = "trivia=info";
