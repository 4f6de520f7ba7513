use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;

use crate::db::models::{Category, Question};
use crate::db::Db;
use crate::engine::{self, CategorySelector, Draw};
use crate::error::{invalid, OptionExt, Result, ResultExt, TriviaError};
use crate::models::NewQuestion;
use crate::names;

// ---------------------------------------------------------------------------
// QuestionStore trait (DIP: the service defines the abstraction it needs)
// ---------------------------------------------------------------------------

/// Record store the service reads questions and categories from. Category
/// arguments here are always internal (one-based) keys.
#[cfg_attr(test, mockall::automock)]
pub trait QuestionStore: Send + Sync {
    fn list_questions(
        &self,
    ) -> impl std::future::Future<Output = color_eyre::Result<Vec<Question>>> + Send;

    fn list_categories(
        &self,
    ) -> impl std::future::Future<Output = color_eyre::Result<Vec<Category>>> + Send;

    fn list_questions_by_category(
        &self,
        category: i64,
    ) -> impl std::future::Future<Output = color_eyre::Result<Vec<Question>>> + Send;

    fn get_question(
        &self,
        question_id: i64,
    ) -> impl std::future::Future<Output = color_eyre::Result<Option<Question>>> + Send;

    fn get_category(
        &self,
        category_id: i64,
    ) -> impl std::future::Future<Output = color_eyre::Result<Option<Category>>> + Send;

    fn insert_question(
        &self,
        question: &str,
        answer: &str,
        difficulty: i64,
        category: i64,
    ) -> impl std::future::Future<Output = color_eyre::Result<i64>> + Send;

    /// Resolves to `false` when no question had that id.
    fn delete_question(
        &self,
        question_id: i64,
    ) -> impl std::future::Future<Output = color_eyre::Result<bool>> + Send;
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionListing {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    /// Category labels indexed by external id; only set for the full listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QuizOutcome {
    /// An unseen question; the client adds its id to `previous_questions`.
    Question(Question),
    /// Every question in the pool has been served. The quiz is over.
    Exhausted,
    /// The selector matched no questions at all.
    CategoryNotFound,
}

// ---------------------------------------------------------------------------
// TriviaService
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct TriviaService<S: QuestionStore = Db> {
    store: S,
    page_size: i64,
}

impl<S: QuestionStore> TriviaService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            page_size: names::QUESTIONS_PER_PAGE,
        }
    }

    /// Overrides the number of questions per page. Must be at least 1.
    pub fn with_page_size(mut self, page_size: i64) -> Result<Self> {
        if page_size < 1 {
            return Err(invalid(format!(
                "page size must be at least 1, got {page_size}"
            )));
        }
        self.page_size = page_size;
        Ok(self)
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Category labels in external id order (index 0 is internal key 1).
    pub async fn categories(&self) -> Result<Vec<String>> {
        let categories = self
            .store
            .list_categories()
            .await
            .storage("could not list categories")?;

        Ok(categories.into_iter().map(|c| c.label).collect())
    }

    /// One page of all questions. A page below 1 is rejected before the store
    /// is read. An empty question bank is `NotFound`; a page past the end of a
    /// non-empty bank is an empty page.
    pub async fn paginated_questions(&self, page: i64) -> Result<QuestionListing> {
        engine::check_page(page, self.page_size)?;

        let questions = self
            .store
            .list_questions()
            .await
            .storage("could not list questions")?;

        if questions.is_empty() {
            tracing::warn!("question bank is empty");
            return Err(TriviaError::NotFound("questions".to_string()));
        }

        let current = engine::paginate(&questions, page, self.page_size)?.to_vec();

        tracing::debug!(
            "page {page}: {} of {} questions",
            current.len(),
            questions.len()
        );

        Ok(QuestionListing {
            questions: current,
            total_questions: questions.len(),
            categories: Some(self.categories().await?),
            current_category: None,
        })
    }

    /// Questions whose text contains `term`, ignoring case. No matches is an
    /// empty listing, not an error.
    pub async fn searched_questions(&self, term: Option<&str>) -> Result<QuestionListing> {
        let term = term.ok_or_else(|| invalid("search term is required"))?;

        let questions = self
            .store
            .list_questions()
            .await
            .storage("could not list questions")?;

        let found = engine::search(&questions, term);
        tracing::debug!("search {term:?} matched {} questions", found.len());

        Ok(QuestionListing {
            total_questions: found.len(),
            questions: found,
            categories: None,
            current_category: None,
        })
    }

    /// Every question in the category with external id `category`.
    pub async fn questions_for_category(&self, category: i64) -> Result<QuestionListing> {
        let key = engine::to_internal(category);

        let current = self
            .store
            .get_category(key)
            .await
            .storage("could not get category")?
            .or_not_found(|| format!("category {category}"))?;

        let questions = self
            .store
            .list_questions_by_category(key)
            .await
            .storage("could not list questions by category")?;

        Ok(QuestionListing {
            total_questions: questions.len(),
            questions,
            categories: None,
            current_category: Some(current.label),
        })
    }

    pub async fn question(&self, question_id: i64) -> Result<Question> {
        self.store
            .get_question(question_id)
            .await
            .storage("could not get question")?
            .or_not_found(|| format!("question {question_id}"))
    }

    /// Draws the next quiz question with the thread-local generator.
    pub async fn next_quiz_question(
        &self,
        selector: CategorySelector,
        excluded: &HashSet<i64>,
    ) -> Result<QuizOutcome> {
        let pool = self.quiz_pool(selector).await?;
        Ok(settle(selector, &pool, excluded, &mut rand::thread_rng()))
    }

    /// Same as [`Self::next_quiz_question`] with a caller-supplied generator.
    pub async fn next_quiz_question_with_rng<R: Rng + ?Sized>(
        &self,
        selector: CategorySelector,
        excluded: &HashSet<i64>,
        rng: &mut R,
    ) -> Result<QuizOutcome> {
        let pool = self.quiz_pool(selector).await?;
        Ok(settle(selector, &pool, excluded, rng))
    }

    async fn quiz_pool(&self, selector: CategorySelector) -> Result<Vec<Question>> {
        engine::candidate_pool(&self.store, selector)
            .await
            .storage("could not load quiz questions")
    }

    /// Validates and stores a new question, returning its id.
    pub async fn create_question(&self, new: &NewQuestion) -> Result<i64> {
        let question = new.question.trim();
        let answer = new.answer.trim();
        if question.is_empty() || answer.is_empty() {
            return Err(invalid("question and answer must not be empty"));
        }
        if !(names::MIN_DIFFICULTY..=names::MAX_DIFFICULTY).contains(&new.difficulty) {
            return Err(invalid(format!(
                "difficulty must be between {} and {}, got {}",
                names::MIN_DIFFICULTY,
                names::MAX_DIFFICULTY,
                new.difficulty
            )));
        }

        let key = engine::to_internal(new.category);
        self.store
            .get_category(key)
            .await
            .storage("could not get category")?
            .or_not_found(|| format!("category {}", new.category))?;

        let question_id = self
            .store
            .insert_question(question, answer, new.difficulty, key)
            .await
            .storage("could not create question")?;

        tracing::info!("question {question_id} added to category {}", new.category);
        Ok(question_id)
    }

    pub async fn delete_question(&self, question_id: i64) -> Result<()> {
        let deleted = self
            .store
            .delete_question(question_id)
            .await
            .storage("could not delete question")?;

        if !deleted {
            return Err(TriviaError::NotFound(format!("question {question_id}")));
        }

        tracing::info!("question {question_id} deleted");
        Ok(())
    }
}

fn settle<R: Rng + ?Sized>(
    selector: CategorySelector,
    pool: &[Question],
    excluded: &HashSet<i64>,
    rng: &mut R,
) -> QuizOutcome {
    if pool.is_empty() {
        tracing::warn!("quiz category {selector} has no questions");
        return QuizOutcome::CategoryNotFound;
    }

    match engine::draw(pool, excluded, rng) {
        Draw::Question(question) => {
            tracing::info!(
                "quiz draw from {selector}: question {} ({} already served)",
                question.id,
                excluded.len()
            );
            QuizOutcome::Question(question.clone())
        }
        Draw::Exhausted => {
            tracing::info!("quiz pool for {selector} exhausted");
            QuizOutcome::Exhausted
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
