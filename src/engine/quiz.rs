use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::category;
use crate::db::models::Question;
use crate::error::{invalid, TriviaError};
use crate::names;
use crate::services::QuestionStore;

/// Which questions a quiz draws from: every question, or one category
/// addressed by its external (zero-based) id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySelector {
    All,
    Category(i64),
}

impl fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategorySelector::All => f.write_str(names::ALL_CATEGORIES),
            CategorySelector::Category(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for CategorySelector {
    type Err = TriviaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(names::ALL_CATEGORIES) {
            return Ok(CategorySelector::All);
        }
        s.parse()
            .map(CategorySelector::Category)
            .map_err(|_| invalid(format!("quiz category must be \"all\" or an integer, got {s:?}")))
    }
}

/// Accepts `"all"`, a JSON number, or a numeric string (form posts send
/// everything as strings).
impl<'de> Deserialize<'de> for CategorySelector {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        struct Vis;
        impl<'de> serde::de::Visitor<'de> for Vis {
            type Value = CategorySelector;
            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("\"all\", a category id, or a numeric string")
            }
            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(CategorySelector::Category(v))
            }
            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .map(CategorySelector::Category)
                    .map_err(E::custom)
            }
            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }
        }
        d.deserialize_any(Vis)
    }
}

impl Serialize for CategorySelector {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            CategorySelector::All => s.serialize_str(names::ALL_CATEGORIES),
            CategorySelector::Category(id) => s.serialize_i64(*id),
        }
    }
}

/// Result of one draw. `Exhausted` is terminal: once every question in the
/// pool has been served there is nothing left to return.
#[derive(Debug, PartialEq, Eq)]
pub enum Draw<'a> {
    Question(&'a Question),
    Exhausted,
}

/// Fetches every question the selector covers, before any exclusion.
pub async fn candidate_pool<S: QuestionStore>(
    store: &S,
    selector: CategorySelector,
) -> color_eyre::Result<Vec<Question>> {
    match selector {
        CategorySelector::All => store.list_questions().await,
        CategorySelector::Category(external) => {
            store
                .list_questions_by_category(category::to_internal(external))
                .await
        }
    }
}

/// Questions of `pool` whose id is not in `excluded`, in pool order.
pub fn remaining<'a>(pool: &'a [Question], excluded: &HashSet<i64>) -> Vec<&'a Question> {
    pool.iter().filter(|q| !excluded.contains(&q.id)).collect()
}

/// Picks one unseen question uniformly at random.
///
/// The choice is uniform over what is left after exclusion, so an excluded
/// question never comes back. Neither input is modified; adding the returned
/// id to the exclusion set is the caller's job.
pub fn draw<'a, R: Rng + ?Sized>(
    pool: &'a [Question],
    excluded: &HashSet<i64>,
    rng: &mut R,
) -> Draw<'a> {
    match remaining(pool, excluded).choose(rng) {
        Some(&question) => Draw::Question(question),
        None => Draw::Exhausted,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn question(id: i64, category: i64) -> Question {
        Question {
            id,
            question: format!("Question {id}"),
            answer: format!("Answer {id}"),
            difficulty: 1,
            category,
        }
    }

    fn pool(ids: impl IntoIterator<Item = i64>) -> Vec<Question> {
        ids.into_iter().map(|id| question(id, 1)).collect()
    }

    #[test]
    fn single_unseen_question_is_always_chosen() {
        let pool = pool([1, 2, 3]);
        let excluded = HashSet::from([1, 2]);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(draw(&pool, &excluded, &mut rng), Draw::Question(&pool[2]));
        }
    }

    #[test]
    fn everything_excluded_is_exhausted() {
        let pool = pool([1, 2, 3]);
        let excluded = HashSet::from([1, 2, 3]);
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(draw(&pool, &excluded, &mut rng), Draw::Exhausted);
    }

    #[test]
    fn empty_pool_is_exhausted() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(draw(&[], &HashSet::new(), &mut rng), Draw::Exhausted);
    }

    #[test]
    fn exclusions_outside_the_pool_are_ignored() {
        let pool = pool([4]);
        let excluded = HashSet::from([1, 2, 3, 99]);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(draw(&pool, &excluded, &mut rng), Draw::Question(&pool[0]));
    }

    #[test]
    fn serving_every_question_terminates_without_repeats() {
        let pool = pool(1..=12);
        let mut excluded = HashSet::new();
        let mut rng = StdRng::seed_from_u64(42);
        let mut calls = 0;

        while let Draw::Question(q) = draw(&pool, &excluded, &mut rng) {
            assert!(excluded.insert(q.id), "question {} served twice", q.id);
            calls += 1;
            assert!(calls <= pool.len());
        }

        assert_eq!(calls, pool.len());
        assert_eq!(excluded.len(), pool.len());
    }

    #[test]
    fn draw_does_not_touch_its_inputs() {
        let pool = pool([1, 2, 3]);
        let before = pool.clone();
        let excluded = HashSet::from([2]);
        let mut rng = StdRng::seed_from_u64(3);

        let _ = draw(&pool, &excluded, &mut rng);

        assert_eq!(pool, before);
        assert_eq!(excluded, HashSet::from([2]));
    }

    #[test]
    fn every_unseen_question_gets_picked() {
        let pool = pool([1, 2, 3, 4]);
        let excluded = HashSet::from([3]);
        let mut rng = StdRng::seed_from_u64(11);
        let mut counts = std::collections::HashMap::new();

        for _ in 0..3000 {
            if let Draw::Question(q) = draw(&pool, &excluded, &mut rng) {
                *counts.entry(q.id).or_insert(0) += 1;
            }
        }

        assert!(!counts.contains_key(&3));
        for id in [1, 2, 4] {
            let n = counts.get(&id).copied().unwrap_or(0);
            assert!((800..=1200).contains(&n), "question {id} drawn {n} times");
        }
    }

    #[test]
    fn remaining_keeps_pool_order() {
        let pool = pool([5, 1, 9, 3]);
        let excluded = HashSet::from([1]);
        let ids: Vec<i64> = remaining(&pool, &excluded).iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![5, 9, 3]);
    }

    #[test]
    fn selector_parses_all_and_ids() {
        assert_eq!("all".parse::<CategorySelector>().unwrap(), CategorySelector::All);
        assert_eq!("ALL".parse::<CategorySelector>().unwrap(), CategorySelector::All);
        assert_eq!(
            " 3 ".parse::<CategorySelector>().unwrap(),
            CategorySelector::Category(3)
        );
        assert!(matches!(
            "science".parse::<CategorySelector>(),
            Err(TriviaError::Validation(_))
        ));
    }

    #[test]
    fn selector_deserializes_numbers_and_strings() {
        let from_number: CategorySelector = serde_json::from_str("2").unwrap();
        let from_string: CategorySelector = serde_json::from_str("\"2\"").unwrap();
        let all: CategorySelector = serde_json::from_str("\"all\"").unwrap();

        assert_eq!(from_number, CategorySelector::Category(2));
        assert_eq!(from_string, CategorySelector::Category(2));
        assert_eq!(all, CategorySelector::All);
        assert!(serde_json::from_str::<CategorySelector>("\"two\"").is_err());
        assert!(serde_json::from_str::<CategorySelector>("true").is_err());
    }
}
