use std::collections::HashSet;

use serde::Deserialize;

use crate::engine::CategorySelector;

/// Deserialize a value that may be either a JSON number or a string containing a number.
/// HTML forms always send values as strings.
fn deserialize_string_or_i64<'de, D: serde::Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    struct Vis;
    impl<'de> serde::de::Visitor<'de> for Vis {
        type Value = i64;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("number or numeric string")
        }
        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }
        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(E::custom)
        }
        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<i64, E> {
            v.trim().parse().map_err(E::custom)
        }
    }
    d.deserialize_any(Vis)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Left optional so a missing term is reported as a validation failure
    /// instead of a decode error.
    #[serde(default)]
    pub search_term: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<i64>,
    #[serde(default = "all_categories")]
    pub quiz_category: CategorySelector,
}

fn all_categories() -> CategorySelector {
    CategorySelector::All
}

impl QuizRequest {
    pub fn excluded(&self) -> HashSet<i64> {
        self.previous_questions.iter().copied().collect()
    }
}

/// A question submitted by a client. `category` is the external
/// (zero-based) category id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    #[serde(deserialize_with = "deserialize_string_or_i64")]
    pub difficulty: i64,
    #[serde(deserialize_with = "deserialize_string_or_i64")]
    pub category: i64,
}
