use crate::db::models::Question;

/// Records that expose one free-text field to search over.
pub trait Searchable {
    fn search_text(&self) -> &str;
}

impl Searchable for Question {
    fn search_text(&self) -> &str {
        &self.question
    }
}

/// Case-insensitive literal substring match, keeping input order.
///
/// An empty term matches every record.
pub fn search<T: Searchable + Clone>(records: &[T], term: &str) -> Vec<T> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| record.search_text().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
