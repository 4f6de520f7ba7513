//! The pure parts of question selection: category key mapping, text search,
//! paging and quiz draws. Nothing here touches the store except
//! [`quiz::candidate_pool`].

pub mod category;
pub mod pager;
pub mod quiz;
pub mod search;

pub use category::{to_external, to_internal};
pub use pager::{check_page, paginate};
pub use quiz::{candidate_pool, draw, CategorySelector, Draw};
pub use search::{search, Searchable};
