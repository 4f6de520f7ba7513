use trivia::db::Db;

pub async fn create_test_db() -> Db {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path =
        std::env::temp_dir().join(format!("trivia_test_{}_{}.db", std::process::id(), id));
    // Clean up leftover file from previous runs
    let _ = std::fs::remove_file(&path);
    let url = format!("sqlite://{}", path.display());
    Db::new(&url).await.expect("failed to create test database")
}

/// A database with the default categories and a few questions per category.
/// Question `n` (1-based) lands in internal category `(n - 1) % 3 + 1`.
#[allow(dead_code)]
pub async fn create_seeded_db(questions: usize) -> Db {
    let db = create_test_db().await;
    db.seed_default_categories()
        .await
        .expect("failed to seed categories");
    for n in 1..=questions {
        let category = ((n - 1) % 3 + 1) as i64;
        db.create_question(
            &format!("Question {n}"),
            &format!("Answer {n}"),
            1,
            category,
        )
        .await
        .expect("failed to insert question");
    }
    db
}
