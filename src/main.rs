use std::collections::HashSet;

use clap::{Parser, Subcommand};
use serde::Serialize;
use trivia::db::Db;
use trivia::engine::CategorySelector;
use trivia::models::NewQuestion;
use trivia::{names, TriviaService};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// SQLite database address, e.g. `sqlite://trivia.db`
    #[clap(env)]
    database_url: String,

    /// Questions per page
    #[arg(long, env, default_value_t = names::QUESTIONS_PER_PAGE)]
    page_size: i64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List category labels, indexed by category id
    Categories,
    /// List one page of questions
    Questions {
        #[arg(short, long, default_value_t = names::FIRST_PAGE, allow_negative_numbers = true)]
        page: i64,
    },
    /// Find questions containing a term, ignoring case
    Search { term: String },
    /// List the questions of one category
    Category {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Draw the next quiz question
    Quiz {
        /// `all` or a category id
        #[arg(short, long, default_value = names::ALL_CATEGORIES)]
        category: CategorySelector,
        /// Ids of questions already served, comma separated
        #[arg(short, long, value_delimiter = ',')]
        exclude: Vec<i64>,
    },
    /// Add a question
    Add {
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
        #[arg(long)]
        difficulty: i64,
        #[arg(long)]
        category: i64,
    },
    /// Delete a question by id
    Delete { id: i64 },
    /// Add a category; prints its zero-based id
    AddCategory { label: String },
    /// Insert the default categories into an empty database
    Seed,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| names::DEFAULT_LOG_FILTER.to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let db = Db::new(&args.database_url).await?;
    let service = TriviaService::new(db.clone()).with_page_size(args.page_size)?;

    match args.command {
        Command::Categories => print_json(&service.categories().await?),
        Command::Questions { page } => print_json(&service.paginated_questions(page).await?),
        Command::Search { term } => print_json(&service.searched_questions(Some(&term)).await?),
        Command::Category { id } => print_json(&service.questions_for_category(id).await?),
        Command::Quiz { category, exclude } => {
            let excluded: HashSet<i64> = exclude.into_iter().collect();
            print_json(&service.next_quiz_question(category, &excluded).await?)
        }
        Command::Add {
            question,
            answer,
            difficulty,
            category,
        } => {
            let id = service
                .create_question(&NewQuestion {
                    question,
                    answer,
                    difficulty,
                    category,
                })
                .await?;
            print_json(&serde_json::json!({ "created": id }))
        }
        Command::Delete { id } => {
            service.delete_question(id).await?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
        Command::AddCategory { label } => {
            let label = label.trim();
            if label.is_empty() {
                color_eyre::eyre::bail!("category label must not be empty");
            }
            let key = db.create_category(label).await?;
            print_json(&serde_json::json!({ "created": trivia::engine::to_external(key) }))
        }
        Command::Seed => {
            let added = db.seed_default_categories().await?;
            print_json(&serde_json::json!({ "seeded": added }))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> color_eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
