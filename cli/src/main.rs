use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use bookdesk::config::DEFAULT_BASE_URL;
use bookdesk::forms::{BookForm, BookFormDefaults, LoginForm, RegisterForm};
use bookdesk::net::api::ApiResponse;
use bookdesk::net::upload::FileUpload;
use bookdesk::notify::Notice;
use bookdesk::pages::book_editor::{self, BookEditor};
use bookdesk::pages::books::{BooksPage, BooksView};
use bookdesk::pages::login;
use bookdesk::state::query_cache::BookQueries;
use bookdesk::{ApiClient, ApiError, ClientConfig, TokenStore};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{0}")]
    Rejected(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "bookdesk", about = "Book catalog admin CLI")]
struct Cli {
    #[arg(long, env = "BOOKDESK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "BOOKDESK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long, env = "BOOKDESK_STALE_SECS", default_value_t = 10)]
    stale_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and print the access token on stdout.
    Login {
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Create an account and print the access token on stdout.
    Register {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    Books(BooksCommand),
}

#[derive(Args, Debug)]
struct BooksCommand {
    #[command(subcommand)]
    command: BooksSubcommand,
}

#[derive(Subcommand, Debug)]
enum BooksSubcommand {
    List {
        /// Case-insensitive title filter.
        #[arg(long, default_value = "")]
        search: String,
    },
    Show {
        book_id: String,
    },
    Create(BookArgs),
    /// Update a book; omitted text fields keep their current values.
    Edit {
        book_id: String,
        #[command(flatten)]
        fields: BookArgs,
    },
    Delete {
        book_id: String,
    },
    /// Save the book file as `<title>.pdf`.
    Download {
        book_id: String,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
struct BookArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    genre: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    cover_image: Option<PathBuf>,
    #[arg(long)]
    file: Option<PathBuf>,
}

struct CliContext {
    client: ApiClient,
    queries: BookQueries,
}

impl CliContext {
    fn books(&self) -> BooksPage {
        BooksPage::new(self.client.clone(), self.queries.clone())
    }

    fn editor(&self) -> BookEditor {
        BookEditor::new(self.client.clone(), self.queries.clone())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(?error, "command failed");
            eprintln!("{}", Notice::error(error.to_string()));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ClientConfig {
        base_url: cli.base_url.trim_end_matches('/').to_owned(),
        token: cli.token.filter(|t| !t.is_empty()),
        stale_time: Duration::from_secs(cli.stale_secs),
    };
    let tokens = TokenStore::with_token(config.token.clone());
    let ctx = CliContext {
        client: ApiClient::new(&config, tokens)?,
        queries: BookQueries::new(config.stale_time),
    };

    match cli.command {
        Command::Login { email, password } => {
            let notice = login::login(&ctx.client, &LoginForm { email, password }).await;
            finish_session(&ctx, notice)
        }
        Command::Register { name, email, password } => {
            let notice = login::register(&ctx.client, &RegisterForm { name, email, password }).await;
            finish_session(&ctx, notice)
        }
        Command::Books(books) => run_books(&ctx, books).await,
    }
}

fn finish_session(ctx: &CliContext, notice: Notice) -> Result<(), CliError> {
    if notice.is_error() {
        return Err(CliError::Rejected(notice.message));
    }
    if let Some(token) = ctx.client.tokens().token() {
        println!("{token}");
    }
    eprintln!("{notice}");
    Ok(())
}

async fn run_books(ctx: &CliContext, books: BooksCommand) -> Result<(), CliError> {
    match books.command {
        BooksSubcommand::List { search } => {
            let view = ctx.books().view(&search).await?;
            print_books(&view);
            Ok(())
        }
        BooksSubcommand::Show { book_id } => {
            let book = ctx.editor().book(&book_id).await?;
            print_json(&serde_json::to_value(book)?)
        }
        BooksSubcommand::Create(fields) => {
            let form = book_form(fields, None).await?;
            let result = ctx.editor().submit_create(form).await;
            report(result, book_editor::CREATE_SUCCESS, book_editor::CREATE_FAILED)
        }
        BooksSubcommand::Edit { book_id, fields } => {
            let editor = ctx.editor();
            let defaults = editor.load(&book_id).await?;
            let form = book_form(fields, Some(defaults)).await?;
            let result = editor.submit_edit(&book_id, form).await;
            report(result, book_editor::EDIT_SUCCESS, book_editor::EDIT_FAILED)
        }
        BooksSubcommand::Delete { book_id } => {
            let result = ctx.editor().delete(&book_id).await;
            report(result, book_editor::DELETE_SUCCESS, book_editor::DELETE_FAILED)
        }
        BooksSubcommand::Download { book_id, out } => {
            let book = ctx.editor().book(&book_id).await?;
            let path = ctx.books().download(&book, &out).await?;
            eprintln!("{}", Notice::success(format!("Saved {}", path.display())));
            Ok(())
        }
    }
}

/// Merge CLI flags over editor defaults and load any files named.
async fn book_form(args: BookArgs, defaults: Option<BookFormDefaults>) -> Result<BookForm, CliError> {
    let mut form = defaults.map(BookFormDefaults::into_form).unwrap_or_default();
    merge_text(&mut form.title, args.title);
    merge_text(&mut form.genre, args.genre);
    merge_text(&mut form.description, args.description);
    form.cover_image = load_upload(args.cover_image.as_deref()).await?;
    form.file = load_upload(args.file.as_deref()).await?;
    Ok(form)
}

fn merge_text(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *slot = value;
    }
}

async fn load_upload(path: Option<&Path>) -> Result<Option<FileUpload>, CliError> {
    match path {
        Some(path) => Ok(Some(FileUpload::from_path(path).await?)),
        None => Ok(None),
    }
}

fn report(result: Result<ApiResponse, ApiError>, success: &str, failure: &str) -> Result<(), CliError> {
    match result {
        Ok(response) => {
            let body = response.value();
            if !body.is_null() {
                print_json(&body)?;
            }
            eprintln!("{}", Notice::success(success));
            Ok(())
        }
        Err(error) => {
            tracing::warn!(%error, "mutation failed");
            Err(CliError::Rejected(Notice::from_error(&error, failure).message))
        }
    }
}

fn print_books(view: &BooksView) {
    println!("{:<26} {:<32} {:<14} {:<20} CREATED", "ID", "TITLE", "GENRE", "AUTHOR");
    for row in &view.rows {
        println!(
            "{:<26} {:<32} {:<14} {:<20} {}",
            row.id, row.title, row.genre, row.author_name, row.created_on
        );
    }
    eprintln!("{}", view.summary());
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
