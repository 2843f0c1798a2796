use std::process;

use anyhow::{Result, bail};
use board_client::{BoardClient, BoardClientError, Post};
use clap::{Parser, Subcommand};

const DEFAULT_HTTP_SERVER: &str = "http://127.0.0.1:8080";
const SERVER_ENV: &str = "BOARD_HTTP_URL";

#[derive(Debug, Parser)]
#[command(name = "board-cli", version, about = "CLI клиент для board-server")]
struct Cli {
    /// Адрес сервера (по умолчанию BOARD_HTTP_URL или http://127.0.0.1:8080).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Печатать результат в JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Создание поста.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Получение поста по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Список постов, от новых к старым.
    List {
        #[arg(long, default_value_t = 1)]
        page: i32,
        #[arg(long, default_value_t = BoardClient::DEFAULT_PAGE_SIZE)]
        size: i32,
    },
    /// Частичное редактирование поста.
    ///
    /// Меняются только переданные поля.
    Edit {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Удаление поста.
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let server = resolve_server(cli.server, std::env::var(SERVER_ENV).ok());
    let client = BoardClient::new(server).map_err(map_client_error)?;

    match cli.command {
        Command::Create { title, content } => {
            client
                .create_post(&title, &content)
                .await
                .map_err(map_client_error)?;
            println!("Пост создан");
        }
        Command::Get { id } => {
            let post = client.get_post(id).await.map_err(map_client_error)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&post)?);
            } else {
                print_post(&post);
            }
        }
        Command::List { page, size } => {
            let posts = client
                .list_posts(page, size)
                .await
                .map_err(map_client_error)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else {
                print_list(page, &posts);
            }
        }
        Command::Edit { id, title, content } => {
            if title.is_none() && content.is_none() {
                bail!("укажите --title и/или --content");
            }
            client
                .edit_post(id, title.as_deref(), content.as_deref())
                .await
                .map_err(map_client_error)?;
            println!("Пост обновлён: id={id}");
        }
        Command::Delete { id } => {
            client.delete_post(id).await.map_err(map_client_error)?;
            println!("Пост удалён: id={id}");
        }
    }

    Ok(())
}

fn resolve_server(flag: Option<String>, env: Option<String>) -> String {
    let raw = flag
        .or(env)
        .map(|server| server.trim().to_string())
        .filter(|server| !server.is_empty())
        .unwrap_or_else(|| DEFAULT_HTTP_SERVER.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn map_client_error(err: BoardClientError) -> anyhow::Error {
    let message = match err {
        BoardClientError::NotFound(message) => format!("пост не найден: {message}"),
        BoardClientError::Validation { message, fields } => {
            let details = fields
                .iter()
                .map(|(field, reason)| format!("{field}: {reason}"))
                .collect::<Vec<_>>()
                .join("; ");
            format!("{message} ({details})")
        }
        BoardClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        BoardClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_post(post: &Post) {
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("content: {}", post.content);
}

fn print_list(page: i32, posts: &[Post]) {
    println!("Страница {page}, постов: {}", posts.len());

    for post in posts {
        println!("- [{}] {}", post.id, post.title);
    }
}
