use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client_core::{
    form::{FormField, SubmitOutcome},
    list::DeleteOutcome,
    AlwaysConfirm, BlogApi, Confirm, DetailController, FormController, HttpBlogClient,
    ListController, Route,
};
use shared::{domain::BlogId, protocol::SearchField};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::{apply_page_size, load_settings, Settings};

#[derive(Parser, Debug)]
#[command(name = "blog", about = "Browse and edit blogs on the blog REST service")]
struct Cli {
    /// Base URL of the blog resource, e.g. http://localhost:8089/api/blogs
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true)]
    page_size: Option<u32>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the screen behind a route path such as `/blogs/3`.
    Open { path: String },
    List {
        /// One-based page number.
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, value_enum, default_value_t = FieldArg::Title)]
        field: FieldArg,
        #[arg(long)]
        search: Option<String>,
        /// Delete this blog from the list before rendering it.
        #[arg(long)]
        delete: Option<i64>,
        #[arg(long)]
        yes: bool,
    },
    Show {
        id: i64,
    },
    New {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
        #[arg(long, default_value = "")]
        tags: String,
    },
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        tags: Option<String>,
    },
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// Ask the backend to create one blog with random text.
    Random,
    /// Ask the backend to create a batch of sample blogs.
    GenerateMany,
    Ping,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FieldArg {
    Title,
    Content,
    Tags,
}

impl From<FieldArg> for SearchField {
    fn from(value: FieldArg) -> Self {
        match value {
            FieldArg::Title => SearchField::Title,
            FieldArg::Content => SearchField::Content,
            FieldArg::Tags => SearchField::Tags,
        }
    }
}

struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes")
    }
}

fn confirmer(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(StdinConfirm)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = load_settings()?;
    if let Some(url) = cli.api_url.clone() {
        settings.api_url = url;
    }
    if let Some(size) = cli.page_size {
        apply_page_size(&mut settings, size);
    }

    let filter = EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let api: Arc<dyn BlogApi> = Arc::new(HttpBlogClient::new(&settings.api_url)?);
    info!(api_url = %settings.api_url, page_size = settings.page_size, "blog client ready");

    run(cli.command, api, &settings).await
}

async fn run(command: Command, api: Arc<dyn BlogApi>, settings: &Settings) -> Result<()> {
    match command {
        Command::Open { path } => {
            let route = Route::parse(&path);
            if route == Route::Home && !matches!(path.trim(), "" | "/") {
                info!(%path, "unknown route, redirecting home");
            }
            open_route(route, api, settings).await
        }
        Command::List {
            page,
            field,
            search,
            delete,
            yes,
        } => {
            let mut list = ListController::new(api, settings.page_size);
            list.set_search_field(field.into());
            list.set_search_value(search.unwrap_or_default());
            list.search().await;
            if page > 1 && list.error().is_none() && !list.go_to_page(page - 1).await {
                eprintln!("{}", render::page_unavailable(page, list.total_pages()));
            }
            if let Some(id) = delete {
                match list.delete_blog(BlogId(id), confirmer(yes).as_ref()).await {
                    DeleteOutcome::Cancelled => println!("delete cancelled"),
                    DeleteOutcome::Deleted => println!("deleted blog {id}"),
                    DeleteOutcome::Failed => {}
                }
            }
            print!("{}", render::blog_list(&list));
            Ok(())
        }
        Command::Show { id } => open_route(Route::BlogDetail(BlogId(id)), api, settings).await,
        Command::New {
            title,
            content,
            tags,
        } => {
            let mut form = FormController::activate(api, None).await;
            form.set_field(FormField::Title, title);
            form.set_field(FormField::Content, content);
            form.set_field(FormField::Tags, tags);
            submit(&mut form).await
        }
        Command::Edit {
            id,
            title,
            content,
            tags,
        } => {
            let mut form = FormController::activate(api, Some(BlogId(id))).await;
            if let Some(error) = form.error() {
                bail!("{error}");
            }
            for (field, value) in [
                (FormField::Title, title),
                (FormField::Content, content),
                (FormField::Tags, tags),
            ] {
                if let Some(value) = value {
                    form.set_field(field, value);
                }
            }
            submit(&mut form).await
        }
        Command::Delete { id, yes } => {
            let mut detail = DetailController::new(api);
            detail.activate(BlogId(id)).await;
            if let Some(error) = detail.error() {
                bail!("{error}");
            }
            match detail.delete(confirmer(yes).as_ref()).await {
                Some(next) => println!("deleted blog {id}; back to {next}"),
                None => match detail.error() {
                    Some(error) => bail!("{error}"),
                    None => println!("delete cancelled"),
                },
            }
            Ok(())
        }
        Command::Random => {
            let id = api.generate_random().await?;
            println!("created random blog {id}");
            Ok(())
        }
        Command::GenerateMany => {
            println!("{}", api.generate_many().await?);
            Ok(())
        }
        Command::Ping => {
            println!("{}", api.ping().await?);
            Ok(())
        }
    }
}

async fn open_route(route: Route, api: Arc<dyn BlogApi>, settings: &Settings) -> Result<()> {
    match route {
        Route::Home => print!("{}", render::home()),
        Route::BlogList => {
            let mut list = ListController::new(api, settings.page_size);
            list.load().await;
            print!("{}", render::blog_list(&list));
        }
        Route::NewBlog => {
            let form = FormController::activate(api, None).await;
            print!("{}", render::form(&form));
        }
        Route::EditBlog(id) => {
            let form = FormController::activate(api, Some(id)).await;
            print!("{}", render::form(&form));
        }
        Route::BlogDetail(id) => {
            let mut detail = DetailController::new(api);
            detail.activate(id).await;
            match (detail.blog(), detail.error()) {
                (Some(blog), _) => print!("{}", render::blog_detail(blog)),
                (None, Some(error)) => bail!("{error}"),
                (None, None) => {}
            }
        }
    }
    Ok(())
}

async fn submit(form: &mut FormController) -> Result<()> {
    match form.submit().await {
        SubmitOutcome::Saved { id, navigate } => {
            println!("saved blog {id}; back to {navigate}");
            Ok(())
        }
        SubmitOutcome::Invalid => {
            eprint!("{}", render::form(form));
            bail!("the blog has invalid fields")
        }
        SubmitOutcome::Failed => {
            bail!("{}", form.error().unwrap_or("failed to save blog"))
        }
    }
}
