use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use site_content::{
    categories, slugify, ContentKind, ContentPatch, ContentQuery, ContentRepository,
    ContentType, MediaRepository, MediaType, NewContent, NewMedia, RepositoryConfig,
    SiteRepository, SortDirection, SortField, StoreBackend,
};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_STORE: &str = "site-store.json";

#[derive(Parser, Debug)]
#[command(name = "site-admin", about = "Manage site pages, posts, testimonials and media")]
struct Cli {
    /// JSON store file (overrides the store named in --config)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Repository configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Store(StoreCommand),
    /// Print the slug for a title
    Slugify { title: String },
}

/// Commands that open the store
#[derive(Subcommand, Debug)]
enum StoreCommand {
    /// Seed default content if the store is empty
    Init,
    /// List content items
    List {
        #[arg(long = "type", value_enum)]
        content_type: Option<TypeArg>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_enum, default_value = "updated")]
        sort: SortArg,
        #[arg(long, value_enum, default_value = "desc")]
        order: OrderArg,
    },
    /// Show one item by id or slug
    Show {
        id: Option<String>,
        #[arg(long, conflicts_with = "id")]
        slug: Option<String>,
    },
    /// Create a content item
    Create {
        #[arg(long = "type", value_enum)]
        content_type: TypeArg,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
        /// Defaults to the slugified title
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        author: String,
        #[command(flatten)]
        extra: ExtraFields,
    },
    /// Update fields of a content item
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[command(flatten)]
        extra: ExtraFields,
    },
    /// Delete a content item
    Delete { id: String },
    /// Most recently updated items
    Recent {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Collection counts
    Stats,
    /// Blog categories in use
    Categories,
    /// Media library
    Media {
        #[command(subcommand)]
        action: MediaAction,
    },
}

#[derive(Args, Debug, Default)]
struct ExtraFields {
    #[arg(long)]
    image: Option<String>,
    /// Blog only; a bare flag means true
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    featured: Option<bool>,
    /// Blog only
    #[arg(long)]
    category: Option<String>,
    /// Blog only, repeatable
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// Testimonial only
    #[arg(long)]
    position: Option<String>,
    /// Testimonial only
    #[arg(long)]
    company: Option<String>,
}

#[derive(Subcommand, Debug)]
enum MediaAction {
    /// List media items
    List,
    /// Add a media item
    Add {
        #[arg(long = "type", value_enum)]
        media_type: MediaTypeArg,
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        thumbnail_url: Option<String>,
        #[arg(long)]
        file_size: Option<u64>,
        #[arg(long)]
        dimensions: Option<String>,
        #[arg(long)]
        uploaded_by: String,
    },
    /// Delete a media item
    Delete { id: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TypeArg {
    Page,
    Blog,
    Testimonial,
    Media,
}

impl From<TypeArg> for ContentType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Page => ContentType::Page,
            TypeArg::Blog => ContentType::Blog,
            TypeArg::Testimonial => ContentType::Testimonial,
            TypeArg::Media => ContentType::Media,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MediaTypeArg {
    Image,
    Video,
    Document,
}

impl From<MediaTypeArg> for MediaType {
    fn from(arg: MediaTypeArg) -> Self {
        match arg {
            MediaTypeArg::Image => MediaType::Image,
            MediaTypeArg::Video => MediaType::Video,
            MediaTypeArg::Document => MediaType::Document,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortArg {
    Title,
    Author,
    Updated,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderArg {
    Asc,
    Desc,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Cli {
        store,
        config,
        command,
    } = Cli::parse();
    match command {
        Command::Slugify { title } => {
            println!("{}", slugify(&title));
            Ok(())
        }
        Command::Store(command) => run(&open_repository(store, config)?, command),
    }
}

fn open_repository(store: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<SiteRepository> {
    let mut config = match &config_path {
        Some(path) => RepositoryConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RepositoryConfig {
            store: StoreBackend::JsonFile {
                path: PathBuf::from(DEFAULT_STORE),
            },
            ..RepositoryConfig::default()
        },
    };
    if let Some(path) = store {
        config.store = StoreBackend::JsonFile { path };
    }
    debug!(store = ?config.store, "opening repository");
    SiteRepository::from_config(config).context("opening store")
}

fn run(repo: &SiteRepository, command: StoreCommand) -> Result<()> {
    match command {
        StoreCommand::Init => {
            let seeded = repo.initialize()?;
            print_json(&serde_json::json!({ "seeded": seeded }))
        }
        StoreCommand::List {
            content_type,
            search,
            category,
            sort,
            order,
        } => {
            let mut query = ContentQuery::new().sort_by(
                match sort {
                    SortArg::Title => SortField::Title,
                    SortArg::Author => SortField::Author,
                    SortArg::Updated => SortField::UpdatedAt,
                },
                match order {
                    OrderArg::Asc => SortDirection::Ascending,
                    OrderArg::Desc => SortDirection::Descending,
                },
            );
            if let Some(content_type) = content_type {
                query = query.content_type(content_type.into());
            }
            if let Some(term) = search {
                query = query.search(term);
            }
            if let Some(category) = category {
                query = query.category(category);
            }
            print_json(&query.apply(repo.list_all()?))
        }
        StoreCommand::Show { id, slug } => {
            let found = match (id, slug) {
                (Some(id), _) => repo.get_by_id(&id)?,
                (None, Some(slug)) => repo.get_by_slug(&slug)?,
                (None, None) => bail!("give an id or --slug"),
            };
            match found {
                Some(item) => print_json(&item),
                None => bail!("no such content"),
            }
        }
        StoreCommand::Create {
            content_type,
            title,
            content,
            slug,
            author,
            extra,
        } => {
            let slug = slug.unwrap_or_else(|| slugify(&title));
            let kind = build_kind(content_type.into(), &extra)?;
            let mut new = NewContent::new(kind, title, content, slug, author);
            new.image = extra.image;
            print_json(&repo.create(new)?)
        }
        StoreCommand::Update {
            id,
            title,
            content,
            slug,
            author,
            extra,
        } => {
            let patch = ContentPatch {
                title,
                content,
                slug,
                author,
                image: extra.image.map(Some),
                featured: extra.featured.map(Some),
                category: extra.category.map(Some),
                tags: (!extra.tags.is_empty()).then(|| Some(extra.tags)),
                position: extra.position.map(Some),
                company: extra.company.map(Some),
                ..ContentPatch::default()
            };
            if patch.is_empty() {
                bail!("nothing to update");
            }
            match repo.update(&id, &patch)? {
                Some(item) => print_json(&item),
                None => bail!("no content with id {}", id),
            }
        }
        StoreCommand::Delete { id } => {
            if !repo.delete(&id)? {
                bail!("no content with id {}", id);
            }
            print_json(&serde_json::json!({ "deleted": id }))
        }
        StoreCommand::Recent { limit } => {
            let items = match limit {
                Some(limit) => repo.recent_updates(limit)?,
                None => repo.recent()?,
            };
            print_json(&items)
        }
        StoreCommand::Stats => print_json(&repo.stats()?),
        StoreCommand::Categories => {
            print_json(&categories(&repo.list_by_type(ContentType::Blog)?))
        }
        StoreCommand::Media { action } => run_media(repo, action),
    }
}

fn run_media(repo: &SiteRepository, action: MediaAction) -> Result<()> {
    match action {
        MediaAction::List => print_json(&repo.list_media()?),
        MediaAction::Add {
            media_type,
            title,
            url,
            thumbnail_url,
            file_size,
            dimensions,
            uploaded_by,
        } => {
            let mut new = NewMedia::new(media_type.into(), title, url, uploaded_by);
            new.thumbnail_url = thumbnail_url;
            new.file_size = file_size;
            new.dimensions = dimensions;
            print_json(&repo.add_media(new)?)
        }
        MediaAction::Delete { id } => {
            if !repo.delete_media(&id)? {
                bail!("no media with id {}", id);
            }
            print_json(&serde_json::json!({ "deleted": id }))
        }
    }
}

fn build_kind(content_type: ContentType, extra: &ExtraFields) -> Result<ContentKind> {
    let mut kind = ContentKind::empty(content_type);
    let has_blog = extra.featured.is_some() || extra.category.is_some() || !extra.tags.is_empty();
    let has_testimonial = extra.position.is_some() || extra.company.is_some();

    match &mut kind {
        ContentKind::Blog(blog) => {
            if has_testimonial {
                bail!("--position/--company only apply to testimonials");
            }
            blog.featured = extra.featured;
            blog.category = extra.category.clone();
            blog.tags = (!extra.tags.is_empty()).then(|| extra.tags.clone());
        }
        ContentKind::Testimonial(testimonial) => {
            if has_blog {
                bail!("--featured/--category/--tag only apply to blog posts");
            }
            testimonial.position = extra.position.clone();
            testimonial.company = extra.company.clone();
        }
        _ => {
            if has_blog || has_testimonial {
                bail!("{} content has no type-specific fields", content_type);
            }
        }
    }
    Ok(kind)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
