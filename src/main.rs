use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use clap::{ArgAction, Parser, Subcommand};
use iiif_curator::{
    gallery::EntryId,
    image::{Image, ImageKind},
    App, Config, Notice, Ui,
};
use itertools::Itertools;
use tokio::fs;
use tracing_subscriber::EnvFilter;

/// Load IIIF manifests into a gallery of canvas cards and save it as a named collection
#[derive(Parser)]
#[command(name = "iiif-curator", version)]
struct Cli {
    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Save endpoint, overrides the config file
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    yes: bool,

    /// -v info, -vv debug
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cards of comma separated manifest urls
    Show {
        urls: String,
        /// Hand card N (1-based) to the viewer
        #[arg(long)]
        open: Option<usize>,
    },
    /// Load manifests and save their cards as a collection
    Save {
        #[arg(short, long, default_value = "")]
        name: String,
        #[arg(short, long, default_value = "")]
        title: String,
        /// Card numbers (1-based) to drop before saving
        #[arg(long, value_delimiter = ',')]
        remove: Vec<usize>,
        urls: String,
    },
    /// Load a `?title=..&manifests=..` deep link
    Link { query: String },
    /// Download every card's thumbnail into a directory
    Thumbnails {
        #[arg(short, long)]
        out: PathBuf,
        /// Save the info.json descriptors instead of the thumbnails
        #[arg(long)]
        info: bool,
        urls: String,
    },
}

struct TerminalUi {
    assume_yes: bool,
}

impl Ui for TerminalUi {
    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::Info(_) => println!("{notice}"),
            Notice::Error(_) => eprintln!("{notice}"),
        }
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }

    fn view(&mut self, info_url: &str) {
        println!("viewer: {info_url}");
    }
}

fn print_gallery<U: Ui>(app: &App<U>) {
    if !app.title().is_empty() {
        println!("{}\n", app.title());
    }

    for (n, (_, entry)) in app.gallery().iter().enumerate() {
        println!(
            "{:>3}. {} / {} / {} / {}",
            n + 1,
            entry.title,
            entry.author,
            entry.date,
            entry.attribution
        );
        println!("     thumbnail: {}", entry.thumbnail_url);
        println!("     info:      {}", entry.info_url);
    }

    println!(
        "\n{} cards: {}",
        app.gallery().len(),
        app.gallery().info_urls().iter().join(" ")
    );
}

/// 1-based card number to id, looked up before anything is removed.
fn card(ids: &[EntryId], n: usize) -> Option<EntryId> {
    n.checked_sub(1).and_then(|i| ids.get(i)).copied()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match cli.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    if let Some(endpoint) = cli.endpoint {
        config.save_endpoint = endpoint;
    }

    let ui = TerminalUi {
        assume_yes: cli.yes,
    };
    let mut app = App::init(&config, ui)?;

    match cli.command {
        Commands::Show { urls, open } => {
            app.on_add_manifests(&urls).await;
            print_gallery(&app);

            if let Some(n) = open {
                let ids = app.gallery().ids().collect::<Vec<_>>();
                match card(&ids, n) {
                    Some(id) => {
                        app.on_open_entry(id);
                    }
                    None => anyhow::bail!("no card {n}"),
                }
            }
        }
        Commands::Save {
            name,
            title,
            remove,
            urls,
        } => {
            app.on_add_manifests(&urls).await;

            let ids = app.gallery().ids().collect::<Vec<_>>();
            for n in remove {
                match card(&ids, n) {
                    Some(id) => {
                        app.on_remove_entry(id);
                    }
                    None => eprintln!("no card {n}"),
                }
            }

            print_gallery(&app);
            // already reported through the ui
            if app.on_save_collection(&name, &title).await.is_err() {
                std::process::exit(1);
            }
        }
        Commands::Link { query } => {
            app.load_deep_link(&query).await;
            print_gallery(&app);
        }
        Commands::Thumbnails { out, info, urls } => {
            let kind = if info {
                ImageKind::Info
            } else {
                ImageKind::Thumbnail
            };

            app.on_add_manifests(&urls).await;

            fs::create_dir_all(&out).await?;

            for (n, entry) in app.gallery().entries().enumerate() {
                let image = Image::of(entry, kind);
                let buf = match image.download(app.client()).await {
                    Ok(buf) => buf,
                    Err(err) => {
                        eprintln!("error: {}: {err}", image.url());
                        continue;
                    }
                };

                let path = out.join(format!("{:03}.{}", n + 1, image.ext().unwrap_or("jpg")));
                fs::write(&path, &buf).await?;

                println!("write: {}", path.display());
            }
        }
    }

    Ok(())
}
