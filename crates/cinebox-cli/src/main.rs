//! Cinebox — command-line admin client for the movie catalog API.
//!
//! Set CINEBOX_ADMIN_USERNAME, CINEBOX_ADMIN_PASSWORD, and CINEBOX_API_URL
//! (or API_URL). `login` gates the `list` and `upload` commands.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use serde::Serialize;

use cinebox_api_client::ApiClient;
use cinebox_cli::{init_tracing, render_movie_list};
use cinebox_core::models::{UploadDraft, UploadEvent, UploadFile, UploadState};
use cinebox_core::{AppError, Config, SessionStore};

#[derive(Parser)]
#[command(name = "cinebox", about = "Cinebox movie catalog admin CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with the admin credentials
    Login {
        username: String,
        password: String,
    },
    /// Log out and clear the saved session
    Logout,
    /// List uploaded movies
    List {
        /// Output format: table or json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Upload a movie: two media files plus metadata
    Upload {
        /// Path to the video file
        video: PathBuf,
        /// Path to the thumbnail image
        thumbnail: PathBuf,
        /// Movie title
        #[arg(long)]
        title: String,
        /// Genre label
        #[arg(long)]
        genre: Option<String>,
        /// Release year
        #[arg(long)]
        year: Option<i32>,
    },
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let config = Config::from_env().context(
        "Failed to load configuration. Set CINEBOX_ADMIN_USERNAME, CINEBOX_ADMIN_PASSWORD, \
         and CINEBOX_API_URL (or API_URL)",
    )?;
    let mut session = SessionStore::open(config.session_file());

    let cli = Cli::parse();

    match cli.command {
        Commands::Login { username, password } => {
            if session.is_authenticated() {
                println!("Already logged in.");
                return Ok(ExitCode::SUCCESS);
            }
            if session.login(&username, &password, &config)? {
                println!("Logged in.");
            } else {
                eprintln!("Invalid credentials");
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Logout => {
            session.logout()?;
            println!("Logged out.");
        }
        Commands::List { format } => {
            if let Err(error) = session.require_auth() {
                eprintln!("{}", error);
                return Ok(ExitCode::FAILURE);
            }
            let client = ApiClient::from_config(&config)?;
            let outcome = client.list_movies().await;
            if format == "json" {
                print_json(&outcome?)?;
            } else {
                println!("{}", render_movie_list(outcome));
            }
        }
        Commands::Upload {
            video,
            thumbnail,
            title,
            genre,
            year,
        } => {
            if let Err(error) = session.require_auth() {
                eprintln!("{}", error);
                return Ok(ExitCode::FAILURE);
            }
            let client = ApiClient::from_config(&config)?;
            let mut draft = UploadDraft {
                title,
                genre: genre.unwrap_or_default(),
                year,
                video_path: Some(video),
                thumbnail_path: Some(thumbnail),
            };

            let on_event = progress_renderer()?;
            match client.upload_movie(&mut draft, on_event).await {
                Ok(()) => println!("Movie uploaded successfully!"),
                Err(error) => {
                    match error.downcast_ref::<AppError>() {
                        Some(AppError::InvalidInput(message)) => eprintln!("{}", message),
                        _ => {
                            tracing::error!(error = %error, "upload failed");
                            eprintln!("Upload failed");
                        }
                    }
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Builds the upload event handler: one progress bar per file plus phase
/// messages.
fn progress_renderer() -> Result<impl Fn(UploadEvent) + Clone + Send + Sync + 'static> {
    let multi = MultiProgress::new();
    let style = ProgressStyle::with_template("{prefix:>9} [{bar:40.cyan/blue}] {pos:>3}%")
        .context("Invalid progress bar template")?
        .progress_chars("=> ");

    let video_bar = multi.add(ProgressBar::new(100));
    video_bar.set_style(style.clone());
    video_bar.set_prefix("video");
    let thumbnail_bar = multi.add(ProgressBar::new(100));
    thumbnail_bar.set_style(style);
    thumbnail_bar.set_prefix("thumbnail");

    Ok(move |event: UploadEvent| match event {
        UploadEvent::Progress { file, percent } => {
            let bar = match file {
                UploadFile::Video => &video_bar,
                UploadFile::Thumbnail => &thumbnail_bar,
            };
            bar.set_position(u64::from(percent));
        }
        UploadEvent::State(state) => {
            let _ = match state {
                UploadState::RequestingUrls => multi.println("Requesting upload URLs..."),
                UploadState::Transferring => Ok(()),
                UploadState::Committing => {
                    video_bar.finish();
                    thumbnail_bar.finish();
                    multi.println("Registering movie metadata...")
                }
                UploadState::Done => Ok(()),
                UploadState::Failed => {
                    video_bar.abandon();
                    thumbnail_bar.abandon();
                    Ok(())
                }
            };
        }
    })
}
