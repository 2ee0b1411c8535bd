use bookstall::core::config::{self, CliOverrides, StartScreen};
use bookstall::tui;
use clap::{Parser, Subcommand};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "bookstall", about = "Terminal storefront for e-books")]
struct Args {
    /// Storefront API base URL (overrides config file and BOOKSTALL_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    screen: Option<Screen>,
}

#[derive(Subcommand)]
enum Screen {
    /// Show a book's details
    Book {
        /// Book identifier as known to the storefront
        id: String,
    },
    /// Create a new account
    Signup,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("bookstall: {e}");
            return Err(std::io::Error::other(e));
        }
    };
    let resolved = config::resolve(
        &file_config,
        CliOverrides {
            api_url: args.api_url,
            start_screen: args.screen.map(|screen| match screen {
                Screen::Book { id } => StartScreen::Book(id),
                Screen::Signup => StartScreen::Signup,
            }),
        },
    );

    // File logger - the terminal belongs to the UI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Bookstall starting up against {}", resolved.api_base_url);

    tui::run(resolved)
}
