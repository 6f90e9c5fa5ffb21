use std::path::PathBuf;

use clap::{
    Args, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotidal::{cli, config, types::PlaylistSpec};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify and export your saved tracks
    Export(ExportOptions),

    /// Authorize with Tidal and import an exported catalog into a new playlist
    Import(ImportOptions),

    /// Export from Spotify and import into Tidal in one go
    Transfer(TransferOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Args, Debug, Clone)]
pub struct BrowserOptions {
    /// Only print the authorization URL, do not open a browser
    #[clap(long)]
    pub no_browser: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PlaylistOptions {
    /// Name of the playlist created on Tidal
    #[clap(long, default_value = "Spotify Songs")]
    pub playlist_name: String,

    /// Description of the playlist created on Tidal
    #[clap(long, default_value = "Spotify Library")]
    pub playlist_description: String,
}

impl From<PlaylistOptions> for PlaylistSpec {
    fn from(opts: PlaylistOptions) -> Self {
        PlaylistSpec {
            name: opts.playlist_name,
            description: opts.playlist_description,
            ..PlaylistSpec::default()
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ExportOptions {
    /// File the catalog is written to (replaced if it exists)
    #[clap(long, default_value = config::CATALOG_FILE)]
    pub output: PathBuf,

    #[command(flatten)]
    pub browser: BrowserOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportOptions {
    /// Catalog file produced by `export`
    #[clap(long, default_value = config::CATALOG_FILE)]
    pub input: PathBuf,

    /// Country code used for Tidal searches (defaults to TIDAL_COUNTRY_CODE or DE)
    #[clap(long)]
    pub country: Option<String>,

    #[command(flatten)]
    pub playlist: PlaylistOptions,

    #[command(flatten)]
    pub browser: BrowserOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct TransferOptions {
    /// Catalog file shared by the export and import steps
    #[clap(long, default_value = config::CATALOG_FILE)]
    pub file: PathBuf,

    /// Country code used for Tidal searches (defaults to TIDAL_COUNTRY_CODE or DE)
    #[clap(long)]
    pub country: Option<String>,

    #[command(flatten)]
    pub playlist: PlaylistOptions,

    #[command(flatten)]
    pub browser: BrowserOptions,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    config::load_env().await;

    let cli = Cli::parse();

    match cli.command {
        Command::Export(opt) => cli::export(&opt.output, !opt.browser.no_browser).await,
        Command::Import(opt) => {
            cli::import(
                &opt.input,
                opt.country,
                &opt.playlist.into(),
                !opt.browser.no_browser,
            )
            .await
        }
        Command::Transfer(opt) => {
            cli::transfer(
                &opt.file,
                opt.country,
                &opt.playlist.into(),
                !opt.browser.no_browser,
            )
            .await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
