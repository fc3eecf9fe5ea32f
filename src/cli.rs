//! CLI implementation.

use crate::config::Config;
use crate::data::CardData;
use crate::error::Result;
use crate::image::Resize;
use crate::logs;
use crate::pipeline::Pipeline;

use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Render Yu-Gi-Oh! card images from toml descriptions
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Card description file, `card.toml` in the current folder if omitted
    pub card: Option<PathBuf>,

    /// Output image path
    #[arg(short, long, default_value = "yugioh-card.png")]
    pub output: PathBuf,

    #[cfg(not(target_os = "windows"))]
    /// Configuration file, looked up in the current folder and in
    /// $HOME/.duelsmith if omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[cfg(target_os = "windows")]
    /// Configuration file, looked up in the current folder and in
    /// %APPDATA%/duelsmith if omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Artwork image, replacing the one in the card description
    #[arg(short, long)]
    pub art: Option<PathBuf>,

    /// Render the card back instead of the front
    #[arg(long)]
    pub back: bool,

    /// Optionally resizes output
    #[arg(long)]
    pub resize: Option<Resize>,

    /// Suppress info and warning messages
    #[arg(short, long)]
    pub quiet: bool,
}

macro_rules! error {
    ($res:expr) => {
        $res.unwrap_or_else(|e| panic!("{e}"))
    };
}

impl Cli {
    pub fn run() {
        std::panic::set_hook(Box::new(|panic_info| {
            if let Some(s) = panic_info.payload().downcast_ref::<String>() {
                logs::error(s);
            } else {
                logs::error(panic_info.to_string());
            }
        }));

        let cli = Self::parse();
        logs::set_quiet(cli.quiet);

        let (folder, config) = error!(Config::find(cli.config.as_deref()));
        let card = error!(cli.load_card());
        let mut pipeline = error!(Pipeline::new(&folder, &config));

        let img = if cli.back {
            error!(pipeline.render_back(&card))
        } else {
            error!(pipeline.render(&card, Instant::now()))
        };
        error!(pipeline.write(&img, &cli.output, cli.resize.as_ref()));
        logs::info(format!("wrote `{}`", cli.output.display()));
    }

    fn load_card(&self) -> Result<CardData> {
        let mut card = match self.card.as_ref() {
            Some(path) => CardData::open(path)?,
            None => {
                let path = Path::new("card.toml");
                if path.exists() {
                    CardData::open(path)?
                } else {
                    logs::info("no card description found, rendering defaults");
                    CardData::default()
                }
            }
        };
        if let Some(art) = self.art.as_ref() {
            card.art = Some(art.clone());
        }
        Ok(card)
    }
}
