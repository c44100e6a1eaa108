//! Command line configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

const STORE_FILE: &str = "songs.json";
const LOG_DIR: &str = "logs";

#[derive(Parser, Debug)]
#[command(name = "howl")]
#[command(about = "Terminal music player for a local library", long_about = None)]
pub struct Cli {
    /// Folder scanned for audio files [default: your music folder]
    #[arg(long, env = "HOWL_MUSIC_DIR")]
    pub music_dir: Option<PathBuf>,

    /// Where the song library and logs are kept [default: your data folder]/howl
    #[arg(long, env = "HOWL_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Never open an audio device; play silently
    #[arg(long)]
    pub no_audio: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Scan the music folder and update the stored library
    Scan,
    /// Print the stored library
    List,
}

/// Resolved paths and switches
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub music_dir: PathBuf,
    pub data_dir: PathBuf,
    pub audio_enabled: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            music_dir: cli.music_dir.clone().unwrap_or_else(default_music_dir),
            data_dir: cli.data_dir.clone().unwrap_or_else(default_data_dir),
            audio_enabled: !cli.no_audio,
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR)
    }
}

fn default_music_dir() -> PathBuf {
    dirs::audio_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Music")))
        .unwrap_or_else(|| PathBuf::from("Music"))
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("howl"))
        .unwrap_or_else(|| PathBuf::from(".howl"))
}
