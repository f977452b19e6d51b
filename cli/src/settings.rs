use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use mines_core::{CellCount, Coord, GameConfig, GameError, Preset};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_RECORDS: &str = "records.txt";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,

    /// Number of rows
    #[arg(long)]
    pub height: Option<Coord>,

    /// Number of columns
    #[arg(long)]
    pub width: Option<Coord>,

    /// Number of mines, must leave at least one safe cell
    #[arg(short, long)]
    pub mines: Option<CellCount>,

    /// Classic board size: beginner, intermediate or expert
    #[arg(short, long)]
    pub preset: Option<Preset>,

    /// Force a seed instead of random, later games use the following seeds
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Where finished games are recorded
    #[arg(short, long)]
    pub records: Option<PathBuf>,

    /// TOML file with defaults for any of the options above
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Could not read settings file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings file")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Contents of the optional settings file, every key may be omitted.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub height: Option<Coord>,
    pub width: Option<Coord>,
    pub mines: Option<CellCount>,
    pub preset: Option<Preset>,
    pub seed: Option<u64>,
    pub records: Option<PathBuf>,
}

impl FileSettings {
    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&text)
    }
}

/// Fully resolved options for a run.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub config: GameConfig,
    pub seed: Option<u64>,
    pub records: PathBuf,
}

impl Settings {
    pub fn from_args(args: &Args) -> Result<Self, SettingsError> {
        let file = match &args.config {
            Some(path) => FileSettings::load(path)?,
            None => FileSettings::default(),
        };
        Self::merge(args, file)
    }

    /// Command line wins over the file, the file wins over the preset, the preset over defaults.
    pub fn merge(args: &Args, file: FileSettings) -> Result<Self, SettingsError> {
        let base = args
            .preset
            .or(file.preset)
            .map(Preset::config)
            .unwrap_or_default();

        let height = args.height.or(file.height).unwrap_or(base.height());
        let width = args.width.or(file.width).unwrap_or(base.width());
        let mines = args.mines.or(file.mines).unwrap_or(base.mines);

        Ok(Self {
            config: GameConfig::new(height, width, mines)?,
            seed: args.seed.or(file.seed),
            records: args
                .records
                .clone()
                .or(file.records)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_RECORDS)),
        })
    }
}
