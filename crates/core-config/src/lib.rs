//! Configuration loading and parsing.
//!
//! Parses `tracery.toml`, extracting the perimeter-selector weights and the
//! tournament roster. Every section and field is optional and defaulted, and
//! unknown fields are ignored (TOML deserialization tolerance) so the file
//! can grow without breaking older builds. Name validation for strategies,
//! scorers and comparators happens when the typed values are built, not at
//! parse time, so a bad roster reads as a clear error rather than a silent
//! default.

use anyhow::{Result, bail};
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::info;

use core_optimize::Strategy;
use core_scribe::{ScoreCmp, Scorer, by_draws, by_size, saved_draws, saved_size};
use core_slice::{PerimeterSelector, Tournament};

#[derive(Debug, Deserialize, Clone)]
pub struct SelectorConfig {
    #[serde(default = "SelectorConfig::default_diagonal")]
    pub diagonal: f64,
    #[serde(default = "SelectorConfig::default_orthogonal")]
    pub orthogonal: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            diagonal: Self::default_diagonal(),
            orthogonal: Self::default_orthogonal(),
        }
    }
}

impl SelectorConfig {
    const fn default_diagonal() -> f64 {
        0.7
    }
    const fn default_orthogonal() -> f64 {
        1.0
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TournamentConfig {
    /// Ordering that ranks competing traces: "size" or "draws".
    #[serde(default = "TournamentConfig::default_comparator")]
    pub comparator: String,
    /// Scorer fed to the rewriting strategies: "draws" or "size".
    #[serde(default = "TournamentConfig::default_scorer")]
    pub scorer: String,
    /// Accept zero-saving rewrites as well as strictly positive ones.
    #[serde(default)]
    pub eager: bool,
    #[serde(default = "TournamentConfig::default_strategies")]
    pub strategies: Vec<String>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            comparator: Self::default_comparator(),
            scorer: Self::default_scorer(),
            eager: false,
            strategies: Self::default_strategies(),
        }
    }
}

impl TournamentConfig {
    fn default_comparator() -> String {
        "size".to_owned()
    }
    fn default_scorer() -> String {
        "draws".to_owned()
    }
    fn default_strategies() -> Vec<String> {
        ["minimal", "mapped", "accrete", "erode", "clever"]
            .map(str::to_owned)
            .to_vec()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub selector: SelectorConfig,
    #[serde(default)]
    pub tournament: TournamentConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path following platform conventions (XDG / AppData
/// Roaming): a working-directory `tracery.toml` wins over the config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("tracery.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("tracery").join("tracery.toml");
    }
    PathBuf::from("tracery.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        // Missing file is the default configuration, not an error.
        return Ok(Config::default());
    };
    let file: ConfigFile = toml::from_str(&content)?;
    info!(target: "config", path = %path.display(), "configuration loaded");
    Ok(Config {
        raw: Some(content),
        file,
    })
}

fn scorer_by_name(name: &str) -> Result<Scorer> {
    Ok(match name {
        "draws" => saved_draws,
        "size" => saved_size,
        other => bail!("unknown scorer {other:?} (expected \"draws\" or \"size\")"),
    })
}

fn comparator_by_name(name: &str) -> Result<ScoreCmp> {
    Ok(match name {
        "draws" => by_draws,
        "size" => by_size,
        other => bail!("unknown comparator {other:?} (expected \"draws\" or \"size\")"),
    })
}

impl Config {
    pub fn selector(&self) -> PerimeterSelector {
        PerimeterSelector::new(self.file.selector.diagonal, self.file.selector.orthogonal)
    }

    pub fn tournament(&self) -> Result<Tournament> {
        let scorer = scorer_by_name(&self.file.tournament.scorer)?;
        let eager = self.file.tournament.eager;
        let mut strategies = Vec::with_capacity(self.file.tournament.strategies.len());
        for name in &self.file.tournament.strategies {
            strategies.push(match name.as_str() {
                "minimal" => Strategy::Minimal,
                "mapped" => Strategy::Mapped,
                "accrete" => Strategy::Accreting { scorer, eager },
                "erode" => Strategy::Eroding { scorer, eager },
                "clever" => Strategy::Clever {
                    accretion: scorer,
                    erosion: scorer,
                    eager,
                },
                other => bail!("unknown strategy {other:?} in tournament roster"),
            });
        }
        Ok(Tournament {
            strategies,
            comparator: comparator_by_name(&self.file.tournament.comparator)?,
        })
    }
}
