//! Tool configuration: asset folder location and font overrides.

use crate::error::{Error, Result};
use crate::text::FontPath;

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "duelsmith.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub assets: Option<PathBuf>,
    pub font: HashMap<String, FontPath>,
}

impl Config {
    /// Locates the configuration: an explicit path first, then
    /// `duelsmith.toml` in the current folder, then the user configuration
    /// folder. Built-in defaults apply when no file exists.
    pub fn find(path: Option<&Path>) -> Result<(PathBuf, Self)> {
        if let Some(path) = path {
            return Self::open(path);
        }
        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            return Self::open(&local);
        }
        let folder = Self::config_folder()?;
        let path = folder.join(CONFIG_FILE);
        if path.exists() {
            Self::open(&path)
        } else {
            Ok((folder, Self::default()))
        }
    }

    /// Opens a configuration file, anchoring relative font paths at the
    /// file's folder.
    pub fn open(path: impl AsRef<Path>) -> Result<(PathBuf, Self)> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::config_open(path, e))?;
        let raw: Self = toml::from_str(&content).map_err(|e| Error::config_parse(path, e))?;
        let folder = path
            .parent()
            .expect("toml file is inside some folder")
            .to_path_buf();
        let fonts = raw
            .font
            .into_iter()
            .map(|(k, v)| (k, prefix_font_path(&folder, v)))
            .collect();
        Ok((
            folder,
            Self {
                assets: raw.assets,
                font: fonts,
            },
        ))
    }

    #[cfg(target_os = "windows")]
    fn config_folder() -> Result<PathBuf> {
        let home = std::env::var("APPDATA").map_err(|_| Error::no_env_variable("APPDATA"))?;
        let mut home = PathBuf::from(home);
        home.push("duelsmith");
        Ok(home)
    }

    #[cfg(not(target_os = "windows"))]
    fn config_folder() -> Result<PathBuf> {
        let home = std::env::var("HOME").map_err(|_| Error::no_env_variable("HOME"))?;
        let mut home = PathBuf::from(home);
        home.push(".duelsmith");
        Ok(home)
    }

    pub fn assets_folder(&self, folder: &Path) -> PathBuf {
        let mut path = folder.to_path_buf();
        match self.assets.as_ref() {
            Some(p) => path.push(p),
            None => path.push("assets"),
        }
        path
    }
}

fn prefix_font_path(folder: &Path, fp: FontPath) -> FontPath {
    match fp {
        FontPath::Desc { .. } => fp,
        FontPath::Path(path) if path.is_absolute() => FontPath::Path(path),
        FontPath::Path(path) => FontPath::Path(folder.join(path)),
    }
}
