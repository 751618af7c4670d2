// File: src/config.rs
use crate::error::Result;
use std::env;
use std::io;
use std::path::PathBuf;

const INPUT_METHOD_DIR: &str = "Documents/落格输入法";

/// Locations of the three dictionary files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub single_char_path: PathBuf,
    pub base_path: PathBuf,
    pub overlay_path: PathBuf,
}

impl Config {
    /// The input method's export folder under the user's home directory,
    /// with the single-character table taken from the working directory.
    pub fn from_home() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "could not find a home directory"))?;
        let ime_dir = home.join(INPUT_METHOD_DIR);
        Ok(Self {
            single_char_path: PathBuf::from("data/单字码表.txt"),
            base_path: ime_dir.join("小-鹤-主-码-表(BIG).txt"),
            overlay_path: ime_dir.join("new.txt"),
        })
    }

    /// `from_home` with `DICT_SINGLE_CHAR_PATH`, `DICT_BASE_PATH` and
    /// `DICT_OVERLAY_PATH` overriding individual paths.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::from_home()?;
        config.apply_overrides(|key| env::var_os(key).map(PathBuf::from));
        Ok(config)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<PathBuf>) {
        if let Some(path) = lookup("DICT_SINGLE_CHAR_PATH") {
            self.single_char_path = path;
        }
        if let Some(path) = lookup("DICT_BASE_PATH") {
            self.base_path = path;
        }
        if let Some(path) = lookup("DICT_OVERLAY_PATH") {
            self.overlay_path = path;
        }
    }
}
