use std::fs;
use std::path::PathBuf;

use shop_common::FileStore;

use crate::{consts, Error};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Path the site is served under, always starting and ending with `/`
    pub base_path: String,

    /// Scheme and host used to build absolute share links, without trailing `/`
    pub origin: String,

    /// Number of featured products on the home page
    pub featured_count: usize,

    /// Where file backed collections are kept, `None` for the default home
    pub datadir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: consts::DEFAULT_BASE_PATH.into(),
            origin: consts::DEFAULT_ORIGIN.into(),
            featured_count: consts::DEFAULT_FEATURED_COUNT,
            datadir: None,
        }
    }
}

impl Config {
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = normalize_base_path(base_path);
        self
    }

    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origin = origin.trim_end_matches('/').to_string();
        self
    }

    pub fn with_featured_count(mut self, featured_count: usize) -> Self {
        self.featured_count = featured_count;
        self
    }

    pub fn with_datadir(mut self, datadir: PathBuf) -> Self {
        self.datadir = Some(datadir);
        self
    }

    pub fn default_home() -> Result<PathBuf, Error> {
        let mut path = home::home_dir().ok_or(Error::HomeDir)?;
        path.push(consts::DATADIR_NAME);
        Ok(path)
    }

    /// The configured datadir or the default home, created if missing
    pub fn datadir(&self) -> Result<PathBuf, Error> {
        let path = match &self.datadir {
            Some(path) => path.clone(),
            None => Self::default_home()?,
        };
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// A store persisting collections as files in [`Config::datadir`]
    pub fn file_store(&self) -> Result<FileStore, Error> {
        Ok(FileStore::new(self.datadir()?)?)
    }
}

/// Ensure the base path has a leading and a trailing `/`, an empty one becomes `/`
pub fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.base_path, "/summer-of-making-shop-rewards/");
        assert_eq!(config.featured_count, 3);
        assert!(config.datadir.is_none());
    }

    #[test]
    fn base_path_is_normalized() {
        assert_eq!(normalize_base_path(""), "/");
        assert_eq!(normalize_base_path("/"), "/");
        assert_eq!(normalize_base_path("shop"), "/shop/");
        assert_eq!(normalize_base_path("/shop"), "/shop/");
        assert_eq!(normalize_base_path(" /a/b/ "), "/a/b/");

        let config = Config::default()
            .with_base_path("rewards")
            .with_origin("http://localhost:5173/");
        assert_eq!(config.base_path, "/rewards/");
        assert_eq!(config.origin, "http://localhost:5173");
    }

    #[test]
    fn datadir_is_created() {
        let tempdir = tempfile::tempdir().unwrap();
        let datadir = tempdir.path().join("nested").join("shop");
        let config = Config::default().with_datadir(datadir.clone());
        assert_eq!(config.datadir().unwrap(), datadir);
        assert!(datadir.is_dir());
        config.file_store().unwrap();
    }
}
