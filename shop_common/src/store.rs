//! Key-value storage the cart and the wishlist persist through.
//!
//! [`Store`] is the generic trait implementors write against, [`DynStore`] its object safe
//! twin taken by the collections as `Arc<dyn DynStore>`. Every [`Store`] is a [`DynStore`].

use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use tempfile::NamedTempFile;

/// Error of a [`DynStore`] operation
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A key-value store shared between threads.
///
/// Methods take `&self`, implementors synchronize internally. Values are opaque bytes, the
/// collections write UTF-8 JSON.
pub trait Store: Send + Sync + Debug {
    type Error: std::error::Error + Send + Sync + 'static;

    /// The value under `key`, `None` if there is none
    fn get<K: AsRef<[u8]>>(&self, key: K) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Set the value under `key`, replacing any previous one
    fn put<K: AsRef<[u8]>, V: AsRef<[u8]>>(&self, key: K, value: V) -> Result<(), Self::Error>;

    /// Delete the value under `key`, deleting a missing key succeeds
    fn remove<K: AsRef<[u8]>>(&self, key: K) -> Result<(), Self::Error>;
}

/// [`Store`] with string keys and boxed errors, usable as `dyn DynStore`
pub trait DynStore: Send + Sync + Debug {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BoxError>;
    fn put(&self, key: &str, value: &[u8]) -> Result<(), BoxError>;
    fn remove(&self, key: &str) -> Result<(), BoxError>;
}

impl<S: Store> DynStore for S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BoxError> {
        Store::get(self, key).map_err(|e| Box::new(e) as BoxError)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), BoxError> {
        Store::put(self, key, value).map_err(|e| Box::new(e) as BoxError)
    }

    fn remove(&self, key: &str) -> Result<(), BoxError> {
        Store::remove(self, key).map_err(|e| Box::new(e) as BoxError)
    }
}

/// Values kept in a map, gone when dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<Vec<u8>, Vec<u8>>> {
        self.entries.lock().expect("lock poisoned")
    }
}

impl Store for MemoryStore {
    type Error = std::convert::Infallible;

    fn get<K: AsRef<[u8]>>(&self, key: K) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.entries().get(key.as_ref()).cloned())
    }

    fn put<K: AsRef<[u8]>, V: AsRef<[u8]>>(&self, key: K, value: V) -> Result<(), Self::Error> {
        self.entries()
            .insert(key.as_ref().to_vec(), value.as_ref().to_vec());
        Ok(())
    }

    fn remove<K: AsRef<[u8]>>(&self, key: K) -> Result<(), Self::Error> {
        self.entries().remove(key.as_ref());
        Ok(())
    }
}

/// Accepts every write and keeps nothing, reads always miss
#[derive(Debug, Default, Clone, Copy)]
pub struct FakeStore;

impl FakeStore {
    pub fn new() -> Self {
        Self
    }
}

impl Store for FakeStore {
    type Error = std::convert::Infallible;

    fn get<K: AsRef<[u8]>>(&self, _key: K) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(None)
    }

    fn put<K: AsRef<[u8]>, V: AsRef<[u8]>>(&self, _key: K, _value: V) -> Result<(), Self::Error> {
        Ok(())
    }

    fn remove<K: AsRef<[u8]>>(&self, _key: K) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Longest key accepted by [`FileStore`]
const MAX_KEY_LEN: usize = 128;

/// Values kept as `<key>.json` files in a directory.
///
/// Keys are limited to ASCII alphanumerics, `-` and `_`, so a key never names a path outside
/// the directory. Writes go to a temporary file which is then renamed over the previous one.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    /// Serializes operations of this instance
    lock: Mutex<()>,
}

impl FileStore {
    /// Open the store in `dir`, creating the directory if missing
    pub fn new(dir: PathBuf) -> Result<Self, io::Error> {
        if dir.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "FileStore root path is a file",
            ));
        }
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    fn key_path(&self, key: &[u8]) -> Result<PathBuf, io::Error> {
        let invalid = |msg: &str| io::Error::new(io::ErrorKind::InvalidInput, msg);

        let name = std::str::from_utf8(key).map_err(|_| invalid("store key is not valid UTF-8"))?;
        if name.is_empty() {
            return Err(invalid("store key is empty"));
        }
        if name.len() > MAX_KEY_LEN {
            return Err(invalid("store key is too long"));
        }
        let allowed = |b: u8| b.is_ascii_alphanumeric() || b == b'-' || b == b'_';
        if !name.bytes().all(allowed) {
            return Err(invalid("store key contains invalid file name characters"));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }
}

impl Store for FileStore {
    type Error = io::Error;

    fn get<K: AsRef<[u8]>>(&self, key: K) -> Result<Option<Vec<u8>>, Self::Error> {
        let path = self.key_path(key.as_ref())?;
        let _guard = self.lock.lock().expect("lock poisoned");
        match fs::read(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            result => result.map(Some),
        }
    }

    fn put<K: AsRef<[u8]>, V: AsRef<[u8]>>(&self, key: K, value: V) -> Result<(), Self::Error> {
        let path = self.key_path(key.as_ref())?;
        let _guard = self.lock.lock().expect("lock poisoned");

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_ref())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }

    fn remove<K: AsRef<[u8]>>(&self, key: K) -> Result<(), Self::Error> {
        let path = self.key_path(key.as_ref())?;
        let _guard = self.lock.lock().expect("lock poisoned");
        match fs::remove_file(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            result => result,
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::{FakeStore, FileStore, MemoryStore, Store};

    #[test]
    fn memory_store() {
        let store = MemoryStore::new();

        assert_eq!(store.get("cart").unwrap(), None);

        store.put("cart", b"[]").unwrap();
        assert_eq!(store.get("cart").unwrap(), Some(b"[]".to_vec()));

        // Overwrite, not append
        store.put("cart", b"[1]").unwrap();
        assert_eq!(store.get("cart").unwrap(), Some(b"[1]".to_vec()));

        // Keys are independent
        assert_eq!(store.get("wishlist").unwrap(), None);

        store.remove("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);

        store.remove("cart").unwrap();
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        assert_eq!(store.get("cart").unwrap(), None);

        store.put("cart", b"[]").unwrap();
        assert_eq!(store.get("cart").unwrap(), Some(b"[]".to_vec()));

        store.put("wishlist", b"[2]").unwrap();
        assert_eq!(store.get("wishlist").unwrap(), Some(b"[2]".to_vec()));
        assert!(dir.path().join("wishlist.json").is_file());

        store.put("cart", b"[1]").unwrap();
        assert_eq!(store.get("cart").unwrap(), Some(b"[1]".to_vec()));

        // keys become file names
        assert!(store.put([0xc3u8, 0x28], b"x").is_err());
        assert!(store.put("../escape", b"x").is_err());
        assert!(store.put("", b"x").is_err());

        store.remove("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
        store.remove("cart").unwrap();

        drop(store);
        let store = FileStore::new(dir.path().to_path_buf()).unwrap();

        assert_eq!(store.get("cart").unwrap(), None);
        assert_eq!(store.get("wishlist").unwrap(), Some(b"[2]".to_vec()));
    }

    #[test]
    fn file_store_root_is_a_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = FileStore::new(file.path().to_path_buf()).unwrap_err();
        assert_eq!(err.to_string(), "FileStore root path is a file");
    }

    #[test]
    fn fake_store() {
        let store = FakeStore::new();

        assert_eq!(store.get("cart").unwrap(), None);
        store.put("cart", b"[]").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
        store.remove("cart").unwrap();
    }

    #[test]
    fn dyn_store() {
        use super::DynStore;

        let store: Arc<dyn DynStore> = Arc::new(MemoryStore::new());
        store.put("cart", b"[]").unwrap();
        assert_eq!(store.get("cart").unwrap(), Some(b"[]".to_vec()));
        store.remove("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
    }
}
