use std::collections::HashMap;

/// Flat string key-value store that outlives a single page.
///
/// Implementations are expected to be synchronous and infallible from the
/// caller's point of view: a store that cannot be read behaves as empty.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Process-local [`Storage`], for tests and non-browser hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage(HashMap<String, String>);

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_owned(), value.to_owned());
    }
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}
