//! Registry of readers, keyed by language and file extension.

use crate::traits::Reader;
use std::sync::{OnceLock, PoisonError, RwLock};

static READERS: RwLock<Vec<&'static dyn Reader>> = RwLock::new(Vec::new());
static READERS_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Register a custom reader. Later registrations do not shadow earlier
/// ones for the same language.
pub fn register_reader(reader: &'static dyn Reader) {
    READERS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .push(reader);
}

fn init_readers() {
    READERS_INITIALIZED.get_or_init(|| {
        #[cfg(feature = "read-csharp")]
        {
            register_reader(&crate::input::csharp::CSHARP_READER);
        }
        register_reader(&crate::input::json::JSON_READER);
    });
}

fn find(predicate: impl Fn(&&'static dyn Reader) -> bool) -> Option<&'static dyn Reader> {
    init_readers();
    READERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .find(|reader| predicate(reader))
        .copied()
}

/// Get a reader by language name.
pub fn reader_for_language(lang: &str) -> Option<&'static dyn Reader> {
    find(|r| r.language() == lang)
}

/// Get a reader by file extension, without the leading dot.
pub fn reader_for_extension(ext: &str) -> Option<&'static dyn Reader> {
    find(|r| r.extensions().contains(&ext))
}

/// Get all registered readers.
pub fn readers() -> Vec<&'static dyn Reader> {
    init_readers();
    READERS.read().unwrap_or_else(PoisonError::into_inner).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_reader_lookup() {
        let reader = reader_for_language("json").expect("json reader");
        assert_eq!(reader.language(), "json");
        assert!(reader_for_extension("json").is_some());
        assert!(reader_for_extension("py").is_none());
    }

    #[test]
    #[cfg(feature = "read-csharp")]
    fn csharp_reader_lookup() {
        let reader = reader_for_extension("cs").expect("cs extension");
        assert_eq!(reader.language(), "csharp");
        assert!(readers().len() >= 2);
    }
}
