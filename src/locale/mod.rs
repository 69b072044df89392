//! Message catalog interface for remark descriptions
//!
//! The decoder only supplies string keys and positional arguments; mapping
//! them to human-readable text is the catalog's job. The catalog is passed
//! explicitly to every component that needs a description, there is no
//! implicit global default. A bundled English catalog covers the remark
//! vocabulary.

use crate::Result;

pub mod en;

pub use en::EnglishCatalog;

/// Maps a message key to a `{0}`/`{1}`-style template.
pub trait MessageCatalog {
    /// Look up the template for a key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingTranslation`](crate::Error::MissingTranslation)
    /// when the catalog has no entry for the key.
    fn translate(&self, key: &str) -> Result<String>;

    /// Look up a key and substitute positional arguments into the template.
    fn describe(&self, key: &str, args: &[&str]) -> Result<String> {
        Ok(format_message(&self.translate(key)?, args))
    }
}

/// Substitute positional placeholders `{0}`, `{1}`, ... in a template.
/// Placeholders without a matching argument are left verbatim.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut out = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{i}}}"), arg);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_substitutes_in_order() {
        assert_eq!(
            format_message("ceiling varying between {0} and {1} feet", &["500", "1000"]),
            "ceiling varying between 500 and 1000 feet"
        );
    }

    #[test]
    fn test_format_message_leaves_unmatched_placeholders() {
        assert_eq!(format_message("wind {0} at {1}", &["240"]), "wind 240 at {1}");
    }

    #[test]
    fn test_english_catalog_missing_key_is_fault() {
        let catalog = EnglishCatalog;
        assert!(catalog.translate("remark.does_not_exist").is_err());
    }

    #[test]
    fn test_english_catalog_describe() {
        let catalog = EnglishCatalog;
        let text = catalog
            .describe("remark.sea_level_pressure", &["1013.6"])
            .unwrap();
        assert_eq!(text, "sea level pressure of 1013.6 hPa");
    }
}
