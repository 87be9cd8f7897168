//! Localized UI strings for `vitalgraph-ui`.
//!
//! Built on `i18n-embed` (language selection + asset loading), `rust-embed`
//! (compile-time embedding of `.ftl` files) and `i18n-embed-fl` (the `fl!`
//! macro, checked against the fallback bundle at compile time).
//!
//! ```text
//! i18n.toml
//! i18n/
//!   en-US/vitalgraph-ui.ftl   (fallback/reference)
//!   es-ES/vitalgraph-ui.ftl
//! ```
//!
//! Call `i18n::init()` once at app start (idempotent), then look strings up
//! with `t!("recovery-title")`.
//!
//! Chart axis labels (`22 Jan`, `Feb`) are produced by `core::format` and are
//! not localized.
use std::sync::Once;

use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::LanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use tracing::{debug, warn};
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl; // Re-export for convenience.

/// Translation macro routing every lookup through the shared loader.
///
/// `t!("nav-dashboard")`; Fluent arguments go after the key: `t!(<key>, name = value)`.
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Fluent "domain" (matches the crate / the fallback FTL filename).
///
/// Fallback file path must be: `i18n/en-US/{DOMAIN}.ftl`
const DOMAIN: &str = "vitalgraph-ui";

/// Embed all locale folders under `i18n/`.
#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Global language loader used with the `fl!` macro.
pub static LOADER: Lazy<FluentLanguageLoader> = Lazy::new(|| {
    let fallback: LanguageIdentifier = "en-US".parse().expect("valid fallback language identifier");
    FluentLanguageLoader::new(DOMAIN, fallback)
});

static INIT: Once = Once::new();

/// Initialize i18n (idempotent).
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        if let Err(err) = i18n_embed::select(&*LOADER, &Localizations, &requested) {
            warn!(event = "i18n_init", status = "fallback", "failed selecting languages ({err})");
        }
    });
}

/// Switch language at runtime. Unparsable tags are ignored.
pub fn set_language(tag: &str) -> Result<(), i18n_embed::I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        debug!(event = "language_switch", status = "ignored", tag, "unparsable language tag");
        return Ok(());
    };
    i18n_embed::select(&*LOADER, &Localizations, &[lang]).map(|_| ())
}

/// Language the loader currently resolves strings in.
pub fn current_language() -> String {
    LOADER.current_language().to_string()
}

/// Embedded locale folders, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs: Vec<String> = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(str::to_string))
        .collect();
    langs.sort();
    langs.dedup();
    langs
}

/// Label for the language switcher; unknown codes show as-is.
pub fn language_name(code: &str) -> &str {
    match code {
        "en-US" => "English",
        "es-ES" => "Español",
        other => other,
    }
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}
