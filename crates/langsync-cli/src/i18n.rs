//! Fluent bundles for console output.

use color_eyre::eyre::eyre;
use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::unic_langid::LanguageIdentifier;
use i18n_embed::DesktopLanguageRequester;
use rust_embed::RustEmbed;
use std::collections::HashMap;
use std::sync::OnceLock;

include!(concat!(env!("OUT_DIR"), "/supported_locales.rs"));

pub(crate) const FALLBACK_LANG: &str = "en";

pub(crate) static LANG_LOADER: OnceLock<FluentLanguageLoader> = OnceLock::new();

#[derive(RustEmbed)]
#[folder = "i18n/"]
struct Localizations;

/// Load the bundle for `requested`, or for the desktop locale when no
/// `--ui-lang` was given. Unknown codes fall back to English.
pub(crate) fn init(requested: Option<&str>) -> color_eyre::Result<()> {
    let fallback: LanguageIdentifier = FALLBACK_LANG
        .parse()
        .map_err(|e| eyre!("invalid fallback locale: {e}"))?;
    let loader = FluentLanguageLoader::new("langsync", fallback.clone());

    let wanted: Vec<LanguageIdentifier> = match requested {
        Some(code) if is_supported(code) => match code.parse() {
            Ok(id) => vec![id],
            Err(_) => vec![fallback],
        },
        Some(code) => {
            tracing::warn!(event = "ui_lang_unsupported", lang = code, supported = ?SUPPORTED_LOCALES);
            vec![fallback]
        }
        None => DesktopLanguageRequester::requested_languages(),
    };

    i18n_embed::select(&loader, &Localizations, &wanted)?;
    loader.set_use_isolating(false);
    let _ = LANG_LOADER.set(loader);
    Ok(())
}

pub(crate) fn is_supported(code: &str) -> bool {
    SUPPORTED_LOCALES.iter().any(|l| l.eq_ignore_ascii_case(code))
}

/// Message lookup used by the `tr!` family. Before `init` the id itself
/// is returned so early failures still print something.
pub(crate) fn lookup(id: &str, args: &[(&'static str, String)]) -> String {
    let Some(loader) = LANG_LOADER.get() else {
        return id.to_string();
    };
    if args.is_empty() {
        return loader.get(id);
    }
    let map: HashMap<&'static str, String> = args.iter().cloned().collect();
    loader.get_args(id, map)
}
