//! Locale resolution against a registry.
//!
//! # Invariants
//! - Resolution never fails. An unmatched request comes back unchanged and
//!   the caller sees an empty column lookup instead.
//! - The fallback chain never contains the same locale twice.

use crate::locale::registry::LocaleRegistry;
use crate::model::locale::Locale;

/// Builds the lookup chain for `start`, ending at `default`.
///
/// `es_ES_test` with default `en` gives `[es_ES_test, es_ES, es, en]`.
pub fn fallback_chain(start: &Locale, default: &Locale) -> Vec<Locale> {
    let mut chain = vec![start.clone()];

    if start.variant().is_some() {
        push_unique(&mut chain, start.without_variant());
    }
    if !start.is_bare_language() {
        push_unique(&mut chain, start.language_only());
    }
    push_unique(&mut chain, default.clone());

    chain
}

/// Maps `requested` to the most specific registered locale.
///
/// A missing request starts the chain at `default`. When no chain entry is
/// registered the start locale is returned as is.
pub fn resolve(requested: Option<&Locale>, registry: &LocaleRegistry, default: &Locale) -> Locale {
    let start = requested.unwrap_or(default);
    if registry.contains(start) {
        return start.clone();
    }

    fallback_chain(start, default)
        .into_iter()
        .find(|candidate| registry.contains(candidate))
        .unwrap_or_else(|| start.clone())
}

fn push_unique(chain: &mut Vec<Locale>, locale: Locale) {
    if !chain.contains(&locale) {
        chain.push(locale);
    }
}

#[cfg(test)]
mod tests {
    use super::{fallback_chain, resolve};
    use crate::locale::registry::LocaleRegistry;
    use crate::model::locale::Locale;

    fn locale(value: &str) -> Locale {
        value.parse().expect("valid locale")
    }

    fn en_es_registry() -> LocaleRegistry {
        LocaleRegistry::with_locales([locale("en"), locale("es")]).expect("registry")
    }

    #[test]
    fn chain_drops_variant_then_region_then_defaults() {
        let chain: Vec<String> = fallback_chain(&locale("es_ES_test"), &locale("en"))
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(chain, vec!["es_ES_test", "es_ES", "es", "en"]);
    }

    #[test]
    fn chain_for_variant_without_region_skips_duplicate_step() {
        let chain: Vec<String> = fallback_chain(&locale("es__test"), &locale("en"))
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(chain, vec!["es__test", "es", "en"]);
    }

    #[test]
    fn chain_does_not_repeat_default() {
        let chain = fallback_chain(&locale("en_GB"), &locale("en"));
        assert_eq!(chain, vec![locale("en_GB"), locale("en")]);

        let chain = fallback_chain(&locale("en"), &locale("en"));
        assert_eq!(chain, vec![locale("en")]);
    }

    #[test]
    fn registered_request_is_returned_directly() {
        let registry = en_es_registry();
        assert_eq!(
            resolve(Some(&locale("es")), &registry, &locale("en")),
            locale("es")
        );
    }

    #[test]
    fn region_and_variant_fall_back_to_language() {
        let registry = en_es_registry();
        assert_eq!(
            resolve(Some(&locale("es_MX")), &registry, &locale("en")),
            locale("es")
        );
        assert_eq!(
            resolve(Some(&locale("es_ES_test")), &registry, &locale("en")),
            locale("es")
        );
    }

    #[test]
    fn unregistered_language_falls_back_to_default() {
        let registry = en_es_registry();
        assert_eq!(
            resolve(Some(&locale("fr")), &registry, &locale("en")),
            locale("en")
        );
        assert_eq!(
            resolve(Some(&locale("fr_CA")), &registry, &locale("es")),
            locale("es")
        );
    }

    #[test]
    fn missing_request_uses_default() {
        let registry = en_es_registry();
        assert_eq!(resolve(None, &registry, &locale("es")), locale("es"));
    }

    #[test]
    fn no_match_returns_request_unchanged() {
        let registry = en_es_registry();
        assert_eq!(
            resolve(Some(&locale("fr_CA")), &registry, &locale("de")),
            locale("fr_CA")
        );
        assert_eq!(resolve(None, &registry, &locale("de")), locale("de"));
    }

    #[test]
    fn specific_registration_wins_over_language() {
        let registry = LocaleRegistry::with_locales([locale("en"), locale("pt"), locale("pt_BR")])
            .expect("registry");
        assert_eq!(
            resolve(Some(&locale("pt_BR_x1")), &registry, &locale("en")),
            locale("pt_BR")
        );
        assert_eq!(
            resolve(Some(&locale("pt_PT")), &registry, &locale("en")),
            locale("pt")
        );
    }
}
