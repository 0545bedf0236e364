// Pluralizer trait — the injected inflection capability.
//
// The resolver only needs "given a word, produce its plural". Keeping this
// behind a trait lets tests swap in a fake and lets callers plug in a
// different language's rules without touching the merge logic.

/// Produces the plural form of a word.
pub trait Pluralizer {
    fn pluralize(&self, word: &str) -> String;
}

impl<F> Pluralizer for F
where
    F: Fn(&str) -> String,
{
    fn pluralize(&self, word: &str) -> String {
        self(word)
    }
}

/// Pluralizer that never finds a distinct plural, disabling merging.
pub struct NoPlurals;

impl Pluralizer for NoPlurals {
    fn pluralize(&self, word: &str) -> String {
        word.to_string()
    }
}
