// English pluralization rules.
//
// Suffix rules are tried in order and the first match wins. Uncountable
// nouns and a handful of irregulars are checked before any rule runs.

use std::sync::LazyLock;

use regex_lite::Regex;

use super::traits::Pluralizer;

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
    "news",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
];

static RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)(quiz)$", "${1}zes"),
        (r"(?i)^(oxen)$", "${1}"),
        (r"(?i)^(ox)$", "${1}en"),
        (r"(?i)^(m|l)ice$", "${1}ice"),
        (r"(?i)^(m|l)ouse$", "${1}ice"),
        (r"(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
        (r"(?i)(x|ch|ss|sh)$", "${1}es"),
        (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
        (r"(?i)(hive)$", "${1}s"),
        (r"(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
        (r"(?i)sis$", "ses"),
        (r"(?i)([ti])a$", "${1}a"),
        (r"(?i)([ti])um$", "${1}a"),
        (r"(?i)(buffal|tomat)o$", "${1}oes"),
        (r"(?i)(bu)s$", "${1}ses"),
        (r"(?i)(alias|status)$", "${1}es"),
        (r"(?i)(octop|vir)(?:us|i)$", "${1}i"),
        (r"(?i)^(ax|test)is$", "${1}es"),
        (r"(?i)s$", "s"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Rule-based English pluralizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishPluralizer;

impl Pluralizer for EnglishPluralizer {
    fn pluralize(&self, word: &str) -> String {
        if word.is_empty() {
            return String::new();
        }

        let lower = word.to_lowercase();
        if UNCOUNTABLE.contains(&lower.as_str()) {
            return word.to_string();
        }
        if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
            return plural.to_string();
        }

        for (rule, replacement) in RULES.iter() {
            if rule.is_match(word) {
                return rule.replace(word, *replacement).into_owned();
            }
        }

        format!("{word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plural(word: &str) -> String {
        EnglishPluralizer.pluralize(word)
    }

    #[test]
    fn test_regular_nouns() {
        assert_eq!(plural("computer"), "computers");
        assert_eq!(plural("terminal"), "terminals");
        assert_eq!(plural("day"), "days");
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(plural("security"), "securities");
        assert_eq!(plural("box"), "boxes");
        assert_eq!(plural("church"), "churches");
        assert_eq!(plural("class"), "classes");
        assert_eq!(plural("knife"), "knives");
        assert_eq!(plural("wolf"), "wolves");
        assert_eq!(plural("analysis"), "analyses");
        assert_eq!(plural("matrix"), "matrices");
        assert_eq!(plural("index"), "indices");
        assert_eq!(plural("quiz"), "quizzes");
        assert_eq!(plural("status"), "statuses");
        assert_eq!(plural("bus"), "buses");
        assert_eq!(plural("datum"), "data");
    }

    #[test]
    fn test_already_plural_unchanged() {
        assert_eq!(plural("computers"), "computers");
    }

    #[test]
    fn test_corpus_words_pluralize_regularly() {
        assert_eq!(plural("software"), "softwares");
        assert_eq!(plural("hardware"), "hardwares");
        assert_eq!(plural("personnel"), "personnels");
        assert_eq!(plural("security"), "securities");
    }

    #[test]
    fn test_mouse_and_louse() {
        assert_eq!(plural("mouse"), "mice");
        assert_eq!(plural("louse"), "lice");
        assert_eq!(plural("mice"), "mice");
        assert_eq!(plural("axis"), "axes");
    }

    #[test]
    fn test_uncountable_and_irregular() {
        assert_eq!(plural("sheep"), "sheep");
        assert_eq!(plural("news"), "news");
        assert_eq!(plural("person"), "people");
        assert_eq!(plural("child"), "children");
    }
}
