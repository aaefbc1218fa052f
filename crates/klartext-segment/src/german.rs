use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

use crate::SentenceSegmenter;

/// Abbreviations that end in a dot without ending the sentence. Compared in
/// lower case.
const ABBREVIATIONS: &[&str] = &[
    "abb.", "abs.", "allg.", "art.", "bd.", "bspw.", "bzgl.", "bzw.", "ca.", "chr.", "d.h.",
    "dipl.", "dr.", "etc.", "evtl.", "fa.", "fr.", "geb.", "ggf.", "ggü.", "hr.", "i.d.r.",
    "inkl.", "insb.", "jh.", "kap.", "lt.", "med.", "mind.", "mio.", "mrd.",
    "nr.", "o.ä.", "prof.", "s.", "sog.", "str.", "tbl.", "tägl.", "tel.", "u.a.",
    "u.u.", "usw.", "v.a.", "vgl.", "z.b.", "z.t.", "zzgl.",
];

/// Abbreviations that often end a sentence ("dauert 10 Min."). They only
/// continue the sentence when the next word does not start in upper case.
const UNIT_ABBREVIATIONS: &[&str] = &["max.", "min.", "sek.", "std."];

/// Abbreviations written with a space, e.g. "z. B.". Case-sensitive.
const SPACED_ABBREVIATIONS: &[(&str, &str)] = &[
    ("z.", "B."),
    ("z.", "T."),
    ("d.", "h."),
    ("u.", "a."),
    ("u.", "U."),
    ("o.", "ä."),
    ("v.", "a."),
    ("i.", "d."),
];

/// Words that follow an ordinal number, as in "am 3. Mai" or "in der
/// 12. Schwangerschaftswoche".
const ORDINAL_FOLLOWERS: &[&str] = &[
    "Januar", "Februar", "März", "April", "Mai", "Juni", "Juli", "August", "September",
    "Oktober", "November", "Dezember", "Jahrhundert", "Lebensjahr", "Lebensjahres",
    "Lebenswoche", "Schwangerschaftswoche", "Woche", "Tag", "Klasse", "Auflage", "Stock",
];

/// Rule-based German sentence splitter.
///
/// Starts from Unicode sentence boundaries (UAX #29) and re-joins fragments
/// that were split after an abbreviation or an ordinal number.
#[derive(Debug, Clone)]
pub struct GermanSegmenter {
    abbreviations: HashSet<String>,
}

impl Default for GermanSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl GermanSegmenter {
    pub fn new() -> Self {
        Self {
            abbreviations: ABBREVIATIONS.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Adds abbreviations; a missing trailing dot is appended.
    pub fn with_abbreviations<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for abbreviation in extra {
            let mut normalized = abbreviation.as_ref().trim().to_lowercase();
            if normalized.is_empty() {
                continue;
            }
            if !normalized.ends_with('.') {
                normalized.push('.');
            }
            self.abbreviations.insert(normalized);
        }
        self
    }

    /// Whether the sentence collected so far continues into `next`.
    fn continues(&self, current: &str, next: &str) -> bool {
        let trimmed = current.trim_end();
        if !trimmed.ends_with('.') {
            return false;
        }

        let mut tokens = trimmed.split_whitespace().rev();
        let last = tokens
            .next()
            .map(strip_leading_punctuation)
            .unwrap_or_default();
        let previous = tokens.next().map(strip_leading_punctuation);

        let next_word = first_word(next);
        let lower = last.to_lowercase();

        if UNIT_ABBREVIATIONS.contains(&lower.as_str()) {
            return next_word.map_or(false, |w| !w.starts_with(char::is_uppercase));
        }

        if self.abbreviations.contains(&lower) {
            return true;
        }

        let spaced = SPACED_ABBREVIATIONS.iter().any(|(first, second)| {
            (last == *first && next_word.map_or(false, |w| w.starts_with(*second)))
                || (previous == Some(*first) && last == *second)
        });
        if spaced {
            return true;
        }

        is_ordinal(last)
            && next_word.map_or(false, |w| {
                ORDINAL_FOLLOWERS.contains(&w.trim_end_matches('.'))
            })
    }
}

impl SentenceSegmenter for GermanSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let fragments: Vec<&str> = text.split_sentence_bounds().collect();
        let mut sentences = Vec::new();
        let mut current = String::new();

        for (index, fragment) in fragments.iter().enumerate() {
            current.push_str(fragment);

            if let Some(next) = fragments.get(index + 1) {
                if self.continues(&current, next) {
                    continue;
                }
            }

            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }

        sentences
    }
}

fn strip_leading_punctuation(token: &str) -> &str {
    token.trim_start_matches(|c: char| !c.is_alphanumeric())
}

fn first_word(text: &str) -> Option<&str> {
    text.split_whitespace()
        .next()
        .map(|word| word.trim_end_matches(|c: char| !c.is_alphanumeric() && c != '.'))
}

fn is_ordinal(token: &str) -> bool {
    token
        .strip_suffix('.')
        .map_or(false, |digits| {
            !digits.is_empty() && digits.len() <= 2 && digits.chars().all(|c| c.is_ascii_digit())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn segment(text: &str) -> Vec<String> {
        GermanSegmenter::new().segment(text)
    }

    fn without_whitespace(text: &str) -> String {
        text.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn splits_simple_sentences() {
        assert_eq!(
            segment("Diabetes ist eine Krankheit. Sie betrifft den Zucker! Was hilft?"),
            vec![
                "Diabetes ist eine Krankheit.",
                "Sie betrifft den Zucker!",
                "Was hilft?",
            ]
        );
    }

    #[test]
    fn empty_and_blank_input_yield_nothing() {
        assert!(segment("").is_empty());
        assert!(segment("   \n\t ").is_empty());
    }

    #[test]
    fn text_without_terminator_is_one_sentence() {
        assert_eq!(segment("  Kein Punkt am Ende  "), vec!["Kein Punkt am Ende"]);
    }

    #[test]
    fn abbreviations_do_not_split() {
        assert_eq!(
            segment("Dr. Müller misst bzw. kontrolliert den Blutzucker. Das dauert ca. 5 Minuten."),
            vec![
                "Dr. Müller misst bzw. kontrolliert den Blutzucker.",
                "Das dauert ca. 5 Minuten.",
            ]
        );
    }

    #[test]
    fn compact_and_spaced_abbreviations_do_not_split() {
        assert_eq!(
            segment("Manche Lebensmittel, z.B. Brot, enthalten Zucker. Andere, z. B. Salat, kaum."),
            vec![
                "Manche Lebensmittel, z.B. Brot, enthalten Zucker.",
                "Andere, z. B. Salat, kaum.",
            ]
        );
        assert_eq!(
            segment("Insulin senkt den Zucker, d. h. Energie gelangt in die Zellen. Gut."),
            vec![
                "Insulin senkt den Zucker, d. h. Energie gelangt in die Zellen.",
                "Gut.",
            ]
        );
    }

    #[test]
    fn academic_titles_do_not_split() {
        assert_eq!(
            segment("Der Befund stammt von Prof. Dr. med. Schneider. Er ist eindeutig."),
            vec![
                "Der Befund stammt von Prof. Dr. med. Schneider.",
                "Er ist eindeutig.",
            ]
        );
    }

    #[test]
    fn ordinal_dates_do_not_split() {
        assert_eq!(
            segment("Der Termin ist am 3. Mai. Bitte nüchtern erscheinen."),
            vec!["Der Termin ist am 3. Mai.", "Bitte nüchtern erscheinen."]
        );
        assert_eq!(
            segment("Die Untersuchung erfolgt in der 24. Schwangerschaftswoche. Sie ist harmlos."),
            vec![
                "Die Untersuchung erfolgt in der 24. Schwangerschaftswoche.",
                "Sie ist harmlos.",
            ]
        );
    }

    #[test]
    fn numbers_at_sentence_end_still_split() {
        assert_eq!(
            segment("Der Wert liegt bei 120. Das ist normal."),
            vec!["Der Wert liegt bei 120.", "Das ist normal."]
        );
    }

    #[test]
    fn extra_abbreviations_are_respected() {
        let segmenter = GermanSegmenter::new().with_abbreviations(["Pat", "Diagn."]);
        assert_eq!(
            segmenter.segment("Der Pat. Meyer kam heute. Die Diagn. Typ-2-Diabetes steht fest."),
            vec![
                "Der Pat. Meyer kam heute.",
                "Die Diagn. Typ-2-Diabetes steht fest.",
            ]
        );
    }

    #[test]
    fn unit_abbreviation_at_sentence_end_splits() {
        assert_eq!(
            segment("Die Untersuchung dauert ca. 10 Min. Danach dürfen Sie essen."),
            vec!["Die Untersuchung dauert ca. 10 Min.", "Danach dürfen Sie essen."]
        );
        assert_eq!(
            segment("Nehmen Sie max. 3 Tabletten am Tag. Trinken Sie viel."),
            vec!["Nehmen Sie max. 3 Tabletten am Tag.", "Trinken Sie viel."]
        );
    }

    #[test]
    fn parenthesised_abbreviation_does_not_split() {
        assert_eq!(
            segment("Ein Wert (vgl. Tabelle) fehlt. Bitte nachreichen."),
            vec!["Ein Wert (vgl. Tabelle) fehlt.", "Bitte nachreichen."]
        );
    }

    #[test]
    fn newlines_between_sentences_are_dropped() {
        assert_eq!(
            segment("Erster Satz.\n\nZweiter Satz."),
            vec!["Erster Satz.", "Zweiter Satz."]
        );
    }

    proptest! {
        #[test]
        fn segmentation_preserves_characters(text in "[A-Za-zÄÖÜäöüß0-9 ,.!?\n]{0,200}") {
            let sentences = segment(&text);
            prop_assert_eq!(without_whitespace(&sentences.concat()), without_whitespace(&text));
        }

        #[test]
        fn sentences_are_trimmed_and_non_empty(text in "[A-Za-z .!?\n]{0,120}") {
            for sentence in segment(&text) {
                prop_assert!(!sentence.is_empty());
                prop_assert_eq!(sentence.trim(), sentence.as_str());
            }
        }
    }
}
