// Property tests for selection normalisation
use proptest::prelude::*;
use wordpeek::selection::normalize_selection;

proptest! {
    #[test]
    fn term_has_no_outer_punctuation_or_repeated_spaces(raw in "\\PC{0,40}") {
        if let Some(sel) = normalize_selection(&raw) {
            let first = sel.term.chars().next().unwrap();
            let last = sel.term.chars().last().unwrap();
            prop_assert!(first.is_alphanumeric());
            prop_assert!(last.is_alphanumeric());
            prop_assert!(!sel.term.contains("  "));
            prop_assert!(!sel.term.contains('\n'));
            prop_assert_eq!(sel.text.trim(), sel.text.as_str());
        }
    }

    #[test]
    fn normalizing_a_term_is_idempotent(raw in "\\PC{0,40}") {
        if let Some(sel) = normalize_selection(&raw) {
            let again = normalize_selection(&sel.term).expect("term stays non-empty");
            prop_assert_eq!(again.term, sel.term);
        }
    }

    #[test]
    fn words_survive_surrounding_noise(
        word in "[a-zA-Z]{1,12}",
        prefix in "[ \t\n\"'(«“]{0,4}",
        suffix in "[ \t\n\"').,;:!?»”]{0,4}",
    ) {
        let raw = format!("{prefix}{word}{suffix}");
        let sel = normalize_selection(&raw).expect("word is kept");
        prop_assert_eq!(sel.term, word);
    }
}

#[test]
fn whitespace_only_clipboard_is_no_selection() {
    assert!(normalize_selection("\r\n \t").is_none());
}
