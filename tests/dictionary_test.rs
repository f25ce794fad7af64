// End-to-end interpretation of a real-shaped dictionary API payload
use wordpeek::dictionary::{LookupError, LookupOutcome, interpret_response};

const HELLO_RESPONSE: &str = r#"[
  {
    "word": "hello",
    "phonetic": "həˈləʊ",
    "phonetics": [
      { "text": "həˈləʊ", "audio": "//ssl.gstatic.com/dictionary/static/sounds/20200429/hello--_gb_1.mp3" },
      { "text": "hɛˈləʊ" }
    ],
    "origin": "early 19th century: variant of earlier hollo ; related to holla.",
    "meanings": [
      {
        "partOfSpeech": "exclamation",
        "definitions": [
          {
            "definition": "used as a greeting or to begin a phone conversation.",
            "example": "hello there, Katie!",
            "synonyms": [],
            "antonyms": []
          }
        ]
      },
      {
        "partOfSpeech": "noun",
        "definitions": [
          {
            "definition": "an utterance of ‘hello’; a greeting.",
            "example": "she was getting polite nods and hellos from people",
            "synonyms": [],
            "antonyms": []
          }
        ]
      },
      {
        "partOfSpeech": "verb",
        "definitions": [
          {
            "definition": "say or shout ‘hello’.",
            "example": "I pressed the phone button and helloed",
            "synonyms": [],
            "antonyms": []
          }
        ]
      }
    ],
    "sourceUrls": ["https://en.wiktionary.org/wiki/hello"]
  }
]"#;

#[test]
fn renders_full_entry() {
    let LookupOutcome::Found(def) = interpret_response("hello", 200, HELLO_RESPONSE) else {
        panic!("expected a definition");
    };

    let expected = "\
Word: hello
Pronunciation: həˈləʊ, hɛˈləʊ

Part of speech: exclamation
  1. used as a greeting or to begin a phone conversation.
     e.g., hello there, Katie!

Part of speech: noun
  1. an utterance of ‘hello’; a greeting.
     e.g., she was getting polite nods and hellos from people

Part of speech: verb
  1. say or shout ‘hello’.
     e.g., I pressed the phone button and helloed";

    assert_eq!(def.text, expected);
    assert_eq!(def.source_urls, vec!["https://en.wiktionary.org/wiki/hello"]);
    assert_eq!(
        def.summary.as_deref(),
        Some("used as a greeting or to begin a phone conversation.")
    );
}

#[test]
fn api_not_found_body_is_not_found() {
    let body = r#"{"title":"No Definitions Found","message":"Sorry pal, we couldn't find definitions for the word you were looking for.","resolution":"You can try the search again at later time or head to the web instead."}"#;
    assert_eq!(interpret_response("qwzx", 404, body), LookupOutcome::NotFound);
}

#[test]
fn object_body_with_success_status_is_a_parse_error() {
    let outcome = interpret_response("x", 200, r#"{"title":"unexpected"}"#);
    let LookupOutcome::Failed(err) = outcome else {
        panic!("expected failure");
    };
    assert!(matches!(err, LookupError::Parse(_)));
    assert!(err.to_string().starts_with("Error parsing API response: "));
}

#[test]
fn rate_limited_is_unexpected_status() {
    assert_eq!(
        interpret_response("x", 429, ""),
        LookupOutcome::Failed(LookupError::UnexpectedStatus(429))
    );
}
