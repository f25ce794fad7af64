//! # 渲染模块
//!
//! 把词条数组渲染为纯文本，格式示例：
//!
//! ```text
//! Word: hello
//! Pronunciation: /həˈləʊ/, /hɛˈləʊ/
//!
//! Part of speech: noun
//!   1. "Hello!" or an equivalent greeting.
//!      e.g., She said hello.
//! ```

use super::model::{Entry, Meaning};

const SUMMARY_MAX_CHARS: usize = 120;

/// 渲染全部词条；没有任何可展示内容时返回空字符串。
pub fn render_entries(entries: &[Entry]) -> String {
    let mut lines = Vec::new();
    for entry in entries {
        render_entry(entry, &mut lines);
    }
    lines.join("\n")
}

fn render_entry(entry: &Entry, lines: &mut Vec<String>) {
    if let Some(word) = &entry.word {
        lines.push(format!("Word: {word}"));
    }

    let pronunciations: Vec<&str> = entry
        .phonetics
        .iter()
        .filter_map(|p| p.text.as_deref())
        .filter(|text| !text.is_empty())
        .collect();
    if !pronunciations.is_empty() {
        lines.push(format!("Pronunciation: {}", pronunciations.join(", ")));
    }

    for meaning in &entry.meanings {
        render_meaning(meaning, lines);
    }
}

fn render_meaning(meaning: &Meaning, lines: &mut Vec<String>) {
    let part = meaning.part_of_speech.as_deref().unwrap_or_default();
    lines.push(format!("\nPart of speech: {part}"));

    for (i, sense) in meaning.definitions.iter().enumerate() {
        let definition = sense.definition.as_deref().unwrap_or_default();
        lines.push(format!("  {}. {}", i + 1, definition));
        if let Some(example) = sense.example.as_deref().filter(|e| !e.is_empty()) {
            lines.push(format!("     e.g., {example}"));
        }
    }
}

/// 取第一条非空释义作为摘要，超长时按字符截断。
pub fn summarize(entries: &[Entry]) -> Option<String> {
    let first = entries
        .iter()
        .flat_map(|e| e.meanings.iter())
        .flat_map(|m| m.definitions.iter())
        .filter_map(|s| s.definition.as_deref())
        .map(str::trim)
        .find(|d| !d.is_empty())?;

    if first.chars().count() <= SUMMARY_MAX_CHARS {
        return Some(first.to_string());
    }
    let truncated: String = first.chars().take(SUMMARY_MAX_CHARS - 1).collect();
    Some(format!("{}…", truncated.trim_end()))
}
