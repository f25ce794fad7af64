//! # 数据模型模块
//!
//! 对应 `api.dictionaryapi.dev` 返回的词条数组。接口字段并不稳定，
//! 因此所有字段都可缺省，`null` 与缺失同样按默认值处理。

use serde::{Deserialize, Deserializer};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 单个词条
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phonetics: Vec<Phonetic>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meanings: Vec<Meaning>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_urls: Vec<String>,
}

/// 音标
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Phonetic {
    #[serde(default)]
    pub text: Option<String>,
}

/// 某一词性下的释义集合
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    #[serde(default)]
    pub part_of_speech: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub definitions: Vec<Sense>,
}

/// 单条释义及例句
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sense {
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_fields_fall_back_to_defaults() {
        let json = r#"[{"word":"hi","phonetics":null},{"meanings":[{"definitions":null}]}]"#;
        let entries: Vec<Entry> = serde_json::from_str(json).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].word.as_deref(), Some("hi"));
        assert!(entries[0].phonetics.is_empty());
        assert!(entries[0].meanings.is_empty());
        assert!(entries[1].word.is_none());
        assert!(entries[1].meanings[0].part_of_speech.is_none());
        assert!(entries[1].meanings[0].definitions.is_empty());
    }

    #[test]
    fn camel_case_fields_are_mapped() {
        let json = r#"[{"word":"run","sourceUrls":["https://en.wiktionary.org/wiki/run"],
            "meanings":[{"partOfSpeech":"verb","definitions":[{"definition":"To move fast."}]}]}]"#;
        let entries: Vec<Entry> = serde_json::from_str(json).unwrap();

        assert_eq!(entries[0].source_urls, vec!["https://en.wiktionary.org/wiki/run"]);
        assert_eq!(entries[0].meanings[0].part_of_speech.as_deref(), Some("verb"));
    }
}
