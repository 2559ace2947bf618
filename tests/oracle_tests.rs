use cipherforge::oracle::{Dictionary, WordOracle};
use std::io::Write;
use tempfile::NamedTempFile;

fn word_file(words: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for w in words {
        writeln!(file, "{}", w).unwrap();
    }
    file
}

#[test]
fn test_supplementary_list_extends_the_dictionary() {
    let main = word_file(&["the", "cat", ""]);
    let extra = word_file(&["Zyzzyva", "cat"]);

    let mut dict = Dictionary::load(main.path()).unwrap();
    assert_eq!(dict.len(), 2);
    assert!(!dict.is_solved("the zyzzyva"));

    let added = dict.add_word_list(extra.path()).unwrap();
    assert_eq!(added, 1);
    assert!(dict.is_solved("the zyzzyva cat"));
}

#[test]
fn test_unknown_words_are_deduplicated_and_sorted() {
    let dict = Dictionary::from_words(["a"]);
    let unknown: Vec<String> = dict.unknown_words("zz a bb zz").into_iter().collect();
    assert_eq!(unknown, vec!["bb".to_string(), "zz".to_string()]);
}

#[test]
fn test_empty_text_is_solved() {
    let dict = Dictionary::default();
    assert!(dict.is_solved(""));
    assert!(dict.unknown_words("   ").is_empty());
}

#[test]
fn test_missing_word_list_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Dictionary::load(dir.path().join("missing.txt")).is_err());
}
