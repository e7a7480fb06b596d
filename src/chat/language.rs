//! Rough Hinglish detection used to pick which offline table answers.
//!
//! A message counts as Hinglish when it contains Devanagari script or
//! one of a handful of romanized Hindi words. Words are matched on
//! word boundaries so e.g. "acha" doesn't fire inside another word.
//! Short romanized words that are also common English words ("to",
//! "par") are left out of the list.

use std::sync::LazyLock;

use regex::Regex;

use super::models::Language;

const ROMANIZED_HINDI: &[&str] = &[
    "help kro", "fix kar", "fix kro", "kar do", "add kro", "sab kuch", "sari", "kya", "kaise",
    "hta", "bta", "chnge", "upgrde", "likha", "likhe", "likh", "niche", "puch", "aur", "jo",
    "hai", "nahi", "hna", "krta", "krte", "tik", "acha", "bura", "kb", "jb", "bs", "ab", "bhi",
];

static HINGLISH: LazyLock<Regex> = LazyLock::new(|| {
    let words = ROMANIZED_HINDI
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)[\u{{0900}}-\u{{097F}}]|\b(?:{})\b", words))
        .expect("Hinglish pattern is valid")
});

pub fn detect_language(message: &str) -> Language {
    if HINGLISH.is_match(message) {
        Language::Hinglish
    } else {
        Language::English
    }
}
