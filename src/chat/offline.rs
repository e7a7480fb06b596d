use crate::persona::{OfflineTable, OfflineTables};

use super::models::{ChatReply, Language};

/// Answers from the persona's canned tables when no provider could.
#[derive(Clone, Debug)]
pub struct OfflineResponder {
    english: OfflineTable,
    hinglish: OfflineTable,
}

impl OfflineResponder {
    pub fn new(tables: OfflineTables) -> Self {
        Self {
            english: tables.english,
            hinglish: tables.hinglish,
        }
    }

    fn table(&self, language: Language) -> &OfflineTable {
        match language {
            Language::Hinglish => &self.hinglish,
            Language::English => &self.english,
        }
    }

    pub fn respond(&self, message: &str, language: Language) -> ChatReply {
        let table = self.table(language);
        ChatReply::offline(&table.provider, table.lookup(message), language)
    }
}
