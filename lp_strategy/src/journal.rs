use std::collections::VecDeque;

use alloy_primitives::Address;
use serde::Serialize;

use crate::{
    constants::MAX_JOURNAL_ENTRIES,
    utils::{
        common::current_timestamp,
        error::{StrategyError, StrategyResult},
    },
};

/// Category of a journal entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LogType {
    Info,
    /// Result of an exposed strategy operation
    ExecutionResult,
    /// Management changed the configuration or lifecycle
    ConfigurationChange,
}

/// Journal entry
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JournalEntry {
    pub timestamp: u64,
    pub entry: StrategyResult<()>,
    pub log_type: LogType,
    pub strategy: Option<Address>,
    pub note: Option<String>,
}

/// Builder for journal entries
impl JournalEntry {
    /// Create a new instance of a journal entry
    /// Fills the `timestamp`, `entry` and `log_type` fields
    pub fn new(entry: StrategyResult<()>, log_type: LogType) -> Self {
        Self {
            timestamp: current_timestamp(),
            entry,
            log_type,
            strategy: None,
            note: None,
        }
    }

    /// Fills the `strategy` field of the entry
    pub fn strategy(&mut self, strategy: Address) -> &mut Self {
        self.strategy = Some(strategy);
        self
    }

    /// Fills the `note` field of the entry
    pub fn note<S: AsRef<str>>(&mut self, text: S) -> &mut Self {
        self.note = Some(text.as_ref().to_string());
        self
    }

    /// Emits the entry as a tracing event
    fn emit(&self) {
        let note = self.note.as_deref().unwrap_or_default();
        match &self.entry {
            Ok(()) => tracing::info!(
                strategy = ?self.strategy,
                log_type = ?self.log_type,
                "{}",
                note
            ),
            Err(err) => tracing::warn!(
                strategy = ?self.strategy,
                log_type = ?self.log_type,
                error = %err,
                "{}",
                note
            ),
        }
    }
}

/// Bounded, in-memory collection of the journal entries of one strategy.
/// The oldest entries are pruned beyond `MAX_JOURNAL_ENTRIES`.
#[derive(Clone, Debug, Default)]
pub struct JournalCollection {
    strategy: Option<Address>,
    entries: VecDeque<JournalEntry>,
}

impl JournalCollection {
    /// Opens an empty journal, tagging every entry with `strategy`
    pub fn open(strategy: Option<Address>) -> Self {
        Self {
            strategy,
            entries: VecDeque::new(),
        }
    }

    /// Appends an entry and emits it
    pub fn append_note<S: AsRef<str>>(
        &mut self,
        entry: StrategyResult<()>,
        log_type: LogType,
        note: S,
    ) {
        let mut journal_entry = JournalEntry::new(entry, log_type);
        journal_entry.note(note);
        if let Some(strategy) = self.strategy {
            journal_entry.strategy(strategy);
        }
        journal_entry.emit();

        self.entries.push_back(journal_entry);
        while self.entries.len() > MAX_JOURNAL_ENTRIES {
            self.entries.pop_front();
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&JournalEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the journal, oldest entry first
    pub fn to_json(&self) -> StrategyResult<String> {
        serde_json::to_string(&self.entries)
            .map_err(|err| StrategyError::DecodingError(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_builder() {
        let mut entry = JournalEntry::new(Err(StrategyError::ZeroLP), LogType::ExecutionResult);
        entry
            .strategy(Address::repeat_byte(0x11))
            .note("Redemption failed.");

        assert_eq!(entry.entry, Err(StrategyError::ZeroLP));
        assert_eq!(entry.strategy, Some(Address::repeat_byte(0x11)));
        assert_eq!(entry.note.as_deref(), Some("Redemption failed."));
        assert!(entry.timestamp > 0);
    }

    #[test]
    fn test_collection_tags_strategy() {
        let mut journal = JournalCollection::open(Some(Address::repeat_byte(0x11)));
        journal.append_note(Ok(()), LogType::Info, "Opened.");

        let last = journal.last().unwrap();
        assert_eq!(last.strategy, Some(Address::repeat_byte(0x11)));
        assert_eq!(last.log_type, LogType::Info);
    }

    #[test]
    fn test_collection_prunes_oldest() {
        let mut journal = JournalCollection::open(None);
        for index in 0..MAX_JOURNAL_ENTRIES + 5 {
            journal.append_note(Ok(()), LogType::Info, format!("entry {}", index));
        }

        assert_eq!(journal.len(), MAX_JOURNAL_ENTRIES);
        assert_eq!(
            journal.entries().next().unwrap().note.as_deref(),
            Some("entry 5")
        );
    }

    #[test]
    fn test_to_json() {
        let mut journal = JournalCollection::open(None);
        journal.append_note(
            Err(StrategyError::NoRewardsClaimed),
            LogType::ExecutionResult,
            "Harvest failed.",
        );

        let json = journal.to_json().unwrap();
        assert!(json.contains("NoRewardsClaimed"));
        assert!(json.contains("ExecutionResult"));
        assert!(json.contains("Harvest failed."));
    }
}
