use std::sync::atomic::{AtomicU64, Ordering};

/// Per-outcome record counters. Relaxed ordering; values are for observation only.
#[derive(Debug, Default)]
pub struct ProcessStats {
    rewritten: AtomicU64,
    empty: AtomicU64,
    no_object: AtomicU64,
    undecodable: AtomicU64,
    missing_metadata: AtomicU64,
    unknown_category: AtomicU64,
    emit_failed: AtomicU64,
}

/// Why a record was left untouched, or that it was rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Rewritten,
    Empty,
    NoObject,
    Undecodable,
    MissingMetadata,
    UnknownCategory,
    EmitFailed,
}

/// Point-in-time copy of [`ProcessStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub rewritten: u64,
    pub empty: u64,
    pub no_object: u64,
    pub undecodable: u64,
    pub missing_metadata: u64,
    pub unknown_category: u64,
    pub emit_failed: u64,
}

impl StatsSnapshot {
    /// Records left untouched, for any reason.
    pub fn passed_through(&self) -> u64 {
        self.empty
            + self.no_object
            + self.undecodable
            + self.missing_metadata
            + self.unknown_category
            + self.emit_failed
    }
}

impl ProcessStats {
    pub fn record(&self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Rewritten => &self.rewritten,
            Outcome::Empty => &self.empty,
            Outcome::NoObject => &self.no_object,
            Outcome::Undecodable => &self.undecodable,
            Outcome::MissingMetadata => &self.missing_metadata,
            Outcome::UnknownCategory => &self.unknown_category,
            Outcome::EmitFailed => &self.emit_failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            rewritten: self.rewritten.load(Ordering::Relaxed),
            empty: self.empty.load(Ordering::Relaxed),
            no_object: self.no_object.load(Ordering::Relaxed),
            undecodable: self.undecodable.load(Ordering::Relaxed),
            missing_metadata: self.missing_metadata.load(Ordering::Relaxed),
            unknown_category: self.unknown_category.load(Ordering::Relaxed),
            emit_failed: self.emit_failed.load(Ordering::Relaxed),
        }
    }
}
