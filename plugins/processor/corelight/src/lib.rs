//! Corelight processor: rewrites Zeek JSON logs as Zeek-style TSV lines.
//!
//! Each record whose payload holds a JSON object with a string `_path` and an
//! RFC 3339 `ts` is routed to the tag `prefix + _path` and its payload is
//! replaced by one tab-separated line in the category's fixed column order.
//! Anything else passes through untouched.

pub mod config;
pub mod emit;
pub mod error;
pub mod schema;
pub mod stats;
pub mod tags;
pub mod value;

use chrono::{DateTime, Utc};

use zeekline_api::config::ConfigValues;
use zeekline_api::error::PluginError;
use zeekline_api::processor::Processor;
use zeekline_api::record::Record;
use zeekline_api::tag::{TagId, Tagger};

use crate::config::CorelightConfig;
use crate::emit::emit_line;
use crate::error::CorelightError;
use crate::stats::{Outcome, ProcessStats, StatsSnapshot};
use crate::tags::TagRegistry;
use crate::value::DecodedRecord;

/// Processor type name used in config files.
pub const PROCESSOR_TYPE: &str = "corelight";

/// Everything a successful conversion writes back into a record.
struct Converted {
    tag: TagId,
    ts: DateTime<Utc>,
    line: Vec<u8>,
}

pub struct Corelight {
    registry: TagRegistry,
    stats: ProcessStats,
}

impl Corelight {
    /// Negotiate one tag per known category. Fails if any negotiation fails.
    pub fn new(config: &CorelightConfig, tagger: &dyn Tagger) -> Result<Self, CorelightError> {
        Ok(Self {
            registry: TagRegistry::build(&config.prefix, tagger)?,
            stats: ProcessStats::default(),
        })
    }

    pub fn from_config(config: &ConfigValues, tagger: &dyn Tagger) -> Result<Self, CorelightError> {
        Self::new(&CorelightConfig::from_config(config)?, tagger)
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn prefix(&self) -> &str {
        self.registry.prefix()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Convert every record of the batch that can be converted.
    ///
    /// Never fails: unconvertible records come back byte-identical, and the
    /// batch keeps its length and order.
    pub fn process_batch(&self, mut records: Vec<Record>) -> Vec<Record> {
        if records.is_empty() {
            return records;
        }
        for record in records.iter_mut() {
            self.process_record(record);
        }
        records
    }

    /// Convert one record in place. Returns whether it was rewritten.
    ///
    /// Tag, timestamp and payload are either all replaced or all left alone.
    pub fn process_record(&self, record: &mut Record) -> bool {
        let outcome = match self.convert(&record.data) {
            Ok(converted) => {
                record.tag = converted.tag;
                record.ts = converted.ts;
                record.data = converted.line;
                Outcome::Rewritten
            }
            Err(outcome) => outcome,
        };
        self.stats.record(outcome);
        outcome == Outcome::Rewritten
    }

    fn convert(&self, data: &[u8]) -> Result<Converted, Outcome> {
        if data.is_empty() {
            return Err(Outcome::Empty);
        }
        // Anything before the first brace (syslog header, framing) is skipped.
        let start = data
            .iter()
            .position(|&b| b == b'{')
            .ok_or(Outcome::NoObject)?;
        let decoded = DecodedRecord::decode(&data[start..]).ok_or(Outcome::Undecodable)?;
        if decoded.is_empty() {
            return Err(Outcome::Undecodable);
        }
        let (category, ts) = extract_metadata(&decoded).ok_or(Outcome::MissingMetadata)?;
        let tag_name = format!("{}{category}", self.registry.prefix());
        let route = self
            .registry
            .route(&tag_name)
            .ok_or(Outcome::UnknownCategory)?;
        let line = emit_line(&ts, route.fields, &decoded).map_err(|_| Outcome::EmitFailed)?;
        Ok(Converted {
            tag: route.tag,
            ts,
            line,
        })
    }
}

/// `_path` and `ts`, both required to be strings; `ts` must be RFC 3339.
fn extract_metadata(decoded: &DecodedRecord) -> Option<(&str, DateTime<Utc>)> {
    let category = decoded.get_str("_path")?;
    let ts = decoded.get_str("ts")?;
    let ts = DateTime::parse_from_rfc3339(ts).ok()?.with_timezone(&Utc);
    Some((category, ts))
}

impl Processor for Corelight {
    fn process(&self, records: Vec<Record>) -> Result<Vec<Record>, PluginError> {
        Ok(self.process_batch(records))
    }

    /// Renegotiate every tag with `tagger`, also when the prefix is unchanged.
    /// The old table stays on failure.
    fn reconfigure(&mut self, config: &ConfigValues, tagger: &dyn Tagger) -> Result<(), PluginError> {
        let config = CorelightConfig::from_config(config)?;
        let registry = TagRegistry::build(&config.prefix, tagger)?;
        tracing::info!(
            old_prefix = %self.registry.prefix(),
            new_prefix = %registry.prefix(),
            "reconfigured corelight processor"
        );
        self.registry = registry;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::TimeZone;
    use zeekline_api::config::ParamValue;

    use super::*;

    #[derive(Default)]
    struct MapTagger {
        tags: Mutex<HashMap<String, TagId>>,
    }

    impl Tagger for MapTagger {
        fn negotiate_tag(&self, name: &str) -> Result<TagId, PluginError> {
            let mut tags = self.tags.lock().unwrap();
            let next = TagId(tags.len() as u16 + 1);
            Ok(*tags.entry(name.to_string()).or_insert(next))
        }

        fn lookup_tag(&self, tag: TagId) -> Option<String> {
            let tags = self.tags.lock().unwrap();
            tags.iter().find(|(_, t)| **t == tag).map(|(n, _)| n.clone())
        }
    }

    fn record(data: &[u8]) -> Record {
        Record::new(TagId(0), Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(), data)
    }

    fn processor(tagger: &MapTagger) -> Corelight {
        Corelight::new(&CorelightConfig::default(), tagger).unwrap()
    }

    #[test]
    fn conn_record_is_rewritten() {
        let tagger = MapTagger::default();
        let proc = processor(&tagger);
        let mut rec = record(
            br#"{"_path":"conn","ts":"2021-01-01T00:00:00.000000Z","uid":"abc","id.orig_h":"1.2.3.4"}"#,
        );
        assert!(proc.process_record(&mut rec));

        assert_eq!(tagger.lookup_tag(rec.tag).as_deref(), Some("zeekconn"));
        assert_eq!(rec.ts, Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap());
        let line = String::from_utf8(rec.data).unwrap();
        let columns: Vec<&str> = line.split('\t').collect();
        assert_eq!(columns.len(), 22);
        assert_eq!(&columns[..4], &["1609459200.000000", "abc", "1.2.3.4", "-"]);
        assert!(columns[3..].iter().all(|c| *c == "-"));
    }

    #[test]
    fn leading_framing_is_skipped() {
        let tagger = MapTagger::default();
        let proc = processor(&tagger);
        let mut rec = record(
            b"<13>Jan  1 00:00:00 sensor zeek: {\"_path\":\"weird\",\"ts\":\"2021-01-01T00:00:01Z\",\"name\":\"bad_TCP_checksum\"}",
        );
        assert!(proc.process_record(&mut rec));
        assert_eq!(tagger.lookup_tag(rec.tag).as_deref(), Some("zeekweird"));
        assert!(rec.data.starts_with(b"1609459201.000000\t-\t"));
    }

    #[test]
    fn timestamp_offset_is_normalized_to_utc() {
        let proc = processor(&MapTagger::default());
        let mut rec = record(br#"{"_path":"dns","ts":"2021-01-01T02:00:00.5+02:00"}"#);
        assert!(proc.process_record(&mut rec));
        assert!(rec.data.starts_with(b"1609459200.500000\t"));
    }

    #[test]
    fn unconvertible_records_are_untouched() {
        let proc = processor(&MapTagger::default());
        let inputs: &[&[u8]] = &[
            b"",
            b"no json here",
            b"{not json",
            b"{}",
            br#"{"_path":"conn"}"#,
            br#"{"ts":"2021-01-01T00:00:00Z"}"#,
            br#"{"_path":1,"ts":"2021-01-01T00:00:00Z"}"#,
            br#"{"_path":"conn","ts":1609459200}"#,
            br#"{"_path":"conn","ts":"2021-01-01 00:00:00"}"#,
            br#"{"_path":"conn","ts":"2021-13-01T00:00:00Z"}"#,
            br#"{"_path":"nosuch","ts":"2021-01-01T00:00:00Z"}"#,
            br#"{"_path":"CONN","ts":"2021-01-01T00:00:00Z"}"#,
            br#"{"_path":"conn","ts":"2021-01-01T00:00:00Z"} extra"#,
        ];
        for input in inputs {
            let mut rec = record(input);
            let before = rec.clone();
            assert!(!proc.process_record(&mut rec), "{:?}", String::from_utf8_lossy(input));
            assert_eq!(rec, before);
        }
        let stats = proc.stats();
        assert_eq!(stats.rewritten, 0);
        assert_eq!(stats.passed_through(), inputs.len() as u64);
        assert_eq!(stats.empty, 1);
        assert_eq!(stats.no_object, 1);
        assert_eq!(stats.unknown_category, 2);
    }

    #[test]
    fn converted_output_is_not_converted_again() {
        let proc = processor(&MapTagger::default());
        let mut rec = record(br#"{"_path":"dpd","ts":"2021-01-01T00:00:00Z","proto":"tcp"}"#);
        assert!(proc.process_record(&mut rec));
        let once = rec.clone();
        assert!(!proc.process_record(&mut rec));
        assert_eq!(rec, once);
    }

    #[test]
    fn batch_keeps_length_and_order() {
        let proc = processor(&MapTagger::default());
        let batch = vec![
            record(b""),
            record(br#"{"_path":"ssh","ts":"2021-01-01T00:00:00Z","auth_attempts":3}"#),
            record(b"plain text"),
        ];
        let out = proc.process_batch(batch);
        assert_eq!(out.len(), 3);
        assert!(out[0].data.is_empty());
        assert!(out[1].data.starts_with(b"1609459200.000000\t"));
        assert_eq!(out[2].data, b"plain text");
        assert!(proc.process_batch(Vec::new()).is_empty());
    }

    #[test]
    fn reconfigure_switches_prefix() {
        let tagger = MapTagger::default();
        let mut proc = processor(&tagger);
        let values = ConfigValues::new().with("prefix", ParamValue::Str("cl".into()));
        proc.reconfigure(&values, &tagger).unwrap();
        assert_eq!(proc.prefix(), "cl");

        let mut rec = record(br#"{"_path":"ftp","ts":"2021-01-01T00:00:00Z"}"#);
        assert!(proc.process_record(&mut rec));
        assert_eq!(tagger.lookup_tag(rec.tag).as_deref(), Some("clftp"));
    }

    #[test]
    fn reconfigure_renegotiates_with_new_tagger() {
        let first = MapTagger::default();
        let mut proc = processor(&first);

        let second = MapTagger::default();
        second.negotiate_tag("unrelated").unwrap();
        let values = ConfigValues::new().with("prefix", ParamValue::Str("zeek".into()));
        proc.reconfigure(&values, &second).unwrap();

        let mut rec = record(br#"{"_path":"conn","ts":"2021-01-01T00:00:00Z"}"#);
        assert!(proc.process_record(&mut rec));
        assert_eq!(second.lookup_tag(rec.tag).as_deref(), Some("zeekconn"));
        assert_ne!(Some(rec.tag), first.negotiate_tag("zeekconn").ok());
    }

    #[test]
    fn failed_reconfigure_keeps_previous_table() {
        struct Refusing;
        impl Tagger for Refusing {
            fn negotiate_tag(&self, _name: &str) -> Result<TagId, PluginError> {
                Err(PluginError::exhausted("no tags left"))
            }
            fn lookup_tag(&self, _tag: TagId) -> Option<String> {
                None
            }
        }

        let mut proc = processor(&MapTagger::default());
        let values = ConfigValues::new().with("prefix", ParamValue::Str("other".into()));
        let err = proc.reconfigure(&values, &Refusing).unwrap_err();
        assert_eq!(err.kind, zeekline_api::error::ErrorKind::Config);
        assert_eq!(proc.prefix(), "zeek");
    }
}
