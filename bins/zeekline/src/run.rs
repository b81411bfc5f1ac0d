use std::io::{BufRead, BufWriter, Write};

use chrono::Utc;

use zeekline_api::record::Record;
use zeekline_api::tag::{TagId, Tagger};
use zeekline_engine::{IngestConfig, MemoryTagger, ProcessorChain, ProcessorConfig};

use crate::cli::Cli;
use crate::error::CliError;

/// Read newline-delimited records from stdin, convert, write to stdout.
pub fn run(cli: &Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => {
            tracing::info!(config = %path, "loading configuration");
            IngestConfig::load(path)?
        }
        None => default_config(&cli.prefix),
    };

    let tagger = MemoryTagger::new(config.max_tags);
    let chain = ProcessorChain::build(&config.processors, &tagger)?;
    tracing::info!(processors = chain.len(), tags = tagger.len(), "processor chain ready");

    let batch_size = usize::try_from(cli.batch).unwrap_or(usize::MAX);
    let stdin = std::io::stdin().lock();
    let mut out = BufWriter::new(std::io::stdout().lock());
    let mut batch = Vec::with_capacity(batch_size.min(4096));
    let mut total = 0u64;
    let mut converted = 0u64;

    for line in stdin.split(b'\n') {
        let mut data = line?;
        if data.last() == Some(&b'\r') {
            data.pop();
        }
        batch.push(Record::new(tagger.default_tag(), Utc::now(), data));
        if batch.len() >= batch_size {
            let (n, c) = flush(&chain, &tagger, &mut batch, &mut out, cli.with_tag)?;
            total += n;
            converted += c;
        }
    }
    let (n, c) = flush(&chain, &tagger, &mut batch, &mut out, cli.with_tag)?;
    total += n;
    converted += c;
    out.flush()?;

    tracing::info!(records = total, converted, "input exhausted");
    Ok(())
}

fn default_config(prefix: &str) -> IngestConfig {
    let mut params = toml::Table::new();
    params.insert("prefix".into(), toml::Value::String(prefix.to_string()));
    IngestConfig {
        processors: vec![ProcessorConfig {
            name: "corelight".into(),
            kind: "corelight".into(),
            config: Some(toml::Value::Table(params)),
        }],
        ..IngestConfig::default()
    }
}

/// Process and write the pending batch. Returns (records written, records retagged).
fn flush(
    chain: &ProcessorChain,
    tagger: &MemoryTagger,
    batch: &mut Vec<Record>,
    out: &mut impl Write,
    with_tag: bool,
) -> Result<(u64, u64), CliError> {
    if batch.is_empty() {
        return Ok((0, 0));
    }
    let records = chain.process(std::mem::take(batch))?;
    let mut retagged = 0;
    for record in &records {
        if record.tag != tagger.default_tag() {
            retagged += 1;
        }
        if with_tag {
            write!(out, "{}\t", tag_name(tagger, record.tag))?;
        }
        out.write_all(&record.data)?;
        out.write_all(b"\n")?;
    }
    Ok((records.len() as u64, retagged))
}

fn tag_name(tagger: &MemoryTagger, tag: TagId) -> String {
    tagger.lookup_tag(tag).unwrap_or_else(|| tag.to_string())
}
