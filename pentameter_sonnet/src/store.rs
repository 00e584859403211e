// Candidate store: candidates grouped into buckets by rhyme key.
//
// Buckets live in a `BTreeMap`, so iteration over keys is ordered and
// everything derived from it (serialization, bucket listings, assembly
// input) is deterministic. Within a bucket, candidates keep insertion order.
// A side set of (span, stress) identities rejects duplicates.
//
// Cache format: one candidate per line, five tab-separated columns:
//
//   rhyme key   text   stress digits   span (line:start-end)   phones
//   AY1-T       alone again below above tonight   0101010101   0:0-5   AH0 L OW1 N ...
//
// Records are written bucket by bucket in key order. Reading a serialized
// store and writing it again reproduces the input byte for byte. Blank
// lines are ignored on read; anything else that does not parse (bad UTF-8,
// a stress pattern or rhyme key its own phones contradict) is an error
// carrying its 1-based line number.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use pentameter_phonetics::{format_phones, parse_phones};
use rustc_hash::FxHashSet;
use tracing::info;

use crate::candidate::{Candidate, Span, StressPattern};
use crate::error::RecordError;
use crate::rhyme::RhymeKey;

const COLUMNS: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct CandidateStore {
    buckets: BTreeMap<RhymeKey, Vec<Candidate>>,
    seen: FxHashSet<(Span, StressPattern)>,
    len: usize,
}

impl CandidateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a candidate under its rhyme key. Returns false (and keeps the
    /// store unchanged) if a candidate with the same identity is present.
    pub fn add(&mut self, candidate: Candidate) -> bool {
        if !self
            .seen
            .insert((candidate.span(), candidate.stress().clone()))
        {
            return false;
        }
        self.buckets
            .entry(candidate.rhyme_key().clone())
            .or_default()
            .push(candidate);
        self.len += 1;
        true
    }

    /// Add every candidate of `other`, in its iteration order. Returns the
    /// number actually added.
    pub fn merge(&mut self, other: CandidateStore) -> usize {
        other
            .buckets
            .into_values()
            .flatten()
            .map(|c| self.add(c))
            .filter(|&added| added)
            .count()
    }

    /// Candidates sharing `key`, in insertion order.
    pub fn bucket(&self, key: &RhymeKey) -> &[Candidate] {
        self.buckets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn keys(&self) -> impl Iterator<Item = &RhymeKey> {
        self.buckets.keys()
    }

    /// All candidates, bucket by bucket in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.buckets.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Buckets holding at least `min` candidates, largest first, ties in key
    /// order.
    pub fn buckets_of_size(&self, min: usize) -> Vec<(&RhymeKey, &[Candidate])> {
        let mut out: Vec<(&RhymeKey, &[Candidate])> = self
            .buckets
            .iter()
            .filter(|(_, bucket)| bucket.len() >= min)
            .map(|(key, bucket)| (key, bucket.as_slice()))
            .collect();
        // Stable sort keeps key order among equal sizes.
        out.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
        out
    }

    pub fn write_records<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        for c in self.iter() {
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}",
                c.rhyme_key(),
                c.text(),
                c.stress(),
                c.span(),
                format_phones(c.phones())
            )?;
        }
        out.flush()
    }

    pub fn serialize(&self) -> String {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail.
        let _ = self.write_records(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    pub fn read_records<R: BufRead>(input: R) -> Result<Self, RecordError> {
        let mut store = CandidateStore::new();
        for (idx, bytes) in input.split(b'\n').enumerate() {
            let bytes = bytes?;
            let lineno = idx + 1;
            let line = std::str::from_utf8(&bytes).map_err(|e| RecordError::Malformed {
                line: lineno,
                message: format!("not valid UTF-8: {e}"),
            })?;
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.trim().is_empty() {
                continue;
            }
            let candidate = parse_record(line).map_err(|message| RecordError::Malformed {
                line: lineno,
                message,
            })?;
            if !store.add(candidate) {
                return Err(RecordError::Duplicate { line: lineno });
            }
        }
        Ok(store)
    }

    pub fn deserialize(text: &str) -> Result<Self, RecordError> {
        Self::read_records(text.as_bytes())
    }

    /// Write the store to a cache file.
    pub fn save(&self, path: &Path) -> Result<(), RecordError> {
        self.write_records(BufWriter::new(File::create(path)?))?;
        info!(
            path = %path.display(),
            candidates = self.len(),
            buckets = self.num_buckets(),
            "wrote candidate cache"
        );
        Ok(())
    }

    /// Read a store from a cache file.
    pub fn load(path: &Path) -> Result<Self, RecordError> {
        let store = Self::read_records(BufReader::new(File::open(path)?))?;
        info!(
            path = %path.display(),
            candidates = store.len(),
            buckets = store.num_buckets(),
            "loaded candidate cache"
        );
        Ok(store)
    }
}

fn parse_record(line: &str) -> Result<Candidate, String> {
    let fields: Vec<&str> = line.split('\t').collect();
    let [key, text, stress, span, phones] = fields[..] else {
        return Err(format!(
            "expected {COLUMNS} tab-separated columns, found {}",
            fields.len()
        ));
    };

    let rhyme_key: RhymeKey = key.parse()?;
    if text.trim().is_empty() {
        return Err("empty text".to_string());
    }
    let stress: StressPattern = stress.parse()?;
    let span: Span = span.parse()?;
    let phones = parse_phones(phones).map_err(|e| e.to_string())?;
    if StressPattern::from_phones(&phones) != stress {
        return Err(format!(
            "phones {:?} do not match stress {stress}",
            format_phones(&phones)
        ));
    }

    if !rhyme_key.fits_phones(&phones) {
        return Err(format!(
            "rhyme key {rhyme_key} does not fit phones {:?}",
            format_phones(&phones)
        ));
    }

    Ok(Candidate::new(text.to_string(), span, phones, stress, rhyme_key))
}
