// Text driver: source lines in, populated candidate store out.
//
// Each source line is numbered by its 0-based position in the input; that
// number becomes the `line` of every candidate's span. A line first passes
// the prose filter (optional), then goes through the pronouncer, the
// normalizer and the meter scanner. A line the pronouncer cannot fully
// pronounce is skipped with a debug log and contributes nothing.
//
// The parallel variant scans lines on the rayon pool into per-line
// candidate lists, then adds them to one store in line order. Since the
// store's contents depend only on insertion order per bucket, both
// variants produce the same store.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::candidate::Candidate;
use crate::meter::scan_stream;
use crate::rhyme::RhymeKeyer;
use crate::store::CandidateStore;
use crate::stream::Pronouncer;

/// Crude check that a line is running prose rather than markup, a formula,
/// a table row or a heading.
pub fn is_natural_language(line: &str) -> bool {
    let line = line.trim();
    if line.chars().count() < 5 {
        return false;
    }
    // LaTeX
    if line.contains('\\') || line.starts_with('$') || line.ends_with('$') {
        return false;
    }
    // Headings and fragments
    if line.matches(' ').count() < 2 {
        return false;
    }
    // Tables and rules
    if line.contains("   ") || line.chars().all(|c| c == '-' || c.is_whitespace()) {
        return false;
    }
    true
}

/// Candidates of one source line. Unpronounceable lines yield none.
pub fn scan_line<P: Pronouncer + ?Sized>(
    line: u32,
    text: &str,
    pronouncer: &P,
    keyer: &RhymeKeyer,
) -> Vec<Candidate> {
    match pronouncer.predict(text) {
        Ok(stream) => scan_stream(line, &stream, keyer),
        Err(e) => {
            debug!(line, error = %e, "skipping line");
            Vec::new()
        }
    }
}

fn scan_source_line<P: Pronouncer + ?Sized>(
    idx: usize,
    text: &str,
    pronouncer: &P,
    keyer: &RhymeKeyer,
    prose_filter: bool,
) -> Vec<Candidate> {
    if prose_filter && !is_natural_language(text) {
        return Vec::new();
    }
    scan_line(idx as u32, text, pronouncer, keyer)
}

fn log_totals(lines: usize, store: &CandidateStore) {
    info!(
        lines,
        candidates = store.len(),
        buckets = store.num_buckets(),
        "extracted candidate phrases"
    );
}

/// Scan every line and bucket the candidates by rhyme key.
pub fn collect_candidates<S, P>(
    lines: &[S],
    pronouncer: &P,
    keyer: &RhymeKeyer,
    prose_filter: bool,
) -> CandidateStore
where
    S: AsRef<str>,
    P: Pronouncer + ?Sized,
{
    let mut store = CandidateStore::new();
    for (idx, text) in lines.iter().enumerate() {
        for candidate in scan_source_line(idx, text.as_ref(), pronouncer, keyer, prose_filter) {
            store.add(candidate);
        }
    }
    log_totals(lines.len(), &store);
    store
}

/// `collect_candidates` with lines scanned on the rayon thread pool.
pub fn collect_candidates_parallel<S, P>(
    lines: &[S],
    pronouncer: &P,
    keyer: &RhymeKeyer,
    prose_filter: bool,
) -> CandidateStore
where
    S: AsRef<str> + Sync,
    P: Pronouncer + Sync + ?Sized,
{
    let per_line: Vec<Vec<Candidate>> = lines
        .par_iter()
        .enumerate()
        .map(|(idx, text)| scan_source_line(idx, text.as_ref(), pronouncer, keyer, prose_filter))
        .collect();

    let mut store = CandidateStore::new();
    for candidate in per_line.into_iter().flatten() {
        store.add(candidate);
    }
    log_totals(lines.len(), &store);
    store
}
