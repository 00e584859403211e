// Test fixtures for end-to-end sonnet pipeline tests.
//
// Provides a small CMUdict-format dictionary, a corpus in which sixteen
// lines scan as pentameter (two per rhyme sound, eight sounds), and a
// `ScriptedPronouncer` that replays fixed annotations so tests can feed the
// scanner exact phoneme streams without a dictionary.
//
// The helpers run the same public API the `sonnet` binary runs; nothing here
// reaches into crate internals.
//
// See also: `tests/full_pipeline.rs` for the scenarios.

use std::collections::HashMap;

use pentameter_phonetics::PronouncingDictionary;
use pentameter_prng::SeededRng;
use pentameter_sonnet::{
    Assembler, AssemblyError, CandidateStore, FinderConfig, Pronouncer, RawAnnotation, Role,
    Sonnet, collect_candidates,
};

pub const FIXTURE_DICT: &str = "\
;;; Fixture pronouncing dictionary, CMUdict format.
ABOVE  AH0 B AH1 V
AGAIN  AH0 G EH1 N
AGAIN(2)  AH0 G EY1 N
ALONE  AH0 L OW1 N
AND  AH0 N D
AROUND  ER0 AW1 N D
ASHORE  AH0 SH AO1 R
AWAY  AH0 W EY1
BEFORE  B IH0 F AO1 R
BEGIN  B IH0 G IH1 N
BELOW  B IH0 L OW1
BETWEEN  B IH0 T W IY1 N
CAT  K AE1 T
COMPLETE  K AH0 M P L IY1 T
DESPITE  D IH0 S P AY1 T
FORGET  F ER0 G EH1 T
GOOD  G UH1 D
IT  IH1 T
MAT  M AE1 T
ON  AA1 N
PROFOUND  P R OW0 F AW1 N D
REGRET  R IH0 G R EH1 T
RETREAT  R IH0 T R IY1 T
SAT  S AE1 T
SERENE  S ER0 IY1 N
THE  DH AH0
TODAY  T AH0 D EY1
TONIGHT  T AH0 N AY1 T
WAS  W AA1 Z
WITHIN  W IH0 DH IH1 N
";

/// Rhyme words of the corpus, paired by rhyme sound.
pub const RHYME_PAIRS: [(&str, &str); 8] = [
    ("away", "today"),
    ("tonight", "despite"),
    ("between", "serene"),
    ("around", "profound"),
    ("before", "ashore"),
    ("complete", "retreat"),
    ("forget", "regret"),
    ("begin", "within"),
];

const FILLERS: [&str; 4] = [
    "Alone again, below, above",
    "Again, above, alone, below",
    "Below, alone, above, again",
    "Above again, below alone",
];

/// The corpus: headings, prose and a formula around the pentameter lines.
///
/// Line `3 + 2 * i` and `4 + 2 * i` end in the two words of
/// `RHYME_PAIRS[i]`.
pub fn corpus() -> Vec<String> {
    let mut lines = vec![
        "Chapter One".to_string(),
        "The cat sat on the mat and it was good.".to_string(),
        "$a + b = c$ and so on".to_string(),
    ];
    for (i, (first, second)) in RHYME_PAIRS.iter().enumerate() {
        lines.push(format!("{} {first}.", FILLERS[i % 4]));
        lines.push(format!("{} {second}!", FILLERS[(i + 1) % 4]));
    }
    lines.push("Alone again, below, above tomorrow.".to_string());
    lines
}

/// Number of corpus lines that scan.
pub const PENTAMETER_LINES: usize = 2 * RHYME_PAIRS.len();

pub fn dictionary() -> PronouncingDictionary {
    PronouncingDictionary::from_cmudict(FIXTURE_DICT).unwrap()
}

/// Scan `lines` against the fixture dictionary under `config`.
pub fn scan(lines: &[String], config: &FinderConfig) -> CandidateStore {
    collect_candidates(lines, &dictionary(), &config.keyer().unwrap(), config.prose_filter)
}

pub fn assemble(
    store: &CandidateStore,
    config: &FinderConfig,
    seed: u64,
) -> Result<Sonnet, AssemblyError> {
    Assembler::new(store, config.pair_rule()).assemble(&mut SeededRng::new(seed))
}

/// Panics unless `sonnet` has 14 lines in scheme order, each role's lines
/// share a rhyme key, and no two lines share source words or wording.
pub fn assert_well_formed(sonnet: &Sonnet) {
    let roles: Vec<Role> = sonnet.pairs().map(|(role, _)| role).collect();
    assert_eq!(roles, pentameter_sonnet::SCHEME.to_vec());
    for role in Role::ALL {
        let lines: Vec<_> = sonnet.role_lines(role).collect();
        assert_eq!(lines.len(), 2, "role {role}");
        assert_eq!(lines[0].rhyme_key(), lines[1].rhyme_key(), "role {role}");
    }
    let lines = sonnet.lines();
    for (i, a) in lines.iter().enumerate() {
        for b in &lines[i + 1..] {
            assert!(
                !a.candidate.conflicts_with(&b.candidate),
                "{:?} conflicts with {:?}",
                a.candidate.text(),
                b.candidate.text()
            );
        }
    }
}

/// A pronouncer that replays fixed annotations, keyed by line text.
/// Unknown lines get an empty annotation.
#[derive(Debug, Default)]
pub struct ScriptedPronouncer {
    script: HashMap<String, RawAnnotation>,
}

impl ScriptedPronouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script `line` as the given (word, tokens) pairs.
    pub fn with_line(mut self, line: &str, pairs: &[(&str, &str)]) -> Self {
        self.script
            .insert(line.to_string(), RawAnnotation::from_pairs(pairs));
        self
    }
}

impl Pronouncer for ScriptedPronouncer {
    fn annotate(&self, line: &str) -> RawAnnotation {
        self.script.get(line).cloned().unwrap_or_default()
    }
}
