// Sonnet assembly: pick seven rhyme pairs from a candidate store and lay
// them out as ABAB CDCD EFEF GG.
//
// Inputs are a read-only `CandidateStore`, the `PairRule` deciding which
// two candidates of a bucket may rhyme together, and a caller-owned
// `SeededRng`. The store is never modified; the same store, rule and seed
// always give the same sonnet.
//
// Algorithm:
// 1. Collect every key whose bucket holds at least two candidates and
//    shuffle them.
// 2. Walk the shuffled keys. For each, shuffle its bucket and take the first
//    two candidates that pass the pair rule and conflict with nothing
//    already chosen. The first six keys that yield a pair fill roles A-F;
//    the seventh fills the couplet G.
// 3. If fewer than six keys yielded pairs, fail. If no seventh distinct key
//    did, retry the six quatrain keys for a second, disjoint pair and use
//    the first that works for G. Otherwise fail.
//
// "Conflict" is `Candidate::conflicts_with`: overlapping source spans or
// identical wording. Nothing checks that the chosen lines make sense
// together.

use std::fmt;

use pentameter_prng::SeededRng;
use tracing::{debug, warn};

use crate::candidate::Candidate;
use crate::error::AssemblyError;
use crate::pairing::PairRule;
use crate::rhyme::RhymeKey;
use crate::store::CandidateStore;

/// Rhyme pairs in a sonnet (three quatrains of two, one couplet).
pub const RHYME_PAIRS: usize = 7;

/// Lines in a sonnet.
pub const SONNET_LINES: usize = 14;

/// A rhyme role of the Shakespearean scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl Role {
    pub const ALL: [Role; RHYME_PAIRS] = [
        Role::A,
        Role::B,
        Role::C,
        Role::D,
        Role::E,
        Role::F,
        Role::G,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> char {
        (b'A' + self as u8) as char
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// ABAB CDCD EFEF GG.
pub const SCHEME: [Role; SONNET_LINES] = [
    Role::A,
    Role::B,
    Role::A,
    Role::B,
    Role::C,
    Role::D,
    Role::C,
    Role::D,
    Role::E,
    Role::F,
    Role::E,
    Role::F,
    Role::G,
    Role::G,
];

#[derive(Debug, Clone)]
pub struct SonnetLine {
    pub role: Role,
    pub candidate: Candidate,
}

/// Fourteen candidate lines in scheme order.
#[derive(Debug, Clone)]
pub struct Sonnet {
    lines: Vec<SonnetLine>,
}

impl Sonnet {
    pub fn lines(&self) -> &[SonnetLine] {
        &self.lines
    }

    /// The 14 ordered (role, text) pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (Role, &str)> {
        self.lines.iter().map(|l| (l.role, l.candidate.text()))
    }

    /// The two lines filling `role`, in order of appearance.
    pub fn role_lines(&self, role: Role) -> impl Iterator<Item = &Candidate> {
        self.lines
            .iter()
            .filter(move |l| l.role == role)
            .map(|l| &l.candidate)
    }
}

impl fmt::Display for Sonnet {
    /// One line per candidate; a blank line closes each quatrain.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 && i % 4 == 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", line.candidate.text())?;
        }
        Ok(())
    }
}

pub struct Assembler<'a> {
    store: &'a CandidateStore,
    rule: PairRule,
}

impl<'a> Assembler<'a> {
    pub fn new(store: &'a CandidateStore, rule: PairRule) -> Self {
        Assembler { store, rule }
    }

    pub fn assemble(&self, rng: &mut SeededRng) -> Result<Sonnet, AssemblyError> {
        let mut keys: Vec<&RhymeKey> = self
            .store
            .buckets_of_size(2)
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        rng.shuffle(&mut keys);

        let mut chosen: Vec<&Candidate> = Vec::with_capacity(SONNET_LINES);
        let mut pairs: Vec<(&RhymeKey, [&Candidate; 2])> = Vec::with_capacity(RHYME_PAIRS);

        for &key in &keys {
            if pairs.len() == RHYME_PAIRS {
                break;
            }
            if let Some(pair) = self.pick_pair(key, &chosen, rng) {
                debug!(role = %Role::ALL[pairs.len()], %key, "rhyme pair chosen");
                chosen.extend(pair);
                pairs.push((key, pair));
            }
        }

        if pairs.len() < RHYME_PAIRS - 1 {
            return Err(AssemblyError::InsufficientMaterial {
                filled: pairs.len(),
                needed: RHYME_PAIRS,
            });
        }

        if pairs.len() < RHYME_PAIRS {
            let reuse = pairs
                .iter()
                .map(|&(key, _)| key)
                .find_map(|key| self.pick_pair(key, &chosen, rng).map(|pair| (key, pair)));
            let Some((key, pair)) = reuse else {
                return Err(AssemblyError::InsufficientMaterial {
                    filled: pairs.len(),
                    needed: RHYME_PAIRS,
                });
            };
            warn!(%key, "no seventh rhyme sound; couplet reuses a quatrain rhyme");
            pairs.push((key, pair));
        }

        let lines = SCHEME
            .iter()
            .enumerate()
            .map(|(i, &role)| {
                // First occurrence of a role takes the pair's first line.
                let second = SCHEME[..i].contains(&role);
                SonnetLine {
                    role,
                    candidate: pairs[role.index()].1[usize::from(second)].clone(),
                }
            })
            .collect();
        Ok(Sonnet { lines })
    }

    /// Two candidates of `key`'s bucket that may rhyme together and clash
    /// with nothing in `chosen`.
    fn pick_pair(
        &self,
        key: &RhymeKey,
        chosen: &[&Candidate],
        rng: &mut SeededRng,
    ) -> Option<[&'a Candidate; 2]> {
        let mut pool: Vec<&'a Candidate> = self
            .store
            .bucket(key)
            .iter()
            .filter(|c| !chosen.iter().any(|u| u.conflicts_with(c)))
            .collect();
        rng.shuffle(&mut pool);

        for (i, &first) in pool.iter().enumerate() {
            for &second in &pool[i + 1..] {
                if !first.conflicts_with(second) && self.rule.can_pair(first, second) {
                    return Some([first, second]);
                }
            }
        }
        None
    }
}
