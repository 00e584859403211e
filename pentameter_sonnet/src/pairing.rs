// Pair rule: may two lines from one rhyme bucket close a rhyme together?
//
// Equal rhyme keys are necessary but loose. The rule below tightens them,
// after Ghazvininejad et al. (2016), §5.2:
//
// 1. Lines ending in the same word never pair.
// 2. Identical rhyme tails (exact phones from the stressed vowel on) pair.
// 3. Otherwise, with `ER` read as `UH R`, split each tail into stressed
//    vowel `v`, interior `x` and final unstressed vowel `w` (absent for a
//    masculine ending, in which case `x` is the coda). `v` and `w` must
//    match exactly. Single-consonant interiors pair if similar; longer ones
//    need the same vowel count and must agree exactly at one end and be
//    similar at the other.
//
// "Similar" means a Hirjee & Brown score above the configured limit (see
// `pentameter_phonetics::similarity`). With no limit configured, step 3 is
// skipped and any two lines with distinct final words pair.

use pentameter_phonetics::similarity::{DEFAULT_SIMILARITY_LIMIT, are_similar};
use pentameter_phonetics::{Phone, Phoneme, Stress};

use crate::candidate::Candidate;
use crate::rhyme::rhyme_tail;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairRule {
    /// Refuse pairs whose last words are the same word.
    pub distinct_final_words: bool,
    /// Similarity limit for the slant check; `None` disables it.
    pub similarity_limit: Option<f64>,
}

impl Default for PairRule {
    fn default() -> Self {
        PairRule {
            distinct_final_words: true,
            similarity_limit: Some(DEFAULT_SIMILARITY_LIMIT),
        }
    }
}

impl PairRule {
    /// Accept every pair; bucket membership alone decides rhyme.
    pub fn permissive() -> Self {
        PairRule {
            distinct_final_words: false,
            similarity_limit: None,
        }
    }

    pub fn can_pair(&self, a: &Candidate, b: &Candidate) -> bool {
        if self.distinct_final_words && a.final_word() == b.final_word() {
            return false;
        }
        let Some(limit) = self.similarity_limit else {
            return true;
        };
        let (ta, tb) = (rhyme_tail(a.phones()), rhyme_tail(b.phones()));
        ta == tb || slant_match(&expand_er(ta), &expand_er(tb), limit)
    }
}

fn expand_er(tail: &[Phone]) -> Vec<Phone> {
    let mut out = Vec::with_capacity(tail.len() + 2);
    for &phone in tail {
        match (phone.phoneme(), phone.stress()) {
            (Phoneme::Er, Some(stress)) => {
                out.extend(Phone::vowel(Phoneme::Uh, stress));
                out.extend(Phone::consonant(Phoneme::R));
            }
            _ => out.push(phone),
        }
    }
    out
}

/// Interior and final unstressed vowel of a tail without its head vowel.
fn split_interior(rest: &[Phone]) -> (&[Phone], Option<Phoneme>) {
    match rest
        .iter()
        .rposition(|p| p.stress() == Some(Stress::Unstressed))
    {
        Some(w) => (&rest[..w], Some(rest[w].phoneme())),
        None => (rest, None),
    }
}

fn slant_match(a: &[Phone], b: &[Phone], limit: f64) -> bool {
    let (Some(va), Some(vb)) = (a.first(), b.first()) else {
        return false;
    };
    if va.phoneme() != vb.phoneme() {
        return false;
    }
    let (xa, wa) = split_interior(&a[1..]);
    let (xb, wb) = split_interior(&b[1..]);
    if wa != wb {
        return false;
    }

    let (Some(fa), Some(la), Some(fb), Some(lb)) = (xa.first(), xa.last(), xb.first(), xb.last())
    else {
        return xa.is_empty() && xb.is_empty();
    };
    if xa.len() == 1 && xb.len() == 1 {
        return are_similar(fa.phoneme(), fb.phoneme(), limit);
    }
    let vowels = |x: &[Phone]| x.iter().filter(|p| p.is_vowel()).count();
    if vowels(xa) != vowels(xb) {
        return false;
    }
    (fa == fb && are_similar(la.phoneme(), lb.phoneme(), limit))
        || (la == lb && are_similar(fa.phoneme(), fb.phoneme(), limit))
}
