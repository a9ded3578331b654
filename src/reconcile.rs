//! The conversion reconciler: aligns lazily-converging romaji conversion
//! against the active target and classifies each target character.
//!
//! Everything here is a pure function of (target, raw buffer, flags); the
//! session re-runs it from scratch on every input event and applies the
//! score/advancement effects itself.

use crate::romaji::to_hiragana;

/// How many raw characters the strict clamp tolerates beyond the target
/// length, sized for the longest in-flight digraph lookahead.
pub const PENDING_TOLERANCE: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
    /// Correctness cannot be determined yet: either conversion has not
    /// reached this position, or the tail of the raw buffer looks like an
    /// unresolved multi-key sequence.
    Pending,
}

/// Per-character classification aligned to the target, plus completion.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchResult {
    pub outcomes: Vec<Outcome>,
    pub complete: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Reconciliation {
    pub result: MatchResult,
    pub converted: String,
    /// Set when the strict clamp truncated the raw buffer. The host must
    /// replace its input buffer with this value.
    pub clamped_raw: Option<String>,
}

/// Reconcile the raw buffer against the target reading.
///
/// The pending signal is the length heuristic from the original game: the
/// raw buffer is longer than its conversion whenever a multi-key sequence
/// has collapsed earlier in the buffer, so a trailing mismatch is treated as
/// in-flight rather than wrong. The heuristic also spares shrink-free typos;
/// callers depend on that exact behavior.
pub fn reconcile(target: &str, raw: &str, strict: bool, tolerance: usize) -> Reconciliation {
    let converted = to_hiragana(raw);
    let typed: Vec<char> = converted.chars().collect();
    let raw_len = raw.chars().count();
    let pending = raw_len > typed.len();

    let outcomes = target
        .chars()
        .enumerate()
        .map(|(idx, ch)| match typed.get(idx) {
            // absence is pending by definition, never an error
            None => Outcome::Pending,
            Some(&t) if t == ch => Outcome::Correct,
            // grace for the in-flight tail of a digraph
            Some(_) if pending && idx + 1 == typed.len() => Outcome::Pending,
            Some(_) => Outcome::Incorrect,
        })
        .collect();

    let complete = !converted.is_empty() && converted == target;

    if strict && !complete {
        let allowed = target.chars().count() + tolerance;
        if !pending && raw_len > allowed {
            // runaway overtyping: truncate and re-run the whole
            // reconciliation on the shortened buffer
            let truncated: String = raw.chars().take(allowed).collect();
            let mut redone = reconcile(target, &truncated, strict, tolerance);
            redone.clamped_raw = Some(truncated);
            return redone;
        }
    }

    Reconciliation {
        result: MatchResult { outcomes, complete },
        converted,
        clamped_raw: None,
    }
}
