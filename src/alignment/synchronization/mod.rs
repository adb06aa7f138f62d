//! Reconciles independently segmented base/witness alignments into one
//! shared grouping over the base text.
//!
//! Every witness was aligned against the same base, but each alignment picks
//! its own breakpoints, so the base-side field lists differ in count and
//! boundaries. The synchronizer streams over all of them at once and closes a
//! group whenever every witness has accumulated exactly the same base text.
//!
//! Witness 0 is the reference sequence: it alone is extended when the
//! accumulators disagree, and every other witness follows it forward without
//! ever taking a field that would carry it past witness 0. Group boundaries
//! end up at exactly the base offsets where every witness has a field
//! boundary; zero-length base fields (pure insertions) join the group that
//! follows them, or the last group when nothing follows.

use serde::Serialize;

use crate::error::SyncFailure;
use crate::types::AlignmentResult;

mod cursor;

use cursor::WitnessCursor;

/// Parallel index groups, addressed `[witness][group]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Synchronization {
    groups: Vec<Vec<Vec<usize>>>,
}

impl Synchronization {
    pub fn witness_count(&self) -> usize {
        self.groups.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.first().map_or(0, Vec::len)
    }

    /// All groups of one witness, in base order.
    pub fn witness_groups(&self, witness: usize) -> &[Vec<usize>] {
        self.groups.get(witness).map_or(&[], Vec::as_slice)
    }

    /// Field indices of `witness` inside `group`.
    pub fn indices(&self, witness: usize, group: usize) -> &[usize] {
        self.groups
            .get(witness)
            .and_then(|g| g.get(group))
            .map_or(&[], Vec::as_slice)
    }
}

#[derive(Debug)]
enum SyncState {
    /// Witness 0 takes its next field.
    Accumulating,
    /// Witness `k` follows witness 0; `k == n` evaluates the tentative group.
    Matching(usize),
    GroupClosed,
    Failed(SyncFailure),
    Done,
}

pub fn synchronize_alignments(
    alignments: &[AlignmentResult],
) -> Result<Synchronization, SyncFailure> {
    let sources: Vec<&[String]> = alignments.iter().map(|a| a.source.as_slice()).collect();
    synchronize(&sources)
}

/// Group the base-side fields of every witness so that each group spans the
/// same base text in all of them.
pub fn synchronize(sources: &[&[String]]) -> Result<Synchronization, SyncFailure> {
    if sources.is_empty() {
        return Ok(Synchronization::default());
    }
    check_common_base_text(sources)?;
    SyncMachine::new(sources).run()
}

fn check_common_base_text(sources: &[&[String]]) -> Result<(), SyncFailure> {
    let reference: String = sources[0].concat();
    for (witness, fields) in sources.iter().enumerate().skip(1) {
        let candidate: String = fields.concat();
        if candidate == reference {
            continue;
        }
        let offset = reference
            .chars()
            .zip(candidate.chars())
            .take_while(|(a, b)| a == b)
            .count();
        return Err(SyncFailure::InconsistentBaseText {
            witness,
            offset,
            expected_len: reference.chars().count(),
            actual_len: candidate.chars().count(),
        });
    }
    Ok(())
}

pub(super) struct SyncMachine<'a> {
    witnesses: Vec<WitnessCursor<'a>>,
    groups: Vec<Vec<Vec<usize>>>,
    unmatched: bool,
}

impl<'a> SyncMachine<'a> {
    pub(super) fn new(sources: &[&'a [String]]) -> Self {
        Self {
            witnesses: sources.iter().map(|f| WitnessCursor::new(f)).collect(),
            groups: vec![Vec::new(); sources.len()],
            unmatched: false,
        }
    }

    pub(super) fn run(mut self) -> Result<Synchronization, SyncFailure> {
        let mut state = SyncState::Accumulating;
        loop {
            state = match state {
                SyncState::Accumulating => self.accumulate(),
                SyncState::Matching(k) => self.follow(k),
                SyncState::GroupClosed => self.close_group(),
                SyncState::Failed(failure) => {
                    tracing::warn!(%failure, "synchronization: failed");
                    return Err(failure);
                }
                SyncState::Done => {
                    tracing::debug!(
                        witnesses = self.groups.len(),
                        groups = self.groups.first().map_or(0, Vec::len),
                        "synchronization: done"
                    );
                    return Ok(Synchronization {
                        groups: self.groups,
                    });
                }
            };
        }
    }

    fn accumulate(&mut self) -> SyncState {
        if self.witnesses[0].is_exhausted() {
            return self.finish();
        }
        self.unmatched = false;
        self.witnesses[0].advance();
        SyncState::Matching(1)
    }

    fn follow(&mut self, k: usize) -> SyncState {
        if k >= self.witnesses.len() {
            return self.evaluate();
        }
        let (lead, followers) = self.witnesses.split_at_mut(1);
        let lead = &lead[0];
        let follower = &mut followers[k - 1];
        let target_len = lead.acc_len();

        follower.advance_within(target_len);
        if follower.acc_len() < target_len {
            // Next field would overshoot (or the witness ran out): let
            // witness 0 extend before retrying.
            self.unmatched = true;
            return SyncState::Matching(k + 1);
        }
        if follower.accumulator() != lead.accumulator() {
            return SyncState::Failed(SyncFailure::SynchronizationExhausted {
                witness: k,
                field: follower.field_index(),
                offset: follower.offset(),
            });
        }
        SyncState::Matching(k + 1)
    }

    fn evaluate(&self) -> SyncState {
        if !self.unmatched && self.witnesses[0].acc_len() > 0 {
            SyncState::GroupClosed
        } else {
            SyncState::Accumulating
        }
    }

    fn close_group(&mut self) -> SyncState {
        for (witness, cursor) in self.witnesses.iter_mut().enumerate() {
            self.groups[witness].push(cursor.close());
        }
        tracing::trace!(
            group = self.groups[0].len() - 1,
            offset = self.witnesses[0].offset(),
            "synchronization: group closed"
        );
        SyncState::Accumulating
    }

    /// Witness 0 is exhausted: absorb zero-length leftovers and stop.
    fn finish(&mut self) -> SyncState {
        if self.witnesses[0].acc_len() > 0 {
            return SyncState::Failed(self.furthest_disagreement());
        }
        for (witness, cursor) in self.witnesses.iter_mut().enumerate() {
            let field = cursor.field_index();
            let offset = cursor.offset();
            if cursor.drain_remaining() > 0 {
                return SyncState::Failed(SyncFailure::SynchronizationExhausted {
                    witness,
                    field,
                    offset,
                });
            }
        }

        let tails: Vec<Vec<usize>> = self.witnesses.iter_mut().map(|c| c.close()).collect();
        if tails.iter().all(Vec::is_empty) {
            return SyncState::Done;
        }
        let has_groups = self.groups.first().is_some_and(|g| !g.is_empty());
        for (witness, tail) in tails.into_iter().enumerate() {
            if has_groups {
                if let Some(last) = self.groups[witness].last_mut() {
                    last.extend(tail);
                }
            } else {
                self.groups[witness].push(tail);
            }
        }
        SyncState::Done
    }

    fn furthest_disagreement(&self) -> SyncFailure {
        let lead_len = self.witnesses[0].acc_len();
        let (witness, cursor) = self
            .witnesses
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, c)| c.acc_len() != lead_len)
            .unwrap_or((0, &self.witnesses[0]));
        SyncFailure::SynchronizationExhausted {
            witness,
            field: cursor.field_index(),
            offset: cursor.offset(),
        }
    }
}
