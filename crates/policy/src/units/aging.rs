//! Line aging transforms and victim searches.
//!
//! Every function here operates on the slice of one set. Two recency signals
//! live on each line:
//!
//! - LRU ranks always form a permutation of `0..ways`; [`promote`] and
//!   [`demote`] rotate a contiguous run of ranks by one, which preserves that.
//! - RRPVs stay within `0..=max_rrpv`; [`rrip_victim`] only raises RRPVs of
//!   lines strictly below `max_rrpv` and stops as soon as one reaches it.

use tracing::trace;

use crate::common::line::CacheLine;

/// Which rule produced a victim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VictimRule {
    /// A line of the requesting CPU was already at `max_rrpv`.
    RequesterAtMax,
    /// A line of another CPU was already at `max_rrpv`.
    OtherAtMax,
    /// No line was at `max_rrpv`; lines were aged until one was.
    Aged,
    /// Largest LRU rank.
    Lru,
}

/// Moves `way` to the MRU position (rank 0).
///
/// Lines ranked above `way`'s former rank move down by one.
pub fn promote(lines: &mut [CacheLine], way: usize) {
    let former = lines[way].lru_rank();
    for (idx, line) in lines.iter_mut().enumerate() {
        if idx != way && line.lru_rank() < former {
            line.set_lru_rank(line.lru_rank() + 1);
        }
    }
    lines[way].set_lru_rank(0);
}

/// Moves `way` to the LRU position (rank `ways - 1`).
///
/// Lines ranked below `way`'s former rank move up by one.
pub fn demote(lines: &mut [CacheLine], way: usize) {
    let former = lines[way].lru_rank();
    let last = lines.len() - 1;
    for (idx, line) in lines.iter_mut().enumerate() {
        if idx != way && line.lru_rank() > former {
            line.set_lru_rank(line.lru_rank() - 1);
        }
    }
    lines[way].set_lru_rank(last);
}

/// Way holding the largest LRU rank; the lowest way wins a tie.
pub fn lru_victim(lines: &[CacheLine]) -> usize {
    let mut victim = 0;
    for (way, line) in lines.iter().enumerate().skip(1) {
        if line.lru_rank() > lines[victim].lru_rank() {
            victim = way;
        }
    }
    victim
}

/// RRIP victim search for a request from `cpu`.
///
/// Lookup order, lowest way first at each step:
/// 1. With `app_aware`, a line owned by `cpu` at `max_rrpv`.
/// 2. Any line at `max_rrpv`.
/// 3. Otherwise age the candidate lines: with `app_aware`, the lines owned by
///    `cpu` if it owns any, else every line. Aging continues until one reaches
///    `max_rrpv`, and that line is the victim.
///
/// Step 3 applies the aging passes in one shot. Each pass raises every
/// candidate by one, so after `max_rrpv - oldest` passes the candidates with
/// the largest RRPV (`oldest`) reach `max_rrpv` first, and no line passes it.
/// That bounds the search at `max_rrpv` passes. The RRPVs raised on the other
/// candidates persist as wear.
///
/// # Panics
///
/// Panics if `lines` is empty.
pub fn rrip_victim(
    lines: &mut [CacheLine],
    cpu: usize,
    max_rrpv: u8,
    app_aware: bool,
) -> (usize, VictimRule) {
    assert!(!lines.is_empty(), "victim search on an empty set");

    if app_aware {
        if let Some(way) = lines
            .iter()
            .position(|l| l.rrpv() >= max_rrpv && l.owner() == cpu)
        {
            trace!(way, cpu, "rrip victim owned by requester");
            return (way, VictimRule::RequesterAtMax);
        }
    }
    if let Some(way) = lines.iter().position(|l| l.rrpv() >= max_rrpv) {
        let rule = if lines[way].owner() == cpu {
            VictimRule::RequesterAtMax
        } else {
            VictimRule::OtherAtMax
        };
        trace!(way, cpu, ?rule, "rrip victim at max rrpv");
        return (way, rule);
    }

    let own_lines = app_aware && lines.iter().any(|l| l.owner() == cpu);
    let is_candidate = |line: &CacheLine| !own_lines || line.owner() == cpu;

    let mut victim = None;
    let mut oldest = 0;
    for (way, line) in lines.iter().enumerate() {
        if is_candidate(line) && (victim.is_none() || line.rrpv() > oldest) {
            victim = Some(way);
            oldest = line.rrpv();
        }
    }

    // No line is at max_rrpv here, so `oldest < max_rrpv` and the candidates
    // end at most at max_rrpv.
    let passes = max_rrpv - oldest;
    for line in lines.iter_mut().filter(|l| is_candidate(l)) {
        line.set_rrpv(line.rrpv() + passes);
    }

    let way = victim.unwrap_or(0);
    trace!(way, cpu, passes, own_lines, "rrip victim after aging");
    (way, VictimRule::Aged)
}
