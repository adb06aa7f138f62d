use crate::config::ScoringScheme;
use crate::types::AlignedPair;

const TB_DIAG: u8 = 0;
const TB_LEFT: u8 = 1;
const TB_UP: u8 = 2;

/// Global Needleman-Wunsch alignment with a linear gap penalty.
///
/// Rows walk `a`, columns walk `b`. "Left" consumes a character of `b`
/// (filler written on side A), "up" consumes a character of `a` (filler on
/// side B). When predecessors tie the diagonal wins, then left, then up; the
/// emitted alignment depends on that order.
pub fn needleman_wunsch(
    a: &[char],
    b: &[char],
    filler: char,
    scoring: ScoringScheme,
) -> AlignedPair {
    if a.is_empty() && b.is_empty() {
        return AlignedPair::default();
    }

    let rows = a.len() + 1;
    let cols = b.len() + 1;
    let gap = scoring.gap_score;
    let mut scores = vec![0i32; rows * cols];
    let mut trace = vec![TB_DIAG; rows * cols];

    for j in 1..cols {
        scores[j] = gap * j as i32;
        trace[j] = TB_LEFT;
    }
    for i in 1..rows {
        scores[i * cols] = gap * i as i32;
        trace[i * cols] = TB_UP;
    }

    for i in 1..rows {
        let row = i * cols;
        let prev_row = row - cols;
        let ca = a[i - 1];
        for j in 1..cols {
            let diag = scores[prev_row + j - 1] + scoring.substitution(ca, b[j - 1]);
            let left = scores[row + j - 1] + gap;
            let up = scores[prev_row + j] + gap;
            let (best, step) = best_predecessor(diag, left, up);
            scores[row + j] = best;
            trace[row + j] = step;
        }
    }

    let score = scores[rows * cols - 1];
    let mut out_a = Vec::with_capacity(a.len() + b.len());
    let mut out_b = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (a.len(), b.len());
    while i > 0 || j > 0 {
        match trace[i * cols + j] {
            TB_DIAG => {
                debug_assert!(i >= 1 && j >= 1);
                out_a.push(a[i - 1]);
                out_b.push(b[j - 1]);
                i -= 1;
                j -= 1;
            }
            TB_LEFT => {
                debug_assert!(j >= 1);
                out_a.push(filler);
                out_b.push(b[j - 1]);
                j -= 1;
            }
            _ => {
                debug_assert!(i >= 1);
                out_a.push(a[i - 1]);
                out_b.push(filler);
                i -= 1;
            }
        }
    }
    out_a.reverse();
    out_b.reverse();

    AlignedPair {
        a: out_a,
        b: out_b,
        score,
    }
}

/// Final grid score only, computed over two rolling rows.
///
/// Equal to `needleman_wunsch(..).score`; used where the aligned sequences
/// are thrown away.
pub fn needleman_wunsch_score(a: &[char], b: &[char], scoring: ScoringScheme) -> i32 {
    let gap = scoring.gap_score;
    let cols = b.len() + 1;
    let mut prev: Vec<i32> = (0..cols).map(|j| gap * j as i32).collect();
    let mut curr = vec![0i32; cols];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = gap * (i as i32 + 1);
        for j in 1..cols {
            let diag = prev[j - 1] + scoring.substitution(ca, b[j - 1]);
            let left = curr[j - 1] + gap;
            let up = prev[j] + gap;
            curr[j] = best_predecessor(diag, left, up).0;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[cols - 1]
}

#[inline(always)]
fn best_predecessor(diag: i32, left: i32, up: i32) -> (i32, u8) {
    let mut best = diag;
    let mut step = TB_DIAG;
    if left > best {
        best = left;
        step = TB_LEFT;
    }
    if up > best {
        best = up;
        step = TB_UP;
    }
    (best, step)
}
