use crate::types::AlignedPair;

/// A position carries no content on this side: whitespace or the gap filler.
#[inline(always)]
fn is_separator(c: char, filler: char) -> bool {
    c == filler || c.is_whitespace()
}

/// Split an aligned pair into parallel word-level fields.
///
/// A breakpoint is a position where both sides are separators. The breakpoint
/// character closes the current field on each side, and the trailing buffers
/// are always flushed, even when empty, so both lists keep the same length.
pub fn segment_fields(pair: &AlignedPair, filler: char) -> (Vec<String>, Vec<String>) {
    debug_assert_eq!(pair.a.len(), pair.b.len(), "aligned pair length mismatch");

    let mut fields_a = Vec::new();
    let mut fields_b = Vec::new();
    let mut cur_a = String::new();
    let mut cur_b = String::new();

    for (&ca, &cb) in pair.a.iter().zip(pair.b.iter()) {
        cur_a.push(ca);
        cur_b.push(cb);
        if is_separator(ca, filler) && is_separator(cb, filler) {
            fields_a.push(std::mem::take(&mut cur_a));
            fields_b.push(std::mem::take(&mut cur_b));
        }
    }
    fields_a.push(cur_a);
    fields_b.push(cur_b);

    // Leading whitespace on the first field is an alignment seed artifact.
    for fields in [&mut fields_a, &mut fields_b] {
        if let Some(first) = fields.first_mut() {
            let trimmed = first.trim_start();
            if trimmed.len() != first.len() {
                *first = trimmed.to_string();
            }
        }
    }

    (fields_a, fields_b)
}
