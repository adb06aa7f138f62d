/// Streaming position of one witness inside its base-side field list.
#[derive(Debug)]
pub(super) struct WitnessCursor<'a> {
    fields: &'a [String],
    /// Codepoint length of each field.
    lens: Vec<usize>,
    cursor: usize,
    /// Base-side text taken since the last closed group.
    accumulator: String,
    acc_len: usize,
    /// Field indices taken since the last closed group.
    pending: Vec<usize>,
    /// Codepoints consumed by closed groups.
    consumed: usize,
}

impl<'a> WitnessCursor<'a> {
    pub(super) fn new(fields: &'a [String]) -> Self {
        Self {
            fields,
            lens: fields.iter().map(|f| f.chars().count()).collect(),
            cursor: 0,
            accumulator: String::new(),
            acc_len: 0,
            pending: Vec::new(),
            consumed: 0,
        }
    }

    pub(super) fn is_exhausted(&self) -> bool {
        self.cursor >= self.fields.len()
    }

    pub(super) fn peek_len(&self) -> Option<usize> {
        self.lens.get(self.cursor).copied()
    }

    pub(super) fn advance(&mut self) {
        if let Some(field) = self.fields.get(self.cursor) {
            self.accumulator.push_str(field);
            self.acc_len += self.lens[self.cursor];
            self.pending.push(self.cursor);
            self.cursor += 1;
        }
    }

    /// Take fields while they fit within `target_len` codepoints.
    pub(super) fn advance_within(&mut self, target_len: usize) {
        while let Some(len) = self.peek_len() {
            if self.acc_len + len > target_len {
                break;
            }
            if len == 0 && self.acc_len == target_len {
                // Zero-length fields open the next group instead.
                break;
            }
            self.advance();
        }
    }

    /// Remaining fields; the caller checks they carry no base text.
    pub(super) fn drain_remaining(&mut self) -> usize {
        let mut leftover_len = 0;
        while !self.is_exhausted() {
            leftover_len += self.lens[self.cursor];
            self.advance();
        }
        leftover_len
    }

    pub(super) fn close(&mut self) -> Vec<usize> {
        self.consumed += self.acc_len;
        self.accumulator.clear();
        self.acc_len = 0;
        std::mem::take(&mut self.pending)
    }

    pub(super) fn accumulator(&self) -> &str {
        &self.accumulator
    }

    pub(super) fn acc_len(&self) -> usize {
        self.acc_len
    }

    pub(super) fn field_index(&self) -> usize {
        self.cursor
    }

    pub(super) fn offset(&self) -> usize {
        self.consumed + self.acc_len
    }
}
