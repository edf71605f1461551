//! Input normalization with exact provenance.
//!
//! Line endings are folded to `\n` and null bytes are removed from the
//! analysis stream before any segmentation, but every downstream span must
//! index the ORIGINAL text. The normalized copy therefore carries an offset
//! map back to original byte positions; when the input needed no folding the
//! map collapses to identity.

/// Normalized text plus the mapping from normalized byte offsets back to
/// original byte offsets.
#[derive(Debug)]
pub struct NormalizedText {
    pub text: String,
    /// `map[i]` = original offset of normalized byte `i`; one extra entry
    /// maps `text.len()` to the original length so half-open span ends
    /// convert directly. `None` means the mapping is identity.
    map: Option<Vec<usize>>,
}

impl NormalizedText {
    /// Fold `\r\n` and bare `\r` to `\n`; replace null bytes with spaces so
    /// they can never appear inside a token while leaving offsets intact.
    pub fn new(original: &str) -> Self {
        if !original.contains('\r') {
            // \0 -> ' ' is length-preserving, so identity mapping holds.
            if original.contains('\0') {
                return Self {
                    text: original.replace('\0', " "),
                    map: None,
                };
            }
            return Self {
                text: original.to_string(),
                map: None,
            };
        }

        let mut text = String::with_capacity(original.len());
        let mut map = Vec::with_capacity(original.len() + 1);
        let mut chars = original.char_indices().peekable();
        while let Some((i, ch)) = chars.next() {
            match ch {
                '\r' => {
                    text.push('\n');
                    map.push(i);
                    // \r\n collapses to one \n spanning both original bytes
                    if matches!(chars.peek(), Some((_, '\n'))) {
                        chars.next();
                    }
                }
                '\0' => {
                    text.push(' ');
                    map.push(i);
                }
                _ => {
                    for k in 0..ch.len_utf8() {
                        map.push(i + k);
                    }
                    text.push(ch);
                }
            }
        }
        map.push(original.len());
        Self {
            text,
            map: Some(map),
        }
    }

    /// Whether normalized offsets equal original offsets.
    pub fn is_identity(&self) -> bool {
        self.map.is_none()
    }

    /// Convert a normalized byte offset to the original byte offset.
    pub fn to_original(&self, normalized_offset: usize) -> usize {
        match &self.map {
            None => normalized_offset,
            Some(map) => map[normalized_offset],
        }
    }
}
