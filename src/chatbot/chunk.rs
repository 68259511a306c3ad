//! Splitting long answers into messages that fit the Telegram limit.

/// Per-message budget in UTF-16 code units, below Telegram's 4096 limit.
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 4000;

/// Split `text` into segments of at most `max_len` UTF-16 code units.
///
/// Telegram measures message length in UTF-16, so a character outside the
/// BMP (most emoji) counts as two.
///
/// Text that already fits is returned unchanged as a single segment.
/// Otherwise sentences (split on `". "`) are packed greedily; a sentence
/// that alone exceeds the budget is packed word by word, and a word that
/// exceeds it is cut between chars. Only whitespace at split points is lost.
pub fn chunk(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    if text_len(text) <= max_len {
        return vec![text.to_string()];
    }

    let mut packer = Packer::new(max_len);
    let sentences: Vec<&str> = text.split(". ").collect();
    let last = sentences.len() - 1;

    for (i, sentence) in sentences.into_iter().enumerate() {
        let unit = if i < last { format!("{sentence}.") } else { sentence.to_string() };
        if text_len(&unit) <= max_len {
            packer.push(&unit);
        } else {
            for word in unit.split(' ').filter(|w| !w.is_empty()) {
                if text_len(word) <= max_len {
                    packer.push(word);
                } else {
                    for piece in split_chars(word, max_len) {
                        packer.push(&piece);
                    }
                }
            }
        }
    }

    packer.finish()
}

fn text_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Cut a word into pieces of at most `max_len` UTF-16 units, never inside a
/// surrogate pair. A lone char wider than the budget becomes its own piece.
fn split_chars(word: &str, max_len: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for c in word.chars() {
        let width = c.len_utf16();
        if current_len + width > max_len && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push(c);
        current_len += width;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Greedy accumulator joining pieces with a single space.
struct Packer {
    max_len: usize,
    segments: Vec<String>,
    current: String,
    current_len: usize,
}

impl Packer {
    fn new(max_len: usize) -> Self {
        Self {
            max_len,
            segments: Vec::new(),
            current: String::new(),
            current_len: 0,
        }
    }

    /// Append a piece that is itself within budget.
    fn push(&mut self, piece: &str) {
        let piece_len = text_len(piece);
        let needed = if self.current.is_empty() { piece_len } else { self.current_len + 1 + piece_len };

        if needed > self.max_len {
            self.flush();
        }
        if !self.current.is_empty() {
            self.current.push(' ');
            self.current_len += 1;
        }
        self.current.push_str(piece);
        self.current_len += piece_len;
    }

    fn flush(&mut self) {
        let segment = self.current.trim();
        if !segment.is_empty() {
            self.segments.push(segment.to_string());
        }
        self.current.clear();
        self.current_len = 0;
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.segments
    }
}
