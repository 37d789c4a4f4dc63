//! Sentence boundary heuristics used as the chunk sizing metric
//!
//! Chunks are sized in sentence units rather than characters: counting
//! punctuation-delimited segments keeps chunks coherent where character
//! budgets would cut mid-clause. The same boundary scan backs both the
//! counting function and the lossless segmentation used by the splitter.

/// Sentence-terminal punctuation: Latin and CJK full stops, question and
/// exclamation marks, ellipsis. A run of these counts as one terminator.
fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…' | '。' | '．' | '！' | '？')
}

/// Closing quotation marks that may extend a sentence past its terminal
fn is_closing_quote(c: char) -> bool {
    matches!(c, '”' | '’')
}

/// Characters after a closing quote that keep the quote mid-sentence
fn quote_stays_open(c: char) -> bool {
    matches!(c, '，' | ',') || is_terminal(c)
}

/// Byte offsets immediately after each sentence boundary in `text`
fn boundaries(text: &str) -> Vec<usize> {
    let mut out = Vec::new();
    let mut iter = text.char_indices().peekable();

    while let Some((i, c)) = iter.next() {
        if !is_terminal(c) {
            continue;
        }
        // absorb the whole terminal run so "..." and "……" end one sentence
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = iter.peek() {
            if is_terminal(next) {
                end = j + next.len_utf8();
                iter.next();
            } else {
                break;
            }
        }
        match iter.peek().copied() {
            Some((j, quote)) if is_closing_quote(quote) => {
                // the quote ends the sentence only when a terminal precedes it
                // and nothing binds it to the next clause
                let quote_end = j + quote.len_utf8();
                match text[quote_end..].chars().next() {
                    Some(follower) if quote_stays_open(follower) => {}
                    _ => {
                        iter.next();
                        out.push(quote_end);
                    }
                }
            }
            _ => out.push(end),
        }
    }
    out
}

/// Split `text` into sentence units at boundary positions.
///
/// Lossless for non-blank input: concatenating the returned slices
/// reproduces `text`. Trailing whitespace after the last boundary is folded
/// into the final unit. Blank input yields no units.
pub fn split_sentence_units(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    for boundary in boundaries(text) {
        if boundary > start {
            spans.push((start, boundary));
            start = boundary;
        }
    }
    if start < text.len() {
        let tail = &text[start..];
        if tail.trim().is_empty() {
            if let Some(last) = spans.last_mut() {
                last.1 = text.len();
            }
        } else {
            spans.push((start, text.len()));
        }
    }

    spans.into_iter().map(|(s, e)| &text[s..e]).collect()
}

/// Count the sentence-like segments in `text`.
///
/// Total function, a pure size metric: it reports how many units the
/// boundary scan finds, it does not perform sentence splitting for callers.
/// Empty or whitespace-only text counts 0.
pub fn count_sentences(text: &str) -> usize {
    split_sentence_units(text).len()
}
