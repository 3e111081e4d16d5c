/// Cleans raw OCR text before it is merged and shown
pub trait Preprocessor {
    // Default: trim, CRLF line endings, drop spaces the engine puts between CJK glyphs
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        let text = normalize_line_endings(text);

        if text.is_ascii() {
            return text;
        }

        collapse_non_ascii_gaps(&text)
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

/// Every line break becomes `\r\n`
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', "\r\n")
}

/// Remove whitespace sitting between two non-ASCII characters.
///
/// Whitespace next to an ASCII character is kept, so Latin spacing survives.
/// Non-ASCII whitespace inside a run (U+3000) counts as a neighbour on either
/// side, so a run is cut from the first position preceded by a non-ASCII
/// character up to the last non-ASCII character it reaches.
pub fn collapse_non_ascii_gaps(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let non_ascii = |k: usize| chars.get(k).is_some_and(|c| !c.is_ascii());
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_whitespace() {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let mut end = i;
        while end < chars.len() && chars[end].is_whitespace() {
            end += 1;
        }

        // chars[end] is the first non-whitespace char after the run, if any
        while i < end {
            let cut_to = if i > 0 && non_ascii(i - 1) {
                (i + 1..=end).rev().find(|&k| non_ascii(k))
            } else {
                None
            };

            match cut_to {
                Some(k) => i = k,
                None => {
                    out.push(chars[i]);
                    i += 1;
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_drops_blank() {
        assert_eq!(DefaultPreprocessor.process("  \r\n \t"), "");
        assert_eq!(DefaultPreprocessor.process("  hi there \n"), "hi there");
    }

    #[test]
    fn line_endings_become_crlf() {
        assert_eq!(normalize_line_endings("a\nb\r\nc"), "a\r\nb\r\nc");
        assert_eq!(normalize_line_endings("a\r\nb"), "a\r\nb");
    }

    #[test]
    fn ascii_spacing_is_preserved() {
        assert_eq!(DefaultPreprocessor.process("Hello  world"), "Hello  world");
    }

    #[test]
    fn spaces_between_cjk_are_removed() {
        assert_eq!(DefaultPreprocessor.process("日 本 語"), "日本語");
        assert_eq!(DefaultPreprocessor.process("日本\u{3000} 語"), "日本語");
    }

    #[test]
    fn spaces_next_to_latin_survive() {
        assert_eq!(DefaultPreprocessor.process("日本 OCR テスト"), "日本 OCR テスト");
        assert_eq!(DefaultPreprocessor.process("café au lait"), "café au lait");
    }

    #[test]
    fn line_break_between_cjk_collapses() {
        assert_eq!(DefaultPreprocessor.process("一行\n二行"), "一行二行");
        assert_eq!(DefaultPreprocessor.process("line\n二行"), "line\r\n二行");
    }

    #[test]
    fn partial_run_after_non_ascii_whitespace() {
        // Only the part of the run preceded by a non-ASCII char goes
        assert_eq!(collapse_non_ascii_gaps("x\u{3000}\u{3000}字"), "x\u{3000}字");
        assert_eq!(collapse_non_ascii_gaps("字\u{3000} a"), "字\u{3000} a");
    }

    #[test]
    fn non_ascii_whitespace_ends_a_gap() {
        // U+3000 inside the run is itself the right-hand neighbour
        assert_eq!(collapse_non_ascii_gaps("字 \u{3000}a"), "字\u{3000}a");
        assert_eq!(collapse_non_ascii_gaps("字\u{3000}\u{3000}a"), "字\u{3000}a");
        assert_eq!(collapse_non_ascii_gaps("字 \u{3000} 字"), "字字");
        assert_eq!(collapse_non_ascii_gaps("a \u{3000} a"), "a \u{3000} a");
    }

    #[test]
    fn trailing_whitespace_is_kept() {
        assert_eq!(collapse_non_ascii_gaps("字 "), "字 ");
        assert_eq!(collapse_non_ascii_gaps("字\u{3000}"), "字\u{3000}");
    }
}
