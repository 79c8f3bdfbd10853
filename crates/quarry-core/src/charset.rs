use crate::error::{Error, Result};

const ASCII_SPANS: &[(char, char)] = &[('\t', '\n'), ('\r', '\r'), (' ', '~')];
const UNICODE_EXTRA_SPANS: &[(char, char)] = &[('\u{80}', '\u{D7FF}'), ('\u{E000}', '\u{FFFF}')];
const ALPHA_SPANS: &[(char, char)] = &[('A', 'Z'), ('a', 'z')];
const IDENT_SYMBOL_SPANS: &[(char, char)] = &[('$', '$'), ('_', '_')];
const DIGIT_SPANS: &[(char, char)] = &[('0', '9')];

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_END: u32 = 0xDFFF;

/// Alphabet of characters drawn uniformly by string generators.
///
/// Stored as inclusive code point spans so the large Unicode table is never
/// materialized. Each span contributes every code point it covers; a
/// character listed twice is twice as likely to be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    spans: Vec<(u32, u32)>,
    len: u32,
}

impl Charset {
    /// Tab, LF, CR and printable ASCII (U+0020..=U+007E).
    pub fn ascii() -> Self {
        Self::from_static(&[ASCII_SPANS])
    }

    /// The ASCII table plus U+0080..=U+D7FF and U+E000..=U+FFFF.
    pub fn unicode() -> Self {
        Self::from_static(&[ASCII_SPANS, UNICODE_EXTRA_SPANS])
    }

    /// First character of a symbol: letters, `$` and `_`.
    pub fn symbol_head() -> Self {
        Self::from_static(&[ALPHA_SPANS, IDENT_SYMBOL_SPANS])
    }

    /// Remaining characters of a symbol: letters, digits, `$` and `_`.
    pub fn symbol_tail() -> Self {
        Self::from_static(&[ALPHA_SPANS, IDENT_SYMBOL_SPANS, DIGIT_SPANS])
    }

    /// Builds a charset from every character of `chars`, in order.
    pub fn from_chars(chars: &str) -> Result<Self> {
        let spans: Vec<(char, char)> = chars.chars().map(|ch| (ch, ch)).collect();
        Self::from_spans(&spans)
    }

    /// Builds a charset from inclusive character spans.
    pub fn from_spans(spans: &[(char, char)]) -> Result<Self> {
        let mut out = Vec::with_capacity(spans.len());
        for &(start, end) in spans {
            let (start, end) = (u32::from(start), u32::from(end));
            if start > end {
                return Err(Error::InvalidCharset(format!(
                    "span start U+{start:04X} is after end U+{end:04X}"
                )));
            }
            if start < SURROGATE_START && end > SURROGATE_END {
                return Err(Error::InvalidCharset(format!(
                    "span U+{start:04X}..=U+{end:04X} covers surrogate code points"
                )));
            }
            out.push((start, end));
        }
        let charset = Self::from_code_spans(out)?;
        if charset.is_empty() {
            return Err(Error::InvalidCharset(
                "charset must include at least one character".to_string(),
            ));
        }
        Ok(charset)
    }

    /// Combines two charsets; the result draws from both alphabets.
    pub fn union(&self, other: &Charset) -> Result<Self> {
        let mut spans = self.spans.clone();
        spans.extend_from_slice(&other.spans);
        Self::from_code_spans(spans)
    }

    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, ch: char) -> bool {
        let code = u32::from(ch);
        self.spans
            .iter()
            .any(|&(start, end)| start <= code && code <= end)
    }

    /// Character at `index` when spans are laid end to end.
    pub fn nth(&self, index: u32) -> Option<char> {
        let mut remaining = index;
        for &(start, end) in &self.spans {
            let size = end - start + 1;
            if remaining < size {
                return char::from_u32(start + remaining);
            }
            remaining -= size;
        }
        None
    }

    // Built-in tables total well under u32::MAX, so the plain sum is safe here.
    fn from_static(tables: &[&[(char, char)]]) -> Self {
        let spans: Vec<(u32, u32)> = tables
            .iter()
            .flat_map(|table| table.iter())
            .map(|&(start, end)| (u32::from(start), u32::from(end)))
            .collect();
        let len = spans.iter().map(|&(start, end)| end - start + 1).sum();
        Self { spans, len }
    }

    fn from_code_spans(spans: Vec<(u32, u32)>) -> Result<Self> {
        let len = spans
            .iter()
            .try_fold(0_u32, |acc, &(start, end)| acc.checked_add(end - start + 1))
            .ok_or_else(|| {
                Error::InvalidCharset(format!(
                    "charset holds more than {} characters",
                    u32::MAX
                ))
            })?;
        Ok(Self { spans, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_table_has_printable_and_three_controls() {
        let ascii = Charset::ascii();
        assert_eq!(ascii.len(), 98);
        for ch in ['\t', '\n', '\r', ' ', 'a', '~'] {
            assert!(ascii.contains(ch), "missing {ch:?}");
        }
        for ch in ['\0', '\u{0B}', '\u{7F}', '\u{80}'] {
            assert!(!ascii.contains(ch), "unexpected {ch:?}");
        }
    }

    #[test]
    fn unicode_table_skips_surrogates() {
        let unicode = Charset::unicode();
        assert_eq!(unicode.len(), 98 + 0xD780 + 0x2000);
        assert!(unicode.contains('\u{D7FF}'));
        assert!(unicode.contains('\u{E000}'));
        assert!(unicode.contains('\u{FFFF}'));
        assert!(!unicode.contains('\u{10000}'));
        assert_eq!(unicode.nth(unicode.len() - 1), Some('\u{FFFF}'));
        assert_eq!(unicode.nth(unicode.len()), None);
    }

    #[test]
    fn symbol_tables() {
        let head = Charset::symbol_head();
        let tail = Charset::symbol_tail();
        assert_eq!(head.len(), 54);
        assert_eq!(tail.len(), 64);
        assert!(head.contains('$') && head.contains('_') && head.contains('Q'));
        assert!(!head.contains('7'));
        assert!(tail.contains('7'));
    }

    #[test]
    fn nth_walks_spans_in_order() {
        let ascii = Charset::ascii();
        assert_eq!(ascii.nth(0), Some('\t'));
        assert_eq!(ascii.nth(1), Some('\n'));
        assert_eq!(ascii.nth(2), Some('\r'));
        assert_eq!(ascii.nth(3), Some(' '));
    }

    #[test]
    fn custom_charsets_are_validated() {
        assert!(Charset::from_chars("").is_err());
        assert!(Charset::from_spans(&[('z', 'a')]).is_err());
        assert!(Charset::from_spans(&[('\u{D000}', '\u{E000}')]).is_err());
        let abc = Charset::from_chars("abc").expect("valid charset");
        assert_eq!(abc.len(), 3);
        let abcd = abc
            .union(&Charset::from_chars("d").expect("valid"))
            .expect("valid union");
        assert_eq!(abcd.len(), 4);
    }

    #[test]
    fn oversized_charsets_are_rejected() {
        let full = Charset::from_spans(&[('\0', '\u{D7FF}'), ('\u{E000}', '\u{10FFFF}')])
            .expect("valid charset");
        let mut grown = full.clone();
        let mut result = Ok(());
        for _ in 0..5_000 {
            match grown.union(&full) {
                Ok(next) => grown = next,
                Err(err) => {
                    result = Err(err);
                    break;
                }
            }
        }
        assert!(matches!(result, Err(Error::InvalidCharset(_))));

        let spans = vec![('\0', '\u{D7FF}'); 80_000];
        assert!(matches!(
            Charset::from_spans(&spans),
            Err(Error::InvalidCharset(_))
        ));
    }
}
