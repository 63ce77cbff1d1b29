use super::error::Span;

/// An immutable view of the input plus a byte position.
///
/// `Cursor` is `Copy`: every scanning step takes a cursor by value and
/// hands back a new one, so a failed step never disturbs its caller's
/// position. `pos` is always on a UTF-8 char boundary.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub(crate) fn pos(self) -> usize {
        self.pos
    }

    /// The lookahead character, or `None` at end of input.
    pub(crate) fn peek(self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Step past the lookahead character. No-op at end of input.
    pub(crate) fn bump(self) -> Self {
        match self.peek() {
            Some(ch) => Self {
                input: self.input,
                pos: self.pos + ch.len_utf8(),
            },
            None => self,
        }
    }

    /// Step past `ch` if it is the lookahead character.
    pub(crate) fn accept(self, ch: char) -> Option<Self> {
        (self.peek() == Some(ch)).then(|| self.bump())
    }

    /// Consume characters while `pred` holds, returning the consumed slice.
    pub(crate) fn take_while(self, pred: impl Fn(char) -> bool) -> (&'a str, Self) {
        let rest = &self.input[self.pos..];
        let len = rest
            .char_indices()
            .find(|&(_, ch)| !pred(ch))
            .map_or(rest.len(), |(i, _)| i);
        (
            &rest[..len],
            Self {
                input: self.input,
                pos: self.pos + len,
            },
        )
    }

    /// Span covering the lookahead character (zero-width at end of input).
    pub(crate) fn span_here(self) -> Span {
        Span::new(self.pos, self.pos + self.peek().map_or(0, char::len_utf8))
    }

    /// Span from `start` up to this cursor's position.
    pub(crate) fn span_from(self, start: usize) -> Span {
        Span::new(start, self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bump_and_accept_advance_by_whole_chars() {
        let cur = Cursor::new("é;");
        assert_eq!(cur.peek(), Some('é'));
        let cur = cur.bump();
        assert_eq!(cur.pos(), 2);
        assert!(cur.accept('x').is_none());
        let cur = cur.accept(';').expect("separator");
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.bump().pos(), cur.pos());
    }

    #[test]
    fn take_while_leaves_original_untouched() {
        let start = Cursor::new("abc=1");
        let (taken, next) = start.take_while(|c| c != '=');
        assert_eq!(taken, "abc");
        assert_eq!(next.peek(), Some('='));
        assert_eq!(start.pos(), 0);
    }

    #[test]
    fn spans_cover_multibyte_lookahead() {
        let cur = Cursor::new("ü");
        assert_eq!(cur.span_here(), Span::new(0, 2));
        assert_eq!(cur.bump().span_here(), Span::empty(2));
        assert_eq!(cur.bump().span_from(0), Span::new(0, 2));
    }
}
