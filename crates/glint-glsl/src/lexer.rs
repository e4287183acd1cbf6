// ── Token ─────────────────────────────────────────────────────────────────

/// A whitespace-delimited word of shader source.
///
/// The lexer does not understand GLSL punctuation: `vec2 uv[4];` yields the
/// words `vec2` and `uv[4];`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'s> {
    pub text: &'s str,
    /// 1-based source line of the first character.
    pub line: usize,
}

impl<'s> Word<'s> {
    /// True when this word starts the body of `main`.
    ///
    /// Matches a bare `main` as well as `main(` / `main()` glued to the
    /// parameter list, which is how most sources spell it.
    pub fn is_main(&self) -> bool {
        self.text == "main" || self.text.starts_with("main(")
    }
}

// ── Lexer ─────────────────────────────────────────────────────────────────

pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    line: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0, line: 1 }
    }

    /// Collects words up to (not including) the first `main` word.
    pub fn words_before_main(self) -> Vec<Word<'s>> {
        self.take_while(|w| !w.is_main()).collect()
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.src[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }
}

impl<'s> Iterator for Lexer<'s> {
    type Item = Word<'s>;

    fn next(&mut self) -> Option<Word<'s>> {
        self.skip_whitespace();
        let start = self.pos;
        let line = self.line;
        while matches!(self.peek(), Some(c) if !c.is_whitespace()) {
            self.advance();
        }
        if self.pos == start {
            return None;
        }
        Some(Word { text: &self.src[start..self.pos], line })
    }
}
