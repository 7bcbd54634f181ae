use std::fmt;

/// One position in a padded word: a real character or a boundary marker.
///
/// The boundary markers are their own variants, so they can never collide
/// with a character that appears in training text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// Word start marker. Fills the context before the first real character.
    Start,
    /// A real, normalized character.
    Char(char),
    /// Word end marker.
    End,
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Char(c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Start => f.write_str("<S>"),
            Symbol::Char(c) => write!(f, "{}", c),
            Symbol::End => f.write_str("</S>"),
        }
    }
}

/// The two most recently emitted symbols, used as the transition table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Context(pub Symbol, pub Symbol);

impl Context {
    /// Context at the beginning of every word.
    pub const START: Context = Context(Symbol::Start, Symbol::Start);

    /// Shift the window: drop the oldest symbol and append `next`.
    pub fn advance(self, next: Symbol) -> Context {
        Context(self.1, next)
    }
}

impl From<(char, char)> for Context {
    fn from((a, b): (char, char)) -> Self {
        Context(Symbol::Char(a), Symbol::Char(b))
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_are_not_characters() {
        assert_ne!(Symbol::Start, Symbol::Char('#'));
        assert_ne!(Symbol::End, Symbol::Char('$'));
        assert_eq!(Symbol::from('a'), Symbol::Char('a'));
        assert_eq!(Context::START.to_string(), "(<S>, <S>)");
        assert_eq!(Context::from(('c', 'a')).to_string(), "(c, a)");
    }

    #[test]
    fn context_advances_window() {
        let ctx = Context::START.advance(Symbol::Char('c'));
        assert_eq!(ctx, Context(Symbol::Start, Symbol::Char('c')));
        let ctx = ctx.advance(Symbol::Char('a'));
        assert_eq!(ctx, Context::from(('c', 'a')));
    }

    #[test]
    fn symbols_order_markers_around_characters() {
        assert!(Symbol::Start < Symbol::Char('a'));
        assert!(Symbol::Char('z') < Symbol::End);
    }
}
