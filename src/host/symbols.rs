//! Symbol table of the simulated host

/// How a symbol is rendered when it appears inside a word or a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InText {
    /// Left in place and read by the synthesizer as-is
    Keep,
    /// Replaced by a space
    Drop,
    /// Replaced by its spoken name
    Name,
}

#[derive(Debug, Clone, Copy)]
pub struct Symbol {
    pub ch: char,
    /// Name spoken for the symbol on its own or inside a word
    pub name: &'static str,
    /// Name spoken when the symbol is read as part of a whole line
    pub line_name: Option<&'static str>,
    pub in_text: InText,
}

impl Symbol {
    const fn new(ch: char, name: &'static str, in_text: InText) -> Self {
        Self {
            ch,
            name,
            line_name: None,
            in_text,
        }
    }

    const fn glyph(ch: char, name: &'static str, line_name: &'static str) -> Self {
        Self {
            ch,
            name,
            line_name: Some(line_name),
            in_text: InText::Name,
        }
    }

    pub fn line_name(&self) -> &'static str {
        self.line_name.unwrap_or(self.name)
    }
}

const SYMBOLS: &[Symbol] = &[
    Symbol::new('(', "left paren", InText::Keep),
    Symbol::new(')', "right paren", InText::Keep),
    Symbol::new('[', "left bracket", InText::Keep),
    Symbol::new(']', "right bracket", InText::Keep),
    Symbol::new('{', "left brace", InText::Keep),
    Symbol::new('}', "right brace", InText::Keep),
    Symbol::new(',', "comma", InText::Keep),
    Symbol::new('.', "dot", InText::Keep),
    Symbol::new(':', "colon", InText::Keep),
    Symbol::new(';', "semi", InText::Keep),
    Symbol::new('!', "bang", InText::Keep),
    Symbol::new('?', "question", InText::Keep),
    Symbol::new('\'', "tick", InText::Keep),
    Symbol::new('-', "dash", InText::Keep),
    Symbol::new('"', "quote", InText::Drop),
    Symbol::new('*', "star", InText::Drop),
    Symbol::new('_', "line", InText::Drop),
    Symbol::new('#', "number", InText::Name),
    Symbol::new('@', "at", InText::Name),
    Symbol::new('&', "and", InText::Name),
    Symbol::new('%', "percent", InText::Name),
    Symbol::glyph('➔', "right pointing arrow", "right-pointing arrow"),
    Symbol::glyph('👕', "t shirt", "t-shirt"),
];

/// Look up a symbol by character
pub fn lookup(ch: char) -> Option<&'static Symbol> {
    SYMBOLS.iter().find(|s| s.ch == ch)
}

/// Name spoken when the caret lands on a single character
pub fn character_name(ch: char) -> String {
    match ch {
        ' ' => "space".to_string(),
        '\t' => "tab".to_string(),
        '\n' => "carriage return".to_string(),
        _ => match lookup(ch) {
            Some(symbol) => symbol.name.to_string(),
            None => ch.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_names() {
        assert_eq!(character_name('S'), "S");
        assert_eq!(character_name(' '), "space");
        assert_eq!(character_name('('), "left paren");
        assert_eq!(character_name(','), "comma");
        assert_eq!(character_name('➔'), "right pointing arrow");
        assert_eq!(character_name('👕'), "t shirt");
    }

    #[test]
    fn test_glyph_line_names() {
        assert_eq!(lookup('➔').unwrap().line_name(), "right-pointing arrow");
        assert_eq!(lookup('(').unwrap().line_name(), "left paren");
    }

    #[test]
    fn test_symbols_are_unique() {
        for (i, a) in SYMBOLS.iter().enumerate() {
            assert!(
                SYMBOLS[i + 1..].iter().all(|b| b.ch != a.ch),
                "duplicate symbol {:?}",
                a.ch
            );
        }
    }
}
