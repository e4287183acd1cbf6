use crate::lexer::{Lexer, Word};

/// Which declaration keyword introduced a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Uniform,
    Attribute,
}

impl DeclKind {
    fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "uniform" => Some(DeclKind::Uniform),
            "attribute" => Some(DeclKind::Attribute),
            _ => None,
        }
    }
}

/// A single `uniform <type> <name>` / `attribute <type> <name>` match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclKind,
    pub ty: String,
    pub name: String,
    /// 1-based line of the keyword.
    pub line: usize,
}

/// Names recorded from one or more shader stages, in discovery order.
///
/// Attribute order matters: callers bind attribute `i` to location `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reflection {
    pub uniforms: Vec<String>,
    pub attributes: Vec<String>,
}

impl Reflection {
    /// Scans `src` and returns the names it declares.
    pub fn of(src: &str) -> Self {
        let mut r = Self::default();
        r.scan(src);
        r
    }

    /// Scans another stage into this reflection. Names already recorded are
    /// skipped, so a uniform shared by both stages is listed once.
    pub fn scan(&mut self, src: &str) {
        for decl in declarations(src) {
            let list = match decl.kind {
                DeclKind::Uniform => &mut self.uniforms,
                DeclKind::Attribute => &mut self.attributes,
            };
            if !list.iter().any(|n| *n == decl.name) {
                list.push(decl.name);
            }
        }
    }
}

/// Returns every declaration matched before `main`, duplicates included.
///
/// The pattern is `keyword type name` over whitespace-delimited words; the
/// name is cut at the first `[`, space or `;`. A keyword at the very end of
/// the word stream (missing type or name) is ignored.
pub fn declarations(src: &str) -> Vec<Declaration> {
    let words = Lexer::new(src).words_before_main();
    let mut out = Vec::new();
    let mut i = 0;
    while i < words.len() {
        let Some(kind) = DeclKind::from_keyword(words[i].text) else {
            i += 1;
            continue;
        };
        let (Some(ty), Some(name)) = (words.get(i + 1), words.get(i + 2)) else {
            break;
        };
        out.push(Declaration {
            kind,
            ty: ty.text.to_string(),
            name: strip_name(name).to_string(),
            line: words[i].line,
        });
        i += 3;
    }
    out
}

fn strip_name<'s>(word: &Word<'s>) -> &'s str {
    let text = word.text;
    match text.find(['[', ' ', ';']) {
        Some(end) => &text[..end],
        None => text,
    }
}
