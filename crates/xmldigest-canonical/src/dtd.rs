//! Attribute-list declarations from the internal DTD subset.
//!
//! The parser validates the DOCTYPE but does not apply `<!ATTLIST>` defaults
//! or type-driven value normalization, both of which change canonical form.

use std::collections::HashMap;

/// One declared attribute of an element type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AttributeDecl {
    /// Qualified name as declared.
    pub name: String,
    /// Any declared type other than `CDATA`; values get space-collapsed.
    pub tokenized: bool,
    /// Normalized default value, for plain and `#FIXED` defaults.
    pub default: Option<String>,
}

/// Attribute declarations keyed by element qualified name.
#[derive(Debug, Default)]
pub(crate) struct AttributeDecls {
    by_element: HashMap<String, Vec<AttributeDecl>>,
}

impl AttributeDecls {
    /// Collects declarations from the internal subset of `text`, if any.
    pub fn from_document(text: &str) -> Self {
        let mut decls = Self::default();
        if let Some(subset) = internal_subset(text) {
            decls.read_subset(subset);
        }
        decls
    }

    pub fn for_element(&self, qname: &str) -> &[AttributeDecl] {
        self.by_element.get(qname).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn find(&self, element: &str, attribute: &str) -> Option<&AttributeDecl> {
        self.for_element(element).iter().find(|d| d.name == attribute)
    }

    /// The first declaration of an attribute is binding.
    fn insert(&mut self, element: &str, decl: AttributeDecl) {
        let list = self.by_element.entry(element.to_string()).or_default();
        if !list.iter().any(|d| d.name == decl.name) {
            list.push(decl);
        }
    }

    fn read_subset(&mut self, subset: &str) -> Option<()> {
        let mut rest = subset;
        loop {
            rest = rest.trim_start();
            if rest.is_empty() || rest.starts_with(']') {
                return Some(());
            }
            if let Some(after) = rest.strip_prefix("<!--") {
                rest = &after[after.find("-->")? + 3..];
            } else if let Some(after) = rest.strip_prefix("<?") {
                rest = &after[after.find("?>")? + 2..];
            } else if let Some(after) = rest.strip_prefix("<!ATTLIST") {
                let (body, tail) = split_declaration(after)?;
                self.read_attlist(body);
                rest = tail;
            } else if let Some(after) = rest.strip_prefix("<!") {
                rest = split_declaration(after)?.1;
            } else if rest.starts_with('%') {
                rest = &rest[rest.find(';')? + 1..];
            } else {
                return None;
            }
        }
    }

    fn read_attlist(&mut self, body: &str) {
        let mut tokens = tokenize(body).into_iter();
        let Some(Token::Word(element)) = tokens.next() else {
            return;
        };
        loop {
            let Some(Token::Word(name)) = tokens.next() else {
                return;
            };
            let tokenized = match tokens.next() {
                Some(Token::Word("CDATA")) => false,
                Some(Token::Word("NOTATION")) => {
                    tokens.next();
                    true
                }
                Some(Token::Word(_) | Token::Group) => true,
                _ => return,
            };
            let default = match tokens.next() {
                Some(Token::Word("#FIXED")) => match tokens.next() {
                    Some(Token::Literal(value)) => Some(value),
                    _ => return,
                },
                Some(Token::Literal(value)) => Some(value),
                Some(Token::Word(_)) => None,
                _ => return,
            };
            self.insert(
                element,
                AttributeDecl {
                    name: name.to_string(),
                    tokenized,
                    default: default.map(|value| normalize_literal(value, tokenized)),
                },
            );
        }
    }
}

/// Collapses runs of spaces and trims, as required for non-CDATA attributes.
pub(crate) fn collapse_spaces(value: &str) -> String {
    value
        .split(' ')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'s> {
    Word(&'s str),
    Literal(&'s str),
    Group,
}

fn tokenize(body: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = body;
    loop {
        rest = rest.trim_start();
        let Some(first) = rest.chars().next() else {
            return tokens;
        };
        match first {
            '"' | '\'' => {
                let Some(end) = rest[1..].find(first) else {
                    return tokens;
                };
                tokens.push(Token::Literal(&rest[1..1 + end]));
                rest = &rest[end + 2..];
            }
            '(' => {
                let end = rest.find(')').map_or(rest.len(), |i| i + 1);
                tokens.push(Token::Group);
                rest = &rest[end..];
            }
            _ => {
                let end = rest
                    .find(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | '('))
                    .unwrap_or(rest.len());
                tokens.push(Token::Word(&rest[..end]));
                rest = &rest[end..];
            }
        }
    }
}

/// Text between `[` and `]` of a DOCTYPE that precedes the document element.
fn internal_subset(text: &str) -> Option<&str> {
    let mut rest = text;
    let doctype = loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix("<!--") {
            rest = &after[after.find("-->")? + 3..];
        } else if let Some(after) = rest.strip_prefix("<?") {
            rest = &after[after.find("?>")? + 2..];
        } else if let Some(after) = rest.strip_prefix("<!DOCTYPE") {
            break after;
        } else {
            return None;
        }
    };

    let mut quote = None;
    for (i, c) in doctype.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '[' => return Some(&doctype[i + 1..]),
                '>' => return None,
                _ => {}
            },
        }
    }
    None
}

/// Splits at the `>` closing a markup declaration, skipping quoted literals.
fn split_declaration(text: &str) -> Option<(&str, &str)> {
    let mut quote = None;
    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '>' => return Some((&text[..i], &text[i + 1..])),
                _ => {}
            },
        }
    }
    None
}

/// Attribute-value normalization of a default literal. Literal whitespace
/// becomes a space; character references keep the character they name.
fn normalize_literal(literal: &str, tokenized: bool) -> String {
    let mut value = String::with_capacity(literal.len());
    let mut rest = literal;
    while let Some(c) = rest.chars().next() {
        if c == '&' {
            if let Some((expanded, tail)) = expand_reference(rest) {
                value.push(expanded);
                rest = tail;
                continue;
            }
        }
        value.push(if matches!(c, '\t' | '\n' | '\r') { ' ' } else { c });
        rest = &rest[c.len_utf8()..];
    }
    if tokenized {
        collapse_spaces(&value)
    } else {
        value
    }
}

/// Character references and the predefined entities at the start of `text`.
fn expand_reference(text: &str) -> Option<(char, &str)> {
    let end = text.find(';')?;
    let name = &text[1..end];
    let expanded = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x") {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some((expanded, &text[end + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_defaults_and_types() {
        let decls = AttributeDecls::from_document(
            "<?xml version=\"1.0\"?>\n<!DOCTYPE doc [\n<!-- c > -->\n\
             <!ENTITY e \"<!ATTLIST doc bogus CDATA 'no'>\">\n\
             <!ATTLIST doc a CDATA \"x\tA\" b NMTOKENS #IMPLIED c (p|q) #FIXED 'q'>\n\
             <!ATTLIST doc a CDATA \"second\">\n]><doc/>",
        );
        assert_eq!(
            decls.for_element("doc"),
            &[
                AttributeDecl {
                    name: "a".into(),
                    tokenized: false,
                    default: Some("x A".into()),
                },
                AttributeDecl {
                    name: "b".into(),
                    tokenized: true,
                    default: None,
                },
                AttributeDecl {
                    name: "c".into(),
                    tokenized: true,
                    default: Some("q".into()),
                },
            ]
        );
        assert!(decls.find("doc", "bogus").is_none());
    }

    #[test]
    fn external_only_doctype_has_no_declarations() {
        let decls = AttributeDecls::from_document("<!DOCTYPE doc SYSTEM \"doc[1].dtd\"><doc/>");
        assert!(decls.for_element("doc").is_empty());
    }

    #[test]
    fn default_literals_expand_references() {
        assert_eq!(normalize_literal("a&amp;b&#x9;&#10;c\td", false), "a&b\t\nc d");
        assert_eq!(normalize_literal("  x   y ", true), "x y");
    }
}
