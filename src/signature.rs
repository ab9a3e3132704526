//! Helpers for declaration signatures such as `map[B](f: A => B): List[B]`.

/// Signatures longer than this are shown without highlighting.
pub const MAX_HIGHLIGHT_LEN: usize = 500;

/// Bare declaration name: the leading identifier, else the text before `(`.
pub fn extract_name(signature: &str) -> &str {
    let end = leading_identifier_len(signature);
    if end > 0 {
        &signature[..end]
    } else {
        signature.split('(').next().unwrap_or(signature).trim()
    }
}

/// A highlighted fragment of a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigToken<'a> {
    /// Declared name at the start.
    Name(&'a str),
    /// One of `( ) [ ] , :`.
    Punct(char),
    Space,
    /// Identifier starting with an uppercase letter or containing a `.`.
    Type(&'a str),
    Ident(&'a str),
    /// Anything else, including whole signatures that are not highlighted.
    Raw(&'a str),
}

/// Split a signature into highlightable tokens.
pub fn tokenize(signature: &str) -> Vec<SigToken<'_>> {
    if signature.is_empty() {
        return Vec::new();
    }
    let name_len = leading_identifier_len(signature);
    if signature.len() > MAX_HIGHLIGHT_LEN || name_len == 0 {
        return vec![SigToken::Raw(signature)];
    }

    let mut tokens = vec![SigToken::Name(&signature[..name_len])];
    let rest = &signature[name_len..];
    let mut chars = rest.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            '(' | ')' | '[' | ']' | ',' | ':' => {
                tokens.push(SigToken::Punct(c));
                chars.next();
            }
            ' ' => {
                tokens.push(SigToken::Space);
                chars.next();
            }
            c if is_word_char(c) => {
                let mut end = start;
                while let Some(&(i, w)) = chars.peek() {
                    if !is_word_char(w) {
                        break;
                    }
                    end = i + w.len_utf8();
                    chars.next();
                }
                let word = &rest[start..end];
                if word.starts_with(|ch: char| ch.is_ascii_uppercase()) || word.contains('.') {
                    tokens.push(SigToken::Type(word));
                } else {
                    tokens.push(SigToken::Ident(word));
                }
            }
            _ => {
                tokens.push(SigToken::Raw(&rest[start..start + c.len_utf8()]));
                chars.next();
            }
        }
    }

    tokens
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

fn leading_identifier_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    match bytes.first() {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' => bytes
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
            .count(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SigToken::*;

    #[test]
    fn test_extract_name() {
        assert_eq!(extract_name("process(items: List[Int]): Unit"), "process");
        assert_eq!(extract_name("map[B](f: A => B)"), "map");
        assert_eq!(extract_name("+ (other: Vec)"), "+");
        assert_eq!(extract_name(""), "");
    }

    #[test]
    fn test_tokenize_classifies_words() {
        let tokens = tokenize("run(ctx: scala.Context, n: Int): Unit");
        assert_eq!(
            tokens,
            vec![
                Name("run"),
                Punct('('),
                Ident("ctx"),
                Punct(':'),
                Space,
                Type("scala.Context"),
                Punct(','),
                Space,
                Ident("n"),
                Punct(':'),
                Space,
                Type("Int"),
                Punct(')'),
                Punct(':'),
                Space,
                Type("Unit"),
            ]
        );
    }

    #[test]
    fn test_operators_are_raw() {
        let tokens = tokenize("f(g: A => B)");
        assert!(tokens.contains(&Raw("=")));
        assert!(tokens.contains(&Raw(">")));
    }

    #[test]
    fn test_long_or_symbolic_signatures_are_not_highlighted() {
        let long = format!("f({})", "x".repeat(600));
        assert_eq!(tokenize(&long), vec![Raw(long.as_str())]);
        assert_eq!(tokenize("++(xs)"), vec![Raw("++(xs)")]);
    }
}
