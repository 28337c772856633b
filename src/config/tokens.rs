//! Placeholder substitution in flag and path templates
//!
//! Templates are plain text with `${NAME}` placeholders. Only placeholders a
//! lookup knows about are replaced; everything else is copied through.

use logos::Logos;

/// Pieces of a template string
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    /// `${NAME}`
    #[regex(r"\$\{[A-Za-z_][A-Za-z0-9_]*\}")]
    Placeholder,

    /// A `$` that does not start a well-formed placeholder
    #[token("$")]
    Dollar,

    /// Run of ordinary text
    #[regex(r"[^$]+")]
    Text,
}

/// Replace every `${NAME}` for which `lookup` returns a value
///
/// Unknown names, malformed placeholders and stray `$` are left unchanged.
pub fn substitute<'a, F>(template: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<&'a str>,
{
    let mut output = String::with_capacity(template.len());
    let mut lexer = Piece::lexer(template);

    while let Some(piece) = lexer.next() {
        let slice = lexer.slice();
        match piece {
            Ok(Piece::Placeholder) => {
                let name = &slice[2..slice.len() - 1];
                match lookup(name) {
                    Some(value) => output.push_str(value),
                    None => {
                        tracing::debug!(token = name, "leaving unknown template token as is");
                        output.push_str(slice);
                    }
                }
            }
            Ok(Piece::Dollar | Piece::Text) | Err(()) => output.push_str(slice),
        }
    }

    output
}
