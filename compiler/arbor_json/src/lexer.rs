//! JSON tokens.

use logos::Logos;

/// Raw token from logos; strings and numbers are still source slices.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub(crate) enum RawToken {
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,

    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    #[regex(r"-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    // Escapes are validated when the string is cooked.
    #[regex(r#""([^"\\\x00-\x1F]|\\.)*""#)]
    String,
}

impl RawToken {
    pub(crate) fn describe(self) -> &'static str {
        match self {
            RawToken::LBrace => "`{`",
            RawToken::RBrace => "`}`",
            RawToken::LBracket => "`[`",
            RawToken::RBracket => "`]`",
            RawToken::Colon => "`:`",
            RawToken::Comma => "`,`",
            RawToken::True | RawToken::False => "boolean",
            RawToken::Null => "null",
            RawToken::Number => "number",
            RawToken::String => "string",
        }
    }
}
