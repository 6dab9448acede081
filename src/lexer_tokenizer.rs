//lexical analysis of arbor sources,
//breaks the text into positioned tokens for the parser
//built on the logos library

use crate::parser::parser_error::ParseError;
use logos::Logos;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Default, Clone, PartialEq)]
pub enum LexErrorKind {
    #[default]
    UnknownCharacter,
    IntegerOverflow,
}

#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexErrorKind)]
#[logos(skip r"\s+")]
#[logos(skip r"//[^\r\n]*")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub enum Token {
    // Declaration kinds
    #[token("int")]
    Int,
    #[token("bool")]
    Bool,
    #[token("const")]
    Const,
    #[token("rbt")]
    Rbt,
    #[token("avl")]
    Avl,
    #[token("bst")]
    Bst,
    #[token("exp")]
    Exp,

    // Control flow
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("to")]
    To,
    #[token("iterate")]
    Iterate,

    // Traversal orders
    #[token("inorder")]
    Inorder,
    #[token("preorder")]
    Preorder,
    #[token("postorder")]
    Postorder,

    // Tree operations
    #[token("insert")]
    Insert,
    #[token("remove")]
    Remove,
    #[token("includes")]
    Includes,
    #[token("height")]
    Height,
    #[token("depth")]
    Depth,
    #[token("calculate")]
    Calculate,
    #[token("visualize")]
    Visualize,
    #[token("add")]
    Add,
    #[token("sub")]
    Sub,

    #[token("true")]
    True,
    #[token("false")]
    False,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(":")]
    Colon,
    #[token(";")]
    EndStr,
    #[token(".")]
    Dot,
    #[token("=")]
    Assign,

    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Mod,

    // Logic and comparisons
    #[token("&&")]
    And,
    #[token("||")]
    Or,
    #[token("!")]
    Not,
    #[token("==")]
    Equal,
    #[token("!=")]
    NotEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("<=")]
    LessEqual,
    #[token(">")]
    Greater,
    #[token("<")]
    Less,

    // Names
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Integer values, must fit a java int
    #[regex("[0-9]+", |lex| lex.slice().parse::<i32>().map_err(|_| LexErrorKind::IntegerOverflow))]
    Number(i32),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::Identifier(name) => return write!(f, "identifier '{}'", name),
            Token::Number(n) => return write!(f, "integer {}", n),
            Token::Int => "int",
            Token::Bool => "bool",
            Token::Const => "const",
            Token::Rbt => "rbt",
            Token::Avl => "avl",
            Token::Bst => "bst",
            Token::Exp => "exp",
            Token::If => "if",
            Token::Else => "else",
            Token::For => "for",
            Token::In => "in",
            Token::To => "to",
            Token::Iterate => "iterate",
            Token::Inorder => "inorder",
            Token::Preorder => "preorder",
            Token::Postorder => "postorder",
            Token::Insert => "insert",
            Token::Remove => "remove",
            Token::Includes => "includes",
            Token::Height => "height",
            Token::Depth => "depth",
            Token::Calculate => "calculate",
            Token::Visualize => "visualize",
            Token::Add => "add",
            Token::Sub => "sub",
            Token::True => "true",
            Token::False => "false",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::Colon => ":",
            Token::EndStr => ";",
            Token::Dot => ".",
            Token::Assign => "=",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Mod => "%",
            Token::And => "&&",
            Token::Or => "||",
            Token::Not => "!",
            Token::Equal => "==",
            Token::NotEqual => "!=",
            Token::GreaterEqual => ">=",
            Token::LessEqual => "<=",
            Token::Greater => ">",
            Token::Less => "<",
        };
        write!(f, "'{}'", text)
    }
}

// Byte range of a token or node in the source
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

// Struct with token and its byte position in source
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken {
    pub token: Token,
    pub span: Span,
}

// Lexing function, returns tokens with spans or the first malformed token
pub fn lex_with_span(source: &str) -> Result<Vec<PositionedToken>, ParseError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = Span::from(lexer.span());
        match result {
            Ok(token) => {
                tracing::trace!(?token, start = span.start, end = span.end, "token");
                tokens.push(PositionedToken { token, span });
            }
            Err(kind) => return Err(ParseError::malformed(kind, lexer.slice(), span)),
        }
    }

    Ok(tokens)
}
