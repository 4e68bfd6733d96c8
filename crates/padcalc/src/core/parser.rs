//! Tokenizer and recursive descent parser for keypad expressions
//!
//! The keypad only produces digits, `.` and the four operators, so the
//! grammar is small. A sign is accepted in front of the first operand of an
//! expression (or of a parenthesised group); anywhere else two operators in
//! a row are rejected.

use std::fmt;

use crate::core::{CalcError, CalcResult, Operation};

/// Deepest parenthesis nesting the parser accepts
pub const MAX_NESTING: usize = 64;

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary operator (or a leading sign)
    Operator(Operation),
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
}

impl Token {
    /// Returns true if this token is an operator
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::Operator(op) => write!(f, "operator '{}'", op.symbol()),
            Self::LeftParen => write!(f, "'('"),
            Self::RightParen => write!(f, "')'"),
        }
    }
}

/// Abstract syntax tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Leading minus sign
    Negate(Box<AstNode>),
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }

    /// Moves every non-leaf child into `out`, putting a placeholder leaf in its slot
    fn detach_children(&mut self, out: &mut Vec<AstNode>) {
        let mut detach = |child: &mut AstNode| {
            if !matches!(child, Self::Number(_)) {
                out.push(std::mem::replace(child, Self::Number(0.0)));
            }
        };
        match self {
            Self::Number(_) => {}
            Self::Negate(inner) => detach(inner.as_mut()),
            Self::BinaryOp { left, right, .. } => {
                detach(left.as_mut());
                detach(right.as_mut());
            }
        }
    }
}

// A long `1+1+...` chain is as deep as it is long; drop it without recursing.
impl Drop for AstNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

/// Converts expression text into tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        if ch.is_ascii_digit() || ch == '.' {
            return self.read_number().map(Some);
        }

        let token = if let Some(op) = Operation::from_symbol(ch) {
            Token::Operator(op)
        } else if ch == '(' {
            Token::LeftParen
        } else if ch == ')' {
            Token::RightParen
        } else {
            return Err(CalcError::parse(format!(
                "unexpected character '{ch}' at position {}",
                self.pos
            )));
        };
        self.advance();

        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Reads `digits`, `digits.`, `.digits` or `digits.digits`.
    /// A second dot ends the literal.
    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let literal = &self.input[start..self.pos];
        literal
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| CalcError::parse(format!("invalid number '{literal}'")))
    }
}

/// Recursive descent parser
///
/// Operator chains are folded in loops, so only parentheses recurse; their
/// nesting is capped at [`MAX_NESTING`].
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*        -- first term may be signed
/// term       ::= operand (('*' | '/') primary)*
/// operand    ::= ('+' | '-') primary | primary
/// primary    ::= NUMBER | '(' expression ')'
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses expression text into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        if input.trim().is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let tokens = Tokenizer::new(input).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses all tokens into a single AST, rejecting leftovers
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let ast = self.parse_expression()?;

        if let Some(token) = self.current() {
            return Err(CalcError::parse(format!(
                "unexpected {token} at token {}",
                self.pos
            )));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn current_operator(&self) -> Option<Operation> {
        match self.current() {
            Some(Token::Operator(op)) => Some(*op),
            _ => None,
        }
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term(true)?;

        while let Some(op @ (Operation::Add | Operation::Subtract)) = self.current_operator() {
            self.advance();
            let right = self.parse_term(false)?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self, leading: bool) -> CalcResult<AstNode> {
        let mut left = if leading {
            self.parse_operand()?
        } else {
            self.parse_primary()?
        };

        while let Some(op @ (Operation::Multiply | Operation::Divide)) = self.current_operator() {
            self.advance();
            let right = self.parse_primary()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_operand(&mut self) -> CalcResult<AstNode> {
        match self.current_operator() {
            Some(Operation::Subtract) => {
                self.advance();
                Ok(AstNode::negate(self.parse_primary()?))
            }
            Some(Operation::Add) => {
                self.advance();
                self.parse_primary()
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> CalcResult<AstNode> {
        let after_operator = self.pos > 0
            && self
                .tokens
                .get(self.pos - 1)
                .is_some_and(Token::is_operator);

        let token = match self.advance() {
            Some(token) => token.clone(),
            None if after_operator => {
                return Err(CalcError::parse("expression ends with an operator"));
            }
            None => return Err(CalcError::parse("unexpected end of expression")),
        };

        match token {
            Token::Number(n) => Ok(AstNode::number(n)),
            Token::LeftParen => {
                if self.depth >= MAX_NESTING {
                    return Err(CalcError::parse(format!(
                        "parentheses nested deeper than {MAX_NESTING}"
                    )));
                }
                self.depth += 1;
                let inner = self.parse_expression()?;
                self.depth -= 1;
                match self.advance() {
                    Some(Token::RightParen) => Ok(inner),
                    Some(other) => Err(CalcError::parse(format!("expected ')' but found {other}"))),
                    None => Err(CalcError::parse("unclosed parenthesis")),
                }
            }
            Token::Operator(op) if after_operator => Err(CalcError::parse(format!(
                "operator '{}' follows another operator",
                op.symbol()
            ))),
            other => Err(CalcError::parse(format!("unexpected {other}"))),
        }
    }
}
