//! Recursive-descent filter parser.
//!
//! ```text
//! or   = and *("or" and)
//! and  = not *("and" not)
//! not  = "not" not / atom
//! atom = "(" or ")" / path ("pr" / op literal)
//! ```
//!
//! A bare path is accepted as an atom only when it ends in a bracket filter.
//! Keywords and operators ignore case. `not` followed by an operator is read
//! as an attribute named `not`.

use super::FilterConfig;
use super::ast::{CompareOp, FilterNode, Literal};
use super::eval::type_literal;
use super::lexer::{Token, TokenKind, tokenize};
use crate::error::{Expected, FilterError, FilterSyntaxError, PathError};
use crate::path::{self, ResolvedPath, Scope};
use serde_json::Number;

/// Parse `input` with paths resolved in `scope`.
///
/// `depth` is the nesting level the expression starts at, non-zero for
/// bracket filters inside paths.
pub(crate) fn parse_scoped<'s>(
    scope: Scope<'s>,
    input: &str,
    config: &FilterConfig,
    depth: usize,
) -> Result<FilterNode<'s>, FilterError> {
    if depth > config.max_depth {
        return Err(FilterError::TooDeep {
            position: 0,
            max_depth: config.max_depth,
        });
    }
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        cursor: 0,
        scope,
        config,
        depth,
    };
    let node = parser.parse_or()?;
    let next = parser.peek();
    if next.kind != TokenKind::Eof {
        return Err(syntax(next, Expected::Connective));
    }
    Ok(node)
}

struct Parser<'a, 's> {
    tokens: Vec<Token<'a>>,
    cursor: usize,
    scope: Scope<'s>,
    config: &'a FilterConfig,
    depth: usize,
}

impl<'a, 's> Parser<'a, 's> {
    fn peek(&self) -> &Token<'a> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> &Token<'a> {
        // the token list always ends with Eof
        let last = self.tokens.len() - 1;
        &self.tokens[(self.cursor + offset).min(last)]
    }

    fn advance(&mut self) -> Token<'a> {
        let token = self.peek().clone();
        if self.cursor < self.tokens.len() - 1 {
            self.cursor += 1;
        }
        token
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        is_word(self.peek(), keyword)
    }

    fn enter(&mut self, position: usize) -> Result<(), FilterError> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(FilterError::TooDeep {
                position,
                max_depth: self.config.max_depth,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_or(&mut self) -> Result<FilterNode<'s>, FilterError> {
        let mut left = self.parse_and()?;
        while self.at_keyword("or") {
            self.advance();
            let right = self.parse_and()?;
            left = FilterNode::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<FilterNode<'s>, FilterError> {
        let mut left = self.parse_not()?;
        while self.at_keyword("and") {
            self.advance();
            let right = self.parse_not()?;
            left = FilterNode::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<FilterNode<'s>, FilterError> {
        if self.at_keyword("not") && !is_operator_word(self.peek_at(1)) {
            let token = self.advance();
            self.enter(token.start)?;
            let inner = self.parse_not()?;
            self.leave();
            return Ok(FilterNode::Not(Box::new(inner)));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<FilterNode<'s>, FilterError> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::LParen => {
                self.advance();
                self.enter(token.start)?;
                let inner = self.parse_or()?;
                let closing = self.peek();
                if closing.kind != TokenKind::RParen {
                    return Err(syntax(closing, Expected::ClosingParenthesis));
                }
                self.advance();
                self.leave();
                Ok(FilterNode::Grouping(Box::new(inner)))
            }
            TokenKind::Word(word)
                if !(is_word(&token, "and") || is_word(&token, "or"))
                    || is_operator_word(self.peek_at(1)) =>
            {
                self.advance();
                let path = self.resolve(word, token.start)?;
                self.parse_predicate(path)
            }
            _ => Err(syntax(&token, Expected::Expression)),
        }
    }

    fn parse_predicate(&mut self, path: ResolvedPath<'s>) -> Result<FilterNode<'s>, FilterError> {
        let token = self.peek().clone();
        if let TokenKind::Word(word) = token.kind {
            if word.eq_ignore_ascii_case("pr") {
                self.advance();
                return Ok(FilterNode::Present(path));
            }
            if let Some(operator) = CompareOp::from_keyword(word) {
                self.advance();
                let value = self.parse_literal()?;
                let operand = type_literal(&path, operator, &value);
                return Ok(FilterNode::Comparison {
                    path,
                    operator,
                    value,
                    operand,
                });
            }
        }
        if path.ends_with_filter() {
            return Ok(FilterNode::ValuePath(path));
        }
        Err(syntax(&token, Expected::Operator))
    }

    fn parse_literal(&mut self) -> Result<Literal, FilterError> {
        let token = self.advance();
        let literal = match &token.kind {
            TokenKind::String(text) => Literal::String(text.clone()),
            TokenKind::Word(word) if word.eq_ignore_ascii_case("true") => Literal::Boolean(true),
            TokenKind::Word(word) if word.eq_ignore_ascii_case("false") => Literal::Boolean(false),
            TokenKind::Word(word) if word.eq_ignore_ascii_case("null") => Literal::Null,
            TokenKind::Word(word) => match word.parse::<Number>() {
                Ok(number) => Literal::Number(number),
                Err(_) => return Err(syntax(&token, Expected::Literal)),
            },
            _ => return Err(syntax(&token, Expected::Literal)),
        };
        Ok(literal)
    }

    fn resolve(&self, text: &str, start: usize) -> Result<ResolvedPath<'s>, FilterError> {
        path::resolve_in(self.scope, text, self.config, self.depth).map_err(|error| match error {
            PathError::InvalidPathSyntax {
                position, reason, ..
            } => FilterError::Syntax(FilterSyntaxError {
                position: start + position,
                expected: Expected::AttributePath,
                found: reason,
            }),
            // bracket filter errors are relative to the path
            PathError::Filter { source, .. } if source.position().is_some() => {
                (*source).shifted(start)
            }
            other => FilterError::Path(other),
        })
    }
}

fn is_word(token: &Token<'_>, keyword: &str) -> bool {
    matches!(token.kind, TokenKind::Word(word) if word.eq_ignore_ascii_case(keyword))
}

fn is_operator_word(token: &Token<'_>) -> bool {
    match token.kind {
        TokenKind::Word(word) => {
            word.eq_ignore_ascii_case("pr") || CompareOp::from_keyword(word).is_some()
        }
        _ => false,
    }
}

fn syntax(token: &Token<'_>, expected: Expected) -> FilterError {
    FilterError::Syntax(FilterSyntaxError {
        position: token.start,
        expected,
        found: token.describe(),
    })
}
