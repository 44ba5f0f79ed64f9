//! Parser for catalog prerequisite text.
//!
//! Turns text such as `CS 171 [Min Grade: C-] and (MATH 101 or MATH 102)` into
//! the requirement list stored on a course. `and` and `or` bind to the right:
//! `A and B or C` reads as `A and (B or C)`.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, instrument};

use crate::domain::entities::{Grade, Prerequisite, Requirement};
use crate::domain::error::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Code(String),
    Grade(Grade),
    And,
    Or,
    Open,
    Close,
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Code,
    Whitespace,
    Grade,
    And,
    Or,
    Open,
    Close,
}

/// Expression tree before lowering into the dataset shape.
#[derive(Debug)]
enum Node {
    Leaf(Prerequisite),
    All(Vec<Node>),
    Any(Vec<Node>),
}

fn token_patterns() -> &'static [(Kind, Regex)] {
    static PATTERNS: OnceLock<Vec<(Kind, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (Kind::Code, r"^[A-Z]+-\d+"),
            (Kind::Whitespace, r"^\s+"),
            (Kind::Grade, r"^\[Min Grade: (.+?)\]"),
            (Kind::And, r"^and\b"),
            (Kind::Or, r"^or\b"),
            (Kind::Open, r"^\("),
            (Kind::Close, r"^\)"),
        ]
        .into_iter()
        .map(|(kind, pattern)| (kind, Regex::new(pattern).unwrap()))
        .collect()
    })
}

fn code_spacing() -> &'static Regex {
    static SPACING: OnceLock<Regex> = OnceLock::new();
    SPACING.get_or_init(|| Regex::new(r"([A-Z])\s(\d+)").unwrap())
}

#[instrument(level = "trace")]
fn tokenize(text: &str) -> DomainResult<Vec<Token>> {
    let normalized = code_spacing().replace_all(text, "$1-$2");
    let mut remaining: &str = &normalized;
    let mut tokens = Vec::new();

    'scan: while !remaining.is_empty() {
        for (kind, pattern) in token_patterns() {
            let Some(captures) = pattern.captures(remaining) else {
                continue;
            };
            let matched = &captures[0];
            match kind {
                Kind::Code => tokens.push(Token::Code(matched.to_string())),
                Kind::Grade => tokens.push(Token::Grade(captures[1].parse()?)),
                Kind::And => tokens.push(Token::And),
                Kind::Or => tokens.push(Token::Or),
                Kind::Open => tokens.push(Token::Open),
                Kind::Close => tokens.push(Token::Close),
                Kind::Whitespace => {}
            }
            remaining = &remaining[matched.len()..];
            continue 'scan;
        }
        return Err(DomainError::UnexpectedInput {
            remainder: remaining.to_string(),
        });
    }

    Ok(tokens)
}

struct Parser<'t> {
    input: &'t str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next_is(&self, token: &Token) -> bool {
        self.peek() == Some(token)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn error(&self, message: impl Into<String>) -> DomainError {
        DomainError::InvalidPrerequisites {
            input: self.input.to_string(),
            message: message.into(),
        }
    }

    fn expression(&mut self) -> DomainResult<Node> {
        match self.advance() {
            Some(Token::Open) => {
                let inner = self.expression()?;
                if self.advance() != Some(Token::Close) {
                    return Err(self.error("expected ')'"));
                }
                if self.next_is(&Token::And) || self.next_is(&Token::Or) {
                    self.connectives(inner)
                } else {
                    Ok(inner)
                }
            }
            Some(Token::Code(code_name)) => {
                let minimum_grade = match self.peek() {
                    Some(Token::Grade(grade)) => {
                        let grade = *grade;
                        self.pos += 1;
                        grade
                    }
                    _ => Grade::Any,
                };
                self.connectives(Node::Leaf(Prerequisite::new(code_name, minimum_grade)))
            }
            Some(token) => Err(self.error(format!("unexpected {token:?}"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn connectives(&mut self, mut left: Node) -> DomainResult<Node> {
        while self.next_is(&Token::And) {
            self.pos += 1;
            let right = self.expression()?;
            left = match (left, right) {
                (Node::All(mut l), Node::All(r)) => {
                    l.extend(r);
                    Node::All(l)
                }
                (Node::All(mut l), r) => {
                    l.push(r);
                    Node::All(l)
                }
                (l, Node::All(r)) => Node::All(std::iter::once(l).chain(r).collect()),
                (l, r) => Node::All(vec![l, r]),
            };
        }
        while self.next_is(&Token::Or) {
            self.pos += 1;
            let right = self.expression()?;
            left = match right {
                Node::Any(members) => Node::Any(std::iter::once(left).chain(members).collect()),
                other => Node::Any(vec![left, other]),
            };
        }
        Ok(left)
    }
}

/// Parse catalog prerequisite text into the requirement list of a course.
///
/// Blank text yields no requirements. An `and` inside an alternative group
/// has no representation in the data model and is rejected.
#[instrument(level = "debug")]
pub fn parse_prerequisites(text: &str) -> DomainResult<Vec<Requirement>> {
    let tokens = tokenize(text)?;
    let mut parser = Parser {
        input: text,
        tokens,
        pos: 0,
    };

    // dangling connectives at the start carry no meaning
    while parser.next_is(&Token::And) || parser.next_is(&Token::Or) {
        parser.pos += 1;
    }

    let mut nodes = Vec::new();
    while parser.peek().is_some() {
        nodes.push(parser.expression()?);
    }
    debug!("parsed {} top-level expressions", nodes.len());

    let mut requirements = Vec::new();
    for node in nodes {
        lower_into(node, &mut requirements, &parser)?;
    }
    Ok(requirements)
}

fn lower_into(node: Node, out: &mut Vec<Requirement>, parser: &Parser<'_>) -> DomainResult<()> {
    match node {
        Node::All(nodes) => {
            for node in nodes {
                lower_into(node, out, parser)?;
            }
        }
        other => out.push(lower_member(other, parser)?),
    }
    Ok(())
}

fn lower_member(node: Node, parser: &Parser<'_>) -> DomainResult<Requirement> {
    match node {
        Node::Leaf(prerequisite) => Ok(Requirement::Course(prerequisite)),
        Node::Any(members) => Ok(Requirement::one_of(
            members
                .into_iter()
                .map(|member| lower_member(member, parser))
                .collect::<DomainResult<_>>()?,
        )),
        Node::All(_) => Err(parser.error("'and' inside an alternative group")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn course(code: &str, grade: Grade) -> Requirement {
        Requirement::course(code, grade)
    }

    #[test]
    fn given_blank_text_when_parsing_then_returns_no_requirements() {
        assert!(parse_prerequisites("").unwrap().is_empty());
        assert!(parse_prerequisites("   ").unwrap().is_empty());
    }

    #[test]
    fn given_single_course_with_grade_when_parsing_then_normalizes_code() {
        let parsed = parse_prerequisites("CS 171 [Min Grade: C-]").unwrap();
        assert_eq!(parsed, vec![course("CS-171", Grade::CMinus)]);
    }

    #[test]
    fn given_conjunction_with_group_when_parsing_then_keeps_union_nested() {
        let parsed =
            parse_prerequisites("CS 171 [Min Grade: C-] and (MATH 101 or MATH 102)").unwrap();

        assert_eq!(
            parsed,
            vec![
                course("CS-171", Grade::CMinus),
                Requirement::one_of(vec![
                    course("MATH-101", Grade::Any),
                    course("MATH-102", Grade::Any),
                ]),
            ]
        );
    }

    #[test]
    fn given_chained_or_when_parsing_then_flattens_into_one_group() {
        let parsed = parse_prerequisites("A 1 or B 2 or C 3 [Min Grade: D]").unwrap();

        assert_eq!(
            parsed,
            vec![Requirement::one_of(vec![
                course("A-1", Grade::Any),
                course("B-2", Grade::Any),
                course("C-3", Grade::D),
            ])]
        );
    }

    #[test]
    fn given_and_then_or_when_parsing_then_binds_right() {
        let parsed = parse_prerequisites("A 1 and B 2 or C 3").unwrap();

        assert_eq!(
            parsed,
            vec![
                course("A-1", Grade::Any),
                Requirement::one_of(vec![course("B-2", Grade::Any), course("C-3", Grade::Any)]),
            ]
        );
    }

    #[test]
    fn given_leading_connective_when_parsing_then_ignores_it() {
        let parsed = parse_prerequisites("or CS 171").unwrap();
        assert_eq!(parsed, vec![course("CS-171", Grade::Any)]);
    }

    #[rstest]
    #[case("A 1 or B 2 and C 3")]
    #[case("(A 1 and B 2) or C 3")]
    fn given_conjunction_inside_alternative_when_parsing_then_errors(#[case] text: &str) {
        let result = parse_prerequisites(text);
        assert!(matches!(result, Err(DomainError::InvalidPrerequisites { .. })));
    }

    #[rstest]
    #[case("CS 171 and")]
    #[case("(CS 171")]
    #[case("CS 171 )")]
    fn given_incomplete_expression_when_parsing_then_errors(#[case] text: &str) {
        assert!(parse_prerequisites(text).is_err());
    }

    #[test]
    fn given_free_text_when_parsing_then_reports_remainder() {
        let result = parse_prerequisites("CS 171 or permission of instructor");
        match result {
            Err(DomainError::UnexpectedInput { remainder }) => {
                assert!(remainder.starts_with("permission"))
            }
            other => panic!("expected UnexpectedInput, got {other:?}"),
        }
    }

    #[test]
    fn given_unknown_grade_when_parsing_then_errors() {
        let result = parse_prerequisites("CS 171 [Min Grade: Q]");
        assert!(matches!(result, Err(DomainError::UnknownGrade(_))));
    }
}
