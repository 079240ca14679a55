//! Parser for the textual condition syntax
//!
//! ```text
//! or       := and ( '|' and )*
//! and      := unary ( '&' unary )*
//! unary    := '~' unary | '(' or ')' | compound | atom
//! compound := ('And' | 'Or') '(' [ or ( ',' or )* ] ')'
//! atom     := Name [ '(' [ arg ] ')' ]
//! arg      := '"' text '"' | Name
//! ```
//!
//! String arguments are double-quoted with `\"` and `\\` escapes; enum
//! arguments are bare (`PlanetSize(LARGE)`). Empty parentheses after an
//! argument-less atom are accepted, so `Planet()` reads the same as
//! `Planet`. The `And(..)` / `Or(..)` call form spells out conjunctions with
//! fewer than two parts, which the infix form cannot.

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, opt},
    error::{Error, ErrorKind},
    multi::{separated_list0, separated_list1},
    sequence::{delimited, pair, preceded},
    IResult, Parser,
};
use std::str::FromStr;

use crate::core::error::CodexError;
use crate::effects::condition::Condition;

impl FromStr for Condition {
    type Err = CodexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match expression(s) {
            Ok((_, condition)) => Ok(condition),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(CodexError::ConditionParse(
                format!("'{}': unexpected input at '{}'", s, e.input),
            )),
            Err(nom::Err::Incomplete(_)) => Err(CodexError::ConditionParse(format!(
                "'{}': incomplete condition",
                s
            ))),
        }
    }
}

/// An atom's argument as written
#[derive(Debug, Clone, PartialEq)]
enum Arg<'a> {
    Quoted(String),
    Bare(&'a str),
}

fn expression(input: &str) -> IResult<&str, Condition> {
    all_consuming(delimited(multispace0, or_expr, multispace0)).parse(input)
}

fn or_expr(input: &str) -> IResult<&str, Condition> {
    map(separated_list1(operator('|'), and_expr), |parts| {
        collapse(parts, Condition::Or)
    })
    .parse(input)
}

fn and_expr(input: &str) -> IResult<&str, Condition> {
    map(separated_list1(operator('&'), unary), |parts| {
        collapse(parts, Condition::And)
    })
    .parse(input)
}

fn collapse(mut parts: Vec<Condition>, wrap: fn(Vec<Condition>) -> Condition) -> Condition {
    if parts.len() == 1 {
        parts.remove(0)
    } else {
        wrap(parts)
    }
}

fn operator<'a>(
    op: char,
) -> impl Parser<&'a str, Output = char, Error = Error<&'a str>> {
    delimited(multispace0, char(op), multispace0)
}

fn unary(input: &str) -> IResult<&str, Condition> {
    alt((negation, parenthesised, compound, atom)).parse(input)
}

fn negation(input: &str) -> IResult<&str, Condition> {
    map(preceded(pair(char('~'), multispace0), unary), |inner| {
        Condition::Not(Box::new(inner))
    })
    .parse(input)
}

fn parenthesised(input: &str) -> IResult<&str, Condition> {
    delimited(
        pair(char('('), multispace0),
        or_expr,
        pair(multispace0, char(')')),
    )
    .parse(input)
}

/// `And(a, b)` / `Or()`: parts are kept as written, never collapsed
fn compound(input: &str) -> IResult<&str, Condition> {
    let (rest, name) = identifier(input)?;
    let wrap: fn(Vec<Condition>) -> Condition = match name {
        "And" => Condition::And,
        "Or" => Condition::Or,
        _ => return Err(nom::Err::Error(Error::new(input, ErrorKind::Tag))),
    };
    let (rest, parts) = preceded(
        multispace0,
        delimited(
            pair(char('('), multispace0),
            separated_list0(operator(','), or_expr),
            pair(multispace0, char(')')),
        ),
    )
    .parse(rest)?;
    Ok((rest, wrap(parts)))
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_').parse(input)
}

/// A double-quoted string; `\"` and `\\` are the only escapes
fn quoted(input: &str) -> IResult<&str, String> {
    let (body, _) = char('"').parse(input)?;
    let mut text = String::new();
    let mut chars = body.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((&body[i + 1..], text)),
            '\\' => match chars.next() {
                Some((_, escaped @ ('"' | '\\'))) => text.push(escaped),
                _ => return Err(nom::Err::Failure(Error::new(&body[i..], ErrorKind::Escaped))),
            },
            other => text.push(other),
        }
    }
    Err(nom::Err::Failure(Error::new(input, ErrorKind::Char)))
}

fn call_args(input: &str) -> IResult<&str, Option<Option<Arg<'_>>>> {
    opt(preceded(
        multispace0,
        delimited(
            pair(char('('), multispace0),
            opt(alt((map(quoted, Arg::Quoted), map(identifier, Arg::Bare)))),
            pair(multispace0, char(')')),
        ),
    ))
    .parse(input)
}

fn atom(input: &str) -> IResult<&str, Condition> {
    let (rest, name) = identifier(input)?;
    let (rest, args) = call_args(rest)?;

    match build_atom(name, args.flatten()) {
        Some(condition) => Ok((rest, condition)),
        None => Err(nom::Err::Failure(Error::new(input, ErrorKind::Verify))),
    }
}

fn build_atom(name: &str, arg: Option<Arg<'_>>) -> Option<Condition> {
    let condition = match (name, arg) {
        ("All", None) => Condition::All,
        ("None", None) => Condition::None,
        ("IsSource" | "Source", None) => Condition::Source,
        ("Planet", None) => Condition::Planet,
        ("Ship", None) => Condition::Ship,
        ("Building", None) => Condition::Building,
        ("Unowned", None) => Condition::Unowned,
        ("Capital", None) => Condition::Capital,
        ("OwnedBySourceOwner", None) => Condition::OwnedBySourceOwner,
        ("Species", Some(Arg::Quoted(a))) => Condition::Species(a),
        ("Focus", Some(Arg::Quoted(a))) => Condition::Focus(a),
        ("OwnerHasTech", Some(Arg::Quoted(a))) => Condition::OwnerHasTech(a),
        ("OwnerHasPolicy", Some(Arg::Quoted(a))) => Condition::OwnerHasPolicy(a),
        ("HasSpecial", Some(Arg::Quoted(a))) => Condition::HasSpecial(a),
        ("PlanetSize", Some(Arg::Bare(a))) => Condition::PlanetSize(a.parse().ok()?),
        ("PlanetEnvironment", Some(Arg::Bare(a))) => {
            Condition::PlanetEnvironment(a.parse().ok()?)
        }
        _ => return None,
    };
    Some(condition)
}
