use itertools::{Itertools, PeekingNext};

use super::{CompileErrorType, Result};

#[derive(PartialEq, Debug)]
pub enum Token {
    Equals,
    Or,
    Nonterminal(String),
    Terminal(String)
}

// Reads a quoted terminal. `\"` and `\\` escape a quote and a backslash
pub fn lex_terminal(line: &mut impl Iterator<Item = char>) -> Result<Token> {
    line.next(); // Consume open quote
    let mut token_text = String::new();

    loop {
        match line.next() {
            Some('"') => return Ok(Token::Terminal(token_text)),
            Some('\\') => match line.next() {
                Some(escaped @ ('"' | '\\')) => token_text.push(escaped),
                Some(other) => {
                    token_text.push('\\');
                    token_text.push(other);
                }
                None => return Err(CompileErrorType::UnmatchedQuote),
            },
            Some(c) => token_text.push(c),
            None => return Err(CompileErrorType::UnmatchedQuote),
        }
    }
}

// Nonterminal names run until whitespace or a character with meaning
pub fn lex_nonterminal(line: &mut impl PeekingNext<Item = char>) -> Result<Token> {
    let name: String = line
        .peeking_take_while(|&c| !c.is_whitespace() && !matches!(c, '=' | '|' | '"' | ';'))
        .collect();
    Ok(Token::Nonterminal(name))
}

pub fn lex_line(line: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(c) = line_chars.peek() {
        match *c {
            // The rest of the line is a comment
            ';' => break,
            '=' => {
                line_chars.next();
                tokens.push(Token::Equals);
            }
            '|' => {
                line_chars.next();
                tokens.push(Token::Or);
            }
            '"' => tokens.push(lex_terminal(&mut line_chars)?),
            c if c.is_whitespace() => {
                line_chars.next();
            }
            _ => tokens.push(lex_nonterminal(&mut line_chars)?),
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    #[test]
    fn lex_normal_terminal() {
        let lines = vec![
            "\"a\" B C",
            "\"b\"",
            "\"x\"\"y\"",
            "\"say \\\"hi\\\"\" rest"
        ];
        // (result from the function, rest of the iterator)
        let answers = vec![
            (Token::Terminal("a".to_string()), " B C"),
            (Token::Terminal("b".to_string()), ""),
            (Token::Terminal("x".to_string()), "\"y\""),
            (Token::Terminal("say \"hi\"".to_string()), " rest")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_terminal(&mut chars).unwrap(), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_mismatched_terminal() {
        let lines = vec![
            "\"welcome",
            "\"alpha bravo charlie",
            "\"dangling\\"
        ];

        for line in lines {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_terminal(&mut chars).unwrap_err(), CompileErrorType::UnmatchedQuote);
        }
    }

    #[test]
    fn lex_normal_nonterminal() {
        let lines = vec![
            "NP VP",
            "S",
            "A|B",
            "Det=\"the\""
        ];
        // (result from the function, rest of the iterator)
        let answers = vec![
            (Token::Nonterminal("NP".to_string()), " VP"),
            (Token::Nonterminal("S".to_string()), ""),
            (Token::Nonterminal("A".to_string()), "|B"),
            (Token::Nonterminal("Det".to_string()), "=\"the\"")
        ];

        for (line, (answer_token, answer_rest)) in zip(lines, answers) {
            let mut chars = line.chars().peekable();
            assert_eq!(lex_nonterminal(&mut chars).unwrap(), answer_token);
            assert_eq!(chars.collect::<String>(), answer_rest);
        }
    }

    #[test]
    fn lex_normal_line() {
        let lines = vec![
            "S = A B | B C",
            "A=B A|\"a\" ; trailing comment",
            "Det = \"the\" | \"a;b\""
        ];
        let answers = vec![
            vec![
                Token::Nonterminal("S".to_string()),
                Token::Equals,
                Token::Nonterminal("A".to_string()),
                Token::Nonterminal("B".to_string()),
                Token::Or,
                Token::Nonterminal("B".to_string()),
                Token::Nonterminal("C".to_string())
            ],
            vec![
                Token::Nonterminal("A".to_string()),
                Token::Equals,
                Token::Nonterminal("B".to_string()),
                Token::Nonterminal("A".to_string()),
                Token::Or,
                Token::Terminal("a".to_string())
            ],
            vec![
                Token::Nonterminal("Det".to_string()),
                Token::Equals,
                Token::Terminal("the".to_string()),
                Token::Or,
                Token::Terminal("a;b".to_string())
            ]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(lex_line(line).unwrap(), answer)
        }
    }

    #[test]
    fn lex_comment_line() {
        assert_eq!(lex_line("; nothing here"), Ok(vec![]));
    }
}
