use nu_ansi_term::{Color, Style};
use reedline::StyledText;
use remexpr_core::lexer::{Cursor, TokenBuffer, is_ident_char, is_space, next_token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Plain,
    Number,
    String,
    Date,
    Function,
    SysVar,
    Variable,
    Invalid,
}

impl Class {
    fn style(self) -> Style {
        let fg = match self {
            Class::Plain => Color::White,
            Class::Number | Class::Date => Color::Cyan,
            Class::String => Color::Green,
            Class::Function => Color::Blue,
            Class::SysVar => Color::Yellow,
            Class::Variable => Color::Red,
            Class::Invalid => return Style::new().fg(Color::Red).underline(),
        };
        Style::new().fg(fg)
    }

    fn of(token: &str) -> Class {
        let Some(first) = token.chars().next() else {
            return Class::Plain;
        };
        match first {
            '"' => Class::String,
            '\'' => Class::Date,
            '$' => Class::SysVar,
            _ if token.len() > 1 && token.ends_with('(') => Class::Function,
            c if c.is_ascii_digit() => Class::Number,
            c if is_ident_char(c) => Class::Variable,
            _ => Class::Plain,
        }
    }
}

/// Colors a line using the same tokenizer the evaluator reads.
pub struct Highlighter {
    time_sep: char,
}

impl Highlighter {
    pub fn new(time_sep: char) -> Self {
        Self { time_sep }
    }

    fn spans(&self, line: &str) -> Vec<(Class, usize, usize)> {
        let mut spans = Vec::new();
        let mut cursor = Cursor::new(line);
        let mut buf = TokenBuffer::new();

        loop {
            cursor.skip_whitespace();
            let start = cursor.position();
            match next_token(&mut cursor, &mut buf, self.time_sep) {
                Ok(()) if buf.is_empty() => break,
                Ok(()) => {
                    // Identifier tokens swallow the whitespace after them.
                    let text = line[start..cursor.position()].trim_end_matches(is_space);
                    spans.push((Class::of(buf.as_str()), start, start + text.len()));
                }
                Err(_) => {
                    spans.push((Class::Invalid, start, line.len()));
                    break;
                }
            }
        }
        spans
    }
}

impl reedline::Highlighter for Highlighter {
    fn highlight(&self, line: &str, _: usize) -> StyledText {
        let mut output = StyledText::new();
        let mut curr_end = 0;

        for (class, start, end) in self.spans(line) {
            if start > curr_end {
                output.push((Style::new(), line[curr_end..start].to_string()));
            }
            output.push((class.style(), line[start..end].to_string()));
            curr_end = end;
        }

        if curr_end < line.len() {
            output.push((Style::new(), line[curr_end..].to_string()));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(line: &str) -> Vec<(Class, &str)> {
        Highlighter::new(':')
            .spans(line)
            .into_iter()
            .map(|(class, start, end)| (class, &line[start..end]))
            .collect()
    }

    #[test]
    fn test_token_classes() {
        assert_eq!(
            classes(r#"max(x, 12:30) + "a" * $DateSep"#),
            vec![
                (Class::Function, "max("),
                (Class::Variable, "x"),
                (Class::Plain, ","),
                (Class::Number, "12:30"),
                (Class::Plain, ")"),
                (Class::Plain, "+"),
                (Class::String, "\"a\""),
                (Class::Plain, "*"),
                (Class::SysVar, "$DateSep"),
            ]
        );
    }

    #[test]
    fn test_date_literal() {
        assert_eq!(classes("'2024-01-01'"), vec![(Class::Date, "'2024-01-01'")]);
    }

    #[test]
    fn test_unterminated_literal_marks_rest_invalid() {
        assert_eq!(
            classes("1 + \"abc"),
            vec![
                (Class::Number, "1"),
                (Class::Plain, "+"),
                (Class::Invalid, "\"abc"),
            ]
        );
    }

    #[test]
    fn test_highlight_keeps_every_byte() {
        let line = "  abs( -3 )  + 'x";
        let styled = reedline::Highlighter::highlight(&Highlighter::new(':'), line, 0);
        let text: String = styled.buffer.iter().map(|(_, s)| s.as_str()).collect();
        assert_eq!(text, line);
    }
}
