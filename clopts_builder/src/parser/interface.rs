/// The output channel (the "logger") of the options: help, version and error messages all go through here.
pub trait UserInterface {
    /// Print an informational line.
    fn print(&self, message: String);

    /// Print a warning line.
    fn print_warning(&self, message: String);

    /// Print an error line.
    fn print_error(&self, message: String);
}

/// Prints to stdout/stderr.
#[derive(Debug, Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_warning(&self, message: String) {
        eprintln!("{message}");
    }

    fn print_error(&self, message: String) {
        eprintln!("{message}");
    }
}

/// Wrap the `paragraph` into lines of at most `width` characters, hyphenating words that don't fit on a line.
pub(crate) fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if word.is_empty() {
            continue;
        }

        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + word.chars().count() < width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    // Leave room for the hyphen.
    let increment = std::cmp::max(width, 2) - 1;
    let characters: Vec<char> = word.chars().collect();
    let mut left = 0;

    while left + increment + 1 < characters.len() {
        let part: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{part}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}

#[cfg(test)]
pub(crate) mod util {
    use crate::parser::UserInterface;
    use std::cell::RefCell;

    #[derive(Debug, PartialEq, Eq)]
    pub(crate) enum Line {
        Message(String),
        Warning(String),
        Error(String),
    }

    #[derive(Default)]
    pub(crate) struct InMemoryInterface {
        lines: RefCell<Vec<Line>>,
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            self.lines.borrow_mut().push(Line::Message(message));
        }

        fn print_warning(&self, message: String) {
            self.lines.borrow_mut().push(Line::Warning(message));
        }

        fn print_error(&self, message: String) {
            self.lines.borrow_mut().push(Line::Error(message));
        }
    }

    impl InMemoryInterface {
        /// Take every line printed so far.
        pub(crate) fn drain(&self) -> Vec<Line> {
            std::mem::take(&mut *self.lines.borrow_mut())
        }

        /// Take the messages printed so far, asserting no warnings/errors were printed.
        pub(crate) fn consume_message(&self) -> String {
            self.drain()
                .into_iter()
                .map(|line| match line {
                    Line::Message(message) => message,
                    other => panic!("unexpected line: {other:?}"),
                })
                .collect::<Vec<String>>()
                .join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", 10, vec![])]
    #[case("abc", 10, vec!["abc"])]
    #[case("abc def", 7, vec!["abc def"])]
    #[case("abc def", 6, vec!["abc", "def"])]
    #[case("abc  def ", 10, vec!["abc def"])]
    #[case("abcdefghij", 5, vec!["abcd-", "efgh-", "ij"])]
    #[case("ab abcdefghij", 5, vec!["ab", "abcd-", "efgh-", "ij"])]
    #[case("abcde", 5, vec!["abcde"])]
    #[case("äöüäöü", 4, vec!["äöü-", "äöü"])]
    fn chunk_paragraph(#[case] paragraph: &str, #[case] width: usize, #[case] expected: Vec<&str>) {
        assert_eq!(chunk(paragraph, width), expected);
    }
}
