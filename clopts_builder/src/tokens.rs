use std::path::Path;

/// The command line, split into leading positional tokens and flag tokens with their values.
///
/// ### Example
/// ```
/// # use clopts_builder as clopts;
/// use clopts::RawInput;
///
/// let input = RawInput::from_tokens(["server", "hello", "--port", "8080", "-v"]);
///
/// assert_eq!(input.command(), "server");
/// assert_eq!(input.entries(), &["hello".to_string()]);
/// assert_eq!(input.options()[0], ("--port".to_string(), vec!["8080".to_string()]));
/// assert_eq!(input.options()[1], ("-v".to_string(), vec![]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    command: String,
    entries: Vec<String>,
    options: Vec<(String, Vec<String>)>,
}

impl RawInput {
    /// Build the input directly from its parts.
    pub fn new(
        command: impl Into<String>,
        entries: Vec<String>,
        options: Vec<(String, Vec<String>)>,
    ) -> Self {
        Self {
            command: command.into(),
            entries,
            options,
        }
    }

    /// Split the `tokens` (the first being the program itself).
    ///
    /// A token starting with `-` is a flag; bare tokens before any flag are entries, and bare tokens after
    /// a flag are its values.
    /// A repeated flag keeps collecting into its first occurrence.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = tokens.into_iter().map(Into::into);
        let command = tokens.next().unwrap_or_default();
        let mut entries = Vec::default();
        let mut options: Vec<(String, Vec<String>)> = Vec::default();
        let mut current: Option<usize> = None;

        for token in tokens {
            if token.starts_with('-') {
                let index = match options.iter().position(|(flag, _)| flag == &token) {
                    Some(index) => index,
                    None => {
                        options.push((token, Vec::default()));
                        options.len() - 1
                    }
                };
                current.replace(index);
                continue;
            }

            match current {
                Some(index) => options[index].1.push(token),
                None => entries.push(token),
            }
        }

        Self {
            command,
            entries,
            options,
        }
    }

    /// Split the process arguments, see [`RawInput::from_tokens`].
    pub fn from_env() -> Self {
        Self::from_tokens(std::env::args())
    }

    /// The program, as it was invoked.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The program's file stem (ex: `/usr/bin/server.exe` becomes `server`).
    pub fn command_name(&self) -> String {
        Path::new(&self.command)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The positional tokens preceding the first flag.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Each flag token (as typed), with the values which followed it.
    pub fn options(&self) -> &[(String, Vec<String>)] {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn empty() {
        let input = RawInput::from_tokens(Vec::<&str>::default());
        assert_eq!(input, RawInput::default());
    }

    #[rstest]
    #[case(vec!["p"], vec![], vec![])]
    #[case(vec!["p", "a", "b"], vec!["a", "b"], vec![])]
    #[case(vec!["p", "--flag"], vec![], vec![("--flag", vec![])])]
    #[case(vec!["p", "a", "-x", "1", "2", "--y"], vec!["a"], vec![("-x", vec!["1", "2"]), ("--y", vec![])])]
    #[case(vec!["p", "-x", "1", "--y", "2", "-x", "3"], vec![], vec![("-x", vec!["1", "3"]), ("--y", vec!["2"])])]
    #[case(vec!["p", "-1", "a"], vec![], vec![("-1", vec!["a"])])]
    fn from_tokens(
        #[case] tokens: Vec<&str>,
        #[case] entries: Vec<&str>,
        #[case] options: Vec<(&str, Vec<&str>)>,
    ) {
        let input = RawInput::from_tokens(tokens);
        assert_eq!(input.command(), "p");
        assert_eq!(input.entries(), strings(&entries).as_slice());
        assert_eq!(
            input.options(),
            options
                .into_iter()
                .map(|(flag, values)| (flag.to_string(), strings(&values)))
                .collect::<Vec<_>>()
                .as_slice()
        );
    }

    #[rstest]
    #[case("server", "server")]
    #[case("/usr/local/bin/server", "server")]
    #[case("target/debug/server.exe", "server")]
    #[case("", "")]
    fn command_name(#[case] command: &str, #[case] expected: &str) {
        let input = RawInput::new(command, Vec::default(), Vec::default());
        assert_eq!(input.command_name(), expected);
    }
}
