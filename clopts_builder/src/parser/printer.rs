use terminal_size::{terminal_size, Width};

use crate::matcher::{NameResolutionError, OptionRegistry};
use crate::parser::interface::{chunk, UserInterface};

// The indentation of lines under a heading.
const INDENT: &str = "  ";
// The narrowest the description column may wrap to; beyond that, rows are left unwrapped.
const MINIMUM_DETAIL_WIDTH: usize = 17;

pub(crate) struct Printer {
    command: String,
    show_type: bool,
    show_default: bool,
    version: Option<String>,
    terminal_width: Option<usize>,
}

struct Row {
    name: String,
    short: String,
    label: &'static str,
    detail: String,
}

impl Printer {
    pub(crate) fn terminal(
        command: String,
        show_type: bool,
        show_default: bool,
        version: Option<String>,
    ) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(command, show_type, show_default, version, terminal_width)
    }

    pub(crate) fn new(
        command: String,
        show_type: bool,
        show_default: bool,
        version: Option<String>,
        terminal_width: Option<usize>,
    ) -> Self {
        Self {
            command,
            show_type,
            show_default,
            version,
            terminal_width,
        }
    }

    pub(crate) fn print_usage(&self, registry: &OptionRegistry, user_interface: &dyn UserInterface) {
        user_interface.print("Usage:".to_string());

        let mut parts = vec![self.command.clone()];
        let entries: Vec<String> = registry
            .entries()
            .values()
            .map(|name| format!("[{name}]"))
            .collect();

        if !entries.is_empty() {
            parts.push(entries.join(" "));
        }

        parts.push("<options>".to_string());
        user_interface.print(format!("{INDENT}{}", parts.join(" ")));
    }

    /// Print the options named by `names` (as names or tokens), or every option when `names` is empty.
    /// Nothing is printed if any of the names cannot be resolved.
    pub(crate) fn print_options(
        &self,
        registry: &OptionRegistry,
        names: &[impl AsRef<str>],
        user_interface: &dyn UserInterface,
    ) -> Result<(), NameResolutionError> {
        let names: Vec<&str> = if names.is_empty() {
            registry.specs().map(|spec| spec.name()).collect()
        } else {
            names
                .iter()
                .map(|name| registry.resolve_token(name.as_ref()))
                .collect::<Result<_, _>>()?
        };

        let mut rows = Vec::default();

        for name in names {
            let spec = registry.get(name)?;
            let mut detail = Vec::default();

            if let Some(description) = spec.description() {
                detail.push(description.to_string());
            }

            if self.show_default && !spec.required() {
                detail.push(format!("(default: {})", spec.value()));
            }

            rows.push(Row {
                name: format!("--{name}"),
                short: spec
                    .short()
                    .as_assigned()
                    .map(|short| format!("-{short}"))
                    .unwrap_or_default(),
                label: spec.type_tag().label(),
                detail: detail.join(" "),
            });
        }

        let name_width = column_width(rows.iter().map(|row| row.name.as_str()));
        let short_width = column_width(rows.iter().map(|row| row.short.as_str()));
        let label_width = column_width(rows.iter().map(|row| row.label));

        user_interface.print("Options:".to_string());

        for row in rows {
            let mut left = format!(
                "{INDENT}{:name_width$} {:short_width$}",
                row.name, row.short
            );

            if self.show_type {
                left.push_str(&format!(" {:label_width$}", row.label));
            }

            for line in self.wrap(left, &row.detail) {
                user_interface.print(line);
            }
        }

        Ok(())
    }

    fn wrap(&self, left: String, detail: &str) -> Vec<String> {
        let left_width = left.chars().count() + 1;
        let available = self
            .terminal_width
            .map(|width| width.saturating_sub(left_width))
            .filter(|available| *available >= MINIMUM_DETAIL_WIDTH);

        match available {
            Some(available) if detail.chars().count() > available => {
                let padding = " ".repeat(left_width);
                chunk(detail, available)
                    .into_iter()
                    .enumerate()
                    .map(|(i, part)| {
                        if i == 0 {
                            format!("{left} {part}")
                        } else {
                            format!("{padding}{part}")
                        }
                    })
                    .collect()
            }
            _ => vec![format!("{left} {detail}").trim_end().to_string()],
        }
    }

    pub(crate) fn print_version(&self, user_interface: &dyn UserInterface) {
        match &self.version {
            Some(version) => user_interface.print(format!("version: {version}")),
            None => user_interface.print("version is undefined.".to_string()),
        }
    }
}

fn column_width<'a>(cells: impl Iterator<Item = &'a str>) -> usize {
    cells.map(|cell| cell.chars().count()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Declaration;
    use crate::parser::util::InMemoryInterface;

    fn registry() -> OptionRegistry {
        OptionRegistry::new([
            (
                "port".to_string(),
                Declaration::new(3000).description("The port."),
            ),
            (
                "message".to_string(),
                Declaration::new("hello")
                    .entry(1)
                    .description("The message."),
            ),
            ("tags".to_string(), Declaration::new(vec!["a", "b"])),
        ])
        .unwrap()
    }

    fn printer(show_type: bool, show_default: bool, terminal_width: Option<usize>) -> Printer {
        Printer::new(
            "program".to_string(),
            show_type,
            show_default,
            Some("1.2.3".to_string()),
            terminal_width,
        )
    }

    #[test]
    fn print_usage() {
        // Setup
        let printer = printer(true, true, None);
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_usage(&registry(), &interface);

        // Verify
        assert_eq!(
            interface.consume_message(),
            r#"Usage:
  program [message] <options>"#
        );
    }

    #[test]
    fn print_usage_entries() {
        // Setup
        let printer = printer(true, true, None);
        let registry = OptionRegistry::new([
            ("c".to_string(), Declaration::new("x").entry(4)),
            ("a".to_string(), Declaration::new("x").entry(1)),
            ("b".to_string(), Declaration::new("x").entry(2)),
        ])
        .unwrap();
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_usage(&registry, &interface);

        // Verify
        assert_eq!(
            interface.consume_message(),
            r#"Usage:
  program [a] [b] [c] <options>"#
        );
    }

    #[test]
    fn print_usage_no_entries() {
        // Setup
        let printer = printer(true, true, None);
        let registry = OptionRegistry::new(Vec::default()).unwrap();
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_usage(&registry, &interface);

        // Verify
        assert_eq!(
            interface.consume_message(),
            r#"Usage:
  program <options>"#
        );
    }

    #[test]
    fn print_options_all() {
        // Setup
        let printer = printer(true, true, None);
        let interface = InMemoryInterface::default();

        // Execute
        printer
            .print_options(&registry(), &[] as &[&str], &interface)
            .unwrap();

        // Verify
        assert_eq!(
            interface.consume_message(),
            r#"Options:
  --help    -h boolean Print this message. (default: false)
  --message -m string  The message.
  --port    -p number  The port. (default: 3000)
  --tags    -t array   (default: [a, b])
  --version -v boolean Print the project version. (default: false)"#
        );
    }

    #[test]
    fn print_options_named() {
        // Setup
        let printer = printer(false, false, None);
        let interface = InMemoryInterface::default();

        // Execute
        printer
            .print_options(&registry(), &["-p", "tags"], &interface)
            .unwrap();

        // Verify
        assert_eq!(
            interface.consume_message(),
            r#"Options:
  --port -p The port.
  --tags -t"#
        );
    }

    #[test]
    fn print_options_wrapped() {
        // Setup
        let printer = printer(true, true, Some(40));
        let interface = InMemoryInterface::default();

        // Execute
        printer
            .print_options(&registry(), &["help"], &interface)
            .unwrap();

        // Verify
        assert_eq!(
            interface.consume_message(),
            r#"Options:
  --help -h boolean Print this message.
                    (default: false)"#
        );
    }

    #[test]
    fn print_options_too_narrow() {
        // Setup
        let printer = printer(true, true, Some(20));
        let interface = InMemoryInterface::default();

        // Execute
        printer
            .print_options(&registry(), &["help"], &interface)
            .unwrap();

        // Verify
        assert_eq!(
            interface.consume_message(),
            r#"Options:
  --help -h boolean Print this message. (default: false)"#
        );
    }

    #[test]
    fn print_options_unknown() {
        // Setup
        let printer = printer(true, true, None);
        let interface = InMemoryInterface::default();

        // Execute
        let error = printer
            .print_options(&registry(), &["port", "--bogus"], &interface)
            .unwrap_err();

        // Verify
        assert_eq!(
            error,
            NameResolutionError::UnknownToken("--bogus".to_string())
        );
        assert!(interface.drain().is_empty());
    }

    #[test]
    fn print_version() {
        // Setup
        let interface = InMemoryInterface::default();

        // Execute
        printer(true, true, None).print_version(&interface);
        Printer::new("program".to_string(), true, true, None, None).print_version(&interface);

        // Verify
        assert_eq!(
            interface.consume_message(),
            r#"version: 1.2.3
version is undefined."#
        );
    }
}
