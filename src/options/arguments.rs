//! Ordered storage of validated command-line flags.

use std::fmt;

/// Serialized value of a value flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// Emitted as `--name value`.
    Single(String),
    /// Emitted as `--name value` once per entry.
    Repeated(Vec<String>),
}

/// Validated flags for one camera tool invocation.
///
/// Boolean flags and value flags are kept apart, each in insertion order.
/// Setting a flag that already exists replaces its value in place, so the
/// argument list stays stable however often a setter is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CameraSettings {
    booleans: Vec<(&'static str, bool)>,
    values: Vec<(&'static str, ArgValue)>,
}

impl CameraSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a bare flag such as `--vflip`. Only `true` flags are emitted.
    pub fn set_flag(&mut self, name: &'static str, enabled: bool) {
        match self.booleans.iter_mut().find(|(flag, _)| *flag == name) {
            Some(entry) => entry.1 = enabled,
            None => self.booleans.push((name, enabled)),
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.booleans
            .iter()
            .find(|(flag, _)| *flag == name)
            .map(|(_, enabled)| *enabled)
    }

    /// Set a flag that carries a value, e.g. `--contrast 50`.
    pub fn set_value(&mut self, name: &'static str, value: impl fmt::Display) {
        self.insert_value(name, ArgValue::Single(value.to_string()));
    }

    /// Set a flag that is repeated once per entry, e.g. `--exif`.
    pub fn set_repeated(&mut self, name: &'static str, entries: Vec<String>) {
        self.insert_value(name, ArgValue::Repeated(entries));
    }

    fn insert_value(&mut self, name: &'static str, value: ArgValue) {
        match self.values.iter_mut().find(|(flag, _)| *flag == name) {
            Some(entry) => entry.1 = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn value(&self, name: &str) -> Option<&ArgValue> {
        self.values
            .iter()
            .find(|(flag, _)| *flag == name)
            .map(|(_, value)| value)
    }

    pub fn remove_value(&mut self, name: &str) -> Option<ArgValue> {
        let index = self.values.iter().position(|(flag, _)| *flag == name)?;
        Some(self.values.remove(index).1)
    }

    /// Build the argument list: enabled boolean flags first, then value flags.
    pub fn to_args(&self) -> Vec<String> {
        self.to_command("").args
    }

    /// Build the invocation of `program` with the current flags.
    pub fn to_command(&self, program: &str) -> CameraCommand {
        let mut command = CameraCommand::new(program);

        for (name, enabled) in &self.booleans {
            if *enabled {
                command = command.with_flag(name);
            }
        }

        for (name, value) in &self.values {
            match value {
                ArgValue::Single(value) => command = command.with_value(name, value),
                ArgValue::Repeated(entries) => {
                    for entry in entries {
                        command = command.with_value(name, entry);
                    }
                }
            }
        }

        command
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgKind {
    Flag,
    Value,
}

/// A fully built camera tool invocation.
///
/// Each argument remembers whether it is a flag or a value, so a value that
/// happens to start with `--` is never mistaken for a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraCommand {
    program: String,
    args: Vec<String>,
    kinds: Vec<ArgKind>,
}

impl CameraCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            kinds: Vec::new(),
        }
    }

    /// Append a bare `--name` flag.
    pub fn with_flag(mut self, name: &str) -> Self {
        self.push(format!("--{name}"), ArgKind::Flag);
        self
    }

    /// Append `--name value`.
    pub fn with_value(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.push(format!("--{name}"), ArgKind::Flag);
        self.push(value.to_string(), ArgKind::Value);
        self
    }

    /// Append a positional argument.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.push(arg.into(), ArgKind::Value);
        self
    }

    fn push(&mut self, arg: String, kind: ArgKind) {
        self.args.push(arg);
        self.kinds.push(kind);
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether `flag` (without the leading dashes) is present.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.args
            .iter()
            .zip(&self.kinds)
            .any(|(arg, kind)| *kind == ArgKind::Flag && arg.strip_prefix("--") == Some(flag))
    }

    /// Value following the first occurrence of `--flag`.
    pub fn value_of<'a>(&'a self, flag: &'a str) -> Option<&'a str> {
        self.values_of(flag).next()
    }

    /// Values following every occurrence of `--flag`.
    pub fn values_of<'a>(&'a self, flag: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        (1..self.args.len())
            .filter(move |&i| {
                self.kinds[i - 1] == ArgKind::Flag
                    && self.kinds[i] == ArgKind::Value
                    && self.args[i - 1].strip_prefix("--") == Some(flag)
            })
            .map(move |i| self.args[i].as_str())
    }
}

/// Renders the command as a shell line with single-quoted values,
/// e.g. `raspistill --vflip --contrast '50' --output 'pic.jpg'`.
impl fmt::Display for CameraCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for (arg, kind) in self.args.iter().zip(&self.kinds) {
            match kind {
                ArgKind::Flag => write!(f, " {arg}")?,
                ArgKind::Value => write!(f, " '{}'", arg.replace('\'', r"'\''"))?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booleans_precede_values() {
        let mut settings = CameraSettings::new();
        settings.set_value("contrast", 50);
        settings.set_flag("vflip", true);
        settings.set_value("ISO", 500);
        settings.set_flag("hflip", true);

        assert_eq!(
            settings.to_args(),
            ["--vflip", "--hflip", "--contrast", "50", "--ISO", "500"]
        );
    }

    #[test]
    fn test_false_flags_are_not_emitted() {
        let mut settings = CameraSettings::new();
        settings.set_flag("vflip", true);
        settings.set_flag("vflip", false);

        assert_eq!(settings.flag("vflip"), Some(false));
        assert!(settings.to_args().is_empty());
    }

    #[test]
    fn test_resetting_keeps_position() {
        let mut settings = CameraSettings::new();
        settings.set_value("sharpness", 10);
        settings.set_value("contrast", 20);
        settings.set_value("sharpness", -10);

        assert_eq!(
            settings.to_args(),
            ["--sharpness", "-10", "--contrast", "20"]
        );
    }

    #[test]
    fn test_repeated_values() {
        let mut settings = CameraSettings::new();
        settings.set_repeated("exif", vec!["a=1".to_owned(), "b=2".to_owned()]);

        assert_eq!(settings.to_args(), ["--exif", "a=1", "--exif", "b=2"]);
    }

    #[test]
    fn test_remove_value() {
        let mut settings = CameraSettings::new();
        settings.set_value("timeout", 5000);
        assert_eq!(
            settings.remove_value("timeout"),
            Some(ArgValue::Single("5000".to_owned()))
        );
        assert!(settings.value("timeout").is_none());
        assert!(settings.remove_value("timeout").is_none());
    }

    #[test]
    fn test_command_display_quotes_values() {
        let command = CameraCommand::new("raspistill")
            .with_flag("vflip")
            .with_value("contrast", 50)
            .with_value("output", "it's.jpg");

        assert_eq!(
            command.to_string(),
            r"raspistill --vflip --contrast '50' --output 'it'\''s.jpg'"
        );
    }

    #[test]
    fn test_command_lookup() {
        let command = CameraCommand::new("raspistill")
            .with_flag("raw")
            .with_value("exif", "a=1")
            .with_value("exif", "b=2");

        assert!(command.has_flag("raw"));
        assert!(!command.has_flag("vflip"));
        assert_eq!(command.value_of("exif"), Some("a=1"));
        assert_eq!(command.values_of("exif").collect::<Vec<_>>(), ["a=1", "b=2"]);
    }

    #[test]
    fn test_dashed_values_stay_values() {
        let mut settings = CameraSettings::new();
        settings.set_value("output", "--x.jpg");
        settings.set_value("annotate", "--raw");
        let command = settings.to_command("raspistill");

        assert!(!command.has_flag("x.jpg"));
        assert!(!command.has_flag("raw"));
        assert_eq!(command.value_of("output"), Some("--x.jpg"));
        assert_eq!(command.value_of("x.jpg"), None);
        assert_eq!(
            command.to_string(),
            "raspistill --output '--x.jpg' --annotate '--raw'"
        );
    }

    #[test]
    fn test_lookup_borrows_flag_name_briefly() {
        let command = CameraCommand::new("raspivid").with_value("timeout", 5000);
        let value = {
            let flag = String::from("timeout");
            command.value_of(&flag).map(str::to_owned)
        };
        assert_eq!(value.as_deref(), Some("5000"));
    }
}
