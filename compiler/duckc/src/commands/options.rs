//! Command-line options shared by every command.

use duck_fmt::FormatConfig;
use duck_types::{AmbiguityPolicy, DetectPolicy, InterfaceOrder};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DriverOptions {
    pub policy: DetectPolicy,
    pub format: FormatConfig,
}

impl DriverOptions {
    /// Split `args` into options and positional arguments.
    ///
    /// Recognized: `--policy=<list>` and `--indent=<n>`.
    pub fn parse(args: &[String]) -> Result<(Self, Vec<&str>), String> {
        let mut options = DriverOptions::default();
        let mut positional = Vec::new();

        for arg in args {
            if let Some(value) = arg.strip_prefix("--policy=") {
                options.policy = parse_policy(value)?;
            } else if let Some(value) = arg.strip_prefix("--indent=") {
                let indent = value
                    .parse::<usize>()
                    .map_err(|_| format!("invalid indent '{value}': expected a number of spaces"))?;
                options.format = FormatConfig::with_indent_size(indent);
            } else if arg.starts_with("--") {
                return Err(format!("unknown option '{arg}'"));
            } else {
                positional.push(arg.as_str());
            }
        }
        Ok((options, positional))
    }
}

/// Parse a comma-separated policy: any of `generic-first`,
/// `non-generic-first`, `first-declared`, `reject`.
pub fn parse_policy(value: &str) -> Result<DetectPolicy, String> {
    let mut policy = DetectPolicy::default();
    for part in value.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        match part {
            "generic-first" => policy.interface_order = InterfaceOrder::GenericFirst,
            "non-generic-first" => policy.interface_order = InterfaceOrder::NonGenericFirst,
            "first-declared" => policy.ambiguity = AmbiguityPolicy::FirstDeclared,
            "reject" => policy.ambiguity = AmbiguityPolicy::Reject,
            other => return Err(format!("unknown policy '{other}'")),
        }
    }
    Ok(policy)
}
