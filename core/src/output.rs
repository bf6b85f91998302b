use bear_sandbox::EnvMap;
use comfy_table::Table;
use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// `export KEY='value'` lines, ready for `eval`.
    #[default]
    Env,
    Json,
    Table,
}

pub fn render(env: &EnvMap, format: OutputFormat) -> serde_json::Result<String> {
    use OutputFormat::*;
    match format {
        Env => Ok(self::render_exports(env)),
        Json => serde_json::to_string_pretty(env),
        Table => Ok(self::render_table(env)),
    }
}

pub fn render_exports(env: &EnvMap) -> String {
    env.iter()
        .map(|(k, v)| format!("export {}={}\n", k, self::shell_quote(v)))
        .collect()
}

pub fn render_table(env: &EnvMap) -> String {
    let mut table = Table::new();
    table.set_header(vec!["KEY", "VALUE"]);
    for (k, v) in env {
        table.add_row(vec![*k, v.as_str()]);
    }
    table.to_string()
}

/// Quotes `s` for a POSIX shell.
///
/// ```
/// use bear_core::output::shell_quote;
///
/// assert_eq!(shell_quote("abc"), "'abc'");
/// assert_eq!(shell_quote("a$b c"), "'a$b c'");
/// assert_eq!(shell_quote("it's"), r#"'it'\''s'"#);
/// assert_eq!(shell_quote(""), "''");
/// ```
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}
