use colored::{Color, ColoredString, Colorize};

#[macro_export]
macro_rules! print_success {
    ($fmt:literal, $($e:tt)*) => {
        use ::colored::Colorize as _;
        println!("{}", format!($fmt, $($e)*).green())
    }
}

pub trait ColorTheme {
    fn color(&self) -> Color;
}

impl ColorTheme for log::Level {
    fn color(&self) -> Color {
        use log::Level::*;
        match self {
            Error => Color::BrightRed,
            Warn => Color::BrightYellow,
            Info => Color::Cyan,
            Debug => Color::Magenta,
            Trace => Color::Blue,
        }
    }
}

/// Log level label padded to a fixed width, e.g. `[WARN ]`.
pub fn level_badge(level: log::Level) -> ColoredString {
    format!("[{:<5}]", level).color(level.color()).bold()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn badge_has_fixed_width() {
        colored::control::set_override(false);
        assert_eq!(level_badge(log::Level::Warn).to_string(), "[WARN ]");
        assert_eq!(level_badge(log::Level::Error).to_string(), "[ERROR]");
    }
}
