use std::path::{Path, PathBuf};

pub fn replace_homedir_to_tilde(path: impl Into<PathBuf>) -> PathBuf {
    let path = path.into();
    let Some(home_dir) = ::dirs::home_dir() else {
        return path
    };
    path.strip_prefix(home_dir)
        .map(|path| Path::new("~").join(path))
        .unwrap_or(path)
}

/// Shown while the browser is open; the username is not on the clipboard.
pub fn login_prompt(username: &str) -> String {
    format!(
        "Sign in as '{}' (password is on the clipboard). Press ENTER when signed in... ",
        username
    )
}

/// Blocks until the user hits ENTER.
pub fn wait_for_enter(prompt: &str) -> std::io::Result<()> {
    eprint!("{}", prompt);
    std::io::stdin().read_line(&mut String::new()).map(|_| ())
}
