use std::io::Write as _;

use bear_cli::cmd::GlobalArgs;
use bear_core::style::level_badge;
use clap::Parser;

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format(|buf, record| writeln!(buf, "{} {}", level_badge(record.level()), record.args()))
        .init();
}

#[tokio::main]
async fn main() {
    init_logger();

    let app = GlobalArgs::parse();
    app.exec_subcmd().await.unwrap_or_else(|e| {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    });
}
