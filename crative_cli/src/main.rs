// CLI entry point for the Crative challenge engine.
//
// Drives `crative_core` headless: lists the standard levels, prints a
// level's starting grid, and judges grid snapshots saved as JSON. See
// `args.rs` for parsing and `commands.rs` for the commands themselves.
//
// Usage:
//   crative list [--config PATH]
//   crative seed <LEVEL> [--config PATH]
//   crative check <GRID.json> [--level LEVEL] [--config PATH]
//   crative verify <GRID.json>... [--config PATH]
//   crative groups <GRID.json>
//
// Exit codes: 0 pass, 2 fail, 1 error. Logging goes through `env_logger`
// (`RUST_LOG`, default `warn`).

mod args;
mod commands;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match args::parse(&argv) {
        Ok(invocation) => invocation,
        Err(message) => {
            eprintln!("{message}");
            args::print_usage();
            std::process::exit(commands::EXIT_ERROR);
        }
    };

    match commands::run(invocation) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(commands::EXIT_ERROR);
        }
    }
}
