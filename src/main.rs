use browser_dispatcher::cli::{self, output, Cli};
use browser_dispatcher::logging;
use clap::Parser;
use std::io::IsTerminal;

fn main() {
    // handle broken pipe gracefully (e.g., when piping to `head` or `jq` that exits early)
    reset_sigpipe();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let is_json_output = cli.json || (!cli.no_json && !std::io::stdout().is_terminal());

    if let Err(err) = cli::run(cli) {
        let code = cli::error_code(&err);
        if is_json_output {
            output::print_json_error(code, &format!("{:#}", err));
        } else {
            eprintln!("Error: {:#}", err);
        }
        std::process::exit(code);
    }
}

/// reset SIGPIPE to default behavior (terminate process) instead of panicking
/// this is the standard Unix behavior for CLI tools
fn reset_sigpipe() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
