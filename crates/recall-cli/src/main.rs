use clap::Parser;
use recall_cli::{Cli, run};

fn main() {
    // Search output is routinely piped into `head`; restore the default
    // SIGPIPE disposition so that exits quietly instead of panicking.
    #[cfg(unix)]
    reset_sigpipe();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
