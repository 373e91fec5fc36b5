const PROGNAME: &str = env!("CARGO_PKG_NAME");

/// Usage text printed for `-h`/`--help`.
pub fn help_text() -> String {
    format!(
        "Usage: {PROGNAME} [-h] [-b[ ][BACK]] [-o] [-v] [-k]

Prints the alt text for the most recent XKCD comic.

Options:
  -h, --help          Print this usage and exit
  -V, --version       Print version information and exit

  -b[ ][BACK], --back[=][BACK]
                      Print alt text for the bth previous XKCD strip. If
                      not given a value, implicitly sets b=1.

  -o, --one-line      Print alt text and attestation on one line.
  -v, --verbose       Allow the HTTP client to print what's going on to
                      stderr. Useful for debugging or satisfying curiosity.
  -k, --insecure      Skip verification of the server's SSL certificate. Try
                      not to specify this."
    )
}

/// Version line printed for `-V`/`--version`.
pub fn version_text() -> String {
    let build = if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    };
    format!(
        "{PROGNAME} {} ({build}, {} {}) reqwest rustls",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::ARCH,
        std::env::consts::OS,
    )
}
