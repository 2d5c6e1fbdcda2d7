use clap::Parser;

/// Generic function to get an environment variable, parsing it to the desired type.
pub fn get_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

/// Parses the command line arguments.
///
/// Android launches the app without arguments, so every option needs a
/// default (or an environment fallback) to be usable there.
pub fn parse_args<T: Parser>() -> Result<T, clap::Error> {
    T::try_parse()
}

/// Like [`parse_args`], but `--help`, `--version` and invalid arguments
/// print clap's message and exit the process.
pub fn parse_args_or_exit<T: Parser>() -> T {
    match parse_args::<T>() {
        Ok(args) => args,
        Err(e) => e.exit(),
    }
}
