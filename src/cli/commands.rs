use clap::Parser;

/// Arguments accepted by the binary. The task list lives in the working
/// directory, so there is nothing to configure beyond `--help` and `--version`.
#[derive(Parser)]
#[command(
    name = "tasky",
    about = concat!("tasky v", env!("CARGO_PKG_VERSION"), " - a personal task list for the terminal"),
    version
)]
pub struct Cli {}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn rejects_unknown_arguments() {
        assert!(Cli::try_parse_from(["tasky"]).is_ok());
        assert!(Cli::try_parse_from(["tasky", "add"]).is_err());
        assert!(Cli::try_parse_from(["tasky", "--json"]).is_err());
    }
}
