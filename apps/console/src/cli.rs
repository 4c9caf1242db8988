//! Command-line arguments.

use clap::Parser;

/// Interactive console for the game rental store.
#[derive(Parser, Debug, Clone)]
#[command(name = "rental-console", version, about)]
pub struct Args {
    /// Database name
    #[arg(required = true, index = 1)]
    pub dbname: String,

    /// Database server port
    #[arg(required = true, index = 2)]
    pub port: u16,

    /// Database role used to connect
    #[arg(required = true, index = 3)]
    pub user: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_positional_arguments() {
        let args = Args::try_parse_from(["rental-console", "rentals", "5432", "store"]).unwrap();
        assert_eq!(args.dbname, "rentals");
        assert_eq!(args.port, 5432);
        assert_eq!(args.user, "store");
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        assert!(Args::try_parse_from(["rental-console", "rentals", "5432"]).is_err());
        assert!(Args::try_parse_from(["rental-console", "a", "1", "b", "extra"]).is_err());
        assert!(Args::try_parse_from(["rental-console", "rentals", "port", "store"]).is_err());
    }
}
