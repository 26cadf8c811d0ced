use std::path::PathBuf;

use clap::Parser;
use nodescript::resolve::CliOptions;

/// NodeScript - compile .ns sources to JavaScript
#[derive(Parser, Debug)]
#[command(name = "nodescript")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:
  $ nodescript
  $ nodescript script.ns
  $ nodescript --print script.ns
  $ nodescript --watch script.ns --output script.js
  $ nodescript --watch src --output lib
")]
pub struct Cli {
    /// Evaluate a string of NodeScript source
    #[arg(short, long)]
    pub eval: bool,

    /// Print the compiled file instead of writing it
    #[arg(short, long)]
    pub print: bool,

    /// Compile input file/directory into output file/directory
    #[arg(short, long)]
    pub output: bool,

    /// Watch file/directory for changes
    #[arg(short, long)]
    pub watch: bool,

    /// Input and output paths
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

impl Cli {
    /// The option set handed to the resolver
    pub fn to_options(&self) -> CliOptions {
        CliOptions {
            eval: self.eval,
            print: self.print,
            output: self.output,
            watch: self.watch,
            paths: self.paths.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_bare() {
        let cli = Cli::try_parse_from(["nodescript"]).unwrap();
        assert!(!cli.eval && !cli.print && !cli.output && !cli.watch);
        assert!(cli.paths.is_empty());
    }

    #[test]
    fn test_cli_parse_single_script() {
        let cli = Cli::try_parse_from(["nodescript", "script.ns"]).unwrap();
        assert_eq!(cli.paths, vec![PathBuf::from("script.ns")]);
    }

    #[test]
    fn test_cli_parse_output_pair() {
        let cli = Cli::try_parse_from(["nodescript", "--output", "src", "lib"]).unwrap();
        assert!(cli.output);
        assert_eq!(cli.paths, vec![PathBuf::from("src"), PathBuf::from("lib")]);
    }

    #[test]
    fn test_cli_parse_short_flags() {
        let cli = Cli::try_parse_from(["nodescript", "-w", "-o", "src", "lib"]).unwrap();
        assert!(cli.watch);
        assert!(cli.output);
    }

    #[test]
    fn test_cli_parse_flags_interleaved_with_paths() {
        let cli =
            Cli::try_parse_from(["nodescript", "--watch", "script.ns", "--output", "script.js"])
                .unwrap();
        assert!(cli.watch);
        assert!(cli.output);
        assert_eq!(
            cli.paths,
            vec![PathBuf::from("script.ns"), PathBuf::from("script.js")]
        );
    }

    #[test]
    fn test_cli_parse_eval_print() {
        let cli = Cli::try_parse_from(["nodescript", "-e", "-p"]).unwrap();
        assert!(cli.eval);
        assert!(cli.print);
    }

    #[test]
    fn test_to_options_mirrors_flags() {
        let cli = Cli::try_parse_from(["nodescript", "-o", "a.ns", "a.js"]).unwrap();
        let options = cli.to_options();
        assert!(options.output);
        assert!(!options.watch);
        assert_eq!(options.paths.len(), 2);
    }
}
