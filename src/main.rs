use clap::{Parser as ClapParser, Subcommand};
use dotsel::cli::{self, CliError, ExecuteOptions, Operation, ValueType};
use dotsel::{to_json, to_json_pretty};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "dotsel")]
#[command(about = "dotsel - select, put and delete values in JSON documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value addressed by a selector
    Select {
        /// Selector, e.g. '.users.(name=x).age'
        selector: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Write a value, creating any missing steps
    Put {
        /// Selector of the value to write
        selector: String,

        /// The value to write
        value: String,

        /// How to read the value: string, int, float, bool or json
        #[arg(short = 't', long = "type", default_value = "string")]
        value_type: ValueType,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Remove the value addressed by a selector
    Delete {
        /// Selector of the value to remove
        selector: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let (selector, input, pretty, operation) = match cli.command {
        Commands::Select {
            selector,
            input,
            pretty,
        } => (selector, input, pretty, Operation::Select),
        Commands::Put {
            selector,
            value,
            value_type,
            input,
            pretty,
        } => (selector, input, pretty, Operation::Put { value, value_type }),
        Commands::Delete {
            selector,
            input,
            pretty,
        } => (selector, input, pretty, Operation::Delete),
    };

    if let Err(e) = run(selector, input, pretty, operation) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(
    selector: String,
    input: Option<String>,
    pretty: bool,
    operation: Operation,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = ExecuteOptions {
        selector,
        input,
        operation,
    };

    let output = cli::execute(&options)?;
    if pretty {
        println!("{}", to_json_pretty(&output));
    } else {
        println!("{}", to_json(&output));
    }
    Ok(())
}
