//! formforge CLI - Form code generator
//!
//! Commands:
//! - `formforge generate` - Generate a project archive or directory
//! - `formforge preview` - List generated files or print one of them
//! - `formforge check` - Validate a form definition and report warnings
//! - `formforge sql` - Print the SQL schema for a form

use clap::{Parser, Subcommand};

mod check;
mod config;
mod generate;
mod input;
mod logging;
mod sql;

use input::InputFormat;

#[derive(Parser)]
#[command(name = "formforge")]
#[command(author, version, about = "Generate React forms, SQL schemas, and REST backends", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a project from a form definition
    Generate {
        /// Path to the form definition (JSON)
        #[arg(short, long)]
        form: String,

        /// Shape of the form definition
        #[arg(long, value_enum, default_value_t = InputFormat::Editor)]
        format: InputFormat,

        /// Path to formforge.toml or an options JSON file (default: ./formforge.toml if present)
        #[arg(short, long)]
        config: Option<String>,

        /// Project name (default: config, then form title)
        #[arg(short, long)]
        project: Option<String>,

        /// Output: a `.zip` path, or a directory to write files into
        /// (default: the download name in the current directory)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show what `generate` would produce
    Preview {
        /// Path to the form definition (JSON)
        #[arg(short, long)]
        form: String,

        /// Shape of the form definition
        #[arg(long, value_enum, default_value_t = InputFormat::Editor)]
        format: InputFormat,

        /// Path to formforge.toml or an options JSON file
        #[arg(short, long)]
        config: Option<String>,

        /// Project name (default: config, then form title)
        #[arg(short, long)]
        project: Option<String>,

        /// Archive path of one file to print
        #[arg(long)]
        file: Option<String>,
    },

    /// Validate a form definition
    Check {
        /// Path to the form definition (JSON)
        #[arg(short, long)]
        form: String,

        /// Shape of the form definition
        #[arg(long, value_enum, default_value_t = InputFormat::Editor)]
        format: InputFormat,
    },

    /// Print the SQL schema for a form
    Sql {
        /// Path to the form definition (JSON)
        #[arg(short, long)]
        form: String,

        /// Shape of the form definition
        #[arg(long, value_enum, default_value_t = InputFormat::Editor)]
        format: InputFormat,

        /// Table name
        #[arg(short, long)]
        table: String,

        /// SQL dialect (generic, tsql)
        #[arg(short, long, default_value = "generic")]
        dialect: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Generate {
            form,
            format,
            config,
            project,
            output,
        } => {
            generate::run(&form, format, config, project, output)?;
        }
        Commands::Preview {
            form,
            format,
            config,
            project,
            file,
        } => {
            generate::preview(&form, format, config, project, file)?;
        }
        Commands::Check { form, format } => {
            check::run(&form, format)?;
        }
        Commands::Sql {
            form,
            format,
            table,
            dialect,
        } => {
            sql::run(&form, format, &table, &dialect)?;
        }
    }

    Ok(())
}
