use clap::{Arg, Command as ClapCommand, ArgAction};
use std::process;
use log::error;

use examkit::utils::logger::Logger;
use examkit::commands::{CommandFactory, ExamkitCommandFactory};

fn main() {
    let matches = ClapCommand::new("examkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Crop exam booklet diagrams and generate answer-key data")
        .long_about(
            "Crop exam booklet diagrams and generate answer-key data.\n\n\
             Run without arguments to extract every default crop batch.",
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("answer-key")
                .long("answer-key")
                .help("Generate the answer-key JSON instead of extracting images")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .help("List the batches of the crop plan")
                .action(ArgAction::SetTrue)
                .conflicts_with("answer-key"),
        )
        .arg(
            Arg::new("batch")
                .short('b')
                .long("batch")
                .help("Only run this batch (repeatable); opt-in batches must be named")
                .value_name("NAME")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Crop plan TOML file (defaults to the built-in plan)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("answer-config")
                .long("answer-config")
                .help("Answer table TOML file (defaults to the built-in tables)")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .help("Directory containing the exams/ tree")
                .value_name("DIR")
                .default_value("."),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Directory outputs are written under")
                .value_name("DIR")
                .default_value("."),
        )
        .arg(
            Arg::new("zoom")
                .long("zoom")
                .help("Page magnification used when rendering")
                .value_name("FACTOR")
                .default_value("3.0"),
        )
        .get_matches();

    let logger = match Logger::new("examkit.log") {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error initializing logger: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = Logger::init_global_logger("examkit-global.log", matches.get_flag("verbose")) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = ExamkitCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
