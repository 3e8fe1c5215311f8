extern crate circle_neu;

use clap::{Arg, ArgAction, Command};

pub mod create_cfg;
pub mod dataset_info;
pub mod train;

#[cfg(feature = "log_log4rs")]
fn init_logger() {
    use log::LevelFilter;
    use log4rs::append::console::ConsoleAppender;
    use log4rs::append::file::FileAppender;
    use log4rs::config::{Appender, Config, Root};
    use log4rs::encode::pattern::PatternEncoder;

    let logfile_res = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::default()))
        .build("log.txt");

    let console = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::default()))
        .build();

    let logfile = match logfile_res {
        Ok(logfile) => logfile,
        Err(_) => panic!("Couldn't initialize logger !!!"),
    };

    let config = Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .appender(Appender::builder().build("console", Box::new(console)))
        .build(
            Root::builder()
                .appender("console")
                .appender("logfile")
                .build(LevelFilter::Info),
        );

    match config {
        Ok(config) => {
            if log4rs::init_config(config).is_err() {
                panic!("Couldn't initialize logger !!!");
            }
        }
        Err(_) => panic!("Couldn't initialize logger !!!"),
    }
}

#[cfg(all(feature = "log_env_logger", not(feature = "log_log4rs")))]
fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[cfg(not(any(feature = "log_env_logger", feature = "log_log4rs")))]
fn init_logger() {}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();

    let matches = Command::new("circle-neu tool")
        .version("0.1.0")
        .about("Train a small feed-forward network on the point-in-circle task")
        .subcommand_required(true)
        .subcommand(
            Command::new("train")
                .about("Generate circle samples, train a network and evaluate it")
                .arg(
                    Arg::new("Cfg")
                        .long("cfg")
                        .help("Provide train configuration yaml file")
                        .action(ArgAction::Set)
                        .value_parser(clap::value_parser!(String))
                        .require_equals(true),
                )
                .arg(
                    Arg::new("Seed")
                        .long("seed")
                        .help("Seed for weight initialization and sample generation")
                        .action(ArgAction::Set)
                        .value_parser(clap::value_parser!(u64))
                        .require_equals(true),
                )
                .arg(
                    Arg::new("Epochs")
                        .long("epochs")
                        .help("Number of full-batch training epochs")
                        .action(ArgAction::Set)
                        .value_parser(clap::value_parser!(usize))
                        .require_equals(true),
                )
                .arg(
                    Arg::new("TrainSamples")
                        .long("train_samples")
                        .help("Number of generated training samples")
                        .action(ArgAction::Set)
                        .value_parser(clap::value_parser!(usize))
                        .require_equals(true),
                )
                .arg(
                    Arg::new("EvalSamples")
                        .long("eval_samples")
                        .help("Number of generated evaluation samples")
                        .action(ArgAction::Set)
                        .value_parser(clap::value_parser!(usize))
                        .require_equals(true),
                )
                .arg(
                    Arg::new("LrStart")
                        .long("lr_start")
                        .help("Learning rate of the first epoch. Value between 0.0 - 1.0")
                        .action(ArgAction::Set)
                        .value_parser(clap::value_parser!(f64))
                        .require_equals(true),
                )
                .arg(
                    Arg::new("LrEnd")
                        .long("lr_end")
                        .help("Learning rate the schedule decays towards. Value between 0.0 - 1.0")
                        .action(ArgAction::Set)
                        .value_parser(clap::value_parser!(f64))
                        .require_equals(true),
                )
                .arg(
                    Arg::new("DumpWeights")
                        .long("dump_weights")
                        .help("Log the trained weights as json")
                        .action(ArgAction::Set)
                        .value_parser(clap::value_parser!(bool))
                        .require_equals(true)
                        .default_value("false"),
                ),
        )
        .subcommand(
            Command::new("create_cfg")
                .about("Write the default train configuration")
                .arg(
                    Arg::new("OutFile")
                        .long("out")
                        .short('o')
                        .help("Specifies configuration output file")
                        .action(ArgAction::Set)
                        .value_parser(clap::value_parser!(String))
                        .require_equals(true)
                        .default_value("train.cfg"),
                ),
        )
        .subcommand(
            Command::new("dataset_info")
                .about("Inspect generated circle samples")
                .arg(
                    Arg::new("Cfg")
                        .long("cfg")
                        .action(ArgAction::Set)
                        .value_parser(clap::value_parser!(String))
                        .require_equals(true),
                )
                .arg(
                    Arg::new("ShowN")
                        .long("show_n")
                        .action(ArgAction::Set)
                        .value_parser(clap::value_parser!(usize))
                        .require_equals(true),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("train", args)) => train::train_net(args)?,
        Some(("create_cfg", args)) => create_cfg::create_cfg(args)?,
        Some(("dataset_info", args)) => dataset_info::dataset_info(args)?,
        _ => unreachable!("subcommand is required"),
    }

    Ok(())
}
