use std::error::Error;

use clap::ArgMatches;

use log::info;

use circle_neu::config::TrainConfig;

pub fn create_cfg(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let out_file = match args.get_one::<String>("OutFile") {
        Some(f) => f.as_str(),
        None => "train.cfg",
    };

    info!("Writing default train configuration to file {}", out_file);
    TrainConfig::default().to_file(out_file)?;

    Ok(())
}
