use clap::ArgMatches;

use circle_neu::dataloader::DataLoader;

use crate::train::load_cfg;

/// Shows what the configured generator produces for the training set.
pub fn dataset_info(args: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = load_cfg(args)?;
    cfg.validate()?;

    let (_, loader, _) = cfg.prepare();

    let inside = loader
        .samples()
        .iter()
        .filter(|s| s.expected[0] > 0.5)
        .count();

    println!("Dataset length : {}", loader.len());
    println!("Inside the circle : {}", inside);
    println!("Outside the circle : {}", loader.len() - inside);

    if let Some(show_n) = args.get_one::<usize>("ShowN") {
        for s in loader.samples().iter().take(*show_n) {
            println!("{}", s);
        }
    }

    Ok(())
}
