use std::error::Error;
use std::time::Instant;

use clap::ArgMatches;

use log::info;

use circle_neu::config::TrainConfig;
use circle_neu::orchestra::Orchestra;

pub fn load_cfg(args: &ArgMatches) -> Result<TrainConfig, Box<dyn Error>> {
    match args.get_one::<String>("Cfg") {
        Some(path) => TrainConfig::from_file(path),
        None => Ok(TrainConfig::default()),
    }
}

/// Trains a network on generated circle samples and prints how it does on
/// a second, independently generated set.
pub fn train_net(args: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let mut cfg = load_cfg(args)?;

    if let Some(seed) = args.get_one::<u64>("Seed") {
        cfg.seed = *seed;
    }
    if let Some(epochs) = args.get_one::<usize>("Epochs") {
        cfg.epochs = *epochs;
    }
    if let Some(n) = args.get_one::<usize>("TrainSamples") {
        cfg.train_samples = *n;
    }
    if let Some(n) = args.get_one::<usize>("EvalSamples") {
        cfg.eval_samples = *n;
    }
    if let Some(lr) = args.get_one::<f64>("LrStart") {
        cfg.learn_rate_start = *lr;
    }
    if let Some(lr) = args.get_one::<f64>("LrEnd") {
        cfg.learn_rate_end = *lr;
    }

    cfg.validate()?;

    info!("Seed : {}", cfg.seed);
    info!("Layers : {:?}", cfg.layers);
    info!(
        "Learning rate : {} -> {}",
        cfg.learn_rate_start, cfg.learn_rate_end
    );

    let (network, train_dl, eval_data) = cfg.prepare();

    let mut orc = Orchestra::new(network)
        .train_dataloader(Box::new(train_dl))
        .learn_rate(cfg.learn_rate_start, cfg.learn_rate_end)
        .test_iter(cfg.test_iter);

    let now_time = Instant::now();
    let epochs = orc.train_for_n_times(cfg.epochs)?;
    info!(
        "Elapsed for {} epochs : {} ms",
        epochs,
        now_time.elapsed().as_millis()
    );

    let report = orc.eval(&eval_data);
    print!("{}", report);

    info!("Accuracy : {:.4}", report.accuracy);
    info!("Mse : {:.6}", report.mse);

    if *args.get_one::<bool>("DumpWeights").unwrap_or(&false) {
        info!("Weights : {}", serde_json::to_string(&orc.network().weights())?);
    }

    Ok(())
}
