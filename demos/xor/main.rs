use std::time::Instant;

use env_logger::Env;
use log::info;

use circle_neu::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("circle-neu XOR demo starting...");

    // prepare data set
    let mut dataset_train = SimpleDataLoader::empty();
    dataset_train.push(TrainingSample::new(vec![0.0, 0.0], vec![0.0]));
    dataset_train.push(TrainingSample::new(vec![0.0, 1.0], vec![1.0]));
    dataset_train.push(TrainingSample::new(vec![1.0, 0.0], vec![1.0]));
    dataset_train.push(TrainingSample::new(vec![1.0, 1.0], vec![0.0]));

    let test_data = dataset_train.data.clone();

    let mut rng = seeded_rng(1234);
    let net = Network::new(&[2, 4, 1], &mut rng);

    let mut orc = Orchestra::new(net)
        .train_dataloader(Box::new(dataset_train))
        .learn_rate(1.0, 0.5)
        .test_iter(1000);

    let now_time = Instant::now();
    orc.train_for_n_times(5000)?;
    info!("Elapsed for training : {} ms", now_time.elapsed().as_millis());

    info!("Now testing net !!!");

    let report = orc.eval(&test_data);
    print!("{}", report);
    info!("Accuracy : {}", report.accuracy);
    info!("Weights :\n{}", orc.network().weights());

    Ok(())
}
