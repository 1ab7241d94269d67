use std::ops::RangeInclusive;
use std::time::Duration;
use std::thread;
use rand::Rng;
use log::info;

/// Sleeps a random number of seconds drawn from `secs`. An empty or `0..=0` range returns at once.
pub fn random_delay(secs: &RangeInclusive<u64>, label: &str) {
    if secs.is_empty() || *secs.end() == 0 {
        return;
    }
    let mut rng = rand::thread_rng();
    let delay_secs = rng.gen_range(secs.clone());
    info!("Waiting for {} seconds ({})...", delay_secs, label);
    thread::sleep(Duration::from_secs(delay_secs));
}
