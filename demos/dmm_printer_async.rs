use m9803r::serial::{Multimeter, SerialConfig};
use m9803r::StreamExt;
use tracing_subscriber;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let path = std::env::args().nth(1).unwrap_or(m9803r::serial::DEFAULT_PATH.to_owned());
    let config = SerialConfig::new(&path);
    println!("{}", config);

    let dmm = Multimeter::new_async(&config).unwrap();
    let mut stream = dmm.readings();

    while let Some(reading) = stream.next().await {
        println!(
            "{:?}\t{}\t{}",
            reading.mode,
            reading.value(),
            if reading.is_overload { "OL" } else { "" }
        );
    }
}
