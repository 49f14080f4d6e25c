use m9803r::serial::{Multimeter, SerialConfig};
use tracing_subscriber;

fn main() {
    tracing_subscriber::fmt::init();

    let path = std::env::args().nth(1).unwrap_or(m9803r::serial::DEFAULT_PATH.to_owned());
    let config = SerialConfig::new(&path);
    println!("{}", config);

    let reader = Multimeter::new(&config).unwrap();
    for result in reader {
        match result {
            Ok(reading) => println!("{}", reading),
            Err(m9803r::Error::Timeout) => continue,
            Err(e) => eprintln!("{}", e),
        }
    }
}
