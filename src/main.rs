use queens_ga::ga::{GaConfig, GaError, GaRunner};
use tracing::Level;

fn main() -> Result<(), GaError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::INFO)
        .init();

    let result = GaRunner::run(&GaConfig::default())?;
    for line in result.solution_lines() {
        println!("{line}");
    }

    Ok(())
}
