use data_loader::Catalog;
use std::path::Path;
use std::time::Instant;

fn main() {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let path = Path::new("data/movies.csv");

    println!("Loading movie catalog...\n");

    let start = Instant::now();
    let catalog = Catalog::load_from_csv(path).expect("Failed to load catalog");
    let elapsed = start.elapsed();

    let with_director = catalog
        .items()
        .iter()
        .filter(|item| item.director.is_some())
        .count();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", catalog.len());
    println!("Movies with a director: {}", with_director);
    println!("\nPerformance: {:.0} rows/second",
             catalog.len() as f64 / elapsed.as_secs_f64());
}
