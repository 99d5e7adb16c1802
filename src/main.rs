//! Snake Strip CLI - Render a self-playing snake into BMP strips.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::io::{self, BufRead, Write};
use std::time::Instant;

use pixel_strip::{
    animation::AnimationStore,
    schema::{SimulatorConfig, StorageConfig, normalize_base_name},
    snake::SnakeSimulator,
};

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: {} [name] [seconds]", args[0]);
        eprintln!();
        eprintln!("Simulate a snake game and export it as BMP strips.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  name     Base name for snake/<name>.json and snake_bmps/<name>_<slot>.bmp");
        eprintln!("  seconds  Animation length at 15 frames per second (capped at 492 frames)");
        eprintln!();
        eprintln!("Missing arguments are asked for interactively.");
        return;
    }

    let name = match args.get(1) {
        Some(name) => name.clone(),
        None => prompt("Filename: ").unwrap_or_else(|e| {
            eprintln!("Error reading filename: {}", e);
            std::process::exit(1);
        }),
    };
    let name = normalize_base_name(&name).to_string();
    if name.is_empty() {
        eprintln!("Error: filename must not be empty");
        std::process::exit(1);
    }

    let seconds_text = match args.get(2) {
        Some(text) => text.clone(),
        None => prompt("Length (in s): ").unwrap_or_else(|e| {
            eprintln!("Error reading length: {}", e);
            std::process::exit(1);
        }),
    };
    let seconds: u64 = seconds_text.trim().parse().unwrap_or_else(|e| {
        eprintln!("Error parsing length {:?}: {}", seconds_text, e);
        std::process::exit(1);
    });

    let simulator =
        SnakeSimulator::new(SimulatorConfig::default(), seconds).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
    println!("Running for {} frames", simulator.frame_budget());

    let start = Instant::now();
    let output = simulator.run().unwrap_or_else(|e| {
        eprintln!("Simulation aborted: {}", e);
        std::process::exit(1);
    });

    let store = AnimationStore::new(StorageConfig::snake());
    let strips = store.save(&name, &output.slots).unwrap_or_else(|e| {
        eprintln!("Error saving animation: {}", e);
        std::process::exit(1);
    });

    println!("{}", output.summary);
    for path in &strips {
        println!("  {}", path.display());
    }
    println!("  {}", store.json_path(&name).display());
    println!("Time: {:.2}s", start.elapsed().as_secs_f32());
}
