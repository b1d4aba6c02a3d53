use memory_telemetry::prelude::*;
use std::error::Error;
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    println!("Memory Monitor Example");
    println!("=====================");

    let memory = Memory::system()?;
    let swap = memory.virtual_memory();

    println!("Page size: {} bytes", memory.page_size());
    println!("Installed: {}", ByteSize(memory.total()));
    println!("Swap capacity: {}", ByteSize(swap.swap_total()));

    // Print column headers
    println!("\n{:<12} | {:<12} | {:<10} | {:<10}", "Available", "Swap Used", "Pages In", "Pages Out");
    println!("{:-<12} | {:-<12} | {:-<10} | {:-<10}", "", "", "", "");

    // 5 iterations x 1 second
    for _ in 0..5 {
        let activity = swap.paging_activity();
        println!(
            "{:<12} | {:<12} | {:<10} | {:<10}",
            ByteSize(memory.available()).to_string(),
            ByteSize(swap.swap_used()).to_string(),
            activity.pages_in,
            activity.pages_out
        );

        thread::sleep(Duration::from_secs(1));
    }

    println!("\n{}", memory);
    println!("{}", swap);

    Ok(())
}
