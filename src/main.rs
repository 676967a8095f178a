use anyhow::Result;
use std::env;
use std::io;

use mgmt_systems::app;
use mgmt_systems::Console;

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let mut console = Console::new(stdin, stdout);

    match args.get(1).map(String::as_str) {
        Some("betting") => app::run_betting(&mut console),
        Some("shopping") => app::run_shopping(&mut console),
        Some("traffic") => app::run_traffic(&mut console),
        Some(other) => {
            eprintln!("❌ Unknown desk: {}", other);
            eprintln!("   Usage: mgmt-systems [betting|shopping|traffic]");
            std::process::exit(2);
        }
        // No argument: interactive desk picker
        None => app::run_picker(&mut console),
    }
}
