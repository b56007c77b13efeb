//! Sweeps the FM band, then jams the frequency the operator picks.

use clap::Parser;
use fm_sweep_jam::{args::JamCli, binary_logic, pin::SysfsPin, session::SessionFlags};
use std::process;

fn main() {
    // Handle commandline arguments.
    let opt = JamCli::parse();
    if !binary_logic::is_root() {
        println!("You must be root to run this script.");
        process::exit(1);
    }

    let flags = SessionFlags::default();
    let pin = SysfsPin::default();
    if let Err(e) = binary_logic::run(opt, &flags, &pin) {
        log::error!("{e:?}");
    }
    binary_logic::cleanup_and_exit(&pin)
}
