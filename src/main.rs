//! rPaytracker main entrypoint.

use rpaytracker::run;
use rpaytracker::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
