//! rTripPlanner main entrypoint.

use rtripplanner::run;
use rtripplanner::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
