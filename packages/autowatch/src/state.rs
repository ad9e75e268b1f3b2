use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// On-disk shape of the seen-listing state file.
#[derive(Debug, Serialize, Deserialize)]
struct SeenState {
    car_ids: Vec<String>,
}

/// Load previously seen listing ids.
///
/// A missing, unreadable, or corrupt file yields an empty set (with a
/// warning for the latter two) — the run proceeds as if nothing had been
/// seen, which re-notifies everything currently listed.
pub fn load(path: &Path) -> HashSet<String> {
    if !path.exists() {
        return HashSet::new();
    }

    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not read state file");
            return HashSet::new();
        }
    };

    match serde_json::from_str::<SeenState>(&contents) {
        Ok(state) => state.car_ids.into_iter().collect(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not parse state file");
            HashSet::new()
        }
    }
}

/// Overwrite the state file with the given id set, pretty-printed.
///
/// This is a wholesale replace, not a merge: ids not rediscovered this run
/// are dropped. A write failure is logged but tolerated; the next run will
/// simply re-notify.
pub fn save(path: &Path, ids: &HashSet<String>) {
    let state = SeenState {
        car_ids: ids.iter().cloned().collect(),
    };

    let json = match serde_json::to_string_pretty(&state) {
        Ok(j) => j,
        Err(e) => {
            warn!(error = %e, "Could not serialize state");
            return;
        }
    };

    match fs::write(path, json) {
        Ok(()) => info!(path = %path.display(), count = ids.len(), "State saved"),
        Err(e) => warn!(path = %path.display(), error = %e, "Could not write state file"),
    }
}
