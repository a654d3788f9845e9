/// The business runs exactly this many depots.
pub const DEPOT_COUNT: usize = 3;

/// Positional fallback name for the depot at `index` (0-based).
pub fn default_depot_name(index: usize) -> String {
    format!("Depot {}", index + 1)
}

pub fn seed_depots() -> Vec<String> {
    (0..DEPOT_COUNT).map(default_depot_name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_names_are_positional() {
        assert_eq!(seed_depots(), vec!["Depot 1", "Depot 2", "Depot 3"]);
    }
}
