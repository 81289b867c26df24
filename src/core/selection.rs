/// Order-preserving set of course identifiers for the registration wizard.
///
/// Insertion order is the display order. All operations return a new set so
/// the wizard's history stays easy to reason about; a caller-held value is
/// never mutated behind its back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Remove `id` if present, otherwise append it at the end. A re-added id
    /// moves to the end; its original position is not restored.
    #[must_use]
    pub fn toggle(&self, id: &str) -> SelectionSet {
        let mut ids: Vec<String> = self
            .ids
            .iter()
            .filter(|i| i.as_str() != id)
            .cloned()
            .collect();
        if ids.len() == self.ids.len() {
            ids.push(id.to_string());
        }
        SelectionSet { ids }
    }

    #[must_use]
    pub fn cleared(&self) -> SelectionSet {
        SelectionSet::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let set = SelectionSet::new();
        let set = set.toggle("UT");
        assert!(set.contains("UT"));
        assert_eq!(set.len(), 1);

        let set = set.toggle("UT");
        assert!(!set.contains("UT"));
        assert!(set.is_empty());
    }

    #[test]
    fn toggle_round_trip_is_identity() {
        let set = SelectionSet::new().toggle("PT").toggle("MT");
        let round_trip = set.toggle("RT").toggle("RT");
        assert_eq!(round_trip, set);
    }

    #[test]
    fn readded_id_moves_to_end() {
        let set = SelectionSet::new().toggle("PT").toggle("MT").toggle("UT");
        // Remove PT, then add it back: it must land at the end, not position 0.
        let set = set.toggle("PT").toggle("PT");
        let order: Vec<&str> = set.iter().collect();
        assert_eq!(order, vec!["MT", "UT", "PT"]);
    }

    #[test]
    fn insertion_order_preserved() {
        let set = SelectionSet::new().toggle("UT").toggle("RT");
        let order: Vec<&str> = set.iter().collect();
        assert_eq!(order, vec!["UT", "RT"]);
    }

    #[test]
    fn cleared_is_empty() {
        let set = SelectionSet::new().toggle("PT").toggle("MT");
        assert!(set.cleared().is_empty());
    }
}
