/// The canonical exclusion set: names suppressed from the public catalog.
///
/// Order is insertion order and only matters for display. Names are unique
/// and free-form; an excluded name does not have to exist in the current
/// catalog snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclusions {
    names: Vec<String>,
}

impl Exclusions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from server-supplied names, deduplicating while keeping
    /// the first occurrence of each name.
    pub fn from_names(names: Vec<String>) -> Self {
        let mut set = Self::new();
        for name in names {
            set.apply_add(&name);
        }
        set
    }

    /// Replaces the whole set with a fresh server snapshot.
    pub fn replace(&mut self, names: Vec<String>) {
        *self = Self::from_names(names);
    }

    /// Adds a name after server acknowledgment. Idempotent: adding a name
    /// that is already present leaves the set unchanged.
    pub fn apply_add(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.names.push(name.to_owned());
        true
    }

    /// Removes a name after server acknowledgment. Removing an absent name
    /// leaves the set unchanged.
    pub fn apply_remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|existing| existing != name);
        self.names.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}
