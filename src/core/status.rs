/// Visual category of a status, mapped to a theme style by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Success,
    Warning,
    Info,
    Neutral,
}

/// Action a record in a given status offers the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    StartAssessment,
    ContinueAssessment,
    DownloadCertificate,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::StartAssessment => "Start Assessment",
            ActionKind::ContinueAssessment => "Continue Assessment",
            ActionKind::DownloadCertificate => "Download Certificate",
        }
    }
}

/// Display policy for one domain status value.
#[derive(Debug, Clone)]
pub struct StatusDescriptor {
    pub status: String,
    pub label: String,
    pub category: Category,
    pub actions: Vec<ActionKind>,
}

impl StatusDescriptor {
    pub fn new(status: &str, label: &str, category: Category, actions: &[ActionKind]) -> Self {
        Self {
            status: status.to_string(),
            label: label.to_string(),
            category,
            actions: actions.to_vec(),
        }
    }

    /// The action shown as the row's primary control, if any.
    pub fn primary_action(&self) -> Option<ActionKind> {
        self.actions.first().copied()
    }
}

/// Data-driven lookup from status values to display descriptors.
///
/// Adding a status is a table entry, not a new conditional. Unrecognized
/// statuses resolve to a Neutral fallback rather than failing.
#[derive(Debug, Clone)]
pub struct StatusRegistry {
    entries: Vec<StatusDescriptor>,
    fallback: StatusDescriptor,
}

impl StatusRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            fallback: StatusDescriptor::new("", "Unknown", Category::Neutral, &[]),
        }
    }

    /// Registry preloaded with every status the sample data uses.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(StatusDescriptor::new(
            "completed",
            "Completed",
            Category::Success,
            &[ActionKind::DownloadCertificate],
        ));
        registry.register(StatusDescriptor::new(
            "ready",
            "Ready to Start",
            Category::Info,
            &[ActionKind::StartAssessment],
        ));
        registry.register(StatusDescriptor::new(
            "pending",
            "In Progress",
            Category::Warning,
            &[ActionKind::ContinueAssessment],
        ));
        registry.register(StatusDescriptor::new("active", "Active", Category::Info, &[]));
        registry.register(StatusDescriptor::new(
            "paused",
            "Paused",
            Category::Warning,
            &[],
        ));
        registry
    }

    /// Add or replace the entry for `descriptor.status`.
    pub fn register(&mut self, descriptor: StatusDescriptor) {
        match self.entries.iter_mut().find(|e| e.status == descriptor.status) {
            Some(existing) => *existing = descriptor,
            None => self.entries.push(descriptor),
        }
    }

    /// Total lookup: same input always yields the same descriptor.
    pub fn resolve(&self, status: &str) -> &StatusDescriptor {
        self.entries
            .iter()
            .find(|e| e.status == status)
            .unwrap_or(&self.fallback)
    }
}

impl Default for StatusRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_statuses() {
        let registry = StatusRegistry::with_defaults();

        let completed = registry.resolve("completed");
        assert_eq!(completed.label, "Completed");
        assert_eq!(completed.category, Category::Success);
        assert_eq!(
            completed.primary_action(),
            Some(ActionKind::DownloadCertificate)
        );

        let ready = registry.resolve("ready");
        assert_eq!(ready.category, Category::Info);
        assert_eq!(ready.primary_action(), Some(ActionKind::StartAssessment));
    }

    #[test]
    fn unknown_status_falls_back_to_neutral() {
        let registry = StatusRegistry::with_defaults();
        let descriptor = registry.resolve("unknown-status");
        assert_eq!(descriptor.category, Category::Neutral);
        assert!(!descriptor.label.is_empty());
        assert!(descriptor.actions.is_empty());
    }

    #[test]
    fn register_replaces_existing_entry() {
        let mut registry = StatusRegistry::with_defaults();
        registry.register(StatusDescriptor::new(
            "pending",
            "Awaiting Practical",
            Category::Warning,
            &[ActionKind::ContinueAssessment],
        ));
        assert_eq!(registry.resolve("pending").label, "Awaiting Practical");
    }

    #[test]
    fn resolve_is_deterministic() {
        let registry = StatusRegistry::with_defaults();
        assert_eq!(
            registry.resolve("ready").label,
            registry.resolve("ready").label
        );
    }
}
