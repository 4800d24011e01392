//! The shared-entity seam.
//!
//! [`Course`](crate::Course) and [`Student`](crate::Student) both live in an
//! [`EntityStore`](crate::EntityStore) and are looked up by name and listed
//! by short rendering; this trait is what the generic roster needs from
//! them. Full-detail rendering is inherent per type since it resolves
//! nested rosters through the store.

/// Behavior every shared entity exposes to the generic roster.
pub trait Entity {
    /// The entity's display name, used for lookup and listings.
    fn name(&self) -> &str;

    /// Exact name-equality lookup.
    fn matches(&self, name: &str) -> bool {
        self.name() == name
    }

    /// Short rendering for listings: the name alone.
    fn summary(&self) -> String {
        self.name().to_string()
    }
}
