use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The identity every request is resolved to before any scheduling
/// operation runs. Resolution happens at the auth boundary; nothing in
/// the scheduling core performs authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Uuid,
    pub name: String,
}

impl Teacher {
    /// Derives a stable teacher id from a configured name, so a
    /// single-teacher deployment keeps the same id across restarts.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self {
            id: Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()),
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_id_is_stable() {
        let a = Teacher::from_name("ms-harris");
        let b = Teacher::from_name("ms-harris");
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_distinct_names_distinct_ids() {
        let a = Teacher::from_name("ms-harris");
        let b = Teacher::from_name("mr-okafor");
        assert_ne!(a.id, b.id);
    }
}
