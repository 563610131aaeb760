use std::fmt;
use uuid::Uuid;

/// Owner boundary applied to every storage read and write.
///
/// A scope either names exactly one owner or denies everything. The storage
/// layer compiles it into a `WHERE owner_id = ?` predicate for reads and
/// deletes, and checks it against the record's owner on insert.
///
/// `OwnerScope::default()` is deny-all: a query scoped with it matches no rows
/// and an insert under it is rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OwnerScope {
    owner_id: Option<Uuid>,
}

impl OwnerScope {
    /// Scope that matches nothing.
    #[must_use]
    pub const fn deny_all() -> Self {
        Self { owner_id: None }
    }

    /// Scope limited to a single owner.
    ///
    /// The nil UUID never names an owner and yields the deny-all scope.
    #[must_use]
    pub fn for_owner(owner_id: Uuid) -> Self {
        if owner_id.is_nil() {
            return Self::deny_all();
        }
        Self {
            owner_id: Some(owner_id),
        }
    }

    /// The owner this scope is limited to, if any.
    #[must_use]
    pub const fn owner_id(&self) -> Option<Uuid> {
        self.owner_id
    }

    #[must_use]
    pub const fn is_deny_all(&self) -> bool {
        self.owner_id.is_none()
    }

    /// True if a record owned by `owner_id` falls inside this scope.
    #[must_use]
    pub fn contains_owner(&self, owner_id: Uuid) -> bool {
        self.owner_id == Some(owner_id)
    }
}

impl fmt::Display for OwnerScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner_id {
            Some(id) => write!(f, "owner:{id}"),
            None => f.write_str("deny-all"),
        }
    }
}
