use crate::role::Role;
use serde::Serialize;
use uuid::Uuid;

/// The authenticated user a request is made on behalf of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    pub fn user(id: Uuid) -> Self {
        Self::new(id, Role::User)
    }

    pub fn admin(id: Uuid) -> Self {
        Self::new(id, Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// A record exclusively owned by the user that created it
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

/// A bare owner id, for checks made before the record itself is loaded
impl Owned for Uuid {
    fn owner_id(&self) -> Uuid {
        *self
    }
}
