//! ACL permission records.

use std::fmt;

use alloy_primitives::{Address, B256};
use serde::Serialize;

/// One ACL entry: `entity` may call `role`-protected functions on `app`.
///
/// A permission created with a `manager` corresponds to the ACL's
/// `createPermission`; one without corresponds to `grantPermission` on an
/// entry that already has a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Permission {
    pub entity: Address,
    pub app: Address,
    pub role: B256,
    pub manager: Option<Address>,
}

impl Permission {
    /// A new entry whose manager is set at creation time.
    pub fn create(entity: Address, app: Address, role: B256, manager: Address) -> Self {
        Self {
            entity,
            app,
            role,
            manager: Some(manager),
        }
    }

    /// A grant on an entry that is already managed.
    pub fn grant(entity: Address, app: Address, role: B256) -> Self {
        Self {
            entity,
            app,
            role,
            manager: None,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entity {} on app {} for role {}",
            self.entity, self.app, self.role
        )?;
        if let Some(manager) = self.manager {
            write!(f, " (manager {manager})")?;
        }
        Ok(())
    }
}
