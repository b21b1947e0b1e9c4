use anyhow::{Context, Result};
use tracing::{debug, error, warn};

use super::model::{FullUser, TempUser, UserKind, UserRef, UserSlot};
use super::storage::KeyValueStore;

pub const USERS_KEY: &str = "users";

pub struct UserStore {
    full: Vec<FullUser>,
    temp: Vec<TempUser>,
    storage: Box<dyn KeyValueStore>,
    revision: u64,
}

impl UserStore {
    pub fn load(storage: Box<dyn KeyValueStore>) -> Self {
        let full = match read_saved_users(storage.as_ref()) {
            Ok(users) => users,
            Err(error) => {
                error!("Failed to parse saved users: {error:#}");
                Vec::new()
            }
        };
        debug!(count = full.len(), "restored saved users");

        Self {
            full,
            temp: Vec::new(),
            storage,
            revision: 0,
        }
    }

    pub fn full_users(&self) -> &[FullUser] {
        &self.full
    }

    pub fn temp_users(&self) -> &[TempUser] {
        &self.temp
    }

    pub fn len(&self) -> usize {
        self.full.len() + self.temp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn iter(&self) -> impl Iterator<Item = (UserSlot, UserRef<'_>)> {
        let full = self.full.iter().enumerate().map(|(index, user)| {
            (
                UserSlot {
                    kind: UserKind::Full,
                    index,
                },
                UserRef::Full(user),
            )
        });
        let temp = self.temp.iter().enumerate().map(|(index, user)| {
            (
                UserSlot {
                    kind: UserKind::Temporary,
                    index,
                },
                UserRef::Temporary(user),
            )
        });
        full.chain(temp)
    }

    pub fn get(&self, slot: UserSlot) -> Option<UserRef<'_>> {
        match slot.kind {
            UserKind::Full => self.full.get(slot.index).map(UserRef::Full),
            UserKind::Temporary => self.temp.get(slot.index).map(UserRef::Temporary),
        }
    }

    pub fn push_full(&mut self, user: FullUser) {
        self.full.push(user);
        self.revision += 1;
        self.persist();
    }

    pub fn push_temp(&mut self, user: TempUser) {
        self.temp.push(user);
        self.revision += 1;
    }

    pub fn clear_all(&mut self) {
        self.full.clear();
        self.temp.clear();
        self.revision += 1;
        if let Err(error) = self.storage.remove(USERS_KEY) {
            warn!("Failed to remove saved users: {error:#}");
        }
    }

    pub fn clear_temporary(&mut self) {
        self.temp.clear();
        self.revision += 1;
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.full)
            .context("failed to serialize users")
            .and_then(|payload| self.storage.set(USERS_KEY, &payload));
        if let Err(error) = result {
            warn!("Failed to save users: {error:#}");
        }
    }
}

fn read_saved_users(storage: &dyn KeyValueStore) -> Result<Vec<FullUser>> {
    let Some(raw) = storage.get(USERS_KEY)? else {
        return Ok(Vec::new());
    };
    serde_json::from_str(&raw).context("saved users are not a valid user list")
}
