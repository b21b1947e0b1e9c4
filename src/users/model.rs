use serde::{Deserialize, Deserializer, Serialize};

#[derive(Deserialize)]
#[serde(untagged)]
enum Identifier {
    Text(String),
    Number(serde_json::Number),
}

impl From<Identifier> for String {
    fn from(identifier: Identifier) -> Self {
        match identifier {
            Identifier::Text(text) => text,
            Identifier::Number(number) => number.to_string(),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_string(deserializer)?.unwrap_or_default())
}

pub(crate) fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Identifier>::deserialize(deserializer)?.map(String::from))
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Badge {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    pub name: String,
    pub icon: String,
}

impl Badge {
    pub fn new(id: &str, name: &str, icon: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            icon: icon.to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullUser {
    pub id: String,
    pub username: String,
    pub profile_image_url: String,
    pub twitter_score: i64,
    pub wallet_score: i64,
    pub telegram_score: i64,
    pub total_score: i64,
    #[serde(default)]
    pub badges: Vec<Badge>,
    #[serde(default)]
    pub is_verified: bool,
}

impl FullUser {
    pub fn has_full_data(&self) -> bool {
        self.wallet_score > 0 && self.telegram_score > 0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TempUser {
    pub id: String,
    pub username: String,
    pub profile_image_url: String,
    pub twitter_score: i64,
    pub total_score: i64,
    #[serde(default)]
    pub badges: Vec<Badge>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UserKind {
    Full,
    Temporary,
}

#[derive(Clone, Copy, Debug)]
pub enum UserRef<'a> {
    Full(&'a FullUser),
    Temporary(&'a TempUser),
}

impl<'a> UserRef<'a> {
    pub fn kind(self) -> UserKind {
        match self {
            Self::Full(_) => UserKind::Full,
            Self::Temporary(_) => UserKind::Temporary,
        }
    }

    pub fn id(self) -> &'a str {
        match self {
            Self::Full(user) => &user.id,
            Self::Temporary(user) => &user.id,
        }
    }

    pub fn username(self) -> &'a str {
        match self {
            Self::Full(user) => &user.username,
            Self::Temporary(user) => &user.username,
        }
    }

    pub fn profile_image_url(self) -> &'a str {
        match self {
            Self::Full(user) => &user.profile_image_url,
            Self::Temporary(user) => &user.profile_image_url,
        }
    }

    pub fn twitter_score(self) -> i64 {
        match self {
            Self::Full(user) => user.twitter_score,
            Self::Temporary(user) => user.twitter_score,
        }
    }

    pub fn total_score(self) -> i64 {
        match self {
            Self::Full(user) => user.total_score,
            Self::Temporary(user) => user.total_score,
        }
    }

    pub fn badges(self) -> &'a [Badge] {
        match self {
            Self::Full(user) => &user.badges,
            Self::Temporary(user) => &user.badges,
        }
    }

    pub fn badge_count(self) -> usize {
        self.badges().len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserSlot {
    pub kind: UserKind,
    pub index: usize,
}
