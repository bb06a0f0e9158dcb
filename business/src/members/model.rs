use serde::Deserialize;
use ustr::Ustr;

/// Stable identity of a member row. Interned because keys are cloned and
/// compared on every frame.
pub type MemberKey = Ustr;

/// One row of the members table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub key: MemberKey,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// The editable columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberField {
    Name,
    Email,
    Role,
}

impl MemberField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Role];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Role => "Role",
        }
    }
}

impl Member {
    pub fn new(
        key: impl AsRef<str>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            key: Ustr::from(key.as_ref()),
            name: name.into(),
            email: email.into(),
            role: role.into(),
        }
    }

    pub fn field(&self, field: MemberField) -> &str {
        match field {
            MemberField::Name => &self.name,
            MemberField::Email => &self.email,
            MemberField::Role => &self.role,
        }
    }

    pub fn set_field(&mut self, field: MemberField, value: String) {
        match field {
            MemberField::Name => self.name = value,
            MemberField::Email => self.email = value,
            MemberField::Role => self.role = value,
        }
    }

    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || MemberField::ALL
                .iter()
                .any(|field| self.field(*field).to_lowercase().contains(needle))
    }
}

/// The endpoint serves ids as strings, but numbers are accepted too.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

/// One element of the members JSON array.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberPayload {
    id: RawId,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl MemberPayload {
    pub fn id(&self) -> String {
        match &self.id {
            RawId::Text(id) => id.clone(),
            RawId::Number(id) => id.to_string(),
        }
    }
}

impl From<MemberPayload> for Member {
    fn from(payload: MemberPayload) -> Self {
        let key = payload.id();
        Self::new(key, payload.name, payload.email, payload.role)
    }
}
