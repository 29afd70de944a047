use crate::{Error, SortOrder, Time};

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 20;

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(transparent)]
pub struct UserId(pub i64);

/// Public profile; `email` is only filled in for the user's own profile
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
    pub karma: i64,
    pub created_at: Time,
}

#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum UserSort {
    Karma,
    #[default]
    CreatedAt,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ListUsersRequest {
    pub page: u32,
    pub page_size: u32,
    pub sort: UserSort,
    pub order_by: SortOrder,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for ListUsersRequest {
    fn default() -> ListUsersRequest {
        ListUsersRequest {
            page: 1,
            page_size: crate::USERS_PER_PAGE,
            sort: UserSort::default(),
            order_by: SortOrder::Desc,
            search: None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    pub count: i64,
}

impl From<PaginatedUsers> for crate::Page<User> {
    fn from(p: PaginatedUsers) -> crate::Page<User> {
        crate::Page {
            items: p.users,
            count: p.count,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct UpdateProfileRequest {
    pub email: String,
    pub username: String,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), Error> {
        validate_email(&self.email)?;
        validate_username(&self.username)
    }
}

pub fn validate_email(email: &str) -> Result<(), Error> {
    if email.is_empty() {
        return Err(Error::InvalidEmail("Email is required"));
    }
    // something@domain.tld, without whitespace
    let valid = match email.split_once('@') {
        _ if email.chars().any(char::is_whitespace) => false,
        None => false,
        Some((local, domain)) => match domain.rsplit_once('.') {
            None => false,
            Some((host, tld)) => {
                !local.is_empty() && !host.is_empty() && !tld.is_empty() && !domain.contains('@')
            }
        },
    };
    match valid {
        true => Ok(()),
        false => Err(Error::InvalidEmail("Please enter a valid email address")),
    }
}

pub fn validate_username(username: &str) -> Result<(), Error> {
    let len = username.chars().count();
    if len == 0 {
        return Err(Error::InvalidUsername("Username is required"));
    }
    if len < MIN_USERNAME_LENGTH {
        return Err(Error::InvalidUsername(
            "Username must be at least 3 characters",
        ));
    }
    if len > MAX_USERNAME_LENGTH {
        return Err(Error::InvalidUsername(
            "Username must be no more than 20 characters",
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(Error::InvalidUsername(
            "Username can only contain letters, numbers, and underscores",
        ));
    }
    Ok(())
}
