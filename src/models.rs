use std::fmt;

use serde::{Deserialize, Serialize};

// Default credential fixture file name
pub const DEFAULT_CREDENTIAL_FILE: &str = "user_pass.txt";

// Default post fixture file name
pub const DEFAULT_POST_FILE: &str = "post_values.txt";

// Line 1 of every credential fixture file
pub const CREDENTIAL_SENTINEL: &str = "abc@domain.ext 123456";

// Line 1 of every post fixture file
pub const POST_SENTINEL: &str = "testing.png abcdefgdescription 204800";

// Field count of a credential line
pub const CREDENTIAL_FIELDS: usize = 2;

// Field count of a post line
pub const POST_FIELDS: usize = 3;

// One username/password pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub username: String,
    pub password: String,
}

impl CredentialRecord {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    // The hardcoded record written as line 1
    pub fn sentinel() -> Self {
        Self::new("abc@domain.ext", "123456")
    }
}

// Serialized form: `<username> <password>`
impl fmt::Display for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.username, self.password)
    }
}

// One image post metadata record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub file_name: String,
    pub post_description: String,
    pub image_size_bytes: u64,
}

impl PostRecord {
    pub fn new(
        file_name: impl Into<String>,
        post_description: impl Into<String>,
        image_size_bytes: u64,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            post_description: post_description.into(),
            image_size_bytes,
        }
    }

    // The hardcoded record written as line 1
    pub fn sentinel() -> Self {
        Self::new("testing.png", "abcdefgdescription", 200 * 1024)
    }
}

// Serialized form: `<fileName> <postDescription> <imageSizeBytes>`
impl fmt::Display for PostRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.file_name, self.post_description, self.image_size_bytes
        )
    }
}

// Credential file read back as two aligned columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialColumns {
    pub usernames: Vec<String>,
    pub passwords: Vec<String>,
}

impl CredentialColumns {
    pub fn push(&mut self, record: CredentialRecord) {
        self.usernames.push(record.username);
        self.passwords.push(record.password);
    }

    pub fn len(&self) -> usize {
        self.usernames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.usernames.is_empty()
    }

    // Rebuilds the records, pairing columns by index
    pub fn records(&self) -> impl Iterator<Item = CredentialRecord> + '_ {
        self.usernames
            .iter()
            .zip(&self.passwords)
            .map(|(username, password)| CredentialRecord::new(username.as_str(), password.as_str()))
    }

    pub fn has_sentinel(&self) -> bool {
        self.records()
            .next()
            .is_some_and(|first| first == CredentialRecord::sentinel())
    }
}

// Post file read back as three aligned columns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostColumns {
    pub file_names: Vec<String>,
    pub post_descriptions: Vec<String>,
    pub image_sizes: Vec<u64>,
}

impl PostColumns {
    pub fn push(&mut self, record: PostRecord) {
        self.file_names.push(record.file_name);
        self.post_descriptions.push(record.post_description);
        self.image_sizes.push(record.image_size_bytes);
    }

    pub fn len(&self) -> usize {
        self.file_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file_names.is_empty()
    }

    // Rebuilds the records, pairing columns by index
    pub fn records(&self) -> impl Iterator<Item = PostRecord> + '_ {
        self.file_names
            .iter()
            .zip(&self.post_descriptions)
            .zip(&self.image_sizes)
            .map(|((file_name, description), &size)| {
                PostRecord::new(file_name.as_str(), description.as_str(), size)
            })
    }

    pub fn has_sentinel(&self) -> bool {
        self.records()
            .next()
            .is_some_and(|first| first == PostRecord::sentinel())
    }
}
