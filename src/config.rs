//! Generator configuration.
//!
//! Every field has a default equal to the reference fixture run, so a JSON
//! config file only needs the fields it overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FixtureError, Result};

// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "FIXTURE_CONFIG";

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const PUNCTUATION: &str = "!@#$%^&*()_+";

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Inclusive byte-size range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: u64,
    pub max: u64,
}

impl SizeRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn check(&self, name: &str) -> Result<()> {
        if self.min > self.max {
            return Err(FixtureError::InvalidConfig(format!(
                "{name}: min {} exceeds max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    fn overlaps(&self, other: &SizeRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

/// Settings for the credential fixture generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialConfig {
    pub record_count: usize,
    pub username_alphabet: String,
    pub username_length: usize,
    pub password_alphabet: String,
    pub password_length: usize,
    /// Suffixes appended to usernames; the first `primary_domain_count` form
    /// the common subset, the rest the rare subset.
    pub domain_suffixes: Vec<String>,
    pub primary_domain_count: usize,
    pub rare_probability: f64,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            record_count: 99,
            username_alphabet: LOWERCASE.to_string(),
            username_length: 8,
            password_alphabet: format!("{LOWERCASE}{PUNCTUATION}{UPPERCASE}{DIGITS}"),
            password_length: 12,
            domain_suffixes: vec![
                "@louisville.edu".to_string(),
                "@gmail.com".to_string(),
                "@yahoo.com".to_string(),
            ],
            primary_domain_count: 1,
            rare_probability: 0.1,
        }
    }
}

impl CredentialConfig {
    pub fn primary_domains(&self) -> Result<&[String]> {
        leading_subset(
            "primary_domain_count",
            &self.domain_suffixes,
            self.primary_domain_count,
        )
    }

    // Falls back to the primary subset when no secondary suffix is configured
    pub fn secondary_domains(&self) -> Result<&[String]> {
        let primary = self.primary_domains()?;
        match self.domain_suffixes.get(primary.len()..) {
            Some(rest) if !rest.is_empty() => Ok(rest),
            _ => Ok(primary),
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_alphabet("username_alphabet", &self.username_alphabet)?;
        check_alphabet("password_alphabet", &self.password_alphabet)?;
        check_positive("username_length", self.username_length)?;
        check_positive("password_length", self.password_length)?;
        check_tokens("domain_suffixes", &self.domain_suffixes)?;
        check_primary_count(
            "primary_domain_count",
            self.primary_domain_count,
            self.domain_suffixes.len(),
        )?;
        check_probability(self.rare_probability)
    }
}

/// Settings for the post fixture generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostConfig {
    pub record_count: usize,
    pub filename_alphabet: String,
    pub filename_length: usize,
    /// Extensions appended to file names; the first
    /// `primary_extension_count` form the common subset, the rare branch
    /// draws from the whole list.
    pub extensions: Vec<String>,
    pub primary_extension_count: usize,
    pub word_bank: Vec<String>,
    pub description_word_count: usize,
    pub size_range_common: SizeRange,
    pub size_range_rare: SizeRange,
    pub rare_probability: f64,
}

impl Default for PostConfig {
    fn default() -> Self {
        let words = [
            "hello",
            "are",
            "you",
            "reading",
            "this",
            "text",
            "file",
            "generate",
            "image",
            "description",
            "code",
            "python",
            "script",
            "random",
            "words",
            "file",
            "name",
            "example",
        ];

        Self {
            record_count: 99,
            filename_alphabet: format!("{LOWERCASE}{UPPERCASE}{DIGITS}"),
            filename_length: 10,
            extensions: [".png", ".jpg", ".jpeg", ".bmp", ".gif"]
                .into_iter()
                .map(String::from)
                .collect(),
            primary_extension_count: 3,
            word_bank: words.into_iter().map(String::from).collect(),
            description_word_count: 7,
            size_range_common: SizeRange::new(512 * KIB, 2 * MIB),
            size_range_rare: SizeRange::new(5 * MIB, 10 * MIB),
            rare_probability: 0.1,
        }
    }
}

impl PostConfig {
    pub fn primary_extensions(&self) -> Result<&[String]> {
        leading_subset(
            "primary_extension_count",
            &self.extensions,
            self.primary_extension_count,
        )
    }

    pub fn validate(&self) -> Result<()> {
        check_alphabet("filename_alphabet", &self.filename_alphabet)?;
        check_positive("filename_length", self.filename_length)?;
        check_tokens("extensions", &self.extensions)?;
        check_primary_count(
            "primary_extension_count",
            self.primary_extension_count,
            self.extensions.len(),
        )?;
        check_tokens("word_bank", &self.word_bank)?;
        check_positive("description_word_count", self.description_word_count)?;
        if self.word_bank.len() < self.description_word_count {
            return Err(FixtureError::InvalidConfig(format!(
                "word_bank has {} words, {} needed per description",
                self.word_bank.len(),
                self.description_word_count
            )));
        }
        self.size_range_common.check("size_range_common")?;
        self.size_range_rare.check("size_range_rare")?;
        if self.size_range_common.overlaps(&self.size_range_rare) {
            return Err(FixtureError::InvalidConfig(
                "size_range_common and size_range_rare overlap".to_string(),
            ));
        }
        check_probability(self.rare_probability)
    }
}

/// Configuration for both generators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    pub credentials: CredentialConfig,
    pub posts: PostConfig,
}

impl FixtureConfig {
    #[tracing::instrument]
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| FixtureError::io(path, e))?;
        let config: FixtureConfig =
            serde_json::from_str(&content).map_err(|source| FixtureError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.credentials.validate()?;
        self.posts.validate()
    }
}

// First `count` entries; `count` must be within 1..=len
fn leading_subset<'a>(name: &str, tokens: &'a [String], count: usize) -> Result<&'a [String]> {
    check_primary_count(name, count, tokens.len())?;
    tokens
        .get(..count)
        .ok_or_else(|| FixtureError::InvalidConfig(format!("{name} out of range")))
}

fn check_alphabet(name: &str, alphabet: &str) -> Result<()> {
    if alphabet.is_empty() {
        return Err(FixtureError::InvalidConfig(format!("{name} is empty")));
    }
    if alphabet.chars().any(char::is_whitespace) {
        return Err(FixtureError::InvalidConfig(format!(
            "{name} contains whitespace"
        )));
    }
    Ok(())
}

fn check_tokens(name: &str, tokens: &[String]) -> Result<()> {
    if tokens.is_empty() {
        return Err(FixtureError::InvalidConfig(format!("{name} is empty")));
    }
    for token in tokens {
        if token.is_empty() || token.chars().any(char::is_whitespace) {
            return Err(FixtureError::InvalidConfig(format!(
                "{name} entry {token:?} is empty or contains whitespace"
            )));
        }
    }
    Ok(())
}

fn check_positive(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(FixtureError::InvalidConfig(format!("{name} must be > 0")));
    }
    Ok(())
}

fn check_primary_count(name: &str, count: usize, len: usize) -> Result<()> {
    if count == 0 || count > len {
        return Err(FixtureError::InvalidConfig(format!(
            "{name} must be within 1..={len}, got {count}"
        )));
    }
    Ok(())
}

pub fn check_probability(p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&p) {
        return Err(FixtureError::InvalidConfig(format!(
            "rare_probability must be within [0, 1], got {p}"
        )));
    }
    Ok(())
}
