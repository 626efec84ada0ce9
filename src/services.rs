use std::path::Path;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::{CredentialConfig, PostConfig};
use crate::error::{FixtureError, Result};
use crate::fixture_file::{FixtureWriter, read_lines, split_fields};
use crate::models::{
    CREDENTIAL_FIELDS, CredentialColumns, CredentialRecord, POST_FIELDS, PostColumns, PostRecord,
};
use crate::utils::{choose_token, random_string, sample_concat, weighted_pick};

// Credential fixture generator and parser
pub struct CredentialService;

impl CredentialService {
    // Random letters followed by one domain suffix
    pub fn generate_username<R: Rng + ?Sized>(
        config: &CredentialConfig,
        rng: &mut R,
    ) -> Result<String> {
        let local = random_string(rng, &config.username_alphabet, config.username_length)?;
        let domains = weighted_pick(
            rng,
            config.rare_probability,
            config.primary_domains()?,
            config.secondary_domains()?,
        )?;
        let domain = choose_token(rng, domains)?;
        Ok(format!("{local}{domain}"))
    }

    pub fn generate_password<R: Rng + ?Sized>(
        config: &CredentialConfig,
        rng: &mut R,
    ) -> Result<String> {
        random_string(rng, &config.password_alphabet, config.password_length)
    }

    pub fn generate_record<R: Rng + ?Sized>(
        config: &CredentialConfig,
        rng: &mut R,
    ) -> Result<CredentialRecord> {
        let username = Self::generate_username(config, rng)?;
        let password = Self::generate_password(config, rng)?;
        Ok(CredentialRecord::new(username, password))
    }

    // Recreates `path` as the sentinel plus `record_count` records.
    // `emit` receives each line exactly as written; returns the line count.
    #[tracing::instrument(skip(config, rng, emit))]
    pub fn generate_file<R, F>(
        path: &Path,
        config: &CredentialConfig,
        rng: &mut R,
        mut emit: F,
    ) -> Result<usize>
    where
        R: Rng + ?Sized,
        F: FnMut(&str),
    {
        config.validate()?;
        info!("generating {} credential records", config.record_count);

        let mut writer = FixtureWriter::create(path)?;
        writer.write_record(&CredentialRecord::sentinel())?;

        for _ in 0..config.record_count {
            let record = Self::generate_record(config, rng)?;
            let line = writer.write_record(&record)?;
            emit(&line);
        }

        writer.commit()
    }

    #[tracing::instrument]
    pub fn parse_file(path: &Path) -> Result<CredentialColumns> {
        let mut columns = CredentialColumns::default();

        for line in read_lines(path)? {
            let fields = split_fields(path, &line, CREDENTIAL_FIELDS)?;
            if let [username, password] = fields.as_slice() {
                columns.push(CredentialRecord::new(*username, *password));
            }
        }

        if !columns.has_sentinel() {
            warn!("{} does not start with the sentinel record", path.display());
        }
        debug!("parsed {} credential records", columns.len());
        Ok(columns)
    }
}

// Post fixture generator and parser
pub struct PostService;

impl PostService {
    pub fn generate_description<R: Rng + ?Sized>(config: &PostConfig, rng: &mut R) -> Result<String> {
        sample_concat(rng, &config.word_bank, config.description_word_count)
    }

    // Random alphanumerics followed by one extension
    pub fn generate_file_name<R: Rng + ?Sized>(config: &PostConfig, rng: &mut R) -> Result<String> {
        let stem = random_string(rng, &config.filename_alphabet, config.filename_length)?;
        let extensions = weighted_pick(
            rng,
            config.rare_probability,
            config.primary_extensions()?,
            config.extensions.as_slice(),
        )?;
        let extension = choose_token(rng, extensions)?;
        Ok(format!("{stem}{extension}"))
    }

    pub fn generate_image_size<R: Rng + ?Sized>(config: &PostConfig, rng: &mut R) -> Result<u64> {
        config.size_range_common.check("size_range_common")?;
        config.size_range_rare.check("size_range_rare")?;
        let range = weighted_pick(
            rng,
            config.rare_probability,
            &config.size_range_common,
            &config.size_range_rare,
        )?;
        Ok(rng.gen_range(range.min..=range.max))
    }

    pub fn generate_record<R: Rng + ?Sized>(config: &PostConfig, rng: &mut R) -> Result<PostRecord> {
        let post_description = Self::generate_description(config, rng)?;
        let file_name = Self::generate_file_name(config, rng)?;
        let image_size_bytes = Self::generate_image_size(config, rng)?;
        Ok(PostRecord::new(file_name, post_description, image_size_bytes))
    }

    // Recreates `path` as the sentinel plus `record_count` records.
    // `emit` receives each line exactly as written; returns the line count.
    #[tracing::instrument(skip(config, rng, emit))]
    pub fn generate_file<R, F>(
        path: &Path,
        config: &PostConfig,
        rng: &mut R,
        mut emit: F,
    ) -> Result<usize>
    where
        R: Rng + ?Sized,
        F: FnMut(&str),
    {
        config.validate()?;
        info!("generating {} post records", config.record_count);

        let mut writer = FixtureWriter::create(path)?;
        writer.write_record(&PostRecord::sentinel())?;

        for _ in 0..config.record_count {
            let record = Self::generate_record(config, rng)?;
            let line = writer.write_record(&record)?;
            emit(&line);
        }

        writer.commit()
    }

    #[tracing::instrument]
    pub fn parse_file(path: &Path) -> Result<PostColumns> {
        let mut columns = PostColumns::default();

        for line in read_lines(path)? {
            let fields = split_fields(path, &line, POST_FIELDS)?;
            if let [file_name, description, size] = fields.as_slice() {
                let image_size_bytes =
                    parse_size(size).ok_or_else(|| FixtureError::InvalidSize {
                        path: path.to_path_buf(),
                        line_number: line.number,
                        value: (*size).to_string(),
                    })?;
                columns.push(PostRecord::new(*file_name, *description, image_size_bytes));
            }
        }

        if !columns.has_sentinel() {
            warn!("{} does not start with the sentinel record", path.display());
        }
        debug!("parsed {} post records", columns.len());
        Ok(columns)
    }
}

// Canonical decimal only, so the value re-serializes to the same token
fn parse_size(token: &str) -> Option<u64> {
    let canonical = !token.is_empty()
        && token.bytes().all(|b| b.is_ascii_digit())
        && (token == "0" || !token.starts_with('0'));
    if !canonical {
        return None;
    }
    token.parse().ok()
}
