use crate::error::{Result, StoreError};
use crate::ReferralStore;
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use referrals_core::domain::{normalize_email, ReferralRecord, REFEREE_COLUMN, REFERRER_COLUMN};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Referral records kept in a CSV file with a `referrer_email,referee_email`
/// header row. Every scan re-reads the file.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn scan<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(&str, &str) -> bool,
    {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(File::open(&self.path)?);
        let headers = reader.headers()?.clone();
        let referrer_idx = self.column_index(&headers, REFERRER_COLUMN)?;
        let referee_idx = self.column_index(&headers, REFEREE_COLUMN)?;

        for row in reader.records() {
            let row = row?;
            let (Some(referrer), Some(referee)) = (row.get(referrer_idx), row.get(referee_idx))
            else {
                continue;
            };
            if !visit(referrer, referee) {
                break;
            }
        }
        Ok(())
    }

    fn column_index(&self, headers: &StringRecord, column: &'static str) -> Result<usize> {
        headers
            .iter()
            .position(|name| name == column)
            .ok_or_else(|| StoreError::MissingColumn {
                path: self.path.clone(),
                column,
            })
    }
}

impl ReferralStore for CsvStore {
    fn ensure_initialized(&mut self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&self.path)?;
        restrict_file_permissions(&self.path)?;
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(file);
        writer.write_record([REFERRER_COLUMN, REFEREE_COLUMN])?;
        writer.flush()?;
        debug!(path = %self.path.display(), "created referral store");
        Ok(())
    }

    fn records(&self) -> Result<Vec<ReferralRecord>> {
        let mut records = Vec::new();
        self.scan(|referrer, referee| {
            records.push(ReferralRecord::new(referrer, referee));
            true
        })?;
        Ok(records)
    }

    fn append(&mut self, record: &ReferralRecord) -> Result<()> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(file);
        writer.write_record([&record.referrer_email, &record.referee_email])?;
        writer.flush()?;
        Ok(())
    }

    fn count_by_referrer(&self, normalized_referrer: &str) -> Result<usize> {
        let mut count = 0;
        self.scan(|referrer, _| {
            if normalize_email(referrer) == normalized_referrer {
                count += 1;
            }
            true
        })?;
        Ok(count)
    }

    fn referee_exists(&self, normalized_referee: &str) -> Result<bool> {
        let mut found = false;
        self.scan(|_, referee| {
            found = normalize_email(referee) == normalized_referee;
            !found
        })?;
        Ok(found)
    }
}

#[cfg(unix)]
fn restrict_file_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let perms = fs::Permissions::from_mode(0o600);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_file_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
