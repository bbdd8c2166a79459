//! Edit engine for capimig.
//!
//! Responsibilities:
//! - Apply the raw-text identifier substitution.
//! - Load every document of a file, run the migration engine on each, and
//!   serialize them back when something changed.
//! - Write the result (optionally keeping a backup) and render a unified diff.
//!
//! A file whose documents change structurally is re-emitted through the
//! [`DocumentCodec`]. With [`YamlCodec`] that drops comments and quoting style
//! for the whole file; only substitution-only files keep their text as is.

mod codec;
mod error;
mod substitute;

pub use codec::{DocumentCodec, YamlCodec};
pub use error::{CodecError, MigrateError};
pub use substitute::Substitution;

use camino::{Utf8Path, Utf8PathBuf};
use capimig_domain::Engine;
use diffy::PatchFormatter;
use fs_err as fs;
use tracing::{debug, info};

/// Result of migrating the text of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    /// The migrated text. Equal to the input when nothing changed.
    pub output: String,
    /// The raw-text substitution altered the input.
    pub substituted: bool,
    pub documents: usize,
    pub documents_changed: usize,
}

impl Migration {
    pub fn changed(&self) -> bool {
        self.substituted || self.documents_changed > 0
    }
}

/// Migrate manifest text.
///
/// The substitution runs first, on the raw text. Documents are then loaded
/// from the substituted text and transformed one by one. Only when a document
/// changed structurally is the file re-serialized through `codec`; a
/// substitution-only change keeps the substituted text as is.
pub fn migrate_text(
    text: &str,
    codec: &dyn DocumentCodec,
    engine: &Engine,
    substitution: &Substitution,
) -> Result<Migration, MigrateError> {
    let substituted = substitution.apply(text);
    let was_substituted = substituted.as_ref() != text;
    let mut docs = codec.load_all(&substituted).map_err(MigrateError::Parse)?;

    let mut documents_changed = 0;
    for (index, doc) in docs.iter_mut().enumerate() {
        if engine
            .transform(doc)
            .map_err(|source| MigrateError::Transform { index, source })?
        {
            documents_changed += 1;
        }
    }

    let output = if documents_changed > 0 {
        codec.dump_all(&docs).map_err(MigrateError::Serialize)?
    } else {
        substituted.into_owned()
    };

    Ok(Migration {
        substituted: was_substituted,
        output,
        documents: docs.len(),
        documents_changed,
    })
}

#[derive(Debug, Clone, Default)]
pub struct MigrateOptions {
    pub substitution: Substitution,
    /// Compute the result without touching the file.
    pub dry_run: bool,
    /// Copy the original to `<path><suffix>` before overwriting it.
    pub backup_suffix: Option<String>,
}

/// What happened to one file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: Utf8PathBuf,
    pub changed: bool,
    /// The file on disk was rewritten.
    pub written: bool,
    pub substituted: bool,
    pub documents: usize,
    pub documents_changed: usize,
    /// Unified diff of the change; empty when nothing changed.
    pub patch: String,
}

/// Migrate one file in place. It is only rewritten when something changed.
pub fn migrate_file(
    path: &Utf8Path,
    opts: &MigrateOptions,
    codec: &dyn DocumentCodec,
    engine: &Engine,
) -> Result<FileOutcome, MigrateError> {
    let before = fs::read_to_string(path).map_err(|source| MigrateError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let migration = migrate_text(&before, codec, engine, &opts.substitution)?;
    let changed = migration.changed();
    debug!(
        "{}: documents={}, changed={}, substituted={}",
        path, migration.documents, migration.documents_changed, migration.substituted
    );

    let mut written = false;
    if changed && !opts.dry_run {
        if let Some(suffix) = &opts.backup_suffix {
            let backup = Utf8PathBuf::from(format!("{path}{suffix}"));
            fs::write(&backup, &before).map_err(|source| MigrateError::Write {
                path: backup.clone(),
                source,
            })?;
            debug!("backed up {} to {}", path, backup);
        }
        fs::write(path, &migration.output).map_err(|source| MigrateError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        written = true;
        info!("wrote {}", path);
    }

    let patch = if changed {
        render_patch(path, &before, &migration.output)
    } else {
        String::new()
    };

    Ok(FileOutcome {
        path: path.to_path_buf(),
        changed,
        written,
        substituted: migration.substituted,
        documents: migration.documents,
        documents_changed: migration.documents_changed,
        patch,
    })
}

/// Unified diff between two versions of `path`, in `git diff` layout.
pub fn render_patch(path: &Utf8Path, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

    let patch = diffy::create_patch(before, after);
    let formatted = PatchFormatter::new().fmt_patch(&patch).to_string();
    // diffy repeats the file header; keep only the hunks.
    let hunks = formatted
        .find("@@")
        .map_or(formatted.as_str(), |idx| &formatted[idx..]);
    out.push_str(hunks);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
