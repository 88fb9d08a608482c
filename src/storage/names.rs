//! Stored-File Naming Module
//!
//! Media-type allow-list and collision-resistant name derivation for
//! uploads and artifacts.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

// == Constants ==
/// Media types accepted for upload
pub const ALLOWED_MEDIA_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Suffix appended to artifact file names
pub const OUTPUT_SUFFIX: &str = "output";

/// Process-wide counter folded into every stored name. Two uploads landing in
/// the same millisecond still get distinct names.
static NAME_SEQ: AtomicU64 = AtomicU64::new(0);

// == Media Type Validation ==
/// Returns true if the declared media type is on the allow-list.
///
/// Any parameters (e.g. `image/png; foo=bar`) are ignored.
pub fn is_allowed_media_type(media_type: &str) -> bool {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    ALLOWED_MEDIA_TYPES.contains(&essence.as_str())
}

/// Maps an allowed media type to the file extension used when the client
/// supplied no usable file name.
pub fn extension_for(media_type: &str) -> &'static str {
    let essence = media_type.split(';').next().unwrap_or("").trim();
    match essence.to_ascii_lowercase().as_str() {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "png",
    }
}

// == Name Derivation ==
/// Reduces a client-supplied file name to a safe base stem and extension.
///
/// Path components are stripped so a name like `../../etc/passwd` cannot
/// escape the uploads directory, and stem characters outside
/// `[A-Za-z0-9_-]` are replaced with `_`.
pub fn split_original_name(original: &str) -> (String, Option<String>) {
    let leaf = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original);

    let (stem, ext) = match leaf.rsplit_once('.') {
        Some((s, e)) if !s.is_empty() && !e.is_empty() => {
            let e: String = e.chars().filter(char::is_ascii_alphanumeric).collect();
            (s, (!e.is_empty()).then_some(e))
        }
        _ => (leaf, None),
    };

    let stem: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let stem = if stem.is_empty() {
        "image".to_string()
    } else {
        stem
    };
    (stem, ext)
}

/// Derives a unique stored name for an accepted upload:
/// `<base>-<millis>-<seq>.<ext>`.
pub fn upload_file_name(original: &str, media_type: &str) -> String {
    let (stem, ext) = split_original_name(original);
    let ext = ext.unwrap_or_else(|| extension_for(media_type).to_string());
    let millis = Utc::now().timestamp_millis();
    let seq = NAME_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{stem}-{millis}-{seq}.{ext}")
}

/// Derives the artifact name for a stored upload name:
/// `<upload-stem>-output.png`. The result is always a PNG.
pub fn output_file_name(upload_name: &str) -> String {
    let stem = upload_name
        .rsplit_once('.')
        .map(|(s, _)| s)
        .unwrap_or(upload_name);
    format!("{stem}-{OUTPUT_SUFFIX}.png")
}
