//! Property-Based Tests for Storage Naming
//!
//! Uses proptest to verify the uniqueness and sanitization guarantees of the
//! stored-file naming scheme.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::storage::names::{
    is_allowed_media_type, output_file_name, split_original_name, upload_file_name,
};

// == Strategies ==
/// Generates arbitrary client-supplied file names, including hostile ones
/// with path separators and unicode.
fn original_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9_-]{1,32}\\.(png|jpg|jpeg|webp)",
        "[a-zA-Z0-9_./\\\\-]{0,64}",
        ".{0,32}",
    ]
}

fn allowed_media_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("image/jpeg".to_string()),
        Just("image/png".to_string()),
        Just("image/webp".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any client file name, the stored stem contains no path separators,
    // so a stored upload can never escape the uploads directory.
    #[test]
    fn prop_stem_has_no_path_separators(original in original_name_strategy()) {
        let (stem, ext) = split_original_name(&original);
        prop_assert!(!stem.contains('/'), "stem contains '/': {}", stem);
        prop_assert!(!stem.contains('\\'), "stem contains '\\': {}", stem);
        prop_assert!(!stem.is_empty(), "stem must never be empty");
        if let Some(ext) = ext {
            prop_assert!(!ext.contains('/') && !ext.contains('\\'));
        }
    }

    // For any client file name, repeated uploads always get distinct stored
    // names, even within the same clock tick.
    #[test]
    fn prop_upload_names_never_collide(
        original in original_name_strategy(),
        media_type in allowed_media_type_strategy(),
        count in 2usize..16,
    ) {
        let mut seen = HashSet::new();
        for _ in 0..count {
            let name = upload_file_name(&original, &media_type);
            prop_assert!(seen.insert(name.clone()), "duplicate stored name: {}", name);
        }
    }

    // Every artifact name ends in the fixed suffix and .png regardless of the
    // upload's original extension.
    #[test]
    fn prop_output_names_are_png(
        original in original_name_strategy(),
        media_type in allowed_media_type_strategy(),
    ) {
        let upload = upload_file_name(&original, &media_type);
        let output = output_file_name(&upload);
        prop_assert!(output.ends_with("-output.png"), "bad artifact name: {}", output);
    }

    // The allow-list accepts exactly the three image types, with case and
    // parameters ignored.
    #[test]
    fn prop_allow_list_is_closed(subtype in "[a-z]{1,12}") {
        let media_type = format!("image/{subtype}");
        let expected = matches!(subtype.as_str(), "jpeg" | "png" | "webp");
        prop_assert_eq!(is_allowed_media_type(&media_type), expected);
    }
}
