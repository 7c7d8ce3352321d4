//! Static model registry: short names, canonical identifiers, and strides.
//!
//! Both tables are immutable and seeded at compile time; there is no dynamic
//! registration. The stride is the sliding-window step the consuming runtime
//! uses for sequences longer than the model's maximum position length.

/// Stride used for any model without a registered entry.
pub const DEFAULT_STRIDE: usize = 256;

/// Short name -> canonical HuggingFace identifier for the default models.
pub const DEFAULT_MODELS: &[(&str, &str)] = &[
    ("distilbert", "mirth/chonky_distilbert_base_uncased_1"),
    ("modernbert-base", "mirth/chonky_modernbert_base_1"),
    ("modernbert-large", "mirth/chonky_modernbert_large_1"),
];

/// Canonical identifier -> sliding-window stride.
pub const MODEL_STRIDES: &[(&str, usize)] = &[
    ("mirth/chonky_distilbert_base_uncased_1", 256),
    ("mirth/chonky_modernbert_base_1", 512),
    ("mirth/chonky_modernbert_large_1", 512),
];

/// Look up the stride for a canonical model identifier.
///
/// Returns [`DEFAULT_STRIDE`] for any unrecognized identifier.
#[must_use]
pub fn stride_for(model_id: &str) -> usize {
    MODEL_STRIDES
        .iter()
        .find(|(id, _)| *id == model_id)
        .map_or(DEFAULT_STRIDE, |(_, stride)| *stride)
}

/// Find the registry short name for a model identifier.
///
/// Matches an entry whose canonical identifier equals `model_id`, or whose
/// short name is a suffix of `model_id`.
#[must_use]
pub fn short_name_for(model_id: &str) -> Option<&'static str> {
    DEFAULT_MODELS
        .iter()
        .find(|(short, canonical)| *canonical == model_id || model_id.ends_with(short))
        .map(|(short, _)| *short)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stride_for_registered() {
        assert_eq!(stride_for("mirth/chonky_distilbert_base_uncased_1"), 256);
        assert_eq!(stride_for("mirth/chonky_modernbert_base_1"), 512);
        assert_eq!(stride_for("mirth/chonky_modernbert_large_1"), 512);
    }

    #[test]
    fn test_stride_for_unregistered_is_default() {
        assert_eq!(stride_for("sentence-transformers/all-MiniLM-L6-v2"), 256);
        assert_eq!(stride_for(""), 256);
        assert_eq!(stride_for("distilbert"), DEFAULT_STRIDE);
    }

    #[test]
    fn test_short_name_for_canonical_id() {
        assert_eq!(
            short_name_for("mirth/chonky_modernbert_base_1"),
            Some("modernbert-base")
        );
    }

    #[test]
    fn test_short_name_for_suffix() {
        assert_eq!(short_name_for("distilbert"), Some("distilbert"));
        assert_eq!(short_name_for("acme/my-distilbert"), Some("distilbert"));
    }

    #[test]
    fn test_short_name_for_unknown() {
        assert_eq!(short_name_for("sentence-transformers/all-MiniLM-L6-v2"), None);
    }

    #[test]
    fn test_every_default_model_has_a_stride() {
        for (_, canonical) in DEFAULT_MODELS {
            assert!(
                MODEL_STRIDES.iter().any(|(id, _)| id == canonical),
                "no stride registered for {canonical}"
            );
        }
    }
}
