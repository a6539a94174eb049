use sha2::{Digest, Sha256};

/// Fingerprint of a fitted vocabulary: sha256 over the length-prefixed terms
/// in column order, the idf weights' bit patterns and the weighting options.
///
/// Two artifacts share a fingerprint only if they map every document to the
/// same vector, so classifiers can record the one they were trained against.
pub fn vocabulary_fingerprint(terms: &[&str], idf: Option<&[f64]>, options: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update((terms.len() as u64).to_be_bytes());
    for term in terms {
        hasher.update((term.len() as u64).to_be_bytes());
        hasher.update(term.as_bytes());
    }
    match idf {
        Some(weights) => {
            hasher.update([1u8]);
            for w in weights {
                hasher.update(w.to_bits().to_be_bytes());
            }
        }
        None => hasher.update([0u8]),
    }
    hasher.update((options.len() as u64).to_be_bytes());
    hasher.update(options.as_bytes());
    to_hex(&hasher.finalize())
}

pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
