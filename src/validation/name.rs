//! Account name validation and near-duplicate detection
//!
//! Names are unique case-insensitively across the account set. An exact
//! case-insensitive collision is a blocking error; a near collision,
//! measured by normalized Levenshtein similarity, is only a warning so
//! the user can still create legitimately similar names ("Savings 2024"
//! next to "Savings 2025").

use super::ValidationResult;
use crate::types::{Account, AccountId};
use strsim::levenshtein;

/// Names that cannot be used for an account, compared case-insensitively
const RESERVED_NAMES: [&str; 4] = ["admin", "system", "test", "default"];

/// Maximum name length in characters
const MAX_NAME_LEN: usize = 50;

/// Minimum name length in characters
const MIN_NAME_LEN: usize = 2;

/// Similarity above which two names are flagged as near duplicates
const NEAR_DUPLICATE_THRESHOLD: f64 = 0.8;

/// Validate an account name on its own
///
/// Checks emptiness, length bounds, markup characters, and the reserved
/// word list. Duplicate detection against existing accounts is a separate
/// pass, see [`check_duplicate_name`].
pub fn validate_account_name(name: &str) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let trimmed = name.trim();

    if trimmed.is_empty() {
        result.error("Account name cannot be empty");
        return result;
    }

    let len = trimmed.chars().count();
    if len < MIN_NAME_LEN {
        result.error(format!(
            "Account name must be at least {} characters",
            MIN_NAME_LEN
        ));
    }
    if len > MAX_NAME_LEN {
        result.error(format!(
            "Account name must be at most {} characters",
            MAX_NAME_LEN
        ));
    }

    if trimmed.contains('<') || trimmed.contains('>') {
        result.error("Account name cannot contain '<' or '>'");
    }

    let lowered = trimmed.to_lowercase();
    if RESERVED_NAMES.contains(&lowered.as_str()) {
        result.error(format!("'{}' is a reserved name", trimmed));
    }

    result
}

/// Normalized similarity between two names, in `[0, 1]`
///
/// `(len(longer) - levenshtein(a, b)) / len(longer)`, computed on the
/// lowercased strings. Symmetric: `similarity(a, b) == similarity(b, a)`.
/// Identical names score 1.0, fully dissimilar names score 0.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    let longer = a.chars().count().max(b.chars().count());
    if longer == 0 {
        return 1.0;
    }

    let distance = levenshtein(&a, &b);
    (longer - distance) as f64 / longer as f64
}

/// Check a candidate name against the existing account set
///
/// An exact case-insensitive match is a blocking error; a near match
/// (similarity strictly between the threshold and 1.0) is a warning.
/// The account identified by `exclude` is skipped entirely, so renaming
/// an account never flags it against itself.
pub fn check_duplicate_name(
    name: &str,
    accounts: &[Account],
    exclude: Option<&AccountId>,
) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let candidate = name.trim();
    // Lowercase like the scorer does, so a Unicode-cased collision
    // ("Épargne" vs "épargne") is caught here and not silently skipped
    // by the warning band, which excludes a similarity of exactly 1.0.
    let candidate_lower = candidate.to_lowercase();

    for account in accounts {
        if exclude.is_some_and(|id| *id == account.id) {
            continue;
        }

        if account.name.to_lowercase() == candidate_lower {
            result.error(format!("An account named '{}' already exists", account.name));
            continue;
        }

        let score = similarity(candidate, &account.name);
        if score > NEAR_DUPLICATE_THRESHOLD && score < 1.0 {
            result.warn(format!(
                "'{}' is very similar to existing account '{}'",
                candidate, account.name
            ));
        }
    }

    result
}
