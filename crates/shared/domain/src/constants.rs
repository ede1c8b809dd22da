//! Domain-level constants.

// =============================================================================
// Validation
// =============================================================================

/// Minimum name length requirement
pub const MIN_NAME_LENGTH: usize = 1;

/// Maximum name length accepted by the users table
pub const MAX_NAME_LENGTH: usize = 255;

/// Maximum email length accepted by the users table
pub const MAX_EMAIL_LENGTH: usize = 320;

/// Separator every email address must contain
pub const EMAIL_SEPARATOR: char = '@';
