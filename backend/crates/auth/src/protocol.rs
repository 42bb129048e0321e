//! Bitmask Error-Signaling Protocol
//!
//! Validation failures travel to the stateless frontend as a single
//! numeric code in a redirect URL; the client decodes the code against
//! its own copy of the bit table for that operation context. Each context
//! owns its own table, every flag value is a power of two, and multiple
//! simultaneous causes are OR-combined in one pass over the input rather
//! than short-circuited on the first failure.
//!
//! This is a presentation-layer protocol: the gateway works with typed
//! [`crate::error::AuthError`] values internally and projects them to a
//! code only at the HTTP boundary.

use std::fmt;

/// One failure condition within a context's bit table.
pub trait ErrorFlag: Copy + 'static {
    /// Every known flag of the context, in ascending bit order.
    const ALL: &'static [Self];

    /// The flag's bit value (a power of two).
    fn bit(self) -> u32;

    /// Human-readable message, mirrored by the frontend's table.
    fn message(self) -> &'static str;
}

/// A combined error code for one operation context.
///
/// `0` means "no condition recorded", which is ambiguous with "not yet
/// evaluated" - callers signalling success out-of-band use
/// [`ErrorCode::SUCCESS`] and check for it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ErrorCode(u32);

impl ErrorCode {
    /// Reserved sentinel meaning "operation succeeded". Lies outside the
    /// failure bits of every context that uses it.
    pub const SUCCESS: ErrorCode = ErrorCode(8);

    /// An empty code with no conditions recorded
    pub const fn new() -> Self {
        Self(0)
    }

    /// Rebuild a code from its raw wire value
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// A code with exactly one flag set
    pub fn of(flag: impl ErrorFlag) -> Self {
        Self(flag.bit())
    }

    /// Record a triggered condition
    pub fn set(&mut self, flag: impl ErrorFlag) {
        self.0 |= flag.bit();
    }

    /// True when no condition has been recorded
    pub fn is_clear(&self) -> bool {
        self.0 == 0
    }

    /// True when the given condition is set
    pub fn contains(&self, flag: impl ErrorFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    /// The raw wire value
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Decode against a context's table: the messages of every triggered
    /// flag, in ascending bit order. Bits the table does not know are
    /// ignored, so an older table stays forward-compatible with codes
    /// minted by a newer peer.
    pub fn decode<F: ErrorFlag>(&self) -> Vec<&'static str> {
        F::ALL
            .iter()
            .filter(|flag| self.contains(**flag))
            .map(|flag| flag.message())
            .collect()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Context: login
// ============================================================================

/// Failure bits for the login context.
///
/// Unknown usernames and wrong passwords deliberately share one generic
/// bit so the code cannot be used to enumerate accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFlag {
    InvalidCredentials,
    Internal,
}

impl ErrorFlag for LoginFlag {
    const ALL: &'static [Self] = &[Self::InvalidCredentials, Self::Internal];

    fn bit(self) -> u32 {
        match self {
            Self::InvalidCredentials => 1,
            Self::Internal => 2,
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Invalid username or password",
            Self::Internal => {
                "An internal error occurred, please consult the site administrators."
            }
        }
    }
}

// ============================================================================
// Context: registration
// ============================================================================

/// Failure bits for the registration context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationFlag {
    EmptyUsername,
    EmptyPassword,
    EmptyEmail,
    MalformedEmail,
    PasswordTooShort,
    UsernameTaken,
    EmailTaken,
    Internal,
}

impl ErrorFlag for RegistrationFlag {
    const ALL: &'static [Self] = &[
        Self::EmptyUsername,
        Self::EmptyPassword,
        Self::EmptyEmail,
        Self::MalformedEmail,
        Self::PasswordTooShort,
        Self::UsernameTaken,
        Self::EmailTaken,
        Self::Internal,
    ];

    fn bit(self) -> u32 {
        match self {
            Self::EmptyUsername => 1,
            Self::EmptyPassword => 2,
            Self::EmptyEmail => 4,
            Self::MalformedEmail => 128,
            Self::PasswordTooShort => 256,
            Self::UsernameTaken => 512,
            Self::EmailTaken => 1024,
            Self::Internal => 2048,
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::EmptyUsername => "Username cannot be empty",
            Self::EmptyPassword => "Password cannot be empty",
            Self::EmptyEmail => "Email address cannot be empty",
            Self::MalformedEmail => "Email address is not valid",
            Self::PasswordTooShort => "Password must be at least 8 characters",
            Self::UsernameTaken => "That username is already taken",
            Self::EmailTaken => "That email address is already in use",
            Self::Internal => {
                "An internal error occurred, please consult the site administrators."
            }
        }
    }
}

// ============================================================================
// Context: new student
// ============================================================================

/// Failure bits for the new-student context. The flow itself lives in the
/// student module; the table is owned here so bit assignments stay in one
/// place on the server side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewStudentFlag {
    NameCombinationTaken,
    InvalidBelt,
    EmptyFirstName,
    EmptyLastName,
    EmptyBelt,
    NotSignedIn,
    Internal,
}

impl ErrorFlag for NewStudentFlag {
    const ALL: &'static [Self] = &[
        Self::NameCombinationTaken,
        Self::InvalidBelt,
        Self::EmptyFirstName,
        Self::EmptyLastName,
        Self::EmptyBelt,
        Self::NotSignedIn,
        Self::Internal,
    ];

    fn bit(self) -> u32 {
        match self {
            Self::NameCombinationTaken => 1,
            Self::InvalidBelt => 2,
            Self::EmptyFirstName => 4,
            Self::EmptyLastName => 8,
            Self::EmptyBelt => 16,
            Self::NotSignedIn => 32,
            Self::Internal => 64,
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::NameCombinationTaken => "A student with that name already exists",
            Self::InvalidBelt => "That belt rank is not recognized",
            Self::EmptyFirstName => "First name cannot be empty",
            Self::EmptyLastName => "Last name cannot be empty",
            Self::EmptyBelt => "Belt rank cannot be empty",
            Self::NotSignedIn => "You must be signed in to add a student",
            Self::Internal => {
                "An internal error occurred, please consult the site administrators."
            }
        }
    }
}

// ============================================================================
// Context: leadership-point change
// ============================================================================

/// Failure bits for the leadership-point change context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointChangeFlag {
    StudentNotFound,
    InvalidPoints,
    Internal,
}

impl ErrorFlag for PointChangeFlag {
    const ALL: &'static [Self] = &[
        Self::StudentNotFound,
        Self::InvalidPoints,
        Self::Internal,
    ];

    fn bit(self) -> u32 {
        match self {
            Self::StudentNotFound => 1,
            Self::InvalidPoints => 2,
            Self::Internal => 4,
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::StudentNotFound => "Student was not found",
            Self::InvalidPoints => "An invalid number of leadership points were entered",
            Self::Internal => {
                "An internal error occurred, please consult the site administrators."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits_are_powers_of_two() {
        fn check<F: ErrorFlag>() {
            for flag in F::ALL {
                assert_eq!(flag.bit().count_ones(), 1);
            }
        }
        check::<LoginFlag>();
        check::<RegistrationFlag>();
        check::<NewStudentFlag>();
        check::<PointChangeFlag>();
    }

    #[test]
    fn test_tables_are_ascending() {
        fn check<F: ErrorFlag>() {
            let bits: Vec<u32> = F::ALL.iter().map(|f| f.bit()).collect();
            let mut sorted = bits.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(bits, sorted);
        }
        check::<LoginFlag>();
        check::<RegistrationFlag>();
        check::<NewStudentFlag>();
        check::<PointChangeFlag>();
    }

    #[test]
    fn test_codes_combine_additively() {
        let mut code = ErrorCode::new();
        code.set(RegistrationFlag::EmptyPassword);
        code.set(RegistrationFlag::EmailTaken);

        assert_eq!(code.bits(), 2 | 1024);
        assert_eq!(code.bits(), 1026);
    }

    #[test]
    fn test_decode_reports_every_cause() {
        let code = ErrorCode::from_bits(2 | 1024);
        let messages = code.decode::<RegistrationFlag>();

        assert_eq!(
            messages,
            vec![
                "Password cannot be empty",
                "That email address is already in use",
            ]
        );
    }

    #[test]
    fn test_decode_orders_by_ascending_bit() {
        let mut code = ErrorCode::new();
        // set out of order
        code.set(RegistrationFlag::UsernameTaken);
        code.set(RegistrationFlag::EmptyUsername);

        let messages = code.decode::<RegistrationFlag>();
        assert_eq!(messages[0], "Username cannot be empty");
        assert_eq!(messages[1], "That username is already taken");
    }

    #[test]
    fn test_decode_ignores_unknown_bits() {
        // 64 is not assigned in the registration table
        let code = ErrorCode::from_bits(1 | 64);
        let messages = code.decode::<RegistrationFlag>();

        assert_eq!(messages, vec!["Username cannot be empty"]);
    }

    #[test]
    fn test_short_password_with_taken_username() {
        let mut code = ErrorCode::new();
        code.set(RegistrationFlag::PasswordTooShort);
        code.set(RegistrationFlag::UsernameTaken);

        assert_eq!(code.bits(), 768);
    }

    #[test]
    fn test_success_sentinel_is_out_of_band() {
        assert_eq!(ErrorCode::SUCCESS.bits(), 8);

        // not a failure bit in the contexts that use the sentinel
        for flag in PointChangeFlag::ALL {
            assert_ne!(flag.bit(), ErrorCode::SUCCESS.bits());
        }
        for flag in RegistrationFlag::ALL {
            assert_ne!(flag.bit(), ErrorCode::SUCCESS.bits());
        }
    }

    #[test]
    fn test_zero_is_not_success() {
        assert!(ErrorCode::new().is_clear());
        assert_ne!(ErrorCode::new(), ErrorCode::SUCCESS);
    }

    #[test]
    fn test_display_is_the_wire_value() {
        let code = ErrorCode::from_bits(768);
        assert_eq!(code.to_string(), "768");
    }
}
