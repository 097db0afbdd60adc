//! Field validation helpers
//!
//! These predicates back the request DTO validators in the api crate. They
//! encode the account field rules in one place so the HTTP layer and any
//! future callers agree on what a well-formed value is.

/// Common validation functions
pub mod validators {
    use once_cell::sync::Lazy;
    use regex::Regex;

    /// Minimum username length
    pub const USERNAME_MIN_LEN: usize = 4;
    /// Maximum username length
    pub const USERNAME_MAX_LEN: usize = 32;
    /// Minimum password length
    pub const PASSWORD_MIN_LEN: usize = 8;
    /// Verification codes are exactly this many digits
    pub const CODE_LEN: usize = 6;

    static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email regex is valid")
    });

    /// Check if a string is not empty after trimming
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a string length is within bounds (inclusive)
    pub fn length_between(value: &str, min: usize, max: usize) -> bool {
        let len = value.chars().count();
        len >= min && len <= max
    }

    /// Usernames are 4-32 characters
    pub fn is_valid_username(username: &str) -> bool {
        not_empty(username) && length_between(username, USERNAME_MIN_LEN, USERNAME_MAX_LEN)
    }

    /// Password policy: at least 8 characters, ASCII letters and digits
    /// only, with at least one lowercase letter, one uppercase letter, and
    /// one digit.
    pub fn is_valid_password(password: &str) -> bool {
        if password.len() < PASSWORD_MIN_LEN {
            return false;
        }
        if !password.chars().all(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        password.chars().any(|c| c.is_ascii_lowercase())
            && password.chars().any(|c| c.is_ascii_uppercase())
            && password.chars().any(|c| c.is_ascii_digit())
    }

    /// Check if an email address is well-formed
    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_REGEX.is_match(email)
    }

    /// Sex is a single character, `M` or `F`
    pub fn is_valid_sex(sex: &str) -> bool {
        sex == "M" || sex == "F"
    }

    /// Verification codes are exactly six ASCII digits
    pub fn is_valid_code(code: &str) -> bool {
        code.len() == CODE_LEN && code.chars().all(|c| c.is_ascii_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::validators::*;

    #[test]
    fn test_username_bounds() {
        assert!(is_valid_username("abcd"));
        assert!(is_valid_username(&"a".repeat(32)));
        assert!(!is_valid_username("abc"));
        assert!(!is_valid_username(&"a".repeat(33)));
        assert!(!is_valid_username("   "));
    }

    #[test]
    fn test_password_policy() {
        assert!(is_valid_password("Abcdef12"));
        assert!(is_valid_password("XyZ12345"));
        // too short
        assert!(!is_valid_password("Abc12"));
        // missing uppercase
        assert!(!is_valid_password("abcdef12"));
        // missing lowercase
        assert!(!is_valid_password("ABCDEF12"));
        // missing digit
        assert!(!is_valid_password("Abcdefgh"));
        // non-alphanumeric characters rejected
        assert!(!is_valid_password("Abcdef12!"));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@sub.domain.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("@domain.com"));
    }

    #[test]
    fn test_sex_values() {
        assert!(is_valid_sex("M"));
        assert!(is_valid_sex("F"));
        assert!(!is_valid_sex("m"));
        assert!(!is_valid_sex("X"));
        assert!(!is_valid_sex("MF"));
    }

    #[test]
    fn test_code_shape() {
        assert!(is_valid_code("042517"));
        assert!(is_valid_code("000000"));
        assert!(!is_valid_code("42517"));
        assert!(!is_valid_code("0425178"));
        assert!(!is_valid_code("04251a"));
    }
}
