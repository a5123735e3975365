//! Naming convention utilities for generated identifiers and file names.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `FundsDeposited` | [`to_snake_case`] | `funds_deposited` |
//! | `FundsDeposited` | [`to_upper_snake_case`] | `FUNDS_DEPOSITED` |
//! | `bank_account` | [`to_pascal_case`] | `BankAccount` |

/// Convert PascalCase, camelCase or snake_case to snake_case.
///
/// Runs of capitals are kept together as one word.
///
/// # Examples
///
/// ```
/// use doctag_codegen::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("FundsDeposited"), "funds_deposited");
/// assert_eq!(to_snake_case("HTTPRequest"), "http_request");
/// assert_eq!(to_snake_case("already_snake"), "already_snake");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c == '_' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if boundary && !result.ends_with('_') {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }

    result.trim_end_matches('_').to_string()
}

/// Convert to SCREAMING_SNAKE_CASE, as used for constants.
///
/// # Examples
///
/// ```
/// use doctag_codegen::naming::to_upper_snake_case;
///
/// assert_eq!(to_upper_snake_case("MyStruct"), "MY_STRUCT");
/// ```
pub fn to_upper_snake_case(s: &str) -> String {
    to_snake_case(s).to_uppercase()
}

/// Convert a string to PascalCase.
///
/// Handles snake_case, kebab-case, and already-capitalized input.
///
/// # Examples
///
/// ```
/// use doctag_codegen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("bank_account"), "BankAccount");
/// assert_eq!(to_pascal_case("Test"), "Test");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(['-', '_'])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Whether `s` can be used as a Rust identifier fragment.
///
/// ASCII letters, digits and underscores, not starting with a digit.
pub fn is_identifier_like(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
