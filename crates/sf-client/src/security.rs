//! Guards for user-supplied values that end up in URLs or SOQL text.
//!
//! SObject types and external-ID field names are interpolated into REST
//! paths, so they are checked against the API-name grammar before a request
//! is built. Record IDs and external-ID values are percent-encoded as path
//! segments.
//!
//! ```rust
//! use sfdml_client::security::{soql, url};
//!
//! assert!(soql::is_safe_sobject_name("Invoice__c"));
//! assert!(!soql::is_safe_sobject_name("Account/../limits"));
//!
//! let name = soql::escape_string("O'Brien");
//! let query = format!("SELECT Id FROM Contact WHERE LastName = '{}'", name);
//! assert_eq!(query, "SELECT Id FROM Contact WHERE LastName = 'O\\'Brien'");
//!
//! assert_eq!(url::encode_param("A-1/2"), "A-1%2F2");
//! ```

/// SOQL literals and API names.
pub mod soql {
    /// Escape a value for use inside a single-quoted SOQL string literal.
    #[must_use]
    pub fn escape_string(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 8);
        for ch in value.chars() {
            match ch {
                '\'' => escaped.push_str("\\'"),
                '\\' => escaped.push_str("\\\\"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Returns true if `name` is a valid API name: an ASCII letter followed
    /// by ASCII letters, digits or underscores.
    ///
    /// ```rust
    /// use sfdml_client::security::soql;
    ///
    /// assert!(soql::is_safe_field_name("External_Id__c"));
    /// assert!(!soql::is_safe_field_name("_Name"));
    /// assert!(!soql::is_safe_field_name("Name'--"));
    /// ```
    #[must_use]
    pub fn is_safe_field_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    }

    /// SObject type names follow the same grammar as field names.
    #[must_use]
    pub fn is_safe_sobject_name(name: &str) -> bool {
        is_safe_field_name(name)
    }
}

/// URL path helpers.
pub mod url {
    /// Percent-encode a value for use as a single URL path segment.
    #[must_use]
    pub fn encode_param(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_string() {
        assert_eq!(soql::escape_string("plain"), "plain");
        assert_eq!(soql::escape_string("it's"), "it\\'s");
        assert_eq!(soql::escape_string("a\\b"), "a\\\\b");
        assert_eq!(soql::escape_string("line\nbreak\ttab"), "line\\nbreak\\ttab");
        assert_eq!(soql::escape_string("' OR Name != '"), "\\' OR Name != \\'");
    }

    #[test]
    fn test_api_names() {
        assert!(soql::is_safe_sobject_name("Account"));
        assert!(soql::is_safe_sobject_name("ns__Widget__c"));
        assert!(soql::is_safe_field_name("Id"));
        assert!(!soql::is_safe_field_name(""));
        assert!(!soql::is_safe_field_name("1Field"));
        assert!(!soql::is_safe_field_name("Field Name"));
        assert!(!soql::is_safe_sobject_name("Account/001"));
        assert!(!soql::is_safe_sobject_name("Accóunt"));
    }

    #[test]
    fn test_encode_param() {
        assert_eq!(url::encode_param("001xx000003DGb2AAG"), "001xx000003DGb2AAG");
        assert_eq!(url::encode_param("a b"), "a%20b");
        assert_eq!(url::encode_param("../limits"), "..%2Flimits");
        assert_eq!(url::encode_param("x?y#z"), "x%3Fy%23z");
    }
}
