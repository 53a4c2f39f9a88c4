use std::collections::HashMap;
use std::fmt;

/// Body returned by the sidecar secrets API: secret name to secret value
///
/// A `null` body or a `null` value decodes fine and reads as an empty value.
pub type SecretResponse = Option<HashMap<String, Option<String>>>;

/// The two values fetched for one `GET /secret` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedSecrets {
    pub secret_one: String,
    pub secret_two: String,
}

impl fmt::Display for CombinedSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Result from Go API: secretOne {} | secretTwo: {}",
            self.secret_one, self.secret_two
        )
    }
}
