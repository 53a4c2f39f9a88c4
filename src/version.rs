// Both values are stamped at compile time, e.g.
// `APP_VERSION=1.2.0 GIT_COMMIT=$(git rev-parse HEAD) cargo build --release`.

/// Release version of the service, `edge` for untagged builds.
pub fn version() -> &'static str {
    option_env!("APP_VERSION").unwrap_or("edge")
}

/// Git commit SHA the binary was built from, empty when not stamped.
pub fn commit() -> &'static str {
    option_env!("GIT_COMMIT").unwrap_or("")
}
