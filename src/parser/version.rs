use regex::Regex;
use std::sync::LazyLock;

/// `epoch:` or `epoch-` prefix followed by at least MAJOR.MINOR, with an
/// optional PATCH. Only the dotted run is kept.
static DOTTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+[:-])?(\d+\.\d+(?:\.\d+)?)").expect("valid regex"));

/// Everything up to the first alphabetic character.
static NON_ALPHA_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^a-zA-Z]+").expect("valid regex"));

/// Canonicalizes a raw dpkg/yum version string into a best-effort dotted
/// form. Three tiers, never an error:
///
/// 1. strip an optional numeric epoch and keep the leading
///    `MAJOR.MINOR[.PATCH]` run (`1:1.2.11.dfsg-0ubuntu2` -> `1.2.11`),
/// 2. otherwise keep the non-alphabetic prefix
///    (`237-3ubuntu10.29` -> `237-3`),
/// 3. otherwise pass the raw string through unchanged.
///
/// The result is lossy by design; a version the service cannot resolve
/// simply comes back with no vulnerability data.
pub fn canonicalize_version(raw: &str) -> String {
    if let Some(caps) = DOTTED.captures(raw) {
        return caps[2].to_string();
    }
    if let Some(m) = NON_ALPHA_PREFIX.find(raw) {
        return m.as_str().to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_and_suffix_stripped() {
        assert_eq!(canonicalize_version("1:1.2.11.dfsg-0ubuntu2"), "1.2.11");
        assert_eq!(canonicalize_version("2:8.0.1453-1ubuntu1.1"), "8.0.1453");
        assert_eq!(canonicalize_version("4:7.4.0-1ubuntu2.3"), "7.4.0");
        assert_eq!(canonicalize_version("32:9.8.2-0.68.rc1.el6_10.1"), "9.8.2");
        assert_eq!(canonicalize_version("1:3.6-1"), "3.6");
    }

    #[test]
    fn test_plain_dotted_versions() {
        assert_eq!(canonicalize_version("1.6.12"), "1.6.12");
        assert_eq!(canonicalize_version("5.2.2-1.3"), "5.2.2");
        assert_eq!(canonicalize_version("3.1-20170329-1"), "3.1");
        assert_eq!(canonicalize_version("2.31.1-0.4ubuntu3.3"), "2.31.1");
        assert_eq!(canonicalize_version("1.29b-2ubuntu0.1"), "1.29");
        assert_eq!(canonicalize_version("3.116ubuntu1"), "3.116");
        assert_eq!(canonicalize_version("5.4"), "5.4");
    }

    #[test]
    fn test_non_alphabetic_prefix_fallback() {
        // No MAJOR.MINOR run at the front, so the dotted tier fails and the
        // epoch-looking "237-" is retained rather than stripped.
        assert_eq!(canonicalize_version("237-3ubuntu10.29"), "237-3");
        assert_eq!(canonicalize_version("20180409"), "20180409");
        assert_eq!(canonicalize_version("6-8"), "6-8");
    }

    #[test]
    fn test_raw_fallback() {
        assert_eq!(canonicalize_version("beta"), "beta");
        assert_eq!(canonicalize_version(""), "");
    }
}
