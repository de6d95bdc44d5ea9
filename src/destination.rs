use crate::error::ConfigError;

pub const S3_SCHEME: &str = "s3://";

/// Removes `prefix` from the start of `value` exactly once.
///
/// This is a literal prefix match, not a character trim: `"s3stuff"` stays
/// `"s3stuff"` even though its first characters also occur in `"s3://"`.
pub fn strip_literal_prefix<'a>(value: &'a str, prefix: &str) -> &'a str {
    value.strip_prefix(prefix).unwrap_or(value)
}

/// Splits a `/` separated path and drops empty segments
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Parsed form of `[s3://]bucket[/key/prefix...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    bucket: String,
    prefix: Vec<String>,
}

impl Destination {
    pub fn parse(destination: &str) -> Result<Self, ConfigError> {
        let stripped = strip_literal_prefix(destination, S3_SCHEME);
        let (bucket, rest) = stripped.split_once('/').unwrap_or((stripped, ""));

        if bucket.is_empty() {
            return Err(ConfigError::InvalidDestination {
                destination: destination.to_string(),
                reason: "missing bucket name",
            });
        }

        Ok(Destination {
            bucket: bucket.to_string(),
            prefix: path_segments(rest).map(str::to_string).collect(),
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn prefix(&self) -> &[String] {
        &self.prefix
    }

    /// Joins the key prefix with a relative object path
    pub fn key_for(&self, relative_path: &str) -> String {
        self.prefix
            .iter()
            .map(String::as_str)
            .chain(path_segments(relative_path))
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", S3_SCHEME, self.bucket)?;
        for segment in &self.prefix {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}
