use crate::error::ConfigError;
use std::fmt::Display;
use std::str::FromStr;

/// Region used when `AWS_DEFAULT_REGION` is not set
pub const DEFAULT_REGION: &str = "us-east-1";

/// All regions an S3 bucket can live in
pub const KNOWN_REGIONS: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "us-gov-east-1",
    "us-gov-west-1",
    "ca-central-1",
    "ca-west-1",
    "sa-east-1",
    "mx-central-1",
    "eu-central-1",
    "eu-central-2",
    "eu-north-1",
    "eu-south-1",
    "eu-south-2",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "af-south-1",
    "il-central-1",
    "me-central-1",
    "me-south-1",
    "ap-east-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-south-1",
    "ap-south-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
    "ap-southeast-4",
    "ap-southeast-5",
    "ap-southeast-7",
    "cn-north-1",
    "cn-northwest-1",
];

/// A region name that is guaranteed to be in `KNOWN_REGIONS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region(&'static str);

impl Region {
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl Default for Region {
    fn default() -> Self {
        Region(DEFAULT_REGION)
    }
}

impl FromStr for Region {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KNOWN_REGIONS
            .iter()
            .copied()
            .find(|known| *known == s)
            .map(Region)
            .ok_or_else(|| ConfigError::UnknownRegion(s.to_string()))
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_us_east_1() {
        assert_eq!(Region::default().name(), "us-east-1");
        assert!(KNOWN_REGIONS.contains(&DEFAULT_REGION));
    }

    #[test]
    fn parse_known_region() {
        let region: Region = "eu-west-1".parse().unwrap();
        assert_eq!(region.name(), "eu-west-1");
        assert_eq!(region.to_string(), "eu-west-1");
    }

    #[test]
    fn parse_unknown_region() {
        let err = "mars-west-1".parse::<Region>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownRegion(ref name) if name == "mars-west-1"));
        assert_eq!(err.to_string(), "Unknown AWS Region `mars-west-1`");
    }

    #[test]
    fn region_names_are_case_sensitive() {
        assert!("US-EAST-1".parse::<Region>().is_err());
        assert!("".parse::<Region>().is_err());
    }
}
