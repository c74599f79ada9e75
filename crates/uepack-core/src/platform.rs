use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::PlatformParseError;

/// Target platforms accepted by `BuildCookRun -targetplatform=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Win64,
    HoloLens,
    Mac,
    Ios,
    Android,
    Linux,
    LinuxArm64,
    Tvos,
}

impl Platform {
    pub const ALL: [Platform; 8] = [
        Self::Win64,
        Self::HoloLens,
        Self::Mac,
        Self::Ios,
        Self::Android,
        Self::Linux,
        Self::LinuxArm64,
        Self::Tvos,
    ];

    /// The identifier the build tool expects.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Win64 => "Win64",
            Self::HoloLens => "HoloLens",
            Self::Mac => "Mac",
            Self::Ios => "IOS",
            Self::Android => "Android",
            Self::Linux => "Linux",
            Self::LinuxArm64 => "LinuxArm64",
            Self::Tvos => "TVOS",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = PlatformParseError;

    // Identifiers are matched exactly; the build tool is case-sensitive.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.as_str() == value)
            .ok_or_else(|| PlatformParseError(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_supported_identifier() {
        for platform in Platform::ALL {
            let parsed = Platform::from_str(platform.as_str()).expect("identifier should parse");
            assert_eq!(parsed, platform);
        }
    }

    #[test]
    fn rejects_unknown_platform_by_name() {
        let err = Platform::from_str("PS5").expect_err("must fail");
        assert_eq!(err.0, "PS5");
        assert!(err.to_string().starts_with("PS5 is not a supported platform"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(Platform::from_str("win64").is_err());
        assert_eq!(Platform::from_str("IOS").unwrap(), Platform::Ios);
    }
}
