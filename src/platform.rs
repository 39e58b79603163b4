//! Target platforms and their per-platform conventions.
//!
//! Each platform contributes a [`PlatformConventions`] implementation that
//! knows where its component sources live, which file extension they use and
//! the minimum touch target the platform guidelines require. A
//! [`PlatformRegistry`] is built explicitly by the caller and passed to the
//! validators and reporters that need path or sizing conventions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;

/// A target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    Web,
}

impl Platform {
    /// All supported platforms, in canonical order.
    pub const ALL: [Platform; 3] = [Platform::Ios, Platform::Android, Platform::Web];

    /// Lowercase tag used in paths and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Web => "web",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            "web" => Ok(Self::Web),
            other => Err(Error::Config(format!("unknown platform '{}'", other))),
        }
    }
}

/// Join platform tags for human-readable output ("ios and android").
pub fn join_platforms(platforms: &[Platform], separator: &str) -> String {
    platforms
        .iter()
        .map(Platform::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Conventions a platform imposes on generated component sources.
pub trait PlatformConventions: Send + Sync {
    /// The platform these conventions describe.
    fn platform(&self) -> Platform;

    /// Source file extension, without the leading dot.
    fn file_extension(&self) -> &'static str;

    /// Display unit for sizes ("pt", "dp", "px").
    fn size_unit(&self) -> &'static str;

    /// Minimum touch target edge length, in `size_unit`.
    fn min_touch_target(&self) -> f64;

    /// Directory holding the platform's component sources.
    fn source_dir(&self) -> String {
        format!("platforms/{}", self.platform())
    }

    /// Path of the source file implementing `component`.
    fn file_path(&self, component: &str) -> String {
        format!(
            "{}/{}.{}",
            self.source_dir(),
            component,
            self.file_extension()
        )
    }
}

/// iOS (Swift) conventions.
#[derive(Debug, Clone, Copy, Default)]
pub struct IosConventions;

impl PlatformConventions for IosConventions {
    fn platform(&self) -> Platform {
        Platform::Ios
    }

    fn file_extension(&self) -> &'static str {
        "swift"
    }

    fn size_unit(&self) -> &'static str {
        "pt"
    }

    fn min_touch_target(&self) -> f64 {
        44.0
    }
}

/// Android (Kotlin) conventions.
#[derive(Debug, Clone, Copy, Default)]
pub struct AndroidConventions;

impl PlatformConventions for AndroidConventions {
    fn platform(&self) -> Platform {
        Platform::Android
    }

    fn file_extension(&self) -> &'static str {
        "kt"
    }

    fn size_unit(&self) -> &'static str {
        "dp"
    }

    fn min_touch_target(&self) -> f64 {
        48.0
    }
}

/// Web (TypeScript) conventions.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebConventions;

impl PlatformConventions for WebConventions {
    fn platform(&self) -> Platform {
        Platform::Web
    }

    fn file_extension(&self) -> &'static str {
        "ts"
    }

    fn size_unit(&self) -> &'static str {
        "px"
    }

    fn min_touch_target(&self) -> f64 {
        44.0
    }
}

/// Read-only lookup from platform tag to its conventions.
///
/// Built once by the caller and shared by reference; nothing in this crate
/// keeps a global registry.
pub struct PlatformRegistry {
    ios: Box<dyn PlatformConventions>,
    android: Box<dyn PlatformConventions>,
    web: Box<dyn PlatformConventions>,
}

impl PlatformRegistry {
    /// Registry with the standard conventions for every platform.
    pub fn new() -> Self {
        Self {
            ios: Box::new(IosConventions),
            android: Box::new(AndroidConventions),
            web: Box::new(WebConventions),
        }
    }

    /// Replace the conventions for the platform `conventions` describes.
    pub fn with_conventions(mut self, conventions: Box<dyn PlatformConventions>) -> Self {
        match conventions.platform() {
            Platform::Ios => self.ios = conventions,
            Platform::Android => self.android = conventions,
            Platform::Web => self.web = conventions,
        }
        self
    }

    /// Conventions for `platform`.
    pub fn get(&self, platform: Platform) -> &dyn PlatformConventions {
        match platform {
            Platform::Ios => self.ios.as_ref(),
            Platform::Android => self.android.as_ref(),
            Platform::Web => self.web.as_ref(),
        }
    }

    /// Source path of `component` on `platform`.
    pub fn file_path(&self, platform: Platform, component: &str) -> String {
        self.get(platform).file_path(component)
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PlatformRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                Platform::ALL
                    .iter()
                    .map(|p| (p.as_str(), self.get(*p).file_extension())),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_standard_paths() {
        let registry = PlatformRegistry::new();
        assert_eq!(
            registry.file_path(Platform::Ios, "Button"),
            "platforms/ios/Button.swift"
        );
        assert_eq!(
            registry.file_path(Platform::Android, "Button"),
            "platforms/android/Button.kt"
        );
        assert_eq!(
            registry.file_path(Platform::Web, "Button"),
            "platforms/web/Button.ts"
        );
    }

    #[test]
    fn test_extensions_are_unique() {
        let registry = PlatformRegistry::new();
        let extensions: HashSet<_> = Platform::ALL
            .iter()
            .map(|p| registry.get(*p).file_extension())
            .collect();
        assert_eq!(extensions.len(), Platform::ALL.len());
    }

    #[test]
    fn test_override_conventions() {
        struct FlatWeb;
        impl PlatformConventions for FlatWeb {
            fn platform(&self) -> Platform {
                Platform::Web
            }
            fn file_extension(&self) -> &'static str {
                "tsx"
            }
            fn size_unit(&self) -> &'static str {
                "px"
            }
            fn min_touch_target(&self) -> f64 {
                24.0
            }
            fn source_dir(&self) -> String {
                "web/components".to_string()
            }
        }

        let registry = PlatformRegistry::new().with_conventions(Box::new(FlatWeb));
        assert_eq!(
            registry.file_path(Platform::Web, "Card"),
            "web/components/Card.tsx"
        );
        assert_eq!(registry.get(Platform::Web).min_touch_target(), 24.0);
        assert_eq!(registry.get(Platform::Android).min_touch_target(), 48.0);
    }

    #[test]
    fn test_platform_parsing() {
        assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!(" web ".parse::<Platform>().unwrap(), Platform::Web);
        assert!("windows".parse::<Platform>().is_err());
        assert_eq!(Platform::Android.to_string(), "android");
        assert_eq!(
            join_platforms(&[Platform::Ios, Platform::Android], " and "),
            "ios and android"
        );
    }

    #[test]
    fn test_platform_serde() {
        let json = serde_json::to_string(&Platform::Ios).unwrap();
        assert_eq!(json, "\"ios\"");
        let parsed: Platform = serde_json::from_str("\"android\"").unwrap();
        assert_eq!(parsed, Platform::Android);
    }
}
