//! Host platform detection for the version banner and launcher lookup.
use std::fmt;

/// Detected operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    /// Linux
    Linux,
    /// macOS
    MacOs,
    /// Windows
    Windows,
    /// Any other target, by its `std::env::consts::OS` name.
    Other(&'static str),
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "mac os x"),
            Self::Windows => write!(f, "windows"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Host platform information shown in the version banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Operating system.
    pub os: Os,
    /// CPU architecture, e.g. `x86_64`.
    pub arch: &'static str,
    /// OS family, `unix` or `windows`.
    pub family: &'static str,
}

impl Platform {
    /// Detect the current platform from compile-time target information.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            os: Self::detect_os(),
            arch: std::env::consts::ARCH,
            family: std::env::consts::FAMILY,
        }
    }

    /// Create a platform with explicit values (for testing).
    #[cfg(test)]
    pub const fn new(os: Os, arch: &'static str, family: &'static str) -> Self {
        Self { os, arch, family }
    }

    /// Whether this is a Windows host.
    #[must_use]
    pub const fn is_windows(&self) -> bool {
        matches!(self.os, Os::Windows)
    }

    /// File name of the legacy launcher script in `<installation>/bin`.
    #[must_use]
    pub const fn legacy_launcher_name(&self) -> &'static str {
        if self.is_windows() {
            "mvn-legacy.cmd"
        } else {
            "mvn-legacy"
        }
    }

    fn detect_os() -> Os {
        match std::env::consts::OS {
            "linux" => Os::Linux,
            "macos" => Os::MacOs,
            "windows" => Os::Windows,
            other => Os::Other(other),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OS name: \"{}\", arch: \"{}\", family: \"{}\"",
            self.os, self.arch, self.family
        )
    }
}
