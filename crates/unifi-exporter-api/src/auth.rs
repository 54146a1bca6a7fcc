/// The platform type of the UniFi controller.
///
/// Determines URL prefixes and login paths for the session API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPlatform {
    /// UniFi OS device (UDM, UCG, etc.) -- port 443, `/proxy/network/` prefix.
    UnifiOs,
    /// Standalone Network Application (Java) -- port 8443, no prefix.
    ClassicController,
}

impl ControllerPlatform {
    /// The path prefix for legacy API endpoints.
    pub fn legacy_prefix(self) -> &'static str {
        match self {
            Self::UnifiOs => "/proxy/network",
            Self::ClassicController => "",
        }
    }

    /// The login endpoint path.
    pub fn login_path(self) -> &'static str {
        match self {
            Self::UnifiOs => "/api/auth/login",
            Self::ClassicController => "/api/login",
        }
    }

    /// The logout endpoint path.
    pub fn logout_path(self) -> &'static str {
        match self {
            Self::UnifiOs => "/api/auth/logout",
            Self::ClassicController => "/api/logout",
        }
    }
}

impl std::fmt::Display for ControllerPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnifiOs => f.write_str("unifi-os"),
            Self::ClassicController => f.write_str("classic"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unifi_os_paths_use_proxy_prefix() {
        let platform = ControllerPlatform::UnifiOs;
        assert_eq!(platform.legacy_prefix(), "/proxy/network");
        assert_eq!(platform.login_path(), "/api/auth/login");
        assert_eq!(platform.logout_path(), "/api/auth/logout");
    }

    #[test]
    fn classic_paths_have_no_prefix() {
        let platform = ControllerPlatform::ClassicController;
        assert_eq!(platform.legacy_prefix(), "");
        assert_eq!(platform.login_path(), "/api/login");
        assert_eq!(platform.to_string(), "classic");
    }
}
