use axum::http::Method;
use mercato_core::{ConfigError, MercatoConfig};
use regex::Regex;

pub const DEFAULT_PUBLIC: [&str; 5] = [
    "POST ^/api/auth/(register|login|refresh)$",
    "GET ^/api/products(/.*)?$",
    "GET ^/api/shops(/[0-9]+)?$",
    "GET ^/api/reviews/product/.*$",
    "GET ^/api/files/[^/]+$",
];

/// `METHOD pattern`; the pattern always has to match the whole path.
#[derive(Debug, Clone)]
pub struct PublicRule {
    method: Method,
    pattern: Regex,
}

impl PublicRule {
    pub fn parse(rule: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::Load(format!("Invalid public rule '{rule}': {reason}"));
        let (method, pattern) = rule
            .trim()
            .split_once(char::is_whitespace)
            .ok_or_else(|| invalid("expected 'METHOD pattern'".into()))?;
        let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
            .map_err(|e| invalid(e.to_string()))?;
        let pattern = Regex::new(&format!("^(?:{})$", pattern.trim()))
            .map_err(|e| invalid(e.to_string()))?;
        Ok(Self { method, pattern })
    }

    pub fn matches(&self, method: &Method, path: &str) -> bool {
        self.method == method && self.pattern.is_match(path)
    }
}

/// Requests the gateway forwards without a bearer token.
#[derive(Debug, Clone, Default)]
pub struct PublicPaths {
    rules: Vec<PublicRule>,
}

impl PublicPaths {
    pub fn parse_all<I, S>(rules: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = rules
            .into_iter()
            .map(|rule| PublicRule::parse(rule.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(Self { rules })
    }

    pub fn defaults() -> Result<Self, ConfigError> {
        Self::parse_all(DEFAULT_PUBLIC)
    }

    /// `gateway.public` replaces the defaults entirely when set.
    pub fn from_config(config: &MercatoConfig) -> Result<Self, ConfigError> {
        match config.get::<Vec<String>>("gateway.public") {
            Ok(rules) => Self::parse_all(rules),
            Err(ConfigError::NotFound(_)) => Self::defaults(),
            Err(e) => Err(e),
        }
    }

    pub fn is_public(&self, method: &Method, path: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(method, path))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
