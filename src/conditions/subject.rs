//! evaluation subject: the URL attributes conditions are tested against

use serde::Serialize;
use url::Url;

use super::types::Operand;

/// attributes derived once from a raw URL and shared by every condition
/// of an evaluation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Subject {
    /// the raw string, untouched
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
}

impl Subject {
    /// decompose a raw URL or absolute file path
    ///
    /// input that does not parse keeps only `url`; every other attribute is
    /// absent so conditions on them simply do not match.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        match Url::parse(trimmed) {
            Ok(parsed) => Self::from_url(raw, &parsed),
            Err(e) => {
                if let Some(parsed) = file_url(trimmed) {
                    return Self::from_url(raw, &parsed);
                }
                log::debug!("could not parse '{}' as a URL: {}", raw, e);
                Self {
                    url: raw.to_string(),
                    ..Default::default()
                }
            }
        }
    }

    fn from_url(raw: &str, parsed: &Url) -> Self {
        let port = match parsed.port() {
            Some(p) => Some(p.to_string()),
            None if parsed.has_host() => explicit_port(raw.trim(), parsed.scheme()),
            None => None,
        };

        Self {
            url: raw.to_string(),
            host: parsed
                .host_str()
                .filter(|h| !h.is_empty())
                .map(str::to_string),
            scheme: Some(format!("{}:", parsed.scheme())),
            path: Some(parsed.path().to_string()),
            port,
        }
    }

    /// the attribute an operand reads; reserved operands are never populated
    pub fn get(&self, operand: Operand) -> Option<&str> {
        match operand {
            Operand::Url => Some(self.url.as_str()),
            Operand::Host => self.host.as_deref(),
            Operand::Scheme => self.scheme.as_deref(),
            Operand::Path => self.path.as_deref(),
            Operand::Port => self.port.as_deref(),
            Operand::App | Operand::Extension => None,
        }
    }
}

fn file_url(raw: &str) -> Option<Url> {
    if !std::path::Path::new(raw).is_absolute() {
        return None;
    }
    Url::from_file_path(raw).ok()
}

/// port as written in the authority; the url crate drops scheme defaults
/// such as `:443` on https, but a port the user typed still counts
///
/// only the authority right after the URL's own `scheme://` is read.
fn explicit_port(raw: &str, scheme: &str) -> Option<String> {
    let prefix = raw.get(..scheme.len())?;
    if !prefix.eq_ignore_ascii_case(scheme) {
        return None;
    }
    let rest = raw[scheme.len()..].strip_prefix("://")?;
    let end = rest
        .find(|c| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    let authority = &rest[..end];

    // drop userinfo, then anything up to the closing bracket of an IPv6 host
    let host_port = authority.rsplit('@').next()?;
    let after_host = match host_port.rfind(']') {
        Some(i) => &host_port[i + 1..],
        None => host_port,
    };

    let (_, port) = after_host.rsplit_once(':')?;
    if port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    // same form the url crate reports for other ports: `0443` -> `443`
    port.parse::<u16>().ok().map(|p| p.to_string())
}
