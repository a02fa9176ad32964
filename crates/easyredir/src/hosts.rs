//! Source hosts: DTOs and the host operations.

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{Client, decode};
use crate::error::Error;
use crate::options::ListOptions;
use crate::page::{Page, paginate};

/// A source host as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    /// Server-assigned identifier.
    pub id: String,
    /// Resource type discriminator, always `host`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Summary attributes.
    pub attributes: HostAttributes,
    /// Links for this host.
    #[serde(default)]
    pub links: HostLinks,
}

/// Summary attributes carried by every host list item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostAttributes {
    /// Hostname.
    pub name: String,
    /// Whether DNS currently points at the service.
    pub dns_status: DnsStatus,
    /// State of the host's TLS certificate.
    pub certificate_status: CertificateStatus,
}

/// Links attached to a host resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostLinks {
    /// Canonical URL of this host.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

/// DNS verification state of a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DnsStatus {
    /// DNS resolves to the service.
    Active,
    /// DNS does not resolve to the service.
    Invalid,
}

/// Certificate provisioning state of a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateStatus {
    /// A certificate is issued and serving.
    Active,
    /// Issuance is in progress.
    Processing,
    /// DNS must be fixed before issuance can proceed.
    InvalidDns,
    /// The hostname is not eligible for automatic TLS.
    AutoSslNotSupported,
    /// Underscores in the hostname block issuance.
    HostnameContainsUnderscore,
    /// A CAA record forbids the certificate authority.
    InvalidCaaRecord,
    /// An AAAA record interferes with issuance.
    AaaaRecordPresent,
}

/// Full host record returned by get and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostDetail {
    /// Server-assigned identifier.
    pub id: String,
    /// Resource type discriminator, always `host`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Extended attributes; individually optional since the server omits
    /// sections that do not apply.
    #[serde(default)]
    pub attributes: HostDetailAttributes,
    /// Links for this host.
    #[serde(default)]
    pub links: HostLinks,
}

/// Extended attributes of a host record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostDetailAttributes {
    /// Hostname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether DNS currently points at the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_status: Option<DnsStatus>,
    /// When DNS was last probed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_tested_at: Option<DateTime<Utc>>,
    /// State of the host's TLS certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_status: Option<CertificateStatus>,
    /// Whether ACME certificate issuance is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acme_enabled: Option<bool>,
    /// How incoming URLs are matched against rules.
    #[serde(default)]
    pub match_options: MatchOptions,
    /// What is served when no rule matches.
    #[serde(default)]
    pub not_found_action: NotFoundAction,
    /// Security headers applied to responses.
    #[serde(default)]
    pub security: Security,
    /// DNS records the host must publish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_dns_entries: Option<RequiredDnsEntries>,
    /// DNS records currently observed for the host.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detected_dns_entries: Vec<DnsValues>,
}

/// URL matching behavior for a host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Ignore case when matching paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_insensitive: Option<bool>,
    /// Ignore trailing slashes when matching paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slash_insensitive: Option<bool>,
}

/// Behavior when a request matches no rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotFoundAction {
    /// Carry the query string over to the response URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_params: Option<bool>,
    /// Carry the request path over to the response URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_path: Option<bool>,
    /// Custom body served with a 404 response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_404_body: Option<String>,
    /// Whether a custom 404 body is stored (response-only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_404_body_present: Option<bool>,
    /// Status code served when no rule matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_code: Option<ResponseCode>,
    /// URL visitors are sent to when no rule matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_url: Option<String>,
}

/// Status code a host serves when no rule matches, encoded numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum ResponseCode {
    /// 301.
    MovedPermanently,
    /// 302.
    Found,
    /// 401.
    NotFound,
}

impl From<ResponseCode> for u16 {
    fn from(code: ResponseCode) -> Self {
        match code {
            ResponseCode::MovedPermanently => 301,
            ResponseCode::Found => 302,
            ResponseCode::NotFound => 401,
        }
    }
}

impl TryFrom<u16> for ResponseCode {
    type Error = String;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            301 => Ok(Self::MovedPermanently),
            302 => Ok(Self::Found),
            401 => Ok(Self::NotFound),
            other => Err(format!("unsupported response code: {other}")),
        }
    }
}

/// Security headers applied to a host's responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Security {
    /// Redirect plain HTTP to HTTPS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub https_upgrade: Option<bool>,
    /// Send headers preventing the host being framed elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevent_foreign_embedding: Option<bool>,
    /// Apply HSTS to subdomains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsts_include_sub_domains: Option<bool>,
    /// HSTS max-age in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsts_max_age: Option<u32>,
    /// Request inclusion in browser HSTS preload lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsts_preload: Option<bool>,
}

/// DNS records a host must publish to activate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredDnsEntries {
    /// Preferred record set.
    #[serde(default)]
    pub recommended: DnsValues,
    /// Acceptable alternatives.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<DnsValues>,
}

/// A DNS record type with its values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsValues {
    /// Record type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<DnsRecordType>,
    /// Record values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

/// DNS record types the service works with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DnsRecordType {
    /// Address record.
    A,
    /// Canonical-name record.
    #[serde(rename = "CNAME")]
    Cname,
}

/// Partial-update payload for a host; only set sections are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostUpdateAttributes {
    /// URL matching behavior.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_options: Option<MatchOptions>,
    /// Behavior when no rule matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_found_action: Option<NotFoundAction>,
    /// Security headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Security>,
}

#[derive(Debug, Deserialize)]
struct HostEnvelope {
    data: HostDetail,
}

impl Client {
    /// Fetch one page of hosts.
    ///
    /// # Errors
    ///
    /// Surfaces the transport classification ([`Error::Transport`],
    /// [`Error::RateLimited`], [`Error::Api`], [`Error::Status`]) or
    /// [`Error::Decode`] when the body is not a hosts page.
    pub async fn list_hosts(&self, options: &ListOptions) -> Result<Page<Host>, Error> {
        let response = self
            .send_request(&options.path_query("/hosts"), Method::GET, None)
            .await?;
        decode(response).await
    }

    /// Fetch every page of hosts, strictly sequentially.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pagination`] wrapping the first page failure.
    pub async fn list_all_hosts(&self, options: &ListOptions) -> Result<Vec<Host>, Error> {
        paginate("hosts", options, |page_options| async move {
            self.list_hosts(&page_options).await
        })
        .await
    }

    /// Fetch a single host by id.
    ///
    /// # Errors
    ///
    /// In addition to the transport classification, returns
    /// [`Error::Mismatch`] when the response carries a different id than
    /// requested.
    pub async fn get_host(&self, id: &str) -> Result<HostDetail, Error> {
        let response = self
            .send_request(&format!("/hosts/{id}"), Method::GET, None)
            .await?;
        let envelope: HostEnvelope = decode(response).await?;

        if envelope.data.id != id {
            return Err(Error::Mismatch {
                resource: "host",
                actual: envelope.data.id,
            });
        }

        Ok(envelope.data)
    }

    /// Apply a partial update to a host; only set sections are sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] when the payload cannot be serialized, or
    /// the transport classification for the request itself.
    pub async fn update_host(
        &self,
        id: &str,
        attributes: &HostUpdateAttributes,
    ) -> Result<HostDetail, Error> {
        let body = serde_json::to_string(attributes).map_err(Error::Encode)?;
        let response = self
            .send_request(&format!("/hosts/{id}"), Method::PATCH, Some(body))
            .await?;
        let envelope: HostEnvelope = decode(response).await?;
        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_decodes_list_payload() {
        let payload = r#"
            {
              "id": "abc-def",
              "type": "host",
              "attributes": {
                "name": "easyredir.com",
                "dns_status": "active",
                "certificate_status": "active"
              },
              "links": {
                "self": "/v1/hosts/abc-def"
              }
            }
        "#;
        let host: Host = serde_json::from_str(payload).expect("decodes");
        assert_eq!(host.id, "abc-def");
        assert_eq!(host.attributes.name, "easyredir.com");
        assert_eq!(host.attributes.dns_status, DnsStatus::Active);
        assert_eq!(host.attributes.certificate_status, CertificateStatus::Active);
        assert_eq!(host.links.self_link.as_deref(), Some("/v1/hosts/abc-def"));
    }

    #[test]
    fn host_detail_tolerates_missing_attributes() {
        let detail: HostDetail =
            serde_json::from_str(r#"{"id": "abc-123", "type": "host"}"#).expect("decodes");
        assert_eq!(detail.id, "abc-123");
        assert!(detail.attributes.name.is_none());
        assert!(detail.attributes.dns_tested_at.is_none());
    }

    #[test]
    fn update_attributes_serialize_only_set_sections() {
        let attributes = HostUpdateAttributes {
            match_options: Some(MatchOptions {
                case_insensitive: Some(true),
                slash_insensitive: None,
            }),
            ..HostUpdateAttributes::default()
        };
        let json = serde_json::to_string(&attributes).expect("serializes");
        assert_eq!(json, r#"{"match_options":{"case_insensitive":true}}"#);
    }

    #[test]
    fn response_code_round_trips_numerically() {
        let action = NotFoundAction {
            response_code: Some(ResponseCode::MovedPermanently),
            ..NotFoundAction::default()
        };
        let json = serde_json::to_string(&action).expect("serializes");
        assert_eq!(json, r#"{"response_code":301}"#);

        let decoded: NotFoundAction = serde_json::from_str(&json).expect("decodes");
        assert_eq!(decoded.response_code, Some(ResponseCode::MovedPermanently));
    }

    #[test]
    fn unknown_response_code_is_rejected() {
        let err = serde_json::from_str::<NotFoundAction>(r#"{"response_code":500}"#)
            .expect_err("rejects");
        assert!(err.to_string().contains("unsupported response code: 500"));
    }

    #[test]
    fn dns_record_types_use_upper_case_names() {
        let values = DnsValues {
            kind: Some(DnsRecordType::Cname),
            values: vec!["hosting.easyredir.com".to_string()],
        };
        let json = serde_json::to_string(&values).expect("serializes");
        assert_eq!(json, r#"{"type":"CNAME","values":["hosting.easyredir.com"]}"#);
    }
}
