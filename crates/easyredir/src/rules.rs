//! Redirect rules: DTOs and the rule operations.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::{Client, decode};
use crate::error::Error;
use crate::options::ListOptions;
use crate::page::{Page, paginate};

/// A redirect rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Server-assigned identifier.
    pub id: String,
    /// Resource type discriminator, always `rule`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Redirect attributes.
    #[serde(default)]
    pub attributes: RuleAttributes,
    /// Source host relationships, when the server includes them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<RuleRelationships>,
}

/// Attributes of a rule.
///
/// Every field is optional so a partial-update payload only carries what the
/// caller actually set; an omitted field is distinct from one explicitly set
/// to false or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleAttributes {
    /// Carry the query string over to the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_params: Option<bool>,
    /// Carry the request path over to the target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_path: Option<bool>,
    /// Redirect status served to visitors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_type: Option<ResponseType>,
    /// URLs the rule matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_urls: Option<Vec<String>>,
    /// URL visitors are redirected to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,
}

/// Redirect status served to visitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// HTTP 301.
    MovedPermanently,
    /// HTTP 302.
    Found,
}

/// Relationships attached to a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRelationships {
    /// Hosts serving the rule's source URLs.
    #[serde(default)]
    pub source_hosts: SourceHosts,
}

/// Source host references for a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceHosts {
    /// Host references.
    #[serde(default)]
    pub data: Vec<SourceHostRef>,
    /// Links related to the host collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<SourceHostsLinks>,
}

/// Reference to a host by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceHostRef {
    /// Host identifier.
    #[serde(default)]
    pub id: String,
    /// Resource type discriminator, always `host`.
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Links for a rule's source host collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceHostsLinks {
    /// URL of the full host collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RuleEnvelope {
    data: Rule,
}

impl Client {
    /// Fetch one page of rules.
    ///
    /// # Errors
    ///
    /// Surfaces the transport classification ([`Error::Transport`],
    /// [`Error::RateLimited`], [`Error::Api`], [`Error::Status`]) or
    /// [`Error::Decode`] when the body is not a rules page.
    pub async fn list_rules(&self, options: &ListOptions) -> Result<Page<Rule>, Error> {
        let response = self
            .send_request(&options.path_query("/rules"), Method::GET, None)
            .await?;
        decode(response).await
    }

    /// Fetch every page of rules, strictly sequentially.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pagination`] wrapping the first page failure.
    pub async fn list_all_rules(&self, options: &ListOptions) -> Result<Vec<Rule>, Error> {
        paginate("rules", options, |page_options| async move {
            self.list_rules(&page_options).await
        })
        .await
    }

    /// Fetch a single rule by id.
    ///
    /// # Errors
    ///
    /// In addition to the transport classification, returns
    /// [`Error::Mismatch`] when the response carries a different id than
    /// requested.
    pub async fn get_rule(&self, id: &str) -> Result<Rule, Error> {
        let response = self
            .send_request(&format!("/rules/{id}"), Method::GET, None)
            .await?;
        let envelope: RuleEnvelope = decode(response).await?;

        if envelope.data.id != id {
            return Err(Error::Mismatch {
                resource: "rule",
                actual: envelope.data.id,
            });
        }

        Ok(envelope.data)
    }

    /// Create a rule from the given attributes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] when the payload cannot be serialized, or
    /// the transport classification for the request itself.
    pub async fn create_rule(&self, attributes: &RuleAttributes) -> Result<Rule, Error> {
        let body = serde_json::to_string(attributes).map_err(Error::Encode)?;
        let response = self.send_request("/rules", Method::POST, Some(body)).await?;
        let envelope: RuleEnvelope = decode(response).await?;
        Ok(envelope.data)
    }

    /// Apply a partial update to a rule; only set attributes are sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] when the payload cannot be serialized, or
    /// the transport classification for the request itself.
    pub async fn update_rule(&self, id: &str, attributes: &RuleAttributes) -> Result<Rule, Error> {
        let body = serde_json::to_string(attributes).map_err(Error::Encode)?;
        let response = self
            .send_request(&format!("/rules/{id}"), Method::PATCH, Some(body))
            .await?;
        let envelope: RuleEnvelope = decode(response).await?;
        Ok(envelope.data)
    }

    /// Delete a rule by id.
    ///
    /// # Errors
    ///
    /// Surfaces the transport classification; a success body is drained and
    /// discarded.
    pub async fn remove_rule(&self, id: &str) -> Result<(), Error> {
        let response = self
            .send_request(&format!("/rules/{id}"), Method::DELETE, None)
            .await?;
        // drain so the connection can return to the pool
        response.bytes().await.map_err(Error::Transport)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_serialize_only_set_fields() {
        let attributes = RuleAttributes {
            forward_params: Some(true),
            ..RuleAttributes::default()
        };
        let json = serde_json::to_string(&attributes).expect("serializes");
        assert_eq!(json, r#"{"forward_params":true}"#);
    }

    #[test]
    fn attributes_distinguish_false_from_unset() {
        let attributes = RuleAttributes {
            forward_params: Some(false),
            ..RuleAttributes::default()
        };
        let json = serde_json::to_string(&attributes).expect("serializes");
        assert_eq!(json, r#"{"forward_params":false}"#);
    }

    #[test]
    fn rule_decodes_api_payload() {
        let payload = r#"
            {
              "id": "abc-def",
              "type": "rule",
              "attributes": {
                "forward_params": true,
                "forward_path": true,
                "response_type": "moved_permanently",
                "source_urls": ["abc.com", "abc.com/123"],
                "target_url": "otherdomain.com"
              }
            }
        "#;
        let rule: Rule = serde_json::from_str(payload).expect("decodes");
        assert_eq!(rule.id, "abc-def");
        assert_eq!(rule.kind, "rule");
        assert_eq!(rule.attributes.forward_params, Some(true));
        assert_eq!(
            rule.attributes.response_type,
            Some(ResponseType::MovedPermanently)
        );
        assert_eq!(
            rule.attributes.source_urls.as_deref(),
            Some(["abc.com".to_string(), "abc.com/123".to_string()].as_slice())
        );
        assert_eq!(rule.attributes.target_url.as_deref(), Some("otherdomain.com"));
        assert!(rule.relationships.is_none());
    }

    #[test]
    fn response_type_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&ResponseType::Found).expect("serializes"),
            r#""found""#
        );
    }
}
