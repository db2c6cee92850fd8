//! Models for Azure Bot Service.

use std::fmt;

use azure_mgmt_core::client::ArmClient;
use azure_mgmt_core::models::Tags;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Resource provider namespace.
pub const PROVIDER_NAMESPACE: &str = "Microsoft.BotService";

/// API version used by this crate unless the client's profile pins another.
pub const API_VERSION: &str = "2022-09-15";

pub const RESOURCE_TYPE: &str = "Microsoft.BotService/botServices";

pub(crate) fn api_version(client: &ArmClient) -> String {
    client.api_version_query(PROVIDER_NAMESPACE, API_VERSION)
}

// ---------------------------------------------------------------------------
// Bots
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkuName {
    F0,
    S1,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sku {
    pub name: SkuName,
    /// `Free` or `Standard`.
    #[serde(default, skip_serializing)]
    pub tier: Option<String>,
}

impl Sku {
    pub fn new(name: SkuName) -> Self {
        Self { name, tier: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Sdk,
    Designer,
    Bot,
    Function,
    #[serde(rename = "azurebot")]
    AzureBot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MsaAppType {
    #[serde(rename = "UserAssignedMSI")]
    UserAssignedMsi,
    SingleTenant,
    MultiTenant,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotProperties {
    pub display_name: String,
    /// The bot's messaging endpoint.
    pub endpoint: String,
    pub msa_app_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msa_app_type: Option<MsaAppType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msa_app_tenant_id: Option<String>,
    #[serde(rename = "msaAppMSIResourceId", skip_serializing_if = "Option::is_none")]
    pub msa_app_msi_resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer_app_insight_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer_app_insights_application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub luis_app_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_cmek_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmek_key_vault_url: Option<String>,
    /// `Enabled` or `Disabled`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_network_access: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_streaming_supported: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_local_auth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_transformation_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    #[serde(skip_serializing)]
    pub endpoint_version: Option<String>,
    #[serde(default, skip_serializing)]
    pub configured_channels: Vec<String>,
    #[serde(default, skip_serializing)]
    pub enabled_channels: Vec<String>,
    #[serde(skip_serializing)]
    pub provisioning_state: Option<String>,
    #[serde(skip_serializing)]
    pub migration_token: Option<String>,
}

impl BotProperties {
    pub fn new(
        display_name: impl Into<String>,
        endpoint: impl Into<String>,
        msa_app_id: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            endpoint: endpoint.into(),
            msa_app_id: msa_app_id.into(),
            ..Default::default()
        }
    }
}

/// A bot registration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<Sku>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BotProperties>,

    #[serde(skip_serializing)]
    pub id: Option<String>,
    #[serde(skip_serializing)]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing)]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing)]
    pub zones: Vec<String>,
}

impl Bot {
    /// A global Azure Bot registration on the given SKU.
    pub fn new(sku: SkuName, properties: BotProperties) -> Self {
        Self {
            location: Some("global".into()),
            sku: Some(Sku::new(sku)),
            kind: Some(Kind::AzureBot),
            properties: Some(properties),
            ..Default::default()
        }
    }

    pub fn provisioning_state(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.provisioning_state.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckNameRequestBody {
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
}

/// Result of a bot name check. `valid` is true when the name can be used.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckNameResponseBody {
    pub valid: Option<bool>,
    pub message: Option<String>,
    pub abs_code: Option<String>,
}

// ---------------------------------------------------------------------------
// Channels
// ---------------------------------------------------------------------------

/// Channel names as they appear in resource paths.
///
/// `Other` carries the raw name of a channel kind without a typed model,
/// e.g. `"FacebookChannel"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelName {
    Alexa,
    DirectLine,
    Email,
    MsTeams,
    Slack,
    Sms,
    Telegram,
    WebChat,
    Other(String),
}

impl ChannelName {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Alexa => "AlexaChannel",
            Self::DirectLine => "DirectLineChannel",
            Self::Email => "EmailChannel",
            Self::MsTeams => "MsTeamsChannel",
            Self::Slack => "SlackChannel",
            Self::Sms => "SmsChannel",
            Self::Telegram => "TelegramChannel",
            Self::WebChat => "WebChatChannel",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by every channel, with channel-specific `properties`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSpec<P> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<P>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing)]
    pub provisioning_state: Option<String>,
}

impl<P> ChannelSpec<P> {
    pub fn new(properties: P) -> Self {
        Self {
            properties: Some(properties),
            etag: None,
            location: Some("global".into()),
            provisioning_state: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlexaChannelProperties {
    pub alexa_skill_id: String,
    pub is_enabled: bool,
    #[serde(skip_serializing)]
    pub url_fragment: Option<String>,
    #[serde(skip_serializing)]
    pub service_endpoint_uri: Option<String>,
}

/// A Direct Line or Web Chat site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub site_name: String,
    pub is_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_v1_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_v3_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_secure_site_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_block_user_upload_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trusted_origins: Vec<String>,

    #[serde(skip_serializing)]
    pub site_id: Option<String>,
    /// Only returned by `list_with_keys`.
    #[serde(skip_serializing)]
    pub key: Option<String>,
    #[serde(skip_serializing)]
    pub key2: Option<String>,
}

impl Site {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            is_enabled: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectLineChannelProperties {
    #[serde(default)]
    pub sites: Vec<Site>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_line_embed_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebChatChannelProperties {
    #[serde(default)]
    pub sites: Vec<Site>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailChannelProperties {
    pub email_address: String,
    pub is_enabled: bool,
    /// Write-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MsTeamsChannelProperties {
    pub is_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_calling: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calling_webhook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incoming_call_route: Option<String>,
    /// `CommercialDeployment` or `GCCModerateDeployment`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_environment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlackChannelProperties {
    pub is_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signing_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_page_url: Option<String>,
    #[serde(skip_serializing)]
    pub redirect_action: Option<String>,
    #[serde(skip_serializing)]
    pub last_submission_id: Option<String>,
    #[serde(skip_serializing)]
    pub is_validated: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsChannelProperties {
    pub phone: String,
    pub account_sid: String,
    pub is_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_validated: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegramChannelProperties {
    pub is_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_validated: Option<bool>,
}

/// A channel kind without a typed model, kept as raw JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherChannel {
    pub channel_name: String,
    /// Every field of the channel except `channelName`.
    pub fields: Map<String, Value>,
}

/// Channel definition, discriminated by `channelName`.
///
/// Channel kinds this crate has no model for deserialize as [`Channel::Other`]
/// and serialize back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Channel {
    Alexa(ChannelSpec<AlexaChannelProperties>),
    DirectLine(ChannelSpec<DirectLineChannelProperties>),
    Email(ChannelSpec<EmailChannelProperties>),
    MsTeams(ChannelSpec<MsTeamsChannelProperties>),
    Slack(ChannelSpec<SlackChannelProperties>),
    Sms(ChannelSpec<SmsChannelProperties>),
    Telegram(ChannelSpec<TelegramChannelProperties>),
    WebChat(ChannelSpec<WebChatChannelProperties>),
    Other(OtherChannel),
}

impl Channel {
    pub fn name(&self) -> ChannelName {
        match self {
            Self::Alexa(_) => ChannelName::Alexa,
            Self::DirectLine(_) => ChannelName::DirectLine,
            Self::Email(_) => ChannelName::Email,
            Self::MsTeams(_) => ChannelName::MsTeams,
            Self::Slack(_) => ChannelName::Slack,
            Self::Sms(_) => ChannelName::Sms,
            Self::Telegram(_) => ChannelName::Telegram,
            Self::WebChat(_) => ChannelName::WebChat,
            Self::Other(other) => ChannelName::Other(other.channel_name.clone()),
        }
    }
}

const CHANNEL_TAG: &str = "channelName";

impl Serialize for Channel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let body = match self {
            Self::Alexa(spec) => serde_json::to_value(spec),
            Self::DirectLine(spec) => serde_json::to_value(spec),
            Self::Email(spec) => serde_json::to_value(spec),
            Self::MsTeams(spec) => serde_json::to_value(spec),
            Self::Slack(spec) => serde_json::to_value(spec),
            Self::Sms(spec) => serde_json::to_value(spec),
            Self::Telegram(spec) => serde_json::to_value(spec),
            Self::WebChat(spec) => serde_json::to_value(spec),
            Self::Other(other) => Ok(Value::Object(other.fields.clone())),
        }
        .map_err(<S::Error as ser::Error>::custom)?;

        let mut fields = match body {
            Value::Object(fields) => fields,
            _ => return Err(ser::Error::custom("channel must serialize to a JSON object")),
        };
        fields.insert(CHANNEL_TAG.to_owned(), Value::String(self.name().as_str().to_owned()));
        fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        fn spec<P: DeserializeOwned>(fields: Map<String, Value>) -> serde_json::Result<ChannelSpec<P>> {
            serde_json::from_value(Value::Object(fields))
        }

        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        let channel_name = match fields.remove(CHANNEL_TAG) {
            Some(Value::String(name)) => name,
            Some(_) => return Err(de::Error::custom("channelName must be a string")),
            None => return Err(de::Error::missing_field(CHANNEL_TAG)),
        };

        let channel = match channel_name.as_str() {
            "AlexaChannel" => spec(fields).map(Self::Alexa),
            "DirectLineChannel" => spec(fields).map(Self::DirectLine),
            "EmailChannel" => spec(fields).map(Self::Email),
            "MsTeamsChannel" => spec(fields).map(Self::MsTeams),
            "SlackChannel" => spec(fields).map(Self::Slack),
            "SmsChannel" => spec(fields).map(Self::Sms),
            "TelegramChannel" => spec(fields).map(Self::Telegram),
            "WebChatChannel" => spec(fields).map(Self::WebChat),
            _ => Ok(Self::Other(OtherChannel { channel_name, fields })),
        };
        channel.map_err(de::Error::custom)
    }
}

/// A channel connected to a bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotChannel {
    pub properties: Channel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    #[serde(default, skip_serializing)]
    pub id: Option<String>,
    #[serde(default, skip_serializing)]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing)]
    pub resource_type: Option<String>,
}

impl BotChannel {
    pub fn new(properties: Channel) -> Self {
        Self {
            properties,
            location: Some("global".into()),
            tags: None,
            etag: None,
            id: None,
            name: None,
            resource_type: None,
        }
    }
}

/// Channel settings including secrets.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSettings {
    pub extension_key1: Option<String>,
    pub extension_key2: Option<String>,
    #[serde(default)]
    pub sites: Vec<Site>,
    pub channel_id: Option<String>,
    pub channel_display_name: Option<String>,
    pub bot_id: Option<String>,
    pub bot_icon_url: Option<String>,
    pub is_enabled: Option<bool>,
    pub disable_local_auth: Option<bool>,
    pub require_terms_agreement: Option<bool>,
}

/// A channel with its keys, returned by `list_with_keys`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChannelWithKeysResponse {
    pub properties: Option<Channel>,
    pub resource: Option<Channel>,
    pub setting: Option<ChannelSettings>,
    pub provisioning_state: Option<String>,
    pub entity_tag: Option<String>,
    pub changed_time: Option<String>,
    pub location: Option<String>,
    pub etag: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_is_tagged_by_channel_name() {
        let channel = BotChannel::new(Channel::DirectLine(ChannelSpec::new(DirectLineChannelProperties {
            sites: vec![Site {
                is_v3_enabled: Some(true),
                ..Site::new("Default Site")
            }],
            direct_line_embed_code: None,
        })));

        let json = serde_json::to_value(&channel).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "location": "global",
                "properties": {
                    "channelName": "DirectLineChannel",
                    "location": "global",
                    "properties": {
                        "sites": [{"siteName": "Default Site", "isEnabled": true, "isV3Enabled": true}]
                    }
                }
            })
        );
    }

    #[test]
    fn channel_deserializes_variant() {
        let channel: BotChannel = serde_json::from_value(serde_json::json!({
            "id": "/subscriptions/s/resourceGroups/rg/providers/Microsoft.BotService/botServices/bot1/channels/MsTeamsChannel",
            "name": "bot1/MsTeamsChannel",
            "location": "global",
            "properties": {
                "channelName": "MsTeamsChannel",
                "provisioningState": "Succeeded",
                "properties": {"isEnabled": true, "enableCalling": false}
            }
        }))
        .unwrap();

        assert_eq!(channel.properties.name(), ChannelName::MsTeams);
        match channel.properties {
            Channel::MsTeams(spec) => {
                assert_eq!(spec.provisioning_state.as_deref(), Some("Succeeded"));
                assert!(spec.properties.unwrap().is_enabled);
            }
            other => panic!("Expected MsTeams channel, got {:?}", other),
        }
    }

    #[test]
    fn unmodeled_channel_is_kept_as_raw_json() {
        let input = serde_json::json!({
            "location": "global",
            "properties": {
                "channelName": "FacebookChannel",
                "etag": "\"1\"",
                "properties": {"appId": "fb-app", "isEnabled": true}
            }
        });
        let channel: BotChannel = serde_json::from_value(input.clone()).unwrap();

        assert_eq!(channel.properties.name(), ChannelName::Other("FacebookChannel".into()));
        match &channel.properties {
            Channel::Other(other) => assert_eq!(other.fields["properties"]["appId"], "fb-app"),
            other => panic!("Expected unmodeled channel, got {:?}", other),
        }
        assert_eq!(serde_json::to_value(&channel).unwrap(), input);
    }

    #[test]
    fn channel_without_name_is_rejected() {
        let err = serde_json::from_value::<Channel>(serde_json::json!({"properties": {}})).unwrap_err();
        assert!(err.to_string().contains("channelName"));
    }

    #[test]
    fn bot_defaults_to_global_azure_bot() {
        let bot = Bot::new(
            SkuName::F0,
            BotProperties {
                msa_app_type: Some(MsaAppType::UserAssignedMsi),
                ..BotProperties::new("My Bot", "https://example.com/api/messages", "00000000-0000-0000-0000-000000000001")
            },
        );

        let json = serde_json::to_value(&bot).unwrap();
        assert_eq!(json["location"], "global");
        assert_eq!(json["kind"], "azurebot");
        assert_eq!(json["sku"], serde_json::json!({"name": "F0"}));
        assert_eq!(json["properties"]["msaAppType"], "UserAssignedMSI");
        assert!(json["properties"].get("configuredChannels").is_none());
    }
}
