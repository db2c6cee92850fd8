//! Channels connecting a bot to Teams, Direct Line, Slack and others.

use azure_mgmt_core::client::{read_json, ArmClient};
use azure_mgmt_core::error::ArmResult;
use azure_mgmt_core::pager::{PagedList, Pager};
use azure_mgmt_core::path;

use crate::bots::bot_path;
use crate::models::{api_version, BotChannel, ChannelName, ListChannelWithKeysResponse};

fn channel_path(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
    channel_name: &ChannelName,
) -> ArmResult<String> {
    Ok(format!(
        "{}/channels/{}",
        bot_path(client, resource_group, resource_name)?,
        path::segment("channelName", channel_name.as_str())?
    ))
}

/// Register a channel. The channel kind comes from `parameters.properties`.
#[tracing::instrument(
    name = "arm::botservice::channels::create",
    skip(client, parameters),
    fields(resource_group = %resource_group, bot = %resource_name, channel = %parameters.properties.name())
)]
pub async fn create(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
    parameters: &BotChannel,
) -> ArmResult<BotChannel> {
    tracing::debug!("creating channel");

    let path = format!(
        "{}?{}",
        channel_path(client, resource_group, resource_name, &parameters.properties.name())?,
        api_version(client)
    );
    let response = client.put(&path, parameters).await?;
    read_json::<BotChannel>(response).await
}

#[tracing::instrument(
    name = "arm::botservice::channels::get",
    skip(client),
    fields(resource_group = %resource_group, bot = %resource_name, channel = %channel_name)
)]
pub async fn get(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
    channel_name: ChannelName,
) -> ArmResult<BotChannel> {
    let path = format!(
        "{}?{}",
        channel_path(client, resource_group, resource_name, &channel_name)?,
        api_version(client)
    );
    let response = client.get(&path).await?;
    read_json::<BotChannel>(response).await
}

#[tracing::instrument(
    name = "arm::botservice::channels::delete",
    skip(client),
    fields(resource_group = %resource_group, bot = %resource_name, channel = %channel_name)
)]
pub async fn delete(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
    channel_name: ChannelName,
) -> ArmResult<()> {
    let path = format!(
        "{}?{}",
        channel_path(client, resource_group, resource_name, &channel_name)?,
        api_version(client)
    );
    client.delete(&path).await?;
    Ok(())
}

/// List the channels registered on a bot.
#[tracing::instrument(
    name = "arm::botservice::channels::list_by_resource_group",
    skip(client),
    fields(resource_group = %resource_group, bot = %resource_name)
)]
pub fn list_by_resource_group(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
) -> ArmResult<Pager<PagedList<BotChannel>>> {
    let path = format!(
        "{}/channels?{}",
        bot_path(client, resource_group, resource_name)?,
        api_version(client)
    );
    Ok(Pager::new(client, path))
}

/// Get a channel together with its secrets and site keys.
#[tracing::instrument(
    name = "arm::botservice::channels::list_with_keys",
    skip(client),
    fields(resource_group = %resource_group, bot = %resource_name, channel = %channel_name)
)]
pub async fn list_with_keys(
    client: &ArmClient,
    resource_group: &str,
    resource_name: &str,
    channel_name: ChannelName,
) -> ArmResult<ListChannelWithKeysResponse> {
    let path = format!(
        "{}/listChannelWithKeys?{}",
        channel_path(client, resource_group, resource_name, &channel_name)?,
        api_version(client)
    );
    let response = client.post_empty(&path).await?;
    read_json::<ListChannelWithKeysResponse>(response).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Channel, ChannelSpec, MsTeamsChannelProperties};
    use azure_mgmt_core::error::ArmError;
    use azure_mgmt_core::test_support::{rg_path, setup_mock_client, TEST_RESOURCE_GROUP};
    use wiremock::matchers::{body_json, method, path as url_path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BOT: &str = "bot1";

    fn channels_url() -> String {
        rg_path(&format!("/providers/Microsoft.BotService/botServices/{BOT}/channels"))
    }

    fn teams_json() -> serde_json::Value {
        serde_json::json!({
            "id": format!("{}/MsTeamsChannel", channels_url()),
            "name": "bot1/MsTeamsChannel",
            "location": "global",
            "properties": {
                "channelName": "MsTeamsChannel",
                "provisioningState": "Succeeded",
                "properties": {"isEnabled": true, "enableCalling": true, "callingWebhook": "https://example.com/calling"}
            }
        })
    }

    #[tokio::test]
    async fn create_uses_channel_name_in_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(url_path(format!("{}/MsTeamsChannel", channels_url())))
            .and(body_json(serde_json::json!({
                "location": "global",
                "properties": {
                    "channelName": "MsTeamsChannel",
                    "location": "global",
                    "properties": {"isEnabled": true, "enableCalling": true, "callingWebhook": "https://example.com/calling"}
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(teams_json()))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let channel = BotChannel::new(Channel::MsTeams(ChannelSpec::new(MsTeamsChannelProperties {
            is_enabled: true,
            enable_calling: Some(true),
            calling_webhook: Some("https://example.com/calling".into()),
            ..Default::default()
        })));
        let created = create(&client, TEST_RESOURCE_GROUP, BOT, &channel).await.unwrap();
        assert_eq!(created.properties.name(), ChannelName::MsTeams);
    }

    #[tokio::test]
    async fn get_list_and_delete() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path(format!("{}/MsTeamsChannel", channels_url())))
            .respond_with(ResponseTemplate::new(200).set_body_json(teams_json()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(url_path(channels_url()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [teams_json(), {
                    "location": "global",
                    "properties": {"channelName": "WebChatChannel", "properties": {"sites": []}}
                }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(url_path(format!("{}/MsTeamsChannel", channels_url())))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let teams = get(&client, TEST_RESOURCE_GROUP, BOT, ChannelName::MsTeams).await.unwrap();
        assert_eq!(teams.name.as_deref(), Some("bot1/MsTeamsChannel"));

        let channels = list_by_resource_group(&client, TEST_RESOURCE_GROUP, BOT)
            .unwrap()
            .collect_all()
            .await
            .unwrap();
        let names: Vec<_> = channels.iter().map(|c| c.properties.name()).collect();
        assert_eq!(names, vec![ChannelName::MsTeams, ChannelName::WebChat]);

        delete(&client, TEST_RESOURCE_GROUP, BOT, ChannelName::MsTeams).await.unwrap();
    }

    #[tokio::test]
    async fn list_with_keys_returns_site_keys() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(url_path(format!("{}/DirectLineChannel/listChannelWithKeys", channels_url())))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "location": "global",
                "properties": {
                    "channelName": "DirectLineChannel",
                    "properties": {"sites": [{"siteName": "Default Site", "isEnabled": true, "siteId": "abc", "key": "k1", "key2": "k2"}]}
                },
                "setting": {
                    "channelId": "directline",
                    "sites": [{"siteName": "Default Site", "isEnabled": true, "key": "k1"}]
                },
                "provisioningState": "Succeeded"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let result = list_with_keys(&client, TEST_RESOURCE_GROUP, BOT, ChannelName::DirectLine)
            .await
            .unwrap();
        match result.properties {
            Some(Channel::DirectLine(spec)) => {
                let site = &spec.properties.unwrap().sites[0];
                assert_eq!(site.key.as_deref(), Some("k1"));
                assert_eq!(site.key2.as_deref(), Some("k2"));
            }
            other => panic!("Expected DirectLine channel, got {:?}", other),
        }
        assert_eq!(result.setting.unwrap().channel_id.as_deref(), Some("directline"));
    }

    #[tokio::test]
    async fn unmodeled_channels_are_listed_and_addressable() {
        let server = MockServer::start().await;
        let facebook = serde_json::json!({
            "id": format!("{}/FacebookChannel", channels_url()),
            "name": "bot1/FacebookChannel",
            "location": "global",
            "properties": {"channelName": "FacebookChannel", "properties": {"appId": "fb-app", "isEnabled": true}}
        });
        Mock::given(method("GET"))
            .and(url_path(channels_url()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [{
                    "location": "global",
                    "properties": {"channelName": "WebChatChannel", "properties": {"sites": []}}
                }, facebook.clone()]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(url_path(format!("{}/FacebookChannel", channels_url())))
            .respond_with(ResponseTemplate::new(200).set_body_json(facebook))
            .expect(1)
            .mount(&server)
            .await;

        let client = setup_mock_client(&server).await;
        let channels = list_by_resource_group(&client, TEST_RESOURCE_GROUP, BOT)
            .unwrap()
            .collect_all()
            .await
            .unwrap();
        let names: Vec<_> = channels.iter().map(|c| c.properties.name()).collect();
        assert_eq!(
            names,
            vec![ChannelName::WebChat, ChannelName::Other("FacebookChannel".into())]
        );

        let fetched = get(&client, TEST_RESOURCE_GROUP, BOT, ChannelName::Other("FacebookChannel".into()))
            .await
            .unwrap();
        match fetched.properties {
            Channel::Other(other) => assert_eq!(other.fields["properties"]["appId"], "fb-app"),
            other => panic!("Expected unmodeled channel, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn empty_bot_name_is_rejected() {
        let server = MockServer::start().await;
        let client = setup_mock_client(&server).await;

        let err = get(&client, TEST_RESOURCE_GROUP, "", ChannelName::Slack).await.unwrap_err();
        assert!(matches!(err, ArmError::InvalidParameter(_)));

        let err = delete(&client, TEST_RESOURCE_GROUP, BOT, ChannelName::Other(String::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, ArmError::InvalidParameter(_)));
    }
}
