//! `chat.postMessage` payload, options, and response decoding.

use crate::models::{Attachment, MessagePosted};
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Endpoint for posting a message.
pub(crate) const POST_MESSAGE_PATH: &str = "chat.postMessage";

/// Request body for `chat.postMessage`.
///
/// Unset optional fields are omitted from the JSON entirely. Boolean flags are
/// tri-state: Slack treats an absent flag differently from an explicit `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub(crate) struct OutboundMessage {
    channel: String,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    as_user: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<Attachment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    link_names: Option<bool>,
    #[serde(rename = "mrkdwn", skip_serializing_if = "Option::is_none")]
    markdown: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_ts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unfurl_links: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unfurl_media: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
}

impl OutboundMessage {
    /// Start a message and apply `options` in the order given.
    pub(crate) fn new(channel: &str, text: &str, options: &[MessageOption]) -> Self {
        let mut message = Self {
            channel: channel.to_string(),
            text: text.to_string(),
            ..Default::default()
        };

        for option in options {
            option.apply(&mut message);
        }

        message
    }

    /// Serialize to the JSON body sent to Slack.
    pub(crate) fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(Error::Encode)
    }
}

/// An optional setting applied to a message before it is sent.
///
/// Options run in the order they are passed to
/// [`Client::post_message`](crate::Client::post_message). Setters overwrite,
/// so the last one wins; [`MessageOption::add_attachment`] appends instead.
/// Options are cheap to clone and can be reused across calls.
///
/// # Examples
/// ```
/// use slack_api_client::{Attachment, MessageOption};
///
/// let options = [
///     MessageOption::as_user(false),
///     MessageOption::username("deploy-bot"),
///     MessageOption::add_attachment(Attachment {
///         text: Some("v1.2.3 is live".to_string()),
///         ..Default::default()
///     }),
/// ];
/// # let _ = options;
/// ```
#[derive(Clone)]
pub struct MessageOption(Arc<dyn Fn(&mut OutboundMessage) + Send + Sync>);

impl fmt::Debug for MessageOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MessageOption").finish_non_exhaustive()
    }
}

impl MessageOption {
    fn new(apply: impl Fn(&mut OutboundMessage) + Send + Sync + 'static) -> Self {
        Self(Arc::new(apply))
    }

    fn apply(&self, message: &mut OutboundMessage) {
        (self.0)(message)
    }

    /// Post as the authed user instead of as a bot.
    pub fn as_user(value: bool) -> Self {
        Self::new(move |m| m.as_user = Some(value))
    }

    /// Append an attachment. Repeated calls accumulate in order.
    pub fn add_attachment(attachment: Attachment) -> Self {
        Self::new(move |m| m.attachments.push(attachment.clone()))
    }

    /// Emoji to use as the icon. Overrides `icon_url`.
    pub fn icon_emoji(emoji: impl Into<String>) -> Self {
        let emoji = emoji.into();
        Self::new(move |m| m.icon_emoji = Some(emoji.clone()))
    }

    /// Image URL to use as the icon. Ignored unless `as_user` is false.
    pub fn icon_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self::new(move |m| m.icon_url = Some(url.clone()))
    }

    /// Find and link channel names and usernames.
    pub fn link_names(value: bool) -> Self {
        Self::new(move |m| m.link_names = Some(value))
    }

    /// Pass `false` to disable Slack markup parsing.
    pub fn markdown(value: bool) -> Self {
        Self::new(move |m| m.markdown = Some(value))
    }

    /// Reply in the thread of the message with this `ts`.
    pub fn thread_ts(ts: impl Into<String>) -> Self {
        let ts = ts.into();
        Self::new(move |m| m.thread_ts = Some(ts.clone()))
    }

    /// Unfurl primarily text-based content.
    pub fn unfurl_links(value: bool) -> Self {
        Self::new(move |m| m.unfurl_links = Some(value))
    }

    /// Pass `false` to disable unfurling of media content.
    pub fn unfurl_media(value: bool) -> Self {
        Self::new(move |m| m.unfurl_media = Some(value))
    }

    /// Bot display name. Ignored unless `as_user` is false.
    pub fn username(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(move |m| m.username = Some(name.clone()))
    }
}

/// Decode a `chat.postMessage` response body as-is.
pub(crate) fn decode_posted(body: &[u8]) -> Result<MessagePosted> {
    serde_json::from_slice(body).map_err(Error::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(options: &[MessageOption]) -> String {
        let bytes = OutboundMessage::new("C1", "hi", options).encode().unwrap();
        String::from_utf8(bytes).unwrap()
    }

    fn attachment(fallback: &str) -> Attachment {
        Attachment {
            fallback: Some(fallback.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn bare_message_has_only_channel_and_text() {
        assert_eq!(encoded(&[]), r#"{"channel":"C1","text":"hi"}"#);
    }

    #[test]
    fn as_user_false_is_still_emitted() {
        assert_eq!(
            encoded(&[MessageOption::as_user(false)]),
            r#"{"channel":"C1","text":"hi","as_user":false}"#
        );
        assert_eq!(
            encoded(&[MessageOption::as_user(true)]),
            r#"{"channel":"C1","text":"hi","as_user":true}"#
        );
    }

    #[test]
    fn attachments_keep_call_order() {
        let body = encoded(&[
            MessageOption::add_attachment(attachment("one")),
            MessageOption::as_user(true),
            MessageOption::add_attachment(attachment("two")),
        ]);
        assert_eq!(
            body,
            r#"{"channel":"C1","text":"hi","as_user":true,"attachments":[{"fallback":"one"},{"fallback":"two"}]}"#
        );
    }

    #[test]
    fn reapplying_options_appends_again() {
        let options = vec![
            MessageOption::add_attachment(attachment("a")),
            MessageOption::add_attachment(attachment("b")),
        ];
        let twice = [options.clone(), options].concat();

        let message = OutboundMessage::new("C1", "hi", &twice);
        let fallbacks: Vec<_> = message
            .attachments
            .iter()
            .map(|a| a.fallback.as_deref().unwrap())
            .collect();
        assert_eq!(fallbacks, ["a", "b", "a", "b"]);
    }

    #[test]
    fn last_setter_wins() {
        let message = OutboundMessage::new(
            "C1",
            "hi",
            &[MessageOption::username("first"), MessageOption::username("second")],
        );
        assert_eq!(message.username.as_deref(), Some("second"));
    }

    #[test]
    fn all_optional_fields_use_slack_names() {
        let body = encoded(&[
            MessageOption::icon_emoji(":robot_face:"),
            MessageOption::icon_url("https://example.com/i.png"),
            MessageOption::link_names(true),
            MessageOption::markdown(false),
            MessageOption::thread_ts("1503435956.000247"),
            MessageOption::unfurl_links(true),
            MessageOption::unfurl_media(false),
            MessageOption::username("bot"),
        ]);
        assert_eq!(
            body,
            concat!(
                r#"{"channel":"C1","text":"hi","icon_emoji":":robot_face:","#,
                r#""icon_url":"https://example.com/i.png","link_names":true,"mrkdwn":false,"#,
                r#""thread_ts":"1503435956.000247","unfurl_links":true,"unfurl_media":false,"#,
                r#""username":"bot"}"#
            )
        );
    }

    #[test]
    fn attachment_fields_serialize_in_order() {
        let full = Attachment {
            fallback: Some("f".into()),
            color: Some("c".into()),
            pretext: Some("p".into()),
            author_name: Some("an".into()),
            author_link: Some("al".into()),
            author_icon: Some("ai".into()),
            title: Some("t".into()),
            title_link: Some("tl".into()),
            text: Some("x".into()),
            image_url: Some("iu".into()),
            thumb_url: Some("tu".into()),
            footer: Some("fo".into()),
            footer_icon: Some("fi".into()),
        };
        let json = serde_json::to_string(&full).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"fallback":"f","color":"c","pretext":"p","author_name":"an","#,
                r#""author_link":"al","author_icon":"ai","title":"t","title_link":"tl","#,
                r#""text":"x","image_url":"iu","thumb_url":"tu","footer":"fo","footer_icon":"fi"}"#
            )
        );
    }

    #[test]
    fn decode_passes_response_through() {
        let posted = decode_posted(
            br#"{"ok":true,"channel":"C1","ts":"1503435956.000247",
                "message":{"text":"hi","username":"bot","bot_id":"B1","type":"message",
                "subtype":"bot_message","ts":"1503435956.000247",
                "attachments":[{"text":"x","id":1,"fallback":"f"}]}}"#,
        )
        .unwrap();

        assert!(posted.ok);
        assert_eq!(posted.channel, "C1");
        assert_eq!(posted.timestamp, "1503435956.000247");
        assert_eq!(posted.message.bot_id, "B1");
        assert_eq!(posted.message.kind, "message");
        assert_eq!(posted.message.attachments[0].id, 1);
    }

    #[test]
    fn decode_does_not_check_ok_flag() {
        let posted = decode_posted(br#"{"ok":false,"error":"channel_not_found"}"#).unwrap();
        assert!(!posted.ok);
        assert_eq!(posted.error, "channel_not_found");
    }

    #[test]
    fn decode_accepts_null_fields() {
        let posted = decode_posted(
            br#"{"ok":true,"error":null,"channel":"C1",
                "message":{"bot_id":null,"attachments":null,"text":"hi"}}"#,
        )
        .unwrap();

        assert_eq!(posted.error, "");
        assert_eq!(posted.message.bot_id, "");
        assert!(posted.message.attachments.is_empty());
        assert_eq!(posted.message.text, "hi");
    }

    #[test]
    fn decode_null_message_is_empty() {
        let posted = decode_posted(br#"{"ok":true,"message":null}"#).unwrap();
        assert_eq!(posted.message, crate::models::PostedMessage::default());
    }

    #[test]
    fn decode_prefers_ts_over_timestamp() {
        let posted = decode_posted(
            br#"{"ok":true,"channel":"C1","ts":"1.1","timestamp":"2.2",
                "message":{"ts":"3.3","timestamp":"4.4"}}"#,
        )
        .unwrap();
        assert_eq!(posted.timestamp, "1.1");
        assert_eq!(posted.message.timestamp, "3.3");
    }

    #[test]
    fn decode_falls_back_to_timestamp_key() {
        let posted =
            decode_posted(br#"{"ok":true,"timestamp":"2.2","message":{"timestamp":"4.4"}}"#)
                .unwrap();
        assert_eq!(posted.timestamp, "2.2");
        assert_eq!(posted.message.timestamp, "4.4");
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let err = decode_posted(b"{").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
