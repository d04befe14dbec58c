//! Data models for the Slack Web API.

use serde::{Deserialize, Deserializer, Serialize};

/// A legacy message attachment.
///
/// Every field is optional and left out of the request when unset.
///
/// # Examples
/// ```
/// use slack_api_client::Attachment;
///
/// let attachment = Attachment {
///     color: Some("good".to_string()),
///     title: Some("Deploy finished".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Plain text summary for clients that can't show formatted attachments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    /// Color of the left border, a hex code or `good` / `warning` / `danger`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Text shown above the attachment block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    /// Hyperlink for `author_name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_link: Option<String>,
    /// 16x16 icon left of `author_name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,
    /// Main body text. Collapses in the UI past 700 characters or 5 line breaks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Image displayed at the bottom. Can't be combined with `thumb_url`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Thumbnail on the right side, scaled to 75px.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    /// Short contextual text, truncated past 300 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_icon: Option<String>,
}

/// Result of `chat.postMessage`.
///
/// Slack reports the timestamp as `ts`; older payloads use `timestamp`.
/// When both are present `ts` wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "MessagePostedWire")]
pub struct MessagePosted {
    /// Whether Slack accepted the call.
    pub ok: bool,
    /// Machine-readable error code when `ok` is false.
    pub error: String,
    /// Channel the message was posted to.
    pub channel: String,
    /// Message timestamp, usable as `thread_ts` for replies.
    pub timestamp: String,
    /// Server-side copy of the posted message.
    pub message: PostedMessage,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct MessagePostedWire {
    #[serde(deserialize_with = "null_as_default")]
    ok: bool,
    #[serde(deserialize_with = "null_as_default")]
    error: String,
    #[serde(deserialize_with = "null_as_default")]
    channel: String,
    #[serde(deserialize_with = "null_as_default")]
    ts: String,
    #[serde(deserialize_with = "null_as_default")]
    timestamp: String,
    #[serde(deserialize_with = "null_as_default")]
    message: PostedMessage,
}

impl From<MessagePostedWire> for MessagePosted {
    fn from(wire: MessagePostedWire) -> Self {
        Self {
            ok: wire.ok,
            error: wire.error,
            channel: wire.channel,
            timestamp: prefer_ts(wire.ts, wire.timestamp),
            message: wire.message,
        }
    }
}

/// Slack's echo of a posted message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "PostedMessageWire")]
pub struct PostedMessage {
    pub text: String,
    /// Bot's username.
    pub username: String,
    pub bot_id: String,
    pub attachments: Vec<PostedAttachment>,
    /// Always `message`.
    pub kind: String,
    pub subtype: String,
    pub timestamp: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct PostedMessageWire {
    #[serde(deserialize_with = "null_as_default")]
    text: String,
    #[serde(deserialize_with = "null_as_default")]
    username: String,
    #[serde(deserialize_with = "null_as_default")]
    bot_id: String,
    #[serde(deserialize_with = "null_as_default")]
    attachments: Vec<PostedAttachment>,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    kind: String,
    #[serde(deserialize_with = "null_as_default")]
    subtype: String,
    #[serde(deserialize_with = "null_as_default")]
    ts: String,
    #[serde(deserialize_with = "null_as_default")]
    timestamp: String,
}

impl From<PostedMessageWire> for PostedMessage {
    fn from(wire: PostedMessageWire) -> Self {
        Self {
            text: wire.text,
            username: wire.username,
            bot_id: wire.bot_id,
            attachments: wire.attachments,
            kind: wire.kind,
            subtype: wire.subtype,
            timestamp: prefer_ts(wire.ts, wire.timestamp),
        }
    }
}

fn prefer_ts(ts: String, timestamp: String) -> String {
    if ts.is_empty() { timestamp } else { ts }
}

/// An attachment as stored by Slack, with its assigned id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PostedAttachment {
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub fallback: String,
}

/// A workspace user as returned by `users.lookupByEmail`.
///
/// Fields missing from the response keep their default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct User {
    /// Workspace-unique id. Pair with `team_id` when storing.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub team_id: String,
    /// Deprecated by Slack; prefer `profile.display_name`.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// The user has been deactivated.
    #[serde(deserialize_with = "null_as_default")]
    pub deleted: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(deserialize_with = "null_as_default")]
    pub real_name: String,
    /// Geographic timezone region, e.g. `America/Los_Angeles`.
    #[serde(rename = "tz", deserialize_with = "null_as_default")]
    pub time_zone: String,
    #[serde(rename = "tz_label", deserialize_with = "null_as_default")]
    pub time_zone_label: String,
    /// Seconds to offset UTC by.
    #[serde(rename = "tz_offset", deserialize_with = "null_as_default")]
    pub time_zone_offset: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub profile: Profile,
    #[serde(deserialize_with = "null_as_default")]
    pub is_admin: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_owner: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_primary_owner: bool,
    /// Guest user. Combine with `is_ultra_restricted` for single-channel guests.
    #[serde(deserialize_with = "null_as_default")]
    pub is_restricted: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_ultra_restricted: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_bot: bool,
    /// Belongs to another workspace and shares no visible channel.
    #[serde(deserialize_with = "null_as_default")]
    pub is_stranger: bool,
    /// Unix timestamp of the last update.
    #[serde(deserialize_with = "null_as_default")]
    pub updated: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_app_user: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_invited_user: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_2fa: bool,
    /// IETF language code, e.g. `en-US`.
    #[serde(deserialize_with = "null_as_default")]
    pub locale: String,
}

/// The default profile fields of a [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub skype: String,
    #[serde(deserialize_with = "null_as_default")]
    pub real_name: String,
    /// `real_name` with non-Latin characters filtered out.
    #[serde(deserialize_with = "null_as_default")]
    pub real_name_normalized: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name_normalized: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status_text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status_emoji: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status_expiration: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub avatar_hash: String,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_original: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_24: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_32: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_48: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_72: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_192: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_512: String,
    #[serde(deserialize_with = "null_as_default")]
    pub team: String,
}

/// Reads `null` the same as an absent key: the field keeps its default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
