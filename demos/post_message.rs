//! Post a message and look up its author.
//!
//! ```sh
//! SLACK_TOKEN=xoxb-... cargo run --example post_message -- C0123456 ann@example.com
//! ```

use slack_api_client::{Attachment, Client, MessageOption};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let token = std::env::var("SLACK_TOKEN")?;
    let mut args = std::env::args().skip(1);
    let channel = args.next().ok_or("usage: post_message <channel> [email]")?;
    let email = args.next();

    let client = Client::builder(token)
        .timeout(Duration::from_secs(10))
        .build()?;

    let posted = client
        .post_message(
            "Hello from Rust",
            &channel,
            &[
                MessageOption::unfurl_links(false),
                MessageOption::add_attachment(Attachment {
                    color: Some("good".to_string()),
                    text: Some("Sent with slack-api-client".to_string()),
                    ..Default::default()
                }),
            ],
        )
        .await?;

    if !posted.ok {
        println!("Slack rejected the message: {}", posted.error);
        return Ok(());
    }
    println!("Posted to {} at {}", posted.channel, posted.timestamp);

    if let Some(email) = email {
        match client.get_user_by_email(&email).await {
            Ok(user) => println!("{} is {} ({})", email, user.id, user.real_name),
            Err(err) if err.remote_code().is_some() => println!("lookup failed: {err}"),
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}
