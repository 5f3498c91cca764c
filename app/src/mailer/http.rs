use super::{Mailer, ReminderEmail};
use anyhow::anyhow;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub endpoint: Url,
    pub api_key: String,
    pub from: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Sends e-mails through a MailerSend-compatible JSON API.
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    from: String,
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: Address<'a>,
    to: [Address<'a>; 1],
    subject: &'a str,
    text: &'a str,
}

impl HttpMailer {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
            api_key: config.api_key,
            from: config.from,
        })
    }

    fn request<'a>(&'a self, email: &'a ReminderEmail) -> SendRequest<'a> {
        SendRequest {
            from: Address { email: &self.from },
            to: [Address { email: &email.to }],
            subject: &email.subject,
            text: &email.text,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: &ReminderEmail) -> anyhow::Result<()> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&self.request(email))
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            log::info!("sent e-mail to {}: {}", email.to, email.subject);
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(anyhow!("e-mail API responded with {}: {}", status, body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers a single HTTP request with `status_line` and `body`, returning the raw request.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        let endpoint = Url::parse(&format!("http://{}/v1/email", addr)).unwrap();
        (endpoint, handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    fn mailer(endpoint: Url) -> HttpMailer {
        HttpMailer::new(Config {
            endpoint,
            api_key: "key".to_owned(),
            from: "bills@example.com".to_owned(),
            timeout_secs: default_timeout_secs(),
        })
        .unwrap()
    }

    fn email() -> ReminderEmail {
        ReminderEmail {
            to: "a@b.com".to_owned(),
            subject: "Subject".to_owned(),
            text: "Body".to_owned(),
        }
    }

    #[tokio::test]
    async fn accepted_email_is_sent_with_bearer_key() {
        let (endpoint, server) = serve_once("202 Accepted", "").await;
        mailer(endpoint).send(&email()).await.unwrap();
        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1/email "));
        assert!(request
            .to_ascii_lowercase()
            .contains("authorization: bearer key"));
        assert!(request.contains(r#""subject":"Subject""#));
    }

    #[tokio::test]
    async fn rejected_email_reports_status_and_body() {
        let (endpoint, server) =
            serve_once("422 Unprocessable Entity", r#"{"message":"invalid from"}"#).await;
        let error = mailer(endpoint).send(&email()).await.unwrap_err();
        server.await.unwrap();
        let message = error.to_string();
        assert!(message.contains("422"), "{}", message);
        assert!(message.contains("invalid from"), "{}", message);
    }

    #[test]
    fn request_body_matches_api_shape() {
        let mailer = mailer(Url::parse("https://api.mailersend.com/v1/email").unwrap());
        assert_eq!(
            serde_json::to_value(mailer.request(&email())).unwrap(),
            json!({
                "from": {"email": "bills@example.com"},
                "to": [{"email": "a@b.com"}],
                "subject": "Subject",
                "text": "Body",
            })
        );
    }
}
