use async_trait::async_trait;
use feed_rs::model::Feed;
use pulse_core::{Error, FeedFetcher, FeedSource, PageFetcher, Result};
use reqwest::Client;
use std::time::Duration;

fn build_client(timeout: Duration, user_agent: &str) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()?)
}

/// Downloads feed documents over HTTP and parses them with feed-rs.
#[derive(Clone)]
pub struct HttpFeedFetcher {
    client: Client,
}

impl HttpFeedFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout, user_agent)?,
        })
    }

    pub fn parse_bytes(endpoint: &str, bytes: &[u8]) -> Result<Feed> {
        feed_rs::parser::parse(bytes).map_err(|e| Error::FeedParse {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch_feed(&self, source: &FeedSource) -> Result<Feed> {
        let response = self.client.get(&source.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::FeedFetch {
                endpoint: source.endpoint.clone(),
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes().await?;
        Self::parse_bytes(&source.endpoint, &bytes)
    }
}

/// Downloads article pages as text.
#[derive(Clone)]
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout, user_agent)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::PageFetch {
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers `connections` requests with a bare 404 and returns their heads.
    async fn not_found_server(connections: usize) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let mut requests = Vec::new();
            for _ in 0..connections {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&buf[..n]);
                }
                socket
                    .write_all(
                        b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                    )
                    .await
                    .unwrap();
                socket.shutdown().await.unwrap();
                requests.push(String::from_utf8_lossy(&head).to_lowercase());
            }
            requests
        });
        (base, handle)
    }

    #[tokio::test]
    async fn test_non_success_status_is_typed() {
        let (base, server) = not_found_server(2).await;
        let timeout = Duration::from_secs(5);

        let pages = HttpPageFetcher::new(timeout, "TechPulse/1.0").unwrap();
        match pages.fetch_page(&format!("{}/article", base)).await {
            Err(Error::PageFetch { status }) => assert_eq!(status, 404),
            other => panic!("expected PageFetch, got {:?}", other.map(|h| h.len())),
        }

        let feeds = HttpFeedFetcher::new(timeout, "TechPulse/1.0").unwrap();
        let source = FeedSource::new(format!("{}/feed", base), pulse_core::CategoryTag::Ai);
        match feeds.fetch_feed(&source).await {
            Err(Error::FeedFetch { endpoint, status }) => {
                assert_eq!(status, 404);
                assert_eq!(endpoint, source.endpoint);
            }
            other => panic!("expected FeedFetch, got {:?}", other.map(|f| f.entries.len())),
        }

        let requests = server.await.unwrap();
        assert_eq!(requests.len(), 2);
        for request in requests {
            assert!(request.contains("user-agent: techpulse/1.0"), "{}", request);
        }
    }

    #[test]
    fn test_parse_error_names_endpoint() {
        let err = HttpFeedFetcher::parse_bytes("https://x.test/feed", b"<html>nope</html>")
            .unwrap_err();
        match err {
            Error::FeedParse { endpoint, .. } => assert_eq!(endpoint, "https://x.test/feed"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_atom() {
        let atom = br#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example Tech Blog</title>
  <id>https://example.com/feed.atom</id>
  <updated>2024-01-15T12:00:00Z</updated>
  <entry>
    <title>Understanding WebAssembly</title>
    <link href="https://example.com/posts/wasm-intro"/>
    <id>https://example.com/posts/wasm-intro</id>
    <updated>2024-01-15T12:00:00Z</updated>
  </entry>
</feed>"#;
        let feed = HttpFeedFetcher::parse_bytes("https://example.com/feed.atom", atom).unwrap();
        assert_eq!(feed.entries.len(), 1);
    }

    #[test]
    fn test_clients_build() {
        assert!(HttpFeedFetcher::new(Duration::from_secs(10), "TechPulse/1.0").is_ok());
        assert!(HttpPageFetcher::new(Duration::from_secs(15), "TechPulse/1.0").is_ok());
    }
}
